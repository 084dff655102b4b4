//! LLM に単語を送り、読みと訳を受け取る Enricher 実装
//!
//! 指示文は system メッセージ、単語だけを user メッセージとして送る。
//! 応答は前後の空白を除いたうえで {"kana": ..., "fr": ...} ちょうど 2 フィールドの
//! JSON でなければならない。コードフェンスや説明文が付いていれば MalformedResponse。

use crate::domain::{Enrichment, EnrichmentError, Word};
use crate::ports::outbound::Enricher;
use common::llm::{LlmDriver, LlmProvider};
use common::ports::outbound::{Log, LogLevel, LogRecord};
use serde_json::Value;
use std::sync::Arc;

/// モデルへの指示文
pub const ENRICH_INSTRUCTION: &str = "Pour le mot japonais donné, donne-moi la lecture en Hiragana/Katakana et la traduction française. Réponds uniquement en JSON: {\"kana\": \"...\", \"fr\": \"...\"}";

/// エラーメッセージに載せる応答の最大文字数
const PREVIEW_CHARS: usize = 80;

/// LlmDriver を使う Enricher
pub struct LlmEnricher<P: LlmProvider> {
    driver: LlmDriver<P>,
    log: Arc<dyn Log>,
}

impl<P: LlmProvider> LlmEnricher<P> {
    pub fn new(provider: P, log: Arc<dyn Log>) -> Self {
        Self {
            driver: LlmDriver::new(provider),
            log,
        }
    }
}

impl<P: LlmProvider> std::fmt::Debug for LlmEnricher<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmEnricher").finish_non_exhaustive()
    }
}

impl<P: LlmProvider> Enricher for LlmEnricher<P> {
    fn enrich(&self, word: &Word) -> Result<Enrichment, EnrichmentError> {
        let _ = self.log.log(
            &LogRecord::now(LogLevel::Debug, "enrichment request")
                .layer("adapter")
                .kind("enrichment")
                .field("provider", serde_json::json!(self.driver.provider().name()))
                .field("word", serde_json::json!(word.as_str())),
        );
        let text = self.driver.query(word.as_str(), Some(ENRICH_INSTRUCTION))?;
        parse_enrichment(&text)
    }
}

/// モデルの出力テキストを Enrichment にする
///
/// オブジェクトで、キーが kana と fr の 2 つだけ、値がどちらも文字列のときだけ受け付ける。
pub fn parse_enrichment(text: &str) -> Result<Enrichment, EnrichmentError> {
    let malformed =
        |why: String| EnrichmentError::MalformedResponse(format!("{} in {:?}", why, preview(text)));
    let value: Value = serde_json::from_str(text.trim()).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(malformed("expected a JSON object".to_string()));
    };
    if fields.len() != 2 {
        return Err(malformed(format!(
            "expected exactly the fields kana and fr, got {}",
            fields.len()
        )));
    }
    match (fields.get("kana"), fields.get("fr")) {
        (Some(Value::String(kana)), Some(Value::String(fr))) => {
            Enrichment::new(kana.as_str(), fr.as_str())
        }
        _ => Err(malformed("kana and fr must both be strings".to_string())),
    }
}

fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}
