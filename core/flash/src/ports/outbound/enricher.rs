//! 単語補完の Outbound ポート
//!
//! 単語 1 つから読みと訳を得る。失敗は種別付きで返し、部分的な結果は返さない。

use crate::domain::{Enrichment, EnrichmentError, Word};

/// 単語の読み・訳を外部（LLM 等）から取得する
pub trait Enricher: Send + Sync {
    fn enrich(&self, word: &Word) -> Result<Enrichment, EnrichmentError>;
}
