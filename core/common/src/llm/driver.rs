//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（payload 生成 → 送信 → テキスト抽出）を提供します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// LLMにクエリを送信してレスポンスを取得
    ///
    /// # Arguments
    /// * `query` - ユーザーメッセージ
    /// * `system_instruction` - システム指示（オプション）
    ///
    /// # Returns
    /// * `Ok(String)` - LLMからの応答テキスト
    /// * `Err(Error)` - 通信・API・レスポンス形式のエラー
    pub fn query(&self, query: &str, system_instruction: Option<&str>) -> Result<String, Error> {
        let payload = self.provider.make_request_payload(query, system_instruction)?;

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let response_json = self.provider.make_http_request(&request_json)?;

        let text = self
            .provider
            .parse_response_text(&response_json)?
            .ok_or_else(|| Error::json("No text in response"))?;

        Ok(text)
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
