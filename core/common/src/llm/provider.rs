//! LLMプロバイダのトレイト定義

use crate::error::Error;
use serde_json::Value;

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（OpenAI 互換、Echo など）はこのトレイトを実装する。
/// 単発の完了のみを扱い、ストリーミングや会話履歴は持たない。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `query` - ユーザーメッセージ
    /// * `system_instruction` - システム指示（オプション）
    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
    ) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンス本文を取得
    ///
    /// タイムアウトは `Error::Timeout`、非 2xx は `Error::Api`、接続失敗は `Error::Http` で返す。
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキストを抽出
    ///
    /// # Returns
    /// * `Ok(Some(String))` - 抽出したテキスト
    /// * `Ok(None)` - テキストが存在しない
    /// * `Err(Error)` - レスポンスが JSON でない、または API エラーオブジェクトを含む
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error>;
}
