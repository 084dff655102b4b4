//! Echoプロバイダの実装
//!
//! 実際のLLM APIを呼び出さず、ユーザーメッセージ（単語）をそのまま
//! 読みと訳として返します。オフラインでの動作確認やテスト用に使用します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
    ) -> Result<Value, Error> {
        let mut messages = Vec::new();
        if let Some(s) = system_instruction {
            messages.push(json!({ "role": "system", "content": s }));
        }
        messages.push(json!({ "role": "user", "content": query }));
        Ok(json!({ "model": "echo", "messages": messages }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // 送信せず、リクエストをそのままレスポンスとして扱う
        Ok(request_json.to_string())
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;
        let word = v["messages"]
            .as_array()
            .and_then(|msgs| msgs.iter().rev().find(|m| m["role"] == "user"))
            .and_then(|m| m["content"].as_str());
        Ok(word.map(|w| json!({ "kana": w, "fr": w }).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_round_trip_returns_word_as_both_fields() {
        let p = EchoProvider::new();
        let payload = p.make_request_payload("猫", Some("instruction")).unwrap();
        let response = p.make_http_request(&payload.to_string()).unwrap();
        let text = p.parse_response_text(&response).unwrap().unwrap();
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["kana"], "猫");
        assert_eq!(v["fr"], "猫");
    }

    #[test]
    fn test_echo_without_user_message() {
        let p = EchoProvider::new();
        assert_eq!(p.parse_response_text(r#"{"messages":[]}"#).unwrap(), None);
    }
}
