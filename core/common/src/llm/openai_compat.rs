//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! base_url で任意のエンドポイントを指定可能。単発・非ストリーミングのみ。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_TEMPERATURE: f64 = 0.7;
/// 応答待ちの上限。これを超えると Error::Timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API キーの扱い
#[derive(Debug, Clone)]
struct ApiKey {
    /// キーを読んだ環境変数名（エラー表示用）
    env_name: String,
    value: Option<String>,
    /// true のときキーが無ければ送信前に Error::Env
    required: bool,
}

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    name: &'static str,
    model: String,
    base_url: String,
    api_key: Option<ApiKey>,
    temperature: f64,
    timeout: Duration,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `model` - モデル名（None のとき DEFAULT_MODEL）
    /// * `base_url` - ベース URL（None のとき DEFAULT_BASE_URL）
    /// * `temperature` - 温度（None のとき DEFAULT_TEMPERATURE）
    /// * `timeout_secs` - タイムアウト秒（None のとき DEFAULT_TIMEOUT_SECS）
    pub fn new(
        model: Option<String>,
        base_url: Option<String>,
        temperature: Option<f32>,
        timeout_secs: Option<u64>,
    ) -> Self {
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let temperature = temperature.map(f64::from).unwrap_or(DEFAULT_TEMPERATURE);
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        Self {
            name: "openai_compat",
            model,
            base_url,
            api_key: None,
            temperature,
            timeout,
        }
    }

    /// 表示用のプロバイダ名を差し替える（"openai" 等）
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// API キーを設定する。value は環境変数から読んだ値（未設定なら None）。
    pub fn with_api_key(
        mut self,
        env_name: impl Into<String>,
        value: Option<String>,
        required: bool,
    ) -> Self {
        self.api_key = Some(ApiKey {
            env_name: env_name.into(),
            value,
            required,
        });
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Authorization ヘッダ値。必須なのにキーが無ければ Error::Env
    fn auth_header(&self) -> Result<Option<String>, Error> {
        let Some(key) = &self.api_key else {
            return Ok(None);
        };
        match &key.value {
            Some(v) => Ok(Some(format!("Bearer {}", v))),
            None if key.required => Err(Error::env(format!(
                "{} environment variable is not set",
                key.env_name
            ))),
            None => Ok(None),
        }
    }
}

/// エラー本文に載せる最大文字数
const BODY_SNIPPET_CHARS: usize = 120;

/// エラーレスポンス本文から message を取り出す（取れなければ本文そのまま）
fn api_error_message(response_text: &str) -> String {
    serde_json::from_str::<Value>(response_text)
        .ok()
        .and_then(|v| embedded_error(&v))
        .unwrap_or_else(|| response_text.to_string())
}

/// {"error": {...}} 形式のエラーオブジェクトがあれば message を返す
fn embedded_error(v: &Value) -> Option<String> {
    let err = v.get("error")?;
    if err.is_null() {
        return None;
    }
    Some(
        err["message"]
            .as_str()
            .or_else(|| err.as_str())
            .unwrap_or("Unknown error")
            .to_string(),
    )
}

fn body_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_SNIPPET_CHARS {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(BODY_SNIPPET_CHARS).collect();
    format!("{}...", head)
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
    ) -> Result<Value, Error> {
        let mut messages: Vec<Value> = Vec::new();
        if let Some(s) = system_instruction {
            messages.push(json!({ "role": "system", "content": s }));
        }
        messages.push(json!({ "role": "user", "content": query }));

        Ok(json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "stream": false
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let auth = self.auth_header()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        let mut builder = client
            .post(self.url())
            .header("Content-Type", "application/json")
            .body(request_json.to_string());

        if let Some(auth) = auth {
            builder = builder.header("Authorization", auth);
        }

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                Error::timeout(format!(
                    "No response from {} within {}s",
                    self.base_url,
                    self.timeout.as_secs()
                ))
            } else {
                Error::http(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status();
        let response_text = response.text().map_err(|e| {
            if e.is_timeout() {
                Error::timeout(format!("Timed out reading response: {}", e))
            } else {
                Error::http(format!("Failed to read response: {}", e))
            }
        })?;

        if !status.is_success() {
            return Err(Error::api(status.as_u16(), api_error_message(&response_text)));
        }
        // 2xx でもエラーオブジェクトを返すゲートウェイがある
        if let Some(message) = serde_json::from_str::<Value>(&response_text)
            .ok()
            .and_then(|v| embedded_error(&v))
        {
            return Err(Error::api(status.as_u16(), message));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        // 封筒が読めないのは通信側の失敗。Error::Json はモデル出力の不正にだけ使う
        let v: Value = serde_json::from_str(response_json).map_err(|e| {
            Error::http(format!(
                "Provider returned a non-JSON body ({}): {}",
                e,
                body_snippet(response_json)
            ))
        })?;

        // make_http_request を通った本文は 2xx
        if let Some(message) = embedded_error(&v) {
            return Err(Error::api(200, message));
        }

        let Some(message) = v["choices"][0].get("message") else {
            return Err(Error::http(format!(
                "Provider response has no choices: {}",
                body_snippet(response_json)
            )));
        };
        Ok(message["content"].as_str().map(|s| s.to_string()))
    }
}
