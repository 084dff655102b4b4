//! プロバイダファクトリー
//!
//! 解決済みプロファイルに基づいて適切なプロバイダを作成します。

use crate::domain::ModelName;
use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::openai_compat::{OpenAiCompatProvider, DEFAULT_API_KEY_ENV};
use crate::llm::provider::LlmProvider;
use crate::llm::resolver::ResolvedProvider;
use crate::ports::outbound::EnvResolver;
use serde::Deserialize;
use serde_json::Value;

/// プロバイダタイプ（profiles.json の "type"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ProviderType {
    /// api.openai.com（API キー必須）
    #[serde(rename = "openai")]
    OpenAi,
    /// OpenAI Chat Completions 互換 (/chat/completions)
    #[serde(rename = "openai_compat")]
    OpenAiCompat,
    /// Echo（単語をそのまま返す）
    #[serde(rename = "echo")]
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "openai_compat" => Some(Self::OpenAiCompat),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::OpenAiCompat => "openai_compat",
            Self::Echo => "echo",
        }
    }
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    OpenAiCompat(OpenAiCompatProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::OpenAiCompat(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
    ) -> Result<Value, Error> {
        match self {
            Self::OpenAiCompat(p) => p.make_request_payload(query, system_instruction),
            Self::Echo(p) => p.make_request_payload(query, system_instruction),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::OpenAiCompat(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::OpenAiCompat(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }
}

/// プロバイダを作成する
///
/// # Arguments
/// * `resolved` - resolve_provider の結果
/// * `model` - -m で指定されたモデル（プロファイルの model より優先）
/// * `env` - API キーを読む環境変数の解決
///
/// API キーの有無はここでは検査しない（送信時に検査する）。
pub fn create_provider(
    resolved: &ResolvedProvider,
    model: Option<&ModelName>,
    env: &dyn EnvResolver,
) -> Result<AnyProvider, Error> {
    let profile = &resolved.profile;
    let model = model
        .map(|m| m.to_string())
        .or_else(|| profile.model.clone());
    match profile.kind {
        ProviderType::OpenAi => {
            let key_env = profile
                .api_key_env
                .clone()
                .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
            let key = env.var(&key_env);
            let provider = OpenAiCompatProvider::new(
                model,
                profile.base_url.clone(),
                profile.temperature,
                profile.timeout_secs,
            )
            .with_name("openai")
            .with_api_key(key_env, key, true);
            Ok(AnyProvider::OpenAiCompat(provider))
        }
        ProviderType::OpenAiCompat => {
            let mut provider = OpenAiCompatProvider::new(
                model,
                profile.base_url.clone(),
                profile.temperature,
                profile.timeout_secs,
            );
            if let Some(key_env) = profile.api_key_env.clone() {
                let key = env.var(&key_env);
                provider = provider.with_api_key(key_env, key, false);
            }
            Ok(AnyProvider::OpenAiCompat(provider))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}
