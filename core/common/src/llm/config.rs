//! profiles.json の設定型
//!
//! ```json
//! {
//!   "default_provider": "local",
//!   "providers": {
//!     "local": { "type": "openai_compat", "base_url": "http://localhost:11434/v1", "model": "qwen2.5" }
//!   }
//! }
//! ```

use crate::error::Error;
use crate::llm::factory::ProviderType;
use serde::Deserialize;
use std::collections::HashMap;

/// profiles.json のルート
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesConfig {
    /// -p 省略時に使うプロファイル名
    #[serde(default)]
    pub default_provider: Option<String>,
    /// プロファイル名 -> プロファイル
    #[serde(default)]
    pub providers: HashMap<String, ProviderProfile>,
}

/// 1 プロファイル分の設定。省略した項目は各プロバイダの既定値
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderProfile {
    #[serde(rename = "type")]
    pub kind: ProviderType,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// API キーを読む環境変数名
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    /// 1 以上
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ProviderProfile {
    pub fn new(kind: ProviderType) -> Self {
        Self {
            kind,
            base_url: None,
            model: None,
            api_key_env: None,
            temperature: None,
            timeout_secs: None,
        }
    }
}

impl ProfilesConfig {
    /// JSON 文字列をパースして値を検査する（ファイル読みは resolver 側）
    pub fn parse(json: &str) -> Result<Self, Error> {
        let cfg: ProfilesConfig =
            serde_json::from_str(json).map_err(|e| Error::json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), Error> {
        let mut names: Vec<&String> = self.providers.keys().collect();
        names.sort();
        for name in names {
            if self.providers[name].timeout_secs == Some(0) {
                return Err(Error::json(format!(
                    "provider '{}': timeout_secs must be at least 1",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object() {
        let cfg = ProfilesConfig::parse("{}").unwrap();
        assert!(cfg.default_provider.is_none());
        assert!(cfg.providers.is_empty());
    }

    #[test]
    fn test_parse_profiles() {
        let json = r#"
        {
            "default_provider": "local",
            "providers": {
                "cloud": { "type": "openai", "model": "gpt-4o", "timeout_secs": 10 },
                "local": { "type": "openai_compat", "base_url": "http://localhost:11434/v1" },
                "offline": { "type": "echo" }
            }
        }
        "#;
        let cfg = ProfilesConfig::parse(json).unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("local"));
        assert_eq!(cfg.providers.len(), 3);

        let cloud = &cfg.providers["cloud"];
        assert_eq!(cloud.kind, ProviderType::OpenAi);
        assert_eq!(cloud.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cloud.timeout_secs, Some(10));

        let local = &cfg.providers["local"];
        assert_eq!(local.kind, ProviderType::OpenAiCompat);
        assert_eq!(local.base_url.as_deref(), Some("http://localhost:11434/v1"));

        assert_eq!(cfg.providers["offline"], ProviderProfile::new(ProviderType::Echo));
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        for kind in ["gemini", "gpt", "ollama", "OPENAI"] {
            let json = format!(r#"{{ "providers": {{ "x": {{ "type": "{}" }} }} }}"#, kind);
            assert!(ProfilesConfig::parse(&json).is_err(), "{}", kind);
        }
    }

    #[test]
    fn test_parse_unknown_keys_fail() {
        let cases = [
            r#"{ "default": "x" }"#,
            r#"{ "providers": { "x": { "provider": "echo" } } }"#,
            r#"{ "providers": { "x": { "type": "echo", "default_model": "m" } } }"#,
        ];
        for json in cases {
            assert!(matches!(ProfilesConfig::parse(json), Err(Error::Json(_))), "{}", json);
        }
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let json = r#"{ "providers": { "slow": { "type": "openai", "timeout_secs": 0 } } }"#;
        let err = ProfilesConfig::parse(json).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("'slow'"));
        assert!(err.to_string().contains("timeout_secs"));

        let json = r#"{ "providers": { "fast": { "type": "openai", "timeout_secs": 1 } } }"#;
        assert_eq!(ProfilesConfig::parse(json).unwrap().providers["fast"].timeout_secs, Some(1));
    }
}
