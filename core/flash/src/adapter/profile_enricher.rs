//! -p / profiles.json で選んだプロバイダを初回の補完時に組み立てる Enricher
//!
//! list / remove / clear / review はプロバイダを使わないので、profiles.json の不備や
//! 不明な -p で止まらない。

use std::sync::{Arc, OnceLock};

use common::domain::{ModelName, ProviderName};
use common::error::Error;
use common::llm::{create_provider, load_profiles_config, resolve_provider, AnyProvider};
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel, LogRecord};

use crate::adapter::LlmEnricher;
use crate::domain::{Enrichment, EnrichmentError, Word};
use crate::ports::outbound::Enricher;

/// プロバイダ解決を遅延させる Enricher
pub struct ProfileEnricher {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn EnvResolver>,
    profile: Option<ProviderName>,
    model: Option<ModelName>,
    log: Arc<dyn Log>,
    resolved: OnceLock<LlmEnricher<AnyProvider>>,
}

impl ProfileEnricher {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn EnvResolver>,
        profile: Option<ProviderName>,
        model: Option<ModelName>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            fs,
            env,
            profile,
            model,
            log,
            resolved: OnceLock::new(),
        }
    }

    /// プロバイダを解決する（2 回目以降は解決済みのものを返す）
    ///
    /// 不明なプロファイルは usage エラー、profiles.json の不備は Json / Io のまま返す。
    pub fn prepare(&self) -> Result<&LlmEnricher<AnyProvider>, Error> {
        if let Some(enricher) = self.resolved.get() {
            return Ok(enricher);
        }
        let profiles = load_profiles_config(self.fs.as_ref(), self.env.as_ref())?;
        let resolved = resolve_provider(self.profile.as_ref(), profiles.as_ref())?;
        let provider = create_provider(&resolved, self.model.as_ref(), self.env.as_ref())?;
        let _ = self.log.log(
            &LogRecord::now(LogLevel::Debug, "provider resolved")
                .layer("adapter")
                .kind("lifecycle")
                .field("profile", serde_json::json!(resolved.profile_name))
                .field("provider", serde_json::json!(resolved.provider_type().as_str())),
        );
        Ok(self
            .resolved
            .get_or_init(|| LlmEnricher::new(provider, Arc::clone(&self.log))))
    }
}

impl Enricher for ProfileEnricher {
    fn enrich(&self, word: &Word) -> Result<Enrichment, EnrichmentError> {
        self.prepare()?.enrich(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::std_env_resolver::resolve_dirs_with;
    use common::adapter::{NoopLog, StdFileSystem};
    use common::domain::Dirs;
    use std::path::Path;

    struct HomeEnv(String);

    impl EnvResolver for HomeEnv {
        fn var(&self, name: &str) -> Option<String> {
            (name == "FLASH_HOME").then(|| self.0.clone())
        }

        fn resolve_dirs(&self) -> Result<Dirs, Error> {
            resolve_dirs_with(|name| self.var(name))
        }
    }

    fn enricher_in(home: &Path, profile: &str) -> ProfileEnricher {
        ProfileEnricher::new(
            Arc::new(StdFileSystem),
            Arc::new(HomeEnv(home.display().to_string())),
            Some(ProviderName::new(profile)),
            None,
            Arc::new(NoopLog),
        )
    }

    #[test]
    fn test_resolves_once_on_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let e = enricher_in(dir.path(), "echo");
        let first: *const _ = e.prepare().unwrap();
        let second: *const _ = e.prepare().unwrap();
        assert_eq!(first, second);
        assert_eq!(e.enrich(&Word::parse("猫").unwrap()).unwrap().reading(), "猫");
    }

    #[test]
    fn test_unknown_profile_is_usage_error_on_prepare() {
        let dir = tempfile::tempdir().unwrap();
        let e = enricher_in(dir.path(), "nope");
        let err = e.prepare().unwrap_err();
        assert!(err.is_usage());
        assert!(e.resolved.get().is_none());
    }

    #[test]
    fn test_broken_profiles_file_surfaces_on_prepare() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(dir.path().join("config/profiles.json"), "{ not json").unwrap();
        let e = enricher_in(dir.path(), "echo");
        assert!(matches!(e.prepare(), Err(Error::Json(_))));
    }
}
