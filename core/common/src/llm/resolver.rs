//! profiles.json の読み込みと -p で選ばれるプロバイダの決定

use crate::domain::ProviderName;
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderProfile};
use crate::llm::factory::ProviderType;
use crate::ports::outbound::{EnvResolver, FileSystem};

/// -p も default_provider も無いときのプロバイダ
pub const DEFAULT_PROVIDER: &str = "openai";

/// 名前だけで選べる組み込みプロバイダ
const BUILTIN_PROVIDERS: [ProviderType; 3] =
    [ProviderType::OpenAi, ProviderType::OpenAiCompat, ProviderType::Echo];

/// 使うことに決まったプロファイル
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProvider {
    /// エラー表示とログ用のプロファイル名
    pub profile_name: String,
    pub profile: ProviderProfile,
}

impl ResolvedProvider {
    pub fn provider_type(&self) -> ProviderType {
        self.profile.kind
    }
}

/// profiles.json を読む。ファイルが無いときだけ Ok(None)
///
/// 読めない（権限・親がファイル等）は Io、中身が不正なら Json。どちらもパス付き。
pub fn load_profiles_config(
    fs: &dyn FileSystem,
    env: &dyn EnvResolver,
) -> Result<Option<ProfilesConfig>, Error> {
    let path = env.resolve_profiles_config_path()?;
    let contents = match fs.read_to_string(&path) {
        Ok(contents) => contents,
        Err(Error::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };
    ProfilesConfig::parse(&contents)
        .map(Some)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
}

/// プロファイル名（-p）を解決する
///
/// profiles.json の providers が組み込み名より優先。どちらにも無ければ
/// 使える名前を並べた usage エラー。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let name: &str = match (requested, cfg) {
        (Some(r), _) => r.as_ref(),
        (None, Some(c)) => c.default_provider.as_deref().unwrap_or(DEFAULT_PROVIDER),
        (None, None) => DEFAULT_PROVIDER,
    };

    if let Some(profile) = cfg.and_then(|c| c.providers.get(name)) {
        return Ok(ResolvedProvider {
            profile_name: name.to_string(),
            profile: profile.clone(),
        });
    }
    if let Some(kind) = ProviderType::from_str(name) {
        return Ok(ResolvedProvider {
            profile_name: name.to_string(),
            profile: ProviderProfile::new(kind),
        });
    }

    let mut available: Vec<&str> = BUILTIN_PROVIDERS.iter().map(|t| t.as_str()).collect();
    if let Some(c) = cfg {
        available.extend(c.providers.keys().map(String::as_str));
    }
    available.sort_unstable();
    available.dedup();
    Err(Error::invalid_argument(format!(
        "Unknown provider: '{}'. Available: {}",
        name,
        available.join(", ")
    )))
}
