//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::Dirs;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "flash";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        resolve_dirs_with(|name| self.var(name))
    }
}

/// 変数参照を差し替え可能にした解決本体
pub fn resolve_dirs_with(var: impl Fn(&str) -> Option<String>) -> Result<Dirs, Error> {
    if let Some(home) = var("FLASH_HOME") {
        let home = PathBuf::from(home);
        return Ok(Dirs {
            config_dir: home.join("config"),
            data_dir: home.join("data"),
            state_dir: home.join("state"),
        });
    }

    let user_home = var("HOME").map(PathBuf::from);
    let base = |xdg: &str, fallback: &[&str]| -> Result<PathBuf, Error> {
        if let Some(dir) = var(xdg) {
            return Ok(PathBuf::from(dir).join(APP_DIR));
        }
        let mut path = user_home
            .clone()
            .ok_or_else(|| Error::env("HOME is not set"))?;
        for part in fallback {
            path.push(part);
        }
        path.push(APP_DIR);
        Ok(path)
    };

    Ok(Dirs {
        config_dir: base("XDG_CONFIG_HOME", &[".config"])?,
        data_dir: base("XDG_DATA_HOME", &[".local", "share"])?,
        state_dir: base("XDG_STATE_HOME", &[".local", "state"])?,
    })
}
