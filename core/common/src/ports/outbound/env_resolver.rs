//! 環境変数解決 Outbound ポート
//!
//! ホーム・XDG ディレクトリや API キーを環境変数から解決する。
//! usecase / adapter はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::Dirs;
use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 任意の環境変数（未設定・空文字は None）
    fn var(&self, name: &str) -> Option<String>;

    /// config / data / state ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. FLASH_HOME（設定されていれば $FLASH_HOME/{config,data,state}）
    /// 2. XDG_CONFIG_HOME / XDG_DATA_HOME / XDG_STATE_HOME 配下の flash
    /// 3. $HOME/.config/flash, $HOME/.local/share/flash, $HOME/.local/state/flash
    fn resolve_dirs(&self) -> Result<Dirs, Error>;

    /// FLASH_VOCAB_FILE で単語帳ファイルが指定されていれば返す
    fn vocabulary_file_from_env(&self) -> Option<PathBuf> {
        self.var("FLASH_VOCAB_FILE").map(PathBuf::from)
    }

    /// プロバイダプロファイル設定ファイルのパス
    fn resolve_profiles_config_path(&self) -> Result<PathBuf, Error> {
        Ok(self.resolve_dirs()?.profiles_file())
    }
}
