//! 実行時ディレクトリ（XDG / FLASH_HOME 解決結果）
//!
//! EnvResolver::resolve_dirs() で取得し、単語帳・ログ・設定のパス計算に使う。

use std::path::PathBuf;

const VOCABULARY_FILENAME: &str = "vocabulary.json";
const LOG_FILENAME: &str = "flash.jsonl";
const PROFILES_FILENAME: &str = "profiles.json";

/// 解決済みの config / data / state ディレクトリ
#[derive(Debug, Clone)]
pub struct Dirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Dirs {
    /// 単語帳ファイルの既定パス（data/vocabulary.json）
    pub fn vocabulary_file(&self) -> PathBuf {
        self.data_dir.join(VOCABULARY_FILENAME)
    }

    /// ログ格納ディレクトリ（state/logs）
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// JSONL ログファイル
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILENAME)
    }

    /// プロバイダプロファイル設定
    pub fn profiles_file(&self) -> PathBuf {
        self.config_dir.join(PROFILES_FILENAME)
    }
}
