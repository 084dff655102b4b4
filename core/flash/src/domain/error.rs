//! flash のエラー型
//!
//! 共通の I/O・設定エラー（common::error::Error）を包み、単語帳固有の失敗を区別する。

use common::error::{Error, EXIT_CONFIG, EXIT_DATAERR, EXIT_UNAVAILABLE, EXIT_USAGE};
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// 単語の補完（読み・訳の取得）に失敗した理由
#[derive(Debug, ThisError)]
pub enum EnrichmentError {
    /// API キーが無く、送信していない
    #[error("{0}")]
    MissingApiKey(String),
    /// 接続できない・応答を読めない
    #[error("network error: {0}")]
    Transport(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    /// プロバイダが非 2xx を返した
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    /// モデルの出力が {"kana": ..., "fr": ...} ちょうど 2 フィールドの JSON でない
    #[error("unexpected model output: {0}")]
    MalformedResponse(String),
}

impl EnrichmentError {
    /// ログ用の短い種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey(_) => "missing_api_key",
            Self::Transport(_) => "transport",
            Self::Timeout(_) => "timeout",
            Self::Api { .. } => "api",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<Error> for EnrichmentError {
    fn from(e: Error) -> Self {
        match e {
            Error::Env(msg) => Self::MissingApiKey(msg),
            Error::Timeout(msg) => Self::Timeout(msg),
            Error::Api { status, message } => Self::Api { status, message },
            Error::Json(msg) => Self::MalformedResponse(msg),
            Error::Http(msg)
            | Error::Io(msg)
            | Error::NotFound(msg)
            | Error::InvalidArgument(msg)
            | Error::System(msg) => {
                Self::Transport(msg)
            }
        }
    }
}

/// flash のエラー型
#[derive(Debug, ThisError)]
pub enum FlashError {
    /// 補完に失敗した。単語は保存されていない
    #[error("could not add '{word}': {source}")]
    Enrichment {
        word: String,
        #[source]
        source: EnrichmentError,
    },
    /// 単語帳ファイルは存在するが JSON として読めない。ファイルには触れていない
    #[error("vocabulary file '{path}' is corrupt: {detail}", path = .path.display())]
    StorageCorrupt { path: PathBuf, detail: String },
    /// index が範囲外。何も変更していない
    #[error("no entry number {} (collection has {len} entries)", .index + 1)]
    Index { index: usize, len: usize },
    #[error("word must not be empty")]
    EmptyWord,
    #[error("collection is empty")]
    EmptyCollection,
    #[error(transparent)]
    Common(#[from] Error),
}

impl FlashError {
    /// 使い方の誤りか（main で usage を表示するかの判定に使う）
    pub fn is_usage(&self) -> bool {
        match self {
            Self::Common(e) => e.is_usage(),
            _ => false,
        }
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Enrichment {
                source: EnrichmentError::MissingApiKey(_),
                ..
            } => EXIT_CONFIG,
            Self::Enrichment { .. } => EXIT_UNAVAILABLE,
            Self::StorageCorrupt { .. } | Self::EmptyCollection => EXIT_DATAERR,
            Self::Index { .. } | Self::EmptyWord => EXIT_USAGE,
            Self::Common(e) => e.exit_code(),
        }
    }
}
