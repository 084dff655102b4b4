//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。終了コードは sysexits.h に合わせる。

use thiserror::Error as ThisError;

/// 引数不正（EX_USAGE）
pub const EXIT_USAGE: i32 = 64;
/// 入力データ不正（EX_DATAERR）
pub const EXIT_DATAERR: i32 = 65;
/// 外部サービス利用不可（EX_UNAVAILABLE）
pub const EXIT_UNAVAILABLE: i32 = 69;
/// 内部エラー（EX_SOFTWARE）
pub const EXIT_SOFTWARE: i32 = 70;
/// I/O エラー（EX_IOERR）
pub const EXIT_IOERR: i32 = 74;
/// 設定不備（EX_CONFIG）
pub const EXIT_CONFIG: i32 = 78;

/// エラー型
#[derive(Debug, ThisError)]
pub enum Error {
    /// ファイル I/O
    #[error("{0}")]
    Io(String),
    /// ファイルが存在しない（親ディレクトリの権限不足などは Io）
    #[error("{0}")]
    NotFound(String),
    /// JSON のパース・シリアライズ
    #[error("{0}")]
    Json(String),
    /// HTTP 通信（接続失敗・レスポンス読み取り失敗）
    #[error("{0}")]
    Http(String),
    /// HTTP がタイムアウトした
    #[error("{0}")]
    Timeout(String),
    /// API が非 2xx を返した、またはエラーオブジェクトを返した
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    /// 環境変数・設定の不足
    #[error("{0}")]
    Env(String),
    /// 引数不正
    #[error("{0}")]
    InvalidArgument(String),
    /// システムエラー
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// 使い方の誤りか（main で usage を表示するかの判定に使う）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => EXIT_USAGE,
            Self::Json(_) => EXIT_DATAERR,
            Self::Http(_) | Self::Timeout(_) | Self::Api { .. } => EXIT_UNAVAILABLE,
            Self::Env(_) => EXIT_CONFIG,
            Self::Io(_) | Self::NotFound(_) => EXIT_IOERR,
            Self::System(_) => EXIT_SOFTWARE,
        }
    }
}
