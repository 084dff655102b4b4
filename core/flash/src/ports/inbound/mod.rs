//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::cli::Config;
use crate::domain::FlashError;

/// flash を実行する Inbound ポート
///
/// main は解析済みの Config を渡して run を呼び出し、終了コードを受け取る。
pub trait UseCaseRunner {
    fn run(&self, config: Config) -> Result<i32, FlashError>;
}
