//! 単語帳の永続化 Outbound ポート
//!
//! 単語帳全体を 1 つのドキュメントとして読み書きする（差分更新はしない）。

use crate::domain::{Collection, FlashError};
use std::path::Path;

/// 単語帳ドキュメントの読み書き
pub trait VocabularyRepository: Send + Sync {
    /// 読み込む。ドキュメントが無ければ空の単語帳、壊れていれば FlashError::StorageCorrupt
    fn load(&self) -> Result<Collection, FlashError>;

    /// 全体を書き換える。呼び出し側から途中状態が見えないこと
    fn save(&self, collection: &Collection) -> Result<(), FlashError>;

    /// ドキュメントの場所（表示・ログ用）
    fn location(&self) -> &Path;
}
