//! flash コマンドの enum（Command Pattern）
//!
//! 単語帳の操作と復習の分岐を enum で明示する。

/// flash の実行モード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashCommand {
    /// ヘルプ表示
    Help,
    /// 単語を補完して追加（複数可、1 語ずつ処理）
    Add { words: Vec<String> },
    /// 単語帳を一覧表示
    List,
    /// 一覧の番号（1 始まり）で 1 件削除
    Remove { number: usize },
    /// 単語帳を空にする。yes が false なら確認する
    Clear { yes: bool },
    /// シャッフルして復習
    Review,
}

impl FlashCommand {
    /// ログ用の名前
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Add { .. } => "add",
            Self::List => "list",
            Self::Remove { .. } => "remove",
            Self::Clear { .. } => "clear",
            Self::Review => "review",
        }
    }
}
