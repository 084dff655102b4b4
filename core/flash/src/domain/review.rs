//! 復習セッション（単語帳のスナップショットを シャッフルして 1 枚ずつめくる）
//!
//! 状態は order / position / revealed のみで、永続化しない。
//! 各カードは Hidden → (reveal) → Revealed → (advance) → 次のカードの Hidden と遷移する。
//! 終端はなく、最後のカードの次は先頭に戻る。

use crate::domain::{Collection, Entry, FlashError};
use rand::seq::SliceRandom;
use rand::Rng;

/// 現在のカードの表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    /// 単語のみ表示
    Hidden,
    /// 読みと訳も表示
    Revealed,
}

/// 復習セッション
///
/// 不変条件: order は空でなく、0 <= position < order.len()
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    order: Vec<Entry>,
    position: usize,
    revealed: bool,
}

impl ReviewSession {
    /// スレッドローカルの乱数でシャッフルして開始する。空の単語帳は FlashError::EmptyCollection
    pub fn start(collection: &Collection) -> Result<Self, FlashError> {
        Self::start_with_rng(collection, &mut rand::thread_rng())
    }

    /// 乱数源を指定して開始する（テストではシード固定の StdRng を渡す）
    pub fn start_with_rng<R: Rng + ?Sized>(
        collection: &Collection,
        rng: &mut R,
    ) -> Result<Self, FlashError> {
        if collection.is_empty() {
            return Err(FlashError::EmptyCollection);
        }
        let mut order = collection.entries().to_vec();
        order.shuffle(rng);
        Ok(Self {
            order,
            position: 0,
            revealed: false,
        })
    }

    /// セッションを破棄して新しいシャッフルで開始し直す
    pub fn reset(collection: &Collection) -> Result<Self, FlashError> {
        Self::start(collection)
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(
        collection: &Collection,
        rng: &mut R,
    ) -> Result<Self, FlashError> {
        Self::start_with_rng(collection, rng)
    }

    /// 現在のカード
    pub fn current(&self) -> &Entry {
        &self.order[self.position]
    }

    /// 答えを表示する（何度呼んでも同じ）
    pub fn reveal(mut self) -> Self {
        self.revealed = true;
        self
    }

    /// 次のカードへ（末尾の次は先頭）。次のカードは Hidden から始まる
    pub fn advance(mut self) -> Self {
        self.position = (self.position + 1) % self.order.len();
        self.revealed = false;
        self
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn face(&self) -> CardFace {
        if self.revealed {
            CardFace::Revealed
        } else {
            CardFace::Hidden
        }
    }

    /// シャッフル済みの並び
    pub fn order(&self) -> &[Entry] {
        &self.order
    }
}
