//! 単語カード 1 件と、その順序付き集合（単語帳）

use crate::domain::{Enrichment, FlashError, Word};
use serde::{Deserialize, Serialize};

/// 単語カード 1 件
///
/// 旧形式（jap / kana / fr）のファイルも読めるよう alias を持つ。書き出しは常に新しい名前。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(alias = "jap")]
    pub word: String,
    #[serde(alias = "kana")]
    pub reading: String,
    #[serde(alias = "fr")]
    pub translation: String,
}

impl Entry {
    pub fn new(
        word: impl Into<String>,
        reading: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            reading: reading.into(),
            translation: translation.into(),
        }
    }

    /// 補完に成功した単語からカードを作る
    pub fn from_enrichment(word: Word, enrichment: Enrichment) -> Self {
        Self {
            word: word.into_string(),
            reading: enrichment.reading().to_string(),
            translation: enrichment.translation().to_string(),
        }
    }
}

/// 単語帳（追加順を保持する Entry の列）。永続化の単位
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(Vec<Entry>);

impl Collection {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.0.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    /// 末尾に 1 件追加した新しい単語帳を返す
    pub fn appended(&self, entry: Entry) -> Self {
        let mut entries = self.0.clone();
        entries.push(entry);
        Self(entries)
    }

    /// index の 1 件を除いた新しい単語帳を返す。範囲外なら FlashError::Index
    pub fn removed(&self, index: usize) -> Result<Self, FlashError> {
        if index >= self.0.len() {
            return Err(FlashError::Index {
                index,
                len: self.0.len(),
            });
        }
        let mut entries = self.0.clone();
        entries.remove(index);
        Ok(Self(entries))
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
