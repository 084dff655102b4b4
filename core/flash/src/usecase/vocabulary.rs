//! 単語帳のユースケース
//!
//! 単語帳の読み書きはすべてここを通る。変更系の操作は必ず全件を永続化してから
//! 新しい Collection を返す。失敗したときは呼び出し元の Collection がそのまま有効。

use crate::domain::{Collection, Entry, FlashError, Word};
use crate::ports::outbound::{Enricher, VocabularyRepository};
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::path::Path;
use std::sync::Arc;

/// 単語帳の唯一の所有者
pub struct VocabularyStore {
    repository: Arc<dyn VocabularyRepository>,
    enricher: Arc<dyn Enricher>,
    log: Arc<dyn Log>,
}

impl VocabularyStore {
    pub fn new(
        repository: Arc<dyn VocabularyRepository>,
        enricher: Arc<dyn Enricher>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            repository,
            enricher,
            log,
        }
    }

    /// 保存先のパス（表示用）
    pub fn location(&self) -> &Path {
        self.repository.location()
    }

    /// 保存済みの単語帳を読む。ファイルが無ければ空
    pub fn load(&self) -> Result<Collection, FlashError> {
        let collection = self.repository.load()?;
        self.log_op("load", collection.len());
        Ok(collection)
    }

    /// 単語を補完して末尾に追加し、保存する
    ///
    /// 補完に失敗したら何も保存せず FlashError::Enrichment を返す。
    pub fn append(&self, collection: &Collection, word: &str) -> Result<Collection, FlashError> {
        let word = Word::parse(word)?;
        let enrichment = match self.enricher.enrich(&word) {
            Ok(e) => e,
            Err(source) => {
                let _ = self.log.log(
                    &LogRecord::now(LogLevel::Warn, format!("enrichment failed: {}", source))
                        .layer("usecase")
                        .kind("vocabulary")
                        .field("op", serde_json::json!("append"))
                        .field("word", serde_json::json!(word.as_str()))
                        .field("error_kind", serde_json::json!(source.kind())),
                );
                return Err(FlashError::Enrichment {
                    word: word.into_string(),
                    source,
                });
            }
        };
        let updated = collection.appended(Entry::from_enrichment(word, enrichment));
        self.persist(&updated)?;
        self.log_op("append", updated.len());
        Ok(updated)
    }

    /// index（0 始まり）の 1 件を削除して保存する。範囲外なら何もしない
    pub fn remove_at(&self, collection: &Collection, index: usize) -> Result<Collection, FlashError> {
        let updated = collection.removed(index)?;
        self.persist(&updated)?;
        self.log_op("remove", updated.len());
        Ok(updated)
    }

    /// 単語帳を空にして保存する
    pub fn clear(&self) -> Result<Collection, FlashError> {
        let empty = Collection::default();
        self.persist(&empty)?;
        self.log_op("clear", 0);
        Ok(empty)
    }

    /// 単語帳全体を書き出す
    pub fn persist(&self, collection: &Collection) -> Result<(), FlashError> {
        self.repository.save(collection)
    }

    fn log_op(&self, op: &str, count: usize) {
        let _ = self.log.log(
            &LogRecord::now(LogLevel::Info, format!("vocabulary {}", op))
                .layer("usecase")
                .kind("vocabulary")
                .field("op", serde_json::json!(op))
                .field("count", serde_json::json!(count)),
        );
    }
}
