//! テスト用: メモリ上に単語帳を保持する VocabularyRepository 実装


#[cfg(test)]
pub use memory::MemoryRepository;
