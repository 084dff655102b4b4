//! Outbound ポート: アプリが外界（単語帳ファイル・補完 LLM）を使うための trait

pub mod enricher;
pub mod vocabulary_repository;

pub use enricher::Enricher;
pub use vocabulary_repository::VocabularyRepository;
