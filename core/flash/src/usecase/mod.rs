pub mod vocabulary;

pub use vocabulary::VocabularyStore;
