//! アダプター（ports の trait の実装）

pub mod json_vocabulary_file;
pub mod llm_enricher;
pub mod memory_repository;
pub mod profile_enricher;
pub mod stub_enricher;

pub use json_vocabulary_file::JsonVocabularyFile;
pub use llm_enricher::LlmEnricher;
pub use profile_enricher::ProfileEnricher;
#[cfg(test)]
pub use memory_repository::MemoryRepository;
#[cfg(test)]
pub use stub_enricher::StubEnricher;
