//! LLM プロバイダ Outbound ポート
//!
//! 定義はプロバイダ実装と同じ llm::provider に置き、ports からはここ経由で参照する。

pub use crate::llm::provider::LlmProvider;
