//! LLMドライバーとプロバイダの実装
//!
//! 異なるLLMプロバイダ（OpenAI 互換・Echo）で共通する処理を提供します。

pub mod config;
pub mod driver;
pub mod echo;
pub mod factory;
pub mod openai_compat;
pub mod provider;
pub mod resolver;

pub use driver::LlmDriver;
pub use factory::{create_provider, AnyProvider, ProviderType};
pub use provider::LlmProvider;
pub use resolver::{load_profiles_config, resolve_provider, ResolvedProvider};
