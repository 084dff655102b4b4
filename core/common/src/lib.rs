//! flash 共通ライブラリ
//!
//! `flash` コマンドが使う I/O 抽象（ポート）・標準アダプタ・LLM プロバイダを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype・ディレクトリ）
pub mod domain;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// LLMプロバイダ
pub mod llm;
