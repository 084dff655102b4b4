//! CLI（引数解析とコンソール入出力）

mod args;
pub mod confirm;
pub mod review;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
#[cfg(test)]
pub use args::parse_args_from;
