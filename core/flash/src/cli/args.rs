use crate::domain::FlashCommand;
use clap::builder::{ArgAction, RangedU64ValueParser};
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: ログレコードを stderr にも出す
    pub verbose: bool,
    /// -f / --file: 単語帳ファイルのパス（FLASH_VOCAB_FILE・既定パスより優先）
    pub file: Option<PathBuf>,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    /// サブコマンド。None ならヘルプを表示する
    pub command: Option<FlashCommand>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("flash")
        .about("Japanese vocabulary flashcards with LLM-filled readings and translations")
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also print log records to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            clap::Arg::new("file")
                .short('f')
                .long("file")
                .value_name("path")
                .help("Vocabulary file (default: $FLASH_VOCAB_FILE or <data dir>/vocabulary.json)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1)
                .global(true),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Provider profile (openai, openai_compat, echo, or a profiles.json key)")
                .num_args(1)
                .global(true),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (e.g. gpt-4o-mini)")
                .num_args(1)
                .global(true),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .subcommand(
            clap::Command::new("add")
                .about("Look up each word and add it to the collection")
                .arg(
                    clap::Arg::new("words")
                        .value_name("word")
                        .required(true)
                        .num_args(1..),
                ),
        )
        .subcommand(clap::Command::new("list").about("List the collection"))
        .subcommand(
            clap::Command::new("remove")
                .about("Remove the entry with the given number (as shown by list)")
                .arg(
                    clap::Arg::new("number")
                        .value_name("n")
                        .required(true)
                        .value_parser(RangedU64ValueParser::<usize>::new().range(1..)),
                ),
        )
        .subcommand(
            clap::Command::new("clear")
                .about("Remove every entry")
                .arg(
                    clap::Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Do not ask for confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(clap::Command::new("review").about("Review the collection in shuffled order"))
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let help = matches.get_flag("help");
    let verbose = matches.get_flag("verbose");
    let file = matches.get_one::<PathBuf>("file").cloned();
    let profile = matches
        .get_one::<String>("profile")
        .map(|s| ProviderName::new(s.clone()));
    let model = matches
        .get_one::<String>("model")
        .map(|s| ModelName::new(s.clone()));
    let command = match matches.subcommand() {
        Some(("add", sub)) => Some(FlashCommand::Add {
            words: sub
                .get_many::<String>("words")
                .map(|i| i.cloned().collect())
                .unwrap_or_default(),
        }),
        Some(("list", _)) => Some(FlashCommand::List),
        Some(("remove", sub)) => sub
            .get_one::<usize>("number")
            .map(|&number| FlashCommand::Remove { number }),
        Some(("clear", sub)) => Some(FlashCommand::Clear {
            yes: sub.get_flag("yes"),
        }),
        Some(("review", _)) => Some(FlashCommand::Review),
        _ => None,
    };

    Config {
        help,
        verbose,
        file,
        profile,
        model,
        command,
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "flash", &mut std::io::stdout());
}

/// Config を FlashCommand に変換する
pub fn config_to_command(config: Config) -> FlashCommand {
    if config.help {
        return FlashCommand::Help;
    }
    config.command.unwrap_or(FlashCommand::Help)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.help);
        assert!(!config.verbose);
        assert!(config.file.is_none());
        assert!(config.command.is_none());
        assert_eq!(config_to_command(config), FlashCommand::Help);
    }

    #[test]
    fn test_parse_args_no_args_is_help() {
        let config = parse_args_from(&["flash"]).unwrap();
        assert_eq!(config_to_command(config), FlashCommand::Help);
    }

    #[test]
    fn test_parse_args_help_wins_over_subcommand() {
        let config = parse_args_from(&["flash", "list", "-h"]).unwrap();
        assert!(config.help);
        assert_eq!(config_to_command(config), FlashCommand::Help);
    }

    #[test]
    fn test_parse_args_add_words() {
        let config = parse_args_from(&["flash", "add", "猫", "食べる"]).unwrap();
        assert_eq!(
            config.command,
            Some(FlashCommand::Add {
                words: vec!["猫".to_string(), "食べる".to_string()]
            })
        );
    }

    #[test]
    fn test_parse_args_add_requires_word() {
        let err = parse_args_from(&["flash", "add"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_parse_args_global_options_after_subcommand() {
        let config = parse_args_from(&[
            "flash", "add", "-p", "echo", "-m", "m1", "-f", "/tmp/v.json", "-v", "猫",
        ])
        .unwrap();
        assert_eq!(config.profile.as_deref(), Some("echo"));
        assert_eq!(config.model.as_deref(), Some("m1"));
        assert_eq!(config.file, Some(PathBuf::from("/tmp/v.json")));
        assert!(config.verbose);
    }

    #[test]
    fn test_parse_args_remove_number() {
        let config = parse_args_from(&["flash", "remove", "2"]).unwrap();
        assert_eq!(config.command, Some(FlashCommand::Remove { number: 2 }));
    }

    #[test]
    fn test_parse_args_remove_rejects_zero_and_garbage() {
        assert_eq!(
            parse_args_from(&["flash", "remove", "0"]).unwrap_err().exit_code(),
            64
        );
        assert_eq!(
            parse_args_from(&["flash", "remove", "two"]).unwrap_err().exit_code(),
            64
        );
    }

    #[test]
    fn test_parse_args_clear_yes() {
        let config = parse_args_from(&["flash", "clear", "--yes"]).unwrap();
        assert_eq!(config.command, Some(FlashCommand::Clear { yes: true }));
        let config = parse_args_from(&["flash", "clear"]).unwrap();
        assert_eq!(config.command, Some(FlashCommand::Clear { yes: false }));
    }

    #[test]
    fn test_parse_args_unknown_option() {
        let result = parse_args_from(&["flash", "--unknown"]);
        assert!(result.is_err(), "unknown long option must be rejected");
        assert_eq!(result.unwrap_err().exit_code(), 64);
    }

    #[test]
    fn test_parse_args_unknown_subcommand() {
        let err = parse_args_from(&["flash", "study"]).unwrap_err();
        assert!(err.is_usage());
    }
}
