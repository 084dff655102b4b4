mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io::{BufRead, Write};
use std::process;

use cli::confirm::confirm;
use cli::review::run_review;
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{Entry, FlashCommand, FlashError};
use ports::inbound::UseCaseRunner;
use wiring::{wire_flash, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, FlashError> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.execute(config_to_command(config), &mut stdin.lock(), &mut stdout.lock())
    }
}

fn entry_line(entry: &Entry) -> String {
    format!("{} ({}) : {}", entry.word, entry.reading, entry.translation)
}

fn io_err(e: std::io::Error) -> FlashError {
    Error::io_msg(format!("Failed to write output: {}", e)).into()
}

impl Runner {
    /// 入出力を差し替え可能にした実行本体
    fn execute<R: BufRead, W: Write>(
        &self,
        cmd: FlashCommand,
        input: &mut R,
        output: &mut W,
    ) -> Result<i32, FlashError> {
        let command_name = cmd.name();
        let _ = self.app.logger.log(
            &LogRecord::now(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", serde_json::json!(command_name)),
        );

        let result = self.dispatch(cmd, input, output);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::now(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", serde_json::json!(command_name))
                .field("exit_code", serde_json::json!(code)),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::now(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }

    fn dispatch<R: BufRead, W: Write>(
        &self,
        cmd: FlashCommand,
        input: &mut R,
        output: &mut W,
    ) -> Result<i32, FlashError> {
        let store = &self.app.vocabulary;
        match cmd {
            FlashCommand::Help => {
                print_help();
                Ok(0)
            }
            FlashCommand::Add { words } => {
                // 不明な -p や profiles.json の不備は単語ごとではなくコマンド全体のエラー
                self.app.enricher.prepare()?;
                let mut collection = store.load()?;
                let mut code = 0;
                for word in &words {
                    match store.append(&collection, word) {
                        Ok(updated) => {
                            collection = updated;
                            if let Some(entry) = collection.entries().last() {
                                writeln!(
                                    output,
                                    "Added: {} ({}) = {}",
                                    entry.word, entry.reading, entry.translation
                                )
                                .map_err(io_err)?;
                            }
                        }
                        // 1 語の失敗では止めず、残りの単語を続ける
                        Err(e @ (FlashError::Enrichment { .. } | FlashError::EmptyWord)) => {
                            eprintln!("flash: {}", e);
                            code = e.exit_code();
                        }
                        Err(e) => return Err(e),
                    }
                }
                Ok(code)
            }
            FlashCommand::List => {
                let collection = store.load()?;
                if collection.is_empty() {
                    writeln!(output, "Your collection is empty.").map_err(io_err)?;
                }
                for (i, entry) in collection.iter().enumerate() {
                    writeln!(output, "{}. {}", i + 1, entry_line(entry)).map_err(io_err)?;
                }
                Ok(0)
            }
            FlashCommand::Remove { number } => {
                let collection = store.load()?;
                let index = number
                    .checked_sub(1)
                    .ok_or_else(|| Error::invalid_argument("entry numbers start at 1"))?;
                let removed = collection.get(index).cloned();
                store.remove_at(&collection, index)?;
                if let Some(entry) = removed {
                    writeln!(output, "Removed: {}", entry_line(&entry)).map_err(io_err)?;
                }
                Ok(0)
            }
            FlashCommand::Clear { yes } => {
                if !yes {
                    let collection = store.load()?;
                    let question = format!(
                        "Remove all {} entries from {}?",
                        collection.len(),
                        store.location().display()
                    );
                    if !confirm(input, output, &question).map_err(io_err)? {
                        writeln!(output, "Nothing removed.").map_err(io_err)?;
                        return Ok(0);
                    }
                }
                store.clear()?;
                writeln!(output, "Collection cleared.").map_err(io_err)?;
                Ok(0)
            }
            FlashCommand::Review => {
                let collection = store.load()?;
                run_review(&collection, input, output, &mut rand::thread_rng())?;
                Ok(0)
            }
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("flash: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, FlashError> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    // ヘルプは環境の解決に失敗しても表示できるよう配線より前に処理する
    if config_to_command(config.clone()) == FlashCommand::Help {
        print_help();
        return Ok(0);
    }
    let app = wire_flash(&config)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: flash [options] <add|list|remove|clear|review> [args...]");
}

fn print_help() {
    println!("Usage: flash [options] <command> [args...]");
    println!();
    println!("Commands:");
    println!("  add <word...>        Look up the reading and French translation of each word and add it");
    println!("  list                 List the collection (numbered from 1)");
    println!("  remove <n>           Remove entry number n (as shown by list)");
    println!("  clear [-y, --yes]    Remove every entry (asks for confirmation unless --yes)");
    println!("  review               Shuffled flashcards: Enter reveals, Enter again moves on, s reshuffles, q quits");
    println!();
    println!("Options:");
    println!("  -h, --help                Show this help message");
    println!("  -f, --file <path>         Vocabulary file. Default: $FLASH_VOCAB_FILE, else <data dir>/vocabulary.json");
    println!("  -p, --profile <profile>   Provider profile (openai, openai_compat, echo, or a key of profiles.json)");
    println!("  -m, --model <model>       Model name. Default: profile model, else gpt-4o-mini");
    println!("  -v, --verbose             Also print log records to stderr");
    println!("  --generate <shell>        Generate shell completion script (bash, zsh, fish, elvish, powershell)");
    println!();
    println!("Environment:");
    println!("  FLASH_HOME        Base directory. Uses $FLASH_HOME/{{config,data,state}} instead of the XDG directories.");
    println!("  FLASH_VOCAB_FILE  Vocabulary file (overridden by -f)");
    println!("  OPENAI_API_KEY    API key for the openai profile");
    println!();
    println!("Files:");
    println!("  <config dir>/profiles.json   Provider profiles ($XDG_CONFIG_HOME/flash or ~/.config/flash)");
    println!("  <data dir>/vocabulary.json   Vocabulary ($XDG_DATA_HOME/flash or ~/.local/share/flash)");
    println!("  <state dir>/logs/flash.jsonl Structured log ($XDG_STATE_HOME/flash or ~/.local/state/flash)");
    println!();
    println!("Examples:");
    println!("  flash add 猫 食べる");
    println!("  flash -p echo add 犬");
    println!("  flash list");
    println!("  flash review");
}
