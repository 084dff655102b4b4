use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::adapter::std_env_resolver::resolve_dirs_with;
use common::adapter::StdFileSystem;
use common::domain::{Dirs, ProviderName};
use common::error::Error;
use common::ports::outbound::EnvResolver;

use crate::cli::Config;
use crate::domain::{FlashCommand, FlashError};
use crate::wiring::{resolve_vocabulary_path, wire_flash_with};
use crate::Runner;

/// FLASH_HOME を一時ディレクトリに向けた EnvResolver
#[derive(Clone)]
struct TempHomeEnv {
    vars: HashMap<String, String>,
}

impl TempHomeEnv {
    fn new(home: &Path) -> Self {
        let mut vars = HashMap::new();
        vars.insert("FLASH_HOME".to_string(), home.display().to_string());
        Self { vars }
    }

    fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvResolver for TempHomeEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        resolve_dirs_with(|name| self.var(name))
    }
}

fn echo_config() -> Config {
    Config {
        profile: Some(ProviderName::new("echo")),
        ..Default::default()
    }
}

/// 一時ホームで Runner を組み立て、cmd を実行して (結果, stdout) を返す
fn run_in(
    env: &TempHomeEnv,
    config: &Config,
    cmd: FlashCommand,
    input: &str,
) -> (Result<i32, FlashError>, String) {
    let app = wire_flash_with(config, Arc::new(StdFileSystem), Arc::new(env.clone())).unwrap();
    let runner = Runner { app };
    let mut out = Vec::new();
    let result = runner.execute(cmd, &mut Cursor::new(input.as_bytes().to_vec()), &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn add(words: &[&str]) -> FlashCommand {
    FlashCommand::Add {
        words: words.iter().map(|w| w.to_string()).collect(),
    }
}

#[test]
fn test_add_list_remove_with_echo_provider() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let config = echo_config();

    let (result, out) = run_in(&env, &config, add(&["猫", "犬"]), "");
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out, "Added: 猫 (猫) = 猫\nAdded: 犬 (犬) = 犬\n");
    assert!(dir.path().join("data").join("vocabulary.json").exists());

    let (result, out) = run_in(&env, &config, FlashCommand::List, "");
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out, "1. 猫 (猫) : 猫\n2. 犬 (犬) : 犬\n");

    let (result, out) = run_in(&env, &config, FlashCommand::Remove { number: 1 }, "");
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out, "Removed: 猫 (猫) : 猫\n");

    let (_, out) = run_in(&env, &config, FlashCommand::List, "");
    assert_eq!(out, "1. 犬 (犬) : 犬\n");
}

#[test]
fn test_add_continues_after_bad_word() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let (result, out) = run_in(&env, &echo_config(), add(&["猫", "  ", "犬"]), "");
    assert_eq!(result.unwrap(), 64);
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_list_empty() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let (result, out) = run_in(&env, &echo_config(), FlashCommand::List, "");
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out, "Your collection is empty.\n");
}

#[test]
fn test_remove_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    run_in(&env, &echo_config(), add(&["猫"]), "");
    let (result, _) = run_in(&env, &echo_config(), FlashCommand::Remove { number: 2 }, "");
    let err = result.unwrap_err();
    assert!(matches!(err, FlashError::Index { index: 1, len: 1 }));
    assert_eq!(err.to_string(), "no entry number 2 (collection has 1 entries)");
}

#[test]
fn test_clear_asks_for_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let config = echo_config();
    run_in(&env, &config, add(&["猫"]), "");

    let (result, out) = run_in(&env, &config, FlashCommand::Clear { yes: false }, "n\n");
    assert_eq!(result.unwrap(), 0);
    assert!(out.contains("Remove all 1 entries"));
    assert!(out.ends_with("Nothing removed.\n"));
    let (_, out) = run_in(&env, &config, FlashCommand::List, "");
    assert_eq!(out, "1. 猫 (猫) : 猫\n");

    let (result, _) = run_in(&env, &config, FlashCommand::Clear { yes: false }, "y\n");
    assert_eq!(result.unwrap(), 0);
    let (_, out) = run_in(&env, &config, FlashCommand::List, "");
    assert_eq!(out, "Your collection is empty.\n");
}

#[test]
fn test_clear_yes_skips_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let (result, out) = run_in(&env, &echo_config(), FlashCommand::Clear { yes: true }, "");
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out, "Collection cleared.\n");
}

#[test]
fn test_corrupt_file_halts_every_command() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{").unwrap();
    let config = Config {
        file: Some(path.clone()),
        ..echo_config()
    };
    for cmd in [add(&["猫"]), FlashCommand::List, FlashCommand::Review] {
        let (result, _) = run_in(&env, &config, cmd, "q\n");
        assert_eq!(result.unwrap_err().exit_code(), 65);
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{");
}

#[test]
fn test_review_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let (result, out) = run_in(&env, &echo_config(), FlashCommand::Review, "");
    assert_eq!(result.unwrap(), 0);
    assert!(out.starts_with("Your collection is empty."));
}

#[test]
fn test_missing_api_key_is_reported_before_sending() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let (result, _) = run_in(&env, &Config::default(), add(&["猫"]), "");
    // 1 語失敗した add は最後の失敗の終了コードを返す
    assert_eq!(result.unwrap(), 78);
    assert!(!dir.path().join("data").join("vocabulary.json").exists());
}

#[test]
fn test_log_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    run_in(&env, &echo_config(), FlashCommand::List, "");
    let log = std::fs::read_to_string(dir.path().join("state/logs/flash.jsonl")).unwrap();
    assert!(log.contains("\"command started\""));
    assert!(log.contains("\"kind\":\"vocabulary\""));
    for line in log.lines() {
        let _: serde_json::Value = serde_json::from_str(line).unwrap();
    }
}

#[test]
fn test_unknown_profile_fails_add_only() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let config = Config {
        profile: Some(ProviderName::new("nope")),
        ..Default::default()
    };

    let (result, out) = run_in(&env, &config, FlashCommand::List, "");
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out, "Your collection is empty.\n");

    let (result, out) = run_in(&env, &config, add(&["猫"]), "");
    let err = result.unwrap_err();
    assert!(err.is_usage());
    assert_eq!(err.exit_code(), 64);
    assert!(err.to_string().contains("Unknown provider: 'nope'"));
    assert!(out.is_empty());
    assert!(!dir.path().join("data/vocabulary.json").exists());
}

#[test]
fn test_broken_profiles_json_blocks_add_but_not_other_commands() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let config = echo_config();
    let (result, _) = run_in(&env, &config, add(&["猫"]), "");
    assert_eq!(result.unwrap(), 0);

    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(dir.path().join("config/profiles.json"), "{ \"providers\": [").unwrap();

    let (result, out) = run_in(&env, &config, FlashCommand::List, "");
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out, "1. 猫 (猫) : 猫\n");

    let (result, _) = run_in(&env, &config, FlashCommand::Review, "q\n");
    assert_eq!(result.unwrap(), 0);

    let (result, out) = run_in(&env, &config, FlashCommand::Remove { number: 1 }, "");
    assert_eq!(result.unwrap(), 0);
    assert!(out.starts_with("Removed: 猫"));

    let (result, _) = run_in(&env, &config, add(&["犬"]), "");
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 65);
    assert!(err.to_string().contains("profiles.json"));
}

#[test]
fn test_profiles_json_selects_provider() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(
        dir.path().join("config/profiles.json"),
        r#"{"default_provider":"offline","providers":{"offline":{"type":"echo"}}}"#,
    )
    .unwrap();
    let env = TempHomeEnv::new(dir.path());
    let (result, out) = run_in(&env, &Config::default(), add(&["猫"]), "");
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out, "Added: 猫 (猫) = 猫\n");
}

#[test]
fn test_vocabulary_path_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let env = TempHomeEnv::new(dir.path());
    let dirs = env.resolve_dirs().unwrap();
    assert_eq!(
        resolve_vocabulary_path(&Config::default(), &env, &dirs),
        dir.path().join("data/vocabulary.json")
    );

    let env = env.with_var("FLASH_VOCAB_FILE", "/tmp/env.json");
    assert_eq!(
        resolve_vocabulary_path(&Config::default(), &env, &dirs),
        PathBuf::from("/tmp/env.json")
    );

    let config = Config {
        file: Some(PathBuf::from("/tmp/flag.json")),
        ..Default::default()
    };
    assert_eq!(
        resolve_vocabulary_path(&config, &env, &dirs),
        PathBuf::from("/tmp/flag.json")
    );
}
