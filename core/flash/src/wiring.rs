//! 配線: 標準アダプタで VocabularyStore を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{FileJsonLog, FileSystem, StdEnvResolver, StdFileSystem, StderrLog};
use common::domain::Dirs;
use common::ports::outbound::{EnvResolver, Log, LogLevel, LogRecord};

use crate::adapter::{JsonVocabularyFile, ProfileEnricher};
use crate::cli::Config;
use crate::domain::FlashError;
use crate::ports::outbound::Enricher;
use crate::usecase::VocabularyStore;

/// 組み立て済みのアプリケーション
pub struct App {
    pub vocabulary: Arc<VocabularyStore>,
    /// プロバイダは add で初めて解決する
    pub enricher: Arc<ProfileEnricher>,
    pub logger: Arc<dyn Log>,
}

/// 単語帳ファイルのパス: -f、FLASH_VOCAB_FILE、<data_dir>/vocabulary.json の順
pub fn resolve_vocabulary_path(
    config: &Config,
    env: &dyn EnvResolver,
    dirs: &Dirs,
) -> PathBuf {
    config
        .file
        .clone()
        .or_else(|| env.vocabulary_file_from_env())
        .unwrap_or_else(|| dirs.vocabulary_file())
}

/// 配線: 標準の環境変数解決で App を組み立てる
pub fn wire_flash(config: &Config) -> Result<App, FlashError> {
    wire_flash_with(config, Arc::new(StdFileSystem), Arc::new(StdEnvResolver))
}

/// 配線本体（テストでは一時ディレクトリを指す EnvResolver を渡す）
pub fn wire_flash_with(
    config: &Config,
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn EnvResolver>,
) -> Result<App, FlashError> {
    let dirs = env.resolve_dirs()?;
    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), dirs.log_file()));
    let logger: Arc<dyn Log> = if config.verbose {
        Arc::new(StderrLog::new(file_log))
    } else {
        file_log
    };

    let vocab_path = resolve_vocabulary_path(config, env.as_ref(), &dirs);

    let _ = logger.log(
        &LogRecord::now(LogLevel::Debug, "wired")
            .layer("wiring")
            .kind("lifecycle")
            .field("vocabulary_file", serde_json::json!(vocab_path.display().to_string())),
    );

    let repository = Arc::new(JsonVocabularyFile::new(Arc::clone(&fs), vocab_path));
    let enricher = Arc::new(ProfileEnricher::new(
        fs,
        env,
        config.profile.clone(),
        config.model.clone(),
        Arc::clone(&logger),
    ));
    let vocabulary = Arc::new(VocabularyStore::new(
        repository,
        Arc::clone(&enricher) as Arc<dyn Enricher>,
        Arc::clone(&logger),
    ));
    Ok(App {
        vocabulary,
        enricher,
        logger,
    })
}
