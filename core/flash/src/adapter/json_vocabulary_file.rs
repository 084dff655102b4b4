//! 単語帳を 1 つの JSON ファイルで保存・読み込みするアダプタ
//!
//! 書き込みは隣の一時ファイルに書いてから rename で置き換える。
//! 非 ASCII 文字はエスケープせずそのまま、4 スペースでインデントする。

use crate::domain::{Collection, FlashError};
use crate::ports::outbound::VocabularyRepository;
use common::error::Error;
use common::ports::outbound::FileSystem;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const TMP_SUFFIX: &str = ".tmp";

/// JSON ファイル 1 つに単語帳全体を保存する VocabularyRepository 実装
pub struct JsonVocabularyFile {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonVocabularyFile {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(TMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

/// 保存済みの JSON を単語帳にする。失敗理由は StorageCorrupt の detail になる
///
/// 各行はオブジェクトでなければならない（serde は配列の行も構造体として受け付けるため先に検査する）。
pub fn parse_document(contents: &str) -> Result<Collection, String> {
    let value: Value = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    let Value::Array(rows) = &value else {
        return Err("top level is not an array".to_string());
    };
    if let Some(i) = rows.iter().position(|row| !row.is_object()) {
        return Err(format!("entry {} is not an object", i + 1));
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

/// 単語帳を保存用の JSON 文字列にする
pub fn to_document(collection: &Collection) -> Result<String, Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    collection
        .serialize(&mut ser)
        .map_err(|e| Error::json(format!("Failed to serialize vocabulary: {}", e)))?;
    let mut doc = String::from_utf8(buf)
        .map_err(|e| Error::json(format!("Serialized vocabulary is not UTF-8: {}", e)))?;
    doc.push('\n');
    Ok(doc)
}

impl VocabularyRepository for JsonVocabularyFile {
    fn load(&self) -> Result<Collection, FlashError> {
        let contents = match self.fs.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(Error::NotFound(_)) => return Ok(Collection::default()),
            Err(e) => return Err(e.into()),
        };
        parse_document(&contents).map_err(|detail| FlashError::StorageCorrupt {
            path: self.path.clone(),
            detail,
        })
    }

    fn save(&self, collection: &Collection) -> Result<(), FlashError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                self.fs.create_dir_all(parent)?;
            }
        }
        let doc = to_document(collection)?;
        let tmp = self.tmp_path();
        self.fs.write(&tmp, &doc)?;
        if let Err(e) = self.fs.rename(&tmp, &self.path) {
            let _ = self.fs.remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
