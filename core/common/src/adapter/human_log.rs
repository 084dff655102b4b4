//! 人間向けログ（LogRecord → stderr に要点のみ出力し、内側の Log にも渡す）
//!
//! --verbose 指定時にだけ FileJsonLog を包んで使う。

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 200;

/// fields の要点だけを短い文字列にする（巨大化防止）
fn fields_summary(record: &LogRecord) -> String {
    let Some(fields) = record.fields.as_ref() else {
        return String::new();
    };
    let s = serde_json::to_string(fields).unwrap_or_default();
    if s.chars().count() <= FIELDS_SUMMARY_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELDS_SUMMARY_MAX).collect::<String>();
    format!("{}...", truncated)
}

/// 1 行に整形する（テストしやすいよう出力と分離）
pub fn format_line(record: &LogRecord) -> String {
    let mut line = format!("[{}] {}", record.level.as_str(), record.message);
    if let Some(layer) = &record.layer {
        line.push_str(&format!(" layer={}", layer));
    }
    let summary = fields_summary(record);
    if !summary.is_empty() {
        line.push(' ');
        line.push_str(&summary);
    }
    line
}

/// stderr に整形して出力したあと inner にも書く Log
pub struct StderrLog {
    inner: Arc<dyn Log>,
}

impl StderrLog {
    pub fn new(inner: Arc<dyn Log>) -> Self {
        Self { inner }
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        eprintln!("{}", format_line(record));
        self.inner.log(record)
    }
}
