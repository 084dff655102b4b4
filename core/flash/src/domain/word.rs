//! ユーザーが入力した単語（空でないことを保証する Newtype）

use crate::domain::FlashError;

/// 前後の空白を除いた、空でない単語
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word(String);

impl Word {
    pub fn parse(input: &str) -> Result<Self, FlashError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FlashError::EmptyWord);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
