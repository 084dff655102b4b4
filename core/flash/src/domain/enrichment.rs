//! 補完結果（読み・訳）

use crate::domain::EnrichmentError;

/// 補完に成功したときの読みと訳。どちらも空でない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    reading: String,
    translation: String,
}

impl Enrichment {
    pub fn new(
        reading: impl Into<String>,
        translation: impl Into<String>,
    ) -> Result<Self, EnrichmentError> {
        let reading = reading.into().trim().to_string();
        let translation = translation.into().trim().to_string();
        if reading.is_empty() || translation.is_empty() {
            return Err(EnrichmentError::MalformedResponse(
                "reading and translation must not be empty".to_string(),
            ));
        }
        Ok(Self {
            reading,
            translation,
        })
    }

    pub fn reading(&self) -> &str {
        &self.reading
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }
}
