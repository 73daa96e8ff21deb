use regex::{Regex, RegexBuilder};

use crate::modules::catalog::CatalogRecord;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;

/// Keeps records whose fan-dub list names a given group as a whole word
#[derive(Debug, Clone)]
pub struct FandubFilter {
    token: String,
    pattern: Regex,
}

impl FandubFilter {
    pub fn new(token: &str) -> AppResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::ConfigError(
                "fan-dub group name must not be empty".to_string(),
            ));
        }

        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(token)))
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::ConfigError(format!("invalid fan-dub pattern: {}", e)))?;

        Ok(Self {
            token: token.to_string(),
            pattern,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn accepts(&self, record: &CatalogRecord) -> bool {
        let accepted = record
            .fandubbers
            .iter()
            .any(|group| self.pattern.is_match(group));
        LogContext::filter_decision(&record.id, accepted, &self.token);
        accepted
    }

    /// Accepted records, in collection order
    pub fn apply(&self, records: &[CatalogRecord]) -> Vec<CatalogRecord> {
        records
            .iter()
            .filter(|record| self.accepts(record))
            .cloned()
            .collect()
    }
}
