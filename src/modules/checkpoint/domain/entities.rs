use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::catalog::CatalogRecord;

/// Records collected by the range scan, in fetch order
///
/// Serialized as `{ "all_animes": [...], "timestamp": "<RFC 3339>" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checkpoint {
    #[serde(rename = "all_animes", default)]
    pub collected: Vec<CatalogRecord>,
    #[serde(rename = "timestamp", default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self::empty()
    }
}

impl Checkpoint {
    pub fn empty() -> Self {
        Self {
            collected: Vec::new(),
            saved_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.collected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    pub fn collected_ids(&self) -> HashSet<String> {
        self.collected.iter().map(|r| r.id.clone()).collect()
    }

    pub fn push(&mut self, record: CatalogRecord) {
        self.collected.push(record);
    }

    /// Stamp the snapshot right before it is written
    pub fn mark_saved(&mut self) {
        self.saved_at = Utc::now();
    }
}
