/// In-memory stand-ins for the pipeline's outbound ports
///
/// Each fake records how it was called so tests can assert on traffic.
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use anicollect_lib::modules::catalog::{CatalogRecord, CatalogSource};
use anicollect_lib::modules::checkpoint::{Checkpoint, CheckpointStore};
use anicollect_lib::modules::enrichment::{EnrichmentRecord, EnrichmentSource};
use anicollect_lib::modules::publishing::{OutboundRecord, Publisher};
use anicollect_lib::shared::{AppError, AppResult};

#[derive(Default)]
pub struct FakeCatalog {
    records: HashMap<String, CatalogRecord>,
    fatal_ids: HashSet<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_records(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
            ..Default::default()
        }
    }

    /// Requests for `id` fail with a non-absorbable error
    pub fn failing_on(mut self, id: u32) -> Self {
        self.fatal_ids.insert(id.to_string());
        self
    }

    /// Every lookup sleeps for `delay` first
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, id: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == id).count()
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_anime(&self, id: &str) -> AppResult<Option<CatalogRecord>> {
        self.calls.lock().unwrap().push(id.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fatal_ids.contains(id) {
            return Err(AppError::ConfigError("catalog endpoint misconfigured".to_string()));
        }
        Ok(self.records.get(id).cloned())
    }
}

#[derive(Default)]
pub struct FakeEnrichment {
    records: HashMap<String, EnrichmentRecord>,
}

impl FakeEnrichment {
    pub fn with(mut self, catalog_id: &str, record: EnrichmentRecord) -> Self {
        self.records.insert(catalog_id.to_string(), record);
        self
    }
}

#[async_trait]
impl EnrichmentSource for FakeEnrichment {
    async fn fetch_by_catalog_id(&self, catalog_id: &str) -> AppResult<Option<EnrichmentRecord>> {
        Ok(self.records.get(catalog_id).cloned())
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    rejected_ids: HashSet<String>,
    published: Mutex<Vec<OutboundRecord>>,
}

impl RecordingPublisher {
    pub fn rejecting(ids: &[&str]) -> Self {
        Self {
            rejected_ids: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn published(&self) -> Vec<OutboundRecord> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, record: &OutboundRecord) -> bool {
        if self.rejected_ids.contains(&record.id) {
            return false;
        }
        self.published.lock().unwrap().push(record.clone());
        true
    }
}

#[derive(Default)]
pub struct MemoryCheckpointStore {
    snapshot: Mutex<Option<Checkpoint>>,
    saves: Mutex<usize>,
    clears: Mutex<usize>,
}

impl MemoryCheckpointStore {
    pub fn seeded(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let mut checkpoint = Checkpoint::empty();
        for record in records {
            checkpoint.push(record);
        }
        Self {
            snapshot: Mutex::new(Some(checkpoint)),
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> Option<Checkpoint> {
        self.snapshot.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn clear_count(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn load(&self) -> Checkpoint {
        self.snapshot().unwrap_or_else(Checkpoint::empty)
    }

    async fn save(&self, checkpoint: &Checkpoint) {
        *self.snapshot.lock().unwrap() = Some(checkpoint.clone());
        *self.saves.lock().unwrap() += 1;
    }

    async fn clear(&self) {
        *self.snapshot.lock().unwrap() = None;
        *self.clears.lock().unwrap() += 1;
    }
}
