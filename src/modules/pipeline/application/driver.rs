/// Pipeline driver - one resumable collection run
///
/// Loading -> Scanning -> Filtering -> Enriching(i)/Publishing(i) -> Done,
/// with Aborted reachable from Scanning only.
///
/// Only the scan is checkpointed: the snapshot is written after every record
/// fetched and is the sole state that outlives a run. Filtering onwards is
/// recomputed from the collection on every run.
use std::collections::HashSet;
use std::sync::Arc;

use crate::modules::catalog::{CatalogRecord, CatalogService};
use crate::modules::checkpoint::{Checkpoint, CheckpointStore};
use crate::modules::enrichment::EnrichmentService;
use crate::modules::pipeline::domain::{FandubFilter, IdRange, PipelineState, RunReport, Transformer};
use crate::modules::publishing::Publisher;
use crate::shared::errors::AppResult;
use crate::shared::utils::{LogContext, TimedOperation};
use crate::{log_debug, log_error, log_info, log_warn};

/// Collaborators shared by every run
#[derive(Clone)]
pub struct PipelineComponents {
    pub catalog: Arc<CatalogService>,
    pub enrichment: Arc<EnrichmentService>,
    pub transformer: Arc<Transformer>,
    pub publisher: Arc<dyn Publisher>,
    pub checkpoint_store: Arc<dyn CheckpointStore>,
    pub filter: Arc<FandubFilter>,
}

pub struct PipelineDriver {
    components: PipelineComponents,
    state: PipelineState,
    checkpoint: Checkpoint,
    collected_ids: HashSet<String>,
    report: RunReport,
}

impl PipelineDriver {
    pub fn new(components: PipelineComponents) -> Self {
        Self {
            components,
            state: PipelineState::Idle,
            checkpoint: Checkpoint::empty(),
            collected_ids: HashSet::new(),
            report: RunReport::default(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn collected(&self) -> &[CatalogRecord] {
        &self.checkpoint.collected
    }

    /// Run the whole pipeline over `range`
    ///
    /// A fatal error while scanning persists the checkpoint and is returned;
    /// everything after the scan only fails per record.
    pub async fn run(&mut self, range: IdRange) -> AppResult<RunReport> {
        let timer = TimedOperation::new("collection run");

        self.load().await;

        self.transition(PipelineState::Scanning);
        if let Err(e) = self.scan(range).await {
            self.transition(PipelineState::Aborted);
            log_error!(
                "Scan of [{}..={}] aborted: {}",
                range.start(),
                range.end(),
                e
            );
            self.persist().await;
            return Err(e);
        }
        self.report.collected = self.checkpoint.len();

        if self.checkpoint.is_empty() {
            log_warn!(
                "No anime collected in [{}..={}]",
                range.start(),
                range.end()
            );
            self.transition(PipelineState::Done);
            timer.finish_with_info("nothing collected");
            return Ok(self.report.clone());
        }
        log_info!("Collected {} anime in total", self.checkpoint.len());

        self.transition(PipelineState::Filtering);
        let worklist = self.components.filter.apply(&self.checkpoint.collected);
        self.report.processed = worklist.len();
        log_info!(
            "{} anime credited to {}",
            worklist.len(),
            self.components.filter.token()
        );

        for (index, record) in worklist.iter().enumerate() {
            if self.process(index, record).await {
                self.report.published += 1;
            } else {
                self.report.failed += 1;
            }
        }

        self.finish().await;
        timer.finish_with_info(&format!(
            "{} processed, {} published, {} failed",
            self.report.processed, self.report.published, self.report.failed
        ));
        Ok(self.report.clone())
    }

    async fn load(&mut self) {
        self.transition(PipelineState::Loading);
        self.checkpoint = self.components.checkpoint_store.load().await;
        self.collected_ids = self.checkpoint.collected_ids();
        if !self.checkpoint.is_empty() {
            log_info!(
                "Resuming with {} anime from a previous run",
                self.checkpoint.len()
            );
        }
    }

    async fn scan(&mut self, range: IdRange) -> AppResult<()> {
        log_info!(
            "Requesting anime with IDs {} to {}",
            range.start(),
            range.end()
        );

        for id in range.iter() {
            let key = id.to_string();
            if self.collected_ids.contains(&key) {
                log_debug!("Anime {} already collected, skipping", key);
                self.report.resumed += 1;
                continue;
            }

            LogContext::scan_progress(id, range.start(), range.end(), self.checkpoint.len());
            let Some(record) = self.components.catalog.fetch_by_id(&key).await? else {
                continue;
            };

            self.collected_ids.insert(key);
            self.collected_ids.insert(record.id.clone());
            self.checkpoint.push(record);
            self.report.fetched += 1;
            self.persist().await;
        }

        Ok(())
    }

    /// Enrich, transform and publish one record; `true` when published
    async fn process(&mut self, index: usize, record: &CatalogRecord) -> bool {
        self.transition(PipelineState::Enriching(index));
        let enrichment = self
            .components
            .enrichment
            .fetch_by_catalog_id(&record.id)
            .await;
        if enrichment.is_none() {
            log_debug!("Anime {}: no enrichment, using catalog defaults", record.id);
        }

        let outbound = self
            .components
            .transformer
            .build(record, enrichment.as_ref())
            .await;

        self.transition(PipelineState::Publishing(index));
        self.components.publisher.publish(&outbound).await
    }

    async fn finish(&mut self) {
        self.transition(PipelineState::Done);
        if self.report.failed > 0 {
            // Cleared regardless: failed records are not retried and their
            // source data is dropped with the snapshot.
            log_warn!(
                "{} anime failed to publish and will not be retried",
                self.report.failed
            );
        }
        self.components.checkpoint_store.clear().await;
        log_info!("Processed {} anime", self.report.processed);
    }

    async fn persist(&mut self) {
        self.checkpoint.mark_saved();
        self.components.checkpoint_store.save(&self.checkpoint).await;
    }

    fn transition(&mut self, next: PipelineState) {
        if !self.state.can_transition_to(next) {
            log_warn!("Unexpected pipeline transition {} -> {}", self.state, next);
        }
        log_debug!("Pipeline: {} -> {}", self.state, next);
        self.state = next;
    }
}
