use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::driver::{PipelineComponents, PipelineDriver};
use crate::modules::pipeline::domain::IdRange;
use crate::{log_error, log_info, log_warn};

/// Parameters of one collection trigger; missing bounds use the configured defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectRequest {
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub end: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectResponse {
    pub success: bool,
    pub message: String,
    pub processed: usize,
}

impl CollectResponse {
    fn success(processed: usize) -> Self {
        Self {
            success: true,
            message: format!("Processed {} anime", processed),
            processed,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            processed: 0,
        }
    }
}

/// Entry point for the outside world
///
/// Runs share one checkpoint, so overlapping triggers are refused rather
/// than queued.
pub struct CollectionTrigger {
    components: PipelineComponents,
    default_start: i64,
    default_end: i64,
    running: Mutex<()>,
}

impl CollectionTrigger {
    pub fn new(components: PipelineComponents, default_start: i64, default_end: i64) -> Self {
        Self {
            components,
            default_start,
            default_end,
            running: Mutex::new(()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.try_lock().is_err()
    }

    pub async fn collect(&self, request: CollectRequest) -> CollectResponse {
        let Ok(_guard) = self.running.try_lock() else {
            log_warn!("Collection trigger refused: a run is already in progress");
            return CollectResponse::failure("A collection run is already in progress");
        };

        let start = request.start.unwrap_or(self.default_start);
        let end = request.end.unwrap_or(self.default_end);
        let range = match IdRange::new(start, end) {
            Ok(range) => range,
            Err(e) => return CollectResponse::failure(e.to_string()),
        };

        log_info!("Collecting anime with IDs from {} to {}", start, end);
        let mut driver = PipelineDriver::new(self.components.clone());
        match driver.run(range).await {
            Ok(report) if report.collected == 0 => {
                CollectResponse::failure("Failed to collect any anime data")
            }
            Ok(report) => CollectResponse::success(report.processed),
            Err(e) => {
                log_error!("Collection failed: {}", e);
                CollectResponse::failure(e.to_string())
            }
        }
    }
}
