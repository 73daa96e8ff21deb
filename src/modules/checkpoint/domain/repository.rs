use async_trait::async_trait;

use super::entities::Checkpoint;

/// Durable snapshot of the records collected so far
///
/// None of the operations fail from the caller's point of view: problems are
/// logged by the implementation and the pipeline carries on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Previous snapshot, or an empty one when absent or unreadable
    async fn load(&self) -> Checkpoint;

    /// Overwrite the snapshot atomically
    async fn save(&self, checkpoint: &Checkpoint);

    /// Remove the snapshot; a missing snapshot is fine
    async fn clear(&self);
}
