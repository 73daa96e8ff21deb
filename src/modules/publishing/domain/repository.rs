use async_trait::async_trait;

use super::entities::OutboundRecord;

/// Destination store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// `true` only when the destination accepted the record
    async fn publish(&self, record: &OutboundRecord) -> bool;
}
