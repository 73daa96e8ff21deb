pub mod domain;
pub mod infrastructure;

pub use domain::{OutboundRecord, Publisher};
pub use infrastructure::HttpPublisher;
