pub mod driver;
pub mod trigger;

pub use driver::{PipelineComponents, PipelineDriver};
pub use trigger::{CollectRequest, CollectResponse, CollectionTrigger};
