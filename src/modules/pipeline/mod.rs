pub mod application;
pub mod domain;

pub use application::{
    CollectRequest, CollectResponse, CollectionTrigger, PipelineComponents, PipelineDriver,
};
pub use domain::{FandubFilter, IdRange, PipelineState, RunReport, Transformer};
