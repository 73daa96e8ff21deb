pub mod services;
pub mod state;

pub use services::{AssetUrls, FandubFilter, MediaUrls, Transformer};
pub use state::{IdRange, PipelineState, RunReport};
