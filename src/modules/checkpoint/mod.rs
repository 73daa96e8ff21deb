pub mod domain;
pub mod infrastructure;

pub use domain::{Checkpoint, CheckpointStore};
pub use infrastructure::FileCheckpointStore;
