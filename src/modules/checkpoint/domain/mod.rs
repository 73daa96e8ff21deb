pub mod entities;
pub mod repository;

pub use entities::Checkpoint;
pub use repository::CheckpointStore;
