pub mod entities;
pub mod repository;

pub use entities::{EnrichmentRecord, MaterialData};
pub use repository::EnrichmentSource;
