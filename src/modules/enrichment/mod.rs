pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::EnrichmentService;
pub use domain::{EnrichmentRecord, EnrichmentSource, MaterialData};
pub use infrastructure::KodikClient;
