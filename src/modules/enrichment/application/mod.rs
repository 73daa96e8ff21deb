pub mod service;

pub use service::EnrichmentService;
