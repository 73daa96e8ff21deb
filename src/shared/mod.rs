// Shared kernel: plumbing used by every pipeline component

pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod http_client; // Paced reqwest wrapper
pub mod utils; // Logging utilities

pub use config::AppConfig;
pub use errors::{AppError, AppResult, FetchFailureKind};
