pub mod entities;
pub mod repository;

pub use entities::{AssociatedEntry, ExternalLinkEntry, NameEntry, OutboundRecord, UrlEntry};
pub use repository::Publisher;
