pub mod entities;
pub mod repository;

pub use entities::{
    CatalogRecord, ExternalLink, IncompleteDate, Poster, RelatedEntry, RelatedRef, RelatedSummary,
    RelatedTarget, Screenshot, TargetKind, Video,
};
pub use repository::CatalogSource;
