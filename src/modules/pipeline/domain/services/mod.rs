pub mod filter;
pub mod transform;
pub mod translations;
pub mod urls;

pub use filter::FandubFilter;
pub use transform::Transformer;
pub use translations::{translate_kind, translate_status};
pub use urls::{AssetUrls, MediaUrls};
