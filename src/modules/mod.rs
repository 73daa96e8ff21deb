pub mod catalog;
pub mod checkpoint;
pub mod enrichment;
pub mod pipeline;
pub mod publishing;
