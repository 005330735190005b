// src/extractors/mod.rs
pub mod blocks;
pub mod numbers;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use blocks::{Block, Segmenter, SegmenterConfig};
#[allow(unused_imports)]
pub use numbers::{aggregate, extract, DrawRecord};
