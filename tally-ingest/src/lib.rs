//! tally-ingest: billing-history text ingestion (decoding, line splitting,
//! record segmentation) and the readability formatter.

pub mod document;
pub mod formatter;
pub mod segmenter;
pub mod types;

pub use document::{decode_lossy, read_lines, split_lines};
pub use formatter::{FormatSummary, Formatter};
pub use segmenter::split_blocks;
pub use types::Block;
