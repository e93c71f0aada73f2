//! tally-core: amount extraction, numeric precision, date markers and keyword sets
//! shared by the ingest and finance crates.

pub mod amounts;
pub mod date_marker;
pub mod keywords;
pub mod precision;

pub use amounts::{AmountExtractor, has_credit_token, has_glyph, has_signed_token, parse_amount};
pub use date_marker::DateMarker;
pub use precision::{Precision, round_cents};
pub use rust_decimal::Decimal;
