//! HTML parsers for upstream responses
//!
//! Only the analyze endpoint returns HTML; convert returns plain JSON.

pub mod analysis;

pub use analysis::{RowAction, classify_action, parse_analysis};
