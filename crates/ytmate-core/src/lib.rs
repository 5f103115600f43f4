//! ytmate Core Library
//!
//! Async API for analyzing a video URL through the yt1d.com "mates"
//! endpoints and requesting format conversions.
//!
//! # Overview
//!
//! This crate is a thin scraping layer:
//! - an HTTP client that submits the analyze and convert forms
//! - an HTML parser that turns the analyze results table into typed
//!   [`DownloadOption`]s (direct link or conversion required)
//! - a placeholder `cftoken` generator (it solves no challenge)
//!
//! # Example
//!
//! ```no_run
//! use ytmate_core::{YtMate, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let proxy = YtMate::new()?;
//!
//!     let analysis = proxy.analyze("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!     println!("{}", analysis.video_title);
//!
//!     for option in &analysis.downloads {
//!         if let Some(params) = option.conversion_params() {
//!             let result = proxy.convert(params).await?;
//!             println!("{}: {:?}", option.quality, result.download_url());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Fragility
//!
//! Everything here depends on an unversioned third-party site: its CSS
//! classes, its inline `download(...)` argument order and its JSON field
//! names. Any of them can change without notice, and an empty result is
//! indistinguishable from a markup change.

mod analyzer;
mod client;
mod converter;
mod error;
pub mod parser;
mod proxy;
pub mod token;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, UpstreamClient};

// Re-export error types
pub use error::{Result, YtMateError};

// Re-export parser functions
pub use parser::{RowAction, classify_action, parse_analysis};

// Re-export operations
pub use analyzer::analyze;
pub use converter::convert;

// Re-export main proxy API
pub use proxy::YtMate;

// Re-export data types
pub use types::{
    AnalysisResult, ConversionParams, ConversionResult, DownloadKind, DownloadOption,
    RESULT_URL_FIELDS,
};

// Re-export URL helper functions for convenience
pub use url::{build_analyze_url, build_convert_url, is_youtube_url};
