//! Structured data extraction for template-language reference pages
//!
//! Turns parsed reference documents into plain records:
//! - Navigation sidebar -> page links (deduplicated, names realigned)
//! - Category/tag tables -> tag records grouped by category
//! - Sample code / output headings -> example pairs
//!
//! Fetching and persisting documents is left to the caller; see
//! [`catalog::DocumentSource`] for the seam.

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod ffi;

pub use config::ExtractorConfig;
pub use document::Document;
pub use error::{ExtractError, Result};
pub use extractors::*;
pub use ffi::*;
