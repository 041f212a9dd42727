//! Readable content extraction from a live document.
//!
//! The pipeline keeps clutter removal, main-content selection, text
//! normalization and metadata collection as separate stages for easier
//! testing.

mod cleaner;
mod metadata;
mod normalize;
mod pipeline;

pub(crate) use normalize::truncate_chars;
pub use pipeline::{MAX_TEXT_LENGTH, extract_page_content};
