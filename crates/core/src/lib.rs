//! Page-side core of PageLens.
//!
//! Everything that runs against a loaded page lives here: the owned DOM
//! ([`dom`]), readable-text extraction ([`extract`]), sentence ranking
//! ([`rank`]), in-page highlighting and the summary popup ([`highlight`]),
//! local search ([`search`]) and the request handler tying them together
//! ([`ContentScript`]).
//!
//! ```ignore
//! use pagelens::ContentScript;
//! use pagelens_protocol::Request;
//!
//! let mut script = ContentScript::from_html(html, "https://example.com");
//! script.init();
//! let response = script.handle(Request::HighlightImportantContent);
//! ```

pub mod clock;
pub mod dom;
pub mod error;
pub mod extract;
pub mod highlight;
mod patterns;
pub mod rank;
pub mod script;
pub mod search;

pub use clock::{Clock, SystemClock};
pub use dom::{Document, NodeId, Selector};
pub use error::{Error, Result};
pub use extract::{MAX_TEXT_LENGTH, extract_page_content};
pub use highlight::{HIGHLIGHT_CLASS, apply_highlights, remove_highlights};
pub use pagelens_protocol as protocol;
pub use rank::{ScoredSentence, rank};
pub use script::{ContentScript, decode_request};
pub use search::search_content;
