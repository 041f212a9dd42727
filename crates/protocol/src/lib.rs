//! Wire types for PageLens message passing.
//!
//! This crate contains the serde-serializable types exchanged between the
//! host (popup/background side) and the content script that owns the page
//! document. These types represent the "protocol layer" - the shapes of data
//! as they appear on the message bus.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * camelCase on the wire: Match the JSON payloads a browser host exchanges
//! * Copied, never shared: Every payload crosses a context boundary by value
//!
//! Document access and the heuristics themselves live in `pagelens-core`.

pub mod content;
pub mod message;

pub use content::*;
pub use message::*;
