//! Command-line host for PageLens.
//!
//! The host plays the extension's background role: it loads a page, drives
//! the content script through [`background::ContentBridge`], persists
//! [`settings`], and calls the generation API ([`generate`]).

pub mod background;
pub mod cli;
pub mod commands;
pub mod error;
pub mod generate;
pub mod logging;
pub mod output;
pub mod settings;
pub mod source;
