//! Markdown import.
//!
//! Builds a [`Document`](crate::model::Document) from markdown source with
//! `pulldown-cmark`. Transforms never depend on this module; it is the
//! parsing step in front of them.

mod markdown;

pub use markdown::parse_markdown;
