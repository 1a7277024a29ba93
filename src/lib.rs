//! # cell_titles
//!
//! Annotates markdown tables for responsive layouts: every body cell gets
//! its column's header text as an attribute (`data-title` by default), so a
//! stylesheet can show the header next to each value once the table is
//! collapsed to one column.
//!
//! ## Quick Start
//!
//! ```
//! use cell_titles::{Options, Pipeline, TableCellTitles};
//!
//! let pipeline = Pipeline::new().with(TableCellTitles::new(Options::default()));
//!
//! let html = pipeline.process("\
//! | Header 1 | Header 2 |
//! | -------- | -------- |
//! | Cell 1   | Cell 2   |
//! ");
//!
//! assert!(html.contains(r#"<td data-title="Header 1">Cell 1</td>"#));
//! assert!(html.contains(r#"<td data-title="Header 2">Cell 2</td>"#));
//! ```
//!
//! ## Working with Documents
//!
//! The transform operates on a parsed [`Document`](model::Document) and
//! only writes renderer properties on body cells; parsing and rendering are
//! separate steps:
//!
//! ```
//! use cell_titles::import::parse_markdown;
//! use cell_titles::export::synthesize_html;
//! use cell_titles::transform::{Options, annotate_tables};
//! use cell_titles::text::slug;
//!
//! let mut doc = parse_markdown("| Unit Price |\n| --- |\n| 3 |\n");
//! annotate_tables(&mut doc, &Options::new().with_header_transform(slug));
//!
//! assert!(synthesize_html(&doc).contains(r#"<td data-title="unit-price">3</td>"#));
//! ```

#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod model;
pub mod text;
pub mod transform;

#[cfg(feature = "serde")]
pub use config::{Config, HeaderStyle};
pub use error::{Error, Result};
pub use transform::{Options, Pipeline, TableCellTitles, Transform, annotate_tables};
