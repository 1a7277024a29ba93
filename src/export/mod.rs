//! Document exporters.
//!
//! Rendering is where renderer properties attached by transforms turn into
//! element attributes. Nothing here mutates the document.

mod html;

pub use html::{escape_html, is_valid_attribute_name, synthesize_html, write_html};
