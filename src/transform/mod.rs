//! Document transforms.
//!
//! A [`Transform`] mutates a parsed [`Document`] in place between import and
//! export. Transforms are registered once on a [`Pipeline`] and run in
//! registration order for every document it processes:
//!
//! ```
//! use cell_titles::transform::{Options, Pipeline, TableCellTitles};
//!
//! let pipeline = Pipeline::new()
//!     .with(TableCellTitles::new(Options::new().with_attribute_name("data-label")));
//!
//! let html = pipeline.process("| Name |\n| --- |\n| Tea |\n");
//! assert!(html.contains(r#"<td data-label="Name">Tea</td>"#));
//! ```

mod table_titles;
mod visit;

pub use table_titles::{
    DEFAULT_ATTRIBUTE_NAME, HeaderTransform, Options, TableCellTitles, annotate_tables,
    try_annotate_tables,
};
pub use visit::{try_visit_matching, visit_matching};

use crate::export::synthesize_html;
use crate::import::parse_markdown;
use crate::model::Document;

/// A single in-place pass over a document.
pub trait Transform: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Apply the transform to `doc`.
    fn apply(&self, doc: &mut Document);
}

/// Ordered list of transforms.
#[derive(Default)]
pub struct Pipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform to run after those already registered.
    pub fn with(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Number of registered transforms.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Run every transform on `doc`, in order.
    pub fn run(&self, doc: &mut Document) {
        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "running transform");
            transform.apply(doc);
        }
    }

    /// Parse markdown, run the transforms and render HTML.
    pub fn process(&self, markdown: &str) -> String {
        let mut doc = parse_markdown(markdown);
        self.run(&mut doc);
        synthesize_html(&doc)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.transforms.iter().map(|t| t.name()))
            .finish()
    }
}
