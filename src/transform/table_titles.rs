//! Column header titles on table cells.
//!
//! Copies each column's header text onto every body cell of that column as a
//! renderer property, so the HTML output carries it as an attribute:
//!
//! ```text
//! | Name | Price |          <td data-title="Name">Tea</td>
//! | ---- | ----- |    →     <td data-title="Price">3</td>
//! | Tea  | 3     |
//! ```
//!
//! The first row of a table is always the header row. Malformed tables
//! (no rows, ragged rows, stray non-row children) are handled without
//! errors: they are skipped or annotated with an empty title.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::model::{Document, NodeId, Role};
use crate::text;

use super::Transform;
use super::visit::try_visit_matching;

/// Attribute written when none is configured.
pub const DEFAULT_ATTRIBUTE_NAME: &str = "data-title";

/// Derives the title string from a header cell (with its nested content).
pub type HeaderTransform = Arc<dyn Fn(&Document, NodeId) -> String + Send + Sync>;

/// Configuration of [`TableCellTitles`].
#[derive(Clone)]
pub struct Options {
    /// Renderer property key written to every annotated cell.
    pub attribute_name: String,
    /// Leave cells unannotated when their column header is empty.
    pub skip_empty_headers: bool,
    /// Header cell → title. Defaults to [`text::to_string`].
    pub header_transform: HeaderTransform,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_string(),
            skip_empty_headers: false,
            header_transform: Arc::new(text::to_string),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("attribute_name", &self.attribute_name)
            .field("skip_empty_headers", &self.skip_empty_headers)
            .finish_non_exhaustive()
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the attribute name.
    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = name.into();
        self
    }

    /// Builder method to enable or disable empty-header skipping.
    pub fn with_skip_empty_headers(mut self, skip: bool) -> Self {
        self.skip_empty_headers = skip;
        self
    }

    /// Builder method to replace the header text derivation.
    pub fn with_header_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Document, NodeId) -> String + Send + Sync + 'static,
    {
        self.header_transform = Arc::new(transform);
        self
    }
}

/// Transform adding column header titles to table cells.
#[derive(Debug, Clone, Default)]
pub struct TableCellTitles {
    options: Options,
}

impl TableCellTitles {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl Transform for TableCellTitles {
    fn name(&self) -> &str {
        "table-cell-titles"
    }

    fn apply(&self, doc: &mut Document) {
        annotate_tables(doc, &self.options);
    }
}

/// Annotate the body cells of every table in `doc`.
pub fn annotate_tables(doc: &mut Document, options: &Options) {
    let transform = &options.header_transform;
    let result = try_annotate_tables(
        doc,
        &options.attribute_name,
        options.skip_empty_headers,
        |doc, cell| Ok::<_, Infallible>(transform(doc, cell)),
    );
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Annotate every table with a fallible header transform.
///
/// The first error returned by `header_transform` is passed through
/// unchanged. Tables processed before it stay annotated; the failing table
/// is left untouched since its headers are derived before any cell is
/// written.
pub fn try_annotate_tables<F, E>(
    doc: &mut Document,
    attribute_name: &str,
    skip_empty_headers: bool,
    mut header_transform: F,
) -> Result<(), E>
where
    F: FnMut(&Document, NodeId) -> Result<String, E>,
{
    try_visit_matching(
        doc,
        |doc, id| doc.role(id) == Some(Role::Table),
        |doc, table| {
            annotate_single_table(
                doc,
                table,
                attribute_name,
                skip_empty_headers,
                &mut header_transform,
            )
        },
    )
}

fn annotate_single_table<F, E>(
    doc: &mut Document,
    table_id: NodeId,
    attribute_name: &str,
    skip_empty_headers: bool,
    header_transform: &mut F,
) -> Result<(), E>
where
    F: FnMut(&Document, NodeId) -> Result<String, E>,
{
    let mut rows = doc.children(table_id);
    let Some(header_row) = rows.next() else {
        tracing::trace!(table = table_id.0, "skipping table without rows");
        return Ok(());
    };
    if doc.role(header_row) != Some(Role::TableRow) {
        tracing::trace!(table = table_id.0, "skipping table without header row");
        return Ok(());
    }
    let body_rows: Vec<NodeId> = rows
        .filter(|&row| doc.role(row) == Some(Role::TableRow))
        .collect();

    let header_cells: Vec<NodeId> = doc.children(header_row).collect();
    let mut headers = Vec::with_capacity(header_cells.len());
    for cell in header_cells {
        headers.push(header_transform(&*doc, cell)?);
    }

    let mut annotated = 0usize;
    for row in body_rows {
        let cells: Vec<NodeId> = doc.children(row).collect();
        for (column, cell) in cells.into_iter().enumerate() {
            let header = headers.get(column).map(String::as_str).unwrap_or("");
            if skip_empty_headers && header.is_empty() {
                continue;
            }
            doc.data_mut(cell)
                .renderer_properties
                .set(attribute_name, header);
            annotated += 1;
        }
    }

    tracing::debug!(
        table = table_id.0,
        columns = headers.len(),
        annotated,
        "annotated table cells"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    /// Build a table under the root from rows of plain-text cells.
    fn build_table(doc: &mut Document, rows: &[&[&str]]) -> NodeId {
        let table = doc.append_new(NodeId::ROOT, Node::new(Role::Table));
        for row in rows {
            let row_id = doc.append_new(table, Node::new(Role::TableRow));
            for cell in *row {
                let cell_id = doc.append_new(row_id, Node::new(Role::TableCell));
                if !cell.is_empty() {
                    let range = doc.append_text(cell);
                    doc.append_new(cell_id, Node::text(range));
                }
            }
        }
        table
    }

    fn rows_of(doc: &Document, table: NodeId) -> Vec<Vec<NodeId>> {
        doc.children(table)
            .map(|row| doc.children(row).collect())
            .collect()
    }

    #[test]
    fn test_default_options() {
        let mut doc = Document::new();
        let table = build_table(
            &mut doc,
            &[&["Header 1", "Header 2"], &["Cell 1", "Cell 2"], &["Cell 3", "Cell 4"]],
        );

        annotate_tables(&mut doc, &Options::default());

        let rows = rows_of(&doc, table);
        for row in &rows[1..] {
            assert_eq!(doc.renderer_property(row[0], "data-title"), Some("Header 1"));
            assert_eq!(doc.renderer_property(row[1], "data-title"), Some("Header 2"));
        }
        // Header cells themselves are never annotated
        assert!(rows[0].iter().all(|&cell| doc.data(cell).is_none()));
    }

    #[test]
    fn test_custom_attribute_name() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["Header 1", "Header 2"], &["Cell 1", "Cell 2"]]);

        annotate_tables(&mut doc, &Options::new().with_attribute_name("data-header"));

        let rows = rows_of(&doc, table);
        assert_eq!(doc.renderer_property(rows[1][0], "data-header"), Some("Header 1"));
        assert_eq!(doc.renderer_property(rows[1][1], "data-header"), Some("Header 2"));
        assert_eq!(doc.renderer_property(rows[1][0], "data-title"), None);
    }

    #[test]
    fn test_skip_empty_headers() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["Header 1", ""], &["Cell 1", "Cell 2"]]);

        annotate_tables(&mut doc, &Options::new().with_skip_empty_headers(true));

        let rows = rows_of(&doc, table);
        assert_eq!(doc.renderer_property(rows[1][0], "data-title"), Some("Header 1"));
        assert!(doc.data(rows[1][1]).is_none());
    }

    #[test]
    fn test_empty_headers_written_when_not_skipping() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["", ""], &["Cell 1", "Cell 2"]]);

        annotate_tables(&mut doc, &Options::default());

        let rows = rows_of(&doc, table);
        assert_eq!(doc.renderer_property(rows[1][0], "data-title"), Some(""));
        assert_eq!(doc.renderer_property(rows[1][1], "data-title"), Some(""));
    }

    #[test]
    fn test_custom_header_transform() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["Header 1", "Header 2"], &["Cell 1", "Cell 2"]]);

        let options = Options::new().with_header_transform(|doc, cell| {
            text::to_string(doc, cell).to_lowercase().replace(' ', "-")
        });
        annotate_tables(&mut doc, &options);

        let rows = rows_of(&doc, table);
        assert_eq!(doc.renderer_property(rows[1][0], "data-title"), Some("header-1"));
        assert_eq!(doc.renderer_property(rows[1][1], "data-title"), Some("header-2"));
    }

    #[test]
    fn test_header_only_table_is_untouched() {
        let mut doc = Document::new();
        build_table(&mut doc, &[&["Header 1", "Header 2"]]);

        annotate_tables(&mut doc, &Options::default());

        assert_eq!(doc.data_count(), 0);
    }

    #[test]
    fn test_empty_table_is_untouched() {
        let mut doc = Document::new();
        doc.append_new(NodeId::ROOT, Node::new(Role::Table));

        annotate_tables(&mut doc, &Options::default());

        assert_eq!(doc.data_count(), 0);
    }

    #[test]
    fn test_first_child_not_a_row_skips_table() {
        let mut doc = Document::new();
        let table = doc.append_new(NodeId::ROOT, Node::new(Role::Table));
        doc.append_new(table, Node::new(Role::Paragraph));
        let row = doc.append_new(table, Node::new(Role::TableRow));
        doc.append_new(row, Node::new(Role::TableCell));

        annotate_tables(&mut doc, &Options::default());

        assert_eq!(doc.data_count(), 0);
    }

    #[test]
    fn test_non_row_body_children_are_skipped() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["A"], &["1"]]);
        let stray = doc.append_new(table, Node::new(Role::Paragraph));
        let stray_child = doc.append_new(stray, Node::new(Role::TableCell));

        annotate_tables(&mut doc, &Options::default());

        assert_eq!(doc.data_count(), 1);
        assert!(doc.data(stray).is_none());
        assert!(doc.data(stray_child).is_none());
    }

    #[test]
    fn test_ragged_rows_use_empty_title() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["A"], &["1", "2", "3"], &[]]);

        annotate_tables(&mut doc, &Options::default());

        let rows = rows_of(&doc, table);
        assert_eq!(doc.renderer_property(rows[1][0], "data-title"), Some("A"));
        assert_eq!(doc.renderer_property(rows[1][1], "data-title"), Some(""));
        assert_eq!(doc.renderer_property(rows[1][2], "data-title"), Some(""));
    }

    #[test]
    fn test_ragged_rows_skipped_when_skipping_empty() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["A"], &["1", "2"]]);

        annotate_tables(&mut doc, &Options::new().with_skip_empty_headers(true));

        let rows = rows_of(&doc, table);
        assert!(doc.data(rows[1][0]).is_some());
        assert!(doc.data(rows[1][1]).is_none());
    }

    #[test]
    fn test_existing_properties_are_preserved() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["A"], &["1"]]);
        let cell = rows_of(&doc, table)[1][0];
        doc.data_mut(cell).renderer_properties.set("class", "num");

        annotate_tables(&mut doc, &Options::default());

        assert_eq!(doc.renderer_property(cell, "class"), Some("num"));
        assert_eq!(doc.renderer_property(cell, "data-title"), Some("A"));
    }

    #[test]
    fn test_skip_does_not_remove_existing_key() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&[""], &["1"]]);
        let cell = rows_of(&doc, table)[1][0];
        doc.data_mut(cell).renderer_properties.set("data-title", "kept");

        annotate_tables(&mut doc, &Options::new().with_skip_empty_headers(true));

        assert_eq!(doc.renderer_property(cell, "data-title"), Some("kept"));
    }

    #[test]
    fn test_running_twice_overwrites() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["A", "B"], &["1", "2"]]);

        let options = Options::default();
        annotate_tables(&mut doc, &options);
        annotate_tables(&mut doc, &options);

        let rows = rows_of(&doc, table);
        let props = &doc.data(rows[1][1]).unwrap().renderer_properties;
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("data-title"), Some("B"));
    }

    #[test]
    fn test_tables_are_independent() {
        let mut doc = Document::new();
        let first = build_table(&mut doc, &[&["A"], &["1"]]);
        let second = build_table(&mut doc, &[&["B"], &["2"]]);

        annotate_tables(&mut doc, &Options::default());

        assert_eq!(doc.renderer_property(rows_of(&doc, first)[1][0], "data-title"), Some("A"));
        assert_eq!(doc.renderer_property(rows_of(&doc, second)[1][0], "data-title"), Some("B"));
    }

    #[test]
    fn test_nested_table_is_processed_independently() {
        let mut doc = Document::new();
        let outer = build_table(&mut doc, &[&["Outer"], &["x"]]);
        let outer_cell = rows_of(&doc, outer)[1][0];

        let inner = doc.append_new(outer_cell, Node::new(Role::Table));
        for text in ["Inner", "y"] {
            let row = doc.append_new(inner, Node::new(Role::TableRow));
            let cell = doc.append_new(row, Node::new(Role::TableCell));
            let range = doc.append_text(text);
            doc.append_new(cell, Node::text(range));
        }

        annotate_tables(&mut doc, &Options::default());

        assert_eq!(doc.renderer_property(outer_cell, "data-title"), Some("Outer"));
        let inner_cell = rows_of(&doc, inner)[1][0];
        assert_eq!(doc.renderer_property(inner_cell, "data-title"), Some("Inner"));
    }

    #[test]
    fn test_try_annotate_propagates_error() {
        let mut doc = Document::new();
        let first = build_table(&mut doc, &[&["A"], &["1"]]);
        let second = build_table(&mut doc, &[&["bad"], &["2"]]);

        let result = try_annotate_tables(&mut doc, "data-title", false, |doc, cell| {
            let text = text::to_string(doc, cell);
            if text == "bad" { Err(format!("cannot use {text}")) } else { Ok(text) }
        });

        assert_eq!(result, Err("cannot use bad".to_string()));
        assert_eq!(doc.renderer_property(rows_of(&doc, first)[1][0], "data-title"), Some("A"));
        assert!(doc.data(rows_of(&doc, second)[1][0]).is_none());
    }

    #[test]
    fn test_transform_receives_header_cells_in_order() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["A", "B", "C"], &["1", "2", "3"]]);
        let header_cells = rows_of(&doc, table)[0].clone();

        let mut seen = Vec::new();
        let result = try_annotate_tables(&mut doc, "data-title", false, |_, cell| {
            seen.push(cell);
            Ok::<_, Infallible>(String::new())
        });

        assert!(result.is_ok());
        assert_eq!(seen, header_cells);
    }

    #[test]
    fn test_transform_plugin() {
        let mut doc = Document::new();
        let table = build_table(&mut doc, &[&["A"], &["1"]]);

        let plugin = TableCellTitles::new(Options::new().with_attribute_name("data-label"));
        assert_eq!(plugin.name(), "table-cell-titles");
        plugin.apply(&mut doc);

        let cell = rows_of(&doc, table)[1][0];
        assert_eq!(doc.renderer_property(cell, "data-label"), Some("A"));
    }
}
