//! Tree traversal utilities for transforms.

use crate::model::{Document, NodeId};

/// Visit every node matching `predicate`, in depth-first pre-order.
///
/// Matches are collected before the first call to `visitor`, so the visitor
/// may freely mutate the document. Nodes it appends are not visited.
pub fn visit_matching<P, F>(doc: &mut Document, predicate: P, mut visitor: F)
where
    P: Fn(&Document, NodeId) -> bool,
    F: FnMut(&mut Document, NodeId),
{
    for id in collect_matching(doc, predicate) {
        visitor(doc, id);
    }
}

/// Fallible variant of [`visit_matching`]; stops at the first error.
pub fn try_visit_matching<P, F, E>(doc: &mut Document, predicate: P, mut visitor: F) -> Result<(), E>
where
    P: Fn(&Document, NodeId) -> bool,
    F: FnMut(&mut Document, NodeId) -> Result<(), E>,
{
    for id in collect_matching(doc, predicate) {
        visitor(doc, id)?;
    }
    Ok(())
}

fn collect_matching<P>(doc: &Document, predicate: P) -> Vec<NodeId>
where
    P: Fn(&Document, NodeId) -> bool,
{
    doc.iter_dfs().filter(|&id| predicate(doc, id)).collect()
}
