//! Tree-walk primitives for locating landmarks in a parsed page.
//!
//! The walks operate on a flat, document-order (pre-order) sequence of
//! elements, so "after node N" means "later in that sequence", whether or not
//! the two share a parent.

use scraper::{ElementRef, Html};

/// The parts of an element the walks look at.
pub trait DocNode {
    fn tag_name(&self) -> &str;
    fn text_content(&self) -> String;
}

impl<'a> DocNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}

/// Every element of `doc` in document order, `<html>` first.
pub fn document_order(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .collect()
}

/// Index of the first node whose tag is one of `tags` and whose text satisfies `pred`.
pub fn find_first<N, P>(nodes: &[N], tags: &[String], pred: P) -> Option<usize>
where
    N: DocNode,
    P: Fn(&str) -> bool,
{
    nodes.iter().position(|n| {
        tags.iter().any(|t| t.eq_ignore_ascii_case(n.tag_name())) && pred(&n.text_content())
    })
}

/// Index of the first node tagged `tag` strictly after position `after`.
pub fn find_following<N: DocNode>(nodes: &[N], after: usize, tag: &str) -> Option<usize> {
    nodes
        .iter()
        .enumerate()
        .skip(after + 1)
        .find(|(_, n)| n.tag_name().eq_ignore_ascii_case(tag))
        .map(|(i, _)| i)
}

/// Lowercase `text` and collapse every whitespace run to one space.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
