//! The highlight pass.
//!
//! One pass = reset, then search: every existing marker is unwrapped back
//! into plain text (restoring the tree byte-for-byte) before the query is
//! matched again, so the pass is safe to re-run on every keystroke.
//!
//! Matching is case-insensitive, literal (the query is escaped so no
//! character acts as a pattern metacharacter), non-overlapping and strictly
//! per text leaf: a query split across two leaves never matches. Matches
//! are numbered in document order; the marker whose number equals the
//! advisory current index is flagged [`MarkerKind::Current`].

use crate::content::{Element, Marker, MarkerKind, Node};
use regex::{Regex, RegexBuilder};

/// Holds the active query and its compiled pattern.
///
/// The compiled pattern is cached across passes since the same query is
/// typically run many times (once per navigation step).
pub struct Highlighter {
    query: String,
    pattern: Option<Regex>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            pattern: None,
        }
    }

    /// Set the query, recompiling the pattern. The query is matched as a
    /// literal; escaping means compilation only fails on pathological
    /// inputs (pattern size limits), in which case no pattern is kept and
    /// subsequent passes find nothing.
    pub fn set_query(&mut self, query: &str) -> Result<(), regex::Error> {
        if query == self.query {
            return Ok(());
        }

        self.query = query.to_string();

        if query.is_empty() {
            self.pattern = None;
            return Ok(());
        }

        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => {
                self.pattern = Some(regex);
                Ok(())
            }
            Err(e) => {
                self.pattern = None;
                Err(e)
            }
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Run one reset-then-search pass over `root` and return the number of
    /// matches found.
    ///
    /// `current` is advisory: the match with that document-order index is
    /// flagged current, an out-of-range or `None` value simply flags
    /// nothing. An empty query stops after the reset and reports zero.
    pub fn run(&self, root: &mut Element, current: Option<usize>) -> usize {
        reset(root);

        let Some(regex) = &self.pattern else {
            return 0;
        };

        let mut counter = 0;
        rewrite(root, regex, current, &mut counter);
        counter
    }
}

/// Unwrap every marker back into a plain text leaf and re-merge adjacent
/// leaves in the elements that held markers. A no-op on a clean tree.
pub fn reset(root: &mut Element) {
    let mut had_marker = false;

    for child in &mut root.children {
        match child {
            Node::Marker(marker) => {
                had_marker = true;
                *child = Node::Text(std::mem::take(&mut marker.text));
            }
            Node::Element(el) => reset(el),
            Node::Text(_) => {}
        }
    }

    // Merge only where markers were removed, so text leaves that were
    // adjacent in the original tree stay split across passes.
    if had_marker {
        root.merge_adjacent_text();
    }
}

/// Pre-order walk replacing matched stretches of text leaves with marker
/// nodes. `counter` numbers matches across the whole tree.
fn rewrite(el: &mut Element, regex: &Regex, current: Option<usize>, counter: &mut usize) {
    if !el.tag.renderable() {
        return;
    }

    let children = std::mem::take(&mut el.children);
    let mut out = Vec::with_capacity(children.len());

    for child in children {
        match child {
            Node::Text(text) => {
                if text.trim().is_empty() {
                    out.push(Node::Text(text));
                    continue;
                }
                rewrite_text(text, regex, current, counter, &mut out);
            }
            Node::Element(mut sub) => {
                rewrite(&mut sub, regex, current, counter);
                out.push(Node::Element(sub));
            }
            // Reset already ran; markers cannot survive into the search
            // step.
            marker @ Node::Marker(_) => out.push(marker),
        }
    }

    el.children = out;
}

/// Split one text leaf into plain segments and markers. A leaf with no
/// matches is pushed back untouched.
fn rewrite_text(
    text: String,
    regex: &Regex,
    current: Option<usize>,
    counter: &mut usize,
    out: &mut Vec<Node>,
) {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in regex.find_iter(&text) {
        if m.start() > last {
            segments.push(Node::Text(text[last..m.start()].to_string()));
        }

        let kind = if Some(*counter) == current {
            MarkerKind::Current
        } else {
            MarkerKind::Match
        };
        // The marker copies the leaf's own bytes: matching was
        // case-insensitive, the wrapped text keeps its original casing.
        segments.push(Node::Marker(Marker {
            kind,
            text: text[m.start()..m.end()].to_string(),
        }));

        *counter += 1;
        last = m.end();
    }

    if segments.is_empty() {
        out.push(Node::Text(text));
        return;
    }

    if last < text.len() {
        segments.push(Node::Text(text[last..].to_string()));
    }

    out.append(&mut segments);
}
