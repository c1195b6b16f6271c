//! Rendered content tree.
//!
//! Documents arrive as `{ title, description }` pairs where the description
//! is an opaque markup string (see [`crate::markup`]). Once rendered into a
//! tree of [`Node`]s, everything downstream (the highlight pass, the TUI
//! renderer, the plain-text projection) works on this structure alone.
//!
//! The tree is mutated in place by the highlight pass: matched stretches of
//! text leaves are replaced by [`Marker`] nodes, and the reset pass turns
//! them back into text and re-merges adjacent leaves, restoring the text
//! content byte-for-byte.

pub mod source;

pub use source::{ContentSource, load_document, sample};

/// Element tag. `Script` and `Style` subtrees are never rendered and never
/// searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Paragraph,
    /// Heading level 1-6.
    Heading(u8),
    BulletList,
    ListItem,
    Strong,
    Emphasis,
    Code,
    Link,
    LineBreak,
    Script,
    Style,
    /// Any tag we have no special treatment for; rendered as a plain
    /// container so its text still shows up.
    Container(String),
}

impl Tag {
    /// Whether the subtree under this tag contributes visible text.
    pub fn renderable(&self) -> bool {
        !matches!(self, Tag::Script | Tag::Style)
    }

    /// Block-level tags start on their own line in the renderer.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Tag::Paragraph
                | Tag::Heading(_)
                | Tag::BulletList
                | Tag::ListItem
                | Tag::Container(_)
        )
    }
}

/// Marker flavor: every match gets `Match`, exactly one (at most) per pass
/// gets `Current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Match,
    Current,
}

/// Wrapper around one matched stretch of text. The matched text is the
/// marker's sole content, casing preserved from the original leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub text: String,
}

/// One node of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Marker(Marker),
}

/// Interior node: a tag plus children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub children: Vec<Node>,
}

/// A match located in the visible-text projection: document-order match
/// index plus byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    pub index: usize,
    pub kind: MarkerKind,
    pub start: usize,
    pub end: usize,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            children: Vec::new(),
        }
    }

    pub fn with_children(tag: Tag, children: Vec<Node>) -> Self {
        Self { tag, children }
    }

    /// Concatenated text of every renderable leaf, in document order.
    /// Markers contribute their wrapped text, so the projection is stable
    /// across highlight passes.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if !self.tag.renderable() {
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Marker(marker) => out.push_str(&marker.text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// All markers currently in the tree, as byte spans into
    /// [`visible_text`](Self::visible_text), in document order.
    pub fn marker_spans(&self) -> Vec<MatchSpan> {
        let mut spans = Vec::new();
        let mut offset = 0;
        self.collect_spans(&mut spans, &mut offset);
        spans
    }

    fn collect_spans(&self, spans: &mut Vec<MatchSpan>, offset: &mut usize) {
        if !self.tag.renderable() {
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(text) => *offset += text.len(),
                Node::Marker(marker) => {
                    spans.push(MatchSpan {
                        index: spans.len(),
                        kind: marker.kind,
                        start: *offset,
                        end: *offset + marker.text.len(),
                    });
                    *offset += marker.text.len();
                }
                Node::Element(el) => el.collect_spans(spans, offset),
            }
        }
    }

    /// Number of markers in the tree.
    pub fn marker_count(&self) -> usize {
        self.marker_spans().len()
    }

    /// Document-order match index of the marker flagged current, if any.
    pub fn current_marker(&self) -> Option<usize> {
        self.marker_spans()
            .iter()
            .find(|span| span.kind == MarkerKind::Current)
            .map(|span| span.index)
    }

    /// Merge runs of adjacent text children into single leaves. Shallow:
    /// only this element's direct children, matching what a DOM
    /// `parent.normalize()` call on a marker's parent would touch.
    pub fn merge_adjacent_text(&mut self) {
        let mut merged: Vec<Node> = Vec::with_capacity(self.children.len());
        for child in self.children.drain(..) {
            match (merged.last_mut(), child) {
                (Some(Node::Text(prev)), Node::Text(text)) => prev.push_str(&text),
                (_, child) => merged.push(child),
            }
        }
        self.children = merged;
    }
}

/// A rendered document: display title plus the content tree the search
/// operates on.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub body: Element,
}

impl Document {
    pub fn new(title: impl Into<String>, body: Element) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn test_visible_text_skips_script_and_style() {
        let body = Element::with_children(
            Tag::Container("body".into()),
            vec![
                Node::Element(Element::with_children(
                    Tag::Paragraph,
                    vec![text("hello ")],
                )),
                Node::Element(Element::with_children(
                    Tag::Script,
                    vec![text("alert(1)")],
                )),
                Node::Element(Element::with_children(Tag::Style, vec![text("p{}")])),
                Node::Element(Element::with_children(Tag::Paragraph, vec![text("world")])),
            ],
        );
        assert_eq!(body.visible_text(), "hello world");
    }

    #[test]
    fn test_marker_spans_in_document_order() {
        let body = Element::with_children(
            Tag::Container("body".into()),
            vec![
                text("ab "),
                Node::Marker(Marker {
                    kind: MarkerKind::Match,
                    text: "cd".into(),
                }),
                Node::Element(Element::with_children(
                    Tag::Strong,
                    vec![Node::Marker(Marker {
                        kind: MarkerKind::Current,
                        text: "ef".into(),
                    })],
                )),
            ],
        );

        let spans = body.marker_spans();
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (3, 5));
        assert_eq!((spans[1].start, spans[1].end), (5, 7));
        assert_eq!(body.current_marker(), Some(1));
        assert_eq!(body.visible_text(), "ab cdef");
    }

    #[test]
    fn test_merge_adjacent_text() {
        let mut el = Element::with_children(
            Tag::Paragraph,
            vec![text("a"), text("b"), Node::Element(Element::new(Tag::Strong)), text("c")],
        );
        el.merge_adjacent_text();
        assert_eq!(el.children.len(), 3);
        assert_eq!(el.children[0], text("ab"));
        assert_eq!(el.children[2], text("c"));
    }

    #[test]
    fn test_merge_on_empty_element_is_noop() {
        let mut el = Element::new(Tag::Paragraph);
        el.merge_adjacent_text();
        assert!(el.children.is_empty());
    }
}
