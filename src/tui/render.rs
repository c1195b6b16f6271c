//! Flattens the content tree into styled, width-wrapped terminal lines.
//!
//! Whitespace collapses the way a rich-text renderer would collapse it:
//! runs of spaces and newlines in text leaves become single spaces, words
//! wrap at the given width. The line the current match lands on is reported
//! so the viewport can be centered on it.

use crate::content::{Document, Element, MarkerKind, Node, Tag};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Indent for wrapped list-item lines, matching the bullet prefix width.
const LIST_INDENT: usize = 2;

pub struct RenderedDocument {
    pub lines: Vec<Line<'static>>,
    /// Index into `lines` of the current match, if one is flagged.
    pub current_line: Option<usize>,
}

/// Render the document body into lines wrapped at `width` columns.
pub fn render_document(doc: &Document, width: u16) -> RenderedDocument {
    let mut writer = Writer::new(width.max(10) as usize);
    for child in &doc.body.children {
        writer.walk(child, Style::default());
    }
    writer.finish()
}

fn marker_style(kind: MarkerKind) -> Style {
    match kind {
        MarkerKind::Match => Style::default().fg(Color::Black).bg(Color::Yellow),
        MarkerKind::Current => Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    }
}

struct Writer {
    width: usize,
    lines: Vec<Line<'static>>,
    line: Vec<Span<'static>>,
    line_width: usize,
    indent: usize,
    pending_space: bool,
    current_line: Option<usize>,
}

impl Writer {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            line: Vec::new(),
            line_width: 0,
            indent: 0,
            pending_space: false,
            current_line: None,
        }
    }

    fn walk(&mut self, node: &Node, style: Style) {
        match node {
            Node::Text(text) => self.push_inline(text, style, false),
            Node::Marker(marker) => {
                let style = marker_style(marker.kind);
                self.push_inline(&marker.text, style, marker.kind == MarkerKind::Current);
            }
            Node::Element(el) => self.element(el, style),
        }
    }

    fn element(&mut self, el: &Element, inherited: Style) {
        if !el.tag.renderable() {
            return;
        }

        match &el.tag {
            Tag::LineBreak => self.line_break(),
            Tag::Paragraph | Tag::Container(_) => {
                self.begin_block();
                self.walk_children(el, inherited);
                self.flush_line();
            }
            Tag::Heading(_) => {
                self.begin_block();
                let style = inherited.patch(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                );
                self.walk_children(el, style);
                self.flush_line();
            }
            Tag::BulletList => {
                self.begin_block();
                self.walk_children(el, inherited);
                self.flush_line();
            }
            Tag::ListItem => {
                self.flush_line();
                self.indent = LIST_INDENT;
                self.line.push(Span::raw("- "));
                self.line_width = LIST_INDENT;
                self.pending_space = false;
                self.walk_children(el, inherited);
                self.flush_line();
                self.indent = 0;
            }
            Tag::Strong => {
                self.walk_children(el, inherited.patch(Style::default().add_modifier(Modifier::BOLD)));
            }
            Tag::Emphasis => {
                self.walk_children(
                    el,
                    inherited.patch(Style::default().add_modifier(Modifier::ITALIC)),
                );
            }
            Tag::Code => {
                self.walk_children(el, inherited.patch(Style::default().fg(Color::Green)));
            }
            Tag::Link => {
                self.walk_children(
                    el,
                    inherited.patch(
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                );
            }
            // renderable() filtered these out
            Tag::Script | Tag::Style => {}
        }
    }

    fn walk_children(&mut self, el: &Element, style: Style) {
        for child in &el.children {
            self.walk(child, style);
        }
    }

    /// Emit one inline run, collapsing whitespace and wrapping at the
    /// configured width. Marker text keeps its style across a wrap.
    fn push_inline(&mut self, text: &str, style: Style, is_current: bool) {
        if text.is_empty() {
            return;
        }

        let starts_ws = text.chars().next().is_some_and(char::is_whitespace);
        let ends_ws = text.chars().next_back().is_some_and(char::is_whitespace);

        if starts_ws {
            self.pending_space = true;
        }

        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                self.pending_space = true;
            }
            self.emit_word(word, style, is_current);
        }

        if ends_ws {
            self.pending_space = true;
        }
    }

    fn emit_word(&mut self, word: &str, style: Style, is_current: bool) {
        let word_width = word.chars().count();
        let space = usize::from(self.pending_space && self.line_width > 0);

        // Overlong words overflow rather than split mid-word.
        if self.line_width > self.indent && self.line_width + space + word_width > self.width {
            self.flush_line();
        }

        if self.line.is_empty() && self.indent > 0 {
            self.line.push(Span::raw(" ".repeat(self.indent)));
            self.line_width = self.indent;
        } else if self.pending_space && self.line_width > 0 {
            self.line.push(Span::raw(" "));
            self.line_width += 1;
        }

        if is_current && self.current_line.is_none() {
            self.current_line = Some(self.lines.len());
        }

        self.line.push(Span::styled(word.to_string(), style));
        self.line_width += word_width;
        self.pending_space = false;
    }

    /// Separate a block from what came before it with one blank line.
    fn begin_block(&mut self) {
        self.flush_line();
        if self
            .lines
            .last()
            .is_some_and(|line| !line.spans.is_empty())
        {
            self.lines.push(Line::default());
        }
    }

    fn flush_line(&mut self) {
        if !self.line.is_empty() {
            let spans = std::mem::take(&mut self.line);
            self.lines.push(Line::from(spans));
        }
        self.line_width = 0;
        self.pending_space = false;
    }

    /// `<br>`: end the current line even if that leaves it blank.
    fn line_break(&mut self) {
        if self.line.is_empty() {
            self.lines.push(Line::default());
        } else {
            self.flush_line();
        }
    }

    fn finish(mut self) -> RenderedDocument {
        self.flush_line();
        RenderedDocument {
            lines: self.lines,
            current_line: self.current_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Document;
    use crate::highlight::Highlighter;
    use crate::markup;

    fn render(markup_src: &str, width: u16) -> RenderedDocument {
        let doc = Document::new("T", markup::parse(markup_src));
        render_document(&doc, width)
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_paragraphs_are_separated_by_blank_lines() {
        let rendered = render("<p>one</p><p>two</p>", 40);
        let texts: Vec<String> = rendered.lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["one", "", "two"]);
    }

    #[test]
    fn test_wrapping_at_width() {
        let rendered = render("<p>aaa bbb ccc ddd</p>", 10);
        let texts: Vec<String> = rendered.lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_whitespace_collapses() {
        let rendered = render("<p>a\n      b</p>", 40);
        assert_eq!(line_text(&rendered.lines[0]), "a b");
    }

    #[test]
    fn test_list_items_get_bullets_and_wrap_indent() {
        let rendered = render("<ul><li>aaa bbb ccc</li><li>x</li></ul>", 9);
        let texts: Vec<String> = rendered.lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["- aaa bbb", "  ccc", "- x"]);
    }

    #[test]
    fn test_line_break() {
        let rendered = render("<p>a<br>b</p>", 40);
        let texts: Vec<String> = rendered.lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_script_produces_no_lines() {
        let rendered = render("<script>var x = 1;</script>", 40);
        assert!(rendered.lines.is_empty());
    }

    #[test]
    fn test_current_marker_line_is_reported() {
        let mut body = markup::parse("<p>one</p><p>two</p><p>three two</p>");
        let mut hl = Highlighter::new();
        hl.set_query("two").unwrap();
        hl.run(&mut body, Some(1));
        let doc = Document::new("T", body);

        let rendered = render_document(&doc, 40);
        let current = rendered.current_line.expect("current line");
        assert!(line_text(&rendered.lines[current]).contains("two"));
        // Second "two" lives in the last paragraph.
        assert_eq!(current, rendered.lines.len() - 1);
    }

    #[test]
    fn test_no_current_marker_reports_none() {
        let rendered = render("<p>plain</p>", 40);
        assert_eq!(rendered.current_line, None);
    }
}
