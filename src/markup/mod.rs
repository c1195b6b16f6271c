//! Minimal rich-text markup renderer.
//!
//! Turns the opaque `description` markup string of a [`crate::content::ContentSource`]
//! into the content tree the rest of the crate operates on. This covers the
//! small HTML subset documents actually use (`p`, `h1`-`h6`, `ul`/`ol`/`li`,
//! `strong`/`b`, `em`/`i`, `code`, `a`, `br`, `script`, `style`); unknown
//! tags become generic containers so their text still renders, and the five
//! basic named entities plus numeric references are decoded.
//!
//! Malformed input is tolerated, never an error: stray closing tags are
//! dropped, an unclosed element runs to the end of its parent.

use crate::content::{Element, Node, Tag};

/// Parse a markup string into a content tree rooted at a `body` container.
pub fn parse(input: &str) -> Element {
    let mut parser = Parser { src: input, pos: 0 };
    let children = parser.parse_nodes(None);
    Element::with_children(Tag::Container("body".to_string()), children)
}

fn map_tag(name: &str) -> Tag {
    match name {
        "p" => Tag::Paragraph,
        "h1" => Tag::Heading(1),
        "h2" => Tag::Heading(2),
        "h3" => Tag::Heading(3),
        "h4" => Tag::Heading(4),
        "h5" => Tag::Heading(5),
        "h6" => Tag::Heading(6),
        "ul" | "ol" => Tag::BulletList,
        "li" => Tag::ListItem,
        "strong" | "b" => Tag::Strong,
        "em" | "i" => Tag::Emphasis,
        "code" => Tag::Code,
        "a" => Tag::Link,
        "br" => Tag::LineBreak,
        "script" => Tag::Script,
        "style" => Tag::Style,
        other => Tag::Container(other.to_string()),
    }
}

/// Void elements never have children or closing tags.
fn is_void(name: &str) -> bool {
    matches!(name, "br" | "hr" | "img" | "meta" | "input")
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Parse sibling nodes until end of input or the closing tag of
    /// `enclosing` is reached (the closer itself is consumed).
    fn parse_nodes(&mut self, enclosing: Option<&str>) -> Vec<Node> {
        let mut nodes = Vec::new();

        while !self.at_end() {
            if self.rest().starts_with("<!--") {
                self.skip_comment();
                continue;
            }

            if self.rest().starts_with("</") {
                let name = self.consume_closing_tag();
                match enclosing {
                    Some(open) if name.eq_ignore_ascii_case(open) => break,
                    // Stray closer for something we never opened: drop it.
                    _ => continue,
                }
            }

            if self.at_open_tag() {
                nodes.push(self.parse_element());
                continue;
            }

            let text = self.parse_text();
            if !text.is_empty() {
                nodes.push(Node::Text(text));
            }
        }

        nodes
    }

    /// `<` followed by a tag-name character?
    fn at_open_tag(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('<')
            && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    }

    fn parse_element(&mut self) -> Node {
        self.pos += 1; // '<'
        let name = self.read_name().to_ascii_lowercase();
        let self_closing = self.skip_attributes();
        let tag = map_tag(&name);

        if is_void(&name) || self_closing {
            return Node::Element(Element::new(tag));
        }

        let children = match tag {
            // Raw-text elements: everything up to the matching closer is a
            // single text child, so the skip rule in the highlight pass has
            // real content to skip.
            Tag::Script | Tag::Style => {
                let raw = self.consume_raw_text(&name);
                if raw.is_empty() {
                    Vec::new()
                } else {
                    vec![Node::Text(raw)]
                }
            }
            _ => self.parse_nodes(Some(&name)),
        };

        Node::Element(Element::with_children(tag, children))
    }

    fn read_name(&mut self) -> &'a str {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len()
            && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'-')
        {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    /// Consume attributes through the closing `>`, respecting quoted
    /// values. Returns true for a self-closing `/>` tag.
    fn skip_attributes(&mut self) -> bool {
        let bytes = self.src.as_bytes();
        let mut quote: Option<u8> = None;
        let mut self_closing = false;

        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            self.pos += 1;
            match quote {
                Some(q) => {
                    if b == q {
                        quote = None;
                    }
                }
                None => match b {
                    b'"' | b'\'' => quote = Some(b),
                    b'/' => self_closing = true,
                    b'>' => return self_closing,
                    _ => {
                        if b != b' ' && b != b'\t' && b != b'\n' && b != b'\r' {
                            self_closing = false;
                        }
                    }
                },
            }
        }
        self_closing
    }

    fn consume_closing_tag(&mut self) -> String {
        self.pos += 2; // "</"
        let name = self.read_name().to_ascii_lowercase();
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos] != b'>' {
            self.pos += 1;
        }
        if self.pos < bytes.len() {
            self.pos += 1; // '>'
        }
        name
    }

    fn skip_comment(&mut self) {
        match self.rest().find("-->") {
            Some(i) => self.pos += i + 3,
            None => self.pos = self.src.len(),
        }
    }

    /// Everything up to `</name`, verbatim (no entity decoding).
    fn consume_raw_text(&mut self, name: &str) -> String {
        let closer = format!("</{name}");
        let lower = self.rest().to_ascii_lowercase();
        match lower.find(&closer) {
            Some(i) => {
                let raw = self.rest()[..i].to_string();
                self.pos += i;
                self.consume_closing_tag();
                raw
            }
            None => {
                let raw = self.rest().to_string();
                self.pos = self.src.len();
                raw
            }
        }
    }

    fn parse_text(&mut self) -> String {
        let start = self.pos;
        while !self.at_end() {
            if self.rest().starts_with('<') {
                // Only a real tag, closer or comment ends the run; a bare
                // '<' is content.
                if self.at_open_tag()
                    || self.rest().starts_with("</")
                    || self.rest().starts_with("<!--")
                {
                    break;
                }
                self.pos += 1;
            } else {
                let c = self.rest().chars().next().unwrap_or('\0');
                self.pos += c.len_utf8();
            }
        }
        decode_entities(&self.src[start..self.pos])
    }
}

/// Decode `&amp; &lt; &gt; &quot; &apos;/&#39;` and numeric character
/// references. Unknown references pass through literally.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        // Entities are short; cap the lookahead so a lone '&' near the end
        // of a long run doesn't scan the whole string.
        let semi = rest[..rest.len().min(16)].find(';');
        let Some(semi) = semi else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };

        let body = &rest[1..semi];
        let decoded = match body {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric(body),
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_numeric(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paragraph_with_inline_markup() {
        let body = parse("<p>one <strong>two</strong> three</p>");
        assert_eq!(body.visible_text(), "one two three");
        assert_eq!(body.children.len(), 1);
        let Node::Element(p) = &body.children[0] else {
            panic!("expected element");
        };
        assert_eq!(p.tag, Tag::Paragraph);
        assert_eq!(p.children.len(), 3);
    }

    #[test]
    fn test_parse_nested_list() {
        let body = parse("<ul><li>a</li><li><em>b</em></li></ul>");
        assert_eq!(body.visible_text(), "ab");
        let Node::Element(ul) = &body.children[0] else {
            panic!("expected element");
        };
        assert_eq!(ul.tag, Tag::BulletList);
        assert_eq!(ul.children.len(), 2);
    }

    #[test]
    fn test_script_and_style_contents_are_preserved_but_hidden() {
        let body = parse("<p>shown</p><script>var hidden = 1;</script><style>p { color: red }</style>");
        assert_eq!(body.visible_text(), "shown");
        // The subtrees still exist, they just don't render.
        assert_eq!(body.children.len(), 3);
    }

    #[test]
    fn test_entities() {
        let body = parse("<p>a &amp; b &lt;c&gt; &quot;d&quot; &#39;e&#39; &#x41;</p>");
        assert_eq!(body.visible_text(), "a & b <c> \"d\" 'e' A");
    }

    #[test]
    fn test_unknown_entity_passes_through() {
        let body = parse("<p>&bogus; &notclosed</p>");
        assert_eq!(body.visible_text(), "&bogus; &notclosed");
    }

    #[test]
    fn test_unknown_tag_becomes_container() {
        let body = parse("<aside>note</aside>");
        let Node::Element(el) = &body.children[0] else {
            panic!("expected element");
        };
        assert_eq!(el.tag, Tag::Container("aside".to_string()));
        assert_eq!(body.visible_text(), "note");
    }

    #[test]
    fn test_attributes_and_self_closing_tags() {
        let body = parse(r#"<p class="x" data-v="a>b">t</p><br/><img src="y.png"/>"#);
        assert_eq!(body.visible_text(), "t");
    }

    #[test]
    fn test_stray_closer_is_dropped() {
        let body = parse("<p>a</p></div><p>b</p>");
        assert_eq!(body.visible_text(), "ab");
    }

    #[test]
    fn test_unclosed_element_runs_to_end() {
        let body = parse("<p>a<strong>b</p>");
        // The unclosed <strong> swallows the rest of the paragraph; the
        // text itself is all still there.
        assert_eq!(body.visible_text(), "ab");
    }

    #[test]
    fn test_parsed_tree_has_no_markers() {
        let body = parse("<p>nothing highlighted yet</p>");
        assert_eq!(body.marker_count(), 0);
        assert_eq!(body.current_marker(), None);
        assert!(!matches!(body.children[0], Node::Marker(_)));
    }
}
