//! Output formatting for non-interactive match listings.

use crate::content::Document;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Bytes of surrounding text shown on each side of a match.
const CONTEXT_BYTES: usize = 30;

/// Print every match currently marked in the document, one line per match,
/// with the matched text highlighted inside its surrounding context.
///
/// Expects a highlight pass to have run already; an unmarked document
/// prints the no-matches notice.
pub fn print_matches(doc: &Document, query: &str, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    let spans = doc.body.marker_spans();

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    writeln!(stdout, "{}", doc.title)?;
    stdout.reset()?;

    if spans.is_empty() {
        writeln!(stdout, "No matches for \"{}\"", query)?;
        return Ok(());
    }

    let text = doc.body.visible_text();
    let total = spans.len();

    for span in &spans {
        let ctx_start = snap_back(&text, span.start.saturating_sub(CONTEXT_BYTES));
        let ctx_end = snap_forward(&text, (span.end + CONTEXT_BYTES).min(text.len()));

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{}/{}", span.index + 1, total)?;
        stdout.reset()?;

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(stdout, " @{}", span.start)?;
        stdout.reset()?;

        write!(stdout, "  ")?;
        write!(stdout, "{}", flatten(&text[ctx_start..span.start]))?;

        stdout.set_color(
            ColorSpec::new()
                .set_fg(Some(Color::Black))
                .set_bg(Some(Color::Yellow))
                .set_bold(true),
        )?;
        write!(stdout, "{}", flatten(&text[span.start..span.end]))?;
        stdout.reset()?;

        writeln!(stdout, "{}", flatten(&text[span.end..ctx_end]))?;
    }

    Ok(())
}

/// Collapse whitespace runs so a match never spans multiple output lines.
fn flatten(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn snap_back(text: &str, mut pos: usize) -> usize {
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn snap_forward(text: &str, mut pos: usize) -> usize {
    while pos < text.len() && !text.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_collapses_whitespace() {
        assert_eq!(flatten("a\n  b\t\tc"), "a b c");
        assert_eq!(flatten("plain"), "plain");
    }

    #[test]
    fn test_snap_respects_char_boundaries() {
        let s = "a\u{e9}b"; // 'é' is two bytes starting at index 1
        assert_eq!(snap_back(s, 2), 1);
        assert_eq!(snap_forward(s, 2), 3);
        assert_eq!(snap_back(s, 1), 1);
        assert_eq!(snap_forward(s, 4), 4);
    }
}
