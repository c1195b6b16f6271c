//! Interactive viewer state.

use crate::content::Document;
use crate::highlight::Highlighter;
use crate::search::SearchState;

/// Lines moved by a page scroll.
const PAGE_STEP: usize = 10;

/// Application state: the document tree, the search session driving the
/// highlight passes, and presentation state (scroll, status line).
pub struct App {
    pub doc: Document,
    pub search: SearchState,
    highlighter: Highlighter,
    /// Content scroll offset, in rendered lines.
    pub scroll: usize,
    /// When set, the next draw centers the current match in the viewport.
    pub follow_current: bool,
    pub status_message: String,
}

impl App {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            search: SearchState::new(),
            highlighter: Highlighter::new(),
            scroll: 0,
            follow_current: false,
            status_message: "Type to search".to_string(),
        }
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// Replace the whole query (initial query from the CLI).
    pub fn set_query(&mut self, query: &str) {
        self.update_query(query.to_string());
    }

    pub fn push_char(&mut self, c: char) {
        let mut query = self.search.query().to_string();
        query.push(c);
        self.update_query(query);
    }

    pub fn pop_char(&mut self) {
        let mut query = self.search.query().to_string();
        query.pop();
        self.update_query(query);
    }

    /// Delete the trailing word of the query (Ctrl+W).
    pub fn delete_word(&mut self) {
        let mut query = self.search.query().to_string();
        while query.ends_with(' ') {
            query.pop();
        }
        while !query.is_empty() && !query.ends_with(' ') {
            query.pop();
        }
        self.update_query(query);
    }

    pub fn clear_query(&mut self) {
        self.update_query(String::new());
    }

    fn update_query(&mut self, query: String) {
        self.search.set_query(&query);
        if let Err(e) = self.highlighter.set_query(&query) {
            self.status_message = format!("Pattern error: {}", e);
            return;
        }
        self.run_pass();
    }

    /// One full reset-then-search pass, then reconcile the navigation
    /// state against the reported count.
    fn run_pass(&mut self) {
        let desired = self.search.current();
        let count = self.highlighter.run(&mut self.doc.body, desired);
        if self.search.apply_count(count) {
            // The index moved during reconciliation; re-run so the flagged
            // marker agrees with the settled state.
            self.highlighter.run(&mut self.doc.body, self.search.current());
        }
        self.follow_current = true;
        self.status_message = self.describe_results();
    }

    pub fn next_match(&mut self) {
        if self.search.position().is_none() {
            return;
        }
        self.search.next();
        self.reflag();
    }

    pub fn previous_match(&mut self) {
        if self.search.position().is_none() {
            return;
        }
        self.search.previous();
        self.reflag();
    }

    /// Move the current flag to the navigation state's match. The count
    /// cannot change here: content and query are both untouched.
    fn reflag(&mut self) {
        self.highlighter.run(&mut self.doc.body, self.search.current());
        self.follow_current = true;
        self.status_message = self.describe_results();
    }

    /// "k of n" / "No matches" readout next to the query field; blank when
    /// the query is empty.
    pub fn readout(&self) -> String {
        if self.search.query().is_empty() {
            return String::new();
        }
        match self.search.position() {
            Some((k, n)) => format!("{} of {}", k, n),
            None => "No matches".to_string(),
        }
    }

    fn describe_results(&self) -> String {
        if self.search.query().is_empty() {
            "Type to search".to_string()
        } else {
            match self.search.total_matches() {
                0 => format!("No matches for \"{}\"", self.search.query()),
                1 => "1 match".to_string(),
                n => format!("{} matches", n),
            }
        }
    }

    // Manual scrolling detaches the viewport from the current match until
    // the next query change or navigation step.

    pub fn scroll_down(&mut self) {
        self.scroll += 1;
        self.follow_current = false;
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
        self.follow_current = false;
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll += PAGE_STEP;
        self.follow_current = false;
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(PAGE_STEP);
        self.follow_current = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;

    fn app_with(markup_src: &str) -> App {
        App::new(Document::new("Test", markup::parse(markup_src)))
    }

    #[test]
    fn test_typing_runs_a_pass_and_settles_state() {
        let mut app = app_with("<p>ab ab ab</p>");
        app.push_char('a');
        app.push_char('b');
        assert_eq!(app.search.total_matches(), 3);
        assert_eq!(app.search.current(), Some(0));
        assert_eq!(app.doc.body.current_marker(), Some(0));
        assert_eq!(app.readout(), "1 of 3");
    }

    #[test]
    fn test_navigation_moves_the_flag() {
        let mut app = app_with("<p>x x x</p>");
        app.set_query("x");
        app.next_match();
        assert_eq!(app.doc.body.current_marker(), Some(1));
        app.next_match();
        app.next_match();
        // Wrapped around.
        assert_eq!(app.doc.body.current_marker(), Some(0));
        app.previous_match();
        assert_eq!(app.doc.body.current_marker(), Some(2));
        assert_eq!(app.readout(), "3 of 3");
    }

    #[test]
    fn test_narrowing_query_reconciles_index() {
        let mut app = app_with("<p>abc ab abc ab ab</p>");
        app.set_query("ab");
        assert_eq!(app.search.total_matches(), 5);
        for _ in 0..4 {
            app.next_match();
        }
        assert_eq!(app.search.current(), Some(4));

        // "abc" has fewer matches than the remembered index would allow,
        // but a query edit restarts from the first match anyway.
        app.push_char('c');
        assert_eq!(app.search.total_matches(), 2);
        assert_eq!(app.search.current(), Some(0));
        assert_eq!(app.doc.body.current_marker(), Some(0));
    }

    #[test]
    fn test_clearing_query_resets_everything() {
        let mut app = app_with("<p>ab ab</p>");
        app.set_query("ab");
        assert_eq!(app.doc.body.marker_count(), 2);

        app.clear_query();
        assert_eq!(app.search.total_matches(), 0);
        assert_eq!(app.search.current(), None);
        assert_eq!(app.doc.body.marker_count(), 0);
        assert_eq!(app.readout(), "");
    }

    #[test]
    fn test_navigation_ignored_without_matches() {
        let mut app = app_with("<p>ab</p>");
        app.next_match();
        assert_eq!(app.search.current(), None);

        app.set_query("zz");
        assert_eq!(app.readout(), "No matches");
        app.next_match();
        app.previous_match();
        assert_eq!(app.search.current(), None);
    }

    #[test]
    fn test_delete_word() {
        let mut app = app_with("<p>ab cd</p>");
        app.set_query("ab cd");
        app.delete_word();
        assert_eq!(app.query(), "ab ");
        app.delete_word();
        assert_eq!(app.query(), "");
    }

    #[test]
    fn test_manual_scroll_detaches_follow() {
        let mut app = app_with("<p>ab</p>");
        app.set_query("ab");
        assert!(app.follow_current);
        app.scroll_page_down();
        assert!(!app.follow_current);
        app.next_match(); // single match, index unchanged, still re-follows
        assert!(app.follow_current);
    }
}
