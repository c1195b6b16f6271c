//! # infind - in-document search with live highlighting
//!
//! infind renders a rich-text document in the terminal and lets you search
//! it interactively: every occurrence of the query is highlighted, one is
//! the current match, and Enter/arrow keys step through the occurrences
//! with the viewport following along.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`content`] - The rendered content tree and the document provider
//! - [`markup`] - Minimal rich-text markup renderer (markup string -> tree)
//! - [`highlight`] - The highlight pass (reset, match, wrap in markers)
//! - [`search`] - Navigation state (current index, count reconciliation)
//! - [`tui`] - Interactive terminal UI
//! - [`output`] - Non-interactive match listing
//!
//! ## Quick Start
//!
//! ```
//! use infind::content::Document;
//! use infind::highlight::Highlighter;
//! use infind::markup;
//!
//! let mut doc = Document::new("Notes", markup::parse("<p>tea and toast</p>"));
//!
//! let mut highlighter = Highlighter::new();
//! highlighter.set_query("tea").unwrap();
//! let count = highlighter.run(&mut doc.body, Some(0));
//! assert_eq!(count, 1);
//! ```
//!
//! Every pass resets the tree before searching again, so re-running on
//! each keystroke never accumulates stale markers.

pub mod content;
pub mod highlight;
pub mod markup;
pub mod output;
pub mod search;
pub mod tui;
