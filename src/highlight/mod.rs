//! Match discovery and highlighting over the content tree.

mod engine;

pub use engine::{Highlighter, reset};
