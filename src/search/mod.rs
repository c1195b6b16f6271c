//! Search session state and navigation.

mod state;

pub use state::SearchState;
