//! Navigation state machine.
//!
//! Owns the authoritative `{ query, current index, total matches }` tuple
//! and the policy for how it evolves: an optimistic index on query change,
//! reconciliation against the count the highlight pass actually reports,
//! and wraparound next/previous. It never looks at content; the pass's
//! reported count is the only source of truth for the total.

/// Search session state. `current() == None` means no current match
/// (empty query or zero matches).
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    current: Option<usize>,
    total: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Desired current match, 0-based document order.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Last match count reported by the highlight pass.
    pub fn total_matches(&self) -> usize {
        self.total
    }

    /// Update the query. Non-empty queries optimistically point at the
    /// first match; the index settles once [`apply_count`](Self::apply_count)
    /// reports what the pass actually found.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        if self.query.is_empty() {
            self.current = None;
            self.total = 0;
        } else {
            self.current = Some(0);
        }
    }

    /// Reconcile against the count reported by the highlight pass. Returns
    /// true if the current index moved, meaning the caller must re-run the
    /// pass so the flagged marker agrees.
    pub fn apply_count(&mut self, count: usize) -> bool {
        let before = self.current;

        self.total = count;
        if count == 0 {
            self.current = None;
        } else if !matches!(self.current, Some(i) if i < count) {
            self.current = Some(0);
        }

        self.assert_consistent();
        self.current != before
    }

    /// Step to the next match, wrapping past the last back to the first.
    /// Ignored while the query is empty or nothing matched.
    pub fn next(&mut self) {
        if self.query.is_empty() || self.total == 0 {
            return;
        }
        if let Some(i) = self.current {
            self.current = Some((i + 1) % self.total);
        }
        self.assert_consistent();
    }

    /// Step to the previous match, wrapping past the first back to the
    /// last. Ignored while the query is empty or nothing matched.
    pub fn previous(&mut self) {
        if self.query.is_empty() || self.total == 0 {
            return;
        }
        if let Some(i) = self.current {
            self.current = Some((i + self.total - 1) % self.total);
        }
        self.assert_consistent();
    }

    /// 1-based `(current, total)` readout for display, present only when a
    /// current match exists.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current.map(|i| (i + 1, self.total))
    }

    /// Settled-state invariants. Violations mean the accessor is being
    /// driven outside its lifecycle (a pass was skipped or counts were
    /// invented), which is a programming error and fails hard.
    fn assert_consistent(&self) {
        if self.query.is_empty() || self.total == 0 {
            assert!(
                self.current.is_none(),
                "search state has a current match without any matches"
            );
        } else {
            assert!(
                matches!(self.current, Some(i) if i < self.total),
                "current match index out of range"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled(query: &str, count: usize) -> SearchState {
        let mut state = SearchState::new();
        state.set_query(query);
        state.apply_count(count);
        state
    }

    #[test]
    fn test_initial_state() {
        let state = SearchState::new();
        assert_eq!(state.current(), None);
        assert_eq!(state.total_matches(), 0);
        assert_eq!(state.position(), None);
    }

    #[test]
    fn test_query_change_is_optimistic() {
        let mut state = SearchState::new();
        state.set_query("ab");
        assert_eq!(state.current(), Some(0));
    }

    #[test]
    fn test_apply_count_reconciles_out_of_range_index() {
        let mut state = settled("ab", 5);
        for _ in 0..4 {
            state.next();
        }
        assert_eq!(state.current(), Some(4));

        // A recount (say, after content changed) reports fewer matches
        // than the remembered index.
        let moved = state.apply_count(3);
        assert!(moved);
        assert_eq!(state.current(), Some(0));
        assert_eq!(state.total_matches(), 3);

        // In-range index survives a recount.
        state.next();
        let moved = state.apply_count(3);
        assert!(!moved);
        assert_eq!(state.current(), Some(1));
    }

    #[test]
    fn test_zero_count_clears_current() {
        let mut state = settled("zzz", 0);
        assert_eq!(state.current(), None);
        assert_eq!(state.position(), None);
        state.next();
        state.previous();
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_empty_query_resets() {
        let mut state = settled("ab", 4);
        state.set_query("");
        assert_eq!(state.current(), None);
        assert_eq!(state.total_matches(), 0);
        state.next();
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_wraparound() {
        let mut state = settled("ab", 3);
        assert_eq!(state.position(), Some((1, 3)));

        state.next();
        state.next();
        assert_eq!(state.current(), Some(2));
        state.next();
        assert_eq!(state.current(), Some(0));

        state.previous();
        assert_eq!(state.current(), Some(2));
    }

    #[test]
    fn test_position_is_one_based() {
        let mut state = settled("ab", 2);
        assert_eq!(state.position(), Some((1, 2)));
        state.next();
        assert_eq!(state.position(), Some((2, 2)));
    }
}
