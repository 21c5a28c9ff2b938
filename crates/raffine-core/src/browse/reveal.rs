//! Incremental "load more" pagination over an already filtered list.

/// Number of results revealed per step.
pub const PAGE_SIZE: usize = 6;

/// Tracks how many filtered results are currently exposed.
///
/// The counter knows nothing about the results themselves; every query takes
/// the current filtered count so the counter never has to be kept in sync
/// with the filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealController {
    count: usize,
}

impl RevealController {
    pub fn new() -> Self {
        Self { count: PAGE_SIZE }
    }

    /// Raw counter value. May exceed the filtered count after a reset.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = PAGE_SIZE;
    }

    /// Reveals one more page, capped at `filtered`. Returns the new counter.
    pub fn advance(&mut self, filtered: usize) -> usize {
        self.count = (self.count + PAGE_SIZE).min(filtered);
        self.count
    }

    pub fn has_more(&self, filtered: usize) -> bool {
        self.count < filtered
    }

    /// How many results are actually displayed.
    pub fn visible(&self, filtered: usize) -> usize {
        self.count.min(filtered)
    }
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_one_page() {
        let reveal = RevealController::new();
        assert_eq!(reveal.count(), 6);
        assert_eq!(reveal.visible(10), 6);
        assert_eq!(reveal.visible(4), 4);
        assert!(reveal.has_more(10));
        assert!(!reveal.has_more(6));
    }

    #[test]
    fn test_advance_is_capped_at_filtered_count() {
        let mut reveal = RevealController::new();
        reveal.reset();
        assert_eq!(reveal.visible(10), 6);
        assert_eq!(reveal.advance(10), 10);
        assert_eq!(reveal.advance(10), 10);
        assert_ne!(reveal.count(), 12);
        assert!(!reveal.has_more(10));
    }

    #[test]
    fn test_advance_by_whole_pages() {
        let mut reveal = RevealController::new();
        assert_eq!(reveal.advance(20), 12);
        assert_eq!(reveal.advance(20), 18);
        assert_eq!(reveal.advance(20), 20);
    }

    #[test]
    fn test_reset_returns_to_first_page() {
        let mut reveal = RevealController::new();
        reveal.advance(30);
        reveal.advance(30);
        reveal.reset();
        assert_eq!(reveal.count(), PAGE_SIZE);
    }
}
