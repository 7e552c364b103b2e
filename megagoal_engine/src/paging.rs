//! Deterministic slicing of ordered result sets.
//!
//! Two flavours, matching the two ways results reach the presentation boundary:
//! * [`PagedResult`] - classic offset pagination for server-side queries (page / limit / total / total pages).
//! * [`Reveal`] - incremental "show more" batches over a client-held, already-ordered sequence.
//!
//! Both are stateless with respect to the data: the caller owns the ordered sequence and must not re-sort it
//! between slices, or batches could reveal duplicates or skip items.

use serde::{Deserialize, Serialize};

/// One page of an ordered result set, plus the totals a caller needs to render a pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> PagedResult<T> {
    /// An empty page. Used when the source set is empty and no store query was issued at all.
    pub fn empty(page: u32) -> Self {
        Self { items: Vec::new(), total: 0, page: page.max(1), total_pages: 0 }
    }

    /// Wraps items that were already limited/offset by the store, attaching the independently-computed total.
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self { items, total, page: page.max(1), total_pages: total_pages(total, limit) }
    }

    /// Slices a full, ordered, in-memory sequence. A page beyond the range yields an empty `items` with the
    /// correct `total` and `total_pages`; it is never an error.
    pub fn from_slice(items: Vec<T>, page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let total = items.len() as u64;
        let start = (page as usize - 1) * limit as usize;
        let page_items: Vec<T> = items.into_iter().skip(start).take(limit as usize).collect();
        Self { items: page_items, total, page, total_pages: total_pages(total, limit) }
    }
}

/// Number of pages needed to cover `total` items at `limit` per page.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    ((total + limit as u64 - 1) / limit as u64) as u32
}

/// Incremental reveal state for one client-held group of matches.
///
/// Starts with one batch visible. `show_more` reveals exactly `min(batch, remaining)` further items and is a no-op
/// once everything is visible. The caller passes the group's current length on each call; the underlying sequence
/// must keep its order for the lifetime of the reveal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reveal {
    batch: usize,
    visible: usize,
}

impl Reveal {
    pub fn new(batch: usize) -> Self {
        Self { batch, visible: batch }
    }

    pub fn batch(&self) -> usize {
        self.batch
    }

    /// How many of `total` items are currently visible.
    pub fn shown(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.shown(total) < total
    }

    /// Reveals the next batch. Idempotent once the whole sequence is visible.
    pub fn show_more(&mut self, total: usize) {
        let shown = self.shown(total);
        let step = self.batch.min(total - shown);
        self.visible = shown + step;
    }

    /// Back to a single visible batch, e.g. when the user switches rounds.
    pub fn reset(&mut self) {
        self.visible = self.batch;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slices_pages_in_order() {
        let items: Vec<u32> = (0..120).collect();
        let page = PagedResult::from_slice(items.clone(), 1, 50);
        assert_eq!(page.items.len(), 50);
        assert_eq!(page.items[0], 0);
        assert_eq!(page.total, 120);
        assert_eq!(page.total_pages, 3);

        let page = PagedResult::from_slice(items.clone(), 3, 50);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0], 100);

        // Same input, same page, same slice
        let again = PagedResult::from_slice(items, 3, 50);
        assert_eq!(page.items, again.items);
    }

    #[test]
    fn page_beyond_range_is_empty_not_an_error() {
        let items: Vec<u32> = (0..40).collect();
        let page = PagedResult::from_slice(items, 3, 50);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 40);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn page_zero_is_treated_as_page_one() {
        let items: Vec<u32> = (0..10).collect();
        let page = PagedResult::from_slice(items, 0, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 50), 0);
        assert_eq!(total_pages(1, 50), 1);
        assert_eq!(total_pages(50, 50), 1);
        assert_eq!(total_pages(51, 50), 2);
    }

    #[test]
    fn reveal_steps_by_batch() {
        let mut reveal = Reveal::new(9);
        assert_eq!(reveal.shown(25), 9);
        reveal.show_more(25);
        assert_eq!(reveal.shown(25), 18);
        reveal.show_more(25);
        assert_eq!(reveal.shown(25), 25);
        assert!(!reveal.has_more(25));
    }

    #[test]
    fn show_more_is_idempotent_at_the_end() {
        let mut reveal = Reveal::new(50);
        reveal.show_more(30);
        let shown = reveal.shown(30);
        reveal.show_more(30);
        reveal.show_more(30);
        assert_eq!(reveal.shown(30), shown);
        assert_eq!(shown, 30);
    }

    #[test]
    fn short_groups_show_everything_immediately() {
        let reveal = Reveal::new(9);
        assert_eq!(reveal.shown(4), 4);
        assert!(!reveal.has_more(4));
    }

    #[test]
    fn reset_returns_to_one_batch() {
        let mut reveal = Reveal::new(9);
        reveal.show_more(40);
        reveal.show_more(40);
        reveal.reset();
        assert_eq!(reveal.shown(40), 9);
    }
}
