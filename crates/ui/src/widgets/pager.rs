use std::ops::Range;

/// Page bookkeeping for list scenes.
///
/// Pages are `per_page` items long; the last page may be shorter. Moving past
/// either end is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    per_page: usize,
    total: usize,
}

impl Pager {
    /// `per_page` is raised to at least one.
    pub fn new(per_page: usize, total: usize) -> Self {
        Self {
            page: 0,
            per_page: per_page.max(1),
            total,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Zero for an empty collection.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns true if the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the page changed.
    pub fn previous_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Item indices shown on the current page.
    pub fn visible_range(&self) -> Range<usize> {
        let start = (self.page * self.per_page).min(self.total);
        let end = (start + self.per_page).min(self.total);
        start..end
    }

    /// First item index of the current page, if the page has any items.
    pub fn first_visible(&self) -> Option<usize> {
        let range = self.visible_range();
        (!range.is_empty()).then_some(range.start)
    }

    /// Moves to the page that contains `index`.
    pub fn show(&mut self, index: usize) {
        if index < self.total {
            self.page = index / self.per_page;
        }
    }

    /// Updates the item count, pulling the page back if it fell off the end.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp_page();
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.page_count().saturating_sub(1));
    }
}
