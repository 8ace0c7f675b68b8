//! Selection plus pagination shared by the list scenes.
use console_ui::Pager;

/// A selected index into a paged collection.
///
/// Moving the selection drags the page along; turning the page snaps the
/// selection to the first item on the new page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListCursor {
    pager: Pager,
    selected: Option<usize>,
}

impl ListCursor {
    pub fn new(per_page: usize, total: usize) -> Self {
        let mut cursor = Self {
            pager: Pager::new(per_page, 0),
            selected: None,
        };
        cursor.sync(total);
        cursor
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn per_page(&self) -> usize {
        self.pager.per_page()
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn visible_range(&self) -> std::ops::Range<usize> {
        self.pager.visible_range()
    }

    /// Adopts a new collection size, keeping the selection in bounds.
    ///
    /// Returns true if the page or the selection changed.
    pub fn sync(&mut self, total: usize) -> bool {
        let before = *self;
        self.pager.set_total(total);
        self.selected = match (total, self.selected) {
            (0, _) => None,
            (_, None) => self.pager.first_visible(),
            (_, Some(index)) => Some(index.min(total - 1)),
        };
        if let Some(index) = self.selected {
            self.pager.show(index);
        }
        *self != before
    }

    pub fn set_per_page(&mut self, per_page: usize) -> bool {
        let before = *self;
        self.pager.set_per_page(per_page);
        if let Some(index) = self.selected {
            self.pager.show(index);
        }
        *self != before
    }

    /// Points the selection at `index` if it is in range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.pager.total() || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        self.pager.show(index);
        true
    }

    pub fn select_next(&mut self) -> bool {
        match self.selected {
            Some(index) => self.select(index + 1),
            None => false,
        }
    }

    pub fn select_previous(&mut self) -> bool {
        match self.selected {
            Some(index) if index > 0 => self.select(index - 1),
            _ => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.pager.next_page();
        if moved {
            self.selected = self.pager.first_visible();
        }
        moved
    }

    pub fn previous_page(&mut self) -> bool {
        let moved = self.pager.previous_page();
        if moved {
            self.selected = self.pager.first_visible();
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_selection() {
        let mut cursor = ListCursor::new(3, 0);
        assert_eq!(cursor.selected(), None);
        assert!(!cursor.select_next());
        assert!(!cursor.next_page());
        assert_eq!(cursor.visible_range(), 0..0);
    }

    #[test]
    fn page_follows_selection() {
        let mut cursor = ListCursor::new(3, 7);
        assert_eq!(cursor.selected(), Some(0));
        for _ in 0..3 {
            assert!(cursor.select_next());
        }
        assert_eq!((cursor.selected(), cursor.page()), (Some(3), 1));
        assert!(cursor.select_previous());
        assert_eq!(cursor.page(), 0);
    }

    #[test]
    fn page_turns_snap_selection() {
        let mut cursor = ListCursor::new(3, 7);
        assert!(cursor.next_page());
        assert!(cursor.next_page());
        assert!(!cursor.next_page());
        assert_eq!((cursor.page(), cursor.selected()), (2, Some(6)));
        assert_eq!(cursor.visible_range(), 6..7);
        assert!(cursor.previous_page());
        assert_eq!(cursor.selected(), Some(3));
    }

    #[test]
    fn shrinking_keeps_selection_in_bounds() {
        let mut cursor = ListCursor::new(3, 7);
        cursor.select(6);
        assert!(cursor.sync(4));
        assert_eq!((cursor.selected(), cursor.page()), (Some(3), 1));
        assert!(cursor.sync(0));
        assert_eq!(cursor.selected(), None);
        assert!(cursor.sync(2));
        assert_eq!(cursor.selected(), Some(0));
    }
}
