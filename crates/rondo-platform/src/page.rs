//! Button-driven page selection.
//!
//! Panels with fewer knobs than parameter sets page the knobs: one page is
//! live at a time, and two buttons move between pages. Forward wraps from
//! the last page to the first; backward stops at the first page.

/// Active-page index over `PAGES` pages.
///
/// `PAGES` must be at least 1; `active()` is always in `0..PAGES`.
///
/// # Example
///
/// ```rust
/// use rondo_platform::PageSelector;
///
/// let mut pages = PageSelector::<3>::new();
/// pages.previous();
/// assert_eq!(pages.active(), 0);
///
/// pages.next();
/// pages.next();
/// assert_eq!(pages.active(), 2);
/// pages.next();
/// assert_eq!(pages.active(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSelector<const PAGES: usize> {
    active: usize,
}

impl<const PAGES: usize> Default for PageSelector<PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const PAGES: usize> PageSelector<PAGES> {
    /// Start on page 0.
    pub const fn new() -> Self {
        const { assert!(PAGES > 0, "a page selector needs at least one page") };
        Self { active: 0 }
    }

    /// Number of pages.
    #[inline]
    pub const fn page_count(&self) -> usize {
        PAGES
    }

    /// Index of the live page.
    #[inline]
    pub const fn active(&self) -> usize {
        self.active
    }

    /// Move to the next page, wrapping to 0 after the last.
    #[inline]
    pub fn next(&mut self) -> usize {
        self.active = (self.active + 1) % PAGES;
        self.active
    }

    /// Move to the previous page. No-op on page 0.
    #[inline]
    pub fn previous(&mut self) -> usize {
        if self.active > 0 {
            self.active -= 1;
        }
        self.active
    }

    /// Jump to a page, clamped to the last one.
    pub fn select(&mut self, page: usize) -> usize {
        self.active = page.min(PAGES - 1);
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_never_moves() {
        let mut pages = PageSelector::<1>::new();
        assert_eq!(pages.next(), 0);
        assert_eq!(pages.previous(), 0);
        assert_eq!(pages.select(5), 0);
    }

    #[test]
    fn test_forward_wraps() {
        let mut pages = PageSelector::<4>::new();
        let visited: [usize; 5] = core::array::from_fn(|_| pages.next());
        assert_eq!(visited, [1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_backward_clamps_at_zero() {
        let mut pages = PageSelector::<4>::new();
        pages.select(2);
        assert_eq!(pages.previous(), 1);
        assert_eq!(pages.previous(), 0);
        assert_eq!(pages.previous(), 0);
    }

    #[test]
    fn test_backward_from_zero_does_not_wrap() {
        let mut pages = PageSelector::<8>::new();
        pages.previous();
        assert_eq!(pages.active(), 0);
        assert_eq!(pages.page_count(), 8);
    }
}
