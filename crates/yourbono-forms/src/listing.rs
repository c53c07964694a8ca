//! Paging of the bond list.

/// Bonds shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// 1-based page number actually shown.
    pub number: usize,
    /// Number of pages (0 for an empty list).
    pub total_pages: usize,
    /// Total number of items across pages.
    pub total_items: usize,
    /// Items on this page.
    pub items: &'a [T],
}

impl<T> Page<'_, T> {
    /// True when a previous page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// True when a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Footer text under the list.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return "No tienes bonos registrados".to_string();
        }
        format!(
            "Página {} de {} - Mostrando {} de {} bonos",
            self.number,
            self.total_pages,
            self.items.len(),
            self.total_items
        )
    }
}

/// Slices `items` into page `number` (1-based) of `page_size`.
///
/// Out-of-range page numbers are clamped to the first or last page; a
/// zero page size is treated as one.
#[must_use]
pub fn paginate<T>(items: &[T], number: usize, page_size: usize) -> Page<'_, T> {
    let size = page_size.max(1);
    let total_pages = items.len().div_ceil(size);
    let number = number.clamp(1, total_pages.max(1));
    let start = ((number - 1) * size).min(items.len());
    let end = (start + size).min(items.len());
    Page {
        number,
        total_pages,
        total_items: items.len(),
        items: &items[start..end],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages() {
        let items: Vec<u32> = (1..=12).collect();
        let first = paginate(&items, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(first.items, &[1, 2, 3, 4, 5]);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paginate(&items, 3, DEFAULT_PAGE_SIZE);
        assert_eq!(last.items, &[11, 12]);
        assert!(!last.has_next());
        assert_eq!(last.summary(), "Página 3 de 3 - Mostrando 2 de 12 bonos");
    }

    #[test]
    fn test_clamping() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&items, 0, 5).number, 1);
        assert_eq!(paginate(&items, 9, 5).number, 2);
        assert_eq!(paginate(&items, 1, 0).items, &[1]);
    }

    #[test]
    fn test_empty() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 4, 5);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.summary(), "No tienes bonos registrados");
    }
}
