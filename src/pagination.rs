use serde::Serialize;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a list plus the metadata the pagination controls need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Controls are only worth showing with more than one page.
    pub fn show_controls(&self) -> bool {
        self.total_pages > 1
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Slice out page `page` (1-based). The page is not clamped: anything past
/// the end, or page 0, yields an empty `items`.
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let items = match page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) {
        Some(start) if start < records.len() => {
            let end = start.saturating_add(page_size).min(records.len());
            records[start..end].to_vec()
        }
        _ => Vec::new(),
    };
    Page {
        items,
        current_page: page,
        total_pages: total_pages(records.len(), page_size),
        total_items: records.len(),
    }
}

/// Clamp a requested page into `[1, total_pages]`, or to 1 when empty.
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let upper = total_pages.max(1) as i64;
    requested.clamp(1, upper) as usize
}

pub fn is_page_size_option(n: usize) -> bool {
    PAGE_SIZE_OPTIONS.contains(&n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn empty_input_has_no_pages() {
        let p = paginate::<usize>(&[], 1, 10);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.total_items, 0);
        assert!(p.items.is_empty());
        assert!(!p.can_go_next());
        assert!(!p.show_controls());
    }

    #[test]
    fn pages_are_fixed_size_slices() {
        let data = numbers(23);
        let p1 = paginate(&data, 1, 10);
        assert_eq!(p1.items, numbers(10));
        assert_eq!(p1.total_pages, 3);
        assert!(p1.can_go_next());
        assert!(!p1.can_go_previous());

        let p3 = paginate(&data, 3, 10);
        assert_eq!(p3.items, vec![21, 22, 23]);
        assert!(!p3.can_go_next());
        assert!(p3.can_go_previous());
    }

    #[test]
    fn pages_past_the_end_are_empty_and_unclamped() {
        let data = numbers(5);
        let p = paginate(&data, 4, 2);
        assert!(p.items.is_empty());
        assert_eq!(p.current_page, 4);
        assert_eq!(p.total_pages, 3);
        assert!(paginate(&data, 0, 2).items.is_empty());
    }

    #[test]
    fn pages_partition_the_input() {
        for len in [0usize, 1, 9, 10, 11, 47, 100] {
            for size in PAGE_SIZE_OPTIONS {
                let data = numbers(len);
                let total = paginate(&data, 1, size).total_pages;
                let mut seen = Vec::new();
                for page in 1..=total {
                    seen.extend(paginate(&data, page, size).items);
                }
                assert_eq!(seen, data, "len {len} size {size}");
            }
        }
    }

    #[test]
    fn paginating_a_single_page_is_idempotent() {
        let data = numbers(7);
        let once = paginate(&data, 1, 10);
        let twice = paginate(&once.items, 1, 10);
        assert_eq!(once, twice);
    }

    #[test]
    fn clamping_bounds_requests() {
        assert_eq!(clamp_page(100, 5), 5);
        assert_eq!(clamp_page(-5, 5), 1);
        assert_eq!(clamp_page(3, 5), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn page_size_options() {
        assert!(is_page_size_option(25));
        assert!(!is_page_size_option(20));
        assert_eq!(total_pages(10, 25), 1);
        assert_eq!(total_pages(26, 25), 2);
    }
}
