/// One page cut from a ranked result set.
#[derive(Debug, PartialEq)]
pub struct PageWindow<'a, T> {
    pub items: &'a [T],
    pub total: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

/// Slices page `page` (1-based) of `items`.
///
/// A page past the end yields an empty slice, not an error. `page_size` of 0
/// is treated as 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> PageWindow<'_, T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total = items.len();

    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    let total_pages = total_pages(total, page_size);

    PageWindow {
        items: &items[start..end],
        total,
        current_page: page,
        total_pages,
        has_more: page < total_pages,
    }
}

/// `ceil(total / page_size)`.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}
