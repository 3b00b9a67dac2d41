/// One page of a filtered view.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page_count: usize,
    pub effective_page: usize,
}

/// Number of pages needed for `len` items. Never less than one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice out `requested_page` (1-based), clamped into `1..=page_count`.
pub fn paginate<T>(items: &[T], page_size: usize, requested_page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let page_count = page_count(items.len(), page_size);
    let effective_page = requested_page.clamp(1, page_count);

    let start = ((effective_page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        page_count,
        effective_page,
    }
}
