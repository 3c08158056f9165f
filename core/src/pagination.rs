//! The two page-walking styles used by the service.
//!
//! Both issue requests strictly in page order and keep results in the order
//! the service returned them.

use crate::error::Result;

/// Largest page the service will return.
pub const MAX_PAGE_SIZE: u32 = 300;
/// Page size requested by the major detail listing.
pub const DEFAULT_MAJOR_PAGE_LIMIT: u32 = 100;

/// Clamps a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn page_limit(requested: u32) -> u32 {
    requested.clamp(1, MAX_PAGE_SIZE)
}

/// Count-driven walk. `first` is page 1, already fetched with the initial
/// call; pages `2..=total_pages` are fetched one at a time and appended.
pub fn walk_counted<T, F>(first: Vec<T>, total_pages: u32, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Result<Vec<T>>,
{
    let mut items = first;
    for page in 2..=total_pages {
        items.extend(fetch(page)?);
    }
    Ok(items)
}

/// One page of a cursor-driven listing.
#[derive(Debug)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

/// Cursor-driven walk: fetches `page`, appends to `acc`, and recurses while
/// the service reports another page.
pub fn walk_cursor<T, F>(page: u32, acc: &mut Vec<T>, fetch: &mut F) -> Result<()>
where
    F: FnMut(u32) -> Result<CursorPage<T>>,
{
    let CursorPage { items, has_next } = fetch(page)?;
    acc.extend(items);
    if has_next {
        walk_cursor(page + 1, acc, fetch)?;
    }
    Ok(())
}
