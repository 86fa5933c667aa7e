//! Page-number pagination: `?page=N` with a fixed page size.

use serde::Serialize;

/// Accepted in place of a number to request the final page.
const LAST_PAGE: &str = "last";

/// Paginated list envelope.
#[derive(Debug, Serialize)]
pub(super) struct Page<T: Serialize> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// The slice of rows a validated page request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PageWindow {
    pub page: i64,
    pub num_pages: i64,
    pub limit: i64,
    pub offset: i64,
}

/// The requested page is not a positive integer or lies past the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct InvalidPage;

/// Resolves the raw `page` query value against the row count.
///
/// An absent value means page 1. There is always at least one page, so an
/// empty table still serves an empty first page.
pub(super) fn resolve_page(
    raw: Option<&str>,
    count: i64,
    page_size: i64,
) -> Result<PageWindow, InvalidPage> {
    let page_size = page_size.max(1);
    let num_pages = ((count.max(0) + page_size - 1) / page_size).max(1);

    let page = match raw.map(str::trim) {
        None | Some("") => 1,
        Some(LAST_PAGE) => num_pages,
        Some(value) => value.parse::<i64>().map_err(|_| InvalidPage)?,
    };
    if page < 1 || page > num_pages {
        return Err(InvalidPage);
    }

    Ok(PageWindow {
        page,
        num_pages,
        limit: page_size,
        offset: (page - 1) * page_size,
    })
}

impl PageWindow {
    pub(super) fn next_page(&self) -> Option<i64> {
        (self.page < self.num_pages).then_some(self.page + 1)
    }

    pub(super) fn previous_page(&self) -> Option<i64> {
        (self.page > 1).then_some(self.page - 1)
    }
}

/// Builds the absolute link for `page`; page 1 carries no query string.
pub(super) fn page_link(base_url: &str, page: i64) -> String {
    if page == 1 {
        base_url.to_string()
    } else {
        format!("{base_url}?page={page}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_page_is_first_page() {
        let window = resolve_page(None, 45, 20).unwrap();
        assert_eq!(window.page, 1);
        assert_eq!(window.num_pages, 3);
        assert_eq!(window.offset, 0);
        assert_eq!(window.next_page(), Some(2));
        assert_eq!(window.previous_page(), None);
    }

    #[test]
    fn last_page_has_partial_offset_and_no_next() {
        let window = resolve_page(Some("3"), 45, 20).unwrap();
        assert_eq!(window.offset, 40);
        assert_eq!(window.next_page(), None);
        assert_eq!(window.previous_page(), Some(2));
    }

    #[test]
    fn last_keyword_resolves_to_final_page() {
        assert_eq!(resolve_page(Some("last"), 45, 20).unwrap().page, 3);
    }

    #[test]
    fn empty_table_serves_first_page_only() {
        let window = resolve_page(None, 0, 20).unwrap();
        assert_eq!(window.num_pages, 1);
        assert_eq!(window.next_page(), None);
        assert_eq!(resolve_page(Some("2"), 0, 20), Err(InvalidPage));
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert_eq!(resolve_page(Some("0"), 45, 20), Err(InvalidPage));
        assert_eq!(resolve_page(Some("-1"), 45, 20), Err(InvalidPage));
        assert_eq!(resolve_page(Some("4"), 45, 20), Err(InvalidPage));
        assert_eq!(resolve_page(Some("two"), 45, 20), Err(InvalidPage));
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        assert_eq!(resolve_page(None, 40, 20).unwrap().num_pages, 2);
    }

    #[test]
    fn page_link_omits_query_for_first_page() {
        let base = "http://shop.test/products/";
        assert_eq!(page_link(base, 1), "http://shop.test/products/");
        assert_eq!(page_link(base, 3), "http://shop.test/products/?page=3");
    }
}
