//! Page math for the recipe listing.
//!
//! The listing always shows a fixed number of recipes per page and renders
//! links for every page, so the helpers here return the full page-number
//! sequence rather than a window.

/// Recipes shown per listing page. Not user-configurable.
pub const PAGE_SIZE: i64 = 3;

/// Parses the `page` query parameter. Absent, non-numeric, or sub-1 values
/// all fall back to page 1; pages beyond the last are left alone and simply
/// produce an empty listing.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Number of pages needed for `total` items; 0 when there are no items.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    }
}

/// Rows skipped before `page`. Saturates so an arbitrarily large page
/// number still runs as an ordinary query that comes back empty.
pub fn offset(page: i64, page_size: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// The full `1..=total_pages` sequence the listing renders as page links.
pub fn page_numbers(total_pages: i64) -> Vec<i64> {
    (1..=total_pages).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_has_zero_pages() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert!(page_numbers(0).is_empty());
    }

    #[test]
    fn partial_last_page_rounds_up() {
        assert_eq!(total_pages(1, 3), 1);
        assert_eq!(total_pages(3, 3), 1);
        assert_eq!(total_pages(4, 3), 2);
        assert_eq!(total_pages(5, 3), 2);
        assert_eq!(total_pages(6, 3), 2);
        assert_eq!(total_pages(7, 3), 3);
    }

    #[test]
    fn page_numbers_cover_every_page() {
        assert_eq!(page_numbers(2), vec![1, 2]);
        assert_eq!(page_numbers(5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn offset_skips_whole_pages() {
        assert_eq!(offset(1, 3), 0);
        assert_eq!(offset(2, 3), 3);
        assert_eq!(offset(4, 3), 9);
    }

    #[test]
    fn page_param_defaults_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-2")), 1);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        assert_eq!(offset(i64::MAX, PAGE_SIZE), i64::MAX);
        assert_eq!(offset(i64::MAX / 2, PAGE_SIZE), i64::MAX);
        assert!(offset(parse_page(Some("9223372036854775807")), PAGE_SIZE) >= 0);
    }

    #[test]
    fn page_param_accepts_out_of_range_pages() {
        // A page past the end is not an error; the query just comes back empty.
        assert_eq!(parse_page(Some("2")), 2);
        assert_eq!(parse_page(Some("9999")), 9999);
    }
}
