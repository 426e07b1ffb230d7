//! Page-range parsing
//!
//! Turns a human-entered range string like "1-3, 5, 8-10" into the set of
//! 0-based page indices it selects.

use std::collections::BTreeSet;

/// Parse a page range string against a document of `total_pages` pages.
///
/// Tokens are comma-separated; each is a single 1-based page number or a
/// `start-end` span. Span bounds clamp to `[1, total_pages]`, and a missing
/// or unparseable span bound defaults to the corresponding document edge
/// (start to 1, end to `total_pages`). Single numbers outside the document
/// are dropped, as are tokens that don't parse at all. A reversed span
/// selects nothing.
///
/// Returns deduplicated, ascending, 0-based indices. An empty result means
/// the input selected no valid pages; callers must treat that as a user
/// error, not as "produce an empty document".
pub fn parse_page_range(range: &str, total_pages: u32) -> Vec<u32> {
    let mut pages = BTreeSet::new();

    if total_pages == 0 {
        return Vec::new();
    }

    for part in range.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if part.contains('-') {
            // Span: only the first two dash-separated segments count
            let mut bounds = part.splitn(3, '-');
            let start = bounds.next().unwrap_or("").trim().parse::<u64>().ok();
            let end = bounds.next().unwrap_or("").trim().parse::<u64>().ok();

            let from = clamp_bound(start, 1, total_pages);
            let to = clamp_bound(end, total_pages, total_pages);

            // from > to selects nothing
            for page in from..=to {
                pages.insert(page - 1);
            }
        } else if let Ok(page) = part.parse::<u32>() {
            if page >= 1 && page <= total_pages {
                pages.insert(page - 1);
            }
        }
    }

    pages.into_iter().collect()
}

/// Clamp a parsed span bound into `[1, total_pages]`. Missing, unparseable,
/// and zero bounds take the `default`; bounds past the end of the document
/// clamp to the last page, however large the number.
fn clamp_bound(value: Option<u64>, default: u32, total_pages: u32) -> u32 {
    match value.filter(|&n| n >= 1) {
        Some(n) => n.min(u64::from(total_pages)) as u32,
        None => default,
    }
}

/// Every page of a `total_pages`-page document, as 0-based indices.
pub fn all_pages(total_pages: u32) -> Vec<u32> {
    (0..total_pages).collect()
}

/// True when the range string means "the whole document": blank or the
/// literal "all" (case-insensitive).
pub fn selects_all(range: &str) -> bool {
    let trimmed = range.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all")
}
