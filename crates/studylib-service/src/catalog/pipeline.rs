//! Filter, sort and paginate over any [`Catalogued`] listing.
//!
//! All functions are pure. `run` always applies the three stages in the
//! same order, so identical input and parameters give identical pages.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate};

use studylib_core::types::{PageRequest, PageResponse, SortDirection, SortKey};
use studylib_entity::Catalogued;

use super::query::CatalogQuery;

/// Keep the items matching the search term, tag set and category.
pub fn filter<T: Catalogued>(items: Vec<T>, query: &CatalogQuery) -> Vec<T> {
    let needle = query.search.trim().to_lowercase();
    let wanted: Vec<String> = query.tags.iter().map(|t| t.to_lowercase()).collect();

    items
        .into_iter()
        .filter(|item| matches_search(item, &needle))
        .filter(|item| {
            wanted.is_empty()
                || item
                    .tags()
                    .iter()
                    .any(|t| wanted.contains(&t.to_lowercase()))
        })
        .filter(|item| query.category.matches(item.category()))
        .collect()
}

/// Stable sort. Equal keys keep their input order in both directions.
pub fn sort<T: Catalogued>(items: &mut [T], key: SortKey, direction: SortDirection) {
    match direction {
        SortDirection::Asc => items.sort_by_cached_key(|item| sort_value(item, key)),
        SortDirection::Desc => items.sort_by_cached_key(|item| Reverse(sort_value(item, key))),
    }
}

/// Cut one page. Out-of-range pages clamp to the nearest valid page.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let request = request.clamp_to(total);
    let page: Vec<T> = items
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.limit() as usize)
        .collect();
    PageResponse::new(page, request.page, request.page_size, total)
}

/// Filter, then sort, then paginate.
pub fn run<T: Catalogued>(
    items: Vec<T>,
    query: &CatalogQuery,
    request: PageRequest,
) -> PageResponse<T> {
    let mut kept = filter(items, query);
    sort(&mut kept, query.sort_by, query.direction());
    paginate(kept, request)
}

fn matches_search<T: Catalogued>(item: &T, needle: &str) -> bool {
    needle.is_empty()
        || item.title().to_lowercase().contains(needle)
        || item.description().to_lowercase().contains(needle)
        || item.tags().iter().any(|t| t.to_lowercase().contains(needle))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    // `None` (unparsable) orders before every real instant.
    Instant(Option<i64>),
    Size(u64),
}

fn sort_value<T: Catalogued>(item: &T, key: SortKey) -> SortValue {
    match key {
        SortKey::Title => SortValue::Text(item.title().to_lowercase()),
        SortKey::CreatedAt => SortValue::Instant(parse_instant(item.created_at())),
        SortKey::LastEditedAt => SortValue::Instant(parse_instant(item.last_edited_at())),
        SortKey::Recent => SortValue::Instant(
            parse_instant(item.last_edited_at()).or_else(|| parse_instant(item.created_at())),
        ),
        SortKey::Size => SortValue::Size(item.size()),
    }
}

/// Milliseconds since the epoch for an RFC 3339 timestamp or a bare
/// `YYYY-MM-DD` date.
pub(crate) fn parse_instant(raw: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use studylib_entity::material::Material;

    fn material(id: &str, title: &str, created: &str, edited: &str) -> Material {
        Material::new(id, title).with_dates(created, edited)
    }

    fn sample() -> Vec<Material> {
        vec![
            material("1", "React Hooks", "2024-01-01T00:00:00Z", "2024-03-01T00:00:00Z")
                .with_tags(["react", "frontend"])
                .with_category("Frontend")
                .with_content("<p>long long long</p>"),
            material("2", "Rust Ownership", "2024-02-01T00:00:00Z", "2024-02-01T00:00:00Z")
                .with_tags(["rust"])
                .with_category("Systems")
                .with_content("<p>x</p>"),
            material("3", "CSS Grid", "garbage", "")
                .with_tags(["css", "frontend"])
                .with_description("Layout with hooks-free CSS"),
            material("4", "async rust", "2024-02-01T00:00:00Z", "2024-02-01T00:00:00Z")
                .with_tags(["Rust"]),
        ]
    }

    fn ids(items: &[Material]) -> Vec<&str> {
        items.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_search_matches_title_description_and_tags() {
        let q = CatalogQuery::new().with_search("HOOKS");
        assert_eq!(ids(&filter(sample(), &q)), vec!["1", "3"]);

        let q = CatalogQuery::new().with_search("rust");
        assert_eq!(ids(&filter(sample(), &q)), vec!["2", "4"]);

        let q = CatalogQuery::new().with_search("   ");
        assert_eq!(filter(sample(), &q).len(), 4);
    }

    #[test]
    fn test_tag_and_category_filters() {
        let q = CatalogQuery::new().with_tag("frontend").with_tag("rust");
        assert_eq!(ids(&filter(sample(), &q)), vec!["1", "2", "3", "4"]);

        let q = CatalogQuery::new()
            .with_tag("frontend")
            .with_category(crate::catalog::CategoryFilter::parse("frontend"));
        assert_eq!(ids(&filter(sample(), &q)), vec!["1"]);
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let mut items = sample();
        sort(&mut items, SortKey::Title, SortDirection::Asc);
        assert_eq!(ids(&items), vec!["4", "3", "1", "2"]);
    }

    #[test]
    fn test_sort_ties_keep_input_order_both_ways() {
        let mut items = sample();
        sort(&mut items, SortKey::CreatedAt, SortDirection::Asc);
        // "garbage" sorts as oldest; 2 and 4 tie.
        assert_eq!(ids(&items), vec!["3", "1", "2", "4"]);

        let mut items = sample();
        sort(&mut items, SortKey::CreatedAt, SortDirection::Desc);
        assert_eq!(ids(&items), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_recent_falls_back_to_created() {
        let mut items = vec![
            material("a", "A", "2024-05-01", ""),
            material("b", "B", "2020-01-01", "2024-04-01T00:00:00Z"),
        ];
        sort(&mut items, SortKey::Recent, SortDirection::Desc);
        assert_eq!(ids(&items), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_by_size() {
        let mut items = sample();
        sort(&mut items, SortKey::Size, SortDirection::Desc);
        assert_eq!(ids(&items)[0], "1");
    }

    #[test]
    fn test_run_is_deterministic() {
        let q = CatalogQuery::new().sorted_by(SortKey::LastEditedAt, None);
        let first = run(sample(), &q, PageRequest::new(1, 2));
        let second = run(sample(), &q, PageRequest::new(1, 2));
        assert_eq!(first, second);
        assert_eq!(first.total_items, 4);
        assert_eq!(first.total_pages, 2);
    }

    #[test]
    fn test_pages_clamp() {
        let q = CatalogQuery::new();
        let low = run(sample(), &q, PageRequest::new(0, 3));
        assert_eq!(low.page, 1);
        assert_eq!(low.items.len(), 3);

        let high = run(sample(), &q, PageRequest::new(2 + 5, 3));
        assert_eq!(high.page, 2);
        assert_eq!(high.items.len(), 1);
        assert!(!high.has_next);
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let q = CatalogQuery::new().with_search("zzz");
        let page = run(sample(), &q, PageRequest::new(3, 12));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_parse_instant() {
        assert_eq!(parse_instant("1970-01-01T00:00:01.000Z"), Some(1000));
        assert_eq!(parse_instant("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_instant("yesterday"), None);
    }
}
