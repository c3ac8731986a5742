//! Integration tests for the search, sort and pagination pipeline.

mod helpers;

use studylib_core::types::{PageRequest, SortDirection, SortKey};
use studylib_entity::folder::NewFolder;
use studylib_entity::material::Material;
use studylib_service::catalog;
use studylib_service::{CatalogQuery, CategoryFilter, ContentsQuery};

fn shelf() -> Vec<Material> {
    vec![
        Material::new("1", "Ownership")
            .with_tags(["rust"])
            .with_category("languages")
            .with_dates("2024-01-03T00:00:00Z", "2024-01-03T00:00:00Z"),
        Material::new("2", "Borrowing")
            .with_tags(["rust"])
            .with_category("languages")
            .with_dates("2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z"),
        Material::new("3", "Flexbox")
            .with_tags(["css", "layout"])
            .with_category("web")
            .with_dates("2024-01-02T00:00:00Z", "2024-01-02T00:00:00Z"),
        Material::new("4", "Lifetimes")
            .with_tags(["rust"])
            .with_dates("not a date", ""),
        Material::new("5", "Grid")
            .with_tags(["CSS"])
            .with_category("Web")
            .with_dates("2024-01-02", "2024-01-02"),
    ]
}

fn titles(items: &[Material]) -> Vec<&str> {
    items.iter().map(|m| m.title.as_str()).collect()
}

#[test]
fn test_same_input_gives_same_page() {
    let query = CatalogQuery::new()
        .with_tag("rust")
        .sorted_by(SortKey::Recent, None);
    let first = catalog::run(shelf(), &query, PageRequest::new(1, 2));
    let second = catalog::run(shelf(), &query, PageRequest::new(1, 2));
    assert_eq!(first, second);
    assert_eq!(titles(&first.items), vec!["Borrowing", "Ownership"]);
    assert_eq!(first.total_items, 3);
    assert_eq!(first.total_pages, 2);
}

#[test]
fn test_unparsable_dates_sort_oldest() {
    let query = CatalogQuery::new().sorted_by(SortKey::CreatedAt, Some(SortDirection::Asc));
    let page = catalog::run(shelf(), &query, PageRequest::new(1, 10));
    assert_eq!(page.items[0].title, "Lifetimes");
    // Equal instants keep input order.
    assert_eq!(
        titles(&page.items[1..]),
        vec!["Borrowing", "Flexbox", "Grid", "Ownership"]
    );
}

#[test]
fn test_tag_and_category_filters_are_case_insensitive() {
    let query = CatalogQuery::new()
        .with_tag("css")
        .with_category(CategoryFilter::parse("web"))
        .sorted_by(SortKey::Title, None);
    let page = catalog::run(shelf(), &query, PageRequest::new(1, 10));
    assert_eq!(titles(&page.items), vec!["Flexbox", "Grid"]);

    let all = CatalogQuery::new().with_category(CategoryFilter::parse("All"));
    assert_eq!(catalog::run(shelf(), &all, PageRequest::new(1, 10)).total_items, 5);
}

#[test]
fn test_out_of_range_pages_clamp() {
    let query = CatalogQuery::new().sorted_by(SortKey::Title, None);

    let low = catalog::run(shelf(), &query, PageRequest::new(0, 2));
    assert_eq!(low.page, 1);
    assert_eq!(titles(&low.items), vec!["Borrowing", "Flexbox"]);

    let high = catalog::run(shelf(), &query, PageRequest::new(3 + 5, 2));
    assert_eq!(high.page, 3);
    assert_eq!(titles(&high.items), vec!["Ownership"]);
    assert!(!high.has_next);
}

#[test]
fn test_folders_sort_by_size() {
    let folders = vec![
        NewFolder::new("a", "Small").with_materials(["m1"]).into_folder(),
        NewFolder::new("b", "Large").with_materials(["m1", "m2", "m3"]).into_folder(),
        NewFolder::new("c", "Medium").with_materials(["m1", "m2"]).into_folder(),
    ];
    let query = CatalogQuery::new().sorted_by(SortKey::Size, None);
    let page = catalog::run(folders, &query, PageRequest::new(1, 10));
    let names: Vec<&str> = page.items.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Large", "Medium", "Small"]);
}

#[tokio::test]
async fn test_folder_view_sorts_by_title() {
    let notes = helpers::web_tree();
    let contents = notes
        .client()
        .get_folder_contents(
            "css",
            &ContentsQuery::new(CatalogQuery::new().sorted_by(SortKey::Title, None))
                .with_page(1, Some(10)),
        )
        .await
        .unwrap();
    assert_eq!(titles(&contents.materials), vec!["Flexbox", "Grid", "Selectors"]);
    assert_eq!(contents.page_size, 10);
    assert_eq!(contents.total_pages, 1);
}
