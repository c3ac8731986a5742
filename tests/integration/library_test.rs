//! Integration tests for folder contents, fallback, and stale responses.

mod helpers;

use std::time::Duration;

use serde_json::json;

use studylib_core::error::ErrorKind;
use studylib_core::types::{FolderId, MaterialId};
use studylib_entity::material::MaterialOrigin;
use studylib_service::{ApplyOutcome, CatalogQuery, ContentsQuery};

fn search(term: &str) -> ContentsQuery {
    ContentsQuery::new(CatalogQuery::new().with_search(term))
}

#[tokio::test]
async fn test_search_hits_single_note() {
    let notes = helpers::react_dev();
    let contents = notes
        .client()
        .get_folder_contents("react-dev", &search("hooks"))
        .await
        .unwrap();

    assert_eq!(contents.folder.id, FolderId::from("1"));
    assert_eq!(contents.total, 1);
    assert_eq!(contents.materials.len(), 1);
    assert_eq!(contents.materials[0].title, "React Hooks");
    assert_eq!(contents.materials[0].id, MaterialId::from("10"));
    assert_eq!(contents.materials[0].created_at, "2024-01-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_search_miss_has_zero_pages() {
    let notes = helpers::react_dev();
    let contents = notes
        .client()
        .get_folder_contents("react-dev", &search("zzz"))
        .await
        .unwrap();

    assert!(contents.materials.is_empty());
    assert_eq!(contents.total, 0);
    assert_eq!(contents.total_pages, 0);
}

#[tokio::test]
async fn test_network_failure_serves_synthetic_notes() {
    let notes = helpers::react_dev();
    notes.transport.fail(
        &helpers::contents_path("react-dev"),
        ErrorKind::Network,
        "connection refused",
    );

    let contents = notes
        .client()
        .get_folder_contents("react-dev", &ContentsQuery::default())
        .await
        .unwrap();

    assert!(contents.degraded);
    assert_eq!(contents.total, 3);
    for material in &contents.materials {
        assert_eq!(material.origin, MaterialOrigin::Synthetic);
        assert!(!material.title.is_empty());
        assert!(!material.content.is_empty());
        assert!(material.id.as_str().starts_with("synthetic-react-dev-"));
    }
}

#[tokio::test]
async fn test_folder_list_failure_is_fatal() {
    let notes = helpers::TestNotes::new();
    notes
        .transport
        .fail(helpers::FOLDERS, ErrorKind::Network, "connection refused");

    let err = notes
        .client()
        .get_folder_contents("react-dev", &ContentsQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let err = helpers::react_dev()
        .client()
        .get_folder_contents("vue", &ContentsQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_configured_page_size_applies() {
    let notes = helpers::web_tree();
    let mut library = notes.library();
    library.open("css").await.unwrap();

    let first = library.view(&ContentsQuery::default()).unwrap().unwrap();
    assert_eq!(first.page_size, 2);
    assert_eq!(first.total_pages, 2);
    // Most recent first.
    assert_eq!(first.materials[0].title, "Selectors");

    let last = library
        .view(&ContentsQuery::default().with_page(7, None))
        .unwrap()
        .unwrap();
    assert_eq!(last.page, 2);
    assert_eq!(last.materials[0].title, "Flexbox");
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_response_is_discarded() {
    let notes = helpers::react_dev();
    let path = helpers::contents_path("react-dev");
    let mut library = notes.library();
    library.refresh_folders().await.unwrap();

    // The first request is slow and will answer with the old notes.
    notes.transport.delay(&path, Duration::from_millis(300));
    let first = library.select_folder("react-dev").unwrap();
    let slow = tokio::spawn(library.fetch(&first));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(notes.transport.request_count(&path), 1);

    // The second request is fast and sees newer notes.
    notes.transport.delay(&path, Duration::ZERO).respond(
        &path,
        json!({"success": true, "data": {"notes": [
            {"_id": "10", "title": "React Hooks (revised)", "createdAt": "2024-06-01T00:00:00Z"}
        ]}}),
    );
    let second = library.select_folder("react-dev").unwrap();
    let fresh = library.fetch(&second).await;
    assert_eq!(library.apply(&second, fresh).unwrap(), ApplyOutcome::Applied);

    let late = slow.await.unwrap();
    assert_eq!(library.apply(&first, late).unwrap(), ApplyOutcome::Stale);

    let view = library.view(&ContentsQuery::default()).unwrap().unwrap();
    assert_eq!(view.materials[0].title, "React Hooks (revised)");
}

#[tokio::test]
async fn test_concurrent_fetches_for_different_folders() {
    let notes = helpers::web_tree();
    let mut library = notes.library();
    library.refresh_folders().await.unwrap();

    let css = library.select_folder("css").unwrap();
    let react = library.select_folder("react").unwrap();
    let (css_result, react_result) = tokio::join!(library.fetch(&css), library.fetch(&react));

    // Navigating to react cancelled the css fetch.
    assert_eq!(library.apply(&css, css_result).unwrap(), ApplyOutcome::Stale);
    assert_eq!(library.apply(&react, react_result).unwrap(), ApplyOutcome::Applied);
    assert_eq!(library.current_folder().unwrap().slug, "react");
}

#[tokio::test]
async fn test_delete_material_detaches_from_every_folder() {
    let notes = helpers::web_tree();
    let mut library = notes.library();
    for slug in ["web", "css", "react"] {
        library.open(slug).await.unwrap();
    }

    library.delete_material(&MaterialId::from("c2")).unwrap();

    for folder in library.corpus().folders() {
        let materials = library.corpus().get_folder_materials(&folder.id).unwrap();
        assert!(materials.iter().all(|m| m.id.as_str() != "c2"));
    }
    assert!(library.corpus().get_material(&MaterialId::from("c2")).is_none());
}

#[tokio::test]
async fn test_delete_folder_reparents_and_forgets() {
    let notes = helpers::web_tree();
    let mut library = notes.library();
    library.open("web").await.unwrap();
    library.open("css").await.unwrap();

    let deleted = library.delete_folder(&FolderId::from("web")).unwrap();
    assert_eq!(
        deleted.reparented,
        vec![FolderId::from("css"), FolderId::from("react")]
    );
    assert!(
        library
            .corpus()
            .folders()
            .all(|f| f.parent_id.is_none())
    );
    assert!(
        library
            .history()
            .entries()
            .iter()
            .all(|e| e.as_ref() != Some(&FolderId::from("web")))
    );
    assert_eq!(library.current_folder().unwrap().slug, "css");
}
