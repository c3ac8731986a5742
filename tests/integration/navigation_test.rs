//! Integration tests for history and back/forward fetch tickets.

mod helpers;

use studylib_core::types::FolderId;
use studylib_service::{ApplyOutcome, ContentsQuery, NavigationHistory};

fn id(s: &str) -> Option<FolderId> {
    Some(FolderId::from(s))
}

#[test]
fn test_selecting_after_back_truncates_forward_entries() {
    let mut history = NavigationHistory::new();
    history.select(id("a"));
    history.select(id("b"));
    assert!(history.back());
    history.select(id("c"));

    assert_eq!(history.entries(), &[None, id("a"), id("c")]);
    assert_eq!(history.cursor(), 2);
    assert!(!history.can_go_forward());
}

#[test]
fn test_back_and_forward_are_bounded() {
    let mut history = NavigationHistory::new();
    assert!(!history.back());
    assert!(!history.forward());

    history.select(id("a"));
    assert!(history.back());
    assert_eq!(history.current(), None);
    assert!(!history.back());
    assert!(history.forward());
    assert_eq!(history.current(), Some(&FolderId::from("a")));
    assert!(!history.forward());
}

#[test]
fn test_forget_keeps_history_consistent() {
    let mut history = NavigationHistory::new();
    for s in ["a", "b", "a", "c"] {
        history.select(id(s));
    }
    history.forget(&FolderId::from("a"));

    assert!(history.entries().iter().all(|e| e != &id("a")));
    assert!(history.cursor() < history.entries().len());
    assert_eq!(history.current(), Some(&FolderId::from("c")));
}

#[tokio::test]
async fn test_library_back_and_forward_issue_tickets() {
    let notes = helpers::web_tree();
    let mut library = notes.library();
    library.open("css").await.unwrap();
    library.open("react").await.unwrap();

    let ticket = library.back().expect("css ticket");
    assert_eq!(ticket.slug(), "css");
    assert_eq!(library.current_folder().unwrap().slug, "css");
    let result = library.fetch(&ticket).await;
    assert_eq!(library.apply(&ticket, result).unwrap(), ApplyOutcome::Applied);

    // Back to the root: nothing to fetch.
    assert!(library.back().is_none());
    assert!(library.current_folder().is_none());
    assert!(library.view(&ContentsQuery::default()).unwrap().is_none());
    assert!(library.back().is_none());

    let ticket = library.forward().expect("css ticket");
    assert_eq!(ticket.slug(), "css");
    let ticket = library.forward().expect("react ticket");
    assert_eq!(ticket.slug(), "react");
    assert!(library.forward().is_none());
}

#[tokio::test]
async fn test_navigating_away_makes_fetch_stale() {
    let notes = helpers::web_tree();
    let mut library = notes.library();
    library.refresh_folders().await.unwrap();

    let ticket = library.select_folder("css").unwrap();
    let result = library.fetch(&ticket).await;
    library.select_root();

    assert_eq!(library.apply(&ticket, result).unwrap(), ApplyOutcome::Stale);
    assert!(library.corpus().get_folder_materials(&FolderId::from("css")).unwrap().is_empty());
}

#[tokio::test]
async fn test_breadcrumbs_follow_selection() {
    let notes = helpers::web_tree();
    let mut library = notes.library();
    library.open("react").await.unwrap();

    let trail: Vec<&str> = library.breadcrumbs().iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(trail, vec!["web", "react"]);

    library.select_root();
    assert!(library.breadcrumbs().is_empty());
    let roots: Vec<&str> = library.subfolders().iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(roots, vec!["web"]);
}

#[tokio::test]
async fn test_unknown_slug_leaves_history_untouched() {
    let notes = helpers::web_tree();
    let mut library = notes.library();
    library.refresh_folders().await.unwrap();

    let err = library.select_folder("vue").unwrap_err();
    assert_eq!(err.kind, studylib_core::error::ErrorKind::NotFound);
    assert_eq!(library.history().entries(), &[None]);
}
