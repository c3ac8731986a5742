//! Integration tests for configuration loading.

mod helpers;

use studylib_core::config::AppConfig;
use studylib_core::config::library::DeletePolicy;
use studylib_core::error::ErrorKind;
use studylib_service::ContentsQuery;

use helpers::TestNotes;

#[test]
fn test_fixture_config_loads() {
    let config = AppConfig::load("tests/fixtures/test_config.toml").unwrap();
    assert_eq!(config.api.base_url, "http://notes.test");
    assert_eq!(config.api.username, "ada");
    assert_eq!(config.api.request_timeout_ms, 2000);
    assert_eq!(config.api.fetch_limit, 200);
    assert_eq!(config.library.page_size, 2);
    assert_eq!(config.library.synthetic_count, 3);
    assert_eq!(config.library.delete_policy, DeletePolicy::Reparent);
    assert_eq!(config.logging.format, "pretty");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(
        &path,
        r#"
[library]
delete_policy = "refuse"
summary_cache_ttl_seconds = 30
"#,
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.library.delete_policy, DeletePolicy::Refuse);
    assert_eq!(config.library.summary_cache_ttl_seconds, 30);
    assert_eq!(config.library.page_size, 12);
    assert_eq!(config.library.synthetic_count, 3);
}

#[test]
fn test_invalid_value_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[library]\ndelete_policy = \"shred\"\n").unwrap();

    let err = AppConfig::load(&path).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[tokio::test]
async fn test_zero_synthetic_count_still_fills_failed_folder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.toml");
    std::fs::write(&path, "[library]\nsynthetic_count = 0\n").unwrap();

    let notes = TestNotes {
        config: AppConfig::load(&path).unwrap(),
        ..helpers::react_dev()
    };
    assert_eq!(notes.config.library.synthetic_count, 0);
    notes
        .transport
        .fail(&helpers::contents_path("react-dev"), ErrorKind::Network, "down");

    let contents = notes
        .client()
        .get_folder_contents("react-dev", &ContentsQuery::default())
        .await
        .unwrap();
    assert!(contents.degraded);
    assert!(!contents.materials.is_empty());
}

#[tokio::test]
async fn test_refuse_policy_blocks_parent_delete() {
    let mut notes = helpers::web_tree();
    notes.config.library.delete_policy = DeletePolicy::Refuse;
    let mut library = notes.library();
    library.refresh_folders().await.unwrap();

    let web = library.corpus().get_folder_by_slug("web").unwrap().id.clone();
    let err = library.delete_folder(&web).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(library.corpus().folder_count(), 3);
}

#[tokio::test]
async fn test_summary_cache_skips_second_listing() {
    let mut notes = helpers::react_dev();
    notes.config.library.summary_cache_ttl_seconds = 60;
    let client = notes.client();

    client.list_folders().await.unwrap();
    client.list_folders().await.unwrap();
    assert_eq!(notes.transport.request_count(helpers::FOLDERS), 1);

    client.invalidate_summaries().await;
    client.list_folders().await.unwrap();
    assert_eq!(notes.transport.request_count(helpers::FOLDERS), 2);
}
