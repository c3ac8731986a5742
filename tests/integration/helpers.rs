//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};

use studylib_core::config::AppConfig;
use studylib_remote::FixtureTransport;
use studylib_service::{NotesClient, StudyLibrary};

/// Path of the folder summary listing.
pub const FOLDERS: &str = "/api/public/folders";

/// Path of one folder's contents.
pub fn contents_path(slug: &str) -> String {
    studylib_service::notes::contents_path(slug)
}

/// Scripted notes service plus the configuration to talk to it.
pub struct TestNotes {
    /// The scripted transport
    pub transport: Arc<FixtureTransport>,
    /// Application config
    pub config: AppConfig,
}

impl TestNotes {
    /// Create a notes service with no routes
    pub fn new() -> Self {
        let config =
            AppConfig::load("tests/fixtures/test_config.toml").expect("Failed to load test config");
        Self {
            transport: Arc::new(FixtureTransport::new()),
            config,
        }
    }

    /// Serve these folder summaries
    pub fn with_folders(self, folders: Value) -> Self {
        self.transport
            .respond(FOLDERS, json!({"success": true, "data": {"folders": folders}}));
        self
    }

    /// Serve these notes for `slug`
    pub fn with_notes(self, slug: &str, notes: Value) -> Self {
        self.transport.respond(
            &contents_path(slug),
            json!({"success": true, "data": {"slug": slug, "notes": notes}}),
        );
        self
    }

    /// A client over the scripted service
    pub fn client(&self) -> NotesClient {
        NotesClient::new(self.transport.clone(), &self.config)
    }

    /// A library session over the scripted service
    pub fn library(&self) -> StudyLibrary {
        StudyLibrary::from_config(self.transport.clone(), &self.config)
    }
}

/// One folder `react-dev` (id 1) holding note 10, "React Hooks".
pub fn react_dev() -> TestNotes {
    TestNotes::new()
        .with_folders(json!([
            {"_id": 1, "parentId": null, "name": "React Dev", "slug": "react-dev", "noteCount": 1}
        ]))
        .with_notes(
            "react-dev",
            json!([
                {"_id": {"$oid": "10"}, "title": "React Hooks", "tags": ["react"],
                 "content": "<p>useState, useEffect</p>",
                 "createdAt": {"$date": "2024-01-01T00:00:00.000Z"}}
            ]),
        )
}

/// Three folders: `web` with children `css` and `react`.
pub fn web_tree() -> TestNotes {
    TestNotes::new()
        .with_folders(json!([
            {"_id": "web", "name": "Web", "slug": "web"},
            {"_id": "css", "name": "CSS", "slug": "css", "parentId": {"$oid": "web"}},
            {"_id": "react", "name": "React", "slug": "react", "parentId": "web"}
        ]))
        .with_notes(
            "web",
            json!([{"_id": "w1", "title": "How the web works", "createdAt": "2024-03-01T00:00:00Z"}]),
        )
        .with_notes(
            "css",
            json!([
                {"_id": "c1", "title": "Flexbox", "tags": ["layout"], "createdAt": "2024-01-01T00:00:00Z"},
                {"_id": "c2", "title": "Grid", "tags": ["layout"], "createdAt": "2024-02-01T00:00:00Z"},
                {"_id": "c3", "title": "Selectors", "createdAt": "2024-03-01T00:00:00Z"}
            ]),
        )
        .with_notes(
            "react",
            json!([{"_id": "r1", "title": "Hooks", "tags": ["react"], "createdAt": "2024-04-01T00:00:00Z"}]),
        )
}
