//! Integration tests for the debounced fan-out search.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use atrium_console::search::{
    Debouncer, SearchOptions, SearchResults, SearchSources, fan_out_search,
};
use atrium_core::{NotificationRecord, ProjectRecord, ServiceRecord, UserRecord};
use atrium_integration_tests::{
    Call, FakeCollaborator, Op, raw_notification, raw_project, raw_service, raw_user,
};

struct Backend {
    users: FakeCollaborator<UserRecord>,
    projects: FakeCollaborator<ProjectRecord>,
    services: FakeCollaborator<ServiceRecord>,
    notifications: FakeCollaborator<NotificationRecord>,
}

impl Backend {
    fn new() -> Self {
        Self {
            users: FakeCollaborator::with_records(vec![
                raw_user(1, "Ada", "ada@studio.io", "admin"),
                raw_user(2, "Grace", "grace@web.dev", "client"),
            ]),
            projects: FakeCollaborator::with_records(vec![
                raw_project(1, "Website", "development", 50),
                raw_project(2, "Mobile app", "pending", 0),
            ]),
            services: FakeCollaborator::with_records(vec![
                raw_service(1, "Web shop", "web", Some("2500")),
                raw_service(2, "SEO audit", "seo", None),
            ]),
            notifications: FakeCollaborator::with_records(vec![
                raw_notification(1, "JS Bug", false),
                raw_notification(2, "CSS Fix", false),
            ]),
        }
    }

    fn sources(
        &self,
    ) -> SearchSources<
        '_,
        FakeCollaborator<UserRecord>,
        FakeCollaborator<ProjectRecord>,
        FakeCollaborator<ServiceRecord>,
        FakeCollaborator<NotificationRecord>,
    > {
        SearchSources::all(
            &self.users,
            &self.projects,
            &self.services,
            &self.notifications,
        )
    }

    fn requests(&self) -> usize {
        self.users.calls().len()
            + self.projects.calls().len()
            + self.services.calls().len()
            + self.notifications.calls().len()
    }
}

#[tokio::test]
async fn test_search_merges_every_entity() {
    let backend = Backend::new();
    let results = fan_out_search("web", &backend.sources(), SearchOptions::default()).await;

    assert_eq!(results.users.len(), 1);
    assert_eq!(results.users[0].email, "grace@web.dev");
    assert_eq!(results.projects.len(), 1);
    assert_eq!(results.services.len(), 1);
    assert!(results.notifications.is_empty());
    assert!(results.failed.is_empty());
    assert_eq!(backend.requests(), 4);
}

#[tokio::test]
async fn test_search_matches_notification_titles() {
    let backend = Backend::new();
    let results = fan_out_search("js", &backend.sources(), SearchOptions::default()).await;

    let titles: Vec<_> = results.notifications.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["JS Bug"]);
}

#[tokio::test]
async fn test_blank_query_sends_no_requests() {
    let backend = Backend::new();
    let results = fan_out_search("   ", &backend.sources(), SearchOptions::default()).await;

    assert_eq!(results, SearchResults::default());
    assert_eq!(backend.requests(), 0);
}

#[tokio::test]
async fn test_one_failure_does_not_sink_the_search() {
    let backend = Backend::new();
    backend.projects.fail(Op::GetAll, 503, "");

    let results = fan_out_search("web", &backend.sources(), SearchOptions::default()).await;
    assert!(results.projects.is_empty());
    assert_eq!(results.failed, vec!["projects"]);
    assert_eq!(results.users.len(), 1);
    assert_eq!(results.services.len(), 1);
}

#[tokio::test]
async fn test_limit_and_skipped_sources() {
    let backend = Backend::new();
    let sources = backend.sources().without_users().without_notifications();

    let results = fan_out_search("a", &sources, SearchOptions { limit: 1 }).await;
    assert!(results.users.is_empty());
    assert_eq!(results.projects.len(), 1);
    assert_eq!(results.services.len(), 1);
    assert_eq!(backend.users.calls(), Vec::<Call>::new());
    assert_eq!(backend.notifications.calls(), Vec::<Call>::new());
}

#[tokio::test(start_paused = true)]
async fn test_debounced_typing_runs_one_search() {
    let backend = Arc::new(Backend::new());
    let latest: Arc<Mutex<Option<SearchResults>>> = Arc::new(Mutex::new(None));
    let debouncer = Debouncer::new(Duration::from_millis(300));

    for query in ["w", "we", "web"] {
        let backend = Arc::clone(&backend);
        let latest = Arc::clone(&latest);
        debouncer.schedule(async move {
            let results =
                fan_out_search(query, &backend.sources(), SearchOptions::default()).await;
            *latest.lock().unwrap() = Some(results);
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    assert_eq!(backend.requests(), 0);
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(backend.requests(), 4);
    let results = latest.lock().unwrap().take().unwrap();
    assert_eq!(results.services[0].name, "Web shop");
}
