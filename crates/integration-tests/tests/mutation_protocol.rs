//! Integration tests for create/update round-trips.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use atrium_console::components::data_table::projects_table_config;
use atrium_console::list::ListController;
use atrium_console::mutation::{
    FormController, FormState, NotificationForm, ProjectForm, ServiceForm, SubmitOutcome,
    UserForm, send_notification,
};
use atrium_core::{
    NotificationRecord, ProjectId, ProjectRecord, ProjectStatus, ServiceRecord, UserRecord,
    UserRole,
};
use atrium_integration_tests::{Call, FakeCollaborator, Op, raw_project};
use serde_json::{Value, json};

const REDIRECT: Duration = Duration::from_millis(1500);

fn website() -> ProjectForm {
    ProjectForm {
        title: "Website".to_string(),
        description: "New site".to_string(),
        service_id: "1".to_string(),
        client_id: "2".to_string(),
        progress: "0".to_string(),
        ..ProjectForm::default()
    }
}

fn created_payloads<R: atrium_console::api::Resource>(fake: &FakeCollaborator<R>) -> Vec<Value> {
    fake.calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Create(payload) => Some(payload),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_project_sends_integer_ids_and_omits_blanks() {
    let fake = FakeCollaborator::<ProjectRecord>::empty();
    let controller = FormController::create(fake.clone(), REDIRECT);

    let outcome = controller.submit(&website()).await;
    let record = outcome.record().unwrap();
    assert_eq!(record.title, "Website");
    assert_eq!(record.status, ProjectStatus::Pending);
    assert!(matches!(
        outcome,
        SubmitOutcome::Saved { redirect_after, .. } if redirect_after == REDIRECT
    ));

    let payloads = created_payloads(&fake);
    assert_eq!(payloads.len(), 1);
    let payload = payloads[0].as_object().unwrap();
    assert_eq!(payload["serviceId"], json!(1));
    assert_eq!(payload["clientId"], json!(2));
    assert!(payload["serviceId"].is_i64());
    assert!(!payload.contains_key("controllerId"));
    assert!(!payload.contains_key("amount"));
    assert!(!payload.contains_key("amountDescription"));

    assert_eq!(
        controller.state(),
        FormState::Succeeded {
            redirect_after: REDIRECT
        }
    );
}

#[tokio::test]
async fn test_validation_error_never_reaches_backend() {
    let fake = FakeCollaborator::<ProjectRecord>::empty();
    let controller = FormController::create(fake.clone(), REDIRECT);
    let form = ProjectForm {
        progress: "140".to_string(),
        ..website()
    };

    let SubmitOutcome::Rejected(banner) = controller.submit(&form).await else {
        panic!("expected a rejection");
    };
    assert_eq!(banner.message, "Progress must be between 0 and 100");
    assert!(fake.calls().is_empty());

    // The form is untouched and can be fixed and resubmitted.
    assert_eq!(form.title, "Website");
    controller.dismiss_error();
    assert_eq!(controller.state(), FormState::Idle);
    let fixed = ProjectForm {
        progress: "40".to_string(),
        ..form
    };
    assert!(controller.submit(&fixed).await.record().is_some());
}

#[tokio::test]
async fn test_backend_error_surfaces_server_message() {
    let fake = FakeCollaborator::<UserRecord>::empty();
    fake.fail(Op::Create, 422, r#"{"message":"Email already registered"}"#);
    let controller = FormController::create(fake, REDIRECT);
    let form = UserForm {
        email: "ada@studio.io".to_string(),
        password: "correct horse".to_string(),
        ..UserForm::default()
    };

    let outcome = controller.submit(&form).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(atrium_console::error::ErrorBanner {
            message: "Email already registered".to_string()
        })
    );
    assert_eq!(
        controller.state().banner().unwrap().message,
        "Email already registered"
    );
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_submit_is_ignored_while_in_flight() {
    let fake = FakeCollaborator::<ServiceRecord>::empty();
    fake.set_delay(Duration::from_millis(200));
    let controller = FormController::create(fake.clone(), REDIRECT);
    let form = ServiceForm {
        name: "Landing page".to_string(),
        category: "web".to_string(),
        price: "499".to_string(),
        ..ServiceForm::default()
    };

    let (first, second) = tokio::join!(controller.submit(&form), controller.submit(&form));
    assert!(first.record().is_some());
    assert_eq!(second, SubmitOutcome::Ignored);
    assert_eq!(created_payloads(&fake).len(), 1);

    // Once settled, the form accepts another submit.
    assert!(controller.submit(&form).await.record().is_some());
    assert_eq!(created_payloads(&fake).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_redirect_waits_for_configured_delay() {
    let fake = FakeCollaborator::<ProjectRecord>::empty();
    let controller = FormController::create(fake, REDIRECT);

    let started = tokio::time::Instant::now();
    let record = controller.submit(&website()).await.wait_for_redirect().await;
    assert!(record.is_some());
    assert!(started.elapsed() >= REDIRECT);
}

// ============================================================================
// Update
// ============================================================================

fn existing() -> FakeCollaborator<ProjectRecord> {
    let mut project = raw_project(42, "Website", "planning", 10);
    project["amount"] = json!("1200.00");
    project["controllerId"] = json!(9);
    FakeCollaborator::with_records(vec![project])
}

#[tokio::test]
async fn test_controller_edit_sends_only_editable_fields() {
    let fake = existing();
    let controller = FormController::edit(
        fake.clone(),
        REDIRECT,
        ProjectId::new(42),
        UserRole::Controller,
    );

    let form: ProjectForm = controller.load().await.unwrap();
    assert_eq!(form.title, "Website");
    assert_eq!(form.controller_id, "9");
    assert_eq!(form.amount, "1200");

    let form = ProjectForm {
        status: "testing".to_string(),
        progress: "80".to_string(),
        client_id: "77".to_string(),
        ..form
    };
    let outcome = controller.submit(&form).await;
    let saved = outcome.record().unwrap().clone();
    assert_eq!(saved.status, ProjectStatus::Testing);
    assert_eq!(saved.progress, 80);
    assert_eq!(saved.client_id.as_i64(), 2);

    let update = fake
        .calls()
        .into_iter()
        .find_map(|c| match c {
            Call::Update(id, payload) => Some((id, payload)),
            _ => None,
        })
        .unwrap();
    assert_eq!(update.0, "42");
    let keys: Vec<&str> = update.1.as_object().unwrap().keys().map(String::as_str).collect();
    assert!(!keys.contains(&"clientId"));
    assert!(!keys.contains(&"serviceId"));
    assert!(!keys.contains(&"title"));
    assert!(keys.contains(&"status"));
    assert!(keys.contains(&"progress"));

    // The list shows the saved record without a refetch.
    let mut list = ListController::new(fake.clone(), projects_table_config(), 10);
    list.load().await;
    list.apply_saved(saved);
    assert_eq!(list.state().records()[0].status, ProjectStatus::Testing);
}

#[tokio::test]
async fn test_edit_without_response_body_refetches_record() {
    let fake = existing();
    fake.answer_writes_without_body();
    let controller =
        FormController::edit(fake.clone(), REDIRECT, ProjectId::new(42), UserRole::Admin);
    let mut list = ListController::new(fake.clone(), projects_table_config(), 10);
    list.load().await;

    let form: ProjectForm = controller.load().await.unwrap();
    let form = ProjectForm {
        status: "development".to_string(),
        ..form
    };
    let outcome = controller.submit(&form).await;
    let saved = outcome.record().unwrap();
    assert_eq!(saved.id, ProjectId::new(42));
    assert_eq!(saved.title, "Website");
    assert_eq!(saved.status, ProjectStatus::Development);
    assert_eq!(fake.count(|c| matches!(c, Call::GetById(id) if id == "42")), 2);

    list.apply_outcome(outcome).await;
    let rows: Vec<_> = list
        .state()
        .records()
        .iter()
        .map(|p| (p.id.as_i64(), p.status.clone()))
        .collect();
    assert_eq!(rows, vec![(42, ProjectStatus::Development)]);
}

#[tokio::test]
async fn test_create_without_response_body_reloads_instead_of_upserting() {
    let fake = FakeCollaborator::<ProjectRecord>::empty();
    fake.answer_writes_without_body();
    let controller = FormController::create(fake.clone(), REDIRECT);
    let mut list = ListController::new(fake.clone(), projects_table_config(), 10);
    list.load().await;

    let outcome = controller.submit(&website()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Accepted {
            redirect_after: REDIRECT
        }
    );
    assert!(outcome.is_success());
    assert!(outcome.record().is_none());
    assert_eq!(
        controller.state(),
        FormState::Succeeded {
            redirect_after: REDIRECT
        }
    );

    list.apply_outcome(outcome).await;
    let records = list.state().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Website");
    assert_ne!(records[0].id, ProjectId::new(0));
}

#[tokio::test]
async fn test_client_edit_is_forbidden_locally() {
    let fake = existing();
    let controller = FormController::edit(fake.clone(), REDIRECT, ProjectId::new(42), UserRole::Client);
    let form: ProjectForm = controller.load().await.unwrap();

    let SubmitOutcome::Rejected(banner) = controller.submit(&form).await else {
        panic!("expected a rejection");
    };
    assert_eq!(
        banner.message,
        "You do not have permission to edit this record"
    );
    assert_eq!(fake.count(|c| matches!(c, Call::Update(..))), 0);
}

#[tokio::test]
async fn test_edit_load_failure_names_the_record() {
    let fake = existing();
    let controller = FormController::edit(fake, REDIRECT, ProjectId::new(7), UserRole::Admin);

    let banner = controller.load::<ProjectForm>().await.unwrap_err();
    assert_eq!(banner.message, "project 7 not found");
}

// ============================================================================
// Notifications
// ============================================================================

#[tokio::test]
async fn test_send_notification_through_inbox() {
    let fake = FakeCollaborator::<NotificationRecord>::empty();
    let form = NotificationForm {
        user_id: "2".to_string(),
        title: "Kickoff".to_string(),
        message: "Meeting at 10".to_string(),
        kind: "reminder".to_string(),
    };

    let record = send_notification(&fake, &form).await.unwrap();
    assert_eq!(record.user_id.as_i64(), 2);
    assert!(!record.is_read);
    assert_eq!(
        fake.calls(),
        vec![Call::Send(json!({
            "userId": 2,
            "title": "Kickoff",
            "message": "Meeting at 10",
            "type": "reminder"
        }))]
    );

    let blank = NotificationForm::default();
    let banner = send_notification(&fake, &blank).await.unwrap_err();
    assert_eq!(banner.message, "Recipient is required");
    assert_eq!(fake.calls().len(), 1);
}
