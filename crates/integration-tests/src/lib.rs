//! Integration tests for Atrium.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory scenarios
//! cargo test -p atrium-integration-tests
//!
//! # Against a running backend (reads ATRIUM_API_BASE_URL / ATRIUM_API_TOKEN)
//! cargo test -p atrium-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `list_pipeline` - loading, filtering, sorting, summaries, deletes
//! - `mutation_protocol` - create/update payloads and submit state
//! - `search_fanout` - concurrent search with partial failures
//! - `live_backend` - the real REST collaborators
//!
//! [`FakeCollaborator`] stands in for the backend: it keeps records as raw
//! JSON, records every call, and can be told to fail or to stall.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use atrium_console::api::{Collaborator, Inbox, RecordId, Resource};
use atrium_console::error::ApiError;
use atrium_core::NotificationRecord;
use serde_json::{Map, Value, json};

/// A collaborator operation, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
    /// Every inbox endpoint.
    Inbox,
}

/// One recorded call. Ids are recorded as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetAll,
    GetById(String),
    Create(Value),
    Update(String, Value),
    Delete(String),
    GetMine,
    MarkRead(String),
    MarkAllRead,
    DeleteMine(String),
    Send(Value),
}

struct Failure {
    status: u16,
    body: String,
}

struct FakeState {
    records: Vec<Value>,
    calls: Vec<Call>,
    failures: HashMap<Op, Failure>,
    bodiless_writes: bool,
}

struct FakeInner<R> {
    state: Mutex<FakeState>,
    next_id: AtomicI64,
    delay: Mutex<Option<Duration>>,
    _record: PhantomData<fn() -> R>,
}

/// In-memory backend for one collection.
pub struct FakeCollaborator<R> {
    inner: Arc<FakeInner<R>>,
}

impl<R> Clone for FakeCollaborator<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> std::fmt::Debug for FakeCollaborator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeCollaborator")
            .field("path", &R::PATH)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> FakeCollaborator<R> {
    /// A backend holding `records`. New ids continue after the largest one.
    #[must_use]
    pub fn with_records(records: Vec<Value>) -> Self {
        let max_id = records
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0);
        Self {
            inner: Arc::new(FakeInner {
                state: Mutex::new(FakeState {
                    records,
                    calls: Vec::new(),
                    failures: HashMap::new(),
                    bodiless_writes: false,
                }),
                next_id: AtomicI64::new(max_id + 1),
                delay: Mutex::new(None),
                _record: PhantomData,
            }),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::with_records(Vec::new())
    }

    /// Make `op` fail with an HTTP `status` and response `body`.
    pub fn fail(&self, op: Op, status: u16, body: &str) {
        self.state().failures.insert(
            op,
            Failure {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn recover(&self, op: Op) {
        self.state().failures.remove(&op);
    }

    /// Answer creates and updates with an empty body, as a `204` would.
    /// The write itself still happens.
    pub fn answer_writes_without_body(&self) {
        self.state().bodiless_writes = true;
    }

    /// Stall every call for `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self
            .inner
            .delay
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(delay);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| predicate(c)).count()
    }

    #[must_use]
    pub fn records(&self) -> Vec<Value> {
        self.state().records.clone()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn pause(&self) {
        let delay = *self
            .inner
            .delay
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// Record `call` and return the injected failure for `op`, if any.
    fn enter(&self, op: Op, call: Call) -> Result<(), ApiError> {
        let mut state = self.state();
        state.calls.push(call);
        match state.failures.get(&op) {
            Some(failure) => Err(ApiError::Api {
                status: failure.status,
                body: failure.body.clone(),
            }),
            None => Ok(()),
        }
    }

    fn position(records: &[Value], id: &str) -> Option<usize> {
        records
            .iter()
            .position(|r| r.get("id").is_some_and(|v| v.to_string() == id))
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::NotFound {
            body: json!({ "error": format!("{} {id} not found", R::NOUN), "code": "NOT_FOUND" })
                .to_string(),
        }
    }
}

fn merge(target: &mut Value, patch: Value) {
    if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
        for (key, value) in patch {
            target.insert(key, value);
        }
    }
}

impl<R: Resource> Collaborator for FakeCollaborator<R> {
    type Record = R;

    async fn get_all(&self) -> Result<Vec<Value>, ApiError> {
        self.pause().await;
        self.enter(Op::GetAll, Call::GetAll)?;
        Ok(self.records())
    }

    async fn get_by_id(&self, id: RecordId<Self>) -> Result<Value, ApiError> {
        self.pause().await;
        let id = id.to_string();
        self.enter(Op::GetById, Call::GetById(id.clone()))?;
        let state = self.state();
        Self::position(&state.records, &id)
            .and_then(|i| state.records.get(i).cloned())
            .ok_or_else(|| Self::not_found(&id))
    }

    async fn create(&self, payload: Value) -> Result<Value, ApiError> {
        self.pause().await;
        self.enter(Op::Create, Call::Create(payload.clone()))?;
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let mut record = Value::Object(Map::new());
        merge(&mut record, payload);
        merge(&mut record, json!({ "id": id }));
        let mut state = self.state();
        state.records.push(record.clone());
        Ok(if state.bodiless_writes { Value::Null } else { record })
    }

    async fn update(&self, id: RecordId<Self>, payload: Value) -> Result<Value, ApiError> {
        self.pause().await;
        let id = id.to_string();
        self.enter(Op::Update, Call::Update(id.clone(), payload.clone()))?;
        let mut state = self.state();
        let record = Self::position(&state.records, &id)
            .and_then(|i| state.records.get_mut(i))
            .ok_or_else(|| Self::not_found(&id))?;
        merge(record, payload);
        let saved = record.clone();
        Ok(if state.bodiless_writes { Value::Null } else { saved })
    }

    async fn delete(&self, id: RecordId<Self>) -> Result<(), ApiError> {
        self.pause().await;
        let id = id.to_string();
        self.enter(Op::Delete, Call::Delete(id.clone()))?;
        let mut state = self.state();
        let index = Self::position(&state.records, &id).ok_or_else(|| Self::not_found(&id))?;
        state.records.remove(index);
        Ok(())
    }
}

impl Inbox for FakeCollaborator<NotificationRecord> {
    async fn get_my_notifications(&self) -> Result<Vec<Value>, ApiError> {
        self.pause().await;
        self.enter(Op::Inbox, Call::GetMine)?;
        Ok(self.records())
    }

    async fn mark_my_notification_as_read(
        &self,
        id: atrium_core::NotificationId,
    ) -> Result<(), ApiError> {
        self.pause().await;
        let id = id.to_string();
        self.enter(Op::Inbox, Call::MarkRead(id.clone()))?;
        let mut state = self.state();
        let record = Self::position(&state.records, &id)
            .and_then(|i| state.records.get_mut(i))
            .ok_or_else(|| Self::not_found(&id))?;
        merge(record, json!({ "isRead": true }));
        Ok(())
    }

    async fn mark_all_my_notifications_as_read(&self) -> Result<(), ApiError> {
        self.pause().await;
        self.enter(Op::Inbox, Call::MarkAllRead)?;
        for record in &mut self.state().records {
            merge(record, json!({ "isRead": true }));
        }
        Ok(())
    }

    async fn delete_my_notification(&self, id: atrium_core::NotificationId) -> Result<(), ApiError> {
        self.pause().await;
        let id = id.to_string();
        self.enter(Op::Inbox, Call::DeleteMine(id.clone()))?;
        let mut state = self.state();
        let index = Self::position(&state.records, &id).ok_or_else(|| Self::not_found(&id))?;
        state.records.remove(index);
        Ok(())
    }

    async fn send_notification_to_user(&self, payload: Value) -> Result<Value, ApiError> {
        self.pause().await;
        self.enter(Op::Inbox, Call::Send(payload.clone()))?;
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let mut record = json!({ "isRead": false });
        merge(&mut record, payload);
        merge(&mut record, json!({ "id": id }));
        self.state().records.push(record.clone());
        Ok(record)
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A raw user, snake_case as older endpoints send it.
#[must_use]
pub fn raw_user(id: i64, first_name: &str, email: &str, role: &str) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "email": email,
        "role": role,
        "is_verified": true,
        "created_at": format!("2024-01-{:02}T09:00:00Z", id.clamp(1, 28)),
    })
}

/// A raw project in camelCase.
#[must_use]
pub fn raw_project(id: i64, title: &str, status: &str, progress: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} for a client"),
        "serviceId": 1,
        "clientId": 2,
        "status": status,
        "progress": progress,
        "createdAt": format!("2024-02-{:02}T09:00:00Z", id.clamp(1, 28)),
    })
}

#[must_use]
pub fn raw_service(id: i64, name: &str, category: &str, price: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} package"),
        "category": category,
        "price": price,
    })
}

#[must_use]
pub fn raw_notification(id: i64, title: &str, is_read: bool) -> Value {
    json!({
        "id": id,
        "userId": 2,
        "title": title,
        "message": format!("About {title}"),
        "type": "project_update",
        "is_read": is_read,
    })
}
