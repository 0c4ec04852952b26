//! Global search.
//!
//! Keystrokes go through a [`Debouncer`]: each call reschedules the search
//! and only the last one inside the quiet period fires. The search itself
//! fans out to up to four collaborators concurrently and keeps whatever
//! comes back; one collaborator failing only empties its own section.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use atrium_core::normalize::normalize_values;
use atrium_core::pipeline::matches_query;
use atrium_core::{NotificationRecord, ProjectRecord, ServiceRecord, UserRecord};
use tracing::instrument;

use crate::api::{Collaborator, Resource};
use crate::error::{ApiError, report_partial};

/// Quiet period before a search fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Results kept per entity.
pub const DEFAULT_RESULT_LIMIT: usize = 5;

// =============================================================================
// Debounce
// =============================================================================

/// Delays a task until calls stop arriving for a fixed interval.
///
/// Scheduling supersedes whatever is still waiting. A task that has already
/// started is left to finish.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the delay unless another call supersedes it first.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&self, task: F) -> CancelHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let scheduled = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Claim the slot so a late cancel cannot race the start.
            if generation
                .compare_exchange(scheduled, scheduled + 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                task.await;
            } else {
                tracing::trace!(scheduled, "Debounced call superseded");
            }
        });

        CancelHandle {
            generation: Arc::clone(&self.generation),
            scheduled,
        }
    }

    /// Drop whatever is waiting.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Handle to one scheduled call.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    generation: Arc<AtomicU64>,
    scheduled: u64,
}

impl CancelHandle {
    /// Cancel this call if it is still waiting. Returns whether it was.
    pub fn cancel(&self) -> bool {
        self.generation
            .compare_exchange(
                self.scheduled,
                self.scheduled + 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }

    /// Whether the call is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.scheduled
    }
}

// =============================================================================
// Fan-out
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum results per entity.
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// The collaborators a search may query. `None` skips that entity.
#[derive(Debug)]
pub struct SearchSources<'a, U, P, S, N> {
    pub users: Option<&'a U>,
    pub projects: Option<&'a P>,
    pub services: Option<&'a S>,
    pub notifications: Option<&'a N>,
}

impl<'a, U, P, S, N> SearchSources<'a, U, P, S, N> {
    #[must_use]
    pub const fn all(users: &'a U, projects: &'a P, services: &'a S, notifications: &'a N) -> Self {
        Self {
            users: Some(users),
            projects: Some(projects),
            services: Some(services),
            notifications: Some(notifications),
        }
    }

    /// Skip users, e.g. for roles that cannot list accounts.
    #[must_use]
    pub fn without_users(mut self) -> Self {
        self.users = None;
        self
    }

    #[must_use]
    pub fn without_notifications(mut self) -> Self {
        self.notifications = None;
        self
    }
}

/// Merged search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub users: Vec<UserRecord>,
    pub projects: Vec<ProjectRecord>,
    pub services: Vec<ServiceRecord>,
    pub notifications: Vec<NotificationRecord>,
    /// Collections whose request failed.
    pub failed: Vec<&'static str>,
}

impl SearchResults {
    #[must_use]
    pub fn total(&self) -> usize {
        self.users.len() + self.projects.len() + self.services.len() + self.notifications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn merge<R: Resource>(&mut self, result: Result<Vec<R>, ApiError>) -> Vec<R> {
        result.unwrap_or_else(|err| {
            report_partial(&err, R::PATH);
            self.failed.push(R::PATH);
            Vec::new()
        })
    }
}

/// Query every available collaborator concurrently and merge the matches.
///
/// A blank query returns empty results without any request.
#[instrument(skip(sources), fields(limit = options.limit))]
pub async fn fan_out_search<U, P, S, N>(
    query: &str,
    sources: &SearchSources<'_, U, P, S, N>,
    options: SearchOptions,
) -> SearchResults
where
    U: Collaborator<Record = UserRecord>,
    P: Collaborator<Record = ProjectRecord>,
    S: Collaborator<Record = ServiceRecord>,
    N: Collaborator<Record = NotificationRecord>,
{
    let lowered = query.trim().to_lowercase();
    if lowered.is_empty() {
        return SearchResults::default();
    }

    let (users, projects, services, notifications) = tokio::join!(
        search_one(sources.users, &lowered, options.limit),
        search_one(sources.projects, &lowered, options.limit),
        search_one(sources.services, &lowered, options.limit),
        search_one(sources.notifications, &lowered, options.limit),
    );

    let mut results = SearchResults::default();
    results.users = results.merge(users);
    results.projects = results.merge(projects);
    results.services = results.merge(services);
    results.notifications = results.merge(notifications);

    tracing::debug!(
        total = results.total(),
        failed = results.failed.len(),
        "Search complete"
    );
    results
}

async fn search_one<C: Collaborator>(
    source: Option<&C>,
    lowered: &str,
    limit: usize,
) -> Result<Vec<C::Record>, ApiError> {
    let Some(source) = source else {
        return Ok(Vec::new());
    };
    let values = source.get_all().await?;
    Ok(normalize_values::<C::Record>(values)
        .into_iter()
        .filter(|record| matches_query(record, lowered))
        .take(limit)
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn bump(count: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let count = Arc::clone(count);
        async move {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_period() {
        let debouncer = Debouncer::default();
        let fired = counter();

        let handle = debouncer.schedule(bump(&fired));
        assert!(handle.is_pending());

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!handle.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_supersedes_pending_call() {
        let debouncer = Debouncer::default();
        let first = counter();
        let second = counter();

        let stale = debouncer.schedule(bump(&first));
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule(bump(&second));
        assert!(!stale.is_pending());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_cancel() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let fired = counter();

        let handle = debouncer.schedule(bump(&fired));
        assert!(handle.cancel());
        assert!(!handle.cancel());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        debouncer.schedule(bump(&fired));
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_handle_cannot_cancel_newer_call() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let fired = counter();

        let stale = debouncer.schedule(bump(&fired));
        debouncer.schedule(bump(&fired));
        assert!(!stale.cancel());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_results_total() {
        let results = SearchResults {
            services: vec![ServiceRecord::default(); 2],
            ..SearchResults::default()
        };
        assert_eq!(results.total(), 2);
        assert!(!results.is_empty());
        assert!(SearchResults::default().is_empty());
    }
}
