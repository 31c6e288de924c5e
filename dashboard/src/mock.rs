//! In-memory collaborators for tests
//!
//! [`InMemoryGateway`] keeps records in memory and records every call.
//! Failures and slow responses can be scripted per operation.
//! [`RecordingNotifier`] and [`RecordingNavigator`] capture what a screen
//! showed and where it went.

use crate::api::{EntityGateway, EntityId, GatewayFuture, ListQuery, Resource};
use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::notify::{Level, Notification, Notifier};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Gateway operation, for scripting failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `list`
    List,
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
}

/// A call received by [`InMemoryGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall<D> {
    /// `list`
    List(ListQuery),
    /// `create`
    Create(D),
    /// `update`
    Update(EntityId, D),
    /// `delete`
    Delete(EntityId),
}

struct ScriptedList<R> {
    delay: Duration,
    result: Result<Vec<R>, ApiError>,
}

struct Inner<R: Resource> {
    records: Vec<R>,
    calls: Vec<GatewayCall<R::Draft>>,
    failures: HashMap<Operation, ApiError>,
    scripted_lists: VecDeque<ScriptedList<R>>,
    latency: Duration,
}

/// In-memory [`EntityGateway`]
///
/// Clones share the same records and call log.
///
/// - `list` answers from the scripted queue first, then from the records
/// - `delete` removes the record
/// - `create` and `update` only record the call
pub struct InMemoryGateway<R: Resource> {
    inner: Arc<Mutex<Inner<R>>>,
}

impl<R: Resource> Clone for InMemoryGateway<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> Default for InMemoryGateway<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> InMemoryGateway<R> {
    /// Empty gateway
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Gateway serving `records`
    #[must_use]
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                records,
                calls: Vec::new(),
                failures: HashMap::new(),
                scripted_lists: VecDeque::new(),
                latency: Duration::ZERO,
            })),
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(&self) -> Arc<dyn EntityGateway<R>> {
        Arc::new(self.clone())
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        lock(&self.inner).latency = latency;
    }

    /// Make `operation` fail with `error` until [`Self::succeed`] is called
    pub fn fail(&self, operation: Operation, error: ApiError) {
        lock(&self.inner).failures.insert(operation, error);
    }

    /// Stop failing `operation`
    pub fn succeed(&self, operation: Operation) {
        lock(&self.inner).failures.remove(&operation);
    }

    /// Answer the next `list` call with `result` after `delay`
    pub fn script_list(&self, delay: Duration, result: Result<Vec<R>, ApiError>) {
        lock(&self.inner)
            .scripted_lists
            .push_back(ScriptedList { delay, result });
    }

    /// Replace the stored records
    pub fn set_records(&self, records: Vec<R>) {
        lock(&self.inner).records = records;
    }

    /// Stored records
    #[must_use]
    pub fn records(&self) -> Vec<R> {
        lock(&self.inner).records.clone()
    }

    /// Every call received, in order
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall<R::Draft>> {
        lock(&self.inner).calls.clone()
    }

    /// Queries of the `list` calls received, in order
    #[must_use]
    pub fn list_calls(&self) -> Vec<ListQuery> {
        lock(&self.inner)
            .calls
            .iter()
            .filter_map(|call| match call {
                GatewayCall::List(query) => Some(*query),
                _ => None,
            })
            .collect()
    }

    /// Calls other than `list`
    #[must_use]
    pub fn mutation_calls(&self) -> Vec<GatewayCall<R::Draft>> {
        lock(&self.inner)
            .calls
            .iter()
            .filter(|call| !matches!(call, GatewayCall::List(_)))
            .cloned()
            .collect()
    }

    /// Record `call` and return the latency and any scripted failure
    fn begin(
        &self,
        call: GatewayCall<R::Draft>,
        operation: Operation,
    ) -> (Duration, Option<ApiError>) {
        let mut inner = lock(&self.inner);
        inner.calls.push(call);
        (inner.latency, inner.failures.get(&operation).cloned())
    }
}

impl<R: Resource> EntityGateway<R> for InMemoryGateway<R> {
    fn list(&self, query: ListQuery) -> GatewayFuture<Vec<R>> {
        let (latency, failure) = self.begin(GatewayCall::List(query), Operation::List);
        let scripted = lock(&self.inner).scripted_lists.pop_front();
        let inner = Arc::clone(&self.inner);

        Box::pin(async move {
            if let Some(ScriptedList { delay, result }) = scripted {
                tokio::time::sleep(delay).await;
                return result;
            }
            tokio::time::sleep(latency).await;
            match failure {
                Some(error) => Err(error),
                None => Ok(lock(&inner).records.clone()),
            }
        })
    }

    fn create(&self, draft: R::Draft) -> GatewayFuture<()> {
        let (latency, failure) = self.begin(GatewayCall::Create(draft), Operation::Create);

        Box::pin(async move {
            tokio::time::sleep(latency).await;
            failure.map_or(Ok(()), Err)
        })
    }

    fn update(&self, id: EntityId, draft: R::Draft) -> GatewayFuture<()> {
        let (latency, failure) = self.begin(GatewayCall::Update(id, draft), Operation::Update);

        Box::pin(async move {
            tokio::time::sleep(latency).await;
            failure.map_or(Ok(()), Err)
        })
    }

    fn delete(&self, id: EntityId) -> GatewayFuture<()> {
        let (latency, failure) = self.begin(GatewayCall::Delete(id), Operation::Delete);
        let inner = Arc::clone(&self.inner);

        Box::pin(async move {
            tokio::time::sleep(latency).await;
            if let Some(error) = failure {
                return Err(error);
            }
            let mut guard = lock(&inner);
            let before = guard.records.len();
            guard.records.retain(|record| record.id() != id);
            if guard.records.len() == before {
                return Err(ApiError::NotFound(format!("{}/{id}", R::PATH)));
            }
            Ok(())
        })
    }
}

/// Notifier that keeps every notification
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates a new `RecordingNotifier`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification, in order
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.seen).clone()
    }

    /// Messages of success notifications
    #[must_use]
    pub fn successes(&self) -> Vec<String> {
        self.messages(Level::Success)
    }

    /// Messages of error notifications
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.messages(Level::Error)
    }

    fn messages(&self, level: Level) -> Vec<String> {
        lock(&self.seen)
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        lock(&self.seen).push(notification);
    }
}

/// Navigator that keeps every route
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Creates a new `RecordingNavigator`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes navigated to, in order
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        lock(&self.routes).push(route);
    }
}
