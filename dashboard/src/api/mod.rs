//! Remote API abstraction
//!
//! Each vertical is described by a [`Resource`]: where it lives on the REST
//! API, what its writable draft looks like and how it is labelled. The
//! [`EntityGateway`] trait issues the four calls every vertical needs; the
//! production implementation is [`rest::RestClient`], tests use the
//! in-memory gateway behind the `test-utils` feature.

pub mod rest;

use crate::error::ApiError;
use crate::form::Validate;
use crate::navigation::Route;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Backend-assigned record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Wrap a raw id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Parameters of a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    /// Foreign key narrowing the list (event id for reservations)
    pub scope: Option<EntityId>,
}

impl ListQuery {
    /// Page 1, optionally scoped
    #[must_use]
    pub const fn first_page(scope: Option<EntityId>) -> Self {
        Self { page: 1, scope }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::first_page(None)
    }
}

/// A record type exposed by the REST API
pub trait Resource:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Writable subset sent on create and update
    type Draft: Clone
        + fmt::Debug
        + Default
        + PartialEq
        + Serialize
        + Validate
        + Send
        + Sync
        + 'static;

    /// Path segment under the API base URL
    const PATH: &'static str;

    /// Human-readable singular name, used in notifications
    const LABEL: &'static str;

    /// Query parameter carrying [`ListQuery::scope`], if the resource is scoped
    const SCOPE_PARAM: Option<&'static str> = None;

    /// Backend id
    fn id(&self) -> EntityId;

    /// Text the free-text filter is matched against
    fn display_text(&self) -> String;

    /// Draft pre-filled from this record, for the update form
    fn to_draft(&self) -> Self::Draft;

    /// Where confirming a selected record navigates, if anywhere
    fn confirm_route(_id: EntityId) -> Option<Route> {
        None
    }

    /// Case-insensitive substring match against [`Resource::display_text`]
    ///
    /// An empty (or blank) filter matches everything.
    fn matches(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        needle.is_empty() || self.display_text().to_lowercase().contains(&needle)
    }
}

/// Boxed future returned by gateway calls
pub type GatewayFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

/// Remote calls for one resource
///
/// Every call is a single request: no retries, no local state. Callers
/// surface failures and reload on success.
pub trait EntityGateway<R: Resource>: Send + Sync {
    /// Fetch one page of records
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body does not decode
    fn list(&self, query: ListQuery) -> GatewayFuture<Vec<R>>;

    /// Create a record
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects the draft
    fn create(&self, draft: R::Draft) -> GatewayFuture<()>;

    /// Update a record
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects the draft
    fn update(&self, id: EntityId, draft: R::Draft) -> GatewayFuture<()>;

    /// Delete a record
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the record cannot be deleted
    fn delete(&self, id: EntityId) -> GatewayFuture<()>;
}

/// List body as returned by the API: a bare array or a `{ "data": [...] }` envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}
