//! Entity list: rows fetched from the API, a loading flag and a filter.
//!
//! Every `Load` bumps a request generation. Responses carry the generation
//! they were issued under and are dropped unless it is still the current
//! one, so a slow response can never overwrite a newer list.

use crate::api::{EntityGateway, EntityId, ListQuery, Resource};
use crate::config::FailedLoadPolicy;
use crate::error::ApiError;
use backoffice_core::{
    effect::Effect, environment::Clock, reducer::Reducer, smallvec, DateTime, SmallVec, Utc,
};
use std::marker::PhantomData;
use std::sync::Arc;

/// List state for one resource
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<R: Resource> {
    /// Rows from the last successful load, in server order
    pub items: Vec<R>,
    /// True while the newest request is in flight
    pub loading: bool,
    /// Free-text filter applied by [`ListState::visible`]
    pub filter: String,
    /// Query of the newest request
    pub query: ListQuery,
    /// Incremented on every `Load`
    pub generation: u64,
    /// When the rows were last replaced
    pub loaded_at: Option<DateTime<Utc>>,
    /// Error of the last failed load, cleared by the next success
    pub last_error: Option<String>,
}

impl<R: Resource> ListState<R> {
    /// Empty list, nothing loaded yet
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            filter: String::new(),
            query: ListQuery::default(),
            generation: 0,
            loaded_at: None,
            last_error: None,
        }
    }

    /// List pre-populated with rows, as if a load had completed
    #[must_use]
    pub fn with_items(items: Vec<R>) -> Self {
        Self {
            items,
            ..Self::new()
        }
    }

    /// Rows matching the filter, in server order
    pub fn visible(&self) -> impl Iterator<Item = &R> + '_ {
        self.items.iter().filter(|item| item.matches(&self.filter))
    }

    /// Row with the given id
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Scope of the newest request
    #[must_use]
    pub const fn scope(&self) -> Option<EntityId> {
        self.query.scope
    }
}

impl<R: Resource> Default for ListState<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// List actions
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction<R: Resource> {
    // Commands
    /// Fetch a page, replacing the rows on success
    Load(ListQuery),
    /// Set the free-text filter
    SetFilter(String),

    // Feedback
    /// A load completed
    Loaded {
        /// Generation the request was issued under
        generation: u64,
        /// Rows returned
        items: Vec<R>,
    },
    /// A load failed
    LoadFailed {
        /// Generation the request was issued under
        generation: u64,
        /// Cause
        error: ApiError,
    },
}

/// Dependencies of [`ListReducer`]
pub struct ListEnvironment<R: Resource> {
    /// Remote calls
    pub gateway: Arc<dyn EntityGateway<R>>,
    /// Timestamps `loaded_at`
    pub clock: Arc<dyn Clock>,
    /// What happens to the rows when a load fails
    pub failed_load: FailedLoadPolicy,
}

impl<R: Resource> ListEnvironment<R> {
    /// Creates a new `ListEnvironment`
    #[must_use]
    pub fn new(
        gateway: Arc<dyn EntityGateway<R>>,
        clock: Arc<dyn Clock>,
        failed_load: FailedLoadPolicy,
    ) -> Self {
        Self {
            gateway,
            clock,
            failed_load,
        }
    }
}

impl<R: Resource> Clone for ListEnvironment<R> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            clock: Arc::clone(&self.clock),
            failed_load: self.failed_load,
        }
    }
}

/// Reducer for [`ListState`]
pub struct ListReducer<R> {
    _resource: PhantomData<fn() -> R>,
}

impl<R> ListReducer<R> {
    /// Creates a new `ListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _resource: PhantomData,
        }
    }
}

impl<R> Default for ListReducer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for ListReducer<R> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<R> std::fmt::Debug for ListReducer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListReducer").finish()
    }
}

impl<R: Resource> ListReducer<R> {
    fn load(
        state: &mut ListState<R>,
        query: ListQuery,
        env: &ListEnvironment<R>,
    ) -> Effect<ListAction<R>> {
        state.generation += 1;
        state.loading = true;
        state.query = query;

        let generation = state.generation;
        tracing::debug!(
            resource = R::PATH,
            generation,
            page = query.page,
            scope = ?query.scope,
            "Loading list"
        );

        // Issued now so requests leave in the order they were asked for
        let request = env.gateway.list(query);
        Effect::future(async move {
            match request.await {
                Ok(items) => Some(ListAction::Loaded { generation, items }),
                Err(error) => Some(ListAction::LoadFailed { generation, error }),
            }
        })
    }

    fn is_stale(state: &ListState<R>, generation: u64) -> bool {
        if generation == state.generation {
            return false;
        }
        tracing::debug!(
            resource = R::PATH,
            generation,
            current = state.generation,
            "Discarding stale list response"
        );
        true
    }
}

impl<R: Resource> Reducer for ListReducer<R> {
    type State = ListState<R>;
    type Action = ListAction<R>;
    type Environment = ListEnvironment<R>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ListAction::Load(query) => smallvec![Self::load(state, query, env)],

            ListAction::SetFilter(filter) => {
                state.filter = filter;
                SmallVec::new()
            },

            ListAction::Loaded { generation, items } => {
                if Self::is_stale(state, generation) {
                    return SmallVec::new();
                }
                tracing::debug!(resource = R::PATH, count = items.len(), "List loaded");

                state.items = items;
                state.loading = false;
                state.loaded_at = Some(env.clock.now());
                state.last_error = None;
                SmallVec::new()
            },

            ListAction::LoadFailed { generation, error } => {
                if Self::is_stale(state, generation) {
                    return SmallVec::new();
                }
                tracing::warn!(resource = R::PATH, %error, policy = %env.failed_load, "List load failed");

                state.loading = false;
                state.last_error = Some(error.to_string());
                if env.failed_load == FailedLoadPolicy::Clear {
                    state.items.clear();
                }
                SmallVec::new()
            },
        }
    }
}
