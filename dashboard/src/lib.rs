//! # Backoffice Dashboard
//!
//! Administration screens for companies, reservations and roles, built on the
//! backoffice store.
//!
//! Every vertical has the same shape:
//!
//! - a [`list`] of records fetched from the REST API, with a loading flag and
//!   a free-text filter
//! - an [`api::EntityGateway`] issuing create, update and delete calls
//! - a [`page`] owning the dialogs, the selection and the delete target
//! - two [`form`]s (create and update) validating a draft before submitting
//!
//! The verticals differ only in their [`api::Resource`] implementation, found
//! under [`entities`]. The reservations screen additionally looks up events,
//! see [`reservations`].
//!
//! ## Example
//!
//! ```ignore
//! use backoffice_dashboard::entities::Company;
//! use backoffice_dashboard::page::{PageAction, PageEnvironment, PageReducer, PageState};
//! use backoffice_runtime::Store;
//!
//! let store = Store::new(PageState::<Company>::new(), PageReducer::new(), env);
//! store.send_cascading(PageAction::Mount { scope: None }).await?.wait().await;
//! let names = store
//!     .state(|s| s.list.visible().map(|c| c.business_name.clone()).collect::<Vec<_>>())
//!     .await;
//! ```

pub mod api;
pub mod config;
pub mod dialog;
pub mod entities;
pub mod error;
pub mod form;
pub mod list;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod navigation;
pub mod notify;
pub mod page;
pub mod reservations;

pub use api::{EntityGateway, EntityId, ListQuery, Resource};
pub use config::{ConfigError, DashboardConfig, FailedLoadPolicy};
pub use error::ApiError;
