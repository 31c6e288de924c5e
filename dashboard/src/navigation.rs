//! Screen routes and navigation

use crate::api::EntityId;
use std::fmt;

/// A dashboard location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Halls of a company
    CompanyHalls(EntityId),
    /// Reservations of an event
    EventReservations(EntityId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompanyHalls(id) => write!(f, "/empresas/salones/{id}"),
            Self::EventReservations(id) => write!(f, "/eventos/reservas/{id}"),
        }
    }
}

/// Moves the user to another screen
pub trait Navigator: Send + Sync {
    /// Navigate to `route`
    fn navigate(&self, route: Route);
}

/// Navigator that only logs the transition
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(%route, "Navigate");
    }
}
