//! Reservations screen: the reservation page plus an event picker
//!
//! Reservations are scoped by event. The screen keeps the event list for
//! the picker and the heading, narrows rows by status on the client, and
//! pre-selects the current event in the reservation forms.

use crate::api::{EntityId, ListQuery};
use crate::entities::{Event, Reservation, ReservationStatus};
use crate::list::{ListAction, ListEnvironment, ListReducer, ListState};
use crate::page::{PageAction, PageEnvironment, PageReducer, PageState};
use backoffice_core::{composition::reduce_child, effect::Effect, reducer::Reducer, SmallVec};

/// Heading shown when the current event is unknown
pub const EVENT_NOT_FOUND: &str = "Event not found";

/// Reservations screen state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReservationsState {
    /// Reservation rows, dialogs and forms
    pub page: PageState<Reservation>,
    /// Events for the picker
    pub events: ListState<Event>,
    /// Event the rows are scoped to, `None` for all events
    pub event_id: Option<EntityId>,
    /// Client-side status filter, `None` for all statuses
    pub status: Option<ReservationStatus>,
}

impl ReservationsState {
    /// Fresh screen
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows matching both the free-text and the status filter
    pub fn visible(&self) -> impl Iterator<Item = &Reservation> + '_ {
        self.page
            .list
            .visible()
            .filter(|reservation| self.status.is_none_or(|status| reservation.status == status))
    }

    /// Name of the current event, or [`EVENT_NOT_FOUND`]
    #[must_use]
    pub fn event_name(&self) -> &str {
        self.event_id
            .and_then(|id| self.events.get(id))
            .map_or(EVENT_NOT_FOUND, |event| event.name.as_str())
    }
}

/// Reservations screen actions
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationsAction {
    /// Load events and reservations, scoped to `event_id` when given
    Mount {
        /// Event from the URL
        event_id: Option<EntityId>,
    },
    /// Pick an event, `None` for all; reloads the rows
    SelectEvent(Option<EntityId>),
    /// Narrow rows by status, `None` for all
    SetStatus(Option<ReservationStatus>),
    /// Set the free-text filter
    SetFilter(String),
    /// Reload the rows with the current event
    Search,
    /// Routed to the reservation page
    Page(PageAction<Reservation>),
    /// Routed to the event list
    Events(ListAction<Event>),
}

/// Dependencies of [`ReservationsReducer`]
#[derive(Clone)]
pub struct ReservationsEnvironment {
    /// Reservation page dependencies
    pub page: PageEnvironment<Reservation>,
    /// Event list dependencies
    pub events: ListEnvironment<Event>,
}

impl ReservationsEnvironment {
    /// Creates a new `ReservationsEnvironment`
    #[must_use]
    pub const fn new(page: PageEnvironment<Reservation>, events: ListEnvironment<Event>) -> Self {
        Self { page, events }
    }
}

/// Reducer for [`ReservationsState`]
#[derive(Clone, Debug, Default)]
pub struct ReservationsReducer {
    page: PageReducer<Reservation>,
    events: ListReducer<Event>,
}

type Effects = SmallVec<[Effect<ReservationsAction>; 4]>;

impl ReservationsReducer {
    /// Creates a new `ReservationsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: PageReducer::new(),
            events: ListReducer::new(),
        }
    }

    fn route_page(
        &self,
        state: &mut ReservationsState,
        action: PageAction<Reservation>,
        env: &ReservationsEnvironment,
    ) -> Effects {
        let prefill = matches!(action, PageAction::OpenAdd | PageAction::EditRequested(_));
        let effects = reduce_child(
            &self.page,
            &mut state.page,
            action,
            &env.page,
            ReservationsAction::Page,
        );

        if prefill && state.event_id.is_some() {
            state.page.add_form.values.event_id = state.event_id;
            state.page.update_form.values.event_id = state.event_id;
        }
        effects
    }
}

impl Reducer for ReservationsReducer {
    type State = ReservationsState;
    type Action = ReservationsAction;
    type Environment = ReservationsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ReservationsAction::Mount { event_id } => {
                state.event_id = event_id;
                state.status = None;

                let mut effects = reduce_child(
                    &self.events,
                    &mut state.events,
                    ListAction::Load(ListQuery::first_page(None)),
                    &env.events,
                    ReservationsAction::Events,
                );
                effects.extend(self.route_page(
                    state,
                    PageAction::Mount { scope: event_id },
                    env,
                ));
                effects
            },

            ReservationsAction::SelectEvent(event_id) => {
                tracing::debug!(event_id = ?event_id, "Event selected");
                state.event_id = event_id;
                self.route_page(state, PageAction::SetScope(event_id), env)
            },

            ReservationsAction::SetStatus(status) => {
                state.status = status;
                SmallVec::new()
            },

            ReservationsAction::SetFilter(filter) => {
                self.route_page(state, PageAction::SetFilter(filter), env)
            },

            ReservationsAction::Search => {
                let scope = state.event_id;
                self.route_page(state, PageAction::SetScope(scope), env)
            },

            ReservationsAction::Page(action) => self.route_page(state, action, env),

            ReservationsAction::Events(action) => reduce_child(
                &self.events,
                &mut state.events,
                action,
                &env.events,
                ReservationsAction::Events,
            ),
        }
    }
}
