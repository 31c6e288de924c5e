use crate::api::{EntityId, Resource};
use crate::form::{require_text, Validate, ValidationErrors};
use crate::navigation::Route;
use serde::{Deserialize, Serialize};

/// An event reservations belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Backend id
    pub id: EntityId,
    /// Event name
    pub name: String,
}

impl Event {
    /// Creates a new `Event`
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Writable event fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Event name
    pub name: String,
}

impl Validate for EventDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name, "Name is required");
        errors.into_result()
    }
}

impl Resource for Event {
    type Draft = EventDraft;

    const PATH: &'static str = "events";
    const LABEL: &'static str = "event";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_text(&self) -> String {
        self.name.clone()
    }

    fn to_draft(&self) -> EventDraft {
        EventDraft {
            name: self.name.clone(),
        }
    }

    fn confirm_route(id: EntityId) -> Option<Route> {
        Some(Route::EventReservations(id))
    }
}
