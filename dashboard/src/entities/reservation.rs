use crate::api::{EntityId, Resource};
use crate::form::{require_text, Validate, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle of a reservation, as spelled by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReservationStatus {
    /// Booked
    #[default]
    #[serde(rename = "reservado")]
    Reserved,
    /// Cancelled by the guest or the venue
    #[serde(rename = "cancelado")]
    Cancelled,
    /// Guest attended
    #[serde(rename = "completado")]
    Completed,
}

impl ReservationStatus {
    /// Wire spelling
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "reservado",
            Self::Cancelled => "cancelado",
            Self::Completed => "completado",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Unknown reservation status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown reservation status '{0}' (expected reservado, cancelado or completado)")]
pub struct ParseStatusError(String);

impl FromStr for ReservationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reservado" | "reserved" => Ok(Self::Reserved),
            "cancelado" | "cancelled" => Ok(Self::Cancelled),
            "completado" | "completed" => Ok(Self::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Guest who booked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Full name
    #[serde(default)]
    pub names: String,
}

/// Table or box assigned to the reservation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Station label
    #[serde(default)]
    pub name: String,
}

/// A reservation for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Backend id
    pub id: EntityId,
    /// Reservation name
    pub name: String,
    /// When the guest is expected
    pub reservation_datetime: DateTime<Utc>,
    /// Party size
    #[serde(default)]
    pub people: Option<u32>,
    /// Guest
    #[serde(default)]
    pub person: Person,
    /// Assigned station
    #[serde(default)]
    pub station: Station,
    /// Current status
    #[serde(default)]
    pub status: ReservationStatus,
}

/// Writable reservation fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    /// Reservation name
    pub name: String,
    /// Event the reservation belongs to
    pub event_id: Option<EntityId>,
    /// When the guest is expected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_datetime: Option<DateTime<Utc>>,
    /// Party size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people: Option<u32>,
    /// Status to set
    pub status: ReservationStatus,
}

impl Validate for ReservationDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name, "Name is required");
        if self.event_id.is_none() {
            errors.add("event_id", "Event is required");
        }
        errors.into_result()
    }
}

impl Resource for Reservation {
    type Draft = ReservationDraft;

    const PATH: &'static str = "reservations";
    const LABEL: &'static str = "reservation";
    const SCOPE_PARAM: Option<&'static str> = Some("event_id");

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_text(&self) -> String {
        format!("{} {} {}", self.name, self.person.names, self.station.name)
    }

    // The record does not carry its event, so the update form starts
    // without one and validation asks for it again.
    fn to_draft(&self) -> ReservationDraft {
        ReservationDraft {
            name: self.name.clone(),
            event_id: None,
            reservation_datetime: Some(self.reservation_datetime),
            people: self.people,
            status: self.status,
        }
    }
}
