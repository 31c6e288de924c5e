//! Records exposed by the backoffice API
//!
//! Each module defines a record, its writable draft, the draft's validation
//! rules and the [`crate::api::Resource`] binding.

mod company;
mod event;
mod reservation;
mod role;

pub use company::{Company, CompanyDraft};
pub use event::{Event, EventDraft};
pub use reservation::{
    ParseStatusError, Person, Reservation, ReservationDraft, ReservationStatus, Station,
};
pub use role::{Role, RoleDraft};
