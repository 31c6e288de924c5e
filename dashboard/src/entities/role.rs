use crate::api::{EntityId, Resource};
use crate::form::{require_text, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// A user role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Backend id
    pub id: EntityId,
    /// Role name
    pub name: String,
}

impl Role {
    /// Creates a new `Role`
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Writable role fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    /// Role name
    pub name: String,
}

impl RoleDraft {
    /// Creates a new `RoleDraft`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Validate for RoleDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name, "Name is required");
        errors.into_result()
    }
}

impl Resource for Role {
    type Draft = RoleDraft;

    const PATH: &'static str = "roles";
    const LABEL: &'static str = "role";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_text(&self) -> String {
        self.name.clone()
    }

    fn to_draft(&self) -> RoleDraft {
        RoleDraft::new(self.name.clone())
    }
}
