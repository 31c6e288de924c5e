use crate::api::{EntityId, Resource};
use crate::form::{require_text, Validate, ValidationErrors};
use crate::navigation::Route;
use serde::{Deserialize, Serialize};

/// A company managed from the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Backend id
    pub id: EntityId,
    /// Registered business name
    pub business_name: String,
    /// Logo URL
    #[serde(default)]
    pub route: Option<String>,
}

impl Company {
    /// Company without a logo
    #[must_use]
    pub fn new(id: EntityId, business_name: impl Into<String>) -> Self {
        Self {
            id,
            business_name: business_name.into(),
            route: None,
        }
    }

    /// Text shown in place of a missing logo: the upper-cased first letter
    /// of the name, or `E` when the name is empty
    #[must_use]
    pub fn avatar_initial(&self) -> String {
        self.business_name
            .trim()
            .chars()
            .next()
            .map_or_else(|| "E".to_string(), |c| c.to_uppercase().collect())
    }
}

/// Writable company fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDraft {
    /// Registered business name
    pub business_name: String,
    /// Logo URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl CompanyDraft {
    /// Draft with a name and no logo
    #[must_use]
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            route: None,
        }
    }
}

impl Validate for CompanyDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(
            &mut errors,
            "business_name",
            &self.business_name,
            "Business name is required",
        );
        errors.into_result()
    }
}

impl Resource for Company {
    type Draft = CompanyDraft;

    const PATH: &'static str = "companies";
    const LABEL: &'static str = "company";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_text(&self) -> String {
        self.business_name.clone()
    }

    fn to_draft(&self) -> CompanyDraft {
        CompanyDraft {
            business_name: self.business_name.clone(),
            route: self.route.clone(),
        }
    }

    fn confirm_route(id: EntityId) -> Option<Route> {
        Some(Route::CompanyHalls(id))
    }
}
