//! Create and update forms
//!
//! A form holds a draft, validates it on submit and calls the gateway only
//! when every field passes. Completion is reported through
//! [`FormAction::Submitted`]; the owning page watches for it to close the
//! dialog and reload.
//!
//! Every time a form is replaced (a dialog reopened) its session number
//! grows. A save reports the session it was started in, so a result that
//! lands after the dialog moved on never touches the newer form.

use crate::api::{EntityGateway, EntityId, Resource};
use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use backoffice_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Field-level validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    /// No errors
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`, replacing any previous one
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    /// Error message for `field`
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Whether no field failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `(field, message)` pairs, sorted by field name
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok` when empty, otherwise `Err(self)`
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Schema check for a draft
pub trait Validate {
    /// Check every field
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Record an error when `value` is blank
pub fn require_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &str,
) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

/// What a submit does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Submit creates a record
    Create,
    /// Submit updates the record with this id
    Update(EntityId),
}

/// Form state
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<R: Resource> {
    /// Create or update
    pub mode: FormMode,
    /// Current field values
    pub values: R::Draft,
    /// Errors from the last submit attempt
    pub errors: ValidationErrors,
    /// True while a submit is in flight
    pub submitting: bool,
    /// Dialog session this form belongs to
    pub session: u64,
}

impl<R: Resource> FormState<R> {
    /// Empty create form
    #[must_use]
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            values: R::Draft::default(),
            errors: ValidationErrors::new(),
            submitting: false,
            session: 0,
        }
    }

    /// Update form pre-filled from `record`
    #[must_use]
    pub fn update(record: &R) -> Self {
        Self {
            mode: FormMode::Update(record.id()),
            values: record.to_draft(),
            errors: ValidationErrors::new(),
            submitting: false,
            session: 0,
        }
    }

    /// Replace this form with `fresh`, starting the next session
    pub fn restart(&mut self, fresh: Self) {
        let session = self.session + 1;
        *self = Self { session, ..fresh };
    }
}

impl<R: Resource> Default for FormState<R> {
    fn default() -> Self {
        Self::create()
    }
}

/// Form actions
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction<R: Resource> {
    /// Replace the field values
    Edit(R::Draft),
    /// Validate and, if valid, save
    Submit,
    /// The save call returned
    Submitted {
        /// Session the save was started in
        session: u64,
        /// Outcome of the call
        result: Result<(), ApiError>,
    },
}

impl<R: Resource> FormAction<R> {
    /// Session of a successful save, if this is one
    #[must_use]
    pub const fn saved_session(&self) -> Option<u64> {
        match self {
            Self::Submitted {
                session,
                result: Ok(()),
            } => Some(*session),
            _ => None,
        }
    }
}

/// Dependencies of [`FormReducer`]
pub struct FormEnvironment<R: Resource> {
    /// Remote calls
    pub gateway: Arc<dyn EntityGateway<R>>,
    /// Toasts
    pub notifier: Arc<dyn Notifier>,
}

impl<R: Resource> FormEnvironment<R> {
    /// Creates a new `FormEnvironment`
    #[must_use]
    pub fn new(gateway: Arc<dyn EntityGateway<R>>, notifier: Arc<dyn Notifier>) -> Self {
        Self { gateway, notifier }
    }
}

impl<R: Resource> Clone for FormEnvironment<R> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

/// Reducer for [`FormState`]
pub struct FormReducer<R> {
    _resource: PhantomData<fn() -> R>,
}

impl<R> FormReducer<R> {
    /// Creates a new `FormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _resource: PhantomData,
        }
    }
}

impl<R> Default for FormReducer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for FormReducer<R> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for FormReducer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormReducer").finish()
    }
}

/// Effect that shows `notification` and produces no action
pub fn notify<A: Send + 'static>(
    notifier: &Arc<dyn Notifier>,
    notification: Notification,
) -> Effect<A> {
    let notifier = Arc::clone(notifier);
    Effect::future(async move {
        notifier.notify(notification);
        None
    })
}

/// `"company"` -> `"Company"`
pub(crate) fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl<R: Resource> Reducer for FormReducer<R> {
    type State = FormState<R>;
    type Action = FormAction<R>;
    type Environment = FormEnvironment<R>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FormAction::Edit(values) => {
                state.values = values;
                state.errors = ValidationErrors::new();
                SmallVec::new()
            },

            FormAction::Submit => {
                if state.submitting {
                    tracing::debug!(resource = R::PATH, "Submit ignored, save already in flight");
                    return SmallVec::new();
                }

                if let Err(errors) = state.values.validate() {
                    tracing::debug!(resource = R::PATH, %errors, "Form is invalid");
                    state.errors = errors;
                    return SmallVec::new();
                }

                state.errors = ValidationErrors::new();
                state.submitting = true;

                let draft = state.values.clone();
                let mode = state.mode;
                let session = state.session;
                tracing::debug!(resource = R::PATH, ?mode, session, "Saving");

                let request = match mode {
                    FormMode::Create => env.gateway.create(draft),
                    FormMode::Update(id) => env.gateway.update(id, draft),
                };
                smallvec![Effect::future(async move {
                    let result = request.await;
                    Some(FormAction::Submitted { session, result })
                })]
            },

            FormAction::Submitted { session, result } => {
                if session == state.session {
                    state.submitting = false;
                } else {
                    tracing::debug!(
                        resource = R::PATH,
                        session,
                        current = state.session,
                        "Save landed after its form was replaced"
                    );
                }

                let notification = match result {
                    Ok(()) => {
                        Notification::success(format!("{} saved successfully.", capitalize(R::LABEL)))
                    },
                    Err(error) => {
                        tracing::warn!(resource = R::PATH, %error, "Save failed");
                        Notification::error(format!(
                            "An error occurred while saving the {}.",
                            R::LABEL
                        ))
                    },
                };
                smallvec![notify(&env.notifier, notification)]
            },
        }
    }
}
