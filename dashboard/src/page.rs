//! Page controller: a list, two forms, three dialogs and a selection
//!
//! The page routes child actions to [`ListReducer`] and [`FormReducer`] and
//! reacts to their outcomes: a successful save closes its dialog and
//! reloads the list.
//!
//! Dialogs move `Closed -> Open -> Closed` independently of each other.
//! Delete is asymmetric: success closes the dialog, reloads and confirms
//! with a toast; failure only shows an error and leaves the dialog open on
//! its target.
//!
//! Results can land after the user has moved on. A finished delete only
//! closes the dialog when it is still about the deleted record, and a
//! finished save only closes its dialog when the form session it started
//! in is still the current one. The list reloads either way.

use crate::api::{EntityGateway, EntityId, ListQuery, Resource};
use crate::config::FailedLoadPolicy;
use crate::dialog::DialogState;
use crate::error::ApiError;
use crate::form::{capitalize, notify, FormAction, FormEnvironment, FormReducer, FormState};
use crate::list::{ListAction, ListEnvironment, ListReducer, ListState};
use crate::navigation::Navigator;
use crate::notify::{Notification, Notifier};
use backoffice_core::{
    composition::reduce_child, effect::Effect, environment::Clock, reducer::Reducer, smallvec,
    SmallVec,
};
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// State of one page session
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<R: Resource> {
    /// Rows
    pub list: ListState<R>,
    /// Record picked for [`PageAction::Confirm`]
    pub selected: Option<EntityId>,
    /// Create dialog
    pub add_dialog: DialogState,
    /// Create form
    pub add_form: FormState<R>,
    /// Update dialog
    pub update_dialog: DialogState,
    /// Record being edited
    pub edit_target: Option<R>,
    /// Update form
    pub update_form: FormState<R>,
    /// Delete confirmation dialog
    pub delete_dialog: DialogState,
    /// Record the delete dialog is about
    pub delete_target: Option<EntityId>,
    /// Records with a delete call in flight
    pub deleting: BTreeSet<EntityId>,
}

impl<R: Resource> PageState<R> {
    /// Fresh page: nothing loaded, nothing selected, every dialog closed
    #[must_use]
    pub fn new() -> Self {
        Self::with_list(ListState::new())
    }

    /// Fresh page around an existing list
    #[must_use]
    pub fn with_list(list: ListState<R>) -> Self {
        Self {
            list,
            selected: None,
            add_dialog: DialogState::Closed,
            add_form: FormState::create(),
            update_dialog: DialogState::Closed,
            edit_target: None,
            update_form: FormState::create(),
            delete_dialog: DialogState::Closed,
            delete_target: None,
            deleting: BTreeSet::new(),
        }
    }

    /// Clear selection and dialogs, keeping the list and in-flight deletes
    fn reset_session(&mut self) {
        let list = std::mem::take(&mut self.list);
        let deleting = std::mem::take(&mut self.deleting);
        let mut add_form = std::mem::take(&mut self.add_form);
        let mut update_form = std::mem::take(&mut self.update_form);
        add_form.restart(FormState::create());
        update_form.restart(FormState::create());

        *self = Self {
            add_form,
            update_form,
            deleting,
            ..Self::with_list(list)
        };
    }
}

impl<R: Resource> Default for PageState<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Page actions
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction<R: Resource> {
    // ========== Lifecycle ==========
    /// Start a page session and load page 1, optionally scoped
    Mount {
        /// Foreign key narrowing the list
        scope: Option<EntityId>,
    },
    /// Reload page 1 with the current scope
    Refresh,
    /// Set the free-text filter
    SetFilter(String),
    /// Change the scope and reload
    SetScope(Option<EntityId>),

    // ========== Selection ==========
    /// Pick a record
    Select(EntityId),
    /// Proceed with the picked record
    Confirm,

    // ========== Dialogs ==========
    /// Show the create dialog with an empty form
    OpenAdd,
    /// Hide the create dialog
    CloseAdd,
    /// Show the update dialog pre-filled from a record
    EditRequested(R),
    /// Hide the update dialog
    CloseUpdate,
    /// Ask for confirmation before deleting a record
    DeleteRequested(EntityId),
    /// Hide the delete dialog
    CancelDelete,
    /// Delete the targeted record
    ConfirmDelete,
    /// The delete call returned
    DeleteFinished {
        /// Record the call was about
        id: EntityId,
        /// Outcome of the call
        result: Result<(), ApiError>,
    },

    // ========== Children ==========
    /// Routed to the list
    List(ListAction<R>),
    /// Routed to the create form
    AddForm(FormAction<R>),
    /// Routed to the update form
    UpdateForm(FormAction<R>),
}

/// Dependencies of [`PageReducer`]
pub struct PageEnvironment<R: Resource> {
    /// List dependencies
    pub list: ListEnvironment<R>,
    /// Form dependencies
    pub form: FormEnvironment<R>,
    /// Toasts
    pub notifier: Arc<dyn Notifier>,
    /// Screen changes
    pub navigator: Arc<dyn Navigator>,
}

impl<R: Resource> PageEnvironment<R> {
    /// Wire one gateway, notifier and navigator into every child
    #[must_use]
    pub fn new(
        gateway: Arc<dyn EntityGateway<R>>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
        failed_load: FailedLoadPolicy,
    ) -> Self {
        Self {
            list: ListEnvironment::new(Arc::clone(&gateway), clock, failed_load),
            form: FormEnvironment::new(gateway, Arc::clone(&notifier)),
            notifier,
            navigator,
        }
    }

    fn gateway(&self) -> Arc<dyn EntityGateway<R>> {
        Arc::clone(&self.list.gateway)
    }
}

impl<R: Resource> Clone for PageEnvironment<R> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            form: self.form.clone(),
            notifier: Arc::clone(&self.notifier),
            navigator: Arc::clone(&self.navigator),
        }
    }
}

/// Reducer for [`PageState`]
pub struct PageReducer<R> {
    list: ListReducer<R>,
    form: FormReducer<R>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> PageReducer<R> {
    /// Creates a new `PageReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            list: ListReducer::new(),
            form: FormReducer::new(),
            _resource: PhantomData,
        }
    }
}

impl<R> Default for PageReducer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for PageReducer<R> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for PageReducer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageReducer").finish()
    }
}

type PageEffects<R> = SmallVec<[Effect<PageAction<R>>; 4]>;

impl<R: Resource> PageReducer<R> {
    fn route_list(
        &self,
        state: &mut PageState<R>,
        action: ListAction<R>,
        env: &PageEnvironment<R>,
    ) -> PageEffects<R> {
        reduce_child(&self.list, &mut state.list, action, &env.list, PageAction::List)
    }

    fn reload(&self, state: &mut PageState<R>, env: &PageEnvironment<R>) -> PageEffects<R> {
        let query = ListQuery::first_page(state.list.scope());
        self.route_list(state, ListAction::Load(query), env)
    }

    fn confirm(state: &PageState<R>, env: &PageEnvironment<R>) -> PageEffects<R> {
        let Some(id) = state.selected else {
            return smallvec![notify(
                &env.notifier,
                Notification::error(format!("Please select a {}.", R::LABEL)),
            )];
        };

        match R::confirm_route(id) {
            Some(route) => {
                tracing::info!(resource = R::PATH, %id, %route, "Confirmed selection");
                let navigator = Arc::clone(&env.navigator);
                smallvec![Effect::future(async move {
                    navigator.navigate(route);
                    None
                })]
            },
            None => {
                tracing::debug!(resource = R::PATH, %id, "Nothing to confirm into");
                SmallVec::new()
            },
        }
    }

    fn confirm_delete(state: &mut PageState<R>, env: &PageEnvironment<R>) -> PageEffects<R> {
        let Some(id) = state.delete_target else {
            tracing::warn!(resource = R::PATH, "Delete confirmed without a target");
            return SmallVec::new();
        };
        if !state.deleting.insert(id) {
            tracing::debug!(resource = R::PATH, %id, "Delete already in flight");
            return SmallVec::new();
        }

        tracing::debug!(resource = R::PATH, %id, in_flight = state.deleting.len(), "Deleting");
        let request = env.gateway().delete(id);

        smallvec![Effect::future(async move {
            let result = request.await;
            Some(PageAction::DeleteFinished { id, result })
        })]
    }

    fn delete_finished(
        &self,
        state: &mut PageState<R>,
        id: EntityId,
        result: Result<(), ApiError>,
        env: &PageEnvironment<R>,
    ) -> PageEffects<R> {
        state.deleting.remove(&id);

        match result {
            Ok(()) => {
                if state.delete_target == Some(id) {
                    state.delete_dialog.close();
                    state.delete_target = None;
                } else {
                    tracing::debug!(
                        resource = R::PATH,
                        %id,
                        target = ?state.delete_target,
                        "Delete finished after the dialog moved on"
                    );
                }

                let mut effects = self.reload(state, env);
                effects.push(notify(
                    &env.notifier,
                    Notification::success(format!("{} deleted successfully.", capitalize(R::LABEL))),
                ));
                effects
            },
            Err(error) => {
                tracing::warn!(resource = R::PATH, %id, %error, "Delete failed");
                smallvec![notify(
                    &env.notifier,
                    Notification::error(format!("Could not delete the {}.", R::LABEL)),
                )]
            },
        }
    }
}

impl<R: Resource> Reducer for PageReducer<R> {
    type State = PageState<R>;
    type Action = PageAction<R>;
    type Environment = PageEnvironment<R>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Lifecycle ==========
            PageAction::Mount { scope } => {
                state.reset_session();
                self.route_list(state, ListAction::Load(ListQuery::first_page(scope)), env)
            },

            PageAction::Refresh => self.reload(state, env),

            PageAction::SetFilter(filter) => {
                self.route_list(state, ListAction::SetFilter(filter), env)
            },

            PageAction::SetScope(scope) => {
                self.route_list(state, ListAction::Load(ListQuery::first_page(scope)), env)
            },

            // ========== Selection ==========
            PageAction::Select(id) => {
                state.selected = Some(id);
                SmallVec::new()
            },

            PageAction::Confirm => Self::confirm(state, env),

            // ========== Dialogs ==========
            PageAction::OpenAdd => {
                state.add_form.restart(FormState::create());
                state.add_dialog.open();
                SmallVec::new()
            },

            PageAction::CloseAdd => {
                state.add_dialog.close();
                SmallVec::new()
            },

            PageAction::EditRequested(record) => {
                state.update_form.restart(FormState::update(&record));
                state.edit_target = Some(record);
                state.update_dialog.open();
                SmallVec::new()
            },

            PageAction::CloseUpdate => {
                state.update_dialog.close();
                state.edit_target = None;
                SmallVec::new()
            },

            PageAction::DeleteRequested(id) => {
                state.delete_target = Some(id);
                state.delete_dialog.open();
                SmallVec::new()
            },

            PageAction::CancelDelete => {
                state.delete_dialog.close();
                state.delete_target = None;
                SmallVec::new()
            },

            PageAction::ConfirmDelete => Self::confirm_delete(state, env),

            PageAction::DeleteFinished { id, result } => {
                self.delete_finished(state, id, result, env)
            },

            // ========== Children ==========
            PageAction::List(action) => self.route_list(state, action, env),

            PageAction::AddForm(action) => {
                let saved = action.saved_session();
                let mut effects = reduce_child(
                    &self.form,
                    &mut state.add_form,
                    action,
                    &env.form,
                    PageAction::AddForm,
                );
                if let Some(session) = saved {
                    if session == state.add_form.session {
                        state.add_dialog.close();
                    }
                    effects.extend(self.reload(state, env));
                }
                effects
            },

            PageAction::UpdateForm(action) => {
                let saved = action.saved_session();
                let mut effects = reduce_child(
                    &self.form,
                    &mut state.update_form,
                    action,
                    &env.form,
                    PageAction::UpdateForm,
                );
                if let Some(session) = saved {
                    if session == state.update_form.session {
                        state.update_dialog.close();
                        state.edit_target = None;
                    }
                    effects.extend(self.reload(state, env));
                }
                effects
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::entities::{Company, CompanyDraft, Role};
    use crate::mock::{InMemoryGateway, RecordingNavigator, RecordingNotifier};
    use crate::navigation::Route;
    use backoffice_testing::{assertions, mocks::test_clock, ReducerTest};

    struct Fixture<R: Resource> {
        gateway: InMemoryGateway<R>,
        notifier: Arc<RecordingNotifier>,
        navigator: Arc<RecordingNavigator>,
        env: PageEnvironment<R>,
    }

    fn fixture<R: Resource>(records: Vec<R>) -> Fixture<R> {
        let gateway = InMemoryGateway::with_records(records);
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let env = PageEnvironment::new(
            gateway.shared(),
            notifier.clone(),
            navigator.clone(),
            Arc::new(test_clock()),
            FailedLoadPolicy::KeepPrevious,
        );
        Fixture {
            gateway,
            notifier,
            navigator,
            env,
        }
    }

    fn acme() -> Company {
        Company::new(EntityId::new(1), "Acme")
    }

    async fn run_effects<R: Resource>(effects: PageEffects<R>) -> Vec<PageAction<R>> {
        let mut produced = Vec::new();
        for effect in effects {
            if let Effect::Future(fut) = effect {
                if let Some(action) = fut.await {
                    produced.push(action);
                }
            }
        }
        produced
    }

    #[test]
    fn mount_resets_session_and_loads() {
        let fx = fixture::<Company>(vec![]);
        let mut state = PageState::new();
        state.selected = Some(EntityId::new(3));
        state.add_dialog.open();
        state.delete_target = Some(EntityId::new(3));

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(state)
            .when_action(PageAction::Mount { scope: None })
            .then_state(|state| {
                assert!(state.selected.is_none());
                assert!(!state.add_dialog.is_open());
                assert!(state.delete_target.is_none());
                assert!(state.list.loading);
                assert_eq!(state.list.generation, 1);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[tokio::test]
    async fn confirm_without_selection_notifies_and_stays() {
        let fx = fixture::<Company>(vec![acme()]);
        let mut state = PageState::new();

        let effects = PageReducer::<Company>::new().reduce(&mut state, PageAction::Confirm, &fx.env);
        run_effects(effects).await;

        assert_eq!(fx.notifier.errors(), vec!["Please select a company.".to_string()]);
        assert!(fx.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn confirm_with_selection_navigates_to_halls() {
        let fx = fixture::<Company>(vec![acme()]);
        let reducer = PageReducer::<Company>::new();
        let mut state = PageState::new();

        let _ = reducer.reduce(&mut state, PageAction::Select(EntityId::new(1)), &fx.env);
        let effects = reducer.reduce(&mut state, PageAction::Confirm, &fx.env);
        run_effects(effects).await;

        assert_eq!(fx.navigator.routes(), vec![Route::CompanyHalls(EntityId::new(1))]);
        assert!(fx.notifier.notifications().is_empty());
        assert_eq!(state.selected, Some(EntityId::new(1)));
    }

    #[test]
    fn confirm_without_route_does_nothing() {
        let fx = fixture::<Role>(vec![]);
        let mut state = PageState::new();
        state.selected = Some(EntityId::new(2));

        ReducerTest::new(PageReducer::<Role>::new())
            .with_env(fx.env)
            .given_state(state)
            .when_action(PageAction::Confirm)
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn edit_requested_prefills_update_form() {
        let fx = fixture::<Company>(vec![]);

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(PageState::new())
            .when_action(PageAction::EditRequested(acme()))
            .then_state(|state| {
                assert!(state.update_dialog.is_open());
                assert_eq!(state.edit_target, Some(acme()));
                assert_eq!(state.update_form.values, CompanyDraft::new("Acme"));
                assert!(!state.add_dialog.is_open());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn dialogs_are_independent() {
        let fx = fixture::<Company>(vec![]);
        let reducer = PageReducer::<Company>::new();
        let mut state = PageState::new();

        let _ = reducer.reduce(&mut state, PageAction::OpenAdd, &fx.env);
        let _ = reducer.reduce(&mut state, PageAction::DeleteRequested(EntityId::new(1)), &fx.env);
        assert!(state.add_dialog.is_open());
        assert!(state.delete_dialog.is_open());

        let _ = reducer.reduce(&mut state, PageAction::CancelDelete, &fx.env);
        assert!(state.add_dialog.is_open());
        assert!(!state.delete_dialog.is_open());
        assert!(state.delete_target.is_none());

        let _ = reducer.reduce(&mut state, PageAction::CloseAdd, &fx.env);
        assert!(!state.add_dialog.is_open());
    }

    #[test]
    fn select_survives_dialog_round_trips() {
        let fx = fixture::<Company>(vec![]);

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(PageState::new())
            .when_actions([
                PageAction::Select(EntityId::new(2)),
                PageAction::OpenAdd,
                PageAction::CloseAdd,
                PageAction::DeleteRequested(EntityId::new(3)),
                PageAction::CancelDelete,
            ])
            .then_state(|state| {
                assert_eq!(state.selected, Some(EntityId::new(2)));
                assert!(!state.add_dialog.is_open());
                assert!(!state.delete_dialog.is_open());
                assert!(state.delete_target.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn delete_failure_keeps_dialog_open() {
        let fx = fixture::<Company>(vec![acme()]);
        let reducer = PageReducer::<Company>::new();
        let mut state = PageState::with_list(ListState::with_items(vec![acme()]));
        let _ = reducer.reduce(&mut state, PageAction::DeleteRequested(EntityId::new(1)), &fx.env);

        let effects = reducer.reduce(
            &mut state,
            PageAction::DeleteFinished {
                id: EntityId::new(1),
                result: Err(ApiError::Api {
                    status: 409,
                    message: "has halls".to_string(),
                }),
            },
            &fx.env,
        );
        let produced = run_effects(effects).await;

        assert!(produced.is_empty());
        assert!(state.delete_dialog.is_open());
        assert_eq!(state.delete_target, Some(EntityId::new(1)));
        assert_eq!(state.list.items, vec![acme()]);
        assert!(!state.list.loading);
        assert_eq!(fx.notifier.errors(), vec!["Could not delete the company.".to_string()]);
        assert!(fx.notifier.successes().is_empty());
    }

    #[tokio::test]
    async fn delete_success_closes_dialog_and_reloads() {
        let fx = fixture::<Company>(vec![]);
        let reducer = PageReducer::<Company>::new();
        let mut state = PageState::new();
        let _ = reducer.reduce(&mut state, PageAction::DeleteRequested(EntityId::new(1)), &fx.env);

        let _ = reducer.reduce(&mut state, PageAction::ConfirmDelete, &fx.env);
        assert!(state.deleting.contains(&EntityId::new(1)));

        let finished = PageAction::DeleteFinished {
            id: EntityId::new(1),
            result: Ok(()),
        };
        let effects = reducer.reduce(&mut state, finished, &fx.env);
        assert!(!state.delete_dialog.is_open());
        assert!(state.deleting.is_empty());
        assert!(state.list.loading);

        let produced = run_effects(effects).await;
        assert!(matches!(produced.as_slice(), [PageAction::List(ListAction::Loaded { .. })]));
        assert_eq!(fx.notifier.successes(), vec!["Company deleted successfully.".to_string()]);
        assert_eq!(fx.gateway.list_calls().len(), 1);
    }

    #[test]
    fn confirm_delete_without_target_is_ignored() {
        let fx = fixture::<Company>(vec![]);

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(PageState::new())
            .when_action(PageAction::ConfirmDelete)
            .then_state(|state| assert!(state.deleting.is_empty()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn saved_form_closes_dialog_and_reloads() {
        let fx = fixture::<Company>(vec![]);
        let mut state = PageState::new();
        state.add_dialog.open();
        state.add_form.submitting = true;

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(state)
            .when_action(PageAction::AddForm(FormAction::Submitted {
                session: 0,
                result: Ok(()),
            }))
            .then_state(|state| {
                assert!(!state.add_dialog.is_open());
                assert!(!state.add_form.submitting);
                assert!(state.list.loading);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 2))
            .run();
    }

    #[test]
    fn failed_form_keeps_dialog_open() {
        let fx = fixture::<Company>(vec![]);
        let mut state = PageState::new();
        let _ = PageReducer::<Company>::new().reduce(
            &mut state,
            PageAction::EditRequested(acme()),
            &fx.env,
        );
        state.update_form.submitting = true;

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(state)
            .when_action(PageAction::UpdateForm(FormAction::Submitted {
                session: 1,
                result: Err(ApiError::Unauthorized),
            }))
            .then_state(|state| {
                assert!(state.update_dialog.is_open());
                assert!(state.edit_target.is_some());
                assert!(!state.list.loading);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn close_update_does_not_reload() {
        let fx = fixture::<Company>(vec![]);
        let mut state = PageState::new();
        state.update_dialog.open();
        state.edit_target = Some(acme());

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(state)
            .when_action(PageAction::CloseUpdate)
            .then_state(|state| {
                assert!(!state.update_dialog.is_open());
                assert!(state.edit_target.is_none());
                assert!(!state.list.loading);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn late_delete_leaves_newer_dialog_open() {
        let fx = fixture::<Company>(vec![]);
        let mut state = PageState::new();
        state.deleting.insert(EntityId::new(1));
        state.delete_target = Some(EntityId::new(2));
        state.delete_dialog.open();

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(state)
            .when_action(PageAction::DeleteFinished {
                id: EntityId::new(1),
                result: Ok(()),
            })
            .then_state(|state| {
                assert!(state.delete_dialog.is_open());
                assert_eq!(state.delete_target, Some(EntityId::new(2)));
                assert!(state.deleting.is_empty());
                assert!(state.list.loading);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 2))
            .run();
    }

    #[test]
    fn confirm_delete_runs_alongside_another_target() {
        let fx = fixture::<Company>(vec![]);
        let mut state = PageState::new();
        state.deleting.insert(EntityId::new(1));

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(state)
            .when_actions([
                PageAction::DeleteRequested(EntityId::new(2)),
                PageAction::ConfirmDelete,
            ])
            .then_state(|state| {
                let in_flight: Vec<_> = state.deleting.iter().copied().collect();
                assert_eq!(in_flight, vec![EntityId::new(1), EntityId::new(2)]);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn repeated_confirm_delete_is_ignored() {
        let fx = fixture::<Company>(vec![]);
        let mut state = PageState::new();
        state.delete_target = Some(EntityId::new(4));
        state.delete_dialog.open();
        state.deleting.insert(EntityId::new(4));

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(state)
            .when_action(PageAction::ConfirmDelete)
            .then_state(|state| assert_eq!(state.deleting.len(), 1))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn late_save_leaves_reopened_dialog_alone() {
        let fx = fixture::<Company>(vec![]);

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(PageState::new())
            .when_actions([
                PageAction::OpenAdd,
                PageAction::CloseAdd,
                PageAction::OpenAdd,
                PageAction::AddForm(FormAction::Edit(CompanyDraft::new("Globex"))),
                PageAction::AddForm(FormAction::Submitted {
                    session: 1,
                    result: Ok(()),
                }),
            ])
            .then_state(|state| {
                assert_eq!(state.add_form.session, 2);
                assert!(state.add_dialog.is_open());
                assert_eq!(state.add_form.values, CompanyDraft::new("Globex"));
                assert!(state.list.loading);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 2))
            .run();
    }

    #[test]
    fn mount_starts_new_form_sessions() {
        let fx = fixture::<Company>(vec![]);
        let mut state = PageState::new();
        state.deleting.insert(EntityId::new(5));

        ReducerTest::new(PageReducer::<Company>::new())
            .with_env(fx.env)
            .given_state(state)
            .when_actions([PageAction::OpenAdd, PageAction::Mount { scope: None }])
            .then_state(|state| {
                assert_eq!(state.add_form.session, 2);
                assert_eq!(state.update_form.session, 1);
                assert!(!state.add_dialog.is_open());
                assert!(state.deleting.contains(&EntityId::new(5)));
            })
            .run();
    }
}
