//! Reducer composition utilities
//!
//! A screen is usually assembled from smaller reducers: a page embeds a list
//! and two forms, the reservations screen embeds a page and an event lookup.
//! The parent owns the child state as a field and wraps the child's actions
//! in one of its own variants. [`reduce_child`] runs the child reducer on
//! that field and lifts the resulting effects back into the parent's action
//! type.
//!
//! # Example
//!
//! ```
//! use backoffice_core::{composition::reduce_child, effect::Effect, reducer::Reducer};
//! use backoffice_core::{smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState { count: i32 }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction { Increment }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, _action: CounterAction, _env: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         state.count += 1;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct AppState { counter: CounterState }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction { Counter(CounterAction) }
//!
//! let mut app = AppState::default();
//! let effects = reduce_child(
//!     &CounterReducer,
//!     &mut app.counter,
//!     CounterAction::Increment,
//!     &(),
//!     AppAction::Counter,
//! );
//! assert_eq!(app.counter.count, 1);
//! assert!(effects.is_empty());
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Run a child reducer on a slice of parent state and lift its effects.
///
/// `embed` wraps every action produced by the child's effects into the
/// parent's action type, so feedback is routed back through the parent.
/// No-op effects are dropped.
pub fn reduce_child<R, P>(
    reducer: &R,
    state: &mut R::State,
    action: R::Action,
    env: &R::Environment,
    embed: fn(R::Action) -> P,
) -> SmallVec<[Effect<P>; 4]>
where
    R: Reducer,
    R::Action: Send + 'static,
    P: Send + 'static,
{
    reducer
        .reduce(state, action, env)
        .into_iter()
        .filter(|effect| !effect.is_none())
        .map(|effect| effect.map(embed))
        .collect()
}
