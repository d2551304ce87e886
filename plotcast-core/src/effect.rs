//! Effect-based state management
//!
//! This module provides an effect-aware store that allows reducers to emit
//! side effects alongside state changes. Effects are declarative descriptions
//! of work to be done, not the work itself.
//!
//! The plain reducer returns `bool` (state changed or not):
//! ```ignore
//! fn reducer(state: &mut S, action: A) -> bool
//! ```
//!
//! An effect-aware reducer returns both change status and effects:
//! ```ignore
//! fn reducer(state: &mut S, action: A) -> DispatchResult<E>
//! ```
//!
//! # Example
//!
//! ```ignore
//! enum Effect {
//!     LoadForecast { query: String },
//! }
//!
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::ForecastFetch => {
//!             state.is_loading = true;
//!             DispatchResult::changed_with(Effect::LoadForecast {
//!                 query: state.location.clone(),
//!             })
//!         }
//!         Action::SetData(data) => {
//!             state.forecast_data = Some(data);
//!             DispatchResult::changed()
//!         }
//!         _ => DispatchResult::unchanged(),
//!     }
//! }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use crate::action::Action;
use crate::store::{Middleware, StateCell, SubscriberId};

/// Result of dispatching an action to an effect-aware store.
///
/// Contains both the state change indicator and any effects to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// Create a result indicating no state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// Create a result indicating state changed but no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// Create a result from a plain change flag.
    #[inline]
    pub fn changed_if(changed: bool) -> Self {
        Self {
            changed,
            effects: vec![],
        }
    }

    /// Create a result with a single effect but no state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// Create a result indicating state changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
///
/// Takes mutable state and an action, returns whether state changed
/// and any effects to process.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// A store that supports effect-emitting reducers.
///
/// Similar to [`Store`](crate::Store), but the reducer returns
/// [`DispatchResult<E>`] instead of `bool`, allowing it to declare
/// side effects alongside state changes. Snapshot semantics are the same:
/// an unchanged result keeps the current `Arc`.
pub struct EffectStore<S, A, E> {
    cell: StateCell<S>,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    S: Clone,
    A: Action,
{
    /// Create a new effect store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            cell: StateCell::new(state),
            reducer,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        self.cell.get()
    }

    /// Get a shared handle to the current immutable snapshot.
    #[inline]
    pub fn snapshot(&self) -> Arc<S> {
        self.cell.snapshot()
    }

    /// Get a mutable reference to the state.
    ///
    /// Use sparingly - prefer dispatching actions for state changes.
    /// This is mainly useful for initialization.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        self.cell.get_mut()
    }

    /// Register a listener called after every state-changing dispatch.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Arc<S>) + 'static) -> SubscriberId {
        self.cell.subscribe(subscriber)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.cell.unsubscribe(id)
    }

    /// Dispatch an action to the store.
    ///
    /// The reducer is called with a copy of the current state and the action,
    /// returning whether state changed and any effects to process.
    #[inline]
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        let reducer = self.reducer;
        self.cell
            .apply(|state| reducer(state, action), |result| result.changed)
    }
}

/// An effect store with middleware support.
///
/// Wraps an [`EffectStore`] and calls middleware hooks before and after
/// each dispatch. The middleware receives action references and the
/// state change indicator, but not the effects.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    S: Clone,
    A: Action,
    M: Middleware<A>,
{
    /// Create a new effect store with middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a shared handle to the current immutable snapshot.
    #[inline]
    pub fn snapshot(&self) -> Arc<S> {
        self.store.snapshot()
    }

    /// Register a listener called after every state-changing dispatch.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Arc<S>) + 'static) -> SubscriberId {
        self.store.subscribe(subscriber)
    }

    /// Get a reference to the middleware.
    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Dispatch an action through middleware and store.
    ///
    /// Calls `middleware.before()`, then `store.dispatch()`,
    /// then `middleware.after()` with the state change indicator.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}
