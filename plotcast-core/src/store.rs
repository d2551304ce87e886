//! Centralized state store with reducer pattern
//!
//! The store publishes state as immutable snapshots. Each dispatch runs the
//! reducer on a private copy of the current snapshot; the copy replaces the
//! snapshot only when the reducer reports a change. An action the reducer
//! ignores therefore leaves the very same `Arc` in place, which lets readers
//! detect changes with [`Arc::ptr_eq`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::action::{Action, ActionSummary};

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber<S> = Box<dyn FnMut(&Arc<S>)>;

/// Current snapshot plus the listeners interested in replacements.
///
/// Shared by [`Store`] and [`EffectStore`](crate::EffectStore).
pub(crate) struct StateCell<S> {
    current: Arc<S>,
    subscribers: Vec<(SubscriberId, Subscriber<S>)>,
    next_id: u64,
}

impl<S: Clone> StateCell<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            current: Arc::new(state),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn get(&self) -> &S {
        &self.current
    }

    pub(crate) fn snapshot(&self) -> Arc<S> {
        Arc::clone(&self.current)
    }

    pub(crate) fn get_mut(&mut self) -> &mut S {
        Arc::make_mut(&mut self.current)
    }

    /// Run `reduce` against a copy of the snapshot and publish it if `changed`.
    pub(crate) fn apply<R>(
        &mut self,
        reduce: impl FnOnce(&mut S) -> R,
        changed: impl FnOnce(&R) -> bool,
    ) -> R {
        let mut next = S::clone(&self.current);
        let outcome = reduce(&mut next);
        if changed(&outcome) {
            self.current = Arc::new(next);
            for (_, subscriber) in self.subscribers.iter_mut() {
                subscriber(&self.current);
            }
        }
        outcome
    }

    pub(crate) fn subscribe(&mut self, subscriber: impl FnMut(&Arc<S>) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Centralized state store with Redux-like reducer pattern
///
/// The store holds the application state and provides a single point
/// for state transitions through the `dispatch` method.
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
///
/// # Example
/// ```ignore
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: i32,
/// }
///
/// #[derive(Action, Clone, Debug)]
/// enum MyAction {
///     Increment,
///     Decrement,
/// }
///
/// fn reducer(state: &mut AppState, action: MyAction) -> bool {
///     match action {
///         MyAction::Increment => {
///             state.counter += 1;
///             true
///         }
///         MyAction::Decrement => {
///             state.counter -= 1;
///             true
///         }
///     }
/// }
///
/// let mut store = Store::new(AppState::default(), reducer);
/// store.dispatch(MyAction::Increment);
/// assert_eq!(store.state().counter, 1);
/// ```
pub struct Store<S, A: Action> {
    cell: StateCell<S>,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S: Clone, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            cell: StateCell::new(state),
            reducer,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action to the store
    ///
    /// The reducer is called with a copy of the current state and the action.
    /// Returns `true` if the state changed and a re-render is needed; in that
    /// case subscribers have already been notified.
    pub fn dispatch(&mut self, action: A) -> bool {
        let reducer = self.reducer;
        self.cell
            .apply(|state| reducer(state, action), |changed| *changed)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.cell.get()
    }

    /// Get a shared handle to the current immutable snapshot
    pub fn snapshot(&self) -> Arc<S> {
        self.cell.snapshot()
    }

    /// Get a mutable reference to the state
    ///
    /// Use this sparingly - prefer dispatching actions for state changes.
    /// Subscribers are not notified.
    pub fn state_mut(&mut self) -> &mut S {
        self.cell.get_mut()
    }

    /// Register a listener called after every state-changing dispatch
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Arc<S>) + 'static) -> SubscriberId {
        self.cell.subscribe(subscriber)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.cell.unsubscribe(id)
    }
}

impl<S, A: Action> fmt::Debug for Store<S, A>
where
    S: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", self.cell.get())
            .field("subscribers", &self.cell.subscriber_count())
            .finish()
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting concerns
/// to your store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                summary = %action.summary(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}
