//! Core traits and types for plotcast
//!
//! This crate provides the foundational abstractions for building terminal
//! widgets with centralized state management, following a Redux/Elm-inspired
//! architecture.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **Store**: Centralized state container holding immutable snapshots
//! - **Effect**: Declarative side effects returned by reducers
//! - **Component**: Pure UI elements that render based on props
//! - **Runtime**: Event/action loop tying the pieces together
//!
//! # Basic Example
//!
//! ```ignore
//! use plotcast_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum MyAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     counter: i32,
//! }
//!
//! fn reducer(state: &mut AppState, action: MyAction) -> bool {
//!     match action {
//!         MyAction::Increment => { state.counter += 1; true }
//!         MyAction::Decrement => { state.counter -= 1; true }
//!     }
//! }
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! store.dispatch(MyAction::Increment);
//! ```
//!
//! # Async Loader Pattern
//!
//! Async work is described by effects and run by the [`TaskManager`]:
//!
//! 1. **Intent actions** make the reducer emit an effect (e.g., `ForecastFetch`)
//! 2. The effect handler spawns a keyed task on the runtime
//! 3. **Result actions** carry the outcome back (e.g., `SetData`, `LoadFailed`)
//!
//! ```ignore
//! fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
//!     match effect {
//!         Effect::LoadForecast { query } => {
//!             ctx.tasks().spawn_batch("forecast", load(query));
//!         }
//!     }
//! }
//! ```
//!
//! Spawning under a key that is already in flight aborts the older task, so
//! only the newest request can deliver its results.

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod poller;
pub mod runtime;
pub mod store;
#[cfg(feature = "tasks")]
pub mod tasks;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionCategory, ActionSummary};
pub use component::Component;

// Event system exports
pub use event::EventKind;
pub use poller::{process_raw_event, spawn_event_poller, RawEvent};

// Store exports
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, SubscriberId};

// Effect exports
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};

// Runtime exports
pub use runtime::{EffectContext, EffectRuntime, EffectStoreLike, EventOutcome, PollerConfig};

// Task exports (requires "tasks" feature)
#[cfg(feature = "tasks")]
pub use tasks::{TaskKey, TaskManager};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_to_string_plain, char_key, click, ctrl_key, key, parse_key_string, type_text,
    ActionAssertions, RenderHarness, TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory, ActionSummary};
    pub use crate::component::Component;
    pub use crate::effect::{
        DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware,
    };
    pub use crate::event::EventKind;
    pub use crate::runtime::{EffectContext, EffectRuntime, EventOutcome, PollerConfig};
    pub use crate::store::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, SubscriberId,
    };
    #[cfg(feature = "tasks")]
    pub use crate::tasks::{TaskKey, TaskManager};

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
