//! plotcast: Centralized state management for a terminal forecast plotter
//!
//! Like Redux/Elm, but for terminals. Components are pure functions of state,
//! and all state mutations happen through dispatched actions. Every dispatch
//! that changes state publishes a fresh immutable snapshot.
//!
//! # Example
//! ```ignore
//! use plotcast::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(infer_categories)]
//! enum Action {
//!     SetLocation(String),
//!     ForecastFetch,
//! }
//! ```

// Re-export everything from core
pub use plotcast_core::*;

// Re-export derive macros
pub use plotcast_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use plotcast_core::{Action, ActionCategory, ActionSummary, Component};

    // Event system
    pub use plotcast_core::{process_raw_event, spawn_event_poller, EventKind, RawEvent};

    // Store
    pub use plotcast_core::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, SubscriberId,
    };

    // Effects + runtime
    pub use plotcast_core::{
        DispatchResult, EffectContext, EffectReducer, EffectRuntime, EffectStore,
        EffectStoreWithMiddleware, EventOutcome, PollerConfig,
    };
    #[cfg(feature = "tasks")]
    pub use plotcast_core::{TaskKey, TaskManager};

    // Derive macros
    pub use plotcast_macros::Action;

    // Ratatui re-exports
    pub use plotcast_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
