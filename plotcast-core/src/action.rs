//! Action traits for type-safe state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions describe one intended state change. They should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: Async tasks send them back across threads
///
/// Use `#[derive(Action)]` from `plotcast-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Category information generated by `#[action(infer_categories)]`
pub trait ActionCategory: Action {
    /// Enum of all categories for this action type
    type Category: Copy + Debug + Eq;

    /// Category name, `None` for uncategorized actions
    fn category(&self) -> Option<&'static str>;

    /// Category as an enum value
    fn category_enum(&self) -> Self::Category;
}

/// Concise, log-friendly rendering of an action
///
/// The default uses the `Debug` output. Override it for actions that carry
/// large payloads.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
