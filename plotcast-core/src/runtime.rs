//! Runtime loop for effect-based plotcast apps.
//!
//! The runtime owns the store, the action queue and (with the `tasks`
//! feature) the task manager. It polls terminal events, maps them to
//! actions, runs every action through the reducer one at a time, hands the
//! resulting effects to the app, and re-renders when state changed.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effect::{DispatchResult, EffectStore, EffectStoreWithMiddleware};
use crate::event::EventKind;
use crate::poller::{process_raw_event, spawn_event_poller, RawEvent};
use crate::store::Middleware;
use crate::Action;

#[cfg(feature = "tasks")]
use crate::tasks::TaskManager;

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Actions to enqueue.
    pub actions: Vec<A>,
    /// Whether to force a re-render.
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// Wrap a single action.
    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Create from any iterator of actions
    ///
    /// Useful for converting `Component::handle_event` results which return
    /// `impl IntoIterator<Item = A>`.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Mark that a render is needed.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

impl<A> From<Vec<A>> for EventOutcome<A> {
    fn from(actions: Vec<A>) -> Self {
        Self::from_actions(actions)
    }
}

/// Effect store interface used by `EffectRuntime`.
pub trait EffectStoreLike<S, A: Action, E> {
    /// Dispatch an action and return state changes plus effects.
    fn dispatch(&mut self, action: A) -> DispatchResult<E>;
    /// Get the current state.
    fn state(&self) -> &S;
}

impl<S: Clone, A: Action, E> EffectStoreLike<S, A, E> for EffectStore<S, A, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStore::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStore::state(self)
    }
}

impl<S: Clone, A: Action, E, M: Middleware<A>> EffectStoreLike<S, A, E>
    for EffectStoreWithMiddleware<S, A, E, M>
{
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStoreWithMiddleware::state(self)
    }
}

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    #[cfg(feature = "tasks")]
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Send an action directly.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Access the action sender.
    pub fn action_tx(&self) -> &mpsc::UnboundedSender<A> {
        self.action_tx
    }

    /// Access the task manager.
    #[cfg(feature = "tasks")]
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Runtime helper for effect-based stores.
pub struct EffectRuntime<S, A: Action, E, St: EffectStoreLike<S, A, E> = EffectStore<S, A, E>> {
    store: St,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller_config: PollerConfig,
    should_render: bool,
    #[cfg(feature = "tasks")]
    tasks: TaskManager<A>,
    _state: std::marker::PhantomData<S>,
    _effect: std::marker::PhantomData<E>,
}

impl<S: Clone + 'static, A: Action, E> EffectRuntime<S, A, E, EffectStore<S, A, E>> {
    /// Create a runtime from state + effect reducer.
    pub fn new(state: S, reducer: crate::effect::EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S: 'static, A: Action, E, St: EffectStoreLike<S, A, E>> EffectRuntime<S, A, E, St> {
    /// Create a runtime from an existing effect store.
    pub fn from_store(store: St) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        #[cfg(feature = "tasks")]
        let tasks = TaskManager::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            should_render: true,
            #[cfg(feature = "tasks")]
            tasks,
            _state: std::marker::PhantomData,
            _effect: std::marker::PhantomData,
        }
    }

    /// Configure event polling behavior.
    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Clone the action sender.
    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Access the task manager.
    #[cfg(feature = "tasks")]
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    fn effect_context(&mut self) -> EffectContext<'_, A> {
        EffectContext {
            action_tx: &self.action_tx,
            #[cfg(feature = "tasks")]
            tasks: &mut self.tasks,
        }
    }

    /// Run one action through the store and hand its effects to `handle_effect`.
    ///
    /// Returns `true` if `should_quit` matched the action.
    fn process_action<FQuit, FEffect>(
        &mut self,
        action: A,
        should_quit: &mut FQuit,
        handle_effect: &mut FEffect,
    ) -> bool
    where
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        if should_quit(&action) {
            return true;
        }

        let result = self.store.dispatch(action);
        if result.has_effects() {
            let mut ctx = self.effect_context();
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }
        self.should_render |= result.changed;
        false
    }

    /// Dispatch every action currently queued, without waiting for more.
    ///
    /// Actions enqueued by effect handlers during this call are processed
    /// too. Returns `true` if a quit action was seen; remaining actions stay
    /// queued in that case.
    pub fn process_pending<FQuit, FEffect>(
        &mut self,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> bool
    where
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        while let Ok(action) = self.action_rx.try_recv() {
            if self.process_action(action, &mut should_quit, &mut handle_effect) {
                return true;
            }
        }
        false
    }

    /// Map one event against the current state and apply the resulting
    /// actions, plus anything else already queued, before returning.
    ///
    /// The next event is therefore mapped against a state that includes this
    /// one's changes. Returns `true` if a quit action was seen.
    pub fn dispatch_event<FEvent, R, FQuit, FEffect>(
        &mut self,
        event: &EventKind,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> bool
    where
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let outcome: EventOutcome<A> = map_event(event, self.store.state()).into();
        if outcome.needs_render {
            self.should_render = true;
        }
        for action in outcome.actions {
            if self.process_action(action, &mut should_quit, &mut handle_effect) {
                return true;
            }
        }
        self.process_pending(&mut should_quit, &mut handle_effect)
    }

    /// Run the event/action loop until quit.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    render(frame, frame.area(), state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    if self.dispatch_event(
                        &event,
                        &mut map_event,
                        &mut should_quit,
                        &mut handle_effect,
                    ) {
                        break;
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    // Apply everything already queued (e.g. a loader batch)
                    // before the next frame is drawn.
                    if self.process_action(action, &mut should_quit, &mut handle_effect)
                        || self.process_pending(&mut should_quit, &mut handle_effect)
                    {
                        break;
                    }
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        #[cfg(feature = "tasks")]
        self.tasks.cancel_all();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::char_key;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Add(i32),
        AddLater(i32),
        Set(i32),
        Quit,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Add(_) => "Add",
                TestAction::AddLater(_) => "AddLater",
                TestAction::Set(_) => "Set",
                TestAction::Quit => "Quit",
            }
        }
    }

    #[derive(Debug, PartialEq)]
    enum TestEffect {
        Emit(i32),
    }

    fn reducer(state: &mut i32, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Add(n) => {
                *state += n;
                DispatchResult::changed_if(n != 0)
            }
            TestAction::AddLater(n) => DispatchResult::effect(TestEffect::Emit(n)),
            TestAction::Set(n) => {
                let changed = *state != n;
                *state = n;
                DispatchResult::changed_if(changed)
            }
            TestAction::Quit => DispatchResult::unchanged(),
        }
    }

    fn emit_effect(effect: TestEffect, ctx: &mut EffectContext<TestAction>) {
        match effect {
            TestEffect::Emit(n) => ctx.emit(TestAction::Add(n)),
        }
    }

    #[test]
    fn test_process_pending_runs_queue_in_order() {
        let mut runtime = EffectRuntime::new(0, reducer);
        runtime.enqueue(TestAction::Add(2));
        runtime.enqueue(TestAction::AddLater(5));
        runtime.enqueue(TestAction::Add(1));

        let quit = runtime.process_pending(|a| *a == TestAction::Quit, emit_effect);

        assert!(!quit);
        assert_eq!(*runtime.state(), 8);
    }

    #[test]
    fn test_process_pending_stops_at_quit() {
        let mut runtime = EffectRuntime::new(0, reducer);
        runtime.enqueue(TestAction::Add(1));
        runtime.enqueue(TestAction::Quit);
        runtime.enqueue(TestAction::Add(100));

        let quit = runtime.process_pending(|a| *a == TestAction::Quit, emit_effect);

        assert!(quit);
        assert_eq!(*runtime.state(), 1);
    }

    /// Appends a typed digit to the number in state, like a text field
    /// rebuilding its value from props.
    fn append_digit(event: &EventKind, state: &i32) -> EventOutcome<TestAction> {
        match event {
            EventKind::Key(key) => match key.code {
                crossterm::event::KeyCode::Char(c) => c
                    .to_digit(10)
                    .map(|d| TestAction::Set(state * 10 + d as i32))
                    .into_iter()
                    .collect::<Vec<_>>()
                    .into(),
                crossterm::event::KeyCode::Esc => TestAction::Quit.into(),
                _ => EventOutcome::ignored(),
            },
            _ => EventOutcome::ignored(),
        }
    }

    #[test]
    fn test_back_to_back_events_see_previous_changes() {
        let mut runtime = EffectRuntime::new(0, reducer);

        for c in ['1', '2', '3'] {
            let quit = runtime.dispatch_event(
                &EventKind::Key(char_key(c)),
                append_digit,
                |a| *a == TestAction::Quit,
                emit_effect,
            );
            assert!(!quit);
        }

        assert_eq!(*runtime.state(), 123);
    }

    #[test]
    fn test_dispatch_event_drains_queue_and_reports_quit() {
        let mut runtime = EffectRuntime::new(0, reducer);
        runtime.enqueue(TestAction::AddLater(5));

        assert!(!runtime.dispatch_event(
            &EventKind::Key(char_key('1')),
            append_digit,
            |a| *a == TestAction::Quit,
            emit_effect,
        ));
        assert_eq!(*runtime.state(), 6);

        assert!(runtime.dispatch_event(
            &EventKind::Key(crate::testing::key("esc")),
            append_digit,
            |a| *a == TestAction::Quit,
            emit_effect,
        ));
    }

    #[test]
    fn test_event_outcome_conversions() {
        let outcome: EventOutcome<TestAction> = TestAction::Quit.into();
        assert_eq!(outcome.actions, vec![TestAction::Quit]);
        assert!(!outcome.needs_render);

        let outcome: EventOutcome<TestAction> = vec![TestAction::Add(1), TestAction::Add(2)].into();
        assert_eq!(outcome.actions.len(), 2);

        let outcome = EventOutcome::<TestAction>::ignored().with_render();
        assert!(outcome.actions.is_empty());
        assert!(outcome.needs_render);
    }
}
