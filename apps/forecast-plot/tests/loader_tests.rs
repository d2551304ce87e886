//! Loader and effect-handler tests against a canned forecast source

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use forecast_plot::effect::FORECAST_TASK;
use forecast_plot::{
    handle_effect, load_forecast, reducer, Action, AppState, ForecastConfig, ForecastSource,
    LoadError, RawResponse, Units,
};
use plotcast::testing::{ActionAssertions, TestHarness};
use plotcast::{EffectRuntime, EffectStoreLike, TaskKey};

const TWO_POINTS: &str = r#"{
    "city": {"name": "Paris", "country": "FR"},
    "list": [
        {"dt": 1704067200, "dt_txt": "T0", "main": {"temp": 5, "humidity": 80}},
        {"dt": 1704078000, "dt_txt": "T1", "main": {"temp": 7}}
    ]
}"#;

/// Answers each URL with a fixed response, optionally after a delay.
#[derive(Default)]
struct StubSource {
    routes: HashMap<String, (Duration, Result<RawResponse, LoadError>)>,
    fallback: Option<Result<RawResponse, LoadError>>,
    calls: Mutex<Vec<String>>,
}

impl StubSource {
    fn always(response: Result<RawResponse, LoadError>) -> Self {
        Self {
            fallback: Some(response),
            ..Default::default()
        }
    }

    fn route(mut self, url: &str, delay: Duration, body: &str) -> Self {
        self.routes
            .insert(url.to_string(), (delay, Ok(RawResponse::new(200, body))));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ForecastSource for StubSource {
    async fn fetch(&self, url: &str) -> Result<RawResponse, LoadError> {
        self.calls.lock().unwrap().push(url.to_string());
        let (delay, response) = match self.routes.get(url) {
            Some((delay, response)) => (*delay, response.clone()),
            None => (
                Duration::ZERO,
                self.fallback
                    .clone()
                    .unwrap_or_else(|| Err(LoadError::Transport(format!("no route for {url}")))),
            ),
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

fn config() -> ForecastConfig {
    ForecastConfig::new("http://stub/forecast", "key", Units::Metric)
}

#[tokio::test]
async fn test_success_dispatches_five_actions_in_order() {
    let source = Arc::new(StubSource::always(Ok(RawResponse::new(200, TWO_POINTS))));
    let mut harness = TestHarness::<(), Action>::new(());

    load_forecast(Arc::clone(&source), "http://stub/forecast?q=Paris")
        .run(harness.dispatcher())
        .await;

    let actions = harness.drain_emitted();
    actions.assert_count(5);
    let names: Vec<_> = actions.iter().map(plotcast::Action::name).collect();
    assert_eq!(
        names,
        vec![
            "SetData",
            "SetDates",
            "SetTemps",
            "SetSelectedDate",
            "SetSelectedTemp"
        ]
    );
    assert_eq!(actions[1], Action::SetDates(vec!["T0".into(), "T1".into()]));
    assert_eq!(actions[2], Action::SetTemps(vec![5.0, 7.0]));
    assert_eq!(actions[3], Action::SetSelectedDate(None));
    assert_eq!(actions[4], Action::SetSelectedTemp(None));
    assert_eq!(source.calls().len(), 1);
}

#[tokio::test]
async fn test_round_trip_into_state() {
    let source = Arc::new(StubSource::always(Ok(RawResponse::new(200, TWO_POINTS))));
    let mut state = AppState::default();
    state.selected.date = Some("stale".into());

    for action in load_forecast(source, "u").actions().await {
        reducer(&mut state, action);
    }

    assert_eq!(state.dates, vec!["T0", "T1"]);
    assert_eq!(state.temps, vec![5.0, 7.0]);
    assert!(state.selected.is_empty());
    assert_eq!(
        state.city().map(|c| c.display_name()).as_deref(),
        Some("Paris, FR")
    );
}

#[tokio::test]
async fn test_failures_dispatch_single_load_failed() {
    let cases = [
        (
            Err(LoadError::Transport("connection refused".into())),
            LoadError::Transport("connection refused".into()),
        ),
        (
            Ok(RawResponse::new(401, r#"{"cod":401,"message":"Invalid API key"}"#)),
            LoadError::Api {
                status: 401,
                message: "Invalid API key".into(),
            },
        ),
    ];

    for (response, expected) in cases {
        let source = Arc::new(StubSource::always(response));
        let actions = load_forecast(Arc::clone(&source), "u").actions().await;

        actions.assert_count(1);
        actions.assert_first(Action::LoadFailed(expected));
        assert_eq!(source.calls().len(), 1);
    }
}

#[tokio::test]
async fn test_malformed_and_unexpected_bodies() {
    let source = Arc::new(StubSource::always(Ok(RawResponse::new(200, "not json"))));
    let actions = load_forecast(source, "u").actions().await;
    assert!(matches!(
        actions.as_slice(),
        [Action::LoadFailed(LoadError::MalformedBody(_))]
    ));

    let source = Arc::new(StubSource::always(Ok(RawResponse::new(
        200,
        r#"{"list": "nope"}"#,
    ))));
    let actions = load_forecast(source, "u").actions().await;
    assert!(matches!(
        actions.as_slice(),
        [Action::LoadFailed(LoadError::UnexpectedShape(_))]
    ));
}

async fn wait_for_task<E, St>(runtime: &mut EffectRuntime<AppState, Action, E, St>)
where
    St: EffectStoreLike<AppState, Action, E>,
{
    for _ in 0..100 {
        if !runtime.tasks().is_running(&TaskKey::new(FORECAST_TASK)) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("forecast task did not finish");
}

#[tokio::test]
async fn test_fetch_through_runtime_updates_state() {
    let source = Arc::new(StubSource::always(Ok(RawResponse::new(200, TWO_POINTS))));
    let config = config();
    let mut runtime = EffectRuntime::new(AppState::default(), reducer);

    runtime.enqueue(Action::SetLocation("Paris,FR".into()));
    runtime.enqueue(Action::ForecastFetch);
    runtime.process_pending(
        |a| matches!(a, Action::Quit),
        |effect, ctx| handle_effect(effect, ctx, &config, &source),
    );
    assert!(runtime.state().is_loading);

    wait_for_task(&mut runtime).await;
    runtime.process_pending(
        |a| matches!(a, Action::Quit),
        |effect, ctx| handle_effect(effect, ctx, &config, &source),
    );

    let state = runtime.state();
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(state.temps, vec![5.0, 7.0]);
    assert_eq!(
        source.calls(),
        vec!["http://stub/forecast?q=Paris%2CFR&APPID=key&units=metric"]
    );
}

#[tokio::test]
async fn test_newer_submission_wins() {
    let config = config();
    let slow_url = config.forecast_url("Slow,XX");
    let fast_url = config.forecast_url("Fast,YY");
    let source = Arc::new(
        StubSource::default()
            .route(
                &slow_url,
                Duration::from_millis(200),
                r#"{"list":[{"dt_txt":"slow","main":{"temp":1}}]}"#,
            )
            .route(
                &fast_url,
                Duration::ZERO,
                r#"{"list":[{"dt_txt":"fast","main":{"temp":2}}]}"#,
            ),
    );
    let mut runtime = EffectRuntime::new(AppState::default(), reducer);

    runtime.enqueue(Action::SetLocation("Slow,XX".into()));
    runtime.enqueue(Action::ForecastFetch);
    runtime.enqueue(Action::SetLocation("Fast,YY".into()));
    runtime.enqueue(Action::ForecastFetch);
    runtime.process_pending(
        |a| matches!(a, Action::Quit),
        |effect, ctx| handle_effect(effect, ctx, &config, &source),
    );

    wait_for_task(&mut runtime).await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    runtime.process_pending(
        |a| matches!(a, Action::Quit),
        |effect, ctx| handle_effect(effect, ctx, &config, &source),
    );

    assert_eq!(runtime.state().dates, vec!["fast"]);
    assert_eq!(runtime.state().last_query.as_deref(), Some("Fast,YY"));
}

#[tokio::test]
async fn test_result_queued_behind_newer_submit_is_dropped() {
    let config = config();
    let source = Arc::new(
        StubSource::default()
            .route(
                &config.forecast_url("Aaa,AA"),
                Duration::from_millis(50),
                r#"{"list":[{"dt_txt":"A","main":{"temp":1}}]}"#,
            )
            .route(
                &config.forecast_url("Bbb,BB"),
                Duration::from_secs(2),
                r#"{"list":[{"dt_txt":"B","main":{"temp":2}}]}"#,
            ),
    );
    let mut runtime = EffectRuntime::new(AppState::default(), reducer);

    runtime.enqueue(Action::SetLocation("Aaa,AA".into()));
    runtime.enqueue(Action::ForecastFetch);
    runtime.process_pending(
        |a| matches!(a, Action::Quit),
        |effect, ctx| handle_effect(effect, ctx, &config, &source),
    );

    // A's result lands in the queue behind B's submit.
    runtime.enqueue(Action::SetLocation("Bbb,BB".into()));
    runtime.enqueue(Action::ForecastFetch);
    tokio::time::sleep(Duration::from_millis(150)).await;
    runtime.process_pending(
        |a| matches!(a, Action::Quit),
        |effect, ctx| handle_effect(effect, ctx, &config, &source),
    );

    let state = runtime.state();
    assert!(state.dates.is_empty(), "stale series applied: {:?}", state.dates);
    assert!(state.is_loading);
    assert_eq!(state.pending_query.as_deref(), Some("Bbb,BB"));
    assert_eq!(state.last_query, None);
}
