use std::sync::Once;

use entryflow_core::{update, Effect, MonitorState, Msg, NewEntry, PageRef, SessionState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(flow_logging::initialize_for_tests);
}

fn seeded() -> MonitorState {
    let (state, _) = update(
        MonitorState::new(),
        Msg::ThreadSeeded {
            thread_url: "https://forum.example.com/some-topic--123".to_string(),
            page: Some(PageRef::new(1, 1)),
            entries: vec![NewEntry {
                id: 1,
                html: "<li data-id=\"1\">first</li>".to_string(),
            }],
        },
    );
    state
}

#[test]
fn out_of_range_interval_is_rejected() {
    init_logging();
    for secs in [5_u32, 400] {
        let (state, effects) = update(seeded(), Msg::IntervalSubmitted(secs));

        assert_eq!(state.interval_ms(), 30_000, "interval changed for {secs}");
        assert!(
            matches!(effects.as_slice(), [Effect::Notify(_)]),
            "expected rejection notification for {secs}"
        );
    }
}

#[test]
fn boundary_intervals_are_accepted_and_persisted() {
    init_logging();
    for (secs, expected_ms) in [(10_u32, 10_000_u64), (300, 300_000)] {
        let (state, effects) = update(seeded(), Msg::IntervalSubmitted(secs));

        assert_eq!(state.interval_ms(), expected_ms);
        assert!(effects.contains(&Effect::PersistInterval {
            interval_ms: expected_ms
        }));
    }
}

#[test]
fn interval_change_while_active_restarts_timers() {
    init_logging();
    let (state, _) = update(seeded(), Msg::ToggleMonitoring);
    let (state, _) = update(
        state,
        Msg::CheckFinished(entryflow_core::CheckReport {
            entries: Vec::new(),
            total_pages: Some(1),
            error: None,
        }),
    );
    assert_eq!(state.session(), SessionState::Active);

    let (state, effects) = update(state, Msg::IntervalSubmitted(60));

    assert_eq!(state.interval_ms(), 60_000);
    let cancel_at = effects
        .iter()
        .position(|e| *e == Effect::CancelRecurringTimer)
        .expect("cancel timer");
    let start_at = effects
        .iter()
        .position(|e| *e == Effect::StartRecurringTimer { interval_ms: 60_000 })
        .expect("restart timer");
    assert!(cancel_at < start_at, "restart must follow the cancel");
    assert!(effects.contains(&Effect::CancelCountdown));
    assert!(effects.contains(&Effect::StartCountdown));
    assert!(
        effects
            .iter()
            .any(|e| matches!(e, Effect::StartCheck(_))),
        "restart performs an immediate check"
    );
    assert_eq!(state.view().countdown_secs, Some(60));
}

#[test]
fn interval_change_while_paused_touches_no_timers() {
    init_logging();
    let (state, effects) = update(seeded(), Msg::IntervalSubmitted(45));

    assert_eq!(state.session(), SessionState::Paused);
    assert_eq!(state.interval_ms(), 45_000);
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::StartRecurringTimer { .. } | Effect::StartCheck(_))));
}

#[test]
fn stored_interval_is_applied_at_startup() {
    init_logging();
    let (state, effects) = update(MonitorState::new(), Msg::SettingsLoaded(Some(120_000)));

    assert_eq!(state.interval_ms(), 120_000);
    assert!(effects.is_empty());
}

#[test]
fn missing_or_invalid_stored_interval_keeps_default() {
    init_logging();
    let (state, _) = update(MonitorState::new(), Msg::SettingsLoaded(None));
    assert_eq!(state.interval_ms(), 30_000);

    // A stored value outside the accepted range must not defeat the clamp.
    let (state, _) = update(state, Msg::SettingsLoaded(Some(5_000)));
    assert_eq!(state.interval_ms(), 30_000);
    let (state, _) = update(state, Msg::SettingsLoaded(Some(900_000)));
    assert_eq!(state.interval_ms(), 30_000);
}
