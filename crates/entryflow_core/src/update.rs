use crate::{
    derive_base_query, CheckReport, Effect, MonitorState, Msg, NewEntry, SessionState, StatusKind,
    MAX_INTERVAL_SECS, MIN_INTERVAL_SECS,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: MonitorState, msg: Msg) -> (MonitorState, Vec<Effect>) {
    let effects = match msg {
        Msg::SettingsLoaded(stored) => {
            if let Some(interval_ms) = stored {
                let accepted =
                    u64::from(MIN_INTERVAL_SECS) * 1000..=u64::from(MAX_INTERVAL_SECS) * 1000;
                // Out-of-range stored values fall back to the default.
                if accepted.contains(&interval_ms) {
                    state.set_interval_ms(interval_ms);
                }
            }
            Vec::new()
        }
        Msg::ThreadSeeded {
            thread_url,
            page,
            entries,
        } => {
            let Some((base_url, base_query)) = derive_base_query(&thread_url) else {
                return (
                    state,
                    vec![Effect::Notify(format!(
                        "invalid thread address: {thread_url}"
                    ))],
                );
            };
            let fresh = state.seed(base_url, base_query, page.unwrap_or_default(), entries);
            if fresh.is_empty() {
                Vec::new()
            } else {
                vec![Effect::AppendEntries { entries: fresh }]
            }
        }
        Msg::ToggleMonitoring => match state.session() {
            SessionState::Paused => {
                if !state.is_seeded() {
                    return (state, Vec::new());
                }
                state.set_session(SessionState::Active);
                state.reset_countdown();
                let mut effects = vec![
                    Effect::StartRecurringTimer {
                        interval_ms: state.interval_ms(),
                    },
                    Effect::StartCountdown,
                    Effect::Notify("monitoring started".to_string()),
                ];
                effects.extend(begin_check(&mut state));
                effects
            }
            SessionState::Active => {
                state.set_session(SessionState::Paused);
                state.clear_countdown();
                vec![
                    Effect::CancelRecurringTimer,
                    Effect::CancelCountdown,
                    Effect::Notify("monitoring stopped".to_string()),
                ]
            }
        },
        Msg::CheckNow => {
            // A manual check runs in either session state and never starts
            // the continuous mode by itself.
            if !state.is_seeded() {
                return (state, Vec::new());
            }
            begin_check(&mut state)
        }
        Msg::TimerFired => {
            // A tick from a cancelled timer can still be queued; ignore it
            // once the session is paused.
            if state.session() != SessionState::Active {
                return (state, Vec::new());
            }
            begin_check(&mut state)
        }
        Msg::CountdownTick => {
            state.tick_countdown();
            Vec::new()
        }
        Msg::CheckFinished(report) => apply_check_report(&mut state, report),
        Msg::IntervalSubmitted(secs) => apply_interval(&mut state, secs),
        Msg::MinimizeToggled => {
            state.toggle_minimized();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Starts one check cycle unless another is still in flight.
fn begin_check(state: &mut MonitorState) -> Vec<Effect> {
    if state.check_in_flight() {
        return Vec::new();
    }
    let Some(snapshot) = state.check_snapshot() else {
        return Vec::new();
    };
    state.set_status(StatusKind::Checking, "checking...");
    state.set_check_in_flight(true);
    vec![Effect::StartCheck(snapshot)]
}

fn apply_check_report(state: &mut MonitorState, report: CheckReport) -> Vec<Effect> {
    state.set_check_in_flight(false);

    // Entries from a stale cycle may already be known; the known set is the
    // final dedupe authority.
    let fresh: Vec<NewEntry> = report
        .entries
        .into_iter()
        .filter(|entry| !state.is_known(entry.id))
        .collect();

    if let Some(total_pages) = report.total_pages {
        state.set_total_pages(total_pages);
    }

    let mut effects = Vec::new();
    if !fresh.is_empty() {
        state.absorb(&fresh);
        let count = fresh.len();
        let last_id = fresh.last().map(|entry| entry.id);
        effects.push(Effect::AppendEntries { entries: fresh });
        if let Some(id) = last_id {
            effects.push(Effect::HighlightEntry { id });
        }
        effects.push(Effect::Notify(format!("{count} new entries merged")));
        if report.error.is_none() {
            state.set_status(StatusKind::Success, format!("{count} new entries"));
        }
    } else if report.error.is_none() {
        state.set_status(StatusKind::Success, "no new entries");
    }

    if let Some(error) = report.error {
        state.set_status(StatusKind::Error, error.clone());
        effects.push(Effect::Notify(format!("check failed: {error}")));
    }

    if state.session() == SessionState::Active {
        state.reset_countdown();
        effects.push(Effect::StartCountdown);
    }

    effects
}

fn apply_interval(state: &mut MonitorState, secs: u32) -> Vec<Effect> {
    if !(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&secs) {
        // Rejected input leaves the session untouched; the panel re-renders
        // the last valid value from state.
        return vec![Effect::Notify(format!(
            "check interval must be between {MIN_INTERVAL_SECS} and {MAX_INTERVAL_SECS} seconds"
        ))];
    }

    let interval_ms = u64::from(secs) * 1000;
    state.set_interval_ms(interval_ms);
    let mut effects = vec![
        Effect::PersistInterval { interval_ms },
        Effect::Notify(format!("check interval set to {secs} seconds")),
    ];

    if state.session() == SessionState::Active {
        // Full restart so the new period applies to both the recurring
        // timer and the countdown display.
        effects.push(Effect::CancelRecurringTimer);
        effects.push(Effect::CancelCountdown);
        effects.push(Effect::StartRecurringTimer { interval_ms });
        state.reset_countdown();
        effects.push(Effect::StartCountdown);
        effects.extend(begin_check(state));
    }

    effects
}
