use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use entryflow_core::{CheckReport, CheckSnapshot, Effect, Msg, NewEntry, PageRef};
use entryflow_engine::{
    CheckFailure, CheckOutcome, EngineEvent, EngineHandle, FetchError, FetchSettings,
    Html2MdConverter, RemoteEntry, SeedDocument,
};
use flow_logging::{flow_info, flow_warn};

use super::app::AppEvent;
use super::persistence;
use super::timers::{self, TimerHandle};
use super::ui::render;

/// Executes core effects: engine commands, owned timer handles, settings
/// writes and view output. Timer handles cancel their worker when replaced
/// or dropped, so every session transition tears down deterministically.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    event_tx: mpsc::Sender<AppEvent>,
    state_dir: PathBuf,
    converter: Html2MdConverter,
    recurring: Option<TimerHandle>,
    countdown: Option<TimerHandle>,
}

impl EffectRunner {
    pub(crate) fn new(
        event_tx: mpsc::Sender<AppEvent>,
        state_dir: PathBuf,
        session_cookie: Option<String>,
    ) -> Result<Self, FetchError> {
        let settings = FetchSettings {
            session_cookie,
            ..FetchSettings::default()
        };
        let engine = EngineHandle::new(settings)?;
        spawn_event_pump(engine.clone(), event_tx.clone());
        Ok(Self {
            engine,
            event_tx,
            state_dir,
            converter: Html2MdConverter,
            recurring: None,
            countdown: None,
        })
    }

    pub(crate) fn seed(&self, address: &str) {
        self.engine.seed(address);
    }

    pub(crate) fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartCheck(snapshot) => {
                    flow_info!(
                        "check cycle start: {} known entries, {} tracked pages",
                        snapshot.known.len(),
                        snapshot.total_pages
                    );
                    self.engine.run_check(to_engine_snapshot(snapshot));
                }
                Effect::StartRecurringTimer { interval_ms } => {
                    self.recurring = Some(timers::spawn_repeating(
                        Duration::from_millis(interval_ms),
                        self.event_tx.clone(),
                        Msg::TimerFired,
                    ));
                }
                Effect::CancelRecurringTimer => {
                    self.recurring = None;
                }
                Effect::StartCountdown => {
                    self.countdown = Some(timers::spawn_repeating(
                        Duration::from_secs(1),
                        self.event_tx.clone(),
                        Msg::CountdownTick,
                    ));
                }
                Effect::CancelCountdown => {
                    self.countdown = None;
                }
                Effect::AppendEntries { entries } => {
                    render::render_entries(&entries, &self.converter);
                }
                Effect::HighlightEntry { id } => {
                    render::render_highlight(id);
                }
                Effect::PersistInterval { interval_ms } => {
                    persistence::save_check_interval(&self.state_dir, interval_ms);
                }
                Effect::Notify(text) => {
                    flow_info!("notify: {text}");
                    render::print_notification(&text);
                }
            }
        }
    }
}

fn spawn_event_pump(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        if let Some(event) = engine.try_recv() {
            let forwarded = match event {
                EngineEvent::SeedLoaded { result: Ok(doc) } => AppEvent::Core(seed_msg(doc)),
                EngineEvent::SeedLoaded { result: Err(error) } => {
                    flow_warn!("seed fetch failed: {error}");
                    AppEvent::SeedFailed(error.to_string())
                }
                EngineEvent::CheckFinished { result } => {
                    AppEvent::Core(Msg::CheckFinished(to_report(result)))
                }
            };
            if event_tx.send(forwarded).is_err() {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    });
}

fn seed_msg(doc: SeedDocument) -> Msg {
    Msg::ThreadSeeded {
        thread_url: doc.thread_url,
        page: doc
            .page_info
            .map(|info| PageRef::new(info.current_page, info.total_pages)),
        entries: doc.entries.into_iter().map(to_core_entry).collect(),
    }
}

fn to_core_entry(entry: RemoteEntry) -> NewEntry {
    NewEntry {
        id: entry.id,
        html: entry.html,
    }
}

fn to_engine_snapshot(snapshot: CheckSnapshot) -> entryflow_engine::CheckSnapshot {
    entryflow_engine::CheckSnapshot {
        thread_url: snapshot.thread_url,
        base_query: snapshot.base_query,
        total_pages: snapshot.total_pages,
        known: snapshot.known.into_iter().collect::<HashSet<_>>(),
    }
}

fn to_report(result: Result<CheckOutcome, CheckFailure>) -> CheckReport {
    match result {
        Ok(outcome) => {
            flow_info!(
                "check cycle done: {} new entries across {} pages",
                outcome.new_entries.len(),
                outcome.pages_fetched
            );
            CheckReport {
                entries: outcome.new_entries.into_iter().map(to_core_entry).collect(),
                total_pages: Some(outcome.total_pages),
                error: None,
            }
        }
        Err(failure) => {
            flow_warn!("check cycle failed: {}", failure.error);
            CheckReport {
                entries: failure.partial.into_iter().map(to_core_entry).collect(),
                total_pages: None,
                error: Some(failure.error.to_string()),
            }
        }
    }
}
