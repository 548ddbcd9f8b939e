use std::sync::mpsc;

use entryflow_core::{update, MonitorState, Msg};
use flow_logging::flow_info;
use thiserror::Error;

use super::effects::EffectRunner;
use super::input;
use super::logging::{self, LogDestination};
use super::persistence;
use super::ui::render;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("usage: entryflow_app <thread-url>")]
    Usage,
    #[error("engine startup failed: {0}")]
    Engine(String),
    #[error("initial load failed: {0}")]
    Seed(String),
}

/// One unit of work for the dispatch loop. Everything that can happen —
/// user input, timer fires, engine results — arrives on a single channel
/// and is applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppEvent {
    Core(Msg),
    Help,
    Invalid(String),
    SeedFailed(String),
    Quit,
}

pub fn run_app() -> Result<(), AppError> {
    logging::initialize(LogDestination::File);

    let address = std::env::args().nth(1).ok_or(AppError::Usage)?;
    let session_cookie = std::env::var("ENTRYFLOW_COOKIE").ok();

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let state_dir = persistence::default_state_dir();

    let mut runner = EffectRunner::new(event_tx.clone(), state_dir.clone(), session_cookie)
        .map_err(|err| AppError::Engine(err.to_string()))?;

    render::print_banner(&address);

    let mut state = MonitorState::new();
    apply(
        &mut state,
        Msg::SettingsLoaded(persistence::load_check_interval(&state_dir)),
        &mut runner,
    );

    flow_info!("seeding session from {address}");
    runner.seed(&address);

    input::spawn_reader(event_tx);

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Core(msg) => apply(&mut state, msg, &mut runner),
            AppEvent::Help => render::print_help(),
            AppEvent::Invalid(line) => render::print_invalid(&line),
            AppEvent::SeedFailed(text) => return Err(AppError::Seed(text)),
            AppEvent::Quit => break,
        }
    }

    flow_info!("session closed");
    Ok(())
}

fn apply(state: &mut MonitorState, msg: Msg, runner: &mut EffectRunner) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    runner.run(effects);
    if state.consume_dirty() {
        render::render_panel(&state.view());
    }
}
