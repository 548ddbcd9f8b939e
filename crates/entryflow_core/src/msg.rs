use crate::{NewEntry, PageRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Stored check interval read at session start, if any (milliseconds).
    SettingsLoaded(Option<u64>),
    /// Initial document for the monitored thread was fetched and parsed.
    ThreadSeeded {
        thread_url: String,
        page: Option<PageRef>,
        entries: Vec<NewEntry>,
    },
    /// User toggled continuous monitoring.
    ToggleMonitoring,
    /// User requested a single immediate check.
    CheckNow,
    /// Interval submitted in seconds; the runtime interval command and the
    /// panel input both arrive through this message.
    IntervalSubmitted(u32),
    /// Recurring tick timer fired.
    TimerFired,
    /// Countdown ticker fired (once per second).
    CountdownTick,
    /// A check cycle finished.
    CheckFinished(CheckReport),
    /// User toggled the panel minimized state.
    MinimizeToggled,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Result of one poll-and-merge cycle as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Entries absent from the known set when the cycle started, sorted
    /// ascending by id. May be a partial batch when `error` is set.
    pub entries: Vec<NewEntry>,
    /// True total page count learned from the fetched page; `None` when the
    /// cycle failed before it could be trusted.
    pub total_pages: Option<u32>,
    /// User-facing failure text for an aborted cycle.
    pub error: Option<String>,
}
