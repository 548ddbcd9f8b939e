use std::collections::BTreeSet;

use crate::{EntryId, NewEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one poll-and-merge cycle against the tracked thread state.
    StartCheck(CheckSnapshot),
    /// (Re)start the recurring tick timer with the given period.
    StartRecurringTimer { interval_ms: u64 },
    CancelRecurringTimer,
    /// (Re)start the one-second countdown ticker.
    StartCountdown,
    CancelCountdown,
    /// Append merged entries to the live view in the given order.
    AppendEntries { entries: Vec<NewEntry> },
    /// Draw attention to the most recently merged entry.
    HighlightEntry { id: EntryId },
    /// Persist the configured check interval.
    PersistInterval { interval_ms: u64 },
    /// Transient user-facing notification.
    Notify(String),
}

/// Inputs for one check cycle: where to fetch and what is already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSnapshot {
    pub thread_url: String,
    pub base_query: Vec<(String, String)>,
    pub total_pages: u32,
    pub known: BTreeSet<EntryId>,
}
