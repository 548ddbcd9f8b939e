//! Entryflow core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{CheckSnapshot, Effect};
pub use msg::{CheckReport, Msg};
pub use state::{
    derive_base_query, EntryId, MonitorState, NewEntry, PageRef, SessionState, StatusKind,
    DEFAULT_INTERVAL_MS, MAX_INTERVAL_SECS, MIN_INTERVAL_SECS,
};
pub use update::update;
pub use view_model::{PanelViewModel, StatusLineView};
