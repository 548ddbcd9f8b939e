use crate::{SessionState, StatusKind};

/// Read-only projection of the session for the control panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelViewModel {
    pub session: SessionState,
    pub interval_secs: u32,
    /// Seconds until the next scheduled check; `None` while paused.
    pub countdown_secs: Option<u32>,
    pub status: Option<StatusLineView>,
    pub entry_count: usize,
    pub total_pages: u32,
    pub minimized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLineView {
    pub kind: StatusKind,
    pub text: String,
}
