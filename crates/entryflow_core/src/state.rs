use std::collections::BTreeSet;

use url::Url;

use crate::view_model::{PanelViewModel, StatusLineView};

pub type EntryId = u64;

/// Fallback check interval when no setting is stored.
pub const DEFAULT_INTERVAL_MS: u64 = 30_000;
/// Smallest accepted interval, in seconds.
pub const MIN_INTERVAL_SECS: u32 = 10;
/// Largest accepted interval, in seconds.
pub const MAX_INTERVAL_SECS: u32 = 300;

/// Query parameter selecting a page within the thread.
const PAGE_PARAM: &str = "p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Paused,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub id: EntryId,
    pub html: String,
}

/// Tracked pagination state of the monitored thread.
/// Invariant: `current_page <= total_pages`, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRef {
    pub current_page: u32,
    pub total_pages: u32,
}

impl PageRef {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
        }
    }
}

impl Default for PageRef {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Checking,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ThreadRef {
    pub(crate) base_url: String,
    pub(crate) base_query: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorState {
    session: SessionState,
    thread: Option<ThreadRef>,
    page: PageRef,
    known: BTreeSet<EntryId>,
    interval_ms: u64,
    countdown_secs: Option<u32>,
    check_in_flight: bool,
    status: Option<StatusLineView>,
    minimized: bool,
    dirty: bool,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self {
            session: SessionState::Paused,
            thread: None,
            page: PageRef::default(),
            known: BTreeSet::new(),
            interval_ms: DEFAULT_INTERVAL_MS,
            countdown_secs: None,
            check_in_flight: false,
            status: None,
            minimized: false,
            dirty: false,
        }
    }
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn interval_secs(&self) -> u32 {
        (self.interval_ms / 1000) as u32
    }

    pub fn is_known(&self, id: EntryId) -> bool {
        self.known.contains(&id)
    }

    pub fn check_in_flight(&self) -> bool {
        self.check_in_flight
    }

    pub fn is_seeded(&self) -> bool {
        self.thread.is_some()
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel {
            session: self.session,
            interval_secs: self.interval_secs(),
            countdown_secs: self.countdown_secs,
            status: self.status.clone(),
            entry_count: self.known.len(),
            total_pages: self.page.total_pages,
            minimized: self.minimized,
        }
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_session(&mut self, session: SessionState) {
        self.session = session;
        self.mark_dirty();
    }

    pub(crate) fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
        self.mark_dirty();
    }

    pub(crate) fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusLineView {
            kind,
            text: text.into(),
        });
        self.mark_dirty();
    }

    pub(crate) fn set_check_in_flight(&mut self, in_flight: bool) {
        self.check_in_flight = in_flight;
        self.mark_dirty();
    }

    pub(crate) fn reset_countdown(&mut self) {
        self.countdown_secs = Some(self.interval_secs());
        self.mark_dirty();
    }

    pub(crate) fn clear_countdown(&mut self) {
        self.countdown_secs = None;
        self.mark_dirty();
    }

    pub(crate) fn tick_countdown(&mut self) {
        if let Some(secs) = self.countdown_secs {
            self.countdown_secs = Some(secs.saturating_sub(1));
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
        self.mark_dirty();
    }

    /// Replaces thread tracking state from a freshly parsed document.
    ///
    /// Returns the entries not previously known, in the order given. The
    /// known set is rebuilt from the document, so seeding twice with the
    /// same snapshot yields the same state and an empty batch.
    pub(crate) fn seed(
        &mut self,
        base_url: String,
        base_query: Vec<(String, String)>,
        page: PageRef,
        entries: Vec<NewEntry>,
    ) -> Vec<NewEntry> {
        let fresh: Vec<NewEntry> = entries
            .iter()
            .filter(|entry| !self.known.contains(&entry.id))
            .cloned()
            .collect();
        self.known = entries.iter().map(|entry| entry.id).collect();
        self.thread = Some(ThreadRef {
            base_url,
            base_query,
        });
        self.page = page;
        self.mark_dirty();
        fresh
    }

    /// Adds merged entry ids to the known set. Ids are never removed during
    /// a session; removal would risk re-inserting duplicates.
    pub(crate) fn absorb(&mut self, entries: &[NewEntry]) {
        self.known.extend(entries.iter().map(|entry| entry.id));
        self.mark_dirty();
    }

    pub(crate) fn set_total_pages(&mut self, total_pages: u32) {
        self.page = PageRef::new(self.page.current_page, total_pages);
        self.mark_dirty();
    }

    /// Snapshot inputs for one check cycle, if the thread has been seeded.
    pub(crate) fn check_snapshot(&self) -> Option<crate::CheckSnapshot> {
        let thread = self.thread.as_ref()?;
        Some(crate::CheckSnapshot {
            thread_url: thread.base_url.clone(),
            base_query: thread.base_query.clone(),
            total_pages: self.page.total_pages,
            known: self.known.clone(),
        })
    }
}

/// Splits a thread address into its page-independent base URL and query.
///
/// The page-selector parameter is stripped; every other pair is kept in
/// order so later page fetches preserve thread filters such as sort order.
pub fn derive_base_query(address: &str) -> Option<(String, Vec<(String, String)>)> {
    let parsed = Url::parse(address).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let base_query = parsed
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let base_url = parsed[..url::Position::BeforeQuery].to_string();
    Some((base_url, base_query))
}
