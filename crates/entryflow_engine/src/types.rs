use std::collections::HashSet;
use std::fmt;

use url::Url;

pub type EntryId = u64;

/// Query parameter selecting a page within the thread.
const PAGE_PARAM: &str = "p";

/// One entry as extracted from a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub id: EntryId,
    pub html: String,
}

/// Pagination marker of a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
}

/// Inputs for one check cycle, captured from the tracked session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSnapshot {
    /// Thread address without its query string.
    pub thread_url: String,
    /// Ordered query pairs excluding the page-selector parameter.
    pub base_query: Vec<(String, String)>,
    /// Last page count observed by an earlier cycle.
    pub total_pages: u32,
    /// Ids already present in the live view.
    pub known: HashSet<EntryId>,
}

impl CheckSnapshot {
    /// Address of the given page. The page parameter is omitted for page 1.
    pub fn page_url(&self, page: u32) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.thread_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.set_query(None);
        if !self.base_query.is_empty() || page > 1 {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.base_query {
                pairs.append_pair(key, value);
            }
            if page > 1 {
                pairs.append_pair(PAGE_PARAM, &page.to_string());
            }
        }
        Ok(url)
    }
}

/// Result of a completed check cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Entries absent from the known set, sorted ascending by id.
    pub new_entries: Vec<RemoteEntry>,
    /// True total page count as reported by the fetched last page.
    pub total_pages: u32,
    /// Distinct pages fetched during the cycle.
    pub pages_fetched: u32,
}

/// An aborted check cycle. Entries gathered from pages fetched before the
/// failure are preserved so they can still be merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub error: FetchError,
    /// Deduplicated and sorted, like a successful batch.
    pub partial: Vec<RemoteEntry>,
}

/// The addressed page as first loaded at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDocument {
    /// The address that was fetched, including its original query.
    pub thread_url: String,
    pub entries: Vec<RemoteEntry>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SeedLoaded {
        result: Result<SeedDocument, FetchError>,
    },
    CheckFinished {
        result: Result<CheckOutcome, CheckFailure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub final_url: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode { encoding: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode { encoding } => {
                write!(f, "failed to decode page as {encoding}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
