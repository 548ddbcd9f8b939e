use std::collections::HashSet;

use flow_logging::{flow_debug, flow_warn};

use crate::decode::decode_page;
use crate::fetch::Fetcher;
use crate::parse::ThreadParser;
use crate::{CheckFailure, CheckOutcome, CheckSnapshot, EntryId, FetchError, RemoteEntry};

/// Runs one poll-and-merge check cycle.
///
/// The tracked last page is fetched first: most forum activity appends to
/// the final page, so the common path needs a single request. The fetched
/// page's own pagination marker is the authority on the true page count;
/// when it exceeds the tracked count, every page from the old boundary to
/// the new last page is walked, since entries may have spilled across a
/// freshly created page boundary.
///
/// A fetch or decode failure aborts the cycle but preserves the entries of
/// pages already walked, deduplicated and sorted like a successful batch.
pub async fn run_check(
    fetcher: &dyn Fetcher,
    parser: &dyn ThreadParser,
    snapshot: &CheckSnapshot,
) -> Result<CheckOutcome, CheckFailure> {
    let tracked_last = snapshot.total_pages.max(1);
    let mut seen: HashSet<EntryId> = snapshot.known.clone();
    let mut collected: Vec<RemoteEntry> = Vec::new();

    let last_doc = match fetch_page(fetcher, snapshot, tracked_last).await {
        Ok(html) => html,
        Err(error) => {
            flow_warn!("check aborted on page {tracked_last}: {error}");
            return Err(CheckFailure {
                error,
                partial: Vec::new(),
            });
        }
    };

    // A page without a pagination marker counts as a single page.
    let true_total = parser
        .page_info(&last_doc)
        .map(|info| info.total_pages.max(1))
        .unwrap_or(1);
    flow_debug!("check cycle: tracked {tracked_last} pages, remote reports {true_total}");

    collect_unknown(parser.entries(&last_doc), &mut seen, &mut collected);
    let mut pages_fetched = 1;

    if true_total > tracked_last {
        for page in tracked_last + 1..=true_total {
            match fetch_page(fetcher, snapshot, page).await {
                Ok(html) => {
                    pages_fetched += 1;
                    collect_unknown(parser.entries(&html), &mut seen, &mut collected);
                }
                Err(error) => {
                    flow_warn!("check aborted on page {page}: {error}");
                    collected.sort_by_key(|entry| entry.id);
                    return Err(CheckFailure {
                        error,
                        partial: collected,
                    });
                }
            }
        }
    }

    // Fetch order across pages does not guarantee cross-page ordering;
    // ascending numeric identity is the presentation order.
    collected.sort_by_key(|entry| entry.id);

    Ok(CheckOutcome {
        new_entries: collected,
        // A remote count smaller than the tracked one is not trusted; the
        // tracked boundary only ever grows, like the known-entry set.
        total_pages: true_total.max(tracked_last),
        pages_fetched,
    })
}

async fn fetch_page(
    fetcher: &dyn Fetcher,
    snapshot: &CheckSnapshot,
    page: u32,
) -> Result<String, FetchError> {
    let url = snapshot.page_url(page)?;
    let output = fetcher.fetch(&url).await?;
    let decoded = decode_page(&output.bytes, output.content_type.as_deref())?;
    Ok(decoded.html)
}

/// Keeps entries whose id is neither known nor already in this batch; an
/// entry can appear on two pages after a page boundary shift.
fn collect_unknown(
    entries: Vec<RemoteEntry>,
    seen: &mut HashSet<EntryId>,
    collected: &mut Vec<RemoteEntry>,
) {
    for entry in entries {
        if seen.insert(entry.id) {
            collected.push(entry);
        }
    }
}
