use scraper::{ElementRef, Html, Selector};

use crate::{EntryId, PageInfo, RemoteEntry};

/// Container whose children carry the entry identity attribute.
const ENTRY_ITEM_SELECTOR: &str = "#entry-item-list li[data-id]";
const ENTRY_ID_ATTR: &str = "data-id";
const PAGER_SELECTOR: &str = ".pager";
const CURRENT_PAGE_ATTR: &str = "data-currentpage";
const PAGE_COUNT_ATTR: &str = "data-pagecount";

/// Narrow parsing seam between fetched documents and the check cycle, so the
/// diff/merge algorithm is testable against synthetic documents.
pub trait ThreadParser: Send + Sync {
    /// Entries present in the document. A missing list container yields an
    /// empty list, not an error.
    fn entries(&self, html: &str) -> Vec<RemoteEntry>;

    /// Pagination marker of the document. `None` means a single page with
    /// no further pages.
    fn page_info(&self, html: &str) -> Option<PageInfo>;
}

/// Parser for the forum's entry-list markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorThreadParser;

impl ThreadParser for SelectorThreadParser {
    fn entries(&self, html: &str) -> Vec<RemoteEntry> {
        let doc = Html::parse_document(html);
        let Ok(selector) = Selector::parse(ENTRY_ITEM_SELECTOR) else {
            return Vec::new();
        };
        doc.select(&selector)
            .filter_map(|element| {
                let id: EntryId = element.value().attr(ENTRY_ID_ATTR)?.trim().parse().ok()?;
                Some(RemoteEntry {
                    id,
                    html: element.html(),
                })
            })
            .collect()
    }

    fn page_info(&self, html: &str) -> Option<PageInfo> {
        let doc = Html::parse_document(html);
        let selector = Selector::parse(PAGER_SELECTOR).ok()?;
        let pager = doc.select(&selector).next()?;
        Some(PageInfo {
            current_page: attr_u32(pager, CURRENT_PAGE_ATTR).unwrap_or(1),
            total_pages: attr_u32(pager, PAGE_COUNT_ATTR).unwrap_or(1),
        })
    }
}

fn attr_u32(element: ElementRef, name: &str) -> Option<u32> {
    element.value().attr(name)?.trim().parse().ok()
}
