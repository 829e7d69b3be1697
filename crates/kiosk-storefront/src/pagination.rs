//! Viewport-sized pagination over the visible list.

use kiosk_commerce::catalog::Product;
use kiosk_commerce::search::{paginate, total_pages, Pagination};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::VisibleList;
use crate::config::PaginationConfig;

/// Page-size tier picked from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewportTier {
    Narrow,
    #[default]
    Wide,
}

impl ViewportTier {
    /// Widths up to and including `breakpoint` are narrow.
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width <= breakpoint {
            ViewportTier::Narrow
        } else {
            ViewportTier::Wide
        }
    }
}

/// One page, owned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// Products on the page, in visible-list order.
    pub items: Vec<Product>,
    /// Page position.
    pub pagination: Pagination,
}

#[derive(Debug)]
struct PageState {
    page: usize,
    tier: ViewportTier,
    revision: Option<u64>,
    total: usize,
}

/// Tracks the current page for the visible list.
///
/// The page resets to 1 whenever the list revision changes. Navigation past
/// either end is a no-op; the stored page is never clamped by navigation.
#[derive(Debug)]
pub struct PaginationController {
    sizing: PaginationConfig,
    state: Mutex<PageState>,
}

impl PaginationController {
    /// Create a controller for a viewport `width` pixels wide.
    pub fn new(sizing: PaginationConfig, width: u32) -> Self {
        Self {
            sizing,
            state: Mutex::new(PageState {
                page: 1,
                tier: ViewportTier::for_width(width, sizing.narrow_breakpoint),
                revision: None,
                total: 0,
            }),
        }
    }

    /// Current tier.
    pub fn tier(&self) -> ViewportTier {
        self.state.lock().tier
    }

    /// Items per page for the current tier.
    pub fn per_page(&self) -> usize {
        self.size_for(self.tier())
    }

    fn size_for(&self, tier: ViewportTier) -> usize {
        match tier {
            ViewportTier::Narrow => self.sizing.narrow_page_size,
            ViewportTier::Wide => self.sizing.wide_page_size,
        }
    }

    /// Re-evaluate the tier after a resize.
    ///
    /// A tier change keeps the current page if it still exists and moves to
    /// the last page otherwise.
    pub fn resize(&self, width: u32) -> ViewportTier {
        let tier = ViewportTier::for_width(width, self.sizing.narrow_breakpoint);
        let per_page = self.size_for(tier);
        let mut state = self.state.lock();
        if state.tier != tier {
            state.tier = tier;
            let last = total_pages(state.total, per_page);
            state.page = state.page.min(last);
            debug!(?tier, per_page, page = state.page, "viewport tier changed");
        }
        tier
    }

    /// Bring the stored page in line with `list` and describe it.
    pub fn sync(&self, list: &VisibleList) -> Pagination {
        let mut state = self.state.lock();
        self.sync_locked(&mut state, list)
    }

    fn sync_locked(&self, state: &mut PageState, list: &VisibleList) -> Pagination {
        if state.revision != Some(list.revision()) {
            if state.revision.is_some() && state.page != 1 {
                debug!(revision = list.revision(), "visible list changed, back to page 1");
            }
            state.revision = Some(list.revision());
            state.page = 1;
        }
        state.total = list.len();
        Pagination::new(state.page, self.size_for(state.tier), state.total)
    }

    /// Current page number (1-based) for `list`.
    pub fn page(&self, list: &VisibleList) -> usize {
        self.sync(list).page
    }

    /// The items on the current page.
    pub fn current(&self, list: &VisibleList) -> PageView {
        let pagination = self.sync(list);
        let page = paginate(list.items(), pagination.page, pagination.per_page);
        PageView {
            items: page.items.to_vec(),
            pagination: page.pagination,
        }
    }

    /// Move forward one page. Returns `false` on the last page.
    pub fn next(&self, list: &VisibleList) -> bool {
        let mut state = self.state.lock();
        let pagination = self.sync_locked(&mut state, list);
        if !pagination.has_next {
            return false;
        }
        state.page += 1;
        true
    }

    /// Move back one page. Returns `false` on the first page.
    pub fn prev(&self, list: &VisibleList) -> bool {
        let mut state = self.state.lock();
        let pagination = self.sync_locked(&mut state, list);
        if !pagination.has_prev {
            return false;
        }
        state.page -= 1;
        true
    }

    /// Jump to `page`. Returns `false`, leaving the page as is, if it does
    /// not exist.
    pub fn go_to(&self, list: &VisibleList, page: usize) -> bool {
        let mut state = self.state.lock();
        let pagination = self.sync_locked(&mut state, list);
        if !pagination.contains(page) {
            return false;
        }
        state.page = page;
        true
    }
}
