//! Pagination math and category facets.

use crate::catalog::{Category, Product};
use crate::search::CategorySelection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pagination information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages, never less than one.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    ///
    /// A zero `per_page` is treated as one.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_pages(total, per_page);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible).saturating_sub(1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Whether `page` is a page that exists.
    pub fn contains(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> usize {
        if self.total == 0 || self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        self.page.saturating_mul(self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 24, 0)
    }
}

/// `ceil(total / per_page)`, minimum 1.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    /// Items on this page, in list order.
    pub items: &'a [T],
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> Page<'_, T> {
    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }
}

/// Slice `list` into the items of `page`.
///
/// A page past the end (or page 0) yields no items; the caller decides
/// whether such a page may be requested at all.
pub fn paginate<T>(list: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let pagination = Pagination::new(page, per_page, list.len());
    let items = if page == 0 {
        &list[..0]
    } else {
        let start = pagination.offset().min(list.len());
        let end = pagination.end_item().max(start);
        &list[start..end]
    };
    Page { items, pagination }
}

/// A category checkbox with the number of products behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFacet {
    /// Normalized key.
    pub category: Category,
    /// Display label.
    pub label: String,
    /// Number of catalog products in this category.
    pub count: usize,
    /// Whether the box is checked.
    pub selected: bool,
}

/// Category checkboxes for the sidebar, sorted by key.
pub fn category_facets(products: &[Product], selection: &CategorySelection) -> Vec<CategoryFacet> {
    let mut counts: BTreeMap<&Category, usize> = BTreeMap::new();
    for product in products {
        if product.category.is_empty() {
            continue;
        }
        *counts.entry(&product.category).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryFacet {
            category: category.clone(),
            label: category.label(),
            count,
            selected: selection.contains(category),
        })
        .collect()
}
