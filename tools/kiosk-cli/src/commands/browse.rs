//! Catalog browsing.

use anyhow::{bail, Result};
use kiosk_commerce::catalog::Product;
use kiosk_commerce::search::Pagination;
use serde::Serialize;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{checkbox, truncate};

#[derive(Serialize)]
struct BrowseReport<'a> {
    page: usize,
    per_page: usize,
    total: usize,
    total_pages: usize,
    items: &'a [Product],
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront(&args.fixture, args.width).await?;

    for category in &args.categories {
        storefront.set_category(category, true);
    }
    if let Some(ref text) = args.search {
        storefront.set_search(text.as_str());
    }
    if args.page != 1 && !storefront.go_to_page(args.page) {
        let pages = storefront.current_page().pagination.total_pages;
        bail!("Page {} does not exist ({} page(s))", args.page, pages);
    }

    let view = storefront.current_page();
    let pagination = view.pagination;

    if ctx.output.is_json() {
        ctx.output.json(&BrowseReport {
            page: pagination.page,
            per_page: pagination.per_page,
            total: pagination.total,
            total_pages: pagination.total_pages,
            items: &view.items,
        });
        return Ok(());
    }

    ctx.output.header("Categories");
    for facet in storefront.facets() {
        ctx.output
            .list_item(&format!("{} {} ({})", checkbox(facet.selected), facet.label, facet.count));
    }

    ctx.output.header(&format!(
        "Products {}-{} of {}",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total
    ));
    if view.items.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    let widths = [8, 32, 12, 10];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE"], &widths);
    for product in &view.items {
        let name = truncate(&product.name, 32);
        let price = product.price.display();
        ctx.output.table_row(
            &[product.id.as_str(), &name, product.category.as_str(), &price],
            &widths,
        );
    }

    if pagination.total_pages > 1 {
        ctx.output.info(&page_strip(&pagination));
    }
    if !pagination.is_last() {
        ctx.output
            .info(&format!("Next: --page {}", pagination.page + 1));
    }
    if !pagination.is_first() {
        ctx.output
            .info(&format!("Previous: --page {}", pagination.page - 1));
    }
    Ok(())
}

const PAGE_LINKS: usize = 7;

/// Page links around the current page, e.g. `< 1 [2] 3 >`.
fn page_strip(pagination: &Pagination) -> String {
    let mut parts = Vec::new();
    if !pagination.is_first() {
        parts.push("<".to_string());
    }
    for n in pagination.page_numbers(PAGE_LINKS) {
        if n == pagination.page {
            parts.push(format!("[{n}]"));
        } else {
            parts.push(n.to_string());
        }
    }
    if !pagination.is_last() {
        parts.push(">".to_string());
    }
    parts.join(" ")
}
