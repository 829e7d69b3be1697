//! Cart quotes.

use anyhow::{bail, Context as _, Result};
use kiosk_commerce::cart::{PricingMode, Quantity};
use kiosk_commerce::ProductId;
use kiosk_storefront::{StorefrontError, DEFAULT_VIEWPORT_WIDTH};

use super::QuoteArgs;
use crate::context::Context;

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let items = args
        .items
        .iter()
        .map(|item| parse_item(item))
        .collect::<Result<Vec<_>>>()?;

    let mut config = ctx.config.clone();
    if args.unit_snapshot {
        config.cart.pricing = PricingMode::UnitSnapshot;
    }
    let storefront = ctx
        .storefront_with(config, &args.fixture, DEFAULT_VIEWPORT_WIDTH)
        .await?;
    for (id, quantity) in items {
        let added = storefront
            .cards()
            .set_count(&id, quantity)
            .and_then(|()| storefront.add_to_cart(&id));
        match added {
            Ok(line) => ctx.output.debug(&format!("{} x{}", line.name, line.quantity)),
            Err(StorefrontError::UnknownProduct(id)) => bail!("Unknown product: {}", id),
            Err(e) => return Err(e.into()),
        }
    }

    let summary = storefront.checkout_summary();
    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Cart ({} line(s), {} item(s))",
        summary.line_count, summary.item_count
    ));
    for line in &summary.lines {
        ctx.output.kv(
            &line.name,
            &format!("{} = {}", line.quantity_label(), line.total.display()),
        );
    }
    ctx.output.success(&format!("Total: {}", summary.total_display()));
    Ok(())
}

/// Parse `ID[:QUANTITY]`.
fn parse_item(item: &str) -> Result<(ProductId, Quantity)> {
    let (id, quantity) = match item.rsplit_once(':') {
        Some((id, qty)) => {
            let n: u32 = qty
                .trim()
                .parse()
                .with_context(|| format!("Invalid quantity in '{}'", item))?;
            (id, Quantity::new(n).with_context(|| format!("Invalid quantity in '{}'", item))?)
        }
        None => (item, Quantity::ONE),
    };
    let id = id.trim();
    if id.is_empty() {
        bail!("Missing product id in '{}'", item);
    }
    Ok((ProductId::new(id), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let (id, qty) = parse_item("p-1:3").unwrap();
        assert_eq!(id.as_str(), "p-1");
        assert_eq!(qty.get(), 3);

        let (_, qty) = parse_item("p-2").unwrap();
        assert_eq!(qty, Quantity::ONE);

        assert!(parse_item("p-1:0").is_err());
        assert!(parse_item("p-1:x").is_err());
        assert!(parse_item(":2").is_err());
    }
}
