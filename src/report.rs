//! Console output: inventory statistics and the price summary table.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::bricklink::PriceGuide;
use crate::markup::format_price;
use crate::models::{Condition, LineItem};
use crate::pricing::PriceResult;

/// One-line description of a price guide, e.g.
/// `Average: $10.00 | Range: $1.00 - $20.00 | Qty Available: 8`
pub fn format_price_data(guide: &PriceGuide) -> String {
    let mut parts = Vec::new();

    if let Some(avg) = guide.avg_price {
        parts.push(format!("Average: ${}", format_price(avg)));
    }
    if let (Some(min), Some(max)) = (guide.min_price, guide.max_price) {
        parts.push(format!("Range: ${} - ${}", format_price(min), format_price(max)));
    }
    if guide.total_quantity > 0 {
        parts.push(format!("Qty Available: {}", guide.total_quantity));
    }

    if parts.is_empty() {
        "No pricing information".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Sum of average price × quantity over all priced lines
pub fn estimated_total_value(results: &[PriceResult]) -> Decimal {
    results
        .iter()
        .filter_map(|r| r.avg_price().map(|avg| avg * Decimal::from(r.item.quantity)))
        .sum()
}

/// Statistics about a parsed inventory, printed before pricing.
pub fn format_inventory_stats(items: &[LineItem], condition_filter: Option<Condition>) -> String {
    let types: BTreeSet<_> = items.iter().map(|i| i.item_type).collect();
    let type_labels = types
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ");
    let unique: BTreeSet<_> = items.iter().map(|i| (i.item_type, i.item_id.as_str())).collect();
    let conditions: BTreeSet<&str> = items.iter().map(|i| i.condition.code()).collect();
    let total_quantity: u64 = items.iter().map(|i| u64::from(i.quantity)).sum();

    let mut output = format!("Found {} entries in XML ({type_labels})\n", items.len());
    output.push_str(&format!("  Unique items: {}\n", unique.len()));
    output.push_str(&format!("  Total quantity: {total_quantity}\n"));
    output.push_str(&format!(
        "  Conditions: {}\n",
        conditions.into_iter().collect::<Vec<_>>().join(", ")
    ));

    if let Some(filter) = condition_filter {
        let matching = items.iter().filter(|i| i.condition == filter).count();
        output.push_str(&format!(
            "  Filtering for condition '{filter}': {matching} items\n"
        ));
    }

    output
}

/// Summary table printed after pricing.
pub fn format_price_summary(results: &[PriceResult]) -> String {
    let rule = "=".repeat(80);
    let (priced, unresolved): (Vec<&PriceResult>, Vec<&PriceResult>) =
        results.iter().partition(|r| r.is_priced());

    let mut output = String::new();
    output.push_str(&format!("\n{rule}\nPRICE SUMMARY\n{rule}\n"));
    output.push_str(&format!("Successfully retrieved: {} prices\n", priced.len()));
    output.push_str(&format!("Failed: {} items\n", unresolved.len()));
    output.push_str(&format!("{rule}\n"));

    if !priced.is_empty() {
        output.push_str(&format!(
            "\n{:<12} {:<4} {:<3} Price Info\n",
            "Item", "Cond", "Qty"
        ));
        output.push_str(&format!(
            "{} {} {} {}\n",
            "-".repeat(12),
            "-".repeat(4),
            "-".repeat(3),
            "-".repeat(50)
        ));

        for result in &priced {
            let info = result
                .guide()
                .map(format_price_data)
                .unwrap_or_else(|| "No price data available".to_string());
            output.push_str(&format!(
                "{:<12} {:<4} {:<3} {info}\n",
                result.item.item_id,
                result.condition().code(),
                result.item.quantity
            ));
        }

        let total = estimated_total_value(results);
        if total > Decimal::ZERO {
            output.push_str(&format!(
                "\nEstimated Total Collection Value: ${}\n",
                format_price(total)
            ));
        }
    }

    if !unresolved.is_empty() {
        output.push_str("\nFAILED TO GET PRICES FOR:\n");
        for result in &unresolved {
            output.push_str(&format!(
                "  {}: {}\n",
                result.item.item_id,
                result.error().unwrap_or("Unknown error")
            ));
        }
    }

    output
}
