//! Price lookup pipeline: condition filter, duplicate merging and the
//! Used→New fallback.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::bricklink::{BricklinkClient, PriceGuide};
use crate::models::{Condition, LineItem};

/// What happened when pricing one line item
#[derive(Debug, Clone, PartialEq)]
pub enum PriceOutcome {
    /// Price data found, possibly under a different condition than requested
    Priced {
        condition: Condition,
        guide: PriceGuide,
    },
    /// The API answered but has no sales data for the item
    NoData { message: String },
    /// The request itself failed
    Failed { message: String },
}

/// A line item together with its pricing outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceResult {
    pub item: LineItem,
    pub outcome: PriceOutcome,
}

impl PriceResult {
    pub fn priced(item: LineItem, condition: Condition, guide: PriceGuide) -> Self {
        Self {
            item,
            outcome: PriceOutcome::Priced { condition, guide },
        }
    }

    pub fn no_data(item: LineItem, message: impl Into<String>) -> Self {
        Self {
            item,
            outcome: PriceOutcome::NoData {
                message: message.into(),
            },
        }
    }

    pub fn failed(item: LineItem, message: impl Into<String>) -> Self {
        Self {
            item,
            outcome: PriceOutcome::Failed {
                message: message.into(),
            },
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self.outcome, PriceOutcome::Priced { .. })
    }

    /// Condition the price belongs to; the requested one when unpriced
    pub fn condition(&self) -> Condition {
        match &self.outcome {
            PriceOutcome::Priced { condition, .. } => *condition,
            _ => self.item.condition,
        }
    }

    /// True when Used pricing was replaced by New pricing
    pub fn used_fallback(&self) -> bool {
        self.condition() != self.item.condition
    }

    pub fn guide(&self) -> Option<&PriceGuide> {
        match &self.outcome {
            PriceOutcome::Priced { guide, .. } => Some(guide),
            _ => None,
        }
    }

    pub fn avg_price(&self) -> Option<Decimal> {
        self.guide().and_then(|g| g.avg_price)
    }

    pub fn min_price(&self) -> Option<Decimal> {
        self.guide().and_then(|g| g.min_price)
    }

    pub fn max_price(&self) -> Option<Decimal> {
        self.guide().and_then(|g| g.max_price)
    }

    /// Number of lots/units available on the market
    pub fn quantity_available(&self) -> Option<u32> {
        self.guide().map(|g| g.total_quantity)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            PriceOutcome::Priced { .. } => None,
            PriceOutcome::NoData { message } | PriceOutcome::Failed { message } => Some(message),
        }
    }
}

/// Prices one line item, falling back from Used to New once.
///
/// Never fails: request errors and missing data are recorded on the result.
pub fn price_item(client: &mut BricklinkClient, item: &LineItem) -> PriceResult {
    let requested = item.condition;

    match client.fetch_price_guide(item, requested) {
        Ok(guide) if guide.has_data() => {
            return PriceResult::priced(item.clone(), requested, guide);
        }
        Ok(_) => {}
        Err(e) => {
            log::warn!("  Failed to get price for {}: {e}", item.item_id);
            return PriceResult::failed(item.clone(), e.to_string());
        }
    }

    if requested != Condition::Used {
        log::info!("  No price data for {} ({requested})", item.item_id);
        return PriceResult::no_data(
            item.clone(),
            format!("No price data available for condition {requested}"),
        );
    }

    log::info!("  No used price found, checking new price...");
    match client.fetch_price_guide(item, Condition::New) {
        Ok(guide) if guide.has_data() => {
            if let Some(avg) = guide.avg_price {
                log::info!("  Using new price: ${}", crate::markup::format_price(avg));
            }
            PriceResult::priced(item.clone(), Condition::New, guide)
        }
        Ok(_) => {
            log::info!("  No new price either for {}", item.item_id);
            PriceResult::no_data(
                item.clone(),
                "No price data available for condition U or N",
            )
        }
        Err(e) => {
            log::warn!("  New price fallback failed for {}: {e}", item.item_id);
            PriceResult::failed(
                item.clone(),
                format!("No used price data; new price lookup failed: {e}"),
            )
        }
    }
}

/// Applies the condition filter and merges duplicate lines.
///
/// Lines with the same type, id, condition and color are priced once; their
/// quantities are added to the first occurrence, which keeps its position.
pub fn select_items(items: &[LineItem], condition_filter: Option<Condition>) -> Vec<LineItem> {
    let mut selected: Vec<LineItem> = Vec::new();
    let mut seen = HashMap::new();

    for item in items {
        if condition_filter.is_some_and(|c| c != item.condition) {
            continue;
        }
        match seen.get(&item.lookup_key()) {
            Some(&index) => {
                let existing: &mut LineItem = &mut selected[index];
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                log::debug!(
                    "Merged duplicate line {} ({}), quantity now {}",
                    item.item_id,
                    item.condition,
                    existing.quantity
                );
            }
            None => {
                seen.insert(item.lookup_key(), selected.len());
                selected.push(item.clone());
            }
        }
    }

    selected
}

/// Prices every selected line of an inventory, in order.
pub fn price_inventory(
    client: &mut BricklinkClient,
    items: &[LineItem],
    condition_filter: Option<Condition>,
) -> Vec<PriceResult> {
    let selected = select_items(items, condition_filter);
    let total = selected.len();
    log::info!("Getting prices for {total} entries...");

    selected
        .iter()
        .enumerate()
        .map(|(i, item)| {
            log::info!(
                "[{}/{}] Getting price for {} ({}, {})...",
                i + 1,
                total,
                item.item_id,
                item.item_type,
                item.condition
            );
            price_item(client, item)
        })
        .collect()
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
