//! Detailed JSON export with the full price guide statistics.
//!
//! Prices keep the API's precision and are written as strings.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Condition, ItemType};
use crate::pricing::{PriceOutcome, PriceResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord<'a> {
    pub item_id: &'a str,
    pub item_type: ItemType,
    pub color: Option<&'a str>,
    pub quantity: u32,
    pub requested_condition: Condition,
    pub condition: Condition,
    pub status: &'static str,
    pub currency_code: Option<&'a str>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub avg_price: Option<Decimal>,
    pub qty_avg_price: Option<Decimal>,
    pub unit_quantity: Option<u32>,
    pub total_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> From<&'a PriceResult> for DetailRecord<'a> {
    fn from(result: &'a PriceResult) -> Self {
        let guide = result.guide();
        let status = match result.outcome {
            PriceOutcome::Priced { .. } => "priced",
            PriceOutcome::NoData { .. } => "no_data",
            PriceOutcome::Failed { .. } => "failed",
        };

        Self {
            item_id: &result.item.item_id,
            item_type: result.item.item_type,
            color: result.item.color.as_deref(),
            quantity: result.item.quantity,
            requested_condition: result.item.condition,
            condition: result.condition(),
            status,
            currency_code: guide.and_then(|g| g.currency_code.as_deref()),
            min_price: result.min_price(),
            max_price: result.max_price(),
            avg_price: result.avg_price(),
            qty_avg_price: guide.and_then(|g| g.qty_avg_price),
            unit_quantity: guide.map(|g| g.unit_quantity),
            total_quantity: result.quantity_available(),
            error: result.error(),
        }
    }
}

pub fn detail_records(results: &[PriceResult]) -> Vec<DetailRecord<'_>> {
    results.iter().map(DetailRecord::from).collect()
}

pub fn render_detailed_json(results: &[PriceResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&detail_records(results))
}

pub fn write_detailed_json(path: &Path, results: &[PriceResult]) -> Result<()> {
    let content = render_detailed_json(results).map_err(|e| Error::io(path, e.into()))?;
    super::write_document(path, content)
}
