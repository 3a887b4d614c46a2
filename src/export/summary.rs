//! Simplified JSON summary: id, amount, original average price, condition.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Condition, ItemType};
use crate::pricing::PriceResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord<'a> {
    pub item_id: &'a str,
    pub item_type: ItemType,
    pub amount: u32,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_price: Option<Decimal>,
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> From<&'a PriceResult> for SummaryRecord<'a> {
    fn from(result: &'a PriceResult) -> Self {
        Self {
            item_id: &result.item.item_id,
            item_type: result.item.item_type,
            amount: result.item.quantity,
            average_price: result.avg_price(),
            condition: result.condition(),
            error: result.error(),
        }
    }
}

pub fn summary_records(results: &[PriceResult]) -> Vec<SummaryRecord<'_>> {
    results.iter().map(SummaryRecord::from).collect()
}

pub fn render_summary_json(results: &[PriceResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&summary_records(results))
}

pub fn write_summary_json(path: &Path, results: &[PriceResult]) -> Result<()> {
    let content = render_summary_json(results).map_err(|e| Error::io(path, e.into()))?;
    super::write_document(path, content)
}
