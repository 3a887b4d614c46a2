//! BrickLink price guide response types

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Condition;

/// Response envelope shared by all BrickLink API endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub meta: Meta,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Meta {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub description: String,
}

impl Meta {
    pub fn error_message(&self) -> String {
        match (self.message.is_empty(), self.description.is_empty()) {
            (true, true) => "Unknown error".to_string(),
            (false, true) => self.message.clone(),
            (true, false) => self.description.clone(),
            (false, false) => format!("{} - {}", self.message, self.description),
        }
    }
}

/// Price statistics for one item in one condition.
///
/// BrickLink sends prices as strings with four decimals (`"3.1234"`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PriceGuide {
    #[serde(default)]
    pub new_or_used: Option<Condition>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde(default)]
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub avg_price: Option<Decimal>,
    #[serde(default)]
    pub qty_avg_price: Option<Decimal>,
    #[serde(default)]
    pub unit_quantity: u32,
    #[serde(default)]
    pub total_quantity: u32,
}

impl PriceGuide {
    /// True when the guide carries a usable average price
    pub fn has_data(&self) -> bool {
        self.avg_price.is_some_and(|avg| !avg.is_zero())
    }
}
