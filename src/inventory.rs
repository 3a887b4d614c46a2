//! BrickLink XML inventory parsing
//!
//! Reads the `<INVENTORY><ITEM>...</ITEM></INVENTORY>` format produced by
//! BrickLink's wanted list and store inventory downloads.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Condition, ItemType, LineItem};

#[derive(Debug, Deserialize)]
struct InventoryFile {
    #[serde(rename = "ITEM", default)]
    items: Vec<ItemRecord>,
}

/// Raw `<ITEM>` element. Everything is read as text so that validation can
/// report which record is broken.
#[derive(Debug, Deserialize)]
struct ItemRecord {
    #[serde(rename = "ITEMTYPE", default)]
    item_type: Option<String>,
    #[serde(rename = "ITEMID", default)]
    item_id: Option<String>,
    #[serde(rename = "COLOR", default)]
    color: Option<String>,
    #[serde(rename = "QTY", default)]
    quantity: Option<String>,
    #[serde(rename = "CONDITION", default)]
    condition: Option<String>,
}

/// Parse an inventory XML file into line items, in file order.
pub fn parse_xml_inventory(path: impl AsRef<Path>) -> Result<Vec<LineItem>> {
    let path = path.as_ref();
    log::debug!("Reading inventory from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| Error::parse(path, e.to_string()))?;
    let items = parse_inventory_str(&content).map_err(|message| Error::parse(path, message))?;

    log::debug!("Parsed {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Parse inventory XML already held in memory.
///
/// Errors are plain messages; [`parse_xml_inventory`] attaches the file path.
pub fn parse_inventory_str(xml: &str) -> std::result::Result<Vec<LineItem>, String> {
    let file: InventoryFile =
        quick_xml::de::from_str(xml).map_err(|e| format!("malformed XML: {e}"))?;

    file.items
        .into_iter()
        .enumerate()
        .map(|(index, record)| to_line_item(record).map_err(|e| format!("item #{}: {e}", index + 1)))
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn to_line_item(record: ItemRecord) -> std::result::Result<LineItem, String> {
    let item_id = non_blank(record.item_id).ok_or("missing ITEMID")?;

    let quantity = match non_blank(record.quantity) {
        None => return Err(format!("{item_id}: missing QTY")),
        Some(raw) => match raw.parse::<u32>() {
            Ok(q) if q > 0 => q,
            _ => return Err(format!("{item_id}: QTY '{raw}' is not a positive integer")),
        },
    };

    // Files exported from the minifigure list often leave out the type
    let item_type = match non_blank(record.item_type) {
        None => ItemType::Minifig,
        Some(code) => ItemType::from_code(&code)
            .ok_or_else(|| format!("{item_id}: unknown ITEMTYPE '{code}'"))?,
    };

    let condition = match non_blank(record.condition) {
        None => Condition::Used,
        Some(code) => code
            .parse::<Condition>()
            .map_err(|_| format!("{item_id}: unknown CONDITION '{code}'"))?,
    };

    Ok(LineItem {
        item_type,
        item_id,
        quantity,
        condition,
        color: non_blank(record.color),
    })
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
