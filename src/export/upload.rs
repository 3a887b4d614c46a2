//! BrickLink mass upload XML
//!
//! The element names and their order are what BrickLink's mass upload page
//! accepts; do not reorder.

use std::path::Path;

use quick_xml::escape::escape;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::markup::{format_price, Markup};
use crate::models::{Condition, ItemType};
use crate::pricing::PriceResult;

/// One `<ITEM>` of the upload file
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord<'a> {
    pub item_type: ItemType,
    pub item_id: &'a str,
    pub color: &'a str,
    pub price: Decimal,
    pub quantity: u32,
    pub condition: Condition,
}

impl<'a> UploadRecord<'a> {
    /// Projects a result with its marked-up price. `None` for unpriced lines.
    ///
    /// The condition is the one the item is held in, not the one it was
    /// priced under.
    pub fn from_result(result: &'a PriceResult, markup: &Markup) -> Result<Option<Self>> {
        let Some(avg) = result.avg_price() else {
            return Ok(None);
        };
        Ok(Some(Self {
            item_type: result.item.item_type,
            item_id: &result.item.item_id,
            color: result.item.color.as_deref().unwrap_or("0"),
            price: markup.apply(avg)?,
            quantity: result.item.quantity,
            condition: result.item.condition,
        }))
    }
}

/// Upload records for all priced lines, in input order
pub fn upload_records<'a>(
    results: &'a [PriceResult],
    markup: &Markup,
) -> Result<Vec<UploadRecord<'a>>> {
    let mut records = Vec::new();
    for result in results {
        match UploadRecord::from_result(result, markup)? {
            Some(record) => records.push(record),
            None => log::warn!(
                "No price for {} ({}), leaving it out of the upload file",
                result.item.item_id,
                result.item.condition
            ),
        }
    }
    Ok(records)
}

/// Renders the upload document without a trailing newline.
pub fn render_upload_xml(records: &[UploadRecord<'_>]) -> String {
    let mut lines = vec!["<INVENTORY>".to_string()];

    for record in records {
        lines.push("    <ITEM>".to_string());
        lines.push("        <CATEGORY></CATEGORY>".to_string());
        lines.push(format!("        <COLOR>{}</COLOR>", escape(record.color)));
        lines.push(format!("        <PRICE>{}</PRICE>", format_price(record.price)));
        lines.push(format!("        <QTY>{}</QTY>", record.quantity));
        lines.push("        <BULK>1</BULK>".to_string());
        lines.push("        <DESCRIPTION></DESCRIPTION>".to_string());
        lines.push(format!("        <CONDITION>{}</CONDITION>", record.condition));
        lines.push(format!("        <ITEMTYPE>{}</ITEMTYPE>", record.item_type.code()));
        lines.push(format!("        <ITEMID>{}</ITEMID>", escape(record.item_id)));
        lines.push("    </ITEM>".to_string());
    }

    lines.push("</INVENTORY>".to_string());
    lines.join("\n")
}

/// Writes the upload file and returns how many items it lists.
pub fn write_upload_xml(path: &Path, results: &[PriceResult], markup: &Markup) -> Result<usize> {
    let records = upload_records(results, markup)?;
    super::write_document(path, render_upload_xml(&records))?;
    Ok(records.len())
}
