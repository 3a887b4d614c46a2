//! Core inventory types shared by the parser, the price client and the exporters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Item condition as BrickLink encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "N")]
    New,
    #[serde(rename = "U")]
    Used,
}

impl Condition {
    /// Single-letter code used in XML files and API queries
    pub fn code(self) -> &'static str {
        match self {
            Condition::New => "N",
            Condition::Used => "U",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Condition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "N" | "n" => Ok(Condition::New),
            "U" | "u" => Ok(Condition::Used),
            other => Err(Error::Config(format!(
                "Unknown condition '{other}', expected N or U"
            ))),
        }
    }
}

/// BrickLink catalog item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemType {
    Minifig,
    Part,
    Set,
    Book,
    Gear,
    Catalog,
    Instruction,
    OriginalBox,
}

impl ItemType {
    /// Looks up an item type by its XML `ITEMTYPE` code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "M" => Some(ItemType::Minifig),
            "P" => Some(ItemType::Part),
            "S" => Some(ItemType::Set),
            "B" => Some(ItemType::Book),
            "G" => Some(ItemType::Gear),
            "C" => Some(ItemType::Catalog),
            "I" => Some(ItemType::Instruction),
            "O" => Some(ItemType::OriginalBox),
            _ => None,
        }
    }

    /// XML `ITEMTYPE` code
    pub fn code(self) -> &'static str {
        match self {
            ItemType::Minifig => "M",
            ItemType::Part => "P",
            ItemType::Set => "S",
            ItemType::Book => "B",
            ItemType::Gear => "G",
            ItemType::Catalog => "C",
            ItemType::Instruction => "I",
            ItemType::OriginalBox => "O",
        }
    }

    /// Type name used in API paths. Must be uppercase.
    pub fn api_name(self) -> &'static str {
        match self {
            ItemType::Minifig => "MINIFIG",
            ItemType::Part => "PART",
            ItemType::Set => "SET",
            ItemType::Book => "BOOK",
            ItemType::Gear => "GEAR",
            ItemType::Catalog => "CATALOG",
            ItemType::Instruction => "INSTRUCTION",
            ItemType::OriginalBox => "ORIGINAL_BOX",
        }
    }

    /// Human readable label for console output
    pub fn label(self) -> &'static str {
        match self {
            ItemType::Minifig => "minifigure",
            ItemType::Part => "part",
            ItemType::Set => "set",
            ItemType::Book => "book",
            ItemType::Gear => "gear",
            ItemType::Catalog => "catalog",
            ItemType::Instruction => "instruction",
            ItemType::OriginalBox => "original box",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl Serialize for ItemType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.api_name())
    }
}

/// One inventory record from the XML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub item_type: ItemType,
    pub item_id: String,
    pub quantity: u32,
    pub condition: Condition,
    pub color: Option<String>,
}

impl LineItem {
    /// Color id to send to the price guide, if the item has a real one.
    ///
    /// BrickLink uses `0` for "not applicable", which minifigures and sets carry.
    pub fn color_id(&self) -> Option<&str> {
        self.color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "0")
    }

    /// Key used to detect duplicate lines within one inventory
    pub(crate) fn lookup_key(&self) -> (ItemType, &str, Condition, Option<&str>) {
        (self.item_type, &self.item_id, self.condition, self.color_id())
    }
}
