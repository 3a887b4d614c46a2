//! BrickLink Inventory Pricer
//!
//! Reads a BrickLink XML inventory, looks up the current price guide for each
//! line through the BrickLink store API and exports upload-ready files.

pub mod bricklink;
pub mod config;
pub mod error;
pub mod export;
pub mod inventory;
pub mod markup;
pub mod models;
pub mod pricing;
pub mod report;

pub use bricklink::{BricklinkClient, PriceGuide};
pub use config::{Credentials, Settings};
pub use error::{ApiError, ApiResult, Error, Result};
pub use export::{export_all, ExportPaths, ExportReport};
pub use inventory::parse_xml_inventory;
pub use markup::{apply_markup, Markup};
pub use models::{Condition, ItemType, LineItem};
pub use pricing::{price_inventory, price_item, PriceOutcome, PriceResult};
