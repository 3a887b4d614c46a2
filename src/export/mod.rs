//! Export of priced inventories
//!
//! Three independent projections of the same results:
//! - `<name>.xml`: BrickLink mass upload file, the only one carrying markup
//! - `<name>.json`: simplified summary with the original average price
//! - `<name>_detailed.json`: full price statistics and error messages

mod detailed;
mod summary;
mod upload;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::markup::Markup;
use crate::pricing::PriceResult;

pub use detailed::{detail_records, render_detailed_json, write_detailed_json, DetailRecord};
pub use summary::{render_summary_json, summary_records, write_summary_json, SummaryRecord};
pub use upload::{render_upload_xml, upload_records, write_upload_xml, UploadRecord};

/// Output file locations derived from an export name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub upload: PathBuf,
    pub summary: PathBuf,
    pub detailed: PathBuf,
}

impl ExportPaths {
    /// `prices.xml`, `prices.json` and `prices` all yield the same three files.
    pub fn from_name(name: &str) -> Self {
        let base = Path::new(name).with_extension("");
        Self {
            upload: with_suffix(&base, ".xml"),
            summary: with_suffix(&base, ".json"),
            detailed: with_suffix(&base, "_detailed.json"),
        }
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Counts reported after a full export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub paths: ExportPaths,
    pub uploaded: usize,
    pub omitted: usize,
}

/// Writes all three export files. Stops at the first unwritable file.
pub fn export_all(results: &[PriceResult], name: &str, markup: &Markup) -> Result<ExportReport> {
    let paths = ExportPaths::from_name(name);

    let uploaded = write_upload_xml(&paths.upload, results, markup)?;
    log::info!(
        "BrickLink Mass Upload XML exported to: {} (prices increased by {}%)",
        paths.upload.display(),
        markup.percent()
    );

    write_summary_json(&paths.summary, results)?;
    log::info!("Simplified JSON exported to: {}", paths.summary.display());

    write_detailed_json(&paths.detailed, results)?;
    log::info!("Detailed results exported to: {}", paths.detailed.display());

    Ok(ExportReport {
        paths,
        uploaded,
        omitted: results.len() - uploaded,
    })
}

/// Writes a rendered document, appending a final newline.
pub(crate) fn write_document(path: &Path, mut content: String) -> Result<()> {
    content.push('\n');
    std::fs::write(path, content).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
