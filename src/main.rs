//! BrickLink Inventory Pricer
//!
//! Gets prices for minifigures, parts and sets from a BrickLink XML inventory
//! and optionally exports a mass upload file with a markup applied.

use std::path::{Path, PathBuf};

use bricklink_pricer::config::setup_instructions;
use bricklink_pricer::markup::DEFAULT_MARKUP_PERCENT;
use bricklink_pricer::{
    export_all, parse_xml_inventory, price_inventory, report, BricklinkClient, Condition, Error,
    Markup, Result, Settings,
};
use clap::Parser;
use rust_decimal::Decimal;

/// Input files tried in order when --xml is not given
const DEFAULT_XML_FILES: [&str; 3] = ["Minifigures.xml", "Parts.xml", "Sets.xml"];

/// Get prices for items from a BrickLink XML inventory (minifigures, parts, sets)
#[derive(Parser, Debug)]
#[command(name = "bricklink_pricer")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:
  bricklink_pricer --xml Minifigures.xml
  bricklink_pricer --xml Parts.xml
  bricklink_pricer --xml Minifigures.xml --condition U --export prices --markup 15")]
struct Args {
    /// Path to BrickLink XML inventory file [default: Minifigures.xml]
    #[arg(short = 'x', long)]
    xml: Option<PathBuf>,

    /// Only price lines in this condition: N (new) or U (used)
    #[arg(short, long)]
    condition: Option<Condition>,

    /// Only show price information (no inventory statistics)
    #[arg(short, long, default_value_t = false)]
    prices_only: bool,

    /// Export results to <NAME>.xml, <NAME>.json and <NAME>_detailed.json
    #[arg(short, long, value_name = "NAME")]
    export: Option<String>,

    /// Markup percentage added to prices in the upload file
    #[arg(short, long, default_value_t = DEFAULT_MARKUP_PERCENT, allow_negative_numbers = true)]
    markup: Decimal,

    /// TOML file with API credentials
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show setup instructions
    #[arg(long, default_value_t = false)]
    setup: bool,

    /// Enable debug output for API calls
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    // RUST_LOG still wins over these defaults
    let default_filter = if args.debug {
        "info,bricklink_pricer=debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.setup {
        println!("{}", setup_instructions());
        return;
    }

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let markup = Markup::new(args.markup)?;

    let xml_path = resolve_input(args.xml.as_deref())?;
    log::info!("Parsing XML inventory: {}", xml_path.display());
    let items = parse_xml_inventory(&xml_path)?;

    if items.is_empty() {
        log::warn!("No items found in XML file!");
        return Ok(());
    }

    if !args.prices_only {
        print!("{}", report::format_inventory_stats(&items, args.condition));
    }

    let settings = Settings::load(args.config.as_deref())?;
    let mut client = BricklinkClient::new(settings);

    let results = price_inventory(&mut client, &items, args.condition);
    if results.is_empty() {
        log::warn!("No results to display!");
        return Ok(());
    }

    print!("{}", report::format_price_summary(&results));

    if let Some(name) = &args.export {
        let export = export_all(&results, name, &markup)?;
        println!(
            "\nBrickLink Mass Upload XML exported to: {}",
            export.paths.upload.display()
        );
        println!("  (Prices increased by {}%)", markup.percent());
        if export.omitted > 0 {
            println!("  ({} items without price left out)", export.omitted);
        }
        println!("Simplified JSON exported to: {}", export.paths.summary.display());
        println!("Detailed results exported to: {}", export.paths.detailed.display());
    }

    Ok(())
}

/// Uses the given path, or the first default inventory file that exists.
fn resolve_input(xml: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = xml {
        return Ok(path.to_path_buf());
    }

    DEFAULT_XML_FILES
        .into_iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .map(|p| {
            log::info!("No XML file specified, using '{}'", p.display());
            p
        })
        .ok_or_else(|| Error::Parse {
            path: PathBuf::from(DEFAULT_XML_FILES[0]),
            message: format!(
                "no XML file specified and none of {} found. Usage: bricklink_pricer --xml your_file.xml",
                DEFAULT_XML_FILES.join(", ")
            ),
        })
}
