//! Catalogue link tool.
//!
//! Generates OWS and style links for catalogue records stored as JSON and
//! previews GeoWebCache tiles for an extent.

mod config;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ows_common::{BoundingBox, CrsCode, Record, ServiceLink, TileGrid};
use ows_protocol::{validate_default_styles, OwsLinkBuilder, Style, StyleFormat};
use projection::{CrsOverrides, Reprojector};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::LinkToolConfig;

#[derive(Parser, Debug)]
#[command(name = "link-tool")]
#[command(about = "Generate OWS and style links for catalogue records")]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "LINK_TOOL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a WMS, WFS or GeoWebCache link for a record
    Ows {
        /// Record JSON file
        #[arg(short, long)]
        record: PathBuf,

        /// Service endpoint, optionally with its own query string
        #[arg(short, long)]
        endpoint: String,

        /// WMS, WFS or GWC
        #[arg(short = 't', long)]
        service_type: String,

        /// Service version, e.g. 1.1.0
        #[arg(short = 'v', long, default_value = "1.1.0")]
        service_version: String,

        /// Write the link back into the record file
        #[arg(long)]
        store: bool,
    },

    /// Build a link to an uploaded style document
    Style {
        /// Record JSON file
        #[arg(short, long)]
        record: PathBuf,

        #[arg(short, long)]
        name: String,

        /// SLD, QML or LYR
        #[arg(short, long)]
        format: String,

        /// Path of the document below the media root
        #[arg(long)]
        content: String,

        /// Mark as the default style for its format
        #[arg(long)]
        default: bool,

        /// Write the link back into the record file
        #[arg(long)]
        store: bool,
    },

    /// Show the GeoWebCache preview tile for an extent
    Tile {
        /// Tile grid CRS (EPSG:4326 or EPSG:3857)
        #[arg(long, default_value = "EPSG:4326")]
        crs: String,

        /// Extent as minx,miny,maxx,maxy in the grid CRS
        #[arg(long, allow_hyphen_values = true)]
        bbox: String,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = LinkToolConfig::load(args.config.as_deref())?;

    init_tracing(&args.log_level, args.json_logs || config.json_logs)?;

    match args.command {
        Command::Ows {
            record,
            endpoint,
            service_type,
            service_version,
            store,
        } => {
            let builder = OwsLinkBuilder::new(Arc::new(reprojector(&config)));
            let mut rec = read_record(&record)?;
            let link = builder
                .generate_ows_link(&rec, &endpoint, &service_type, &service_version)
                .with_context(|| format!("Failed to build link for {}", rec.identifier))?;
            info!(identifier = %rec.identifier, protocol = %link.schema.protocol, "Built OWS link");

            print_link(&link)?;
            if store {
                rec.store_link(link)?;
                write_record(&record, &rec)?;
            }
        }

        Command::Style {
            record,
            name,
            format,
            content,
            default,
            store,
        } => {
            let style = Style {
                name,
                format: format.parse()?,
                default,
                content,
            };
            let mut rec = read_record(&record)?;
            let mut styles = record_styles(&rec);
            styles.retain(|s| !(s.name == style.name && s.format == style.format));
            styles.push(style.clone());
            validate_default_styles(&rec.identifier, &styles)?;

            let link = style.link(&config.media_url);
            info!(identifier = %rec.identifier, style = %style.name, "Built style link");

            print_link(&link)?;
            if store {
                style.apply_default(&mut rec);
                rec.store_link(link)?;
                write_record(&record, &rec)?;
            }
        }

        Command::Tile { crs, bbox } => {
            let crs: CrsCode = crs.parse()?;
            let target = BoundingBox::from_wms_string(&bbox)?;
            let grid = TileGrid::for_crs(crs)?;
            let tile = grid.preview_tile(&target);
            if tile == target {
                info!(bbox = %bbox, "Extent does not fit a tile of the grid");
            }
            println!("{}", tile.to_query_value());
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr; stdout carries the generated link.
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Reprojector for the configured override table.
///
/// An unreadable override file is logged and replaced by an empty table.
fn reprojector(config: &LinkToolConfig) -> Reprojector {
    let overrides = match &config.crs_overrides_path {
        Some(path) => CrsOverrides::load_or_empty(path),
        None => CrsOverrides::bundled(),
    };
    info!(definitions = overrides.len(), "Loaded CRS overrides");
    Reprojector::new(overrides)
}

fn read_record(path: &Path) -> Result<Record> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid record JSON in {}", path.display()))
}

fn write_record(path: &Path, record: &Record) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json).with_context(|| format!("Failed to write record {}", path.display()))?;
    info!(path = %path.display(), "Stored link in record");
    Ok(())
}

fn print_link(link: &ServiceLink) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(link)?);
    Ok(())
}

/// Styles already linked from the record, as far as the links describe them.
fn record_styles(record: &Record) -> Vec<Style> {
    record
        .link_list()
        .iter()
        .filter(|link| link.schema.is_style())
        .filter_map(|link| {
            let format: StyleFormat = link
                .schema
                .protocol
                .strip_prefix("application/")?
                .parse()
                .ok()?;
            Some(Style {
                name: link.schema.name.clone().unwrap_or_default(),
                format,
                default: link.schema.default.unwrap_or(false),
                content: link.url.clone(),
            })
        })
        .collect()
}
