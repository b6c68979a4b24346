//! gifcatalog CLI
//!
//! Command-line interface for scanning folders into a catalog and
//! correcting stored records.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gifcatalog::engine::extract_file;
use gifcatalog::{CatalogError, CatalogRecord, Config, Engine, ScanMode};
use tracing_subscriber::{fmt, EnvFilter};

/// gifcatalog CLI
#[derive(Parser, Debug)]
#[command(name = "gifcatalog")]
#[command(about = "Extract GIF metadata into an editable catalog")]
#[command(version)]
struct Args {
    /// Catalog file
    #[arg(short, long, default_value = "gif_data.json")]
    catalog: PathBuf,

    /// Worker threads used to parse files during a scan
    #[arg(short, long, default_value = "1")]
    threads: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a folder recursively and append its GIFs to the catalog
    Scan {
        /// Folder to scan
        folder: PathBuf,

        /// Count frames from image descriptors only, without stepping over image data
        #[arg(long)]
        structural: bool,
    },

    /// List every record with its index
    List,

    /// Print one record as JSON
    Show {
        /// Record index (as printed by `list`)
        index: usize,
    },

    /// Set extra fields on a record
    Edit {
        /// Record index (as printed by `list`)
        index: usize,

        /// Fields to set, as KEY=VALUE
        #[arg(required = true, value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Parse one file and print its record without touching the catalog
    Inspect {
        /// GIF file
        file: PathBuf,
    },
}

fn main() {
    // Logs go to stderr so listings on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,gifcatalog=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> gifcatalog::Result<()> {
    match args.command {
        Commands::Scan { folder, structural } => {
            let mode = if structural { ScanMode::Structural } else { ScanMode::Traverse };
            let engine = open_engine(&args.catalog, args.threads, mode)?;
            let report = engine.scan_folder(&folder)?;
            for failure in &report.failures {
                eprintln!("skipped {}: {}", failure.path.display(), failure.error);
            }
            println!(
                "appended {} of {} files ({} records in catalog)",
                report.appended.len(),
                report.candidates(),
                engine.len()
            );
        }
        Commands::List => {
            let engine = open_engine(&args.catalog, args.threads, ScanMode::default())?;
            for (index, record) in engine.get_all().iter().enumerate() {
                println!("{}", summary_line(index, record));
            }
        }
        Commands::Show { index } => {
            let engine = open_engine(&args.catalog, args.threads, ScanMode::default())?;
            let record = engine.record(index).ok_or_else(|| CatalogError::IndexOutOfRange {
                index,
                len: engine.len(),
            })?;
            print_json(&record)?;
        }
        Commands::Edit { index, fields } => {
            let engine = open_engine(&args.catalog, args.threads, ScanMode::default())?;
            let updates: BTreeMap<String, String> = fields.into_iter().collect();
            engine.update_record(index, updates)?;
            println!("updated record {}", index);
        }
        Commands::Inspect { file } => {
            // Never opens the catalog
            let record = extract_file(&file, ScanMode::default())?;
            print_json(&record)?;
        }
    }

    Ok(())
}

fn open_engine(catalog: &Path, threads: usize, mode: ScanMode) -> gifcatalog::Result<Engine> {
    let config = Config::builder()
        .catalog_path(catalog)
        .parse_threads(threads)
        .scan_mode(mode)
        .build()?;

    tracing::debug!("gifcatalog v{}, catalog {}", gifcatalog::VERSION, catalog.display());
    Engine::open(config)
}

/// Parse a KEY=VALUE argument
fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

fn summary_line(index: usize, record: &CatalogRecord) -> String {
    format!(
        "{:>5}  {}  {}x{}  {} frame(s)  {}",
        index, record.version, record.width, record.height, record.image_count, record.path
    )
}

fn print_json(record: &CatalogRecord) -> gifcatalog::Result<()> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| CatalogError::Serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
