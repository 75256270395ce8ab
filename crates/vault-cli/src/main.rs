//! Showcase Vault CLI
//!
//! Command-line tool for scanning showcase payloads into versioned snapshots
//! and for browsing, exporting and auditing what has been stored.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vault_core::{Error, FsStore, RecordSet, ScanSummary, Series, Vault, VaultConfig};

#[derive(Parser)]
#[command(name = "vault")]
#[command(about = "Versioned snapshot vault for game showcase scrapes", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot store directory, overrides the config file
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a showcase payload and commit new snapshot versions
    Scan {
        /// Owner identifier (account uid)
        #[arg(short, long)]
        owner: String,

        /// Path to the payload file (JSON)
        #[arg(short, long)]
        payload: PathBuf,

        /// Print the scan summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored snapshot versions
    Versions {
        /// Owner identifier
        #[arg(short, long)]
        owner: String,

        /// Only this series
        #[arg(short, long)]
        series: Option<Series>,
    },

    /// Show a stored snapshot
    Show {
        /// Owner identifier
        #[arg(short, long)]
        owner: String,

        /// Series to show
        #[arg(short, long)]
        series: Series,

        /// Snapshot version (latest if omitted)
        #[arg(long)]
        version: Option<u32>,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export a stored snapshot to a file
    Export {
        /// Owner identifier
        #[arg(short, long)]
        owner: String,

        /// Series to export
        #[arg(short, long)]
        series: Series,

        /// Snapshot version (latest if omitted)
        #[arg(long)]
        version: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file path
        #[arg(short = 'O', long)]
        output: PathBuf,
    },

    /// Show the scan log of an owner
    History {
        /// Owner identifier
        #[arg(short, long)]
        owner: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> vault_core::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => VaultConfig::load(path)?,
        None => VaultConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    init_logging(if cli.verbose { "debug" } else { config.log_level.as_str() });
    debug!(data_dir = %config.data_dir.display(), "opening vault");

    let vault = Vault::open(&config);

    match cli.command {
        Commands::Scan {
            owner,
            payload,
            json,
        } => cmd_scan(&vault, &owner, &payload, json),
        Commands::Versions { owner, series } => cmd_versions(&vault, &owner, series),
        Commands::Show {
            owner,
            series,
            version,
            limit,
        } => cmd_show(&vault, &owner, series, version, limit),
        Commands::Export {
            owner,
            series,
            version,
            format,
            output,
        } => cmd_export(&vault, &owner, series, version, format, &output),
        Commands::History { owner } => cmd_history(&vault, &owner),
    }
}

fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_scan(vault: &Vault<FsStore>, owner: &str, payload_path: &Path, json: bool) -> vault_core::Result<()> {
    let content = fs::read_to_string(payload_path).map_err(|e| Error::FileRead {
        path: payload_path.to_path_buf(),
        source: e,
    })?;
    let payload: serde_json::Value = serde_json::from_str(&content)?;

    let summary = vault.scan(owner, &payload)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &ScanSummary) {
    match &summary.nickname {
        Some(nickname) => println!("Scanned {} ({})", summary.owner, nickname),
        None => println!("Scanned {}", summary.owner),
    }
    if summary.skipped > 0 {
        println!("Skipped {} unreadable payload entries", summary.skipped);
    }
    println!();

    for outcome in summary.outcomes() {
        let status = if outcome.written { "written" } else { "unchanged" };
        println!(
            "  {:<11} v{:<4} {:<9}  added {}, updated {}, unchanged {}, skipped {}",
            outcome.series.name(),
            outcome.version,
            status,
            outcome.stats.added,
            outcome.stats.updated,
            outcome.stats.unchanged,
            outcome.stats.skipped,
        );
    }
}

fn cmd_versions(vault: &Vault<FsStore>, owner: &str, series: Option<Series>) -> vault_core::Result<()> {
    let selected: Vec<Series> = match series {
        Some(s) => vec![s],
        None => Series::ALL.to_vec(),
    };

    for series in selected {
        let versions = vault.versions(owner, series)?;
        if versions.is_empty() {
            println!("{}: none", series);
        } else {
            let list: Vec<String> = versions.iter().map(|v| format!("v{}", v)).collect();
            println!("{}: {}", series, list.join(", "));
        }
    }

    Ok(())
}

fn load_snapshot(
    vault: &Vault<FsStore>,
    owner: &str,
    series: Series,
    version: Option<u32>,
) -> vault_core::Result<(u32, RecordSet)> {
    vault
        .snapshot(owner, series, version)?
        .ok_or_else(|| Error::NoSnapshots {
            owner: owner.to_string(),
            series,
        })
}

fn cmd_show(
    vault: &Vault<FsStore>,
    owner: &str,
    series: Series,
    version: Option<u32>,
    limit: Option<usize>,
) -> vault_core::Result<()> {
    let (version, records) = load_snapshot(vault, owner, series, version)?;

    println!("{} v{} ({} rows)", series, version, records.len());
    println!();

    // Print header
    println!("{}", records.columns.join("\t"));
    println!("{}", "-".repeat(records.columns.len() * 12));

    // Print rows
    let row_limit = limit.unwrap_or(records.len());
    for record in records.iter().take(row_limit) {
        let values: Vec<String> = record.values().iter().map(|v| v.to_string_value()).collect();
        println!("{}", values.join("\t"));
    }

    if records.len() > row_limit {
        println!("... ({} more rows)", records.len() - row_limit);
    }

    Ok(())
}

fn cmd_export(
    vault: &Vault<FsStore>,
    owner: &str,
    series: Series,
    version: Option<u32>,
    format: ExportFormat,
    output: &Path,
) -> vault_core::Result<()> {
    let (version, records) = load_snapshot(vault, owner, series, version)?;

    match format {
        ExportFormat::Csv => {
            let csv_error = |source| Error::Csv {
                path: output.to_path_buf(),
                source,
            };
            let mut writer = csv::Writer::from_path(output).map_err(csv_error)?;
            writer.write_record(&records.columns).map_err(csv_error)?;
            for record in records.iter() {
                writer
                    .write_record(record.values().iter().map(|v| v.to_string_value()))
                    .map_err(csv_error)?;
            }
            writer.flush()?;
        }
        ExportFormat::Json => {
            let file = File::create(output)?;
            let mut writer = BufWriter::new(file);
            let json = serde_json::to_string_pretty(&records)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
    }

    println!(
        "Exported {} v{} ({} rows) to {}",
        series,
        version,
        records.len(),
        output.display()
    );

    Ok(())
}

fn cmd_history(vault: &Vault<FsStore>, owner: &str) -> vault_core::Result<()> {
    let entries = vault.history(owner)?;

    println!("Scans ({}):", entries.len());
    println!();

    for entry in &entries {
        let nickname = entry.nickname.as_deref().unwrap_or("-");
        println!("{}  {}", entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"), nickname);
        for line in &entry.series {
            let status = if line.written { "written" } else { "unchanged" };
            println!(
                "  {:<11} v{:<4} {:<9}  +{} ~{} ={} !{}",
                line.series.name(),
                line.version,
                status,
                line.stats.added,
                line.stats.updated,
                line.stats.unchanged,
                line.stats.skipped,
            );
        }
    }

    Ok(())
}
