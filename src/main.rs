use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod aggregate;
mod config;
mod csv_io;
mod error;
mod filter;
mod forecast;
mod models;
mod report;
mod store;

use config::AppConfig;
use filter::RecordFilter;
use report::{DashboardView, JsonPresenter, MarkdownPresenter, Presenter, TableRow};
use store::CrimeStore;

#[derive(Parser)]
#[command(name = "crime-dashboard")]
#[command(about = "Crime records dashboard with monthly trend forecasting", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// CSV files appended to the records before the command runs
    #[arg(long = "import", global = true)]
    imports: Vec<PathBuf>,

    /// Start without the built-in seed records
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Case-insensitive match on crime type or location
    #[arg(long)]
    search: Option<String>,
    /// Exact crime type
    #[arg(long = "type")]
    crime_type: Option<String>,
    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
}

impl From<FilterArgs> for RecordFilter {
    fn from(args: FilterArgs) -> Self {
        RecordFilter {
            search: args.search,
            crime_type: args.crime_type,
            date_from: args.from,
            date_to: args.to,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full dashboard
    Dashboard {
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the filtered records table
    Table {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the monthly trend and its forecast
    Forecast,
    /// Export records to a CSV file
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import records from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
        /// Write the merged records to this CSV file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    let mut store = if cli.no_seed {
        CrimeStore::new()
    } else {
        CrimeStore::seeded()
    };
    let mut rng = rand::thread_rng();

    for path in &cli.imports {
        import_into(&mut store, path, &config, &mut rng)?;
    }
    if store.is_empty() {
        tracing::warn!("no records loaded; views will be empty");
    }

    match cli.command {
        Commands::Dashboard {
            format,
            out,
            filter,
        } => {
            let view = DashboardView::build(
                store.records(),
                &filter.into(),
                &config.current_month(),
            );
            let rendered = match format {
                OutputFormat::Markdown => MarkdownPresenter.render(&view)?,
                OutputFormat::Json => JsonPresenter.render(&view)?,
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Dashboard written to {}.", path.display());
                }
                None => print!("{rendered}"),
            }
        }
        Commands::Table { filter } => {
            let filter: RecordFilter = filter.into();
            let rows: Vec<TableRow> = filter
                .apply(store.records())
                .into_iter()
                .map(TableRow::from)
                .collect();
            if !filter.is_empty() {
                tracing::debug!(shown = rows.len(), total = store.len(), "filtered table");
            }
            print!("{}", report::render_table(&rows));
        }
        Commands::Forecast => {
            let months = aggregate::month_histogram(store.records());
            let projection = forecast::forecast(&months);
            print!("{}", report::render_trend(&months, &projection));
        }
        Commands::Export { out } => {
            let path = out.unwrap_or_else(|| config.export.path.clone());
            csv_io::write_csv(&path, store.records())
                .with_context(|| format!("failed to export to {}", path.display()))?;
            println!("Exported {} records to {}.", store.len(), path.display());
        }
        Commands::Import { csv, out } => {
            let added = import_into(&mut store, &csv, &config, &mut rng)?;
            println!("CSV data uploaded successfully! Added {added} records.");
            if let Some(path) = out {
                csv_io::write_csv(&path, store.records())
                    .with_context(|| format!("failed to export to {}", path.display()))?;
                println!("Merged {} records into {}.", store.len(), path.display());
            }
        }
    }

    Ok(())
}

fn import_into(
    store: &mut CrimeStore,
    path: &Path,
    config: &AppConfig,
    rng: &mut impl rand::Rng,
) -> anyhow::Result<usize> {
    let records = csv_io::read_csv(path, &config.import, rng)
        .with_context(|| format!("failed to import {}", path.display()))?;
    Ok(store.extend(records))
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
