use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tickerboard::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tickerboard")]
#[command(about = "A terminal dashboard for company profiles and stock price history", long_about = None)]
struct Cli {
    //path to a json configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    //cache directory (overrides the config file)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //list companies
    Companies {
        //only show companies whose name starts with this text
        #[arg(long)]
        filter: Option<String>,

        //ignore the cached list and fetch again
        #[arg(long)]
        refresh: bool,
    },

    //show the info card and financials for one company
    Company {
        #[arg(long)]
        symbol: String,

        #[arg(long)]
        refresh: bool,
    },

    //show price history and summary statistics
    History {
        //ticker symbol to fetch (eg aapl)
        #[arg(long, required_unless_present = "file", conflicts_with = "file")]
        symbol: Option<String>,

        //read history from a local json or csv file instead
        #[arg(long)]
        file: Option<PathBuf>,

        //column to sort by (date, open, close, low, high, volume)
        #[arg(long)]
        sort: Option<String>,

        //skip the summary statistics panel
        #[arg(long)]
        no_summary: bool,

        //write the sorted table to csv
        #[arg(long)]
        output_csv: Option<PathBuf>,

        #[arg(long)]
        refresh: bool,
    },

    //manage the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    //remove every cached response
    Clear,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .context(format!("Failed to load config from {:?}", path))?,
        None => DashboardConfig::default(),
    };
    if let Some(cache_dir) = cli.cache_dir {
        config.cache_dir = cache_dir;
    }

    match cli.command {
        Commands::Companies { filter, refresh } => {
            show_companies(&config, filter.as_deref(), refresh)?;
        }
        Commands::Company { symbol, refresh } => {
            show_company(&config, &symbol, refresh)?;
        }
        Commands::History {
            symbol,
            file,
            sort,
            no_summary,
            output_csv,
            refresh,
        } => {
            show_history(
                &config,
                symbol.as_deref(),
                file,
                sort.as_deref(),
                !no_summary,
                output_csv,
                refresh,
            )?;
        }
        Commands::Cache {
            action: CacheAction::Clear,
        } => {
            let removed = build_cache(&config).clear()?;
            println!(
                "Removed {} cached response(s) from {:?}",
                removed, config.cache_dir
            );
        }
    }

    Ok(())
}

fn build_cache(config: &DashboardConfig) -> FileCache {
    FileCache::new(config.cache_dir.clone(), config.cache_ttl())
}

fn build_source(config: &DashboardConfig) -> ApiDataSource<ReqwestHttpClient, FileCache> {
    ApiDataSource::new(ReqwestHttpClient::new(), build_cache(config))
        .with_companies_url(config.companies_url.clone())
        .with_history_url(config.history_url.clone())
        .with_timeout(config.request_timeout())
}

fn cache_mode(refresh: bool) -> CacheMode {
    if refresh {
        CacheMode::Refresh
    } else {
        CacheMode::Use
    }
}

fn show_companies(config: &DashboardConfig, filter: Option<&str>, refresh: bool) -> Result<()> {
    let companies = build_source(config)
        .companies(cache_mode(refresh))
        .context("Failed to load company list")?;

    let matches = find_matches(filter.unwrap_or(""), &companies);

    println!("Companies ({} of {})", matches.len(), companies.len());
    company_list_table(&matches).printstd();

    Ok(())
}

fn show_company(config: &DashboardConfig, symbol: &str, refresh: bool) -> Result<()> {
    let company = build_source(config)
        .company(symbol, cache_mode(refresh))
        .context(format!("Failed to load company {}", symbol))?;

    println!("Company Info");
    company_card(&company).printstd();

    println!("\nFinancials");
    match financials_table(&company) {
        Some(table) => table.printstd(),
        None => println!("No financial data for {}", company.symbol),
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn show_history(
    config: &DashboardConfig,
    symbol: Option<&str>,
    file: Option<PathBuf>,
    sort: Option<&str>,
    with_summary: bool,
    output_csv: Option<PathBuf>,
    refresh: bool,
) -> Result<()> {
    let (title, records) = match (file, symbol) {
        (Some(path), _) => {
            let records = load_records(&path)
                .context(format!("Failed to load price history from {:?}", path))?;
            (format!("{:?}", path), records)
        }
        (None, Some(symbol)) => {
            let records = build_source(config)
                .history(symbol, cache_mode(refresh))
                .context(format!("Failed to load price history for {}", symbol))?;
            (symbol.to_ascii_uppercase(), records)
        }
        (None, None) => anyhow::bail!("either --symbol or --file is required"),
    };

    let table = TimeSeriesTable::new(records)
        .context(format!("No price history available for {}", title))?;

    let column = match sort {
        Some(name) => {
            Column::parse(name).ok_or_else(|| anyhow::anyhow!("Unknown column: {}", name))?
        }
        None => config.default_sort,
    };
    let state = SortState::new(column);
    let sorted = state.apply(table.records())?;
    info!(rows = sorted.len(), column = %column, "sorted price history");

    let (first, last) = table.date_range()?;
    println!("Price History: {}", title);
    println!("{} to {} ({} days)\n", first, last, table.len());
    history_table(&sorted, state)?.printstd();

    if with_summary {
        println!("\nSummary");
        summary_table(&table.summarize()?).printstd();
    }

    if let Some(path) = output_csv {
        write_records_csv(&sorted, &path)?;
        println!("\nSorted table saved to {:?}", path);
    }

    Ok(())
}
