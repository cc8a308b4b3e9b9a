//! ketab-crawler main entry point
//!
//! This is the command-line interface for the iranketab.ir category crawler.

use anyhow::Context;
use clap::Parser;
use ketab_crawler::config::{load_config_with_hash, validate, Config};
use ketab_crawler::crawler::crawl;
use ketab_crawler::output::print_statistics;
use ketab_crawler::state::StopSignal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ketab-crawler: a catalog crawler for iranketab.ir
///
/// Walks the paginated listing of one category, visits every product page,
/// and writes the deduplicated book table as JSON, CSV and XLSX.
#[derive(Parser, Debug)]
#[command(name = "ketab-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A catalog crawler for iranketab.ir", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the first listing page
    #[arg(long, value_name = "N")]
    first_page: Option<u32>,

    /// Override the last listing page
    #[arg(long, value_name = "N")]
    last_page: Option<u32>,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration after command-line overrides")?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ketab_crawler=info,warn"),
            1 => EnvFilter::new("ketab_crawler=debug,info"),
            2 => EnvFilter::new("ketab_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(first) = cli.first_page {
        config.crawler.first_page = first;
    }
    if let Some(last) = cli.last_page {
        config.crawler.last_page = last;
    }
    if let Some(dir) = &cli.out_dir {
        config.output.directory = dir.clone();
    }
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== ketab-crawler Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Category: {} ({})", config.site.category_label, config.site.category_slug);

    println!("\nCrawler Configuration:");
    println!(
        "  Pages: {}..={}",
        config.crawler.first_page, config.crawler.last_page
    );
    println!("  Page load timeout: {}s", config.crawler.page_load_timeout_secs);
    println!("  Selector timeout: {}s", config.crawler.selector_timeout_secs);
    println!(
        "  Item attempts: {} ({}ms apart)",
        config.crawler.item_attempts, config.crawler.retry_backoff_ms
    );
    println!(
        "  Scroll pause: {}ms (max {} rounds), settle pause: {}ms",
        config.crawler.scroll_pause_ms,
        config.crawler.max_scroll_rounds,
        config.crawler.settle_pause_ms
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nOutput:");
    for ext in ["json", "csv", "xlsx"] {
        println!(
            "  {}",
            config
                .output
                .directory
                .join(format!("{}.{}", config.output.basename, ext))
                .display()
        );
    }

    println!("\nListing pages:");
    for page in config.crawler.first_page..=config.crawler.last_page {
        println!("  - {}", config.site.listing_url(page));
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling category '{}' pages {}..={}",
        config.site.category_label,
        config.crawler.first_page,
        config.crawler.last_page
    );

    let stop = StopSignal::new();
    stop.listen_for_ctrl_c();

    match crawl(config, stop).await {
        Ok(outcome) => {
            print_statistics(&outcome.statistics, &outcome.report);
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
