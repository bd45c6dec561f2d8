//! gpv-feed CLI
//!
//! One-shot JSON dump or a long-running Atom feed server.

use std::path::PathBuf;
#[cfg(feature = "server")]
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use gpv_feed::{
    error::Result,
    models::{Config, ShardSelector, SummaryMode},
    pipeline,
    services::HttpFetcher,
};
#[cfg(feature = "server")]
use gpv_feed::{
    server::{self, AppState},
    storage::{LocalStorage, StateStorage},
};

/// gpv-feed - Outage Schedule Feed
#[derive(Parser, Debug)]
#[command(
    name = "gpv-feed",
    version,
    about = "Hourly outage schedule announcements as JSON or an Atom feed"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "storage/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Keep only rows for this queue number (1-9)
    #[arg(long, global = true, conflicts_with = "shard_code")]
    shard: Option<u8>,

    /// Keep only rows for this queue code, e.g. 4.II
    #[arg(long, global = true)]
    shard_code: Option<String>,

    /// How feed entry titles are summarised
    #[arg(long, global = true, value_enum)]
    summary: Option<SummaryArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl once from a fresh state and print the result as JSON
    Dump {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Serve an Atom feed, crawling on every request
    #[cfg(feature = "server")]
    Serve {
        /// Listen address (default from config)
        #[arg(long)]
        listen_addr: Option<String>,

        /// State file (default from config)
        #[arg(long)]
        state_file: Option<PathBuf>,

        /// Do not clear delivered pages or save state
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the configuration file
    Validate,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SummaryArg {
    Auto,
    Merged,
    Listed,
    Tabular,
}

impl From<SummaryArg> for SummaryMode {
    fn from(arg: SummaryArg) -> Self {
        match arg {
            SummaryArg::Auto => SummaryMode::Auto,
            SummaryArg::Merged => SummaryMode::Merged,
            SummaryArg::Listed => SummaryMode::Listed,
            SummaryArg::Tabular => SummaryMode::Tabular,
        }
    }
}

impl Cli {
    fn selector(&self) -> Result<Option<ShardSelector>> {
        match (self.shard, &self.shard_code) {
            (Some(n), _) => ShardSelector::number(n).map(Some),
            (None, Some(code)) => ShardSelector::code(code.as_str()).map(Some),
            (None, None) => Ok(None),
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(summary) = cli.summary {
        config.feed.summary = summary.into();
    }
    let selector = cli.selector()?;
    if let Some(selector) = &selector {
        log::info!("Filtering for {selector}");
    }

    match cli.command {
        Command::Dump { pretty } => {
            config.validate()?;
            let fetcher = HttpFetcher::new(&config.crawler)?;
            let state = pipeline::run_once(&config, &fetcher, selector.as_ref()).await?;

            let json = if pretty {
                serde_json::to_string_pretty(&state)?
            } else {
                serde_json::to_string(&state)?
            };
            println!("{json}");
        }

        #[cfg(feature = "server")]
        Command::Serve {
            listen_addr,
            state_file,
            dry_run,
        } => {
            if let Some(addr) = listen_addr {
                config.feed.listen_addr = addr;
            }
            if let Some(path) = state_file {
                config.feed.state_file = path.display().to_string();
            }
            config.validate()?;

            let local = LocalStorage::new(&config.feed.state_file);
            let initial = local.load_state().await?;
            let storage: Option<Arc<dyn StateStorage>> = if dry_run {
                log::info!("Dry run: state will not be saved");
                None
            } else {
                Some(Arc::new(local))
            };

            let config = Arc::new(config);
            let fetcher = Arc::new(HttpFetcher::new(&config.crawler)?);
            let listen_addr = config.feed.listen_addr.clone();
            let app = Arc::new(AppState::new(
                Arc::clone(&config),
                fetcher,
                storage,
                selector,
                initial,
            ));

            server::serve(&listen_addr, app).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
