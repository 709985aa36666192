use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookscout::config::{get_config, load_config, Config};
use bookscout::facade::{ProviderSelection, SearchFacade};
use bookscout::http;

/// bookscout - unified book search across Aladin, Kakao and Naver
#[derive(Parser, Debug)]
#[command(name = "bookscout")]
#[command(version = bookscout::VERSION)]
#[command(about = "Unified book search across Aladin, Kakao and Naver", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (repeat for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Socket address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Search all providers for a keyword and print the unified result
    Search {
        /// Search keyword
        keyword: String,

        /// Skip the Aladin provider
        #[arg(long)]
        skip_aladin: bool,

        /// Skip the Kakao provider
        #[arg(long)]
        skip_kakao: bool,

        /// Skip the Naver provider
        #[arg(long)]
        skip_naver: bool,
    },

    /// Print search statistics for a keyword
    Stats {
        /// Search keyword
        keyword: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!("bookscout={}", default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(get_config()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(cli.config.as_ref())?;
    let facade = SearchFacade::from_config(&config);

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            http::serve(&bind, facade).await?;
        }

        Commands::Search {
            keyword,
            skip_aladin,
            skip_kakao,
            skip_naver,
        } => {
            let selection = ProviderSelection {
                aladin: !skip_aladin,
                kakao: !skip_kakao,
                naver: !skip_naver,
            };
            let result = facade.search_multiple(&keyword, selection).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Stats { keyword } => {
            let stats = facade.search_statistics(&keyword).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
