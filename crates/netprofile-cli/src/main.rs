//! Command-line front end for network profile resolution

use clap::{Parser, Subcommand};
use netprofile_config::NetworkCategory;
use netprofile_utils::{init_logging, init_logging_with_level, LogLevel};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "netprofile")]
#[command(about = "Resolve and validate deployment network profiles")]
struct Cli {
    /// Catalog file (TOML or JSON); defaults to netprofile.toml/json or the built-in catalog
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Do not load a .env file from the working directory
    #[arg(long, global = true)]
    no_dotenv: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG is used when omitted
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every network in the catalog
    List {
        /// Only show networks of this category (local, testnet, mainnet)
        #[arg(long)]
        category: Option<NetworkCategory>,
    },
    /// Resolve a network profile and print it
    Resolve {
        /// Network name; the catalog default when omitted
        network: Option<String>,

        /// Use this RPC endpoint instead of the catalog template
        #[arg(long)]
        rpc_url: Option<String>,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
    /// Print the compiler policies handed to the build pipeline
    Compilers,
    /// Report whether a verification credential is configured for a network
    VerifyKey {
        network: String,
    },
    /// Write the built-in catalog to a file
    Init {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.log_level {
        Some(level) => init_logging_with_level(level),
        None => init_logging(),
    }

    if !cli.no_dotenv {
        commands::load_dotenv();
    }

    match cli.command {
        Commands::List { category } => commands::list(cli.catalog, category).await,
        Commands::Resolve {
            network,
            rpc_url,
            json,
        } => commands::resolve(cli.catalog, network, rpc_url, json).await,
        Commands::Compilers => commands::compilers(cli.catalog).await,
        Commands::VerifyKey { network } => commands::verify_key(cli.catalog, network).await,
        Commands::Init { path } => commands::init(path).await,
    }
}
