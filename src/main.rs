use anyhow::Result;
use clap::{Parser, Subcommand};
use folio::config::Config;

/// folio - portfolio site with a private content admin
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio site backend with admin sessions and Sanity content", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate the configuration without starting the server
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;

    folio::observability::init_observability(
        "folio",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.is_production(),
    )?;

    match cli.command {
        Commands::Serve { host, port } => folio::cli::server::serve(config, host, port).await,
        Commands::Check => folio::cli::check::check(&config),
    }
}
