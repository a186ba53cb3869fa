//! CLI entry point - the composition root.
//!
//! Command dispatch routes to the Axum adapter; all infrastructure wiring
//! happens in `guesthouse_axum::bootstrap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use guesthouse_axum::{CorsConfig, ServerConfig, start_server};
use guesthouse_core::paths::{data_root, database_path};

/// Command-line interface for the guesthouse content service.
#[derive(Parser)]
#[command(name = "guesthouse")]
#[command(about = "Content API for the teachers' guesthouse portal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port for the HTTP server
        #[arg(long, default_value_t = 8976)]
        port: u16,

        /// Override the SQLite database file path
        #[arg(long)]
        db: Option<PathBuf>,

        /// Restrict CORS to these origins (repeatable); all origins are
        /// allowed when omitted
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },
    /// Print resolved data paths
    Paths,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve {
            port,
            db,
            cors_origins,
        } => {
            let mut config = ServerConfig::with_defaults()?;
            config.port = port;
            if let Some(db) = db {
                config.db_path = db;
            }
            if !cors_origins.is_empty() {
                config.cors = CorsConfig::AllowOrigins(cors_origins);
            }
            start_server(config).await?;
        }
        Commands::Paths => {
            println!("data root: {}", data_root()?.display());
            println!("database:  {}", database_path()?.display());
        }
    }

    Ok(())
}
