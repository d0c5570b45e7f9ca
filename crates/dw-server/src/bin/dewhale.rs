//! `dewhale`: serve the UI generation endpoint or refine modules offline.
//!
//! ```bash
//! dewhale serve --bind 0.0.0.0:3000
//! dewhale refine generated.tsx --output fixed.tsx
//! cat generated.tsx | dewhale refine -
//! dewhale catalog
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dw_server::{
    commands::{self, catalog::CatalogArgs, refine::RefineArgs, serve::ServeArgs},
    logging::{setup_logging, LogFormat, LogLevel},
    DewhaleConfig, ServerError,
};
use tracing::{debug, error};

#[derive(Parser)]
#[command(
    name = "dewhale",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate React components from prompts and repair their imports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP endpoint
    Serve(ServeArgs),

    /// Refine a generated module and print the result
    Refine(RefineArgs),

    /// Print the effective import rules
    Catalog(CatalogArgs),
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    // A missing .env is normal
    let dotenv = dotenvy::dotenv();

    setup_error_reporting()?;
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format)?;
    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "loaded .env");
    }

    let config = DewhaleConfig::load(cli.config.as_deref())?;
    debug!(
        bind = %config.server.bind,
        custom_rules = config.catalog.rules.is_some(),
        generation = config.generation.has_credentials(),
        "effective configuration"
    );

    let result = match cli.command {
        Commands::Serve(args) => commands::serve_command(args, &config).await,
        Commands::Refine(args) => commands::refine_command(args, &config).await,
        Commands::Catalog(args) => commands::catalog_command(args, &config).await,
    };

    match result {
        Ok(()) => Ok(()),
        Err(ServerError::Refine(err)) => {
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(1);
        }
        Err(err) => {
            error!("{}", err);
            if cli.verbose > 0 {
                error!(?err, "detailed error context");
            }
            std::process::exit(1);
        }
    }
}

fn setup_error_reporting() -> eyre::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .map_err(|e| eyre::eyre!("Failed to setup error reporting: {}", e))
}
