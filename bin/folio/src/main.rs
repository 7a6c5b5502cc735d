//! Folio CLI
//!
//! Builds, checks and queries the site search index.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(name = "folio", version, about = "Site search index tooling")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// File holding the recent-search log
    #[arg(long, default_value = ".folio/state.json")]
    state: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the search index from content
    Index {
        /// Content directory (overrides content.dir)
        #[arg(long)]
        content: Option<std::path::PathBuf>,
        /// Output file (overrides content.output)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Include draft pages
        #[arg(long)]
        drafts: bool,
    },
    /// Validate a built index
    Check {
        /// Index file (defaults to content.output)
        #[arg(short, long)]
        index: Option<std::path::PathBuf>,
    },
    /// Query an index the way the browser does
    Search {
        /// Search text
        query: String,
        /// Index file (defaults to content.output)
        #[arg(short, long)]
        index: Option<std::path::PathBuf>,
        /// Keys to press after typing (down, up, enter, escape)
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,
        /// Print the rendered result markup
        #[arg(long)]
        html: bool,
    },
    /// Show or clear recent searches
    Recent {
        /// Forget all recent searches
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Index {
            content,
            output,
            drafts,
        } => {
            folio::cmd::index::run(&cli.config, content.as_deref(), output.as_deref(), drafts)?;
        }
        Commands::Check { index } => {
            folio::cmd::check::run(&cli.config, index.as_deref())?;
        }
        Commands::Search {
            query,
            index,
            keys,
            html,
        } => {
            folio::cmd::search::run(
                &cli.config,
                &cli.state,
                &query,
                index.as_deref(),
                &keys,
                html,
            )?;
        }
        Commands::Recent { clear } => {
            folio::cmd::recent::run(&cli.config, &cli.state, clear)?;
        }
    }

    Ok(())
}
