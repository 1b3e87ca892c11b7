//! # Risp CLI (`risp`)
//!
//! Command-line front end for a Risp indexing backend: browse contexts,
//! sources and resources, index new URIs, and run full-text queries.
//!
//! ## Usage
//!
//! ```bash
//! risp --config ./config/risp.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `risp contexts` | List contexts, optionally select and export them |
//! | `risp create-context <name>` | Create a context and show the refreshed list |
//! | `risp sources` | List sources with their adapter |
//! | `risp index <uri>` | Index a `file://`, `http://` or `https://` URI |
//! | `risp resources` | List indexed resources |
//! | `risp search "<query>"` | Run a query and print composed results |
//! | `risp open <uri>` | Open a URI with the platform handler |
//! | `risp repl` | Interactive `query` / command loop |
//! | `risp completions <shell>` | Print a shell completion script |
//!
//! ## Examples
//!
//! ```bash
//! # Export two contexts to a file on the backend host
//! risp contexts --select 1f0c --select 77aa --export --output team.yaml
//!
//! # Index a directory, then search it
//! risp index file:///home/me/notes
//! risp search "deployment checklist"
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use risp_client::client::HttpApi;
use risp_client::logging::{self, Verbosity};
use risp_client::{config, contexts, open, repl, resources, search, sources};
use risp_client_core::api::RispApi;

/// Risp CLI: a command-line client for the Risp search and indexing backend.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/risp.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "risp",
    about = "Risp: browse, index and search through a Risp backend",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/risp.toml`. `RISP_BACKEND_URL` and
    /// `RISP_CONTEXT_ID` override values read from the file.
    #[arg(long, global = true, default_value = "./config/risp.toml")]
    config: PathBuf,

    /// Debug-level logging to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contexts.
    ///
    /// Select rows with `--select <id>` (repeatable) and send them to the
    /// backend's export with `--export`.
    Contexts {
        /// Context id to select. Unknown ids are reported and skipped.
        #[arg(long = "select", value_name = "ID")]
        select: Vec<String>,

        /// Export the selected contexts.
        #[arg(long)]
        export: bool,

        /// Export destination. Defaults to `ui.export_filename`.
        #[arg(long, requires = "export")]
        output: Option<String>,
    },

    /// Create a context.
    CreateContext {
        /// Display name. Must not be blank.
        name: String,
    },

    /// List sources.
    Sources,

    /// Index a URI as a new source.
    Index {
        /// `file://`, `http://` or `https://` URI.
        uri: String,
    },

    /// List resources.
    Resources,

    /// Run a full-text query.
    Search {
        /// Query expression, passed to the backend verbatim.
        query: String,

        /// Open the top result afterwards.
        #[arg(long)]
        open: bool,
    },

    /// Open a URI with the platform handler.
    Open { uri: String },

    /// Interactive loop: `query <expr>`, `menu`, `exit`, or a raw command.
    Repl,

    /// Print a shell completion script to stdout.
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));

    match cli.command {
        // Commands that don't talk to the backend
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "risp", &mut io::stdout());
        }
        Commands::Open { uri } => {
            open::open_uri(&uri).await?;
        }
        command => run_backend_command(command, &cli.config).await?,
    }

    Ok(())
}

async fn run_backend_command(command: Commands, config_path: &Path) -> anyhow::Result<()> {
    let cfg = config::load_config(config_path)?;
    tracing::debug!(base_url = %cfg.backend.base_url, "config loaded");
    let api: Arc<dyn RispApi> = Arc::new(HttpApi::from_config(&cfg)?);

    match command {
        Commands::Contexts {
            select,
            export,
            output,
        } => {
            contexts::run_contexts(api, &cfg, &select, export, output.as_deref()).await?;
        }
        Commands::CreateContext { name } => {
            contexts::run_create_context(api, &cfg, &name).await?;
        }
        Commands::Sources => {
            sources::run_sources(api).await?;
        }
        Commands::Index { uri } => {
            sources::run_index(api, &cfg, &uri).await?;
        }
        Commands::Resources => {
            resources::run_resources(api).await?;
        }
        Commands::Search { query, open } => {
            search::run_search(api, &query, open).await?;
        }
        Commands::Repl => {
            repl::run_repl(api, &cfg).await?;
        }
        // Handled in main without a config
        Commands::Open { .. } | Commands::Completions { .. } => {}
    }

    Ok(())
}
