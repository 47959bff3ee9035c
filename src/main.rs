use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trello2md::cli::{handle_export_command, handle_render_command, ExportArgs};
use trello2md::config::{Settings, Trello2MdPaths};

#[derive(Parser)]
#[command(
    name = "trello2md",
    version,
    about = "Export Trello boards and cards to Markdown.",
    long_about = "Export Trello boards and cards to Markdown.\n\n\
                  Reads the JSON Trello produces from \"Export as JSON\". A board \
                  becomes a directory with an index.md linking one document per \
                  card; a single card is printed to stdout."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a board (to a directory) or a card (to stdout)
    Export(ExportArgs),

    /// Print a card's Markdown to stdout
    Render {
        /// Trello JSON export of a card
        source: String,
    },

    /// Show current configuration and paths
    Config {
        /// Write the effective settings to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = Trello2MdPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Export(args) => handle_export_command(&settings, args)?,
        Commands::Render { source } => handle_render_command(&settings, &source)?,
        Commands::Config { init } => {
            if init {
                settings.save(&paths)?;
                println!("Wrote {}", paths.settings_file().display());
                println!();
            }
            println!("trello2md Configuration");
            println!("=======================");
            println!("Config file: {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Document extension: {}", settings.document_extension);
            println!("  Index name:         {}", settings.index_name);
            println!("  Progress width:     {}", settings.progress_name_width);
            println!("  Include closed:     {}", settings.include_closed);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only progress lines and documents
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
