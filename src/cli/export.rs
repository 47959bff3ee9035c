//! CLI commands for exporting boards and cards
//!
//! Bridges the clap arguments with the source adapter and the materializer.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::config::Settings;
use crate::error::{ExportError, ExportResult};
use crate::export::{DiskSink, ExportOptions, Materializer, MemorySink, Sink};
use crate::models::Board;
use crate::source::{Entity, JsonExportSource, Source};

/// Arguments of `trello2md export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Trello JSON export of a board or a card
    pub source: String,

    /// Directory the board directory is created in
    #[arg(short, long, env = "TRELLO2MD_OUTPUT_DIR", default_value = ".")]
    pub output: PathBuf,

    /// Show what would be written without touching disk
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle `trello2md export`
///
/// Boards are written to disk; a card is printed to stdout.
pub fn handle_export_command(settings: &Settings, args: ExportArgs) -> ExportResult<()> {
    let entity = load(settings, &args.source)?;
    let options = settings.export_options();
    let stdout = io::stdout();

    match entity {
        Entity::Board(board) => {
            info!(
                board = %board.name,
                lists = board.lists.len(),
                cards = board.card_count(),
                dry_run = args.dry_run,
                "exporting board"
            );
            if args.dry_run {
                let mut sink = MemorySink::over_disk();
                export_board(&mut sink, stdout.lock(), options, &board, &args.output)
            } else {
                export_board(&mut DiskSink, stdout.lock(), options, &board, &args.output)
            }
        }
        Entity::Card(card) => {
            info!(card = %card.name, "exporting card");
            Materializer::new(&mut DiskSink, stdout.lock(), options).export_card(&card)
        }
    }
}

/// Handle `trello2md render`: print a single card's Markdown
pub fn handle_render_command(settings: &Settings, source: &str) -> ExportResult<()> {
    match load(settings, source)? {
        Entity::Card(card) => {
            let markdown = crate::export::card_document(&card).to_markdown();
            let mut stdout = io::stdout().lock();
            stdout.write_all(markdown.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        Entity::Board(board) => Err(ExportError::Export(format!(
            "'{}' is a board; use 'trello2md export' for boards",
            board.name
        ))),
    }
}

fn load(settings: &Settings, source: &str) -> ExportResult<Entity> {
    let entity = JsonExportSource::new(settings.include_closed).load(source)?;
    info!(source, name = entity.name(), "loaded export");
    Ok(entity)
}

fn export_board<S: Sink, W: Write>(
    sink: &mut S,
    out: W,
    options: ExportOptions,
    board: &Board,
    root: &Path,
) -> ExportResult<()> {
    let export = Materializer::new(sink, out, options).export_board(board, root)?;
    info!(
        dir = %export.directory.display(),
        documents = export.cards.len() + 1,
        "board export complete"
    );
    Ok(())
}
