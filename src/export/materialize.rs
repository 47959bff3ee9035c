//! Materializer: turns an entity graph into documents on disk
//!
//! A board becomes a fresh directory named after its slug, holding one
//! document per card and an index linking to them. A standalone card is
//! rendered straight to the output stream.
//!
//! The traversal is depth-first and sequential: each card file is written
//! before the next card is visited. Every created document is announced on
//! the output stream as `<name padded to width> -> <path>`.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ExportError, ExportResult};
use crate::models::{Board, Card};

use super::naming::OutputContext;
use super::render;
use super::sink::Sink;
use super::slug::slug;
use super::ExportOptions;

/// Lifecycle of a single export run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    ExportingBoard,
    ExportingCard,
    /// Finished, successfully or not
    Done,
}

/// What a board export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardExport {
    pub directory: PathBuf,
    pub index: PathBuf,
    /// Card documents in traversal order
    pub cards: Vec<PathBuf>,
}

/// Drives one export run against a sink
pub struct Materializer<'a, S: Sink, W: Write> {
    sink: &'a mut S,
    out: W,
    options: ExportOptions,
    state: ExportState,
}

impl<'a, S: Sink, W: Write> Materializer<'a, S, W> {
    /// `out` receives progress lines and standalone card documents
    pub fn new(sink: &'a mut S, out: W, options: ExportOptions) -> Self {
        Self {
            sink,
            out,
            options,
            state: ExportState::Idle,
        }
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Export a board into a new directory under `root`
    ///
    /// Documents written before a failure stay where they are. The index is
    /// held in memory until every card is written, so a failed run leaves
    /// card files without an index.
    pub fn export_board(&mut self, board: &Board, root: &Path) -> ExportResult<BoardExport> {
        self.begin(ExportState::ExportingBoard)?;
        let result = self.write_board(board, root);
        self.state = ExportState::Done;
        result
    }

    /// Render a card with no enclosing board to the output stream
    pub fn export_card(&mut self, card: &Card) -> ExportResult<()> {
        self.begin(ExportState::ExportingCard)?;
        let result = self.print_card(card);
        self.state = ExportState::Done;
        result
    }

    fn begin(&mut self, next: ExportState) -> ExportResult<()> {
        if self.state != ExportState::Idle {
            return Err(ExportError::Export(format!(
                "exporter already used (state: {:?})",
                self.state
            )));
        }
        self.state = next;
        Ok(())
    }

    fn write_board(&mut self, board: &Board, root: &Path) -> ExportResult<BoardExport> {
        let board_slug = slug(&board.reference)?;

        let mut parent = OutputContext::new(root);
        let dirname = parent.allocate(&board_slug, "", &*self.sink);
        let directory = parent.path_of(&dirname);
        self.sink.create_dir(&directory)?;
        info!(board = %board.name, dir = %directory.display(), "created board directory");

        let mut ctx = OutputContext::new(&directory);
        let index_name = self.options.index_file_name();
        ctx.claim(index_name.as_str());
        self.report(&board.name, &Path::new(&dirname).join(&index_name))?;

        let mut cards = Vec::with_capacity(board.card_count());
        let doc = render::board_document(board, |card| {
            let name = self.write_card(&mut ctx, card)?;
            cards.push(ctx.path_of(&name));
            Ok(name)
        })?;

        let index = ctx.path_of(&index_name);
        self.sink.write_new(&index, &doc.to_markdown())?;
        info!(board = %board.name, cards = cards.len(), "wrote board index");

        Ok(BoardExport {
            directory,
            index,
            cards,
        })
    }

    fn write_card(&mut self, ctx: &mut OutputContext, card: &Card) -> ExportResult<String> {
        let card_slug = slug(&card.reference)?;
        let name = ctx.allocate(&card_slug, &self.options.document_extension, &*self.sink);
        self.report(&card.name, Path::new(&name))?;

        let doc = render::card_document(card);
        self.sink.write_new(&ctx.path_of(&name), &doc.to_markdown())?;
        debug!(card = %card.name, file = %name, "wrote card");

        Ok(name)
    }

    fn print_card(&mut self, card: &Card) -> ExportResult<()> {
        // Validates the reference even though nothing is named after it
        slug(&card.reference)?;

        let doc = render::card_document(card);
        self.out.write_all(doc.to_markdown().as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn report(&mut self, name: &str, path: &Path) -> ExportResult<()> {
        let width = self.options.progress_name_width;
        writeln!(self.out, "{:width$.width$} -> {}", name, path.display())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::sink::{DiskSink, MemorySink};
    use crate::models::CardList;
    use tempfile::TempDir;

    fn card(slug: &str, name: &str) -> Card {
        Card::new(format!("https://trello.com/c/id/1-{}", slug), name)
    }

    fn sample_board() -> Board {
        Board::new("https://trello.com/b/WODq2cwg/sample-board", "Sample Board").with_list(
            CardList::new("To Do")
                .with_card(card("first-card", "First Card"))
                .with_card(card("second-card", "Second Card")),
        )
    }

    #[test]
    fn test_board_export_in_memory() {
        let mut sink = MemorySink::new();
        let mut out = Vec::new();
        let mut materializer = Materializer::new(&mut sink, &mut out, ExportOptions::default());

        let export = materializer
            .export_board(&sample_board(), Path::new("out"))
            .unwrap();
        assert_eq!(materializer.state(), ExportState::Done);

        assert_eq!(export.directory, Path::new("out/sample-board"));
        assert_eq!(export.index, Path::new("out/sample-board/index.md"));
        assert_eq!(
            export.cards,
            vec![
                PathBuf::from("out/sample-board/first-card.md"),
                PathBuf::from("out/sample-board/second-card.md"),
            ]
        );

        assert_eq!(
            sink.file("out/sample-board/index.md"),
            Some(
                "# Sample Board\n\n## To Do\n\n\
                 - [First Card](first-card.md)\n\
                 - [Second Card](second-card.md)\n"
            )
        );
        assert_eq!(sink.file("out/sample-board/first-card.md"), Some("# First Card\n"));

        let progress = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = progress.lines().collect();
        assert_eq!(
            lines,
            vec![
                format!("{:30} -> sample-board/index.md", "Sample Board"),
                format!("{:30} -> first-card.md", "First Card"),
                format!("{:30} -> second-card.md", "Second Card"),
            ]
        );
    }

    #[test]
    fn test_progress_name_is_truncated() {
        let board = Board::new("https://trello.com/b/x/board", "A".repeat(40));
        let mut sink = MemorySink::new();
        let mut out = Vec::new();

        Materializer::new(&mut sink, &mut out, ExportOptions::default())
            .export_board(&board, Path::new("."))
            .unwrap();

        let progress = String::from_utf8(out).unwrap();
        assert_eq!(progress, format!("{} -> board/index.md\n", "A".repeat(30)));
    }

    #[test]
    fn test_duplicate_slugs_get_suffixes() {
        let board = Board::new("https://trello.com/b/x/board", "Board").with_list(
            CardList::new("List")
                .with_card(card("another-card", "Another"))
                .with_card(card("another-card", "Another"))
                .with_card(card("index", "Index Card")),
        );
        let mut sink = MemorySink::new();

        let export = Materializer::new(&mut sink, std::io::sink(), ExportOptions::default())
            .export_board(&board, Path::new("."))
            .unwrap();

        let names: Vec<_> = export
            .cards
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["another-card.md", "another-card-1.md", "index-1.md"]);
    }

    #[test]
    fn test_board_metadata_in_index() {
        let mut labelled = card("labelled", "Labelled");
        labelled.members = vec!["ada".into()];
        let board = Board::new("https://trello.com/b/x/board", "Board")
            .with_list(CardList::new("List").with_card(labelled));
        let mut sink = MemorySink::new();

        Materializer::new(&mut sink, std::io::sink(), ExportOptions::default())
            .export_board(&board, Path::new("."))
            .unwrap();

        let index = sink.file("./board/index.md").unwrap();
        assert!(index.ends_with("- [Labelled](labelled.md) @ada\n"));
    }

    #[test]
    fn test_invalid_card_reference_aborts_and_keeps_prefix() {
        let board = Board::new("https://trello.com/b/x/board", "Board").with_list(
            CardList::new("List")
                .with_card(card("good", "Good"))
                .with_card(Card::new("not a url", "Bad"))
                .with_card(card("never", "Never")),
        );
        let mut sink = MemorySink::new();
        let mut materializer =
            Materializer::new(&mut sink, std::io::sink(), ExportOptions::default());

        let err = materializer
            .export_board(&board, Path::new("."))
            .unwrap_err();
        assert!(err.is_invalid_reference());
        assert_eq!(materializer.state(), ExportState::Done);

        assert!(sink.file("./board/good.md").is_some());
        assert!(sink.file("./board/never.md").is_none());
        // The index is only written once every card succeeded
        assert!(sink.file("./board/index.md").is_none());
    }

    #[test]
    fn test_card_with_bare_ordinal_keeps_it() {
        let board = Board::new("https://trello.com/b/x/board", "Board").with_list(
            CardList::new("List")
                .with_card(card("good", "Good"))
                .with_card(Card::new("https://trello.com/c/b/2-", "\u{1f389}"))
                .with_card(card("later", "Later")),
        );
        let mut sink = MemorySink::new();

        let export = Materializer::new(&mut sink, std::io::sink(), ExportOptions::default())
            .export_board(&board, Path::new("."))
            .unwrap();

        assert_eq!(export.cards.len(), 3);
        assert!(sink.file("./board/2-.md").is_some());
        assert!(sink.file("./board/later.md").is_some());
        let index = sink.file("./board/index.md").unwrap();
        assert!(index.contains("- [\u{1f389}](2-.md)\n"));
    }

    #[test]
    fn test_materializer_runs_once() {
        let mut sink = MemorySink::new();
        let mut materializer =
            Materializer::new(&mut sink, std::io::sink(), ExportOptions::default());

        materializer
            .export_board(&sample_board(), Path::new("."))
            .unwrap();
        let err = materializer
            .export_board(&sample_board(), Path::new("."))
            .unwrap_err();
        assert!(matches!(err, ExportError::Export(_)));
    }

    #[test]
    fn test_standalone_card_goes_to_output() {
        let mut sink = MemorySink::new();
        let mut out = Vec::new();
        let mut materializer = Materializer::new(&mut sink, &mut out, ExportOptions::default());

        materializer
            .export_card(&card("sample-card", "Sample Card"))
            .unwrap();
        assert_eq!(materializer.state(), ExportState::Done);

        assert_eq!(String::from_utf8(out).unwrap(), "# Sample Card\n");
        assert_eq!(sink.files().count(), 0);
    }

    #[test]
    fn test_standalone_card_with_invalid_reference() {
        let mut sink = MemorySink::new();
        let err = Materializer::new(&mut sink, std::io::sink(), ExportOptions::default())
            .export_card(&Card::new("", "Nameless"))
            .unwrap_err();
        assert!(err.is_invalid_reference());
    }

    #[test]
    fn test_board_export_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = DiskSink;

        let export = Materializer::new(&mut sink, std::io::sink(), ExportOptions::default())
            .export_board(&sample_board(), temp_dir.path())
            .unwrap();

        let index = std::fs::read_to_string(&export.index).unwrap();
        for card in &export.cards {
            assert!(card.is_file());
            let name = card.file_name().unwrap().to_str().unwrap();
            assert!(index.contains(&format!("]({})", name)));
        }
    }

    #[test]
    fn test_second_export_gets_suffixed_directory() {
        let temp_dir = TempDir::new().unwrap();
        let board = sample_board();

        let first = Materializer::new(&mut DiskSink, std::io::sink(), ExportOptions::default())
            .export_board(&board, temp_dir.path())
            .unwrap();
        let first_index = std::fs::read_to_string(&first.index).unwrap();

        let second = Materializer::new(&mut DiskSink, std::io::sink(), ExportOptions::default())
            .export_board(&board, temp_dir.path())
            .unwrap();

        assert_eq!(first.directory, temp_dir.path().join("sample-board"));
        assert_eq!(second.directory, temp_dir.path().join("sample-board-1"));
        assert_eq!(std::fs::read_to_string(&first.index).unwrap(), first_index);
        assert!(second.index.is_file());
    }

    #[test]
    fn test_missing_root_is_filesystem_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("missing");

        let err = Materializer::new(&mut DiskSink, std::io::sink(), ExportOptions::default())
            .export_board(&sample_board(), &root)
            .unwrap_err();
        assert!(err.is_filesystem());
    }
}
