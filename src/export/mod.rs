//! Export module for trello2md
//!
//! Turns boards and cards into Markdown documents:
//! - `slug`: file name fragments from Trello URLs
//! - `naming`: collision-free names within an output directory
//! - `document`/`render`: the Markdown document model and entity renderers
//! - `sink`: filesystem access (real or in-memory)
//! - `materialize`: the traversal that writes everything out

pub mod document;
pub mod materialize;
pub mod naming;
pub mod render;
pub mod sink;
pub mod slug;

pub use document::{Block, Document, ListItem};
pub use materialize::{BoardExport, ExportState, Materializer};
pub use naming::{allocate, NameProbe, OutputContext};
pub use render::{board_document, card_document, render_card};
pub use sink::{DiskSink, MemorySink, Sink};
pub use slug::slug;

/// Naming and progress options for one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Appended to every document name, dot included
    pub document_extension: String,
    /// Base name of the board index document
    pub index_name: String,
    /// Width entity names are padded/truncated to in progress lines
    pub progress_name_width: usize,
}

impl ExportOptions {
    pub fn index_file_name(&self) -> String {
        format!("{}{}", self.index_name, self.document_extension)
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            document_extension: ".md".to_string(),
            index_name: "index".to_string(),
            progress_name_width: 30,
        }
    }
}
