//! trello2md - Export Trello boards and cards to Markdown
//!
//! A board becomes a directory holding an `index.md` that links to one
//! Markdown document per card. A single card is rendered to stdout.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Boards, lists, cards and what hangs off them
//! - `source`: Source adapters (Trello JSON exports)
//! - `export`: Naming, rendering and materialization of documents
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use trello2md::export::{DiskSink, ExportOptions, Materializer};
//! use trello2md::source::{Entity, JsonExportSource, Source};
//!
//! if let Entity::Board(board) = JsonExportSource::default().load("board.json")? {
//!     Materializer::new(&mut DiskSink, std::io::stdout(), ExportOptions::default())
//!         .export_board(&board, std::path::Path::new("."))?;
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod source;

pub use error::{ExportError, ExportResult};
