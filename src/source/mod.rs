//! Source adapters
//!
//! A source resolves a reference to a board or a card. The exporter only
//! reads the resulting models; how they were fetched is the adapter's
//! business.

pub mod trello;

pub use trello::{parse_export, JsonExportSource};

use crate::error::ExportResult;
use crate::models::{Board, Card};

/// A resolved entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Board(Board),
    Card(Card),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Self::Board(board) => &board.name,
            Self::Card(card) => &card.name,
        }
    }
}

/// Resolves references to entities
pub trait Source {
    /// # Errors
    ///
    /// Returns `SourceLookup` when the reference cannot be resolved.
    fn load(&self, reference: &str) -> ExportResult<Entity>;
}
