//! Board and list models

use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::Card;

/// A list of cards within a board
///
/// Cards keep the order the source adapter produced; the exporter never
/// re-sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardList {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl CardList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }
}

/// A Trello board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Canonical URL, source of the board's directory name
    pub reference: String,
    pub name: String,
    #[serde(default)]
    pub lists: Vec<CardList>,
}

impl Board {
    pub fn new(reference: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            name: name.into(),
            lists: Vec::new(),
        }
    }

    pub fn with_list(mut self, list: CardList) -> Self {
        self.lists.push(list);
        self
    }

    /// Total number of cards across all lists
    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|l| l.cards.len()).sum()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
