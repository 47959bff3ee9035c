//! Core data models for trello2md
//!
//! Read-only views of the Trello entities being exported: boards, lists,
//! cards and everything nested under a card.

pub mod board;
pub mod card;

pub use board::{Board, CardList};
pub use card::{Attachment, Author, Card, Checklist, ChecklistItem, Comment, Label};
