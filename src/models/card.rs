//! Card model
//!
//! A card and everything nested under it: checklists, attachments and
//! comments. Cards are read-only once a source adapter has built them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A label attached to a card
///
/// Trello labels may be unnamed, in which case only their color identifies
/// them. The name wins whenever it is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Named(String),
    Color(String),
}

impl Label {
    /// Build a label from the raw name/color pair, name first
    ///
    /// Returns `None` when neither carries any text.
    pub fn from_parts(name: Option<&str>, color: Option<&str>) -> Option<Self> {
        match (name.filter(|n| !n.is_empty()), color.filter(|c| !c.is_empty())) {
            (Some(name), _) => Some(Self::Named(name.to_string())),
            (None, Some(color)) => Some(Self::Color(color.to_string())),
            (None, None) => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Named(text) | Self::Color(text) => text,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Who wrote a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    FullName(String),
    Handle(String),
}

impl Author {
    /// Build an author from a full name and a handle, full name first
    pub fn from_parts(full_name: Option<&str>, handle: Option<&str>) -> Option<Self> {
        match (full_name.filter(|n| !n.is_empty()), handle.filter(|h| !h.is_empty())) {
            (Some(name), _) => Some(Self::FullName(name.to_string())),
            (None, Some(handle)) => Some(Self::Handle(handle.to_string())),
            (None, None) => None,
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullName(name) | Self::Handle(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub name: String,
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub name: String,
    /// Items in display order
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, name: impl Into<String>, checked: bool) -> Self {
        self.items.push(ChecklistItem::new(name, checked));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Links pasted as attachments carry their URL as the name
    pub fn is_bare_link(&self) -> bool {
        self.name == self.url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: Author,
    pub date: NaiveDate,
    /// Markdown body, reproduced verbatim
    pub body: String,
}

/// A Trello card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Canonical URL, source of the card's file name
    pub reference: String,

    pub name: String,

    /// Markdown description, may be empty
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub labels: Vec<Label>,

    /// Member handles, without the `@`
    #[serde(default)]
    pub members: Vec<String>,

    #[serde(default)]
    pub checklists: Vec<Checklist>,

    /// Attachments still present on the card
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Comments in the order the source supplied them
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Card {
    /// Create a card with nothing but a reference and a name
    pub fn new(reference: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            name: name.into(),
            description: String::new(),
            due_date: None,
            labels: Vec::new(),
            members: Vec::new(),
            checklists: Vec::new(),
            attachments: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Metadata fragments in display order: due date, members, labels
    ///
    /// Members are prefixed with `@` and labels wrapped in backticks.
    pub fn meta(&self) -> Vec<String> {
        let due = self.due_date.map(|d| d.format("%Y-%m-%d").to_string());
        let members = self.members.iter().map(|m| format!("@{}", m));
        let labels = self.labels.iter().map(|l| format!("`{}`", l));

        due.into_iter()
            .chain(members)
            .chain(labels)
            .filter(|fragment| !fragment.is_empty())
            .collect()
    }

    /// The comma-joined metadata line, `None` when the card has no metadata
    pub fn meta_line(&self) -> Option<String> {
        let meta = self.meta();
        if meta.is_empty() {
            None
        } else {
            Some(meta.join(", "))
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
