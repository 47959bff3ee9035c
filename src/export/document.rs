//! Markdown document model
//!
//! Renderers build a `Document` out of blocks; serialization to Markdown
//! happens in one place. Blocks are separated by a single blank line, and
//! empty paragraphs or lists are dropped when pushed so they never leave a
//! stray blank line behind.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#` repeated `level` times, then the text
    Heading { level: usize, text: String },
    /// Text reproduced verbatim, embedded newlines included
    Paragraph(String),
    /// Consecutive bullet lines
    List(Vec<ListItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    /// `- [x] text` or `- [ ] text`
    Task { checked: bool, text: String },
    /// `- [text](target)` with an optional trailing annotation
    Link {
        text: String,
        target: String,
        suffix: Option<String>,
    },
    /// `- <url>`
    AutoLink(String),
}

impl ListItem {
    pub fn task(text: impl Into<String>, checked: bool) -> Self {
        Self::Task {
            checked,
            text: text.into(),
        }
    }

    pub fn link(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            target: target.into(),
            suffix: None,
        }
    }

    /// Attach a trailing annotation to a link; a no-op for other items
    pub fn with_suffix(self, suffix: Option<String>) -> Self {
        match self {
            Self::Link { text, target, .. } => Self::Link {
                text,
                target,
                suffix,
            },
            other => other,
        }
    }
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task { checked, text } => {
                write!(f, "- [{}] {}", if *checked { 'x' } else { ' ' }, text)
            }
            Self::Link {
                text,
                target,
                suffix: Some(suffix),
            } => write!(f, "- [{}]({}) {}", text, target, suffix),
            Self::Link { text, target, .. } => write!(f, "- [{}]({})", text, target),
            Self::AutoLink(url) => write!(f, "- <{}>", url),
        }
    }
}

/// An ordered sequence of blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block, dropping empty paragraphs and lists
    pub fn push(&mut self, block: Block) {
        let empty = match &block {
            Block::Paragraph(text) => text.is_empty(),
            Block::List(items) => items.is_empty(),
            Block::Heading { .. } => false,
        };
        if !empty {
            self.blocks.push(block);
        }
    }

    pub fn heading(&mut self, level: usize, text: impl Into<String>) {
        self.push(Block::Heading {
            level,
            text: text.into(),
        });
    }

    pub fn paragraph(&mut self, text: impl Into<String>) {
        self.push(Block::Paragraph(text.into()));
    }

    pub fn list(&mut self, items: Vec<ListItem>) {
        self.push(Block::List(items));
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The document as physical lines, without line terminators
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            match block {
                Block::Heading { level, text } => {
                    lines.push(format!("{} {}", "#".repeat(*level), text));
                }
                Block::Paragraph(text) => {
                    lines.extend(text.split('\n').map(str::to_string));
                }
                Block::List(items) => {
                    lines.extend(items.iter().map(ListItem::to_string));
                }
            }
        }

        lines
    }

    /// Serialize to Markdown, one newline after every line
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}
