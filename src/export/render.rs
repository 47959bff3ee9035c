//! Markdown rendering for cards and boards
//!
//! Pure functions: no I/O happens here. The board renderer asks its caller
//! for each card's link target, which is how the materializer writes card
//! files in traversal order while the index is being built.

use crate::error::ExportResult;
use crate::models::{Attachment, Board, Card, Comment};

use super::document::{Document, ListItem};

/// Build the document for a single card
pub fn card_document(card: &Card) -> Document {
    let mut doc = Document::new();

    doc.heading(1, &card.name);

    if let Some(meta) = card.meta_line() {
        doc.paragraph(meta);
    }

    doc.paragraph(&card.description);

    for checklist in &card.checklists {
        doc.heading(2, &checklist.name);
        doc.list(
            checklist
                .items
                .iter()
                .map(|item| ListItem::task(&item.name, item.checked))
                .collect(),
        );
    }

    if !card.attachments.is_empty() {
        doc.heading(2, "Attachments");
        doc.list(card.attachments.iter().map(attachment_item).collect());
    }

    if !card.comments.is_empty() {
        doc.heading(2, "Comments");
        for comment in &card.comments {
            doc.heading(3, comment_heading(comment));
            doc.paragraph(&comment.body);
        }
    }

    doc
}

/// Render a card to lines
pub fn render_card(card: &Card) -> Vec<String> {
    card_document(card).lines()
}

/// Build the index document for a board
///
/// `link` is called once per card, lists first to last and cards in list
/// order, and returns the target the bullet should point at. The first
/// error stops the traversal.
pub fn board_document<F>(board: &Board, mut link: F) -> ExportResult<Document>
where
    F: FnMut(&Card) -> ExportResult<String>,
{
    let mut doc = Document::new();

    doc.heading(1, &board.name);

    for list in &board.lists {
        doc.heading(2, &list.name);

        let mut items = Vec::with_capacity(list.cards.len());
        for card in &list.cards {
            let target = link(card)?;
            items.push(card_link(card, target));
        }
        doc.list(items);
    }

    Ok(doc)
}

/// The index bullet for a card: a link, followed by its metadata if any
pub fn card_link(card: &Card, target: impl Into<String>) -> ListItem {
    ListItem::link(&card.name, target).with_suffix(card.meta_line())
}

fn attachment_item(attachment: &Attachment) -> ListItem {
    if attachment.is_bare_link() {
        ListItem::AutoLink(attachment.url.clone())
    } else {
        ListItem::link(&attachment.name, &attachment.url)
    }
}

/// `### Ada Lovelace on 2020-04-30`: author and date as plain text, no code
/// spans around either
fn comment_heading(comment: &Comment) -> String {
    format!("{} on {}", comment.author, comment.date.format("%Y-%m-%d"))
}
