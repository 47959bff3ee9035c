//! Trello JSON export reader
//!
//! Reads the payload Trello produces from "Export as JSON", for a single
//! card or for a whole board. A board payload is recognised by its `lists`
//! field.
//!
//! Raw exports are activity logs as much as snapshots: comments and
//! attachments are reconstructed from `actions`, and checklist items,
//! lists and cards are put in display order by their `pos` field.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Entity, Source};
use crate::error::{ExportError, ExportResult};
use crate::models::{
    Attachment, Author, Board, Card, CardList, Checklist, ChecklistItem, Comment, Label,
};

const ADD_ATTACHMENT: &str = "addAttachmentToCard";
const DELETE_ATTACHMENT: &str = "deleteAttachmentFromCard";
const COMMENT: &str = "commentCard";
const CHECK_ITEM_COMPLETE: &str = "complete";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoard {
    name: String,
    url: String,
    lists: Vec<RawList>,
    #[serde(default)]
    cards: Vec<RawCard>,
    #[serde(default)]
    checklists: Vec<RawChecklist>,
    #[serde(default)]
    actions: Vec<RawAction>,
    #[serde(default)]
    members: Vec<RawMember>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawList {
    id: String,
    name: String,
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    pos: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    due: Option<String>,
    url: String,
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    pos: f64,
    #[serde(default)]
    id_list: Option<String>,
    #[serde(default)]
    labels: Vec<RawLabel>,
    #[serde(default)]
    id_members: Vec<String>,
    #[serde(default)]
    members: Vec<RawMember>,
    #[serde(default)]
    checklists: Vec<RawChecklist>,
    #[serde(default)]
    actions: Vec<RawAction>,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMember {
    #[serde(default)]
    id: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChecklist {
    #[serde(default)]
    id_card: Option<String>,
    name: String,
    #[serde(default)]
    pos: f64,
    #[serde(default)]
    check_items: Vec<RawCheckItem>,
}

#[derive(Debug, Deserialize)]
struct RawCheckItem {
    name: String,
    #[serde(default)]
    pos: f64,
    #[serde(default)]
    state: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    member_creator: Option<RawMember>,
    #[serde(default)]
    data: RawActionData,
}

#[derive(Debug, Default, Deserialize)]
struct RawActionData {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    attachment: Option<RawAttachment>,
    #[serde(default)]
    card: Option<RawCardRef>,
}

#[derive(Debug, Deserialize)]
struct RawAttachment {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCardRef {
    id: String,
}

/// Loads Trello JSON exports from files; the reference is the file path
#[derive(Debug, Clone, Default)]
pub struct JsonExportSource {
    include_closed: bool,
}

impl JsonExportSource {
    /// `include_closed` keeps archived lists and cards in board exports
    pub fn new(include_closed: bool) -> Self {
        Self { include_closed }
    }
}

impl Source for JsonExportSource {
    fn load(&self, reference: &str) -> ExportResult<Entity> {
        let path = Path::new(reference);
        let contents = std::fs::read_to_string(path).map_err(|e| {
            debug!(path = %path.display(), error = %e, "failed to read export");
            ExportError::source_not_found(reference)
        })?;

        parse_export(&contents, self.include_closed)
    }
}

/// Parse a card or board export
pub fn parse_export(json: &str, include_closed: bool) -> ExportResult<Entity> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    if value.get("lists").is_some() {
        let raw: RawBoard = serde_json::from_value(value)?;
        Ok(Entity::Board(convert_board(raw, include_closed)?))
    } else {
        let raw: RawCard = serde_json::from_value(value)?;
        let members = member_table(&raw.members);
        Ok(Entity::Card(convert_card(&raw, &[], &[], &members)?))
    }
}

fn convert_board(raw: RawBoard, include_closed: bool) -> ExportResult<Board> {
    let members = member_table(&raw.members);

    let mut lists: Vec<&RawList> = raw
        .lists
        .iter()
        .filter(|l| include_closed || !l.closed)
        .collect();
    lists.sort_by(|a, b| a.pos.total_cmp(&b.pos));

    let mut board = Board::new(raw.url.as_str(), raw.name.as_str());

    for raw_list in lists {
        let mut cards: Vec<&RawCard> = raw
            .cards
            .iter()
            .filter(|c| c.id_list.as_deref() == Some(raw_list.id.as_str()))
            .filter(|c| include_closed || !c.closed)
            .collect();
        cards.sort_by(|a, b| a.pos.total_cmp(&b.pos));

        let mut list = CardList::new(raw_list.name.as_str());
        for raw_card in cards {
            let checklists: Vec<&RawChecklist> = raw
                .checklists
                .iter()
                .filter(|c| c.id_card.as_deref() == Some(raw_card.id.as_str()))
                .collect();
            let actions: Vec<&RawAction> = raw
                .actions
                .iter()
                .filter(|a| {
                    a.data.card.as_ref().map(|c| c.id.as_str()) == Some(raw_card.id.as_str())
                })
                .collect();

            list.cards
                .push(convert_card(raw_card, &checklists, &actions, &members)?);
        }
        board.lists.push(list);
    }

    let orphans = raw
        .cards
        .iter()
        .filter(|c| !raw.lists.iter().any(|l| Some(l.id.as_str()) == c.id_list.as_deref()))
        .count();
    if orphans > 0 {
        warn!(count = orphans, "skipped cards that belong to no list in the export");
    }

    Ok(board)
}

/// Build a card from its raw payload plus board-level records tied to it
fn convert_card(
    raw: &RawCard,
    board_checklists: &[&RawChecklist],
    board_actions: &[&RawAction],
    members: &HashMap<&str, &RawMember>,
) -> ExportResult<Card> {
    let actions: Vec<&RawAction> = raw
        .actions
        .iter()
        .chain(board_actions.iter().copied())
        .collect();

    let mut checklists: Vec<&RawChecklist> =
        raw.checklists.iter().chain(board_checklists.iter().copied()).collect();
    checklists.sort_by(|a, b| a.pos.total_cmp(&b.pos));

    let mut card = Card::new(raw.url.as_str(), raw.name.as_str());
    card.description = raw.desc.clone();
    card.due_date = raw.due.as_deref().map(parse_date).transpose()?;
    card.labels = raw
        .labels
        .iter()
        .filter_map(|l| Label::from_parts(l.name.as_deref(), l.color.as_deref()))
        .collect();
    card.members = card_members(raw, members)?;
    card.checklists = checklists.into_iter().map(convert_checklist).collect();
    card.attachments = replay_attachments(&actions);
    card.comments = comments(&actions)?;

    Ok(card)
}

fn member_table(members: &[RawMember]) -> HashMap<&str, &RawMember> {
    members.iter().map(|m| (m.id.as_str(), m)).collect()
}

/// Member handles, resolving `idMembers` when present
fn card_members(raw: &RawCard, table: &HashMap<&str, &RawMember>) -> ExportResult<Vec<String>> {
    if raw.id_members.is_empty() {
        return Ok(raw.members.iter().filter_map(member_handle).collect());
    }

    let own = member_table(&raw.members);
    raw.id_members
        .iter()
        .map(|id| {
            own.get(id.as_str())
                .or_else(|| table.get(id.as_str()))
                .and_then(|m| member_handle(m))
                .ok_or_else(|| ExportError::member_not_found(id.as_str()))
        })
        .collect()
}

fn member_handle(member: &RawMember) -> Option<String> {
    member.username.clone().filter(|u| !u.is_empty())
}

fn convert_checklist(raw: &RawChecklist) -> Checklist {
    let mut items: Vec<&RawCheckItem> = raw.check_items.iter().collect();
    items.sort_by(|a, b| a.pos.total_cmp(&b.pos));

    Checklist {
        name: raw.name.clone(),
        items: items
            .into_iter()
            .map(|i| ChecklistItem::new(i.name.as_str(), i.state == CHECK_ITEM_COMPLETE))
            .collect(),
    }
}

/// Attachments added and never deleted, in the order their additions appear
fn replay_attachments(actions: &[&RawAction]) -> Vec<Attachment> {
    let deleted: HashSet<&str> = actions
        .iter()
        .filter(|a| a.kind == DELETE_ATTACHMENT)
        .filter_map(|a| a.data.attachment.as_ref())
        .map(|att| att.id.as_str())
        .collect();

    actions
        .iter()
        .filter(|a| a.kind == ADD_ATTACHMENT)
        .filter_map(|a| a.data.attachment.as_ref())
        .filter(|att| !deleted.contains(att.id.as_str()))
        .filter_map(|att| match &att.url {
            Some(url) => {
                let name = att.name.clone().unwrap_or_else(|| url.clone());
                Some(Attachment::new(name, url.as_str()))
            }
            None => {
                warn!(attachment = %att.id, "attachment event without a url");
                None
            }
        })
        .collect()
}

fn comments(actions: &[&RawAction]) -> ExportResult<Vec<Comment>> {
    actions
        .iter()
        .filter(|a| a.kind == COMMENT)
        .map(|a| {
            let creator = a.member_creator.as_ref();
            let author = Author::from_parts(
                creator.and_then(|m| m.full_name.as_deref()),
                creator.and_then(|m| m.username.as_deref()),
            )
            .ok_or_else(|| ExportError::Json("comment without an author".into()))?;

            let date = a
                .date
                .as_deref()
                .ok_or_else(|| ExportError::Json("comment without a date".into()))
                .and_then(parse_date)?;

            Ok(Comment {
                author,
                date,
                body: a.data.text.clone().unwrap_or_default(),
            })
        })
        .collect()
}

/// The UTC date of an RFC 3339 timestamp, or a plain `YYYY-MM-DD` date
fn parse_date(raw: &str) -> ExportResult<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ExportError::Json(format!("Invalid date {:?}: {}", raw, e)))
}
