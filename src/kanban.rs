//! Kanban board model and the column-to-row pivot used to render it as a table.
//!
//! Cards keep the row index they had in their column after filtering. A card
//! suppressed as completed leaves an empty cell rather than shifting the cards
//! beneath it up, so the grid can contain gaps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hierarchy;
use crate::task::{Task, TYPE_FIELD};

/// Grouping field that selects a card's status rather than an auxiliary field.
pub const STATUS_FIELD: &str = "Status";

/// A card on the board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub fields: std::collections::BTreeMap<String, String>,
}

#[cfg(test)]
impl Card {
    pub fn new(title: impl Into<String>, status: impl Into<String>) -> Self {
        Card {
            title: title.into(),
            status: status.into(),
            ..Default::default()
        }
    }
}

impl Card {
    pub fn is_completed(&self) -> bool {
        hierarchy::is_completed(&self.status)
    }

    /// Label membership OR `Type` field equality.
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.labels.iter().any(|l| l == filter)
            || self.fields.get(TYPE_FIELD).map(String::as_str) == Some(filter)
    }

    /// Value of the grouping field, `None` when absent or blank.
    fn group_key(&self, field: &str) -> Option<&str> {
        let value = if field == STATUS_FIELD {
            Some(self.status.as_str())
        } else {
            self.fields.get(field).map(String::as_str)
        };
        value.filter(|v| !v.is_empty())
    }
}

impl From<&Task> for Card {
    fn from(task: &Task) -> Self {
        Card {
            title: task.title.clone(),
            status: task.status.clone(),
            labels: task.labels.clone(),
            fields: task.fields.clone(),
        }
    }
}

/// A named board column holding ordered cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// An ordered sequence of columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// Build a board from tasks, one column per distinct value of `field`.
    pub fn from_tasks(tasks: &[Task], field: &str) -> Self {
        Board {
            columns: group_cards(tasks.iter().map(Card::from), field),
        }
    }

    /// Re-partition every card by an alternate grouping field.
    pub fn regroup(&mut self, field: &str) {
        let cards = std::mem::take(&mut self.columns)
            .into_iter()
            .flat_map(|c| c.cards);
        self.columns = group_cards(cards, field);
    }

    /// Keep only cards matching `filter`, preserving order within each column.
    pub fn filter_cards(&mut self, filter: &str) {
        for column in &mut self.columns {
            column.cards.retain(|card| card.matches_filter(filter));
        }
    }

    /// Largest card count across columns.
    pub fn max_rows(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).max().unwrap_or(0)
    }

    /// Row-major grid of cell text, `max_rows` by column count.
    ///
    /// Completed cards are struck through, or left as empty cells when
    /// `active_only` is set.
    pub fn pivot(&self, active_only: bool) -> Vec<Vec<String>> {
        let mut rows = vec![vec![String::new(); self.columns.len()]; self.max_rows()];
        for (col, column) in self.columns.iter().enumerate() {
            for (row, card) in column.cards.iter().enumerate() {
                if card.is_completed() {
                    if active_only {
                        continue;
                    }
                    rows[row][col] = format!("~~{}~~", card.title);
                } else {
                    rows[row][col] = card.title.clone();
                }
            }
        }
        rows
    }
}

/// Group cards by `field` with columns in first-seen order and a trailing
/// `No <field>` column for cards lacking it.
fn group_cards(cards: impl IntoIterator<Item = Card>, field: &str) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    let mut missing: Vec<Card> = Vec::new();
    for card in cards {
        let Some(key) = card.group_key(field).map(str::to_string) else {
            missing.push(card);
            continue;
        };
        match columns.iter_mut().find(|c| c.name == key) {
            Some(column) => column.cards.push(card),
            None => columns.push(Column { name: key, cards: vec![card] }),
        }
    }
    if !missing.is_empty() {
        columns.push(Column {
            name: format!("No {}", field),
            cards: missing,
        });
    }
    columns
}

/// Options controlling kanban rendering.
#[derive(Debug, Clone, Default)]
pub struct KanbanOptions {
    pub active_only: bool,
    pub filter: Option<String>,
}

/// Render the board as a Markdown table: header, separator, then one row per grid row.
pub fn render_kanban(board: &Board, opts: &KanbanOptions) -> String {
    let mut board = board.clone();
    if let Some(filter) = opts.filter.as_deref().filter(|f| !f.is_empty()) {
        board.filter_cards(filter);
    }
    let grid = board.pivot(opts.active_only);

    let mut out = String::new();
    for column in &board.columns {
        out.push_str(&format!("| {} ", column.name));
    }
    out.push_str("|\n");
    for _ in &board.columns {
        out.push_str("| --- ");
    }
    out.push_str("|\n");
    for row in &grid {
        for cell in row {
            out.push_str(&format!("| {} ", cell));
        }
        out.push_str("|\n");
    }
    debug!(columns = board.columns.len(), rows = grid.len(), "rendered kanban");
    out
}
