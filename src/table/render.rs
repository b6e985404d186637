//! Display model of a table view, and its text rendering.

use super::{ActionKind, TableView};
use crate::messages;
use crate::model::Scalar;
use std::fmt;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub cells: Vec<String>,
    /// The buttons offered on this row.
    pub actions: Vec<ActionKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedBody {
    Rows(Vec<RenderedRow>),
    /// Nothing matched: one row of placeholder text spanning every column.
    Placeholder { text: &'static str, colspan: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable {
    pub headers: Vec<String>,
    pub body: RenderedBody,
}

/// Cell text for a value. Booleans show as `Activo` / `Inactivo`.
pub fn display_value(value: Option<&Scalar>) -> String {
    match value {
        Some(Scalar::Bool(true)) => messages::ACTIVE.to_string(),
        Some(Scalar::Bool(false)) => messages::INACTIVE.to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

impl RenderedTable {
    pub fn from_view(view: &TableView) -> Self {
        let with_actions = view.has_actions_column();

        let mut headers: Vec<String> = view.columns().iter().map(|c| c.label.clone()).collect();
        if with_actions {
            headers.push(messages::ACTIONS_HEADER.to_string());
        }

        let rows = view.rows();
        let body = if rows.is_empty() {
            RenderedBody::Placeholder {
                text: messages::NO_DATA,
                colspan: headers.len(),
            }
        } else {
            RenderedBody::Rows(
                rows.into_iter()
                    .map(|record| RenderedRow {
                        cells: view
                            .columns()
                            .iter()
                            .map(|c| display_value(record.get(&c.field)))
                            .collect(),
                        actions: view.actions().iter().collect(),
                    })
                    .collect(),
            )
        };

        Self { headers, body }
    }

    pub fn has_actions_column(&self) -> bool {
        self.headers.last().map(String::as_str) == Some(messages::ACTIONS_HEADER)
    }

    pub fn row_count(&self) -> usize {
        match &self.body {
            RenderedBody::Rows(rows) => rows.len(),
            RenderedBody::Placeholder { .. } => 0,
        }
    }
}

impl fmt::Display for RenderedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().cloned());

        match &self.body {
            RenderedBody::Rows(rows) => {
                for row in rows {
                    let mut cells = row.cells.clone();
                    if !row.actions.is_empty() {
                        let buttons: Vec<String> =
                            row.actions.iter().map(|a| format!("[{}]", a.label())).collect();
                        cells.push(buttons.join(" "));
                    }
                    builder.push_record(cells);
                }
            }
            RenderedBody::Placeholder { text, colspan } => {
                let mut cells = vec![String::new(); (*colspan).max(1)];
                cells[0] = (*text).to_string();
                builder.push_record(cells);
            }
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        write!(f, "{table}")
    }
}
