//! Search, sort and action dispatch over a record collection.

use super::{ActionInvocation, ActionKind, ActionSet, ActionTarget, Column, RenderedTable};
use crate::model::Record;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("no column `{0}`")]
    UnknownColumn(String),

    #[error("no row {0}")]
    NoSuchRow(usize),

    #[error("action `{0}` is not enabled")]
    ActionDisabled(ActionKind),
}

/// A searchable, sortable view over records.
///
/// Records are never modified; filtering and sorting only change which rows are
/// visible and in what order.
#[derive(Debug, Clone)]
pub struct TableView {
    records: Vec<Record>,
    columns: Vec<Column>,
    actions: ActionSet,
    query: String,
    sort: Option<SortState>,
}

impl TableView {
    pub fn new(records: Vec<Record>, columns: Vec<Column>, actions: ActionSet) -> Self {
        Self {
            records,
            columns,
            actions,
            query: String::new(),
            sort: None,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Sorts by `field`: ascending first, the same field again flips direction,
    /// a different field starts over ascending.
    pub fn sort_by(&mut self, field: &str) -> Result<&SortState, TableError> {
        if !self.columns.iter().any(|c| c.field == field) {
            return Err(TableError::UnknownColumn(field.to_string()));
        }
        let direction = match &self.sort {
            Some(current) if current.field == field => match current.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            },
            _ => SortDirection::Ascending,
        };
        Ok(&*self.sort.insert(SortState {
            field: field.to_string(),
            direction,
        }))
    }

    fn matches(&self, record: &Record, needle: &str) -> bool {
        needle.is_empty()
            || self.columns.iter().any(|column| {
                record
                    .get(&column.field)
                    .is_some_and(|value| value.stringify().to_lowercase().contains(needle))
            })
    }

    /// Visible rows: filtered by the query, then stably sorted.
    pub fn rows(&self) -> Vec<&Record> {
        let needle = self.query.to_lowercase();
        let mut rows: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| self.matches(record, &needle))
            .collect();

        if let Some(sort) = &self.sort {
            rows.sort_by(|a, b| {
                let ordering = match (a.get(&sort.field), b.get(&sort.field)) {
                    (Some(x), Some(y)) => x.compare(y),
                    (None, Some(_)) => std::cmp::Ordering::Less,
                    (Some(_), None) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                };
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn has_actions_column(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Invokes `action` on the visible row at `row`.
    pub fn invoke(&self, row: usize, action: ActionKind) -> Result<ActionInvocation, TableError> {
        if !self.actions.contains(action) {
            return Err(TableError::ActionDisabled(action));
        }
        let rows = self.rows();
        let record = rows.get(row).ok_or(TableError::NoSuchRow(row))?;
        Ok(ActionInvocation {
            action,
            target: ActionTarget::for_action(action, record),
        })
    }

    pub fn render(&self) -> RenderedTable {
        RenderedTable::from_view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scalar;
    use crate::table::columns;

    fn products() -> Vec<Record> {
        vec![
            Record::new().with("id", 1).with("name", "Café").with("unit_price", 10.5).with("is_active", true),
            Record::new().with("id", 2).with("name", "Cacao").with("unit_price", 7).with("is_active", false),
            Record::new().with("id", 3).with("name", "Abono").with("unit_price", 22).with("is_active", true),
        ]
    }

    fn view() -> TableView {
        TableView::new(
            products(),
            columns([("id", "Código"), ("name", "Nombre"), ("unit_price", "Precio"), ("is_active", "Activo")]),
            ActionSet::none(),
        )
    }

    fn ids(rows: &[&Record]) -> Vec<i64> {
        rows.iter().filter_map(|r| r.id().and_then(Scalar::as_i64)).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let view = view();
        assert_eq!(ids(&view.rows()), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_columns() {
        let mut view = view();
        view.set_query("CA");
        assert_eq!(ids(&view.rows()), vec![1, 2]);

        view.set_query("10.5");
        assert_eq!(ids(&view.rows()), vec![1]);

        view.set_query("false");
        assert_eq!(ids(&view.rows()), vec![2]);
    }

    #[test]
    fn test_search_only_reads_column_fields() {
        let mut records = products();
        records[2].insert("notes", "cacao mezclado");
        let mut view = TableView::new(records, columns([("name", "Nombre")]), ActionSet::none());
        view.set_query("cacao");
        assert_eq!(ids(&view.rows()), vec![2]);
    }

    #[test]
    fn test_sort_toggles_and_resets() {
        let mut view = view();
        assert_eq!(view.sort_by("unit_price").unwrap().direction, SortDirection::Ascending);
        assert_eq!(ids(&view.rows()), vec![2, 1, 3]);

        assert_eq!(view.sort_by("unit_price").unwrap().direction, SortDirection::Descending);
        assert_eq!(ids(&view.rows()), vec![3, 1, 2]);

        assert_eq!(view.sort_by("name").unwrap().direction, SortDirection::Ascending);
        assert_eq!(ids(&view.rows()), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_applies_to_filtered_rows() {
        let mut view = view();
        view.set_query("a");
        view.sort_by("id").unwrap();
        view.sort_by("id").unwrap();
        view.set_query("ca");
        assert_eq!(ids(&view.rows()), vec![2, 1]);
    }

    #[test]
    fn test_sort_on_booleans_uses_raw_value() {
        let mut view = view();
        view.sort_by("is_active").unwrap();
        assert_eq!(ids(&view.rows()), vec![2, 1, 3]);
    }

    #[test]
    fn test_new_records_keep_query_and_sort() {
        let mut view = view();
        view.set_query("ca");
        view.sort_by("id").unwrap();
        view.sort_by("id").unwrap();

        let mut reloaded = products();
        reloaded.push(Record::new().with("id", 4).with("name", "Canela"));
        view.set_records(reloaded);

        let sort = view.sort_state().unwrap();
        assert_eq!((sort.field.as_str(), sort.direction), ("id", SortDirection::Descending));
        assert_eq!(ids(&view.rows()), vec![4, 2, 1]);
    }

    #[test]
    fn test_sort_unknown_column() {
        assert_eq!(
            view().sort_by("price").unwrap_err(),
            TableError::UnknownColumn("price".into())
        );
    }

    #[test]
    fn test_invoke_follows_visible_order_and_enabled_set() {
        let mut view = TableView::new(
            products(),
            columns([("name", "Nombre")]),
            ActionSet::new([ActionKind::Edit, ActionKind::Disable]),
        );
        view.sort_by("name").unwrap();

        let invocation = view.invoke(0, ActionKind::Disable).unwrap();
        assert_eq!(invocation.target, ActionTarget::Id(Scalar::Int(3)));

        assert_eq!(
            view.invoke(0, ActionKind::Delete).unwrap_err(),
            TableError::ActionDisabled(ActionKind::Delete)
        );
        assert_eq!(view.invoke(5, ActionKind::Edit).unwrap_err(), TableError::NoSuchRow(5));
    }
}
