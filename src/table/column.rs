/// One displayed column: the record field it reads and its header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub field: String,
    pub label: String,
}

impl Column {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

/// Builds a column list from `(field, label)` pairs.
pub fn columns<const N: usize>(pairs: [(&str, &str); N]) -> Vec<Column> {
    pairs
        .into_iter()
        .map(|(field, label)| Column::new(field, label))
        .collect()
}
