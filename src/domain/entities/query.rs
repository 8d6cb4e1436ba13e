use serde::Deserialize;

/// How the search term reaches the generated SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// `LIKE ?1` with the pattern carried in [`QueryPair::bindings`].
    #[default]
    Bound,
    /// Escaped single-quoted literal, for executors without parameter binding.
    Inline,
}

/// Page and count queries resolved from one template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPair {
    pub page_query: String,
    /// Same text as `page_query` minus the limit/offset fragment.
    pub count_query: String,
    /// Values for `?1`.. shared by both queries.
    pub bindings: Vec<String>,
}

impl QueryPair {
    /// Wraps the count query so it yields a single `total` value.
    pub fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) AS total FROM ({}) AS filtered",
            self.count_query
        )
    }
}
