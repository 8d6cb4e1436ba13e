use std::collections::BTreeMap;
use std::fmt;

/// Flattened request parameters as sent by the table widget, e.g.
/// `search[value]` or `order[0][column]`.
pub type RawParams = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Anything other than a case-insensitive `desc` sorts ascending.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            OrderDirection::Desc
        } else {
            OrderDirection::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Pagination, search and sort settings of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    pub search_requested: bool,
    pub search_term: String,
    pub order_requested: bool,
    /// Display position to sort by; `None` when absent or not a number.
    pub order_index: Option<usize>,
    pub order_direction: OrderDirection,
    /// `-1` disables the limit.
    pub page_limit: i64,
    pub page_offset: i64,
    pub draw_token: i64,
}

impl RequestParameters {
    pub const DEFAULT_PAGE_LIMIT: i64 = 10;
    pub const UNLIMITED: i64 = -1;

    pub fn is_unlimited(&self) -> bool {
        self.page_limit == Self::UNLIMITED
    }
}

impl Default for RequestParameters {
    fn default() -> Self {
        Self {
            search_requested: false,
            search_term: String::new(),
            order_requested: false,
            order_index: None,
            order_direction: OrderDirection::Asc,
            page_limit: Self::DEFAULT_PAGE_LIMIT,
            page_offset: 0,
            draw_token: 1,
        }
    }
}
