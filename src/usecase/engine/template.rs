//! Placeholder substitution for the configured query template.
//!
//! | token              | resolved                         | unresolved   |
//! |--------------------|----------------------------------|--------------|
//! | `__where__`        | `WHERE (<predicate>)`            | empty        |
//! | `__and_where__`    | `AND (<predicate>)`              | empty        |
//! | `__order__`        | `ORDER BY <col> <dir>`           | default order or empty |
//! | `__order_and__`    | `ORDER BY <col> <dir>, `         | `ORDER BY `  |
//! | `__and_order__`    | `, <col> <dir>`                  | empty        |
//! | `__limit_offset__` | `LIMIT <n> OFFSET <m>`           | empty when `n == -1` |

use crate::domain::entities::column::ColumnSet;
use crate::domain::entities::query::{QueryPair, SearchMode};
use crate::domain::entities::request::{OrderDirection, RequestParameters};
use crate::error::ConfigError;

pub const WHERE: &str = "__where__";
pub const AND_WHERE: &str = "__and_where__";
pub const ORDER: &str = "__order__";
pub const ORDER_AND: &str = "__order_and__";
pub const AND_ORDER: &str = "__and_order__";
pub const LIMIT_OFFSET: &str = "__limit_offset__";

pub const PLACEHOLDERS: [&str; 6] = [WHERE, AND_WHERE, ORDER, ORDER_AND, AND_ORDER, LIMIT_OFFSET];

/// Rejects templates that would leave placeholder text in generated SQL:
/// repeated tokens and `__name__` markers that are not known tokens.
pub fn validate_template(template: &str) -> Result<(), ConfigError> {
    if template.trim().is_empty() {
        return Err(ConfigError::EmptyTemplate);
    }

    let mut remaining = template.to_string();
    for token in PLACEHOLDERS {
        if template.matches(token).count() > 1 {
            return Err(ConfigError::DuplicatePlaceholder(token));
        }
        remaining = remaining.replace(token, " ");
    }

    match find_marker(&remaining) {
        Some(marker) => Err(ConfigError::UnknownPlaceholder(marker.to_string())),
        None => Ok(()),
    }
}

/// First `__name__` marker standing on its own, where `name` is lowercase
/// letters and single underscores.
fn find_marker(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let is_ident = |byte: u8| byte.is_ascii_alphanumeric() || byte == b'_';
    let mut from = 0;

    while let Some(found) = text[from..].find("__") {
        let start = from + found;
        from = start + 2;
        if start > 0 && is_ident(bytes[start - 1]) {
            continue;
        }

        let mut end = start + 2;
        while end < bytes.len() && (bytes[end].is_ascii_lowercase() || bytes[end] == b'_') {
            end += 1;
        }
        let marker = &text[start..end];
        let name = marker.trim_start_matches('_');
        let ends_cleanly = end == bytes.len() || !is_ident(bytes[end]);

        if ends_cleanly
            && marker.len() > 4
            && marker.ends_with("__")
            && name.trim_end_matches('_').starts_with(|ch: char| ch.is_ascii_lowercase())
            && !name.trim_end_matches('_').contains("__")
        {
            return Some(marker);
        }
    }
    None
}

/// OR-joined search clauses and the value bound to them, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    pub sql: String,
    pub binding: Option<String>,
}

/// Builds the predicate from the searchable columns followed by the extra
/// search targets. Returns `None` when there is no term or nothing to search.
pub fn search_predicate(
    params: &RequestParameters,
    columns: &ColumnSet,
    mode: SearchMode,
) -> Option<SearchPredicate> {
    if !params.search_requested || params.search_term.is_empty() {
        return None;
    }

    let pattern = format!("%{}%", escape_like(&params.search_term));
    let operand = match mode {
        SearchMode::Bound => "?1".to_string(),
        SearchMode::Inline => format!("'{}'", pattern.replace('\'', "''")),
    };

    let clauses: Vec<String> = columns
        .search_columns
        .iter()
        .flatten()
        .chain(columns.extra_search_targets.iter())
        .filter(|target| !target.is_empty())
        .map(|target| format!("{target} LIKE {operand} ESCAPE '\\'"))
        .collect();

    if clauses.is_empty() {
        return None;
    }

    Some(SearchPredicate {
        sql: clauses.join(" OR "),
        binding: (mode == SearchMode::Bound).then_some(pattern),
    })
}

/// Escapes LIKE wildcards and the escape character itself.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// The order column selected by display position, when the request asked
/// for ordering and the position holds an orderable column.
pub fn resolve_order<'a>(
    params: &RequestParameters,
    columns: &'a ColumnSet,
) -> Option<(&'a str, OrderDirection)> {
    if !params.order_requested {
        return None;
    }
    let index = params.order_index?;
    let column = columns.order_columns.get(index)?.as_deref()?;
    Some((column, params.order_direction))
}

/// Resolves every placeholder of `template` into the page and count queries.
///
/// `default_order` is configuration text and is inserted verbatim.
pub fn build_queries(
    template: &str,
    params: &RequestParameters,
    columns: &ColumnSet,
    default_order: Option<&str>,
    mode: SearchMode,
) -> QueryPair {
    // Without a search token the term has nowhere to go, so nothing is bound.
    let predicate = search_predicate(params, columns, mode)
        .filter(|_| template.contains(WHERE) || template.contains(AND_WHERE));
    let (where_fragment, and_where_fragment) = match &predicate {
        Some(predicate) => (
            format!("WHERE ({})", predicate.sql),
            format!("AND ({})", predicate.sql),
        ),
        None => (String::new(), String::new()),
    };

    let (order, order_and, and_order) = match resolve_order(params, columns) {
        Some((column, direction)) => (
            format!("ORDER BY {column} {direction}"),
            format!("ORDER BY {column} {direction}, "),
            format!(", {column} {direction}"),
        ),
        None => {
            log::debug!(
                "no sortable column at display index {:?}; default order: {:?}",
                params.order_index,
                default_order
            );
            let fallback = default_order
                .map(str::trim)
                .filter(|order| !order.is_empty())
                .map(|order| format!("ORDER BY {order}"))
                .unwrap_or_default();
            (fallback, "ORDER BY ".to_string(), String::new())
        }
    };

    let resolved = template
        .replacen(WHERE, &where_fragment, 1)
        .replacen(AND_WHERE, &and_where_fragment, 1)
        .replacen(ORDER_AND, &order_and, 1)
        .replacen(AND_ORDER, &and_order, 1)
        .replacen(ORDER, &order, 1);

    let limit_offset = if params.is_unlimited() {
        String::new()
    } else {
        format!("LIMIT {} OFFSET {}", params.page_limit, params.page_offset)
    };

    let pair = QueryPair {
        page_query: resolved.replacen(LIMIT_OFFSET, &limit_offset, 1),
        count_query: resolved.replacen(LIMIT_OFFSET, "", 1),
        bindings: predicate
            .and_then(|predicate| predicate.binding)
            .into_iter()
            .collect(),
    };
    log::debug!("page query: {}", pair.page_query);
    log::debug!("count query: {}", pair.count_query);
    pair
}
