use crate::domain::entities::request::{OrderDirection, RawParams, RequestParameters};
use crate::usecase::ports::sanitizer::Sanitizer;

const DRAW: &[&str] = &["draw"];
const START: &[&str] = &["start"];
const LENGTH: &[&str] = &["length"];
const SEARCH_VALUE: &[&str] = &["search[value]", "search.value"];
const ORDER_COLUMN: &[&str] = &["order[0][column]", "order[0].column"];
const ORDER_DIR: &[&str] = &["order[0][dir]", "order[0].dir"];

/// Normalizes the widget's request parameters. Every value goes through
/// `sanitizer` first; numbers are coerced leniently and never rejected.
pub fn read_parameters(raw: &RawParams, sanitizer: &dyn Sanitizer) -> RequestParameters {
    let defaults = RequestParameters::default();
    let value = |keys: &[&str]| lookup(raw, keys).map(|value| sanitizer.clean(value));

    let search_requested = is_present(raw, "search");
    let order_requested = is_present(raw, "order");

    RequestParameters {
        search_requested,
        search_term: value(SEARCH_VALUE).unwrap_or_default(),
        order_requested,
        order_index: value(ORDER_COLUMN).and_then(|index| index.trim().parse().ok()),
        order_direction: value(ORDER_DIR)
            .map(|dir| OrderDirection::parse(&dir))
            .unwrap_or_default(),
        page_limit: value(LENGTH)
            .map(|limit| coerce_int(&limit))
            .unwrap_or(defaults.page_limit),
        page_offset: value(START)
            .map(|offset| coerce_int(&offset))
            .unwrap_or(defaults.page_offset),
        draw_token: value(DRAW)
            .map(|draw| coerce_int(&draw))
            .unwrap_or(defaults.draw_token),
    }
}

fn lookup<'a>(raw: &'a RawParams, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| raw.get(*key))
        .map(String::as_str)
}

/// True when the parameter group was sent at all, even with empty values.
fn is_present(raw: &RawParams, group: &str) -> bool {
    raw.keys().any(|key| {
        key.strip_prefix(group)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('[') || rest.starts_with('.'))
    })
}

/// Leading optional sign and digits; anything unparseable is zero.
pub fn coerce_int(value: &str) -> i64 {
    let trimmed = value.trim();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<i64>()
        .map(|number| sign * number)
        .unwrap_or(0)
}
