//! Column declaration strings.
//!
//! A declaration is a SQL expression optionally followed by an attribute
//! block in parentheses, for example
//! `u.email AS contact (o|s[u.alt_email, p.phone AS mobile])`.
//! Flags are `h` (hidden), `o` (orderable) and `s` (searchable); a bracketed
//! list inside any flag adds further expressions to the search predicate.

use crate::domain::entities::column::{ColumnAttributes, ColumnDeclaration};

pub fn parse_column(expression: &str) -> ColumnDeclaration {
    let (bare, parsed) = split_attribute_block(expression);
    let (attributes, extra_search_targets) = parsed.unwrap_or_default();
    let (original_expression, clean_name) = resolve_names(bare);

    ColumnDeclaration {
        expression: expression.to_string(),
        clean_name,
        original_expression,
        attributes,
        extra_search_targets,
    }
}

/// Output key a declaration resolves to.
pub fn clean_name(expression: &str) -> String {
    parse_column(expression).clean_name
}

/// Writes a declaration back into its string form.
pub fn render_column(declaration: &ColumnDeclaration) -> String {
    let mut rendered = declaration.original_expression.clone();
    if resolve_names(&declaration.original_expression).1 != declaration.clean_name {
        rendered.push_str(" AS ");
        rendered.push_str(&declaration.clean_name);
    }

    let attributes = &declaration.attributes;
    let mut tokens = Vec::new();
    if attributes.hidden {
        tokens.push("h".to_string());
    }
    if attributes.orderable {
        tokens.push("o".to_string());
    }
    let list = if declaration.extra_search_targets.is_empty() {
        String::new()
    } else {
        format!("[{}]", declaration.extra_search_targets.join(", "))
    };
    if attributes.searchable {
        tokens.push(format!("s{list}"));
    } else if !list.is_empty() {
        tokens.push(list);
    }

    if !tokens.is_empty() {
        rendered.push_str(" (");
        rendered.push_str(&tokens.join("|"));
        rendered.push(')');
    }
    rendered
}

type ParsedBlock = (ColumnAttributes, Vec<String>);

/// Separates a trailing attribute block from the expression. A trailing
/// parenthesis group that is unbalanced or holds anything but attribute
/// tokens stays part of the expression.
fn split_attribute_block(expression: &str) -> (&str, Option<ParsedBlock>) {
    let trimmed = expression.trim();
    if !trimmed.ends_with(')') {
        return (trimmed, None);
    }
    let Some(open) = matching_open_paren(trimmed) else {
        return (trimmed, None);
    };

    let block = &trimmed[open + 1..trimmed.len() - 1];
    match parse_attribute_block(block) {
        Some(parsed) => (trimmed[..open].trim_end(), Some(parsed)),
        None => (trimmed, None),
    }
}

fn matching_open_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Unknown flag tokens are skipped, but a block with no known flag and no
/// bracket list is not an attribute block at all (`COUNT(id)`).
fn parse_attribute_block(block: &str) -> Option<ParsedBlock> {
    let mut attributes = ColumnAttributes::default();
    let mut targets: Vec<String> = Vec::new();
    let mut recognized = false;
    let mut unknown = false;

    for token in split_top_level(block, '|') {
        let (flag, list) = split_bracket_list(token)?;
        if let Some(list) = list {
            recognized = true;
            for entry in split_top_level(list, ',') {
                let target = strip_alias(entry.trim());
                if !target.is_empty() && !targets.iter().any(|known| known == target) {
                    targets.push(target.to_string());
                }
            }
        }

        let flag = flag.trim().to_ascii_lowercase();
        if flag.is_empty() {
            continue;
        }
        if attributes.apply_flag(&flag) {
            recognized = true;
        } else {
            unknown = true;
        }
    }

    if unknown && !recognized {
        return None;
    }
    Some((attributes, targets))
}

/// Splits `s[a, b]` into the flag text (`s`) and the list body (`a, b`).
fn split_bracket_list(token: &str) -> Option<(String, Option<&str>)> {
    let Some(open) = token.find('[') else {
        if token.contains(']') {
            return None;
        }
        return Some((token.to_string(), None));
    };
    let close = token.rfind(']').filter(|close| *close > open)?;

    let mut flag = String::with_capacity(token.len());
    flag.push_str(&token[..open]);
    flag.push_str(&token[close + 1..]);
    Some((flag, Some(&token[open + 1..close])))
}

/// Splits on `separator` outside parentheses, brackets and quoted strings.
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_quote = false;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '\'' => in_quote = !in_quote,
            '(' | '[' if !in_quote => depth += 1,
            ')' | ']' if !in_quote => depth -= 1,
            ch if ch == separator && depth == 0 && !in_quote => {
                parts.push(&text[start..idx]);
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn strip_alias(expression: &str) -> &str {
    find_alias(expression)
        .map(|(left, _)| left)
        .unwrap_or(expression)
}

/// Last top-level ` AS ` (any case, any surrounding whitespace).
fn find_alias(text: &str) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut in_quote = false;
    let mut found = None;

    for idx in 0..bytes.len() {
        match bytes[idx] {
            b'\'' => in_quote = !in_quote,
            b'(' | b'[' if !in_quote => depth += 1,
            b')' | b']' if !in_quote => depth -= 1,
            byte if depth == 0 && !in_quote && byte.is_ascii_whitespace() => {
                if idx + 3 < bytes.len()
                    && bytes[idx + 1..idx + 3].eq_ignore_ascii_case(b"as")
                    && bytes[idx + 3].is_ascii_whitespace()
                {
                    found = Some(idx);
                }
            }
            _ => {}
        }
    }

    let idx = found?;
    let left = text[..idx].trim();
    let right = text[idx + 3..].trim();
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left, right))
}

/// Returns `(original_expression, clean_name)` for an expression without
/// its attribute block.
fn resolve_names(bare: &str) -> (String, String) {
    if let Some((left, right)) = find_alias(bare) {
        return (left.to_string(), right.to_string());
    }
    let clean = match bare.rfind('.') {
        Some(dot) => &bare[dot + 1..],
        None => bare,
    };
    (bare.to_string(), clean.to_string())
}
