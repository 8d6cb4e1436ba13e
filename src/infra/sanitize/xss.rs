use crate::usecase::ports::sanitizer::Sanitizer;

/// Strips markup and script vectors from request values.
///
/// Removes complete `<...>` tags, `javascript:`/`vbscript:` schemes and
/// control characters other than tab and newline. Plain text, including a
/// lone `<` or `>`, is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct XssSanitizer;

impl Sanitizer for XssSanitizer {
    fn clean(&self, value: &str) -> String {
        let without_tags = strip_tags(value);
        let without_schemes = strip_schemes(&without_tags);
        without_schemes
            .chars()
            .filter(|ch| !ch.is_control() || matches!(ch, '\t' | '\n'))
            .collect()
    }
}

/// Leaves values as they are, for data sources that bind every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
    fn clean(&self, value: &str) -> String {
        value.to_string()
    }
}

fn strip_tags(value: &str) -> String {
    let mut cleaned = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let starts_tag = after
            .chars()
            .next()
            .is_some_and(|ch| ch.is_ascii_alphabetic() || matches!(ch, '/' | '!' | '?'));
        match after.find('>') {
            Some(close) if starts_tag => {
                cleaned.push_str(&rest[..open]);
                rest = &after[close + 1..];
            }
            _ => {
                cleaned.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    cleaned.push_str(rest);
    cleaned
}

fn strip_schemes(value: &str) -> String {
    const SCHEMES: [&str; 2] = ["javascript:", "vbscript:"];

    let mut cleaned = value.to_string();
    for scheme in SCHEMES {
        while let Some(idx) = cleaned.to_ascii_lowercase().find(scheme) {
            cleaned.replace_range(idx..idx + scheme.len(), "");
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_tags_but_keeps_text() {
        assert_eq!(
            XssSanitizer.clean("<script>alert(1)</script>ann"),
            "alert(1)ann"
        );
        assert_eq!(XssSanitizer.clean("<b onclick=x>bold</b>"), "bold");
    }

    #[test]
    fn keeps_comparison_characters() {
        assert_eq!(XssSanitizer.clean("a < b > c"), "a < b > c");
        assert_eq!(XssSanitizer.clean("x<1"), "x<1");
    }

    #[test]
    fn removes_script_schemes_case_insensitively() {
        assert_eq!(XssSanitizer.clean("JavaScript:alert(1)"), "alert(1)");
        assert_eq!(XssSanitizer.clean("javajavascript:script:go"), "go");
    }

    #[test]
    fn drops_control_characters() {
        assert_eq!(XssSanitizer.clean("an\u{0}n\u{7}\tx"), "ann\tx");
    }

    #[test]
    fn passthrough_returns_input() {
        assert_eq!(PassthroughSanitizer.clean(" <b>x</b> "), " <b>x</b> ");
    }
}
