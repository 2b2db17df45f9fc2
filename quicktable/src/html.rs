//! HTML markup stripping.
//!
//! HTML-typed columns must sort and filter on their visible text, not on the
//! markup, so the built-in `html*` type definitions run their operands
//! through [`strip_html`] first.

/// Strip markup from a string, keeping only text outside tags, quoted
/// attribute values and comments.
///
/// The scanner walks the input once, tracking `< >` nesting depth, quoted
/// attribute state and comment state; characters are emitted only when all
/// three are inactive. A bare `<` followed by whitespace (or the end of the
/// input) is literal text, not a tag start, so `"a < b"` survives intact.
pub fn strip_html(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut in_comment = false;

    while i < chars.len() {
        let c = chars[i];

        if in_comment {
            if c == '-' && chars.get(i + 1) == Some(&'-') && chars.get(i + 2) == Some(&'>') {
                in_comment = false;
                i += 3;
            } else {
                i += 1;
            }
            continue;
        }

        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        if depth > 0 {
            match c {
                '"' | '\'' => quote = Some(c),
                '<' => depth += 1,
                '>' => depth -= 1,
                _ => {}
            }
            i += 1;
            continue;
        }

        if c == '<' {
            if chars.get(i + 1) == Some(&'!')
                && chars.get(i + 2) == Some(&'-')
                && chars.get(i + 3) == Some(&'-')
            {
                in_comment = true;
                i += 4;
                continue;
            }
            match chars.get(i + 1) {
                None => out.push('<'),
                Some(next) if next.is_whitespace() => out.push('<'),
                _ => depth = 1,
            }
            i += 1;
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::strip_html;

    #[test]
    fn test_strips_simple_tags() {
        assert_eq!(strip_html("<b>Hi</b> there"), "Hi there");
    }

    #[test]
    fn test_bare_angle_brackets_survive() {
        assert_eq!(strip_html("a < b and c > d"), "a < b and c > d");
    }

    #[test]
    fn test_comments_removed() {
        assert_eq!(strip_html("<!-- x --> y"), " y");
    }

    #[test]
    fn test_quoted_attribute_with_bracket() {
        assert_eq!(strip_html(r#"<a title="x > y">z</a>"#), "z");
    }

    #[test]
    fn test_trailing_bare_bracket() {
        assert_eq!(strip_html("1 <"), "1 <");
    }
}
