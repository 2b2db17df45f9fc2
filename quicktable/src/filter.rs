//! Search pattern compilation for column filters.

use regex::{Regex, RegexBuilder};

/// How a filter pattern string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Split the pattern into tokens (double-quoted phrases stay whole) and
    /// require every token to match, in any order.
    pub smart: bool,
    /// Compile the pattern as one raw regular expression instead.
    pub regex: bool,
    pub case_insensitive: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            smart: true,
            regex: false,
            case_insensitive: true,
        }
    }
}

/// A compiled per-column search pattern.
#[derive(Debug, Clone)]
pub struct FilterPattern {
    source: String,
    parts: Vec<Regex>,
}

impl FilterPattern {
    /// Compile a pattern. Returns `None` for an empty pattern (no filter) or
    /// an invalid regular expression (logged, treated as no filter).
    pub fn compile(pattern: &str, options: FilterOptions) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }

        let sources: Vec<String> = if options.regex {
            vec![pattern.to_string()]
        } else if options.smart {
            tokenize(pattern).iter().map(|t| regex::escape(t)).collect()
        } else {
            vec![regex::escape(pattern)]
        };
        if sources.is_empty() {
            return None;
        }

        let mut parts = Vec::with_capacity(sources.len());
        for source in &sources {
            match RegexBuilder::new(source)
                .case_insensitive(options.case_insensitive)
                .build()
            {
                Ok(re) => parts.push(re),
                Err(err) => {
                    log::warn!("[filter] invalid pattern {pattern:?}: {err}");
                    return None;
                }
            }
        }

        Some(Self {
            source: pattern.to_string(),
            parts,
        })
    }

    /// True when every compiled part matches the text.
    pub fn matches(&self, text: &str) -> bool {
        self.parts.iter().all(|re| re.is_match(text))
    }

    /// The pattern string this filter was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Split on whitespace outside double-quoted phrases; quotes are removed and
/// a quoted phrase becomes a single token.
fn tokenize(pattern: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;

    for c in pattern.chars() {
        match c {
            '"' => {
                in_quote = !in_quote;
                if !in_quote && !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c if c.is_whitespace() && !in_quote => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn test_tokenize_plain() {
        assert_eq!(tokenize("foo bar"), vec!["foo", "bar"]);
    }

    #[test]
    fn test_tokenize_quoted_phrase() {
        assert_eq!(tokenize(r#""foo bar" baz"#), vec!["foo bar", "baz"]);
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        assert_eq!(tokenize(r#"foo "bar baz"#), vec!["foo", "bar baz"]);
    }
}
