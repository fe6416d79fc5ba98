use crate::error::{CoreError, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Template used to build the redirect target from a lookup key.
///
/// The template holds exactly one `%s` placeholder. `%%` renders as a
/// literal `%`; any other `%` directive is rejected when parsing.
///
/// ```
/// use s3link_core::RedirectTemplate;
///
/// let template: RedirectTemplate = "https://example.com/?s=%s".parse().unwrap();
/// assert_eq!(template.format("abc"), "https://example.com/?s=abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTemplate {
    raw: String,
    head: String,
    tail: String,
}

impl RedirectTemplate {
    /// Parses `raw`, which must hold exactly one `%s` and may escape `%` as `%%`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut head = String::new();
        let mut tail = String::new();
        let mut seen_placeholder = false;

        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            let out = if seen_placeholder { &mut tail } else { &mut head };
            if c != '%' {
                out.push(c);
                continue;
            }

            match chars.next() {
                Some('%') => out.push('%'),
                Some('s') if !seen_placeholder => seen_placeholder = true,
                Some('s') => {
                    return Err(CoreError::InvalidTemplate(format!(
                        "more than one %s placeholder in {:?}",
                        raw
                    )));
                }
                Some(other) => {
                    return Err(CoreError::InvalidTemplate(format!(
                        "unsupported directive %{} in {:?}",
                        other, raw
                    )));
                }
                None => {
                    return Err(CoreError::InvalidTemplate(format!(
                        "dangling % at end of {:?}",
                        raw
                    )));
                }
            }
        }

        if !seen_placeholder {
            return Err(CoreError::InvalidTemplate(format!(
                "missing %s placeholder in {:?}",
                raw
            )));
        }

        Ok(Self {
            raw: raw.to_string(),
            head,
            tail,
        })
    }

    /// Substitutes `key` into the placeholder.
    pub fn format(&self, key: &str) -> String {
        let mut target = String::with_capacity(self.head.len() + key.len() + self.tail.len());
        target.push_str(&self.head);
        target.push_str(key);
        target.push_str(&self.tail);
        target
    }

    /// Returns the template as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for RedirectTemplate {
    /// The identity template `%s`: the lookup key is the target.
    fn default() -> Self {
        Self {
            raw: "%s".to_string(),
            head: String::new(),
            tail: String::new(),
        }
    }
}

impl FromStr for RedirectTemplate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for RedirectTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
