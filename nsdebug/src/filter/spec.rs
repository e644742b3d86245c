//! Parsed filter strings.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Marker that turns a filter token into a deny rule.
pub const DENY_PREFIX: char = '-';

/// A single token of a filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    /// Names matching this glob are enabled.
    Allow(String),

    /// Names matching this glob are disabled, regardless of allow rules.
    Deny(String),
}

impl FilterToken {
    /// Parse one token. Returns `None` for tokens with an empty glob.
    pub fn parse(token: &str) -> Option<Self> {
        let parsed = match token.strip_prefix(DENY_PREFIX) {
            Some(glob) => Self::Deny(glob.to_string()),
            None => Self::Allow(token.to_string()),
        };

        if parsed.glob().is_empty() {
            None
        } else {
            Some(parsed)
        }
    }

    /// The glob without the deny prefix.
    pub fn glob(&self) -> &str {
        match self {
            Self::Allow(glob) | Self::Deny(glob) => glob,
        }
    }

    /// Check if this is a deny rule.
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny(_))
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow(glob) => write!(f, "{}", glob),
            Self::Deny(glob) => write!(f, "{}{}", DENY_PREFIX, glob),
        }
    }
}

/// A filter string such as `app:*,-app:secret`.
///
/// Tokens are separated by any run of commas and whitespace. The raw
/// string is kept verbatim so it can be persisted exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    raw: String,
    tokens: Vec<FilterToken>,
}

impl FilterSpec {
    /// Parse a filter string. Parsing never fails.
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter_map(FilterToken::parse)
            .collect();

        Self {
            raw: raw.to_string(),
            tokens,
        }
    }

    /// The string this spec was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// All tokens in the order they were written.
    pub fn tokens(&self) -> &[FilterToken] {
        &self.tokens
    }

    /// Globs of the allow tokens.
    pub fn allowed(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| !t.is_deny())
            .map(FilterToken::glob)
    }

    /// Globs of the deny tokens.
    pub fn denied(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| t.is_deny())
            .map(FilterToken::glob)
    }

    /// Check if the filter selects nothing.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromStr for FilterSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Displays the normalized form: tokens joined by commas.
impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
