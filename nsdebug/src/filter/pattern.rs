//! Glob pattern matching for channel names.

use regex::Regex;

use crate::error::{PatternError, Result};

/// Trait for channel name matching - regex by default, extensible for custom matchers.
pub trait NameMatcher: Send + Sync {
    /// Check if the full channel name matches.
    fn matches(&self, name: &str) -> bool;
}

/// Regex-based name matcher (the default implementation).
///
/// Callers are expected to anchor the regex themselves.
impl NameMatcher for Regex {
    fn matches(&self, name: &str) -> bool {
        self.is_match(name)
    }
}

/// A compiled filter pattern.
///
/// `*` matches any run of characters (including none); every other
/// character matches itself. The match is anchored to the whole name, so
/// `app:*` matches `app:db` but not `myapp:db`.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The glob as written in the filter string, without any `-` prefix.
    glob: String,

    /// The anchored regex, `None` if the glob could not be compiled.
    regex: Option<Regex>,
}

impl Pattern {
    /// Compile a glob into a pattern.
    pub fn new(glob: &str) -> Result<Self> {
        let regex = Regex::new(&glob_to_regex(glob)).map_err(|source| PatternError::Invalid {
            glob: glob.to_string(),
            source,
        })?;

        Ok(Self {
            glob: glob.to_string(),
            regex: Some(regex),
        })
    }

    /// Compile a glob, falling back to a pattern that never matches.
    ///
    /// Filter strings are not validated, so a token the regex engine
    /// rejects simply selects nothing.
    pub fn lossy(glob: &str) -> Self {
        match Self::new(glob) {
            Ok(pattern) => pattern,
            Err(e) => {
                log::trace!("{}", e);
                Self {
                    glob: glob.to_string(),
                    regex: None,
                }
            }
        }
    }

    /// The glob this pattern was compiled from.
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// Get a reference to the underlying regex, if compilation succeeded.
    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }
}

impl NameMatcher for Pattern {
    fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(name))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.glob == other.glob
    }
}

impl Eq for Pattern {}

/// Translate a glob into an anchored regex source string.
///
/// Literal segments are escaped; each `*` becomes a lazy `.*?`.
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');
    for (i, part) in glob.split('*').enumerate() {
        if i > 0 {
            out.push_str(".*?");
        }
        out.push_str(&regex::escape(part));
    }
    out.push('$');
    out
}
