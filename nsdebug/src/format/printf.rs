//! Mini-parser for console format strings.
//!
//! Splits a format string into literal text, `%%` escapes and the
//! placeholders a console understands (`%s %d %i %f %o %c`). Any other
//! `%` sequence is literal text.

use std::borrow::Cow;

use memchr::memchr;

/// A substitution placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `%s`
    String,
    /// `%d`
    Decimal,
    /// `%i`
    Integer,
    /// `%f`
    Float,
    /// `%o`
    Object,
    /// `%c`, consumes a style value
    Style,
}

impl Placeholder {
    /// Map the directive byte following `%`.
    pub fn from_directive(b: u8) -> Option<Self> {
        match b {
            b's' => Some(Self::String),
            b'd' => Some(Self::Decimal),
            b'i' => Some(Self::Integer),
            b'f' => Some(Self::Float),
            b'o' => Some(Self::Object),
            b'c' => Some(Self::Style),
            _ => None,
        }
    }

    /// The placeholder as written.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "%s",
            Self::Decimal => "%d",
            Self::Integer => "%i",
            Self::Float => "%f",
            Self::Object => "%o",
            Self::Style => "%c",
        }
    }
}

/// One piece of a parsed format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied as-is.
    Literal(&'a str),
    /// `%%`, prints a single `%`.
    Percent,
    /// A placeholder consuming one argument.
    Placeholder(Placeholder),
}

/// A tokenized format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatString<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> FormatString<'a> {
    /// Tokenize a format string.
    pub fn parse(fmt: &'a str) -> Self {
        let bytes = fmt.as_bytes();
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut pos = 0;

        while let Some(offset) = memchr(b'%', &bytes[pos..]) {
            let at = pos + offset;
            let segment = match bytes.get(at + 1) {
                Some(b'%') => Some(Segment::Percent),
                Some(&b) => Placeholder::from_directive(b).map(Segment::Placeholder),
                None => None,
            };

            match segment {
                Some(segment) => {
                    if literal_start < at {
                        segments.push(Segment::Literal(&fmt[literal_start..at]));
                    }
                    segments.push(segment);
                    // Both bytes are ASCII, so this stays on a char boundary
                    pos = at + 2;
                    literal_start = pos;
                }
                None => pos = at + 1,
            }
        }

        if literal_start < fmt.len() {
            segments.push(Segment::Literal(&fmt[literal_start..]));
        }

        Self { segments }
    }

    /// The parsed segments in order.
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Number of arguments the format string consumes.
    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder(_)))
            .count()
    }
}

/// Count the substitution arguments a format string consumes.
pub fn count_placeholders(fmt: &str) -> usize {
    FormatString::parse(fmt).placeholder_count()
}

/// Escape `%` so the text is printed literally inside a format string.
pub fn escape(text: &str) -> Cow<'_, str> {
    if memchr(b'%', text.as_bytes()).is_some() {
        Cow::Owned(text.replace('%', "%%"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let fmt = FormatString::parse("user %s took %dms (%o)");
        assert_eq!(
            fmt.segments(),
            &[
                Segment::Literal("user "),
                Segment::Placeholder(Placeholder::String),
                Segment::Literal(" took "),
                Segment::Placeholder(Placeholder::Decimal),
                Segment::Literal("ms ("),
                Segment::Placeholder(Placeholder::Object),
                Segment::Literal(")"),
            ]
        );
    }

    #[test]
    fn test_count_all_directives() {
        assert_eq!(count_placeholders("%s %d %i %f %o %c"), 6);
        assert_eq!(count_placeholders("no placeholders"), 0);
        assert_eq!(count_placeholders(""), 0);
    }

    #[test]
    fn test_escaped_percent_is_not_counted() {
        assert_eq!(count_placeholders("100%% done"), 0);
        assert_eq!(count_placeholders("%%s"), 0);
        assert_eq!(count_placeholders("%%%s"), 1);
        assert_eq!(
            FormatString::parse("%%s").segments(),
            &[Segment::Percent, Segment::Literal("s")]
        );
    }

    #[test]
    fn test_unknown_directives_stay_literal() {
        let fmt = FormatString::parse("50%x and trailing %");
        assert_eq!(fmt.segments(), &[Segment::Literal("50%x and trailing %")]);
        assert_eq!(fmt.placeholder_count(), 0);
    }

    #[test]
    fn test_multibyte_text() {
        let fmt = FormatString::parse("héllo %s wörld");
        assert_eq!(fmt.placeholder_count(), 1);
        assert_eq!(fmt.segments()[0], Segment::Literal("héllo "));
        assert_eq!(fmt.segments()[2], Segment::Literal(" wörld"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert_eq!(escape("a%sb"), "a%%sb");
        assert_eq!(count_placeholders(&escape("50%s%d")), 0);
    }
}
