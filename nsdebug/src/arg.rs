//! Console arguments.

use std::fmt;

/// A single argument passed to a channel or sink.
///
/// Consoles accept arbitrary values; this enum covers the kinds the
/// formatter treats differently.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Text, and the only kind usable as a format string.
    Str(String),
    /// Whole number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Absent value.
    Null,
    /// Any other value, pre-rendered with its `Debug` form.
    Object(String),
    /// An error, carrying its message and an optional stack-like trace.
    Error(ErrorArg),
}

/// Text extracted from an error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorArg {
    /// The error's display message.
    pub message: String,

    /// The message followed by its chain of causes, if it has any.
    pub stack: Option<String>,
}

impl ErrorArg {
    /// The text an error is shown as: the stack when present, else the message.
    pub fn text(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }
}

impl Arg {
    /// Capture an error and its source chain.
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let message = err.to_string();

        let mut stack = None;
        let mut source = err.source();
        while let Some(cause) = source {
            let trace = stack.get_or_insert_with(|| message.clone());
            trace.push_str("\n    caused by: ");
            trace.push_str(&cause.to_string());
            source = cause.source();
        }

        Self::Error(ErrorArg { message, stack })
    }

    /// Capture any value through its `Debug` form, shown by `%o`.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Object(format!("{:?}", value))
    }

    /// Turn an error into its stack (or message) text; other values are unchanged.
    pub fn coerce(self) -> Self {
        match self {
            Self::Error(err) => Self::Str(err.stack.unwrap_or(err.message)),
            other => other,
        }
    }

    /// The string content, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value as a console would convert it for `%d`/`%f`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Null => Some(0.0),
            Self::Str(s) => s.trim().parse().ok(),
            Self::Object(_) | Self::Error(_) => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Null => f.write_str("null"),
            Self::Object(repr) => f.write_str(repr),
            Self::Error(err) => f.write_str(err.text()),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<char> for Arg {
    fn from(c: char) -> Self {
        Self::Str(c.to_string())
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f32> for Arg {
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

impl From<f64> for Arg {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(n: $t) -> Self {
                    Self::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(n: $t) -> Self {
                    i64::try_from(n).map_or(Self::Float(n as f64), Self::Int)
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);
