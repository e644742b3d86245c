//! Terminal sink rendering console arguments the way a browser console does.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use super::{Capabilities, Sink};
use crate::arg::Arg;
use crate::channel::Color;
use crate::error::SinkError;
use crate::format::{FormatString, Placeholder, Segment};

const RESET: &str = "\x1b[0m";

/// Sink writing one rendered line per call to a writer (stderr by default).
///
/// `%c` style values become 24-bit ANSI foreground colors when `ansi` is
/// on, and are dropped otherwise.
pub struct ConsoleSink {
    writer: Mutex<Box<dyn Write + Send>>,
    ansi: bool,
}

impl ConsoleSink {
    /// Create a sink over any writer.
    pub fn new(writer: impl Write + Send + 'static, ansi: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            ansi,
        }
    }

    /// Sink on stderr, with colors if the terminal supports them.
    pub fn stderr() -> Self {
        Self::new(io::stderr(), Capabilities::detect().styles)
    }

    /// Whether ANSI colors are written.
    pub fn ansi(&self) -> bool {
        self.ansi
    }
}

impl Sink for ConsoleSink {
    fn write(&self, args: &[Arg]) -> Result<(), SinkError> {
        let mut line = render_line(args, self.ansi);
        line.push('\n');

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("ansi", &self.ansi)
            .finish_non_exhaustive()
    }
}

/// Render an argument list into one line of text.
///
/// A leading string is treated as a format string; placeholders without
/// a matching argument are printed as written. Leftover arguments follow,
/// separated by spaces.
pub fn render_line(args: &[Arg], ansi: bool) -> String {
    let mut out = String::new();
    let mut rest = args.iter();
    let mut colored = false;
    let mut started = false;

    if let Some(Arg::Str(fmt)) = args.first() {
        rest.next();
        started = true;

        for segment in FormatString::parse(fmt).segments() {
            match *segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Percent => out.push('%'),
                Segment::Placeholder(placeholder) => match rest.next() {
                    Some(arg) => substitute(&mut out, placeholder, arg, ansi, &mut colored),
                    None => out.push_str(placeholder.as_str()),
                },
            }
        }
    }

    for arg in rest {
        if started {
            out.push(' ');
        }
        started = true;
        let _ = write!(out, "{}", arg);
    }

    if colored {
        out.push_str(RESET);
    }
    out
}

fn substitute(out: &mut String, placeholder: Placeholder, arg: &Arg, ansi: bool, colored: &mut bool) {
    match placeholder {
        Placeholder::String => {
            let _ = write!(out, "{}", arg);
        }
        Placeholder::Decimal | Placeholder::Integer => match arg.as_f64() {
            Some(n) if n.is_finite() => {
                let _ = write!(out, "{}", n.trunc() as i64);
            }
            _ => out.push_str("NaN"),
        },
        Placeholder::Float => match arg.as_f64() {
            Some(n) => {
                let _ = write!(out, "{}", n);
            }
            None => out.push_str("NaN"),
        },
        Placeholder::Object => {
            let _ = match arg {
                Arg::Str(s) => write!(out, "{:?}", s),
                other => write!(out, "{}", other),
            };
        }
        Placeholder::Style => {
            if !ansi {
                return;
            }
            match arg.as_str().and_then(Color::from_style) {
                Some(c) => {
                    let _ = write!(out, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b);
                    *colored = true;
                }
                None => {
                    out.push_str(RESET);
                    *colored = false;
                }
            }
        }
    }
}
