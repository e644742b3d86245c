//! Output modes turning a channel call into console arguments.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::humanize::humanize;
use super::printf::{count_placeholders, escape};
use crate::arg::Arg;
use crate::channel::{BLACK_STYLE, Color};
use crate::sink::Capabilities;

/// What a channel knows when it emits.
#[derive(Debug, Clone, Copy)]
pub struct Emission<'a> {
    /// Channel name.
    pub name: &'a str,

    /// Color assigned to the channel.
    pub color: Color,

    /// Milliseconds since the channel's previous emission (0 on the first).
    pub elapsed_ms: u64,
}

/// Strategy for building the argument list handed to a sink.
pub trait OutputMode: Send + Sync + fmt::Debug {
    /// Build the console arguments for one call.
    ///
    /// `args` are the caller's arguments, first one not yet coerced.
    fn render(&self, emission: &Emission<'_>, args: Vec<Arg>) -> Vec<Arg>;

    /// Mode name, for diagnostics.
    fn name(&self) -> &'static str;
}

/// Split off the format string and coerce it.
///
/// A non-text first argument is escaped so it cannot consume arguments.
fn take_format(args: &mut std::vec::IntoIter<Arg>) -> (String, usize) {
    match args.next().map(Arg::coerce) {
        Some(Arg::Str(fmt)) => {
            let subs = count_placeholders(&fmt);
            (fmt, subs)
        }
        Some(other) => (escape(&other.to_string()).into_owned(), 0),
        None => (String::new(), 0),
    }
}

/// Colored output using `%c` style placeholders.
///
/// The emitted list is the decorated format string, the channel color,
/// a black style, the arguments consumed by the caller's format string,
/// the channel color again and finally any arguments left over.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyledMode;

impl OutputMode for StyledMode {
    fn render(&self, emission: &Emission<'_>, args: Vec<Arg>) -> Vec<Arg> {
        let mut args = args.into_iter();
        let (fmt, subs) = take_format(&mut args);
        let color = emission.color.style();

        let line = format!(
            "%c{} %c{} %c+{}",
            escape(emission.name),
            fmt,
            humanize(emission.elapsed_ms)
        );

        let mut out = Vec::with_capacity(args.len() + 4);
        out.push(Arg::Str(line));
        out.push(Arg::Str(color.clone()));
        out.push(Arg::from(BLACK_STYLE));
        out.extend(args.by_ref().take(subs));
        out.push(Arg::Str(color));
        out.extend(args);
        out
    }

    fn name(&self) -> &'static str {
        "styled"
    }
}

/// Unstyled output: `<name> <message> +<elapsed>` followed by the remaining arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMode;

impl OutputMode for PlainMode {
    fn render(&self, emission: &Emission<'_>, args: Vec<Arg>) -> Vec<Arg> {
        let mut args = args.into_iter();
        let (fmt, _) = take_format(&mut args);

        let line = format!(
            "{} {} +{}",
            escape(emission.name),
            fmt,
            humanize(emission.elapsed_ms)
        );

        let mut out = Vec::with_capacity(args.len() + 1);
        out.push(Arg::Str(line));
        out.extend(args);
        out
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}

/// Which output mode a context uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSelection {
    /// Styled when the host supports it, plain otherwise.
    #[default]
    Auto,
    /// Always styled.
    Styled,
    /// Always plain.
    Plain,
}

impl ModeSelection {
    /// Pick the output mode for the given host capabilities.
    pub fn resolve(self, capabilities: Capabilities) -> Arc<dyn OutputMode> {
        let styled = match self {
            Self::Auto => capabilities.styles,
            Self::Styled => true,
            Self::Plain => false,
        };

        if styled {
            Arc::new(StyledMode)
        } else {
            Arc::new(PlainMode)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::PALETTE;

    fn emission(elapsed_ms: u64) -> Emission<'static> {
        Emission {
            name: "app:db",
            color: PALETTE[0],
            elapsed_ms,
        }
    }

    fn strs(args: &[Arg]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_styled_layout() {
        let args = vec![
            Arg::from("query %s took %dms"),
            Arg::from("users"),
            Arg::from(12),
            Arg::from("extra"),
        ];
        let out = StyledMode.render(&emission(1500), args);
        assert_eq!(
            strs(&out),
            vec![
                "%capp:db %cquery %s took %dms %c+1s",
                "color:#4DD9ED",
                "color:black",
                "users",
                "12",
                "color:#4DD9ED",
                "extra",
            ]
        );
    }

    #[test]
    fn test_styled_with_fewer_args_than_placeholders() {
        let out = StyledMode.render(&emission(0), vec![Arg::from("%s and %s"), Arg::from("one")]);
        assert_eq!(
            strs(&out),
            vec![
                "%capp:db %c%s and %s %c+0ms",
                "color:#4DD9ED",
                "color:black",
                "one",
                "color:#4DD9ED",
            ]
        );
    }

    #[test]
    fn test_styled_escaped_percent_keeps_args_trailing() {
        let out = StyledMode.render(&emission(0), vec![Arg::from("100%% done"), Arg::from(1)]);
        assert_eq!(out[3], Arg::Str("color:#4DD9ED".to_string()));
        assert_eq!(out[4], Arg::Int(1));
    }

    #[test]
    fn test_styled_escapes_name() {
        let e = Emission {
            name: "50%s",
            color: PALETTE[1],
            elapsed_ms: 0,
        };
        let out = StyledMode.render(&e, vec![Arg::from("hi")]);
        assert_eq!(out[0], Arg::Str("%c50%%s %chi %c+0ms".to_string()));
    }

    #[test]
    fn test_plain_layout() {
        let out = PlainMode.render(&emission(65_000), vec![Arg::from("hello %s"), Arg::from("world")]);
        assert_eq!(strs(&out), vec!["app:db hello %s +1.1m", "world"]);
    }

    #[test]
    fn test_error_first_arg_is_coerced() {
        let err = std::io::Error::other("boom");
        let out = PlainMode.render(&emission(0), vec![Arg::error(&err)]);
        assert_eq!(strs(&out), vec!["app:db boom +0ms"]);
    }

    #[test]
    fn test_non_text_first_arg() {
        let out = StyledMode.render(&emission(0), vec![Arg::from(42), Arg::from("x")]);
        assert_eq!(out[0], Arg::Str("%capp:db %c42 %c+0ms".to_string()));
        assert_eq!(out[4], Arg::Str("x".to_string()));
    }

    #[test]
    fn test_resolve() {
        let rich = Capabilities { styles: true };
        let bare = Capabilities { styles: false };
        assert_eq!(ModeSelection::Auto.resolve(rich).name(), "styled");
        assert_eq!(ModeSelection::Auto.resolve(bare).name(), "plain");
        assert_eq!(ModeSelection::Styled.resolve(bare).name(), "styled");
        assert_eq!(ModeSelection::Plain.resolve(rich).name(), "plain");
    }
}
