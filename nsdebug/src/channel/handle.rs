//! Channel handles returned by [`DebugContext::create`](crate::DebugContext::create).

use std::fmt;
use std::sync::Arc;

use super::color::Color;
use crate::arg::Arg;
use crate::context::Shared;

/// Separator used by [`Channel::extend`].
pub const NAMESPACE_DELIMITER: char = ':';

/// A named logging channel.
///
/// Enabled or disabled for good when created. A disabled channel ignores
/// every call; an enabled one formats the call with its color and the time
/// since its previous emission, then writes it to the context's sink.
#[derive(Clone)]
pub struct Channel {
    name: Arc<str>,

    /// `Some` only if the channel was enabled at creation.
    color: Option<Color>,

    shared: Arc<Shared>,
}

impl Channel {
    pub(crate) fn new(name: String, shared: Arc<Shared>) -> Self {
        let color = shared.is_enabled(&name).then(|| shared.next_color());
        Self {
            name: name.into(),
            color,
            shared,
        }
    }

    /// The channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this channel produces output.
    pub fn is_enabled(&self) -> bool {
        self.color.is_some()
    }

    /// The color assigned at creation, if enabled.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Emit one message.
    ///
    /// The first argument is the message and may be a format string using
    /// `%s %d %i %f %o %c`; the rest are substitutions and extra values.
    /// Does nothing on a disabled channel.
    pub fn log<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        let Some(color) = self.color else {
            return;
        };
        let args = args.into_iter().map(Into::into).collect();
        self.shared.emit(&self.name, color, args);
    }

    /// Create a sub-channel named `<name>:<suffix>`, filtered like any other.
    pub fn extend(&self, suffix: &str) -> Channel {
        let name = format!("{}{}{}", self.name, NAMESPACE_DELIMITER, suffix);
        Channel::new(name, Arc::clone(&self.shared))
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}
