//! Per-channel color palette.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed palette, handed out in rotation.
pub const PALETTE: [Color; 6] = [
    Color::new(0x4D, 0xD9, 0xED),
    Color::new(0x95, 0xE3, 0x46),
    Color::new(0xE3, 0xDB, 0x7D),
    Color::new(0x00, 0x00, 0xAE),
    Color::new(0xB1, 0x80, 0xFB),
    Color::new(0xFF, 0x26, 0x6F),
];

/// Style value that ends a channel name's styling.
pub const BLACK_STYLE: &str = "color:black";

/// An RGB color assigned to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// The style value passed for a `%c` placeholder, e.g. `color:#4DD9ED`.
    pub fn style(&self) -> String {
        format!("color:{}", self)
    }

    /// Parse a style value produced by [`Color::style`].
    pub fn from_style(style: &str) -> Option<Self> {
        Self::from_hex(style.trim().strip_prefix("color:")?.trim())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Rotating index into [`PALETTE`].
#[derive(Debug, Default)]
pub struct ColorCycle {
    next: AtomicUsize,
}

impl ColorCycle {
    /// Create a cycle starting at the first palette entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next color, wrapping around the palette.
    pub fn next_color(&self) -> Color {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        PALETTE[index % PALETTE.len()]
    }
}
