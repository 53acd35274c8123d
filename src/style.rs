//! Cell colors.
//!
//! The animation itself only ever draws with [`Style::default`]. Colors belong to the backend
//! surface: [`Bound`](crate::backend::Bound) implementations receive them, and code drawing its
//! own cells on a [`Screen`](crate::Screen) through [`Output`](crate::Output) may set them.

/// The foreground and background color of a cell.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Style {
    /// Text color.
    pub foreground: Color,
    /// Fill color.
    pub background: Color,
}

impl Style {
    /// Combine a foreground and a background color.
    #[must_use]
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

/// A terminal color.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Color {
    /// Whatever the terminal uses when no color is set.
    #[default]
    Default,
    /// An entry of the 256-color palette. 0 to 15 are the terminal's themed colors.
    Indexed(u8),
    /// A 24-bit color.
    Rgb {
        /// Red.
        r: u8,
        /// Green.
        g: u8,
        /// Blue.
        b: u8,
    },
}
