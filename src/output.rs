//! Surfaces that frames are drawn onto, cell by cell.

use crate::{Style, Vec2};

/// A fixed-size surface of cells.
///
/// Writes never fail: characters that can't be shown and positions outside [`size`](Self::size)
/// are dropped silently. See [`OutputExt`] for writing whole strings.
pub trait Output {
    /// The number of columns and rows.
    #[must_use]
    fn size(&self) -> Vec2<u16>;

    /// Put `c` in the cell at `pos` (zero-indexed), replacing what was there.
    fn write_char(&mut self, pos: Vec2<u16>, c: char, style: Style);

    /// Blank every cell.
    fn clear(&mut self);
}

impl<O: Output + ?Sized> Output for &mut O {
    fn size(&self) -> Vec2<u16> {
        (**self).size()
    }
    fn write_char(&mut self, pos: Vec2<u16>, c: char, style: Style) {
        (**self).write_char(pos, c, style);
    }
    fn clear(&mut self) {
        (**self).clear();
    }
}

/// String writing for every [`Output`].
///
/// Kept separate so that [`Output`] stays object safe. Import it anonymously:
///
/// ```
/// use typewriter::output::OutputExt as _;
/// ```
pub trait OutputExt: Output {
    /// Write `text` rightwards from `pos`, one code point per column, cutting it off at the
    /// right edge.
    fn write(&mut self, pos: impl Into<Vec2<u16>>, text: &str, style: Style) {
        let pos = pos.into();
        for (x, c) in (pos.x..self.size().x).zip(text.chars()) {
            self.write_char(Vec2::new(x, pos.y), c, style);
        }
    }
}

impl<O: Output + ?Sized> OutputExt for O {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;

    #[test]
    fn write_stops_at_right_edge() {
        let mut grid = Grid::new((4, 2));
        grid.write((1, 1), "abcdef", Style::default());
        assert_eq!(grid.contents(), ["    ", " abc"]);
    }

    #[test]
    fn write_past_the_edge_does_nothing() {
        let mut grid = Grid::new((2, 1));
        grid.write((5, 0), "abc", Style::default());
        grid.write((0, 3), "abc", Style::default());
        assert_eq!(grid, Grid::new((2, 1)));
    }
}
