//! Data structures representing the cells of a terminal.
//!
//! Every character occupies exactly one cell: columns are counted in code points, not display
//! width. Wide characters therefore overlap their right-hand neighbour on real terminals.

use unicode_width::UnicodeWidthChar;

use crate::{Output, Style, Vec2};

/// The grid of characters on a terminal.
///
/// A grid is a list of [`Row`]s that are all the same length.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    // invariant: length <= u16::MAX, the length of each row is the width above
    rows: Vec<Row>,
}

impl Grid {
    /// Create a new grid with all empty cells.
    #[must_use]
    pub fn new(size: impl Into<Vec2<u16>>) -> Self {
        let size = size.into();

        Self {
            width: size.x,
            rows: vec![Row::new(size.x); usize::from(size.y)],
        }
    }

    /// Get the number of columns in the grid.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }
    /// Get the number of rows in the grid.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    /// Get the rows of the grid.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the grid's contents as a vector of strings, one per row.
    ///
    /// This is mostly useful in tests.
    #[must_use]
    pub fn contents(&self) -> Vec<String> {
        self.rows.iter().map(Row::contents).collect()
    }

    /// Get the text visible on the grid: each row with trailing blanks removed, and trailing
    /// blank rows removed.
    #[must_use]
    pub fn visible_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.contents().trim_end_matches(' ').to_owned())
            .collect();
        while lines.last().map_or(false, String::is_empty) {
            lines.pop();
        }
        lines
    }
}

impl Output for Grid {
    fn size(&self) -> Vec2<u16> {
        Vec2::new(self.width, self.height())
    }
    fn write_char(&mut self, pos: Vec2<u16>, c: char, style: Style) {
        // `width` is `None` for control characters; NUL is the one it lets through.
        if c == '\0' || c.width().is_none() || !pos.within(self.size()) {
            return;
        }
        self.rows[usize::from(pos.y)].cells[usize::from(pos.x)] = Cell { contents: c, style };
    }
    fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }
}

/// A row of cells in a terminal.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Row {
    // invariant: length <= u16::MAX
    cells: Vec<Cell>,
}

impl Row {
    /// Create a new row with all empty cells.
    #[must_use]
    pub fn new(len: u16) -> Self {
        Self {
            cells: vec![Cell::default(); usize::from(len)],
        }
    }

    /// Get the number of cells in the row.
    #[must_use]
    pub fn len(&self) -> u16 {
        self.cells.len() as u16
    }

    /// Get whether the row is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the cells in the row.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the contents of the row as a string.
    #[must_use]
    pub fn contents(&self) -> String {
        self.cells.iter().map(|cell| cell.contents).collect()
    }

    /// Clear the row.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

/// A cell in a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character in the cell. This is never a control character.
    pub contents: char,
    /// The style of the cell.
    pub style: Style,
}

impl Default for Cell {
    /// A blank cell: a space with the default style.
    fn default() -> Self {
        Self {
            contents: ' ',
            style: Style::default(),
        }
    }
}
