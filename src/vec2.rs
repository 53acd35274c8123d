/// A column and row pair, used both for positions on a grid and for grid sizes.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Vec2<T> {
    /// The column.
    pub x: T,
    /// The row.
    pub y: T,
}

impl<T> Vec2<T> {
    /// Create a position or size from its column and row.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Vec2<u16> {
    /// Whether this position lies inside a grid of `size`.
    #[must_use]
    pub fn within(self, size: Self) -> bool {
        self.x < size.x && self.y < size.y
    }
}

impl<T> From<(T, T)> for Vec2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<Vec2<T>> for (T, T) {
    fn from(Vec2 { x, y }: Vec2<T>) -> Self {
        (x, y)
    }
}

#[cfg(test)]
#[test]
fn bounds_and_conversions() {
    let size = Vec2::new(3_u16, 2);
    assert!(Vec2::new(2, 1).within(size));
    assert!(!Vec2::new(3, 0).within(size));
    assert!(!Vec2::new(0, 2).within(size));

    assert_eq!(Vec2::from((4, 5)), Vec2::new(4, 5));
    assert_eq!(<(u16, u16)>::from(size), (3, 2));
}
