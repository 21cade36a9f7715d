use std::fmt;

/// A chess square (0-63) using rank-major ordering.
/// a1=0, b1=1, ..., h1=7, a2=8, ..., h8=63
///
/// The wire grid uses a different layout: row 0 is rank 8 and column 0 is
/// the a-file, so `(row, col) = (7 - rank, file)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Square(pub(crate) u8);

macro_rules! named_squares {
    ($($name:ident = $index:expr),* $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square($index);)*
        }
    };
}

named_squares! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

impl Square {
    /// Creates a square from index, returning None if out of range
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from index without a range check.
    /// Use only when index is known to be valid
    #[inline]
    pub const fn new_unchecked(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Creates a square from file (0-7) and rank (0-7)
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Creates a square from wire grid coordinates (row 0 = rank 8)
    #[inline]
    pub const fn from_grid(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square((7 - row) * 8 + col))
        } else {
            None
        }
    }

    /// Returns the file (0-7, where 0 = a-file)
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the rank (0-7, where 0 = rank 1)
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Wire grid row (0 = rank 8)
    #[inline]
    pub const fn grid_row(self) -> u8 {
        7 - self.rank()
    }

    /// Wire grid column (0 = a-file)
    #[inline]
    pub const fn grid_col(self) -> u8 {
        self.file()
    }

    /// Returns the raw index (0-63)
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Parse square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Self::from_coords(file, rank)
    }

    /// Offset the square by (file_delta, rank_delta), returning None if off the board
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Iterator over all 64 squares in index order (a1 first)
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Iterator over all 64 squares in wire grid order: row 0 (rank 8)
    /// first, columns left to right.
    pub fn grid_order() -> impl Iterator<Item = Square> {
        (0..8u8)
            .rev()
            .flat_map(|rank| (0..8u8).map(move |file| Square(rank * 8 + file)))
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{}{}", file, rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_coords() {
        assert_eq!(Square::A1.file(), 0);
        assert_eq!(Square::A1.rank(), 0);
        assert_eq!(Square::H8.file(), 7);
        assert_eq!(Square::H8.rank(), 7);
        assert_eq!(Square::E4.file(), 4);
        assert_eq!(Square::E4.rank(), 3);
        assert_eq!(Square::from_coords(8, 0), None);
    }

    #[test]
    fn test_grid_coords() {
        assert_eq!(Square::from_grid(0, 0), Some(Square::A8));
        assert_eq!(Square::from_grid(7, 4), Some(Square::E1));
        assert_eq!(Square::from_grid(6, 4), Some(Square::E2));
        assert_eq!(Square::from_grid(8, 0), None);
        assert_eq!(Square::E1.grid_row(), 7);
        assert_eq!(Square::E1.grid_col(), 4);
        assert_eq!(Square::H8.grid_row(), 0);
    }

    #[test]
    fn test_grid_order_starts_at_a8() {
        let order: Vec<_> = Square::grid_order().collect();
        assert_eq!(order.len(), 64);
        assert_eq!(order[0], Square::A8);
        assert_eq!(order[7], Square::H8);
        assert_eq!(order[8], Square::A7);
        assert_eq!(order[63], Square::H1);
    }

    #[test]
    fn test_square_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("e4"), Some(Square::E4));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(format!("{}", Square::H8), "h8");
    }

    #[test]
    fn test_square_offset() {
        assert_eq!(Square::E4.offset(1, 1), Some(Square::F5));
        assert_eq!(Square::E4.offset(-1, -1), Some(Square::D3));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::B1.offset(-2, 1), None);
    }
}
