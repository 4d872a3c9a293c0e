//! Board representation for Dama

pub mod bitboard;
pub mod board;
pub mod geometry;


use serde::{Deserialize, Serialize};

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;
pub use geometry::{is_adjacent_step, is_open_line, DIRECTIONS};

/// Board size (9x9)
pub const BOARD_SIZE: usize = 9;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 81

/// The two sides of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// Get opponent side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Row delta of a forward step. Black advances toward row 8.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Side::Black => 1,
            Side::White => -1,
        }
    }

    /// The opponent's back row, where regular pieces promote
    #[inline]
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::Black => (BOARD_SIZE - 1) as u8,
            Side::White => 0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Black => f.write_str("Black"),
            Side::White => f.write_str("White"),
        }
    }
}

/// A piece. Its square is the board cell holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    /// Promoted piece with flying moves
    pub sultan: bool,
}

impl Piece {
    #[inline]
    pub const fn regular(side: Side) -> Self {
        Self { side, sultan: false }
    }

    #[inline]
    pub const fn sultan(side: Side) -> Self {
        Self { side, sultan: true }
    }
}

/// Square on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Checked constructor for untrusted coordinates
    #[inline]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if Self::is_valid(row, col) {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Whether both coordinates are in range. `Pos` fields are public, so
    /// anything built without `new` has to pass through here.
    #[inline]
    pub fn is_on_board(self) -> bool {
        Self::is_valid(self.row as i32, self.col as i32)
    }

    /// Neighbour one step away, if still on the board
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Pos> {
        Self::try_new(self.row as i32 + dr as i32, self.col as i32 + dc as i32)
    }

    /// Odd row and odd column
    #[inline]
    pub fn is_center(self) -> bool {
        self.row % 2 == 1 && self.col % 2 == 1
    }

    /// Even row and even column
    #[inline]
    pub fn is_corner(self) -> bool {
        self.row % 2 == 0 && self.col % 2 == 0
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
