//! Line topology of the Dama board
//!
//! Orthogonal neighbours are always connected. Diagonal neighbours are only
//! connected between a "center" square (odd row, odd col) and a "corner"
//! square (even row, even col), which reproduces the diagonals drawn on the
//! traditional board. Every path check in the rules is built from
//! [`is_adjacent_step`].

use super::Pos;

/// All 8 step directions as (row delta, col delta)
pub const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),   // Down
    (-1, 0),  // Up
    (0, 1),   // Right
    (0, -1),  // Left
    (1, 1),   // Diagonal SE
    (1, -1),  // Diagonal SW
    (-1, 1),  // Diagonal NE
    (-1, -1), // Diagonal NW
];

/// Whether a single step from `a` to `b` follows a drawn line.
///
/// Squares off the board are never adjacent to anything.
#[inline]
pub fn is_adjacent_step(a: Pos, b: Pos) -> bool {
    if !a.is_on_board() || !b.is_on_board() {
        return false;
    }
    let dr = (a.row as i8 - b.row as i8).abs();
    let dc = (a.col as i8 - b.col as i8).abs();
    match (dr, dc) {
        (1, 0) | (0, 1) => true,
        (1, 1) => (a.is_center() && b.is_corner()) || (a.is_corner() && b.is_center()),
        _ => false,
    }
}

/// Unit direction from `from` toward `to` if they share a straight line
/// (same row, same column or an exact diagonal).
#[inline]
pub fn line_direction(from: Pos, to: Pos) -> Option<(i8, i8)> {
    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;
    if (dr == 0 && dc == 0) || (dr != 0 && dc != 0 && dr.abs() != dc.abs()) {
        return None;
    }
    Some((dr.signum(), dc.signum()))
}

/// Whether the straight line from `from` to `to` is made only of valid steps
/// and every square after `from` satisfies `is_free`.
pub fn is_open_line(from: Pos, to: Pos, is_free: impl Fn(Pos) -> bool) -> bool {
    let Some((dr, dc)) = line_direction(from, to) else {
        return false;
    };
    let mut cur = from;
    while cur != to {
        let Some(next) = cur.offset(dr, dc) else {
            return false;
        };
        if !is_adjacent_step(cur, next) || !is_free(next) {
            return false;
        }
        cur = next;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthogonal_always_adjacent() {
        assert!(is_adjacent_step(Pos::new(0, 1), Pos::new(1, 1)));
        assert!(is_adjacent_step(Pos::new(4, 4), Pos::new(4, 5)));
        assert!(is_adjacent_step(Pos::new(7, 2), Pos::new(6, 2)));
    }

    #[test]
    fn test_diagonal_requires_center_corner_pair() {
        // corner (2,2) <-> center (3,3)
        assert!(is_adjacent_step(Pos::new(2, 2), Pos::new(3, 3)));
        assert!(is_adjacent_step(Pos::new(3, 3), Pos::new(2, 4)));
        // (2,3) is neither corner nor center
        assert!(!is_adjacent_step(Pos::new(2, 3), Pos::new(3, 4)));
        assert!(!is_adjacent_step(Pos::new(1, 2), Pos::new(2, 1)));
    }

    #[test]
    fn test_non_neighbours_rejected() {
        assert!(!is_adjacent_step(Pos::new(0, 0), Pos::new(0, 2)));
        assert!(!is_adjacent_step(Pos::new(0, 0), Pos::new(0, 0)));
        assert!(!is_adjacent_step(Pos::new(0, 0), Pos::new(2, 2)));
    }

    #[test]
    fn test_off_board_rejected() {
        let outside = Pos { row: 9, col: 0 };
        assert!(!is_adjacent_step(Pos::new(8, 0), outside));
        assert!(!is_adjacent_step(outside, Pos::new(8, 0)));
    }

    #[test]
    fn test_open_line_diagonal() {
        // (0,0) -> (4,4) alternates corner/center the whole way
        assert!(is_open_line(Pos::new(0, 0), Pos::new(4, 4), |_| true));
        // (0,1) -> (2,3) starts on a square with no diagonals
        assert!(!is_open_line(Pos::new(0, 1), Pos::new(2, 3), |_| true));
    }

    #[test]
    fn test_open_line_blocked() {
        let blocker = Pos::new(0, 3);
        assert!(!is_open_line(Pos::new(0, 0), Pos::new(0, 5), |p| p != blocker));
        assert!(is_open_line(Pos::new(0, 0), Pos::new(0, 2), |p| p != blocker));
    }

    #[test]
    fn test_line_direction() {
        assert_eq!(line_direction(Pos::new(4, 4), Pos::new(1, 1)), Some((-1, -1)));
        assert_eq!(line_direction(Pos::new(4, 4), Pos::new(4, 8)), Some((0, 1)));
        assert_eq!(line_direction(Pos::new(4, 4), Pos::new(5, 6)), None);
        assert_eq!(line_direction(Pos::new(4, 4), Pos::new(4, 4)), None);
    }
}
