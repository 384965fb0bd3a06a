//! Cell coordinates and hex adjacency on the jagged row layout.
//!
//! The board is stored as rows of varying width rather than in a native hex
//! coordinate system. Row 0 is the top row and column 0 is the leftmost cell
//! of each row:
//!
//! ```text
//!   rows    cols
//!    0       0 1
//!    1      0 1 2
//!    2       0 1
//! ```
//!
//! Rows above the midline are shifted half a cell right of the row below them,
//! rows below it half a cell left, so the column delta of a diagonal step
//! depends on which side of the midline the step starts from.
//!
//! [`Cube`] converts to and from cube coordinates for callers that speak that
//! convention; the engine itself only ever uses [`Coord`].

use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// A cell position `(row, col)`. Validity depends on the board it is used with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell one step away in `dir` on a board with `height` rows.
    ///
    /// Returns `None` when the step would leave the board through the top or
    /// left edge. The caller is responsible for the bottom and right edges,
    /// which depend on row widths.
    pub fn neighbor(self, dir: Direction, height: usize) -> Option<Coord> {
        let mid = height / 2;
        let Coord { row, col } = self;

        let (row, col) = match dir {
            Direction::Left => (row, col.checked_sub(1)?),
            Direction::UpLeft => {
                let col = if row <= mid { col.checked_sub(1)? } else { col };
                (row.checked_sub(1)?, col)
            }
            Direction::UpRight => {
                let col = if row > mid { col + 1 } else { col };
                (row.checked_sub(1)?, col)
            }
            Direction::Right => (row, col + 1),
            Direction::DownRight => {
                let col = if row < mid { col + 1 } else { col };
                (row + 1, col)
            }
            Direction::DownLeft => {
                let col = if row >= mid { col.checked_sub(1)? } else { col };
                (row + 1, col)
            }
        };

        Some(Coord { row, col })
    }

    /// Convert to cube coordinates on a board with `height` rows.
    pub fn to_cube(self, height: usize) -> Cube {
        let offset = ((height - 1) / 2) as i32;
        let row = self.row as i32;
        let col = self.col as i32;

        let r = row - offset;
        if row > offset {
            let q = col - offset;
            Cube { q, r, s: -(r + q) }
        } else {
            let s = offset - col;
            Cube { q: -(r + s), r, s }
        }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Parses `"row,col"` or `"row col"`.
impl FromStr for Coord {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());

        let mut next_index = |name: &str| -> Result<usize, GameError> {
            let part = parts
                .next()
                .ok_or_else(|| GameError::argument(format!("missing {name} in '{s}'")))?;
            part.parse::<usize>()
                .map_err(|_| GameError::argument(format!("invalid {name} '{part}'")))
        };

        let row = next_index("row")?;
        let col = next_index("column")?;
        if parts.next().is_some() {
            return Err(GameError::argument(format!("trailing input in '{s}'")));
        }
        Ok(Coord { row, col })
    }
}

/// The six hex directions, numbered clockwise starting at "directly left".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = 0,
    UpLeft = 1,
    UpRight = 2,
    Right = 3,
    DownRight = 4,
    DownLeft = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::DownLeft,
    ];
}

/// Cube coordinates, `q + r + s == 0`, centered on the middle cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cube {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Cube {
    /// Convert back to a row/column position on a board with `height` rows.
    ///
    /// Returns `None` for malformed cubes or positions left of or above the
    /// array. Positions past the right or bottom edge are not rejected here.
    pub fn to_coord(self, height: usize) -> Option<Coord> {
        if self.q + self.r + self.s != 0 {
            return None;
        }
        let offset = ((height - 1) / 2) as i32;
        let row = self.r + offset;
        let col = if self.r > 0 {
            self.q + offset
        } else {
            offset - self.s
        };
        Some(Coord {
            row: row.try_into().ok()?,
            col: col.try_into().ok()?,
        })
    }
}
