//! The hex board: a jagged grid of pieces plus the legality and flip rules.
//!
//! A board with edge length `size` has `2 * size - 1` rows whose widths grow
//! from `size` to `2 * size - 1` at the middle row and shrink back to `size`.
//!
//! A placement for color `P` is legal when the cell is empty and, in at least
//! one of the six directions, a contiguous run of opposing pieces is closed by
//! a piece of color `P`. Every such run is flipped when the move is played.

use std::fmt;

use crate::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, NUM_DIRECTIONS, OPENING_PIECES};
use crate::coord::{Coord, Direction};
use crate::error::{GameError, Result};
use crate::piece::{Color, Piece};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: Vec<Vec<Piece>>,
}

/// Outcome of [`Board::play`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub legal: bool,
    /// Number of opposing pieces turned over.
    pub flips: usize,
}

impl MoveResult {
    const fn illegal() -> Self {
        MoveResult {
            legal: false,
            flips: 0,
        }
    }
}

/// Opening pieces as `(row, col)` offsets from `(size - 2, size - 2)`.
const OPENING: [(usize, usize, Piece); OPENING_PIECES] = [
    (0, 0, Piece::Black),
    (0, 1, Piece::White),
    (1, 0, Piece::White),
    (1, 2, Piece::Black),
    (2, 0, Piece::Black),
    (2, 1, Piece::White),
];

/// Width of `row` on a board with `height` rows.
const fn width_of(height: usize, row: usize) -> usize {
    height - row.abs_diff((height - 1) / 2)
}

impl Board {
    /// Number of rows of a board with edge length `size`, or an error if the
    /// size is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn height_for(size: usize) -> Result<usize> {
        if size < MIN_BOARD_SIZE {
            return Err(GameError::argument(format!(
                "board size {size} is below the minimum of {MIN_BOARD_SIZE}"
            )));
        }
        size.checked_mul(2)
            .filter(|_| size <= MAX_BOARD_SIZE)
            .map(|double| double - 1)
            .ok_or_else(|| {
                GameError::argument(format!(
                    "board size {size} is above the maximum of {MAX_BOARD_SIZE}"
                ))
            })
    }

    /// An empty board with edge length `size`.
    pub fn new(size: usize) -> Result<Self> {
        let height = Self::height_for(size)?;
        let rows = (0..height)
            .map(|row| vec![Piece::Empty; width_of(height, row)])
            .collect();
        Ok(Self { rows })
    }

    /// A board with edge length `size` holding the six opening pieces,
    /// alternating colors around the center cell.
    pub fn with_opening(size: usize) -> Result<Self> {
        let mut board = Self::new(size)?;
        let origin = size - 2;
        for (row, col, piece) in OPENING {
            board.rows[origin + row][origin + col] = piece;
        }
        Ok(board)
    }

    /// Build a board from externally supplied rows, checking the hex shape.
    pub fn from_rows(rows: Vec<Vec<Piece>>) -> Result<Self> {
        let height = rows.len();
        if height % 2 == 0 {
            return Err(GameError::argument(format!(
                "board must have an odd number of rows, got {height}"
            )));
        }
        if height < 2 * MIN_BOARD_SIZE - 1 {
            return Err(GameError::argument(format!(
                "board must have at least {} rows, got {height}",
                2 * MIN_BOARD_SIZE - 1
            )));
        }
        if height > 2 * MAX_BOARD_SIZE - 1 {
            return Err(GameError::argument(format!(
                "board must have at most {} rows, got {height}",
                2 * MAX_BOARD_SIZE - 1
            )));
        }
        for (row, cells) in rows.iter().enumerate() {
            let expected = width_of(height, row);
            if cells.len() != expected {
                return Err(GameError::argument(format!(
                    "row {row} has {} cells, expected {expected}",
                    cells.len()
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Edge length of the hexagon.
    pub fn size(&self) -> usize {
        (self.height() + 1) / 2
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn row_width(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(Vec::len)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.row_width(coord.row)
            .is_some_and(|width| coord.col < width)
    }

    /// The piece at `coord`, or `None` if it is off the board.
    pub fn get(&self, coord: Coord) -> Option<Piece> {
        self.rows.get(coord.row)?.get(coord.col).copied()
    }

    pub fn rows(&self) -> &[Vec<Piece>] {
        &self.rows
    }

    /// All cells in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| (0..cells.len()).map(move |col| Coord::new(row, col)))
    }

    /// The six corners of the hexagon, clockwise from the top-left.
    pub fn corners(&self) -> [Coord; 6] {
        let height = self.height();
        let mid = (height - 1) / 2;
        let edge = self.size() - 1;
        [
            Coord::new(0, 0),
            Coord::new(0, edge),
            Coord::new(mid, height - 1),
            Coord::new(height - 1, edge),
            Coord::new(height - 1, 0),
            Coord::new(mid, 0),
        ]
    }

    pub fn is_corner(&self, coord: Coord) -> bool {
        self.corners().contains(&coord)
    }

    /// Whether `coord` is a non-corner cell touching a corner.
    pub fn is_near_corner(&self, coord: Coord) -> bool {
        let height = self.height();
        self.contains(coord)
            && !self.is_corner(coord)
            && self.corners().into_iter().any(|corner| {
                Direction::ALL
                    .into_iter()
                    .any(|dir| corner.neighbor(dir, height) == Some(coord))
            })
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&cell| cell == piece)
            .count()
    }

    /// Distance from `from` to the nearest piece of `color` in `dir`.
    ///
    /// Returns `None` if the scan runs off the board or reaches an empty cell
    /// first. A depth of 1 means the neighbor already has `color`; anything
    /// larger means `depth - 1` opposing pieces lie in between.
    pub fn depth(&self, color: Color, from: Coord, dir: Direction) -> Option<usize> {
        let target = Piece::from(color);
        let height = self.height();
        let mut current = from;

        for depth in 1..height {
            current = current.neighbor(dir, height)?;
            match self.get(current)? {
                Piece::Empty => return None,
                piece if piece == target => return Some(depth),
                _ => {}
            }
        }
        None
    }

    /// Depth scans in every direction, indexed by direction number.
    fn depths(&self, color: Color, at: Coord) -> [Option<usize>; NUM_DIRECTIONS] {
        Direction::ALL.map(|dir| self.depth(color, at, dir))
    }

    /// Number of pieces `color` would flip by playing at `coord`.
    ///
    /// Zero for occupied or off-board cells and for empty cells that close no
    /// run, so a move is legal exactly when this is positive.
    pub fn capture_count(&self, color: Color, coord: Coord) -> usize {
        if self.get(coord) != Some(Piece::Empty) {
            return 0;
        }
        self.depths(color, coord)
            .into_iter()
            .flatten()
            .filter(|&depth| depth > 1)
            .map(|depth| depth - 1)
            .sum()
    }

    pub fn is_legal(&self, color: Color, coord: Coord) -> bool {
        if self.get(coord) != Some(Piece::Empty) {
            return false;
        }
        Direction::ALL
            .into_iter()
            .any(|dir| self.depth(color, coord, dir).is_some_and(|depth| depth > 1))
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.coords().any(|coord| self.is_legal(color, coord))
    }

    /// Legal placements for `color` in row-major order.
    pub fn legal_moves(&self, color: Color) -> Vec<Coord> {
        self.coords()
            .filter(|&coord| self.is_legal(color, coord))
            .collect()
    }

    /// Place a piece of `color` at `coord` and flip every closed run.
    ///
    /// The board is left untouched if the move is not legal.
    pub fn play(&mut self, color: Color, coord: Coord) -> MoveResult {
        if !self.is_legal(color, coord) {
            return MoveResult::illegal();
        }

        // All scans happen before the first write.
        let depths = self.depths(color, coord);
        let piece = Piece::from(color);
        let height = self.height();

        self.rows[coord.row][coord.col] = piece;

        let mut flips = 0;
        for (dir, depth) in Direction::ALL.into_iter().zip(depths) {
            let Some(depth) = depth.filter(|&depth| depth > 1) else {
                continue;
            };
            let mut current = coord;
            for _ in 0..depth {
                // Every cell up to `depth` was visited by the scan above.
                let Some(next) = current.neighbor(dir, height) else {
                    break;
                };
                current = next;
                self.rows[current.row][current.col] = piece;
            }
            flips += depth - 1;
        }

        MoveResult { legal: true, flips }
    }
}

/// Renders one line per row, centered with leading spaces: `X` for black,
/// `0` for white, `_` for empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let height = self.height();
        for cells in &self.rows {
            write!(f, "{:pad$}", "", pad = height - cells.len())?;
            for (col, cell) in cells.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
