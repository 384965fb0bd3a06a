//! Move selection for computer players.
//!
//! A [`Strategy`] looks at a board and a color and either names a cell to
//! play or asks to pass. Strategies only ever see `&Board`, so they cannot
//! change the game they advise on, and the same board always yields the same
//! answer.
//!
//! - [`CaptureMax`] flips as many pieces as possible this turn, preferring the
//!   row-major-first cell on ties.
//! - [`FirstOpening`] plays the row-major-first legal cell.
//! - [`GoForCorners`] takes a corner whenever one is legal.
//! - [`AvoidNearCorner`] stays off the cells that touch a corner.
//! - [`RandomMove`] picks uniformly among legal cells using a seeded RNG.

use std::fmt;

use clap::ValueEnum;

use crate::board::Board;
use crate::coord::Coord;
use crate::piece::Color;

/// What a strategy wants to do with its turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Move(Coord),
    Pass,
}

impl From<Option<Coord>> for Decision {
    fn from(coord: Option<Coord>) -> Self {
        coord.map_or(Decision::Pass, Decision::Move)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Move(coord) => write!(f, "{} {}", coord.row, coord.col),
            Decision::Pass => f.write_str("pass"),
        }
    }
}

pub trait Strategy {
    /// Choose a move for `color` on `board`. Returns [`Decision::Pass`]
    /// exactly when `color` has no legal placement.
    fn choose_move(&self, board: &Board, color: Color) -> Decision;

    fn name(&self) -> &'static str;
}

/// Maximize the number of pieces flipped this turn.
#[derive(Copy, Clone, Debug, Default)]
pub struct CaptureMax;

/// The legal cell among `candidates` that flips the most pieces. Ties go to
/// the candidate seen first.
fn most_captures(
    board: &Board,
    color: Color,
    candidates: impl IntoIterator<Item = Coord>,
) -> Option<Coord> {
    let mut best: Option<(Coord, usize)> = None;

    for coord in candidates {
        let flips = board.capture_count(color, coord);
        if flips == 0 {
            continue;
        }
        // Strictly greater, so ties keep the earlier cell.
        if best.is_none_or(|(_, most)| flips > most) {
            best = Some((coord, flips));
        }
    }

    best.map(|(coord, _)| coord)
}

impl Strategy for CaptureMax {
    fn choose_move(&self, board: &Board, color: Color) -> Decision {
        most_captures(board, color, board.coords()).into()
    }

    fn name(&self) -> &'static str {
        "capture-max"
    }
}

/// Play the first legal cell in row-major order.
#[derive(Copy, Clone, Debug, Default)]
pub struct FirstOpening;

impl Strategy for FirstOpening {
    fn choose_move(&self, board: &Board, color: Color) -> Decision {
        board
            .coords()
            .find(|&coord| board.is_legal(color, coord))
            .into()
    }

    fn name(&self) -> &'static str {
        "first-opening"
    }
}

/// Take the best-capturing legal corner; without one, play like
/// [`CaptureMax`].
#[derive(Copy, Clone, Debug, Default)]
pub struct GoForCorners;

impl Strategy for GoForCorners {
    fn choose_move(&self, board: &Board, color: Color) -> Decision {
        let mut corners = board.corners();
        corners.sort();
        most_captures(board, color, corners)
            .or_else(|| most_captures(board, color, board.coords()))
            .into()
    }

    fn name(&self) -> &'static str {
        "go-for-corners"
    }
}

/// Play like [`CaptureMax`] among cells that do not touch a corner, and only
/// fall back to those cells when nothing else is legal.
#[derive(Copy, Clone, Debug, Default)]
pub struct AvoidNearCorner;

impl Strategy for AvoidNearCorner {
    fn choose_move(&self, board: &Board, color: Color) -> Decision {
        let away = board.coords().filter(|&coord| !board.is_near_corner(coord));
        most_captures(board, color, away)
            .or_else(|| most_captures(board, color, board.coords()))
            .into()
    }

    fn name(&self) -> &'static str {
        "avoid-near-corner"
    }
}

/// Pick a legal cell at random.
///
/// The generator is seeded from `seed`, the board contents and the color, so
/// a given position always produces the same choice. The mixing uses only
/// `fastrand` draws, never `std`'s unspecified hasher.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomMove {
    pub seed: u64,
}

impl RandomMove {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, board: &Board, color: Color) -> fastrand::Rng {
        let mut mixer = fastrand::Rng::with_seed(self.seed ^ color as u64);
        let key = board
            .rows()
            .iter()
            .flatten()
            .fold(mixer.u64(..), |key, &cell| {
                key.rotate_left(7) ^ (cell as u64).wrapping_mul(mixer.u64(..))
            });
        fastrand::Rng::with_seed(key)
    }
}

impl Strategy for RandomMove {
    fn choose_move(&self, board: &Board, color: Color) -> Decision {
        let moves = board.legal_moves(color);
        if moves.is_empty() {
            return Decision::Pass;
        }
        let mut rng = self.rng_for(board, color);
        Decision::Move(moves[rng.usize(..moves.len())])
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Strategy names accepted on the command line and by the text protocol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    CaptureMax,
    FirstOpening,
    GoForCorners,
    AvoidNearCorner,
    Random,
}

impl StrategyKind {
    /// Build the strategy; `seed` is only used by [`StrategyKind::Random`].
    pub fn build(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::CaptureMax => Box::new(CaptureMax),
            StrategyKind::FirstOpening => Box::new(FirstOpening),
            StrategyKind::GoForCorners => Box::new(GoForCorners),
            StrategyKind::AvoidNearCorner => Box::new(AvoidNearCorner),
            StrategyKind::Random => Box::new(RandomMove::new(seed)),
        }
    }

    pub fn parse(s: &str) -> Option<StrategyKind> {
        <StrategyKind as ValueEnum>::from_str(s, true).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opening(size: usize) -> Board {
        Board::with_opening(size).unwrap()
    }

    #[test]
    fn test_capture_max_tie_breaks_row_major() {
        let board = opening(4);
        assert_eq!(
            CaptureMax.choose_move(&board, Color::Black),
            Decision::Move(Coord::new(1, 2))
        );
    }

    #[test]
    fn test_capture_max_prefers_more_flips() {
        let mut board = opening(4);
        board.play(Color::Black, Coord::new(1, 2));
        board.play(Color::White, Coord::new(0, 2));

        // (2,1) flips two pieces; earlier cells flip at most one.
        assert_eq!(board.capture_count(Color::Black, Coord::new(2, 1)), 2);
        assert_eq!(
            CaptureMax.choose_move(&board, Color::Black),
            Decision::Move(Coord::new(2, 1))
        );
    }

    #[test]
    fn test_pass_when_no_moves() {
        let board = opening(2);
        assert_eq!(CaptureMax.choose_move(&board, Color::Black), Decision::Pass);
        assert_eq!(FirstOpening.choose_move(&board, Color::White), Decision::Pass);
        assert_eq!(RandomMove::new(3).choose_move(&board, Color::Black), Decision::Pass);
        assert_eq!(GoForCorners.choose_move(&board, Color::Black), Decision::Pass);
        assert_eq!(AvoidNearCorner.choose_move(&board, Color::White), Decision::Pass);
    }

    #[test]
    fn test_first_opening() {
        let board = opening(3);
        assert_eq!(
            FirstOpening.choose_move(&board, Color::Black),
            Decision::Move(Coord::new(0, 1))
        );
    }

    /// Size 3 board where black can take the (0,0) corner for one flip, the
    /// near-corner cell (1,0) for two, or the center (2,2) for one.
    fn corner_position() -> Board {
        use crate::piece::Piece::{Black as B, Empty as E, White as W};
        Board::from_rows(vec![
            vec![E, W, B],
            vec![E, W, W, B],
            vec![E, E, E, E, E],
            vec![E, E, E, E],
            vec![E, E, E],
        ])
        .unwrap()
    }

    #[test]
    fn test_corner_position_moves() {
        let board = corner_position();
        assert_eq!(
            board.legal_moves(Color::Black),
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 2)]
        );
        assert_eq!(
            CaptureMax.choose_move(&board, Color::Black),
            Decision::Move(Coord::new(1, 0))
        );
        assert_eq!(CaptureMax.choose_move(&board, Color::White), Decision::Pass);
    }

    #[test]
    fn test_go_for_corners_takes_corner() {
        let board = corner_position();
        assert_eq!(
            GoForCorners.choose_move(&board, Color::Black),
            Decision::Move(Coord::new(0, 0))
        );
    }

    #[test]
    fn test_go_for_corners_falls_back_to_captures() {
        let board = opening(4);
        assert_eq!(
            GoForCorners.choose_move(&board, Color::Black),
            CaptureMax.choose_move(&board, Color::Black)
        );
    }

    #[test]
    fn test_avoid_near_corner_skips_near_cells() {
        let board = corner_position();
        assert!(board.is_near_corner(Coord::new(1, 0)));
        assert_eq!(
            AvoidNearCorner.choose_move(&board, Color::Black),
            Decision::Move(Coord::new(0, 0))
        );
    }

    #[test]
    fn test_avoid_near_corner_falls_back_when_boxed_in() {
        // Every opening move on size 3 touches a corner.
        let board = opening(3);
        assert!(
            board
                .legal_moves(Color::Black)
                .into_iter()
                .all(|coord| board.is_near_corner(coord))
        );
        assert_eq!(
            AvoidNearCorner.choose_move(&board, Color::Black),
            Decision::Move(Coord::new(0, 1))
        );
    }

    #[test]
    fn test_random_is_legal_and_repeatable() {
        let board = opening(5);
        let mut seen = Vec::new();
        for seed in 0..20 {
            let strategy = RandomMove::new(seed);
            let first = strategy.choose_move(&board, Color::White);
            let Decision::Move(coord) = first else {
                panic!("opening has moves");
            };
            assert!(board.is_legal(Color::White, coord));
            assert_eq!(strategy.choose_move(&board, Color::White), first);
            if !seen.contains(&coord) {
                seen.push(coord);
            }
        }
        assert!(seen.len() > 1, "every seed chose {seen:?}");
    }

    #[test]
    fn test_strategies_never_choose_illegal_cells() {
        let mut board = opening(5);
        let mut color = Color::Black;
        let strategies: [&dyn Strategy; 5] = [
            &CaptureMax,
            &FirstOpening,
            &GoForCorners,
            &AvoidNearCorner,
            &RandomMove::new(9),
        ];

        for turn in 0..60 {
            for strategy in strategies {
                match strategy.choose_move(&board, color) {
                    Decision::Move(coord) => assert!(board.is_legal(color, coord)),
                    Decision::Pass => assert!(!board.has_legal_move(color)),
                }
            }
            let picked = strategies[turn % strategies.len()].choose_move(&board, color);
            if let Decision::Move(coord) = picked {
                assert!(board.play(color, coord).legal);
            }
            color = color.opponent();
        }
    }

    #[test]
    fn test_strategy_kind_parse() {
        assert_eq!(StrategyKind::parse("capture-max"), Some(StrategyKind::CaptureMax));
        assert_eq!(StrategyKind::parse("Random"), Some(StrategyKind::Random));
        assert_eq!(StrategyKind::parse("go-for-corners"), Some(StrategyKind::GoForCorners));
        assert_eq!(
            StrategyKind::parse("avoid-near-corner"),
            Some(StrategyKind::AvoidNearCorner)
        );
        assert_eq!(StrategyKind::parse("minimax"), None);
        assert_eq!(StrategyKind::AvoidNearCorner.build(0).name(), "avoid-near-corner");
        assert_eq!(StrategyKind::FirstOpening.build(0).name(), "first-opening");
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(Decision::Move(Coord::new(3, 4)).to_string(), "3 4");
        assert_eq!(Decision::Pass.to_string(), "pass");
        assert_eq!(Decision::from(None), Decision::Pass);
    }
}
