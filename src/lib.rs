//! Hex-Reversi: Reversi played on a hexagonal board.
//!
//! The board is a hexagon of cells with edge length `size`, stored as
//! `2 * size - 1` rows whose widths grow by one down to the middle row and
//! shrink again below it. Placing a piece flips every straight run of
//! opponent pieces that ends in one of the mover's pieces, in any of the six
//! hex directions.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, glyphs and engine identity
//! - [`coord`] - Cell coordinates, hex directions and cube coordinates
//! - [`piece`] - Player colors and cell contents
//! - [`board`] - Board geometry, move legality and flipping
//! - [`game`] - Game lifecycle: turns, passes, scores and game over
//! - [`registry`] - Two-seat player registry
//! - [`observer`] - Turn-change listeners
//! - [`strategy`] - Computer move selection
//! - [`playout`] - Strategy-vs-strategy matches
//! - [`snapshot`] - Saving and resuming positions as JSON
//! - [`protocol`] - Line-based text protocol
//! - [`error`] - Error type shared by the crate
//!
//! ## Example
//!
//! ```
//! use hex_reversi::{Coord, Color, Game};
//!
//! let mut game = Game::new(4).unwrap();
//! game.start_game().unwrap();
//!
//! // Black opens; the move flips one white piece.
//! assert_eq!(game.make_move(Coord::new(1, 2)).unwrap(), 1);
//! assert_eq!(game.current_turn().unwrap(), Color::White);
//! assert_eq!(game.score(Color::Black).unwrap(), 5);
//! ```

pub mod board;
pub mod constants;
pub mod coord;
pub mod error;
pub mod game;
pub mod observer;
pub mod piece;
pub mod playout;
pub mod protocol;
pub mod registry;
pub mod snapshot;
pub mod strategy;

pub use board::Board;
pub use coord::{Coord, Direction};
pub use error::{GameError, Result};
pub use game::{Game, GameStatus};
pub use piece::{Color, Piece};
