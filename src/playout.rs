//! Strategy-vs-strategy matches.
//!
//! A match asks the strategy for the side to move, applies its decision to
//! the game, and repeats until the game is over or the turn cap is reached.

use tracing::{debug, info};

use crate::error::Result;
use crate::game::Game;
use crate::piece::Color;
use crate::strategy::{Decision, Strategy};

/// Everything that happened in a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    /// Decisions in play order, tagged with the color that made them.
    pub decisions: Vec<(Color, Decision)>,
    pub black_score: usize,
    pub white_score: usize,
    /// Whether the game reached its end rather than the turn cap.
    pub finished: bool,
}

impl MatchRecord {
    /// The color with more pieces, if the game finished and was not a tie.
    pub fn winner(&self) -> Option<Color> {
        if !self.finished || self.black_score == self.white_score {
            return None;
        }
        Some(if self.black_score > self.white_score {
            Color::Black
        } else {
            Color::White
        })
    }

    pub fn moves_played(&self) -> usize {
        self.decisions
            .iter()
            .filter(|(_, decision)| matches!(decision, Decision::Move(_)))
            .count()
    }
}

/// Play `game` out between two strategies.
///
/// The game must already be started (or restored). Stops after `max_turns`
/// decisions even if the game is not over.
pub fn play_out(
    game: &mut Game,
    black: &dyn Strategy,
    white: &dyn Strategy,
    max_turns: usize,
) -> Result<MatchRecord> {
    let mut decisions = Vec::new();

    while !game.is_game_over()? && decisions.len() < max_turns {
        let color = game.current_turn()?;
        let strategy = match color {
            Color::Black => black,
            Color::White => white,
        };

        let decision = strategy.choose_move(game.board()?, color);
        match decision {
            Decision::Move(coord) => {
                let flips = game.make_move(coord)?;
                debug!(%color, %coord, flips, strategy = strategy.name(), "move");
            }
            Decision::Pass => {
                game.pass_turn()?;
                debug!(%color, strategy = strategy.name(), "pass");
            }
        }
        decisions.push((color, decision));
    }

    let record = MatchRecord {
        decisions,
        black_score: game.score(Color::Black)?,
        white_score: game.score(Color::White)?,
        finished: game.is_game_over()?,
    };
    info!(
        black = record.black_score,
        white = record.white_score,
        turns = record.decisions.len(),
        finished = record.finished,
        "match finished"
    );
    Ok(record)
}
