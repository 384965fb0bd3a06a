//! Saved positions: the board rows plus the side to move.
//!
//! Snapshots are taken from a started [`Game`] and restored onto a fresh one.
//! The JSON form spells pieces as `"empty"`, `"black"` and `"white"`:
//!
//! ```json
//! {"turn":"black","rows":[["black","white"],["white","empty","black"],["black","white"]]}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::game::Game;
use crate::piece::{Color, Piece};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: Color,
    pub rows: Vec<Vec<Piece>>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| GameError::argument(format!("cannot encode snapshot: {e}")))
    }

    /// Decode a snapshot. Missing or `null` cells are rejected here; the
    /// board shape is checked when the snapshot is restored.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| GameError::argument(format!("malformed snapshot: {e}")))
    }
}

impl Game {
    /// Capture the current board and side to move.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            turn: self.current_turn()?,
            rows: self.copy_board()?,
        })
    }

    /// Restore a snapshot onto this unstarted game.
    pub fn resume(&mut self, snapshot: Snapshot) -> Result<()> {
        self.restore(snapshot.rows, snapshot.turn)
    }
}
