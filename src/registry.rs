use std::fmt;

use crate::error::{GameError, Result};
use crate::piece::Color;

/// Opaque identity of a participant, as handed out by the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Assigns colors to at most two players: the first to register plays black,
/// the second white. There is no third slot.
#[derive(Clone, Debug)]
pub struct PlayerRegistry<P> {
    black: Option<P>,
    white: Option<P>,
}

impl<P> Default for PlayerRegistry<P> {
    fn default() -> Self {
        Self {
            black: None,
            white: None,
        }
    }
}

impl<P: PartialEq> PlayerRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `player`, returning the color it was given.
    pub fn register(&mut self, player: P) -> Result<Color> {
        if self.black.is_none() {
            self.black = Some(player);
            Ok(Color::Black)
        } else if self.white.is_none() {
            self.white = Some(player);
            Ok(Color::White)
        } else {
            Err(GameError::state("game already has two players"))
        }
    }

    pub fn color_of(&self, player: &P) -> Result<Color> {
        if self.black.as_ref() == Some(player) {
            Ok(Color::Black)
        } else if self.white.as_ref() == Some(player) {
            Ok(Color::White)
        } else {
            Err(GameError::argument("player is not registered in this game"))
        }
    }
}
