use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{GLYPH_BLACK, GLYPH_EMPTY, GLYPH_WHITE};
use crate::error::GameError;

/// A player color. The side to move is always one of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }

    /// Parse a color name as used by the text protocol (`b`, `black`, `w`, `white`).
    pub fn parse(s: &str) -> Option<Color> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of a single board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    #[default]
    Empty,
    Black,
    White,
}

impl Piece {
    pub const fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    pub const fn glyph(self) -> char {
        match self {
            Piece::Empty => GLYPH_EMPTY,
            Piece::Black => GLYPH_BLACK,
            Piece::White => GLYPH_WHITE,
        }
    }
}

impl From<Color> for Piece {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Piece::Black,
            Color::White => Piece::White,
        }
    }
}

impl TryFrom<Piece> for Color {
    type Error = GameError;

    fn try_from(piece: Piece) -> Result<Self, Self::Error> {
        match piece {
            Piece::Black => Ok(Color::Black),
            Piece::White => Ok(Color::White),
            Piece::Empty => Err(GameError::argument("empty is not a player color")),
        }
    }
}
