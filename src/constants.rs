//! Constants for board geometry, engine identity, and protocol defaults.
//!
//! The board edge length is a runtime parameter (see [`crate::game::Game::new`]),
//! so only its bounds and the CLI default live here.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest edge length that yields a board with room for the opening pieces.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest accepted edge length. A board this size has 12097 cells.
pub const MAX_BOARD_SIZE: usize = 64;

/// Edge length used when none is given on the command line.
pub const DEFAULT_BOARD_SIZE: usize = 6;

/// Number of neighbors of a hex cell.
pub const NUM_DIRECTIONS: usize = 6;

/// Number of pieces placed by the canonical opening.
pub const OPENING_PIECES: usize = 6;

// =============================================================================
// Text Rendering
// =============================================================================

/// Glyph for a black piece.
pub const GLYPH_BLACK: char = 'X';

/// Glyph for a white piece.
pub const GLYPH_WHITE: char = '0';

/// Glyph for an empty cell.
pub const GLYPH_EMPTY: char = '_';

// =============================================================================
// Engine Identity
// =============================================================================

/// Name reported by the text protocol.
pub const ENGINE_NAME: &str = "hex-reversi";

/// Version of the line protocol spoken by [`crate::protocol`].
pub const PROTOCOL_VERSION: u32 = 1;

/// Default cap on decisions in a self-play match.
pub const DEFAULT_MAX_TURNS: usize = 1000;
