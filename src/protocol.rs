//! Line-based text protocol for driving the engine from another program.
//!
//! The protocol follows the conventions of the Go Text Protocol: one command
//! per line, an optional numeric id in front, `#` starts a comment. Each
//! response starts with `=` on success or `?` on failure, echoes the id, and
//! is terminated by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Replace the game with an unstarted one of that size
//! - `clear_board` - Start a fresh game at the current size
//! - `play <color> <row> <col>` / `play <color> pass`
//! - `genmove <color>` - Let the engine strategy choose and play a move
//! - `showboard` - Textual rendering of the board
//! - `score` - Piece counts, `black <n> white <m>`
//! - `game_over` - `true` or `false`
//! - `legal_moves <color>` - Legal cells as `row,col`, row-major
//! - `strategy <name>` - Switch the engine strategy (`capture-max`,
//!   `first-opening`, `go-for-corners`, `avoid-near-corner`, `random`)
//!
//! ## Example
//!
//! ```
//! use hex_reversi::protocol::ProtocolEngine;
//!
//! let mut engine = ProtocolEngine::new(4).unwrap();
//! let mut out = Vec::new();
//! engine.run("1 genmove black\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "=1 1 2\n\n");
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::coord::Coord;
use crate::error::Result;
use crate::game::Game;
use crate::piece::Color;
use crate::strategy::{Decision, StrategyKind};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "game_over",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "showboard",
    "strategy",
    "version",
];

/// Protocol session state.
pub struct ProtocolEngine {
    game: Game,
    strategy: StrategyKind,
    /// Seed handed to the random strategy.
    seed: u64,
}

impl ProtocolEngine {
    /// Create an engine with a started game of edge length `size`.
    pub fn new(size: usize) -> Result<Self> {
        let mut game = Game::new(size)?;
        game.start_game()?;
        Ok(Self::with_game(game))
    }

    /// Drive an existing game, e.g. one resumed from a snapshot.
    pub fn with_game(game: Game) -> Self {
        Self {
            game,
            strategy: StrategyKind::CaptureMax,
            seed: 0,
        }
    }

    pub fn with_strategy(mut self, strategy: StrategyKind, seed: u64) -> Self {
        self.strategy = strategy;
        self.seed = seed;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(%command, ?args, "command");
            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "command failed");
            }

            write!(output, "{}\n\n", Self::format_response(success, id, &message))?;
            output.flush()?;

            if command == "quit" {
                info!("quit requested");
                break;
            }
        }
        Ok(())
    }

    /// Run the command loop on stdin and stdout.
    pub fn run_stdio(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        self.run(stdin.lock(), io::stdout().lock())
    }

    /// `=id message` or `?id message`. Multi-line messages start on the line
    /// after the status.
    fn format_response(success: bool, id: Option<u32>, message: &str) -> String {
        let prefix = if success { '=' } else { '?' };
        let id_str = id.map(|i| i.to_string()).unwrap_or_default();
        let separator = if message.is_empty() || message.starts_with('\n') {
            ""
        } else {
            " "
        };
        format!("{prefix}{id_str}{separator}{}", message.trim_end())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(size) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(size) = size.parse::<usize>() else {
                    return (false, "invalid size".to_string());
                };
                match Game::new(size) {
                    Ok(game) => {
                        self.game = game;
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "clear_board" => {
                let fresh = Game::new(self.game.size()).and_then(|mut game| {
                    game.start_game()?;
                    Ok(game)
                });
                match fresh {
                    Ok(game) => {
                        self.game = game;
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let color = match self.color_on_turn(args[0]) {
                    Ok(color) => color,
                    Err(message) => return (false, message),
                };

                if args[1].eq_ignore_ascii_case("pass") {
                    return match self.game.pass_turn() {
                        Ok(()) => (true, String::new()),
                        Err(e) => (false, e.to_string()),
                    };
                }

                let coord = match args[1..].join(" ").parse::<Coord>() {
                    Ok(coord) => coord,
                    Err(e) => return (false, e.to_string()),
                };
                match self.game.make_move(coord) {
                    Ok(flips) => {
                        debug!(%color, %coord, flips, "played");
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let color = match self.color_on_turn(name) {
                    Ok(color) => color,
                    Err(message) => return (false, message),
                };
                match self.genmove(color) {
                    Ok(decision) => (true, decision.to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => match self.game.render() {
                Ok(board) => (true, format!("\n{}", board.trim_end())),
                Err(e) => (false, e.to_string()),
            },

            "score" => {
                let scores = self
                    .game
                    .score(Color::Black)
                    .and_then(|black| Ok((black, self.game.score(Color::White)?)));
                match scores {
                    Ok((black, white)) => (true, format!("black {black} white {white}")),
                    Err(e) => (false, e.to_string()),
                }
            }

            "game_over" => match self.game.is_game_over() {
                Ok(over) => (true, over.to_string()),
                Err(e) => (false, e.to_string()),
            },

            "legal_moves" => {
                let Some(color) = args.first().and_then(|s| Color::parse(s)) else {
                    return (false, "invalid color".to_string());
                };
                match self.game.legal_moves(color) {
                    Ok(moves) => {
                        let moves: Vec<String> = moves.iter().map(Coord::to_string).collect();
                        (true, moves.join(" "))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "strategy" => {
                let Some(kind) = args.first().and_then(|s| StrategyKind::parse(s)) else {
                    return (false, "unknown strategy".to_string());
                };
                self.strategy = kind;
                (true, String::new())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Parse `name` as a color and check that it is that color's turn.
    fn color_on_turn(&self, name: &str) -> std::result::Result<Color, String> {
        let color = Color::parse(name).ok_or_else(|| format!("invalid color '{name}'"))?;
        let turn = self.game.current_turn().map_err(|e| e.to_string())?;
        if color != turn {
            return Err(format!("it is {turn}'s turn, not {color}'s"));
        }
        Ok(color)
    }

    fn genmove(&mut self, color: Color) -> Result<Decision> {
        let strategy = self.strategy.build(self.seed);
        let decision = strategy.choose_move(self.game.board()?, color);
        match decision {
            Decision::Move(coord) => {
                self.game.make_move(coord)?;
            }
            Decision::Pass => self.game.pass_turn()?,
        }
        debug!(%color, %decision, strategy = strategy.name(), "genmove");
        Ok(decision)
    }
}
