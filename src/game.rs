//! Authoritative game state and the turn/pass/game-over state machine.
//!
//! A [`Game`] is created unstarted. [`Game::start_game`] lays out the opening
//! and hands the first turn to black; [`Game::restore`] instead resumes from a
//! supplied board. From then on the board only changes through
//! [`Game::make_move`], and every query is answered from the current board.
//!
//! The game is over once two passes happen in a row, or as soon as neither
//! color has a legal placement left. Both conditions are evaluated on demand.

use crate::board::Board;
use crate::coord::Coord;
use crate::error::{GameError, Result};
use crate::observer::{Listeners, TurnListener};
use crate::piece::{Color, Piece};
use crate::registry::{PlayerId, PlayerRegistry};

/// Where the game is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    ToMove(Color),
    GameOver,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::GameOver)
    }
}

/// A game of hex Reversi.
#[derive(Debug)]
pub struct Game {
    size: usize,
    /// `None` until the game is started or restored.
    board: Option<Board>,
    turn: Color,
    consecutive_passes: u8,
    players: PlayerRegistry<PlayerId>,
    listeners: Listeners,
}

impl Game {
    /// Create an unstarted game on a board with edge length `size`.
    pub fn new(size: usize) -> Result<Self> {
        Board::height_for(size)?;
        Ok(Self {
            size,
            board: None,
            turn: Color::Black,
            consecutive_passes: 0,
            players: PlayerRegistry::new(),
            listeners: Listeners::default(),
        })
    }

    /// Edge length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_started(&self) -> bool {
        self.board.is_some()
    }

    /// Lay out the opening pieces and give the first turn to black.
    pub fn start_game(&mut self) -> Result<()> {
        if self.is_started() {
            return Err(GameError::state("game has already started"));
        }
        self.board = Some(Board::with_opening(self.size)?);
        self.turn = Color::Black;
        self.consecutive_passes = 0;
        self.notify();
        Ok(())
    }

    /// Resume from an externally supplied board with `turn` to move.
    ///
    /// Listeners are not notified; the caller decides when play continues.
    pub fn restore(&mut self, rows: Vec<Vec<Piece>>, turn: Color) -> Result<()> {
        if self.is_started() {
            return Err(GameError::state("cannot restore onto a started game"));
        }
        let board = Board::from_rows(rows)?;
        self.size = board.size();
        self.board = Some(board);
        self.turn = turn;
        self.consecutive_passes = 0;
        Ok(())
    }

    /// Place a piece for the side to move, flip the captured runs and hand
    /// the turn over. Returns the number of pieces flipped.
    pub fn make_move(&mut self, coord: Coord) -> Result<usize> {
        self.check_in_progress()?;
        let turn = self.turn;
        let board = self.board_mut()?;
        if !board.contains(coord) {
            return Err(GameError::argument(format!(
                "cell {coord} is outside the board"
            )));
        }

        let result = board.play(turn, coord);
        if !result.legal {
            return Err(GameError::state(format!(
                "{turn} cannot play at {coord}"
            )));
        }

        self.turn = turn.opponent();
        self.consecutive_passes = 0;
        self.notify();
        Ok(result.flips)
    }

    /// Give up the turn without placing a piece.
    pub fn pass_turn(&mut self) -> Result<()> {
        self.check_in_progress()?;
        self.turn = self.turn.opponent();
        self.consecutive_passes += 1;
        self.notify();
        Ok(())
    }

    pub fn add_listener(&mut self, listener: Box<dyn TurnListener>) {
        self.listeners.push(listener);
    }

    /// Seat a player; the first gets black, the second white.
    pub fn add_player(&mut self, player: PlayerId) -> Result<Color> {
        self.players.register(player)
    }

    pub fn color_of(&self, player: PlayerId) -> Result<Color> {
        self.players.color_of(&player)
    }

    pub fn status(&self) -> GameStatus {
        match &self.board {
            None => GameStatus::NotStarted,
            Some(board) if self.is_over_on(board) => GameStatus::GameOver,
            Some(_) => GameStatus::ToMove(self.turn),
        }
    }

    /// Read-only view of the board, for strategies and renderers.
    pub fn board(&self) -> Result<&Board> {
        self.board
            .as_ref()
            .ok_or_else(|| GameError::state("game has not started"))
    }

    pub fn current_turn(&self) -> Result<Color> {
        self.board()?;
        Ok(self.turn)
    }

    /// Passes since the last placement.
    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn piece_at(&self, coord: Coord) -> Result<Piece> {
        self.board()?
            .get(coord)
            .ok_or_else(|| GameError::argument(format!("cell {coord} is outside the board")))
    }

    pub fn is_cell_empty(&self, coord: Coord) -> Result<bool> {
        Ok(self.piece_at(coord)?.is_empty())
    }

    pub fn is_move_legal(&self, color: Color, coord: Coord) -> Result<bool> {
        self.piece_at(coord)?;
        Ok(self.board()?.is_legal(color, coord))
    }

    pub fn has_legal_move(&self, color: Color) -> Result<bool> {
        Ok(self.board()?.has_legal_move(color))
    }

    pub fn legal_moves(&self, color: Color) -> Result<Vec<Coord>> {
        Ok(self.board()?.legal_moves(color))
    }

    /// Number of pieces of `color` on the board.
    pub fn score(&self, color: Color) -> Result<usize> {
        Ok(self.board()?.count(color.into()))
    }

    pub fn height(&self) -> Result<usize> {
        Ok(self.board()?.height())
    }

    pub fn row_width(&self, row: usize) -> Result<usize> {
        self.board()?
            .row_width(row)
            .ok_or_else(|| GameError::argument(format!("row {row} is outside the board")))
    }

    pub fn is_game_over(&self) -> Result<bool> {
        Ok(self.is_over_on(self.board()?))
    }

    /// A copy of the rows, suitable for [`Game::restore`].
    pub fn copy_board(&self) -> Result<Vec<Vec<Piece>>> {
        Ok(self.board()?.rows().to_vec())
    }

    /// Textual rendering of the board, one line per row.
    pub fn render(&self) -> Result<String> {
        Ok(self.board()?.to_string())
    }

    fn is_over_on(&self, board: &Board) -> bool {
        self.consecutive_passes >= 2
            || !(board.has_legal_move(Color::Black) || board.has_legal_move(Color::White))
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.is_game_over()? {
            return Err(GameError::state("game is over"));
        }
        Ok(())
    }

    fn board_mut(&mut self) -> Result<&mut Board> {
        self.board
            .as_mut()
            .ok_or_else(|| GameError::state("game has not started"))
    }

    fn notify(&self) {
        self.listeners.notify(self);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::constants::MAX_BOARD_SIZE;

    fn started(size: usize) -> Game {
        let mut game = Game::new(size).unwrap();
        game.start_game().unwrap();
        game
    }

    #[test]
    fn test_new_rejects_small_sizes() {
        assert!(Game::new(0).unwrap_err().is_invalid_argument());
        assert!(Game::new(1).unwrap_err().is_invalid_argument());
        assert!(Game::new(2).is_ok());
    }

    #[test]
    fn test_new_rejects_huge_sizes() {
        assert!(Game::new(MAX_BOARD_SIZE).is_ok());
        assert!(Game::new(MAX_BOARD_SIZE + 1).unwrap_err().is_invalid_argument());
        assert!(Game::new(usize::MAX).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_start_twice() {
        let mut game = started(4);
        assert!(game.start_game().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_queries_before_start() {
        let game = Game::new(4).unwrap();
        assert_eq!(game.status(), GameStatus::NotStarted);
        assert!(game.current_turn().unwrap_err().is_invalid_state());
        assert!(game.piece_at(Coord::new(0, 0)).unwrap_err().is_invalid_state());
        assert!(game.is_game_over().unwrap_err().is_invalid_state());
        assert!(game.height().unwrap_err().is_invalid_state());
        assert!(game.row_width(0).unwrap_err().is_invalid_state());
        assert!(game.score(Color::Black).unwrap_err().is_invalid_state());
        assert!(game.copy_board().unwrap_err().is_invalid_state());
        assert!(game.has_legal_move(Color::Black).unwrap_err().is_invalid_state());
        assert!(
            game.is_move_legal(Color::Black, Coord::new(1, 2))
                .unwrap_err()
                .is_invalid_state()
        );
    }

    #[test]
    fn test_mutations_before_start() {
        let mut game = Game::new(4).unwrap();
        assert!(game.make_move(Coord::new(1, 2)).unwrap_err().is_invalid_state());
        assert!(game.pass_turn().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_move_toggles_turn_and_resets_passes() {
        let mut game = started(4);
        game.pass_turn().unwrap();
        assert_eq!(game.consecutive_passes(), 1);
        assert_eq!(game.current_turn(), Ok(Color::White));

        // White has the same opening cells available as black.
        let flips = game.make_move(Coord::new(1, 2)).unwrap();
        assert_eq!(flips, 1);
        assert_eq!(game.consecutive_passes(), 0);
        assert_eq!(game.current_turn(), Ok(Color::Black));
    }

    #[test]
    fn test_illegal_move_keeps_state() {
        let mut game = started(4);
        let before = game.copy_board().unwrap();

        let err = game.make_move(Coord::new(2, 2)).unwrap_err();
        assert!(err.is_invalid_state());
        let err = game.make_move(Coord::new(0, 0)).unwrap_err();
        assert!(err.is_invalid_state());
        let err = game.make_move(Coord::new(0, 4)).unwrap_err();
        assert!(err.is_invalid_argument());

        assert_eq!(game.copy_board().unwrap(), before);
        assert_eq!(game.current_turn(), Ok(Color::Black));
    }

    #[test]
    fn test_two_passes_end_game() {
        let mut game = started(4);
        game.pass_turn().unwrap();
        assert_eq!(game.status(), GameStatus::ToMove(Color::White));
        game.pass_turn().unwrap();
        assert_eq!(game.current_turn(), Ok(Color::Black));
        assert_eq!(game.is_game_over(), Ok(true));
        assert_eq!(game.status(), GameStatus::GameOver);

        assert!(game.pass_turn().unwrap_err().is_invalid_state());
        assert!(game.make_move(Coord::new(1, 2)).unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_score_and_width() {
        let game = started(4);
        assert_eq!(game.score(Color::Black), Ok(3));
        assert_eq!(game.score(Color::White), Ok(3));
        assert_eq!(game.height(), Ok(7));
        assert_eq!(game.row_width(3), Ok(7));
        assert!(game.row_width(7).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_is_move_legal_checks_bounds() {
        let game = started(4);
        assert_eq!(game.is_move_legal(Color::Black, Coord::new(1, 2)), Ok(true));
        assert_eq!(game.is_move_legal(Color::White, Coord::new(3, 3)), Ok(false));
        assert!(
            game.is_move_legal(Color::Black, Coord::new(0, 4))
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn test_listeners_notified_after_each_transition() {
        let seen: Rc<RefCell<Vec<(Color, usize)>>> = Rc::default();
        let mut game = Game::new(4).unwrap();

        let log = Rc::clone(&seen);
        game.add_listener(Box::new(move |game: &Game| {
            let turn = game.current_turn().unwrap();
            let black = game.score(Color::Black).unwrap();
            log.borrow_mut().push((turn, black));
        }));

        game.start_game().unwrap();
        game.make_move(Coord::new(1, 2)).unwrap();
        let _ = game.make_move(Coord::new(0, 0));
        game.pass_turn().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![(Color::Black, 3), (Color::White, 5), (Color::Black, 5)]
        );
    }

    #[test]
    fn test_listeners_in_registration_order() {
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let mut game = Game::new(3).unwrap();
        for name in ["first", "second"] {
            let order = Rc::clone(&order);
            game.add_listener(Box::new(move |_: &Game| order.borrow_mut().push(name)));
        }
        game.start_game().unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_restore() {
        let mut source = started(4);
        source.make_move(Coord::new(1, 2)).unwrap();
        let rows = source.copy_board().unwrap();

        let mut game = Game::new(2).unwrap();
        game.restore(rows, Color::White).unwrap();
        assert_eq!(game.size(), 4);
        assert_eq!(game.current_turn(), Ok(Color::White));
        assert_eq!(game.render(), source.render());

        assert!(
            game.restore(source.copy_board().unwrap(), Color::Black)
                .unwrap_err()
                .is_invalid_state()
        );
    }

    #[test]
    fn test_restore_rejects_bad_board() {
        let mut game = Game::new(3).unwrap();
        let err = game.restore(vec![vec![Piece::Empty; 2]; 2], Color::Black);
        assert!(err.unwrap_err().is_invalid_argument());
        assert!(!game.is_started());
    }

    #[test]
    fn test_players() {
        let mut game = Game::new(4).unwrap();
        assert_eq!(game.add_player(PlayerId(10)), Ok(Color::Black));
        assert_eq!(game.add_player(PlayerId(20)), Ok(Color::White));
        assert!(game.add_player(PlayerId(30)).unwrap_err().is_invalid_state());
        assert_eq!(game.color_of(PlayerId(20)), Ok(Color::White));
        assert!(game.color_of(PlayerId(30)).unwrap_err().is_invalid_argument());
    }
}
