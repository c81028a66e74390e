use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::command::{CommandManager, MoveCommand};
use crate::error::{EngineError, Result};
use crate::piece::Color;
use crate::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    #[default]
    Unfinished,
    BlueWon,
    RedWon,
}

impl GameState {
    pub fn is_finished(self) -> bool {
        self != GameState::Unfinished
    }

    pub fn won_by(color: Color) -> GameState {
        match color {
            Color::Blue => GameState::BlueWon,
            Color::Red => GameState::RedWon,
        }
    }
}

/// Whose move it is and whether the game is still going. Only `Game`
/// changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub player: Color,
    pub state: GameState,
}

impl Default for Turn {
    fn default() -> Self {
        Turn {
            player: Color::Blue,
            state: GameState::Unfinished,
        }
    }
}

/// Snapshot reported to the transport after every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameStatus {
    pub game_state: GameState,
    pub player_turn: Color,
    pub is_checked: bool,
}

/// Pre-game Horse/Elephant swaps. Left and right are taken from each
/// player's own seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transpositions {
    #[serde(rename = "blue_left_transposed")]
    pub blue_left: bool,
    #[serde(rename = "blue_right_transposed")]
    pub blue_right: bool,
    #[serde(rename = "red_left_transposed")]
    pub red_left: bool,
    #[serde(rename = "red_right_transposed")]
    pub red_right: bool,
}

impl Transpositions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The square pairs to exchange, in the order they are applied.
    pub fn pairs(&self) -> Vec<(Point, Point)> {
        [
            (self.blue_left, Point::new(1, 0), Point::new(2, 0)),
            (self.blue_right, Point::new(6, 0), Point::new(7, 0)),
            (self.red_left, Point::new(6, 9), Point::new(7, 9)),
            (self.red_right, Point::new(1, 9), Point::new(2, 9)),
        ]
        .into_iter()
        .filter(|(enabled, _, _)| *enabled)
        .map(|(_, a, b)| (a, b))
        .collect()
    }
}

/// One match of Janggi: the board, committed history and the turn.
///
/// Not reentrant: validation and the checkmate search move pieces on the
/// board and put them back before returning.
#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    history: CommandManager,
    turn: Turn,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transpositions(transpositions: Transpositions) -> Self {
        let mut game = Game::new();
        game.apply_transpositions(transpositions);
        game
    }

    /// Start from an arbitrary position with `player` to move.
    pub fn from_board(board: Board, player: Color) -> Self {
        Game {
            board,
            history: CommandManager::new(),
            turn: Turn {
                player,
                state: GameState::Unfinished,
            },
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    pub fn player_turn(&self) -> Color {
        self.turn.player
    }

    pub fn game_state(&self) -> GameState {
        self.turn.state
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            game_state: self.turn.state,
            player_turn: self.turn.player,
            is_checked: self.is_in_check(self.turn.player),
        }
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Validate and commit a move given in algebraic notation. `Err` only for
    /// malformed notation; an illegal move is `Ok(false)`.
    pub fn make_move(&mut self, source: &str, destination: &str) -> Result<bool> {
        let source: Point = source.parse()?;
        let destination: Point = destination.parse()?;
        Ok(self.commit_move(source, destination))
    }

    /// Validate and commit a move in internal coordinates. A move with
    /// `source == destination` passes the turn.
    pub fn commit_move(&mut self, source: Point, destination: Point) -> bool {
        if !self.is_move_valid(source, destination) {
            return false;
        }

        let mover = self.turn.player;
        let command = MoveCommand::new(source, destination, self.turn.state);
        self.history.execute(command, &mut self.board);
        self.turn.player = mover.opposite();
        info!("{mover:?} {} -> {}", source.notation(), destination.notation());

        let opponent = mover.opposite();
        if self.is_in_check(opponent) && self.is_checkmate(opponent) {
            self.turn.state = GameState::won_by(mover);
            if let Some(command) = self.history.last_command_mut() {
                command.game_state = self.turn.state;
            }
            info!("{opponent:?} is checkmated: {:?}", self.turn.state);
        }

        true
    }

    /// Rule check for a move by the player to move, short-circuiting on the
    /// first failure.
    pub fn is_move_valid(&mut self, source: Point, destination: Point) -> bool {
        if self.turn.state.is_finished() {
            debug!("rejected {source} -> {destination}: game is over");
            return false;
        }

        let player = self.turn.player;
        match self.board.get(source) {
            None => {
                debug!("rejected {source} -> {destination}: no piece at source");
                return false;
            }
            Some(piece) if piece.color() != player => {
                debug!("rejected {source} -> {destination}: not {:?}'s turn", piece.color());
                return false;
            }
            Some(_) => {}
        }

        if source == destination {
            let in_check = self.is_in_check(player);
            if in_check {
                debug!("rejected pass by {player:?}: general is in check");
            }
            return !in_check;
        }

        let Some(path) = self.board.find_path(source, destination) else {
            debug!("rejected {source} -> {destination}: unreachable for this piece");
            return false;
        };
        if self.board.find_obstacles(&path) {
            debug!("rejected {source} -> {destination}: path is blocked");
            return false;
        }
        if self.leaves_in_check(player, source, destination) {
            debug!("rejected {source} -> {destination}: would leave {player:?} in check");
            return false;
        }

        true
    }

    /// Play a move on the board, test for check and take it back. Nothing is
    /// recorded in the history.
    fn leaves_in_check(&mut self, color: Color, source: Point, destination: Point) -> bool {
        let mut command = MoveCommand::new(source, destination, self.turn.state);
        command.execute(&mut self.board);
        let in_check = self.is_in_check(color);
        command.undo(&mut self.board);
        trace!("simulated {source} -> {destination}: {color:?} in check = {in_check}");
        in_check
    }

    // =========================================================================
    // Check and checkmate
    // =========================================================================

    /// True if any opposing piece has an unobstructed path onto the general.
    /// A board without that general is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        let Some(general) = self.board.general(color) else {
            return false;
        };
        let target = general.position();
        self.board
            .search(color.opposite(), None)
            .into_iter()
            .any(|piece| self.board.legal_paths(piece).any(|path| path.last() == Some(&target)))
    }

    /// Search for a way out of check: move the general, then block or capture
    /// a lone attacker. Returns false when `color` is not in check at all.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        let Some(general) = self.board.general(color).copied() else {
            return false;
        };
        let target = general.position();

        // Escape
        let escapes: Vec<Point> = self
            .board
            .legal_paths(&general)
            .filter_map(|path| path.last().copied())
            .collect();
        for destination in escapes {
            if !self.leaves_in_check(color, target, destination) {
                trace!("{color:?} general escapes to {destination}");
                return false;
            }
        }

        // Attack vectors
        let attacks: Vec<Vec<Point>> = self
            .board
            .generate_paths(self.board.search(color.opposite(), None))
            .into_iter()
            .filter(|path| path.last() == Some(&target))
            .collect();
        let vector = match attacks.as_slice() {
            [] => return false,
            [vector] => vector,
            _ => {
                trace!("{color:?} faces {} attackers", attacks.len());
                return true;
            }
        };

        // Block or capture, anywhere on the attack line short of the general
        let line = &vector[..vector.len() - 1];
        let interceptions: Vec<(Point, Point)> = self
            .board
            .generate_paths_for(color)
            .into_iter()
            .filter_map(|path| {
                let end = *path.last()?;
                line.contains(&end).then_some((path[0], end))
            })
            .collect();
        for (source, destination) in interceptions {
            if !self.leaves_in_check(color, source, destination) {
                trace!("{color:?} intercepts with {source} -> {destination}");
                return false;
            }
        }

        true
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Take back the last committed move. False if there is nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        let Some(command) = self.history.undo(&mut self.board) else {
            return false;
        };
        self.turn.state = command.prior_state;
        self.turn.player = self.turn.player.opposite();
        true
    }

    /// Replay the last undone move. False if there is nothing to redo.
    pub fn redo_move(&mut self) -> bool {
        let Some(command) = self.history.redo(&mut self.board) else {
            return false;
        };
        self.turn.state = command.game_state;
        self.turn.player = self.turn.player.opposite();
        true
    }

    // =========================================================================
    // Queries and setup
    // =========================================================================

    /// Squares the piece at `at` can legally move to, excluding any that would
    /// leave its own general in check.
    pub fn piece_destinations(&mut self, at: Point) -> Vec<Point> {
        if self.turn.state.is_finished() {
            return Vec::new();
        }
        let Some(piece) = self.board.get(at).copied() else {
            return Vec::new();
        };

        let candidates: Vec<Point> = self
            .board
            .legal_paths(&piece)
            .filter_map(|path| path.last().copied())
            .collect();
        candidates
            .into_iter()
            .filter(|&destination| !self.leaves_in_check(piece.color(), at, destination))
            .collect()
    }

    /// Every legal move for the player to move, passes excluded.
    pub fn legal_moves(&mut self) -> Vec<(Point, Point)> {
        let sources: Vec<Point> = self
            .board
            .search(self.turn.player, None)
            .into_iter()
            .map(|piece| piece.position())
            .collect();
        let mut moves = Vec::new();
        for source in sources {
            moves.extend(self.piece_destinations(source).into_iter().map(|d| (source, d)));
        }
        moves
    }

    /// Apply pre-game Horse/Elephant swaps. Refused once a move has been made.
    pub fn transpose_pieces(&mut self, transpositions: Transpositions) -> Result<()> {
        if self.history.undo_len() > 0 || self.history.redo_len() > 0 {
            warn!("transposition requested after play started: {transpositions:?}");
            return Err(EngineError::SetupClosed);
        }
        self.apply_transpositions(transpositions);
        Ok(())
    }

    fn apply_transpositions(&mut self, transpositions: Transpositions) {
        for (a, b) in transpositions.pairs() {
            self.board.swap(a, b);
            info!("transposed {} and {}", a.notation(), b.notation());
        }
    }
}
