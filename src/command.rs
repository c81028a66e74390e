use crate::board::Board;
use crate::game::GameState;
use crate::piece::Piece;
use crate::point::Point;

/// A reversible move. Holds everything needed to take itself back, so it
/// never borrows the board it runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub source: Point,
    pub destination: Point,
    /// Set by `execute`: whatever stood on `destination` beforehand.
    pub captured: Option<Piece>,
    /// Terminal state in force when the command was created.
    pub prior_state: GameState,
    /// Terminal state after the command. Starts equal to `prior_state` and is
    /// overwritten when the move delivers checkmate.
    pub game_state: GameState,
}

impl MoveCommand {
    pub fn new(source: Point, destination: Point, state: GameState) -> Self {
        MoveCommand {
            source,
            destination,
            captured: None,
            prior_state: state,
            game_state: state,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.source == self.destination
    }

    pub fn execute(&mut self, board: &mut Board) {
        // A pass leaves the board as it is; moving onto itself would drop the piece.
        if self.is_pass() {
            return;
        }
        self.captured = board.move_piece(self.source, self.destination);
    }

    pub fn undo(&mut self, board: &mut Board) {
        if self.is_pass() {
            return;
        }
        board.move_piece(self.destination, self.source);
        if let Some(piece) = self.captured.take() {
            board.restore(piece);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recent {
    Done,
    Undone,
}

/// Undo and redo stacks of committed moves.
#[derive(Debug, Clone, Default)]
pub struct CommandManager {
    undo_stack: Vec<MoveCommand>,
    redo_stack: Vec<MoveCommand>,
    recent: Option<Recent>,
}

impl CommandManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a new command and record it. Any undone continuation is discarded.
    pub fn execute(&mut self, mut command: MoveCommand, board: &mut Board) {
        command.execute(board);
        self.undo_stack.push(command);
        self.redo_stack.clear();
        self.recent = Some(Recent::Done);
    }

    pub fn undo(&mut self, board: &mut Board) -> Option<&MoveCommand> {
        let mut command = self.undo_stack.pop()?;
        command.undo(board);
        self.redo_stack.push(command);
        self.recent = Some(Recent::Undone);
        self.redo_stack.last()
    }

    pub fn redo(&mut self, board: &mut Board) -> Option<&MoveCommand> {
        let mut command = self.redo_stack.pop()?;
        command.execute(board);
        self.undo_stack.push(command);
        self.recent = Some(Recent::Done);
        self.undo_stack.last()
    }

    /// The command most recently executed, undone or redone.
    pub fn last_command(&self) -> Option<&MoveCommand> {
        match self.recent? {
            Recent::Done => self.undo_stack.last(),
            Recent::Undone => self.redo_stack.last(),
        }
    }

    pub(crate) fn last_command_mut(&mut self) -> Option<&mut MoveCommand> {
        match self.recent? {
            Recent::Done => self.undo_stack.last_mut(),
            Recent::Undone => self.redo_stack.last_mut(),
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}
