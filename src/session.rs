use crate::board::Board;
use crate::render::ResolveCell;

/// Raw pointer input bound to a board.
///
/// A session resolves every pointer position with its [`ResolveCell`] before handing it to the [`Board`], so the
/// geometry used to resolve positions is the one the board is drawn with.
#[derive(Debug)]
pub struct Session<R> {
    board: Board,
    resolver: R,
}

impl<R> Session<R>
where
    R: ResolveCell,
{
    /// Bind `board` to the geometry `resolver`.
    pub fn new(board: Board, resolver: R) -> Self {
        Self { board, resolver }
    }

    /// The board being played.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board being played, e.g. to register collaborators or undo.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Swap the geometry, e.g. after the view was resized.
    pub fn set_resolver(&mut self, resolver: R) {
        self.resolver = resolver;
    }

    /// Give the board back.
    pub fn into_board(self) -> Board {
        self.board
    }

    /// The pointer went down at `(x, y)`.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let probe = self.resolver.resolve(x, y);
        self.board.begin_stroke(probe);
    }

    /// The pointer moved to `(x, y)`.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let probe = self.resolver.resolve(x, y);
        self.board.extend_stroke(probe);
    }

    /// The pointer went up. Where it was released does not matter.
    pub fn pointer_up(&mut self, _x: f32, _y: f32) {
        self.board.end_stroke();
    }
}
