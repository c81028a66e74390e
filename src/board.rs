use std::collections::BTreeMap;

use crate::obstacles::PathView;
use crate::piece::{Category, Color, Piece};
use crate::point::Point;
use crate::rectangle::Rectangle;

pub const BLUE_PALACE: Rectangle = Rectangle::new([
    Point::new(3, 0),
    Point::new(3, 2),
    Point::new(5, 2),
    Point::new(5, 0),
]);

pub const RED_PALACE: Rectangle = Rectangle::new([
    Point::new(3, 7),
    Point::new(3, 9),
    Point::new(5, 9),
    Point::new(5, 7),
]);

pub const BOUNDARY: Rectangle = Rectangle::new([
    Point::new(0, 0),
    Point::new(0, 9),
    Point::new(8, 9),
    Point::new(8, 0),
]);

/// Back rank from Blue's left (column a) to right, shared by both colors.
const BACK_RANK: [(i32, Category); 8] = [
    (0, Category::Chariot),
    (1, Category::Elephant),
    (2, Category::Horse),
    (3, Category::Guard),
    (5, Category::Guard),
    (6, Category::Elephant),
    (7, Category::Horse),
    (8, Category::Chariot),
];

/// Position map plus the fixed geometry of the board.
///
/// Every key equals the stored position of the piece it maps to; all
/// mutation goes through `move_piece`, `restore`, `swap` and `place`, which
/// keep that true.
#[derive(Clone, Debug)]
pub struct Board {
    squares: BTreeMap<Point, Piece>,
    blue_palace: Rectangle,
    red_palace: Rectangle,
    boundary: Rectangle,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: BTreeMap::new(),
            blue_palace: BLUE_PALACE,
            red_palace: RED_PALACE,
            boundary: BOUNDARY,
        }
    }

    /// The canonical opening layout with all 32 pieces.
    pub fn new() -> Self {
        let mut board = Board::empty();

        for (color, back, cannons, soldiers, general) in [
            (Color::Blue, 0, 2, 3, 1),
            (Color::Red, 9, 7, 6, 8),
        ] {
            for (x, category) in BACK_RANK {
                board.place(Piece::new(color, category, Point::new(x, back)));
            }
            board.place(Piece::new(color, Category::General, Point::new(4, general)));
            for x in [1, 7] {
                board.place(Piece::new(color, Category::Cannon, Point::new(x, cannons)));
            }
            for x in (0..=8).step_by(2) {
                board.place(Piece::new(color, Category::Soldier, Point::new(x, soldiers)));
            }
        }

        board
    }

    /// Put a piece on the square it names. Returns whatever was displaced.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        self.squares.insert(piece.position(), piece)
    }

    pub fn get(&self, at: Point) -> Option<&Piece> {
        self.squares.get(&at)
    }

    /// All pieces in position order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.values()
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn blue_palace(&self) -> &Rectangle {
        &self.blue_palace
    }

    pub fn red_palace(&self) -> &Rectangle {
        &self.red_palace
    }

    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    pub fn is_inside_palace(&self, at: Point) -> bool {
        self.blue_palace.contains(at) || self.red_palace.contains(at)
    }

    /// Relocate the piece at `source` to `destination`, returning the piece it
    /// displaced. The caller guarantees `source` is occupied.
    pub fn move_piece(&mut self, source: Point, destination: Point) -> Option<Piece> {
        let mut piece = self.squares.remove(&source)?;
        piece.set_position(destination);
        self.squares.insert(destination, piece)
    }

    /// Put a previously captured piece back on its square, which must be
    /// empty again. Returns whatever was displaced, like `place`.
    pub(crate) fn restore(&mut self, piece: Piece) -> Option<Piece> {
        debug_assert!(
            !self.squares.contains_key(&piece.position()),
            "restoring onto occupied square {}",
            piece.position()
        );
        self.squares.insert(piece.position(), piece)
    }

    /// Exchange the occupants of two squares. Setup only: bypasses history.
    pub fn swap(&mut self, a: Point, b: Point) {
        let first = self.squares.remove(&a);
        let second = self.squares.remove(&b);
        if let Some(mut piece) = first {
            piece.set_position(b);
            self.squares.insert(b, piece);
        }
        if let Some(mut piece) = second {
            piece.set_position(a);
            self.squares.insert(a, piece);
        }
    }

    /// Pieces of `color`, optionally narrowed to one category.
    pub fn search(&self, color: Color, category: Option<Category>) -> Vec<&Piece> {
        self.squares
            .values()
            .filter(|p| p.color() == color && category.map_or(true, |c| p.category() == c))
            .collect()
    }

    pub fn general(&self, color: Color) -> Option<&Piece> {
        self.search(color, Some(Category::General)).into_iter().next()
    }

    /// The candidate path taking the piece at `source` to `destination`,
    /// before any obstacle checks.
    pub fn find_path(&self, source: Point, destination: Point) -> Option<Vec<Point>> {
        let piece = self.squares.get(&source)?;
        piece
            .paths(self.is_inside_palace(source))
            .find(|path| path.last() == Some(&destination))
    }

    /// True if the path leaves the board or its mover cannot travel it.
    pub fn find_obstacles(&self, path: &[Point]) -> bool {
        let Some(&source) = path.first() else {
            return true;
        };
        let Some(mover) = self.squares.get(&source) else {
            return true;
        };

        let mut occupants = Vec::with_capacity(path.len());
        for &at in path {
            if !self.boundary.contains(at) {
                return true;
            }
            occupants.push(self.squares.get(&at));
        }

        let view = PathView {
            path,
            occupants: &occupants,
            blue_palace: &self.blue_palace,
            red_palace: &self.red_palace,
        };
        mover
            .obstacles()
            .is_blocked(mover, &view, self.is_inside_palace(source))
    }

    /// Obstruction-free paths for one piece, generated lazily.
    pub fn legal_paths<'a>(&'a self, piece: &Piece) -> impl Iterator<Item = Vec<Point>> + 'a {
        piece
            .paths(self.is_inside_palace(piece.position()))
            .filter(move |path| !self.find_obstacles(path))
    }

    /// Every obstruction-free path for the given pieces.
    pub fn generate_paths<'a>(&self, pieces: impl IntoIterator<Item = &'a Piece>) -> Vec<Vec<Point>> {
        let mut paths = Vec::new();
        for piece in pieces {
            paths.extend(self.legal_paths(piece));
        }
        paths
    }

    /// Obstruction-free paths for every piece of `color`.
    pub fn generate_paths_for(&self, color: Color) -> Vec<Vec<Point>> {
        self.generate_paths(self.search(color, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn endpoints(board: &Board, at: Point) -> Vec<Point> {
        let piece = board.get(at).expect("piece on square");
        let mut ends: Vec<Point> = board
            .generate_paths([piece])
            .into_iter()
            .map(|path| path[path.len() - 1])
            .collect();
        ends.sort();
        ends
    }

    #[test]
    fn opening_layout_has_thirty_two_pieces() {
        let board = Board::new();
        assert_eq!(board.len(), 32);
        assert_eq!(board.search(Color::Blue, None).len(), 16);
        assert_eq!(board.search(Color::Red, Some(Category::Soldier)).len(), 5);
        assert_eq!(board.general(Color::Blue).map(|g| g.position()), Some(p(4, 1)));
        assert_eq!(board.general(Color::Red).map(|g| g.position()), Some(p(4, 8)));
        assert_eq!(board.get(p(1, 7)).map(|c| c.category()), Some(Category::Cannon));
        for piece in board.pieces() {
            assert_eq!(board.get(piece.position()), Some(piece));
        }
    }

    #[test]
    fn find_path_picks_the_matching_endpoint() {
        let board = Board::new();
        assert_eq!(
            board.find_path(p(0, 0), p(0, 2)),
            Some(vec![p(0, 0), p(0, 1), p(0, 2)])
        );
        assert_eq!(board.find_path(p(0, 0), p(1, 1)), None, "chariot cannot go diagonal outside a palace");
        assert_eq!(board.find_path(p(4, 4), p(4, 5)), None, "empty square");
    }

    #[test]
    fn find_obstacles_rejects_off_board_and_blocked_paths() {
        let board = Board::new();
        assert!(board.find_obstacles(&[p(0, 0), p(-1, 0)]));
        assert!(board.find_obstacles(&[p(0, 0), p(0, 1), p(0, 2), p(0, 3)]), "own soldier on a7");
        assert!(!board.find_obstacles(&[p(0, 0), p(0, 1), p(0, 2)]));
    }

    #[test]
    fn opening_moves_per_piece() {
        let board = Board::new();
        assert_eq!(endpoints(&board, p(2, 0)), vec![p(3, 2)], "horse is hemmed in but for one jump");
        assert_eq!(endpoints(&board, p(1, 0)), vec![p(3, 3)], "elephant");
        assert_eq!(endpoints(&board, p(0, 0)), vec![p(0, 1), p(0, 2)], "chariot");
        assert!(endpoints(&board, p(1, 2)).is_empty(), "cannon has nothing to jump");
        assert_eq!(endpoints(&board, p(4, 8)).len(), 6, "red general in its palace");
    }

    #[test]
    fn move_piece_keeps_keys_and_positions_in_sync() {
        let mut board = Board::new();
        assert_eq!(board.move_piece(p(0, 3), p(0, 4)), None);
        assert_eq!(board.get(p(0, 4)).map(|s| s.position()), Some(p(0, 4)));
        assert!(board.get(p(0, 3)).is_none());

        let captured = board.move_piece(p(0, 0), p(0, 9)).expect("red chariot captured");
        assert_eq!(captured.color(), Color::Red);
        assert_eq!(board.len(), 31);

        assert_eq!(board.move_piece(p(0, 9), p(0, 0)), None);
        assert_eq!(board.restore(captured), None);
        assert_eq!(board.len(), 32);
        assert_eq!(board.get(p(0, 9)).map(|c| c.color()), Some(Color::Red));
        assert_eq!(board.get(p(0, 0)).map(|c| c.color()), Some(Color::Blue));
        for piece in board.pieces() {
            assert_eq!(board.get(piece.position()), Some(piece));
        }
    }

    #[test]
    fn swap_exchanges_occupants() {
        let mut board = Board::new();
        board.swap(p(1, 0), p(2, 0));
        assert_eq!(board.get(p(1, 0)).map(|h| h.category()), Some(Category::Horse));
        assert_eq!(board.get(p(2, 0)).map(|e| e.category()), Some(Category::Elephant));
        assert_eq!(board.get(p(1, 0)).map(|h| h.position()), Some(p(1, 0)));
        assert_eq!(board.get(p(2, 0)).map(|e| e.position()), Some(p(2, 0)));
    }
}
