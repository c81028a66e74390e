// =============================================================================
// Obstacle detection
//
// Given a candidate path and the occupants found along it, decide whether the
// moving piece may travel it. Pieces carry a set of these strategies; the
// verdict is the OR of every applicable one.
// =============================================================================

use crate::piece::{Color, Piece};
use crate::point::Point;
use crate::rectangle::Rectangle;

/// A candidate path as seen by the obstacle checks: the points from source to
/// destination and, for each point, the piece sitting there (if any).
#[derive(Debug, Clone, Copy)]
pub struct PathView<'a> {
    pub path: &'a [Point],
    pub occupants: &'a [Option<&'a Piece>],
    pub blue_palace: &'a Rectangle,
    pub red_palace: &'a Rectangle,
}

impl<'a> PathView<'a> {
    fn source(&self) -> Point {
        self.path[0]
    }

    fn destination(&self) -> Point {
        self.path[self.path.len() - 1]
    }

    /// Pieces strictly between source and destination.
    fn interior(&self) -> impl Iterator<Item = &'a Piece> + 'a {
        let end = self.occupants.len().saturating_sub(1);
        let occupants: &'a [Option<&'a Piece>] = self.occupants;
        occupants
            .get(1..end)
            .unwrap_or(&[])
            .iter()
            .filter_map(|o| *o)
    }

    fn target(&self) -> Option<&'a Piece> {
        self.occupants.last().copied().flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleStrategy {
    /// Only the strictly interior points matter. Ordinary pieces need them all
    /// empty; screened pieces need exactly one, unscreened, piece to jump.
    IllegalPath,
    /// The endpoint may not hold a friendly piece, and a screened piece may not
    /// take another screened piece.
    IllegalDestination,
    /// Diagonal lines and palace walls for moves starting inside a palace.
    InsidePalace,
}

impl ObstacleStrategy {
    pub fn is_blocked(self, mover: &Piece, view: &PathView<'_>) -> bool {
        match self {
            ObstacleStrategy::IllegalPath => illegal_path(mover, view),
            ObstacleStrategy::IllegalDestination => illegal_destination(mover, view),
            ObstacleStrategy::InsidePalace => inside_palace(mover, view),
        }
    }
}

fn illegal_path(mover: &Piece, view: &PathView<'_>) -> bool {
    if mover.screened() {
        let mut interior = view.interior();
        return match (interior.next(), interior.next()) {
            (Some(screen), None) => screen.screened(),
            _ => true,
        };
    }
    view.interior().next().is_some()
}

fn illegal_destination(mover: &Piece, view: &PathView<'_>) -> bool {
    match view.target() {
        None => false,
        Some(target) if target.color() == mover.color() => true,
        Some(target) => mover.screened() && target.screened(),
    }
}

fn inside_palace(mover: &Piece, view: &PathView<'_>) -> bool {
    let source = view.source();
    let destination = view.destination();
    let source_palace = if view.blue_palace.contains(source) {
        view.blue_palace
    } else {
        view.red_palace
    };
    let home_palace = match mover.color() {
        Color::Blue => view.blue_palace,
        Color::Red => view.red_palace,
    };
    let translation = destination - source;

    // Diagonal lines only run through the palace corners.
    if translation.is_diagonal()
        && !source_palace.is_corner(source)
        && !source_palace.is_corner(destination)
    {
        return true;
    }

    if mover.palace_bound() {
        return !home_palace.contains(destination);
    }

    // Leaving the palace is only possible orthogonally.
    !source_palace.contains(destination) && translation.is_diagonal()
}

/// The obstacle strategies a piece is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleSet {
    pub path: ObstacleStrategy,
    pub destination: ObstacleStrategy,
    /// Absent for pieces without palace-specific movement (Horse, Elephant).
    pub palace: Option<ObstacleStrategy>,
}

impl ObstacleSet {
    pub const STANDARD: ObstacleSet = ObstacleSet {
        path: ObstacleStrategy::IllegalPath,
        destination: ObstacleStrategy::IllegalDestination,
        palace: Some(ObstacleStrategy::InsidePalace),
    };

    pub const NO_PALACE: ObstacleSet = ObstacleSet {
        path: ObstacleStrategy::IllegalPath,
        destination: ObstacleStrategy::IllegalDestination,
        palace: None,
    };

    pub fn is_blocked(&self, mover: &Piece, view: &PathView<'_>, in_palace: bool) -> bool {
        if self.path.is_blocked(mover, view) || self.destination.is_blocked(mover, view) {
            return true;
        }
        match self.palace {
            Some(palace) if in_palace => palace.is_blocked(mover, view),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BLUE_PALACE, RED_PALACE};
    use crate::piece::Category;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn piece(color: Color, category: Category, at: Point) -> Piece {
        Piece::new(color, category, at)
    }

    fn view<'a>(path: &'a [Point], occupants: &'a [Option<&'a Piece>]) -> PathView<'a> {
        PathView { path, occupants, blue_palace: &BLUE_PALACE, red_palace: &RED_PALACE }
    }

    #[test]
    fn ordinary_piece_is_blocked_by_interior_piece() {
        let chariot = piece(Color::Blue, Category::Chariot, p(0, 0));
        let soldier = piece(Color::Red, Category::Soldier, p(0, 1));
        let path = [p(0, 0), p(0, 1), p(0, 2)];

        assert!(ObstacleStrategy::IllegalPath.is_blocked(&chariot, &view(&path, &[Some(&chariot), Some(&soldier), None])));
        assert!(!ObstacleStrategy::IllegalPath.is_blocked(&chariot, &view(&path, &[Some(&chariot), None, Some(&soldier)])));
    }

    #[test]
    fn cannon_needs_exactly_one_non_cannon_screen() {
        let cannon = piece(Color::Blue, Category::Cannon, p(1, 2));
        let soldier = piece(Color::Blue, Category::Soldier, p(1, 3));
        let horse = piece(Color::Red, Category::Horse, p(1, 4));
        let other_cannon = piece(Color::Red, Category::Cannon, p(1, 3));
        let path = [p(1, 2), p(1, 3), p(1, 4), p(1, 5)];
        let rule = ObstacleStrategy::IllegalPath;

        assert!(rule.is_blocked(&cannon, &view(&path, &[Some(&cannon), None, None, None])), "nothing to jump");
        assert!(!rule.is_blocked(&cannon, &view(&path, &[Some(&cannon), Some(&soldier), None, None])), "one screen");
        assert!(
            rule.is_blocked(&cannon, &view(&path, &[Some(&cannon), Some(&soldier), Some(&horse), None])),
            "two screens"
        );
        assert!(rule.is_blocked(&cannon, &view(&path, &[Some(&cannon), Some(&other_cannon), None, None])), "cannon screen");
    }

    #[test]
    fn destination_rules() {
        let cannon = piece(Color::Blue, Category::Cannon, p(1, 2));
        let friend = piece(Color::Blue, Category::Soldier, p(1, 5));
        let enemy = piece(Color::Red, Category::Soldier, p(1, 5));
        let enemy_cannon = piece(Color::Red, Category::Cannon, p(1, 5));
        let chariot = piece(Color::Blue, Category::Chariot, p(1, 2));
        let path = [p(1, 2), p(1, 3), p(1, 4), p(1, 5)];
        let rule = ObstacleStrategy::IllegalDestination;

        assert!(!rule.is_blocked(&cannon, &view(&path, &[Some(&cannon), None, None, None])));
        assert!(rule.is_blocked(&cannon, &view(&path, &[Some(&cannon), None, None, Some(&friend)])));
        assert!(!rule.is_blocked(&cannon, &view(&path, &[Some(&cannon), None, None, Some(&enemy)])));
        assert!(rule.is_blocked(&cannon, &view(&path, &[Some(&cannon), None, None, Some(&enemy_cannon)])));
        assert!(!rule.is_blocked(&chariot, &view(&path, &[Some(&chariot), None, None, Some(&enemy_cannon)])));
    }

    #[test]
    fn diagonals_must_touch_a_palace_corner() {
        let rule = ObstacleStrategy::InsidePalace;
        let guard = piece(Color::Blue, Category::Guard, p(4, 0));
        let edge_to_side = [p(4, 0), p(5, 1)];
        assert!(rule.is_blocked(&guard, &view(&edge_to_side, &[Some(&guard), None])));

        let general = piece(Color::Blue, Category::General, p(4, 1));
        let centre_to_corner = [p(4, 1), p(5, 2)];
        assert!(!rule.is_blocked(&general, &view(&centre_to_corner, &[Some(&general), None])));
    }

    #[test]
    fn palace_bound_pieces_stay_home() {
        let rule = ObstacleStrategy::InsidePalace;
        let general = piece(Color::Blue, Category::General, p(4, 2));
        let out = [p(4, 2), p(4, 3)];
        assert!(rule.is_blocked(&general, &view(&out, &[Some(&general), None])));

        let inside = [p(4, 2), p(4, 1)];
        assert!(!rule.is_blocked(&general, &view(&inside, &[Some(&general), None])));
    }

    #[test]
    fn unbound_pieces_leave_orthogonally_only() {
        let rule = ObstacleStrategy::InsidePalace;
        let chariot = piece(Color::Red, Category::Chariot, p(3, 2));

        let up_the_file = [p(3, 2), p(3, 3), p(3, 4)];
        assert!(!rule.is_blocked(&chariot, &view(&up_the_file, &[Some(&chariot), None, None])));

        let diagonal_out = [p(3, 2), p(2, 3)];
        assert!(rule.is_blocked(&chariot, &view(&diagonal_out, &[Some(&chariot), None])));

        let across_palace = [p(3, 2), p(4, 1), p(5, 0)];
        assert!(!rule.is_blocked(&chariot, &view(&across_palace, &[Some(&chariot), None, None])));
    }

    #[test]
    fn palace_rule_only_applies_inside() {
        let chariot = piece(Color::Blue, Category::Chariot, p(3, 2));
        let path = [p(3, 2), p(2, 3)];
        let occupants = [Some(&chariot), None];
        let v = view(&path, &occupants);
        assert!(ObstacleSet::STANDARD.is_blocked(&chariot, &v, true));
        assert!(!ObstacleSet::STANDARD.is_blocked(&chariot, &v, false));
        assert!(!ObstacleSet::NO_PALACE.is_blocked(&chariot, &v, true));
    }
}
