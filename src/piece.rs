use serde::{Deserialize, Serialize};

use crate::obstacles::ObstacleSet;
use crate::paths::{PathStrategy, Reach};
use crate::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Blue,
    Red,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    General,
    Guard,
    Horse,
    Elephant,
    Chariot,
    Cannon,
    Soldier,
}

// -----------------------------------------------------------------------------
// Movement tables
// -----------------------------------------------------------------------------

const ROOK_LINES: PathStrategy = PathStrategy::Linear(Reach {
    min_steps: 1,
    max_steps: 9,
    xs: &[0, 1],
    ys: &[-1, 1],
});

/// Rook lines plus up to two diagonal steps along the palace lines.
const ROOK_PALACE_LINES: PathStrategy = PathStrategy::LinearDiagonal {
    reach: Reach { min_steps: 1, max_steps: 9, xs: &[-1, 0, 1], ys: &[-1, 0, 1] },
    diag_limit: 2,
};

const HORSE_JUMP: PathStrategy = PathStrategy::Branch {
    reach: Reach { min_steps: 1, max_steps: 1, xs: &[-1, 1], ys: &[-1, 1] },
    scalars: &[0, 1],
};

const ELEPHANT_JUMP: PathStrategy = PathStrategy::Branch {
    reach: Reach { min_steps: 2, max_steps: 2, xs: &[-1, 1], ys: &[-1, 1] },
    scalars: &[0, 1],
};

const PALACE_STEP: PathStrategy = PathStrategy::LinearDiagonal {
    reach: Reach { min_steps: 1, max_steps: 1, xs: &[-1, 0, 1], ys: &[-1, 0, 1] },
    diag_limit: 1,
};

const BLUE_SOLDIER_STEP: PathStrategy = PathStrategy::Linear(Reach {
    min_steps: 1,
    max_steps: 1,
    xs: &[-1, 0, 1],
    ys: &[1],
});

const BLUE_SOLDIER_PALACE_STEP: PathStrategy = PathStrategy::LinearDiagonal {
    reach: Reach { min_steps: 1, max_steps: 1, xs: &[-1, 0, 1], ys: &[0, 1] },
    diag_limit: 1,
};

const RED_SOLDIER_STEP: PathStrategy = PathStrategy::Linear(Reach {
    min_steps: 1,
    max_steps: 1,
    xs: &[-1, 0, 1],
    ys: &[-1],
});

const RED_SOLDIER_PALACE_STEP: PathStrategy = PathStrategy::LinearDiagonal {
    reach: Reach { min_steps: 1, max_steps: 1, xs: &[-1, 0, 1], ys: &[0, -1] },
    diag_limit: 1,
};

/// Path strategies keyed by where the piece currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSet {
    /// `None` for pieces that never stand outside a palace.
    pub default: Option<PathStrategy>,
    pub palace: PathStrategy,
}

impl PathSet {
    fn for_piece(color: Color, category: Category) -> PathSet {
        match (category, color) {
            (Category::General | Category::Guard, _) => PathSet { default: None, palace: PALACE_STEP },
            (Category::Chariot | Category::Cannon, _) => PathSet {
                default: Some(ROOK_LINES),
                palace: ROOK_PALACE_LINES,
            },
            (Category::Horse, _) => PathSet { default: Some(HORSE_JUMP), palace: HORSE_JUMP },
            (Category::Elephant, _) => PathSet { default: Some(ELEPHANT_JUMP), palace: ELEPHANT_JUMP },
            (Category::Soldier, Color::Blue) => PathSet {
                default: Some(BLUE_SOLDIER_STEP),
                palace: BLUE_SOLDIER_PALACE_STEP,
            },
            (Category::Soldier, Color::Red) => PathSet {
                default: Some(RED_SOLDIER_STEP),
                palace: RED_SOLDIER_PALACE_STEP,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    color: Color,
    category: Category,
    position: Point,
    palace_bound: bool,
    screened: bool,
    #[serde(skip)]
    paths: PathSet,
    #[serde(skip)]
    obstacles: ObstacleSet,
}

impl Piece {
    pub fn new(color: Color, category: Category, position: Point) -> Self {
        let obstacles = match category {
            Category::Horse | Category::Elephant => ObstacleSet::NO_PALACE,
            _ => ObstacleSet::STANDARD,
        };
        Piece {
            color,
            category,
            position,
            palace_bound: matches!(category, Category::General | Category::Guard),
            screened: category == Category::Cannon,
            paths: PathSet::for_piece(color, category),
            obstacles,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Confined to its own palace (General, Guard).
    pub fn palace_bound(&self) -> bool {
        self.palace_bound
    }

    /// Moves by jumping exactly one screen and can neither jump nor take
    /// another screened piece (Cannon).
    pub fn screened(&self) -> bool {
        self.screened
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// Candidate paths from the piece's current position. Empty when the piece
    /// has no strategy for where it stands.
    pub fn paths(&self, in_palace: bool) -> impl Iterator<Item = Vec<Point>> {
        let strategy = if in_palace { Some(self.paths.palace) } else { self.paths.default };
        let source = self.position;
        strategy.map(move |s| s.paths(source)).into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_category() {
        let general = Piece::new(Color::Blue, Category::General, Point::new(4, 1));
        assert!(general.palace_bound());
        assert!(!general.screened());

        let cannon = Piece::new(Color::Red, Category::Cannon, Point::new(1, 7));
        assert!(cannon.screened());
        assert!(!cannon.palace_bound());

        let horse = Piece::new(Color::Red, Category::Horse, Point::new(2, 9));
        assert_eq!(horse.obstacles().palace, None);
        assert_eq!(cannon.obstacles().palace, Some(crate::obstacles::ObstacleStrategy::InsidePalace));
    }

    #[test]
    fn general_has_no_paths_outside_a_palace() {
        let general = Piece::new(Color::Blue, Category::General, Point::new(4, 4));
        assert_eq!(general.paths(false).count(), 0);
        assert_eq!(general.paths(true).count(), 8);
    }

    #[test]
    fn soldiers_advance_towards_the_enemy() {
        let blue = Piece::new(Color::Blue, Category::Soldier, Point::new(4, 3));
        let red = Piece::new(Color::Red, Category::Soldier, Point::new(4, 6));
        let ends = |p: &Piece| -> Vec<Point> { p.paths(false).map(|path| path[path.len() - 1]).collect() };

        assert!(ends(&blue).contains(&Point::new(4, 4)));
        assert!(!ends(&blue).contains(&Point::new(4, 2)));
        assert!(ends(&red).contains(&Point::new(4, 5)));
        assert!(!ends(&red).contains(&Point::new(4, 7)));
    }

    #[test]
    fn opposite_color() {
        assert_eq!(Color::Blue.opposite(), Color::Red);
        assert_eq!(Color::Red.opposite(), Color::Blue);
    }
}
