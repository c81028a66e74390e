// =============================================================================
// Path generation
//
// A strategy enumerates every candidate path a piece could travel from a
// source point, ignoring occupancy and board edges (those are obstacle checks).
// Each path lists the points from source to endpoint inclusive. Strategies are
// small `Copy` values fixed when a piece is built; `Paths` re-derives the
// sequence from scratch on every call, so the same source always yields the
// same set of paths. Callers must only rely on set membership, not order.
// =============================================================================

use crate::point::Point;

/// Step counts and axis magnitudes a strategy combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reach {
    /// Inclusive range of repetitions of the unit step.
    pub min_steps: i32,
    pub max_steps: i32,
    pub xs: &'static [i32],
    pub ys: &'static [i32],
}

impl Reach {
    fn step_count(&self) -> usize {
        (self.max_steps - self.min_steps + 1).max(0) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStrategy {
    /// Straight orthogonal rays. A magnitude pair `(x, y)` becomes the unit step
    /// `(x * y, y)` when `x == 0` and `(x * y, 0)` otherwise, so `x` picks the
    /// axis and `y` the direction.
    Linear(Reach),
    /// Rays along the unit vector `(x, y)`, orthogonal or diagonal. Diagonal rays
    /// stop at `diag_limit` steps.
    LinearDiagonal { reach: Reach, diag_limit: i32 },
    /// One orthogonal step chosen by `scalar` (1 advances x, 0 advances y),
    /// followed by `steps` diagonal steps along `(x, y)`.
    Branch { reach: Reach, scalars: &'static [i32] },
}

impl PathStrategy {
    /// Enumerate all candidate paths starting at `source`.
    pub fn paths(self, source: Point) -> Paths {
        Paths {
            strategy: self,
            source,
            cursor: 0,
            len: self.combinations(),
        }
    }

    fn reach(&self) -> &Reach {
        match self {
            PathStrategy::Linear(reach) => reach,
            PathStrategy::LinearDiagonal { reach, .. } => reach,
            PathStrategy::Branch { reach, .. } => reach,
        }
    }

    fn scalars(&self) -> &'static [i32] {
        match self {
            PathStrategy::Branch { scalars, .. } => scalars,
            _ => &[1],
        }
    }

    /// Size of the (steps, scalar, x, y) combination space, including the
    /// combinations that get skipped.
    fn combinations(&self) -> usize {
        let reach = self.reach();
        reach.step_count() * self.scalars().len() * reach.xs.len() * reach.ys.len()
    }

    /// Decode combination `index` into a path, or `None` if it is excluded.
    fn path_at(&self, source: Point, index: usize) -> Option<Vec<Point>> {
        let reach = self.reach();
        let scalars = self.scalars();

        let mut i = index;
        let y = reach.ys[i % reach.ys.len()];
        i /= reach.ys.len();
        let x = reach.xs[i % reach.xs.len()];
        i /= reach.xs.len();
        let m = scalars[i % scalars.len()];
        i /= scalars.len();
        let steps = reach.min_steps + i as i32;

        // Zero displacement is the same as not moving.
        if x == 0 && y == 0 {
            return None;
        }

        let (lead, unit) = match self {
            PathStrategy::Linear(_) => {
                let axis = if x == 0 { 1 } else { 0 };
                (None, Point::new(x * y, axis * y))
            }
            PathStrategy::LinearDiagonal { diag_limit, .. } => {
                if x.abs() == y.abs() && steps > *diag_limit {
                    return None;
                }
                (None, Point::new(x, y))
            }
            PathStrategy::Branch { .. } => {
                let axis = if m == 0 { 1 } else { 0 };
                (Some(Point::new(m * x, axis * y)), Point::new(x, y))
            }
        };

        let mut path = Vec::with_capacity(steps as usize + 2);
        let mut at = source;
        path.push(at);
        if let Some(lead) = lead {
            at = at + lead;
            path.push(at);
        }
        for _ in 0..steps {
            at = at + unit;
            path.push(at);
        }
        Some(path)
    }
}

/// Finite iterator over a strategy's candidate paths.
#[derive(Debug, Clone)]
pub struct Paths {
    strategy: PathStrategy,
    source: Point,
    cursor: usize,
    len: usize,
}

impl Iterator for Paths {
    type Item = Vec<Point>;

    fn next(&mut self) -> Option<Vec<Point>> {
        while self.cursor < self.len {
            let index = self.cursor;
            self.cursor += 1;
            if let Some(path) = self.strategy.path_at(self.source, index) {
                return Some(path);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.len - self.cursor))
    }
}
