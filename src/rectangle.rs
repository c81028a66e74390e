use crate::point::Point;

/// Axis-aligned region given by its four corners, listed clockwise from the
/// bottom-left. Models both palaces and the playable boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    bottom_left: Point,
    top_left: Point,
    top_right: Point,
    bottom_right: Point,
}

impl Rectangle {
    pub const fn new(corners: [Point; 4]) -> Self {
        Rectangle {
            bottom_left: corners[0],
            top_left: corners[1],
            top_right: corners[2],
            bottom_right: corners[3],
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        (self.top_left.x..=self.top_right.x).contains(&p.x)
            && (self.bottom_left.y..=self.top_left.y).contains(&p.y)
    }

    pub fn corners(&self) -> [Point; 4] {
        [self.bottom_left, self.top_left, self.top_right, self.bottom_right]
    }

    pub fn is_corner(&self, p: Point) -> bool {
        self.corners().contains(&p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palace() -> Rectangle {
        Rectangle::new([
            Point::new(3, 0),
            Point::new(3, 2),
            Point::new(5, 2),
            Point::new(5, 0),
        ])
    }

    #[test]
    fn containment_includes_edges() {
        let p = palace();
        assert!(p.contains(Point::new(3, 0)));
        assert!(p.contains(Point::new(4, 1)));
        assert!(p.contains(Point::new(5, 2)));
        assert!(!p.contains(Point::new(2, 1)));
        assert!(!p.contains(Point::new(4, 3)));
    }

    #[test]
    fn corners_are_ordered_clockwise() {
        let p = palace();
        assert_eq!(
            p.corners(),
            [Point::new(3, 0), Point::new(3, 2), Point::new(5, 2), Point::new(5, 0)]
        );
        assert!(p.is_corner(Point::new(5, 0)));
        assert!(!p.is_corner(Point::new(4, 1)));
    }
}
