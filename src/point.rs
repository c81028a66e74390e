use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of rows on the board; notation rows run 1..=ROWS.
const ROWS: i32 = 10;
const COLUMNS: &[u8; 9] = b"abcdefghi";

/// An intersection on the board, or a displacement between two of them.
///
/// Internal coordinates put the origin at Blue's back-rank corner: `x` is the
/// column (0 = `a`), `y` grows towards Red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// True when the displacement moves along both axes at once.
    pub fn is_diagonal(self) -> bool {
        self.x != 0 && self.y != 0
    }

    /// Format as algebraic notation, e.g. `(0, 0)` -> `"a10"`.
    pub fn notation(self) -> String {
        let column = COLUMNS
            .get(self.x as usize)
            .map(|&c| c as char)
            .unwrap_or('?');
        format!("{column}{}", ROWS - self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parse algebraic notation: a column letter `a`-`i` and a row `1`-`10`,
/// mapped to `x = column index`, `y = 10 - row`.
impl FromStr for Point {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::Notation(s.to_string());

        let mut chars = s.chars();
        let column = chars.next().ok_or_else(invalid)?;
        let x = COLUMNS
            .iter()
            .position(|&c| c as char == column.to_ascii_lowercase())
            .ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: i32 = digits.parse().map_err(|_| invalid())?;
        if !(1..=ROWS).contains(&row) {
            return Err(invalid());
        }

        Ok(Point::new(x as i32, ROWS - row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arithmetic() {
        let a = Point::new(3, 2);
        let b = Point::new(1, -1);
        assert_eq!(a + b, Point::new(4, 1));
        assert_eq!(a - b, Point::new(2, 3));
        assert!(Point::new(1, -1).is_diagonal());
        assert!(!Point::new(0, 3).is_diagonal());
    }

    #[test]
    fn notation_maps_rows_from_blue_side() {
        assert_eq!("a10".parse::<Point>().unwrap(), Point::new(0, 0));
        assert_eq!("a1".parse::<Point>().unwrap(), Point::new(0, 9));
        assert_eq!("e9".parse::<Point>().unwrap(), Point::new(4, 1));
        assert_eq!("i4".parse::<Point>().unwrap(), Point::new(8, 6));
    }

    #[test]
    fn notation_formats_back() {
        assert_eq!(Point::new(0, 0).notation(), "a10");
        assert_eq!(Point::new(4, 8).notation(), "e2");
        assert_eq!("h3".parse::<Point>().unwrap().notation(), "h3");
    }

    #[test]
    fn malformed_notation_is_rejected() {
        for bad in ["", "j5", "a0", "a11", "a", "5a", "b-1", "a+5", "a05", "a 5", "a5 "] {
            assert!(
                matches!(bad.parse::<Point>(), Err(EngineError::Notation(_))),
                "`{bad}` should not parse"
            );
        }
    }
}
