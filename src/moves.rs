use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::game::{Game, Transpositions};
use crate::point::Point;

/// A move as the transport sends it: two squares in algebraic notation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: String,
    pub to: String,
}

impl Move {
    pub fn new(from: &str, to: &str) -> Move {
        Move {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn from_points(from: Point, to: Point) -> Move {
        Move {
            from: from.notation(),
            to: to.notation(),
        }
    }

    /// Both squares in internal coordinates.
    pub fn points(&self) -> Result<(Point, Point)> {
        Ok((self.from.parse()?, self.to.parse()?))
    }

    pub fn is_pass(&self) -> bool {
        self.from == self.to
    }

    /// Validate and commit this move on `game`.
    pub fn play(&self, game: &mut Game) -> Result<bool> {
        let (source, destination) = self.points()?;
        Ok(game.commit_move(source, destination))
    }
}

/// Formats as `from-to`, e.g. `"a7-a6"`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Parse `"a7-a6"` or `"a7 a6"`. Both squares must be well-formed.
impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Move> {
        let mut squares = s.split(|c: char| c == '-' || c.is_whitespace()).filter(|part| !part.is_empty());
        let (Some(from), Some(to), None) = (squares.next(), squares.next(), squares.next()) else {
            return Err(EngineError::Notation(s.to_string()));
        };
        from.parse::<Point>()?;
        to.parse::<Point>()?;
        Ok(Move::new(from, to))
    }
}

/// A recorded game: optional pre-game swaps followed by the moves in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub transpositions: Transpositions,
    pub moves: Vec<Move>,
}

impl Transcript {
    pub fn from_json(json: &str) -> Result<Transcript> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build from `"from to"` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Transcript {
        Transcript {
            transpositions: Transpositions::default(),
            moves: pairs.iter().map(|(from, to)| Move::new(from, to)).collect(),
        }
    }

    /// Play every move on a fresh game, returning the game and each verdict.
    pub fn replay(&self) -> Result<(Game, Vec<bool>)> {
        let mut game = Game::with_transpositions(self.transpositions);
        let mut verdicts = Vec::with_capacity(self.moves.len());
        for mv in &self.moves {
            verdicts.push(mv.play(&mut game)?);
        }
        Ok((game, verdicts))
    }
}
