use crate::game::{Game, Transpositions};
use crate::piece::{Category, Color, Piece};
use crate::point::Point;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct PieceJson {
    category: Category,
    color: Color,
    at: [i32; 2],
    square: String,
}

#[derive(Serialize)]
struct MoveResult {
    accepted: bool,
    error: Option<String>,
}

fn piece_json(piece: &Piece) -> PieceJson {
    let at = piece.position();
    PieceJson {
        category: piece.category(),
        color: piece.color(),
        at: [at.x, at.y],
        square: at.notation(),
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen(js_name = Game)]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen(js_class = Game)]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { game: Game::new() }
    }

    /// `{ accepted, error }`; `error` is set only for malformed notation.
    pub fn make_move(&mut self, source: &str, destination: &str) -> JsValue {
        let result = match self.game.make_move(source, destination) {
            Ok(accepted) => MoveResult { accepted, error: None },
            Err(err) => MoveResult {
                accepted: false,
                error: Some(err.to_string()),
            },
        };
        to_js(&result)
    }

    pub fn undo_move(&mut self) -> bool {
        self.game.undo_move()
    }

    pub fn redo_move(&mut self) -> bool {
        self.game.redo_move()
    }

    /// `color` is `"BLUE"` or `"RED"`; anything else is never in check.
    pub fn is_in_check(&self, color: &str) -> bool {
        match color {
            "BLUE" => self.game.is_in_check(Color::Blue),
            "RED" => self.game.is_in_check(Color::Red),
            _ => false,
        }
    }

    pub fn game_status(&self) -> JsValue {
        to_js(&self.game.status())
    }

    /// Destinations as `[x, y]` pairs. Empty for malformed notation.
    pub fn piece_destinations(&mut self, source: &str) -> JsValue {
        let destinations: Vec<[i32; 2]> = match source.parse::<Point>() {
            Ok(at) => self
                .game
                .piece_destinations(at)
                .into_iter()
                .map(|d| [d.x, d.y])
                .collect(),
            Err(_) => Vec::new(),
        };
        to_js(&destinations)
    }

    /// Flags as the transport's JSON object. Returns an error message, or
    /// `null` on success.
    pub fn transpose_pieces(&mut self, flags: &str) -> Option<String> {
        Transpositions::from_json(flags)
            .and_then(|t| self.game.transpose_pieces(t))
            .err()
            .map(|err| err.to_string())
    }

    pub fn pieces(&self) -> JsValue {
        let pieces: Vec<PieceJson> = self.game.board().pieces().map(piece_json).collect();
        to_js(&pieces)
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
