pub mod board;
pub mod command;
pub mod error;
pub mod game;
pub mod moves;
pub mod obstacles;
pub mod paths;
pub mod piece;
pub mod point;
pub mod rectangle;

#[cfg(target_arch = "wasm32")]
mod wasm_api;
