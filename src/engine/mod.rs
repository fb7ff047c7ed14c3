pub mod board;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod rules;
pub mod types;

pub use board::{Board, Placement};
pub use game::{Command, Game};
pub use movegen::{Move, has_legal_moves, legal_moves, legal_moves_from};
pub use types::*;
