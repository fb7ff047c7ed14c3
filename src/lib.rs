//! Rules engine for standard chess.
//!
//! [`engine::Board`] holds the position and validates every move against the
//! full legal-move definition, including castling, en passant and the rule
//! that a move may not leave the mover's own king in check. It also answers
//! check, checkmate and stalemate queries and keeps a positional move history.
//! [`engine::Game`] wraps a board for a turn loop.

pub mod config;
pub mod engine;
