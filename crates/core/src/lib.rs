//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the whole board simulation and nothing else. It has
//! zero dependencies on UI or I/O, making it:
//!
//! - **Deterministic**: the same seed produces an identical game
//! - **Testable**: every rule is exercised without a terminal
//! - **Portable**: runs headless as easily as behind a renderer
//!
//! # Module structure
//!
//! - [`piece`]: textual shape templates and the translating cell-cluster piece
//! - [`board`]: the 10x20 playfield - movement, collision, placement, row clears
//! - [`rng`]: seedable LCG for template selection and piece colors
//!
//! # Game rules
//!
//! One active piece falls under a 750 ms gravity countdown. Left/right/down
//! requests translate it when the target cells are free and inside the grid.
//! A blocked descent freezes the piece where it is, spawns the next one, and
//! runs a row-clear sweep: any row with all 10 columns occupied loses its
//! cells, and everything above shifts down one row. A piece spawned onto
//! occupied cells ends the game.
//!
//! Call [`Board::update`](board::Board::update) every frame with elapsed
//! milliseconds and [`Board::apply_action`](board::Board::apply_action) for
//! player input.

pub mod board;
pub mod piece;
pub mod rng;

pub use board::Board;
pub use piece::{CellPos, Piece, SHAPE_TEMPLATES};
pub use rng::SimpleRng;
