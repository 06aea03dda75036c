//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer: the board is rasterized into a
//! plain framebuffer of styled character cells, and a terminal backend
//! flushes only the cells that changed since the previous frame.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Rasterization is pure; all I/O lives in the renderer
//! - Precise control over aspect ratio (e.g. 2 chars wide per board cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
