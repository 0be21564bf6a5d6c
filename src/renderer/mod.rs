//! Canvas 2D rendering module
//!
//! Drawing reads simulation state and never mutates it.

pub mod color;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::{draw_background, draw_orbs};
