//! Rendering module
//!
//! `scene` turns a game state into draw commands; a `Surface` paints them.
//! The Canvas 2D surface only exists on wasm32.

pub mod scene;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::build_scene;
pub use shapes::{DrawCmd, Glow};

/// Something draw commands can be painted on
pub trait Surface {
    fn draw(&mut self, commands: &[DrawCmd]);
}
