//! Canvas 2D rendering module
//!
//! `layout` turns a render snapshot into pixel geometry and text and is
//! shared by every target; `canvas` paints it in the browser.

pub mod layout;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use layout::{Overlay, Rect};
