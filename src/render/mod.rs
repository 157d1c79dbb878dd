//! Terminal rendering primitives
//!
//! A virtual RGBA framebuffer with continuous coordinates, a small set of
//! drawable shapes, and a half-block rasterizer that folds the buffer
//! into styled ratatui lines. The animated backdrop draws into this layer
//! every frame; everything else in the UI is plain widget text.

pub mod canvas;
pub mod color;
pub mod halfblock;
pub mod shapes;

pub use canvas::Canvas;
pub use color::Color;
pub use halfblock::canvas_to_lines;
pub use shapes::{Circle, Line, Point, Shape};
