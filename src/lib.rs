//! # folio
//!
//! A terminal portfolio: animated particle landing, profile-driven
//! content sections, a rate-limited streaming AI assistant backed by
//! Google Gemini, and a one-key resume PDF export. The page is a single
//! scrolled column rendered with ratatui; effects are drawn into a
//! virtual framebuffer and folded to half-block cells.

pub mod chat;
pub mod effects;
pub mod errors;
pub mod gemini;
pub mod pdf;
pub mod profile;
pub mod render;
pub mod ui;

pub use errors::{FolioError, Result};
