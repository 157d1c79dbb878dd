//! Terminal user interface
//!
//! Single-threaded event loop over a ratatui terminal. Streaming network
//! work runs on spawned tokio tasks and reports back through an
//! unbounded channel drained at the top of every loop iteration.

pub mod app;
pub mod sections;
pub mod terminal;
pub mod view;

pub use app::{App, AppMode, AsyncEvent};
pub use sections::Section;
pub use terminal::{init, restore, Tui};
