//! Animated visual effects
//!
//! Frame-stepped simulations drawn into the virtual canvas: the particle
//! backdrop on the landing section, the pointer trail overlay, and the
//! rotating wireframe room. Each effect owns its state and exposes a
//! `step`/`draw` pair driven by the UI tick.

pub mod particles;
pub mod scene3d;
pub mod trail;

pub use particles::ParticleField;
pub use scene3d::WireframeRoom;
pub use trail::CursorTrail;
