//! src/phase.rs
//!
//! Top-level `phase` module: projection state, axis mapping, and the shared
//! component object the threads and panels work against.

pub mod axis;
pub mod layout;
pub mod range;
pub mod shared;
pub mod view;

/// Re-exports
pub use axis::AxisProjection;
pub use layout::PhaseLayout;
pub use range::{ConfigError, Range};
pub use shared::{PhaseGuard, PhaseShared, SharedPhase};
pub use view::{PhaseView, RenderState, Rendered};
