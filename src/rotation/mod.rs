//! Decorative image rotation: which catalog images are on the wall, where,
//! and when each one is swapped for the next.

pub mod placement;
pub mod scheduler;
pub mod state;
pub mod timers;

pub use placement::{Placement, Window};
pub use scheduler::{ActivePlacement, RotationScheduler};
pub use state::RotationState;
