//! Fruit simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - The host drives time through clock callbacks carrying a `ClockHandle`
//! - Gestures arrive as plain calls (`interact`, `begin_drag`, ...)
//! - The renderer pulls a `SessionSnapshot`

pub mod arena;
pub mod clock;
pub mod factory;
pub mod feedback;
pub mod fruit;
pub mod resolver;
pub mod session;
pub mod snapshot;

pub use arena::{PlayArea, reflect_axis};
pub use clock::{ClockHandle, Countdown, SimClock, apply_motion};
pub use factory::FruitFactory;
pub use feedback::{FeedbackQueue, HarvestEvent};
pub use fruit::{Category, Fruit, FruitSize, Gesture, HarvestCounts};
pub use resolver::{ResolvedHarvest, resolve};
pub use session::{HeldFruit, Session, SessionOutcome, SessionState};
pub use snapshot::SessionSnapshot;
