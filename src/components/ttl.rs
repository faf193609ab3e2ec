//! Time-to-live component for automatic entity despawning.
//!
//! The [`Ttl`] component counts down time each tick. When the remaining time
//! reaches zero, the entity is despawned. Celebration particles carry one so
//! they disappear on their own after a burst.
//!
//! # Related
//!
//! - [`crate::systems::ttl::ttl_system`] – system that updates and despawns entities

use bevy_ecs::prelude::Component;

/// Time-to-live component that automatically despawns entities after a duration.
///
/// The countdown respects [`WorldTime::time_scale`](crate::resources::worldtime::WorldTime).
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
}

impl Ttl {
    /// Create a new Ttl with the given duration in seconds.
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
