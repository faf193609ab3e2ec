//! TTL (Time-to-live) system.
//!
//! This module provides the [`ttl_system`] that decrements TTL timers and
//! despawns entities when their time runs out.
//!
//! # Time Scaling
//!
//! The countdown respects [`WorldTime::time_scale`](crate::resources::worldtime::WorldTime),
//! so slow-motion playback stretches particle lifetimes too.

use bevy_ecs::prelude::*;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// Decrements TTL and despawns entities when it reaches zero.
pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut commands: Commands,
) {
    let dt = world_time.delta; // delta is already scaled by time_scale
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_despawns_when_expired() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.5,
            ..Default::default()
        });
        let short = world.spawn(Ttl::new(0.4)).id();
        let long = world.spawn(Ttl::new(1.0)).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(ttl_system);
        schedule.run(&mut world);

        assert!(world.get_entity(short).is_err());
        let remaining = world.get::<Ttl>(long).unwrap().remaining;
        assert!((remaining - 0.5).abs() < 1e-6);
    }
}
