//! Particle emitter systems.
//!
//! [`particle_emitter_system`] fires the bursts of every playing
//! [`ParticleEmitter`] and spawns [`Particle`] entities for them.
//! [`particle_motion_system`] integrates particle velocities, and
//! [`clear_particles`] despawns every particle owned by an emitter.
//!
//! # Behavior
//!
//! - Playback time advances by the scaled tick delta
//! - Every burst whose time has been reached fires, in schedule order, so a
//!   long tick can fire several bursts at once
//! - Each burst spawns at most `max_particles - live` particles
//! - Particles get a random direction on the unit sphere, a speed from
//!   `speed_range`, the emitter color and a [`Ttl`] of `lifetime`
//! - The emitter stops itself once its last burst has fired

use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::Vec3;
use log::debug;

use crate::components::particleemitter::{Particle, ParticleEmitter};
use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// System that fires due bursts and spawns particles.
///
/// # Ordering
///
/// Should run **after** the reveal sequencer so a burst at `t = 0` fires on
/// the tick the celebration is triggered.
pub fn particle_emitter_system(
    mut emitter_query: Query<(Entity, &mut ParticleEmitter)>,
    particle_query: Query<&Particle>,
    time: Res<WorldTime>,
    mut commands: Commands,
    mut rng: Local<Rng>,
) {
    let dt = time.delta.max(0.0);

    for (entity, mut emitter) in emitter_query.iter_mut() {
        if !emitter.playing {
            continue;
        }
        emitter.time += dt;

        let mut live = particle_query
            .iter()
            .filter(|p| p.emitter == entity)
            .count() as u32;

        while let Some(burst) = emitter.bursts.get(emitter.next_burst).copied() {
            if burst.time > emitter.time {
                break;
            }
            let count = burst
                .count
                .min(emitter.max_particles.saturating_sub(live));
            debug!(
                "emitter {:?} burst at {:.2}s: {} of {} particles",
                entity, burst.time, count, burst.count
            );
            for _ in 0..count {
                spawn_particle(&mut commands, entity, &emitter, &mut rng);
            }
            live += count;
            emitter.emitted += count;
            emitter.next_burst += 1;
        }

        if emitter.is_finished() {
            emitter.playing = false;
        }
    }
}

/// Sample a random f32 in the range [min, max].
/// If the range is smaller than EPSILON, returns min directly.
#[inline]
fn random_f32_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range < f32::EPSILON {
        return min;
    }
    min + rng.f32() * range
}

/// Uniform random direction on the unit sphere.
fn random_direction(rng: &mut Rng) -> Vec3 {
    let z = random_f32_range(rng, -1.0, 1.0);
    let theta = random_f32_range(rng, 0.0, std::f32::consts::TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

fn spawn_particle(commands: &mut Commands, owner: Entity, emitter: &ParticleEmitter, rng: &mut Rng) {
    let (speed_min, speed_max) = emitter.speed_range;
    let speed = random_f32_range(rng, speed_min, speed_max);
    commands.spawn((
        Particle {
            emitter: owner,
            position: Vec3::ZERO,
            velocity: random_direction(rng) * speed,
            color: emitter.color,
        },
        Ttl::new(emitter.lifetime),
    ));
}

/// Move particles along their velocity.
pub fn particle_motion_system(time: Res<WorldTime>, mut query: Query<&mut Particle>) {
    let dt = time.delta;
    for mut particle in query.iter_mut() {
        let step = particle.velocity * dt;
        particle.position += step;
    }
}

/// Despawn every particle spawned by `emitter`.
pub fn clear_particles(
    commands: &mut Commands,
    particles: &Query<(Entity, &Particle)>,
    emitter: Entity,
) {
    for (entity, particle) in particles.iter() {
        if particle.emitter == emitter {
            commands.entity(entity).try_despawn();
        }
    }
}
