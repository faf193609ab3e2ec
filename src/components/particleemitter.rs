//! Burst-scheduled particle emitter component.
//!
//! The [`ParticleEmitter`] component is the particle sink used by the
//! celebration trigger. It is configured with a burst schedule (time offset
//! and particle count per burst), a color override and a cap on live
//! particles, then played.
//!
//! # How It Works
//!
//! 1. Spawn an entity with a stopped `ParticleEmitter`.
//! 2. Call [`ParticleEmitter::configure_and_play`]; playback time restarts at 0.
//! 3. The `particle_emitter_system` runs each tick:
//!    - Advances playback time
//!    - Fires every burst whose time has been reached, in schedule order
//!    - Spawns [`Particle`] entities with a random direction and speed,
//!      capped so that live particles never exceed `max_particles`
//!    - Stops on its own once every burst has fired
//! 4. [`ParticleEmitter::stop`] halts further bursts;
//!    [`crate::systems::particleemitter::clear_particles`] despawns live ones.
//!
//! # Related
//!
//! - [`crate::systems::particleemitter::particle_emitter_system`] – system that fires bursts
//! - [`crate::components::ttl::Ttl`] – time-to-live for automatic despawn

use bevy_ecs::prelude::*;
use glam::Vec3;
use smallvec::SmallVec;

use crate::components::tint::Rgba;

/// One scheduled burst: `count` particles at `time` seconds after play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    /// Offset from the start of playback in seconds.
    pub time: f32,
    /// Number of particles emitted.
    pub count: u32,
}

impl Burst {
    pub const fn new(time: f32, count: u32) -> Self {
        Self { time, count }
    }
}

/// Burst schedule. Most schedules have three or four entries.
pub type BurstSchedule = SmallVec<[Burst; 4]>;

/// Particle emitter driven by a burst schedule.
///
/// # Fields
///
/// - `bursts` - Burst schedule, sorted by time on configuration
/// - `color` - Color given to every spawned particle
/// - `max_particles` - Cap on live particles owned by this emitter
/// - `speed_range` - Speed range for particles (min, max)
/// - `lifetime` - TTL of spawned particles in seconds
/// - `playing` - Whether bursts are still being fired
/// - `time` - Playback time since the last `configure_and_play`
/// - `next_burst` - Index of the next burst to fire
/// - `emitted` - Particles spawned since the last `configure_and_play`
#[derive(Component, Debug, Clone)]
pub struct ParticleEmitter {
    pub bursts: BurstSchedule,
    pub color: Rgba,
    pub max_particles: u32,
    pub speed_range: (f32, f32),
    pub lifetime: f32,
    pub playing: bool,
    pub time: f32,
    pub next_burst: usize,
    pub emitted: u32,
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self {
            bursts: BurstSchedule::new(),
            color: Rgba::WHITE,
            max_particles: 1000,
            speed_range: (50.0, 150.0),
            lifetime: 2.0,
            playing: false,
            time: 0.0,
            next_burst: 0,
            emitted: 0,
        }
    }
}

impl ParticleEmitter {
    /// Replace the burst schedule, color and cap, and start playback from 0.
    pub fn configure_and_play(
        &mut self,
        bursts: impl IntoIterator<Item = Burst>,
        color_override: Rgba,
        max_particles: u32,
    ) {
        let mut bursts: BurstSchedule = bursts.into_iter().collect();
        bursts.sort_by(|a, b| a.time.total_cmp(&b.time));
        self.bursts = bursts;
        self.color = color_override;
        self.max_particles = max_particles;
        self.time = 0.0;
        self.next_burst = 0;
        self.emitted = 0;
        self.playing = true;
    }

    /// Stop firing bursts. Live particles are left alone.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Whether every burst in the schedule has fired.
    pub fn is_finished(&self) -> bool {
        self.next_burst >= self.bursts.len()
    }
}

/// A particle spawned by a [`ParticleEmitter`].
#[derive(Component, Debug, Clone, Copy)]
pub struct Particle {
    /// Emitter entity that spawned this particle.
    pub emitter: Entity,
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Rgba,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_particle_emitter_default_is_stopped() {
        let e = ParticleEmitter::default();
        assert!(!e.playing);
        assert!(e.bursts.is_empty());
        assert!(e.is_finished());
    }

    #[test]
    fn test_configure_and_play_sorts_and_resets() {
        let mut e = ParticleEmitter {
            time: 4.0,
            next_burst: 2,
            emitted: 77,
            ..Default::default()
        };
        e.configure_and_play(
            [Burst::new(1.0, 30), Burst::new(0.0, 100), Burst::new(0.5, 50)],
            Rgba::GOLD,
            200,
        );
        assert!(e.playing);
        assert!(approx_eq(e.time, 0.0));
        assert_eq!(e.next_burst, 0);
        assert_eq!(e.emitted, 0);
        assert_eq!(e.max_particles, 200);
        assert_eq!(e.color, Rgba::GOLD);
        let times: Vec<f32> = e.bursts.iter().map(|b| b.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
        assert!(!e.is_finished());
    }

    #[test]
    fn test_stop_keeps_schedule() {
        let mut e = ParticleEmitter::default();
        e.configure_and_play([Burst::new(0.0, 10)], Rgba::WHITE, 10);
        e.stop();
        assert!(!e.playing);
        assert_eq!(e.bursts.len(), 1);
    }
}
