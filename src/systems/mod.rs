//! Final call systems.
//!
//! Submodules overview
//! - [`audio`] – bridge with the audio thread (forward commands, poll replies)
//! - [`medalcounter`] – render medal counts into their text
//! - [`particleemitter`] – fire emitter bursts and move particles
//! - [`reveal`] – ECS adapter, tick system and observers of the reveal sequencer
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn entities whose time-to-live ran out
//! - [`tween`] – easing functions and the medal count timeline

pub mod audio;
pub mod medalcounter;
pub mod particleemitter;
pub mod reveal;
pub mod time;
pub mod ttl;
pub mod tween;
