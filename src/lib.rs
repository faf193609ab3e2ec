//! Final call library.
//!
//! Tick-driven reveal sequencer and medal counter for a fencing club's
//! promotional "final call" screen, built on `bevy_ecs`. This module exposes
//! the components, resources, systems and events for the headless runner and
//! for integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
