//! ECS components for entities.
//!
//! Submodules overview:
//! - [`dynamictext`] – text sink for an on-screen label
//! - [`medalcounter`] – integer medal count rendered as a pluralized label
//! - [`particleemitter`] – burst-scheduled particle emitter and its particles
//! - [`revealelement`] – captured rest state of a revealable element
//! - [`revealsequencer`] – ordered reveal state machine and its host trait
//! - [`scale`] – current 3D scale of an element
//! - [`tint`] – RGBA color type and the current color of an element
//! - [`ttl`] – time-to-live countdown for automatic despawning
//! - [`tween`] – easing curves and the medal count timeline

pub mod dynamictext;
pub mod medalcounter;
pub mod particleemitter;
pub mod revealelement;
pub mod revealsequencer;
pub mod scale;
pub mod tint;
pub mod ttl;
pub mod tween;
