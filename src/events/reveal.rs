//! Reveal sequencer triggers and notifications.
//!
//! [`StartRevealEvent`] and [`ResetRevealEvent`] are the two manual triggers
//! of a [`RevealSequencer`](crate::components::revealsequencer::RevealSequencer).
//! They are handled by observers in [`crate::systems::reveal`], so a debug
//! panel, a CLI or an external timeline driver only needs to call
//! `world.trigger(...)`.
//!
//! [`RevealMessage`] is the notification stream the sequencer writes while
//! it runs: one message per phase boundary.
//!
//! # Example
//!
//! ```ignore
//! world.trigger(StartRevealEvent { sequencer });
//! // ... later, from any state:
//! world.trigger(ResetRevealEvent { sequencer });
//! ```

use bevy_ecs::prelude::*;
use serde::Serialize;

/// Request that a sequencer start its run. Ignored unless it is idle.
#[derive(Event, Debug, Clone, Copy)]
pub struct StartRevealEvent {
    /// Entity holding the [`RevealSequencer`](crate::components::revealsequencer::RevealSequencer).
    pub sequencer: Entity,
}

/// Request that a sequencer cancel everything and hide its elements.
#[derive(Event, Debug, Clone, Copy)]
pub struct ResetRevealEvent {
    /// Entity holding the [`RevealSequencer`](crate::components::revealsequencer::RevealSequencer).
    pub sequencer: Entity,
}

/// Progress notifications written by the sequencer.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevealMessage {
    /// The sequencer left `Idle`.
    Started,
    /// A step's element began fading in.
    StepStarted { index: usize },
    /// A step's element was absent; the step was skipped.
    StepSkipped { index: usize },
    /// The fade-in of a step finished and the element is at rest.
    FadeFinished { index: usize },
    /// The highlight of a step finished and the element is at rest.
    HighlightFinished { index: usize },
    /// The pause after a step finished.
    DelayFinished { index: usize },
    /// Particles, final sound and pulse were fired; the run is complete.
    CelebrationTriggered,
    /// The final pulse ended and the last element is back at rest.
    PulseFinished,
    /// The sequencer was reset to `Idle`.
    Reset,
}
