//! Sequenced reveal state machine.
//!
//! A [`RevealSequencer`] owns an ordered, fixed list of [`RevealStep`]s and
//! plays them strictly one after the other. Each step:
//!
//! 1. optionally fires the appearance sound,
//! 2. fades its element in (scale follows the easing curve, alpha follows
//!    linear progress) and snaps it to its rest state,
//! 3. optionally runs a highlight oscillation and snaps back to rest,
//! 4. waits `delay_between_elements` (doubled before the final step; no
//!    wait after it).
//!
//! After the final step the celebration fires: particle bursts on the
//! emitter, the final sound, and a pulse on the last element. The run is
//! then `Complete`; the pulse keeps going on its own until it ends or the
//! sequencer is reset.
//!
//! # Architecture
//!
//! - **One active sub-animation** – an [`Activity`] record `{ step, phase, elapsed }`
//!   advanced by [`RevealSequencer::advance`]. There is no other timed state
//!   apart from the optional [`PulseEffect`].
//! - **Time carries over** – when a phase ends mid-tick the remaining delta
//!   is spent on the next phase, so a run lasts the sum of its phase
//!   durations regardless of tick rate. The celebration hands what is left
//!   of the tick to the emitter and the final pulse.
//! - **Host-agnostic** – every side effect goes through [`RevealHost`]. The
//!   ECS adapter lives in [`crate::systems::reveal`].
//!
//! # Example
//!
//! ```ignore
//! let sequencer = RevealSequencer::new(vec![
//!     RevealStep::new(title).with_highlight().with_sound(),
//!     RevealStep::new(subtitle),
//! ])
//! .with_emitter(emitter);
//! commands.spawn(sequencer);
//! ```

use std::f32::consts::PI;

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info, warn};

use crate::components::particleemitter::Burst;
use crate::components::revealelement::RevealElement;
use crate::components::tint::Rgba;
use crate::components::tween::Easing;
use crate::events::reveal::RevealMessage;
use crate::systems::tween::ease;

/// Celebration burst schedule: `(time, count)`.
pub const CELEBRATION_BURSTS: [Burst; 3] = [
    Burst::new(0.0, 100),
    Burst::new(0.5, 50),
    Burst::new(1.0, 30),
];
/// Live particle cap while celebrating.
pub const CELEBRATION_MAX_PARTICLES: u32 = 200;

/// Maximum blend toward the highlight color.
const HIGHLIGHT_BLEND: f32 = 0.3;
/// Relative scale swing while highlighted.
const HIGHLIGHT_SCALE_SWING: f32 = 0.05;
/// Angular span of the highlight oscillation over its whole duration.
const HIGHLIGHT_SPAN: f32 = 3.0 * PI;
/// Relative scale swing of the final pulse.
const PULSE_SCALE_SWING: f32 = 0.1;
/// Angular speed of the final pulse in radians per second.
const PULSE_ANGULAR_SPEED: f32 = 4.0;

/// Side effects available to the sequencer.
///
/// Elements are addressed by entity. An element that is gone, or never had
/// a [`RevealElement`], reports no rest state and ignores writes.
pub trait RevealHost {
    /// Captured rest state of an element, or `None` when it is absent.
    fn rest_state(&self, element: Entity) -> Option<RevealElement>;
    fn set_scale(&mut self, element: Entity, scale: Vec3);
    fn set_color(&mut self, element: Entity, color: Rgba);
    /// Fire-and-forget one-shot sound.
    fn play_fx(&mut self, id: &str);
    /// Configure the emitter with a burst schedule and start it.
    ///
    /// `elapsed` is the part of the current tick that already lies past the
    /// celebration; playback should read that much once the tick is over.
    fn play_particles(
        &mut self,
        emitter: Entity,
        bursts: &[Burst],
        color: Rgba,
        max_particles: u32,
        elapsed: f32,
    );
    /// Stop the emitter and remove its live particles.
    fn clear_particles(&mut self, emitter: Entity);
    fn notify(&mut self, message: RevealMessage);
}

/// Lifecycle of a sequencer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    #[default]
    Idle,
    Running,
    Complete,
}

impl SequencerState {
    /// Short status readout for control surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            SequencerState::Idle => "READY",
            SequencerState::Running => "RUNNING",
            SequencerState::Complete => "COMPLETE",
        }
    }
}

/// One entry of the reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep {
    /// Element to reveal. `None` marks an unassigned slot, which is skipped.
    pub target: Option<Entity>,
    pub use_highlight: bool,
    pub play_sound: bool,
}

impl RevealStep {
    pub fn new(target: Entity) -> Self {
        Self {
            target: Some(target),
            use_highlight: false,
            play_sound: false,
        }
    }

    /// A step whose element reference is missing.
    pub fn missing() -> Self {
        Self {
            target: None,
            use_highlight: false,
            play_sound: false,
        }
    }

    pub fn with_highlight(mut self) -> Self {
        self.use_highlight = true;
        self
    }

    pub fn with_sound(mut self) -> Self {
        self.play_sound = true;
        self
    }
}

/// Durations and look of the reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTiming {
    pub fade_in_duration: f32,
    pub delay_between_elements: f32,
    pub highlight_duration: f32,
    pub pulse_duration: f32,
    /// Curve applied to the fade-in scale.
    pub easing: Easing,
    pub highlight_color: Rgba,
    pub use_pulse_effect: bool,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            fade_in_duration: 0.8,
            delay_between_elements: 0.3,
            highlight_duration: 0.8,
            pulse_duration: 3.0,
            easing: Easing::SmoothStep,
            highlight_color: Rgba::YELLOW,
            use_pulse_effect: true,
        }
    }
}

/// Sound ids played by the sequencer. `None` disables the cue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealCues {
    pub appearance_fx: Option<String>,
    pub final_call_fx: Option<String>,
}

/// Phase of the active step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    FadeIn,
    Highlight,
    /// Pause after the step, before the next one begins.
    Delay,
}

/// The single sub-animation currently being advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activity {
    pub step: usize,
    pub phase: RevealPhase,
    pub elapsed: f32,
}

/// Final pulse running on the last element after the celebration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseEffect {
    pub target: Entity,
    pub elapsed: f32,
}

/// Ordered reveal of visual elements followed by a celebration.
#[derive(Component, Debug, Clone)]
pub struct RevealSequencer {
    steps: Vec<RevealStep>,
    pub timing: RevealTiming,
    pub cues: RevealCues,
    /// Particle emitter used by the celebration.
    pub emitter: Option<Entity>,
    state: SequencerState,
    next_step: usize,
    activity: Option<Activity>,
    pulse: Option<PulseEffect>,
}

impl RevealSequencer {
    pub fn new(steps: Vec<RevealStep>) -> Self {
        Self {
            steps,
            timing: RevealTiming::default(),
            cues: RevealCues::default(),
            emitter: None,
            state: SequencerState::Idle,
            next_step: 0,
            activity: None,
            pulse: None,
        }
    }

    pub fn with_timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_cues(mut self, cues: RevealCues) -> Self {
        self.cues = cues;
        self
    }

    pub fn with_emitter(mut self, emitter: Entity) -> Self {
        self.emitter = Some(emitter);
        self
    }

    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn activity(&self) -> Option<Activity> {
        self.activity
    }

    pub fn pulse(&self) -> Option<PulseEffect> {
        self.pulse
    }

    /// Element currently being animated by a fade, highlight or pulse.
    pub fn animating_element(&self) -> Option<Entity> {
        match self.activity {
            Some(Activity { step, phase, .. }) if phase != RevealPhase::Delay => {
                self.steps.get(step).and_then(|s| s.target)
            }
            _ => self.pulse.map(|p| p.target),
        }
    }

    /// Seconds from start to the celebration when every element is present.
    pub fn run_length(&self) -> f32 {
        let count = self.steps.len();
        let mut total = 0.0;
        for (index, step) in self.steps.iter().enumerate() {
            total += self.phase_duration(&Activity {
                step: index,
                phase: RevealPhase::FadeIn,
                elapsed: 0.0,
            });
            if step.use_highlight {
                total += self.timing.highlight_duration.max(0.0);
            }
            if index + 1 < count {
                total += self.phase_duration(&Activity {
                    step: index,
                    phase: RevealPhase::Delay,
                    elapsed: 0.0,
                });
            }
        }
        total
    }

    /// Leave `Idle` and run the steps from the first one.
    ///
    /// Returns `false` and changes nothing if the sequencer is not idle.
    pub fn start(&mut self, host: &mut impl RevealHost) -> bool {
        if self.state != SequencerState::Idle {
            warn!(
                "reveal sequence already {}; start ignored",
                self.state.label()
            );
            return false;
        }
        self.state = SequencerState::Running;
        self.next_step = 0;
        self.activity = None;
        self.pulse = None;
        host.notify(RevealMessage::Started);
        info!("reveal sequence started ({} steps)", self.steps.len());
        true
    }

    /// Cancel every in-flight effect, hide all elements, clear particles
    /// and go back to `Idle`. Safe to call in any state, any number of times.
    pub fn reset(&mut self, host: &mut impl RevealHost) {
        self.state = SequencerState::Idle;
        self.next_step = 0;
        self.activity = None;
        self.pulse = None;
        self.hide_elements(host);
        if let Some(emitter) = self.emitter {
            host.clear_particles(emitter);
        }
        host.notify(RevealMessage::Reset);
        info!("reveal sequence reset, ready to run again");
    }

    /// Put every step element in its hidden state.
    pub fn hide_elements(&self, host: &mut impl RevealHost) {
        for element in self.steps.iter().filter_map(|s| s.target) {
            if let Some(rest) = host.rest_state(element) {
                let (scale, tint) = rest.hidden();
                host.set_scale(element, scale.scale);
                host.set_color(element, tint.color);
            }
        }
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32, host: &mut impl RevealHost) {
        let dt = dt.max(0.0);
        self.advance_pulse(dt, host);

        let mut budget = dt;
        while self.state == SequencerState::Running {
            let Some(mut activity) = self.activity.take() else {
                self.begin_next_step(budget, host);
                continue;
            };
            let duration = self.phase_duration(&activity);
            let needed = (duration - activity.elapsed).max(0.0);
            if budget < needed {
                activity.elapsed += budget;
                self.apply_phase(&activity, host);
                self.activity = Some(activity);
                return;
            }
            budget -= needed;
            activity.elapsed = duration;
            self.finish_phase(activity, host);
        }
    }

    fn phase_duration(&self, activity: &Activity) -> f32 {
        match activity.phase {
            RevealPhase::FadeIn => self.timing.fade_in_duration,
            RevealPhase::Highlight => self.timing.highlight_duration,
            RevealPhase::Delay => {
                // Longer pause before the final step.
                if activity.step + 2 == self.steps.len() {
                    self.timing.delay_between_elements * 2.0
                } else {
                    self.timing.delay_between_elements
                }
            }
        }
        .max(0.0)
    }

    fn begin_next_step(&mut self, budget: f32, host: &mut impl RevealHost) {
        let index = self.next_step;
        let Some(step) = self.steps.get(index).copied() else {
            self.trigger_celebration(budget, host);
            return;
        };

        let present = step.target.filter(|e| host.rest_state(*e).is_some());
        if present.is_none() {
            warn!("reveal step {} has no element, skipping", index);
            host.notify(RevealMessage::StepSkipped { index });
            self.after_step(index);
            return;
        }

        debug!("reveal step {} begins", index);
        host.notify(RevealMessage::StepStarted { index });
        if step.play_sound
            && let Some(fx) = &self.cues.appearance_fx
        {
            host.play_fx(fx);
        }
        self.activity = Some(Activity {
            step: index,
            phase: RevealPhase::FadeIn,
            elapsed: 0.0,
        });
    }

    /// Queue the pause that follows step `index`, if any.
    fn after_step(&mut self, index: usize) {
        self.next_step = index + 1;
        self.activity = if index + 1 < self.steps.len() {
            Some(Activity {
                step: index,
                phase: RevealPhase::Delay,
                elapsed: 0.0,
            })
        } else {
            None
        };
    }

    fn apply_phase(&self, activity: &Activity, host: &mut impl RevealHost) {
        let Some(element) = self.steps.get(activity.step).and_then(|s| s.target) else {
            return;
        };
        let Some(rest) = host.rest_state(element) else {
            return;
        };
        match activity.phase {
            RevealPhase::FadeIn => {
                let progress = normalized(activity.elapsed, self.timing.fade_in_duration);
                let scale_progress = ease(self.timing.easing, progress);
                host.set_scale(element, rest.base_scale * scale_progress);
                host.set_color(element, rest.base_color.with_alpha(progress));
            }
            RevealPhase::Highlight => {
                let progress = normalized(activity.elapsed, self.timing.highlight_duration);
                let wave = (progress * HIGHLIGHT_SPAN).sin();
                let amount = (0.5 + 0.5 * wave) * HIGHLIGHT_BLEND;
                host.set_color(
                    element,
                    rest.base_color.lerp(self.timing.highlight_color, amount),
                );
                host.set_scale(
                    element,
                    rest.base_scale * (1.0 + wave * HIGHLIGHT_SCALE_SWING),
                );
            }
            RevealPhase::Delay => {}
        }
    }

    fn finish_phase(&mut self, activity: Activity, host: &mut impl RevealHost) {
        let index = activity.step;
        let element = self.steps.get(index).and_then(|s| s.target);
        match activity.phase {
            RevealPhase::FadeIn => {
                self.snap_to_rest(element, host);
                host.notify(RevealMessage::FadeFinished { index });
                if self.steps[index].use_highlight {
                    self.activity = Some(Activity {
                        step: index,
                        phase: RevealPhase::Highlight,
                        elapsed: 0.0,
                    });
                } else {
                    self.after_step(index);
                }
            }
            RevealPhase::Highlight => {
                self.snap_to_rest(element, host);
                host.notify(RevealMessage::HighlightFinished { index });
                self.after_step(index);
            }
            RevealPhase::Delay => {
                host.notify(RevealMessage::DelayFinished { index });
                self.activity = None;
            }
        }
    }

    fn snap_to_rest(&self, element: Option<Entity>, host: &mut impl RevealHost) {
        let Some(element) = element else {
            return;
        };
        if let Some(rest) = host.rest_state(element) {
            let (scale, tint) = rest.rest();
            host.set_scale(element, scale.scale);
            host.set_color(element, tint.color);
        }
    }

    /// `leftover` is the unspent part of the tick.
    fn trigger_celebration(&mut self, leftover: f32, host: &mut impl RevealHost) {
        match self.emitter {
            Some(emitter) => host.play_particles(
                emitter,
                &CELEBRATION_BURSTS,
                Rgba::GOLD,
                CELEBRATION_MAX_PARTICLES,
                leftover,
            ),
            None => warn!("no celebration emitter assigned, skipping particles"),
        }
        if let Some(fx) = &self.cues.final_call_fx {
            host.play_fx(fx);
        }

        let last = self.steps.last().and_then(|s| s.target);
        if self.timing.use_pulse_effect
            && let Some(target) = last.filter(|e| host.rest_state(*e).is_some())
        {
            self.pulse = Some(PulseEffect {
                target,
                elapsed: 0.0,
            });
        }

        self.activity = None;
        self.state = SequencerState::Complete;
        host.notify(RevealMessage::CelebrationTriggered);
        info!("final celebration triggered");
        self.advance_pulse(leftover, host);
    }

    fn advance_pulse(&mut self, dt: f32, host: &mut impl RevealHost) {
        let Some(mut pulse) = self.pulse.take() else {
            return;
        };
        let Some(rest) = host.rest_state(pulse.target) else {
            return;
        };
        pulse.elapsed += dt;
        if pulse.elapsed >= self.timing.pulse_duration {
            host.set_scale(pulse.target, rest.base_scale);
            host.notify(RevealMessage::PulseFinished);
            return;
        }
        let factor = 1.0 + (pulse.elapsed * PULSE_ANGULAR_SPEED).sin() * PULSE_SCALE_SWING;
        host.set_scale(pulse.target, rest.base_scale * factor);
        self.pulse = Some(pulse);
    }
}

fn normalized(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}
