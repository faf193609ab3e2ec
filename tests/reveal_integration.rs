//! End-to-end tests of the reveal sequencer running in the full update
//! schedule, with observers, the particle emitter and the message queues.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use glam::Vec3;

use finalcall::components::particleemitter::{Particle, ParticleEmitter};
use finalcall::components::revealelement::RevealElement;
use finalcall::components::revealsequencer::{
    RevealCues, RevealSequencer, RevealStep, RevealTiming, SequencerState,
};
use finalcall::components::scale::Scale;
use finalcall::components::tint::{Rgba, Tint};
use finalcall::events::audio::AudioCmd;
use finalcall::events::reveal::{ResetRevealEvent, RevealMessage, StartRevealEvent};
use finalcall::game;
use finalcall::resources::revealtimeline::RevealTimeline;
use finalcall::resources::worldtime::WorldTime;
use finalcall::systems::time::update_world_time;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-3;

struct Harness {
    world: World,
    schedule: Schedule,
    sequencer: Entity,
    elements: Vec<Entity>,
    emitter: Entity,
    audio: SystemState<MessageReader<'static, 'static, AudioCmd>>,
    played: Vec<String>,
}

impl Harness {
    /// `flags` is `(highlight, sound)` per step.
    fn new(flags: &[(bool, bool)], timing: RevealTiming) -> Self {
        let mut world = World::new();
        game::init_world(&mut world);
        world.insert_resource(RevealTimeline::default());

        let elements: Vec<Entity> = flags
            .iter()
            .map(|_| {
                let rest = RevealElement::new(Vec3::ONE, Rgba::WHITE);
                let (scale, tint) = rest.hidden();
                world.spawn((rest, scale, tint)).id()
            })
            .collect();
        let steps = elements
            .iter()
            .zip(flags)
            .map(|(e, (highlight, sound))| {
                let mut step = RevealStep::new(*e);
                if *highlight {
                    step = step.with_highlight();
                }
                if *sound {
                    step = step.with_sound();
                }
                step
            })
            .collect();
        let emitter = world.spawn(ParticleEmitter::default()).id();
        let sequencer = world
            .spawn(
                RevealSequencer::new(steps)
                    .with_timing(timing)
                    .with_cues(RevealCues {
                        appearance_fx: Some("appearance".into()),
                        final_call_fx: Some("final_call".into()),
                    })
                    .with_emitter(emitter),
            )
            .id();

        let audio = SystemState::new(&mut world);
        Self {
            world,
            schedule: game::build_update_schedule(),
            sequencer,
            elements,
            emitter,
            audio,
            played: Vec::new(),
        }
    }

    fn start(&mut self) {
        self.world.trigger(StartRevealEvent {
            sequencer: self.sequencer,
        });
    }

    fn reset(&mut self) {
        self.world.trigger(ResetRevealEvent {
            sequencer: self.sequencer,
        });
        self.world.flush();
    }

    fn tick(&mut self) {
        update_world_time(&mut self.world, DT);
        self.schedule.run(&mut self.world);
        let mut reader = self.audio.get_mut(&mut self.world);
        for cmd in reader.read() {
            if let AudioCmd::PlayFx { id } = cmd {
                self.played.push(id.clone());
            }
        }
    }

    fn run_for(&mut self, seconds: f32) {
        let ticks = (seconds / DT).round() as usize;
        for _ in 0..ticks {
            self.tick();
        }
    }

    fn sequencer(&self) -> &RevealSequencer {
        self.world
            .get::<RevealSequencer>(self.sequencer)
            .expect("sequencer entity")
    }

    fn state(&self) -> SequencerState {
        self.sequencer().state()
    }

    fn elapsed(&self) -> f32 {
        self.world.resource::<WorldTime>().elapsed
    }

    fn messages(&self) -> Vec<RevealMessage> {
        self.world.resource::<RevealTimeline>().messages().collect()
    }

    fn count(&self, message: RevealMessage) -> usize {
        self.messages().iter().filter(|m| **m == message).count()
    }

    fn time_of(&self, message: RevealMessage) -> f32 {
        self.world
            .resource::<RevealTimeline>()
            .time_of(message)
            .unwrap_or_else(|| panic!("{:?} never happened", message))
    }

    fn scale(&self, e: Entity) -> Vec3 {
        self.world.get::<Scale>(e).unwrap().scale
    }

    fn color(&self, e: Entity) -> Rgba {
        self.world.get::<Tint>(e).unwrap().color
    }

    fn is_hidden(&self, e: Entity) -> bool {
        self.scale(e) == Vec3::ZERO && self.color(e).a == 0.0
    }

    fn is_at_rest(&self, e: Entity) -> bool {
        self.scale(e) == Vec3::ONE && self.color(e) == Rgba::WHITE
    }

    fn particle_count(&mut self) -> usize {
        let emitter = self.emitter;
        self.world
            .query::<&Particle>()
            .iter(&self.world)
            .filter(|p| p.emitter == emitter)
            .count()
    }
}

/// Expect `message` within one tick after `expected` seconds.
fn assert_happened_at(h: &Harness, message: RevealMessage, expected: f32) {
    let t = h.time_of(message);
    assert!(
        t >= expected - EPSILON && t <= expected + DT + EPSILON,
        "{:?} at {} expected {}",
        message,
        t,
        expected
    );
}

#[test]
fn test_three_steps_order_timing_and_single_celebration() {
    let mut h = Harness::new(
        &[(false, true), (false, false), (false, true)],
        RevealTiming::default(),
    );
    h.start();
    h.run_for(8.0);

    use RevealMessage::*;
    let messages: Vec<RevealMessage> = h
        .messages()
        .into_iter()
        .filter(|m| *m != PulseFinished)
        .collect();
    assert_eq!(
        messages,
        vec![
            Started,
            StepStarted { index: 0 },
            FadeFinished { index: 0 },
            DelayFinished { index: 0 },
            StepStarted { index: 1 },
            FadeFinished { index: 1 },
            DelayFinished { index: 1 },
            StepStarted { index: 2 },
            FadeFinished { index: 2 },
            CelebrationTriggered,
        ]
    );

    // fade 0.8, wait 0.3, fade 0.8, doubled wait 0.6, fade 0.8
    assert_happened_at(&h, FadeFinished { index: 0 }, 0.8);
    assert_happened_at(&h, StepStarted { index: 1 }, 1.1);
    assert_happened_at(&h, StepStarted { index: 2 }, 2.5);
    assert_happened_at(&h, CelebrationTriggered, 3.3);
    assert_happened_at(&h, PulseFinished, 6.3);

    assert_eq!(h.count(CelebrationTriggered), 1);
    assert_eq!(h.played, vec!["appearance", "appearance", "final_call"]);
    assert_eq!(h.state(), SequencerState::Complete);
    for e in h.elements.clone() {
        assert!(h.is_at_rest(e));
    }
    let emitter = h.world.get::<ParticleEmitter>(h.emitter).unwrap();
    assert_eq!(emitter.emitted, 180);
    assert_eq!(emitter.color, Rgba::GOLD);
}

#[test]
fn test_highlighted_first_and_last_steps_celebrate_after_last_highlight() {
    let mut h = Harness::new(
        &[(true, true), (false, false), (true, true)],
        RevealTiming::default(),
    );
    h.start();
    h.run_for(9.0);

    use RevealMessage::*;
    let messages: Vec<RevealMessage> = h
        .messages()
        .into_iter()
        .filter(|m| *m != PulseFinished)
        .collect();
    assert_eq!(
        messages,
        vec![
            Started,
            StepStarted { index: 0 },
            FadeFinished { index: 0 },
            HighlightFinished { index: 0 },
            DelayFinished { index: 0 },
            StepStarted { index: 1 },
            FadeFinished { index: 1 },
            DelayFinished { index: 1 },
            StepStarted { index: 2 },
            FadeFinished { index: 2 },
            HighlightFinished { index: 2 },
            CelebrationTriggered,
        ]
    );

    // fade 0.8 + highlight 0.8, wait 0.3, fade 0.8, doubled wait 0.6,
    // fade 0.8 + highlight 0.8
    assert_happened_at(&h, HighlightFinished { index: 0 }, 1.6);
    assert_happened_at(&h, StepStarted { index: 1 }, 1.9);
    assert_happened_at(&h, StepStarted { index: 2 }, 3.3);
    assert_happened_at(&h, FadeFinished { index: 2 }, 4.1);
    assert_happened_at(&h, HighlightFinished { index: 2 }, 4.9);
    assert_happened_at(&h, CelebrationTriggered, 4.9);
    assert!(h.time_of(HighlightFinished { index: 2 }) <= h.time_of(CelebrationTriggered));
    assert_happened_at(&h, PulseFinished, 7.9);

    assert_eq!(h.count(CelebrationTriggered), 1);
    assert_eq!(h.played, vec!["appearance", "appearance", "final_call"]);
    assert_eq!(h.state(), SequencerState::Complete);
    for e in h.elements.clone() {
        assert!(h.is_at_rest(e));
    }
    assert_eq!(h.world.get::<ParticleEmitter>(h.emitter).unwrap().emitted, 180);
}

#[test]
fn test_celebration_effects_start_at_the_exact_celebration_time() {
    // 0.81 falls between two ticks, so the celebration tick has time to spare
    let timing = RevealTiming {
        fade_in_duration: 0.81,
        ..RevealTiming::default()
    };
    let mut h = Harness::new(&[(false, false)], timing);
    h.start();
    while h.state() != SequencerState::Complete {
        h.tick();
    }

    let spare = h.elapsed() - 0.81;
    assert!(spare > EPSILON && spare < DT - EPSILON);
    let emitter = h.world.get::<ParticleEmitter>(h.emitter).unwrap();
    assert!(approx(emitter.time, spare), "emitter at {}", emitter.time);
    let pulse = h.sequencer().pulse().expect("pulse running");
    assert!(approx(pulse.elapsed, spare), "pulse at {}", pulse.elapsed);
}

#[test]
fn test_elements_are_hidden_or_at_rest_outside_their_window() {
    let mut h = Harness::new(
        &[(true, true), (false, false), (true, true), (true, false)],
        RevealTiming::default(),
    );
    h.start();
    let mut ticks = 0;
    while ticks < 900 {
        h.tick();
        ticks += 1;
        let animating = h.sequencer().animating_element();
        for e in h.elements.clone() {
            if Some(e) == animating {
                continue;
            }
            assert!(
                h.is_hidden(e) || h.is_at_rest(e),
                "element {:?} caught mid-animation at {:.3}s",
                e,
                h.elapsed()
            );
        }
    }
    assert_eq!(h.state(), SequencerState::Complete);
}

#[test]
fn test_run_length_scales_with_step_count() {
    for n in [2usize, 5, 8] {
        let flags = vec![(false, false); n];
        let mut h = Harness::new(&flags, RevealTiming::default());
        h.start();
        h.run_for(n as f32 * 1.2 + 1.0);
        // N fades, N-2 plain waits and one doubled wait
        let expected = n as f32 * 0.8 + (n as f32 - 2.0) * 0.3 + 0.6;
        assert_happened_at(&h, RevealMessage::CelebrationTriggered, expected);
        assert!(approx(h.sequencer().run_length(), expected));
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn test_double_start_runs_once() {
    let mut h = Harness::new(&[(false, false), (false, false)], RevealTiming::default());
    h.start();
    h.start();
    h.run_for(0.5);
    h.start();
    h.run_for(3.0);

    assert_eq!(h.count(RevealMessage::Started), 1);
    assert_eq!(h.count(RevealMessage::StepStarted { index: 0 }), 1);
    assert_eq!(h.count(RevealMessage::CelebrationTriggered), 1);
}

#[test]
fn test_reset_mid_highlight_hides_everything_and_allows_rerun() {
    let mut h = Harness::new(
        &[(true, true), (true, true), (false, false)],
        RevealTiming::default(),
    );
    h.start();
    // fade 0.8 then into the highlight of the first element
    h.run_for(1.2);
    assert_eq!(h.sequencer().animating_element(), Some(h.elements[0]));

    h.reset();
    assert_eq!(h.state(), SequencerState::Idle);
    for e in h.elements.clone() {
        assert!(h.is_hidden(e));
    }

    let before = h.messages().len();
    h.run_for(2.0);
    let after: Vec<RevealMessage> = h.messages()[before..].to_vec();
    assert_eq!(after, vec![RevealMessage::Reset]);
    for e in h.elements.clone() {
        assert!(h.is_hidden(e));
    }

    h.start();
    h.run_for(6.0);
    assert_eq!(h.state(), SequencerState::Complete);
    assert_eq!(h.count(RevealMessage::CelebrationTriggered), 1);
}

#[test]
fn test_reset_after_celebration_clears_particles_and_pulse() {
    let mut h = Harness::new(&[(false, false), (false, true)], RevealTiming::default());
    h.start();
    h.run_for(2.5);
    assert_eq!(h.state(), SequencerState::Complete);
    assert!(h.particle_count() > 0);
    assert!(h.sequencer().pulse().is_some());

    h.reset();
    assert_eq!(h.particle_count(), 0);
    assert!(!h.world.get::<ParticleEmitter>(h.emitter).unwrap().playing);
    assert!(h.sequencer().pulse().is_none());

    h.run_for(1.0);
    let last = h.elements[1];
    assert!(h.is_hidden(last));
    assert_eq!(h.particle_count(), 0);
    assert_eq!(h.count(RevealMessage::PulseFinished), 0);
}

#[test]
fn test_reset_is_idempotent() {
    let mut h = Harness::new(&[(false, false)], RevealTiming::default());
    h.reset();
    h.reset();
    assert_eq!(h.state(), SequencerState::Idle);
    h.run_for(0.1);
    assert_eq!(h.count(RevealMessage::Reset), 2);
    assert!(h.is_hidden(h.elements[0]));
}

#[test]
fn test_despawned_element_is_skipped_with_its_delay() {
    let mut h = Harness::new(
        &[(false, false), (false, true), (false, false)],
        RevealTiming::default(),
    );
    let missing = h.elements[1];
    h.world.despawn(missing);
    h.start();
    h.run_for(4.0);

    use RevealMessage::*;
    assert_eq!(h.count(StepSkipped { index: 1 }), 1);
    assert_eq!(h.count(StepStarted { index: 1 }), 0);
    // the skipped step still waits its doubled delay before the last one
    assert_happened_at(&h, StepStarted { index: 2 }, 0.8 + 0.3 + 0.6);
    assert_eq!(h.count(CelebrationTriggered), 1);
    assert_eq!(h.played, vec!["final_call"]);
}

#[test]
fn test_empty_sequence_goes_straight_to_celebration() {
    let mut h = Harness::new(&[], RevealTiming::default());
    h.start();
    h.tick();
    assert_eq!(h.state(), SequencerState::Complete);
    assert_eq!(
        h.messages(),
        vec![RevealMessage::Started, RevealMessage::CelebrationTriggered]
    );
    assert!(h.sequencer().pulse().is_none());
}

#[test]
fn test_pulse_can_be_disabled() {
    let timing = RevealTiming {
        use_pulse_effect: false,
        ..RevealTiming::default()
    };
    let mut h = Harness::new(&[(false, false)], timing);
    h.start();
    h.run_for(1.0);
    assert_eq!(h.state(), SequencerState::Complete);
    assert!(h.sequencer().pulse().is_none());
    assert!(h.is_at_rest(h.elements[0]));
}
