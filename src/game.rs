//! Final-call scene setup and the per-tick update schedule.
//!
//! [`init_world`] inserts the resources and observers every run needs,
//! [`setup_final_call`] spawns the club screen, and
//! [`build_update_schedule`] wires the systems in tick order.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::dynamictext::DynamicText;
use crate::components::medalcounter::MedalCounter;
use crate::components::particleemitter::ParticleEmitter;
use crate::components::revealelement::RevealElement;
use crate::components::revealsequencer::{RevealSequencer, RevealStep};
use crate::components::scale::Scale;
use crate::components::tint::{Rgba, Tint};
use crate::components::tween::TweenMedalCount;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::reveal::RevealMessage;
use crate::resources::animatorconfig::AnimatorConfig;
use crate::resources::audio::AudioBridge;
use crate::resources::textcontent::{TextContent, TextSlot};
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::medalcounter::medal_counter_system;
use crate::systems::particleemitter::{particle_emitter_system, particle_motion_system};
use crate::systems::reveal::{
    record_reveal_messages, reset_reveal_observer, reveal_sequencer_system,
    start_reveal_observer, update_reveal_messages,
};
use crate::systems::ttl::ttl_system;
use crate::systems::tween::tween_medal_count_system;

/// Step layout of the final-call screen: `(slot, highlight, sound)`.
pub const FINAL_CALL_STEPS: [(TextSlot, bool, bool); 7] = [
    (TextSlot::ClubName, true, true),
    (TextSlot::History, false, false),
    (TextSlot::Olympic, true, true),
    (TextSlot::Champions, true, true),
    (TextSlot::Location, false, false),
    (TextSlot::Age, false, false),
    (TextSlot::CallToAction, true, true),
];

/// Entities spawned by [`setup_final_call`].
#[derive(Resource, Debug, Clone)]
pub struct FinalCallScene {
    pub sequencer: Entity,
    /// Text elements in reveal order.
    pub elements: Vec<(TextSlot, Entity)>,
    pub emitter: Entity,
    pub medal_counter: Entity,
}

/// Insert the resources and observers shared by every run.
///
/// Message queues are initialized here so the update schedule works with or
/// without an audio thread.
pub fn init_world(world: &mut World) {
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<RevealMessage>>();

    world.spawn(Observer::new(start_reveal_observer));
    world.spawn(Observer::new(reset_reveal_observer));
    // Ensure the observers are registered before anything is triggered.
    world.flush();
}

/// Spawn the club elements hidden, the celebration emitter, the medal
/// counter and the sequencer.
///
/// The returned [`FinalCallScene`] is also inserted as a resource.
pub fn setup_final_call(
    world: &mut World,
    config: &AnimatorConfig,
    texts: &TextContent,
) -> FinalCallScene {
    let mut elements = Vec::with_capacity(FINAL_CALL_STEPS.len());
    let mut steps = Vec::with_capacity(FINAL_CALL_STEPS.len());

    for (slot, use_highlight, play_sound) in FINAL_CALL_STEPS {
        let rest = RevealElement::capture(&Scale::default(), &Tint::new(Rgba::WHITE));
        let (scale, tint) = rest.hidden();
        let entity = world
            .spawn((rest, scale, tint, DynamicText::new(texts.get(slot))))
            .id();
        elements.push((slot, entity));

        let mut step = RevealStep::new(entity);
        if use_highlight {
            step = step.with_highlight();
        }
        if play_sound {
            step = step.with_sound();
        }
        steps.push(step);
    }

    let emitter = world.spawn(ParticleEmitter::default()).id();

    let medal_counter = world
        .spawn((
            MedalCounter::new(MedalCounter::MIN),
            DynamicText::new(""),
            TweenMedalCount::new(
                MedalCounter::MIN,
                MedalCounter::MAX,
                config.medal_count_duration,
            ),
        ))
        .id();

    let sequencer = world
        .spawn(
            RevealSequencer::new(steps)
                .with_timing(config.to_timing())
                .with_cues(config.to_cues())
                .with_emitter(emitter),
        )
        .id();

    info!(
        "final call scene ready: {} elements, sequencer {:?}",
        elements.len(),
        sequencer
    );

    let scene = FinalCallScene {
        sequencer,
        elements,
        emitter,
        medal_counter,
    };
    world.insert_resource(scene.clone());
    scene
}

/// Build the per-tick update schedule.
///
/// Order within a tick: tweens drive the medal count, which is then
/// rendered to text; the sequencer advances before the emitter so a
/// celebration burst at `t = 0` fires on the same tick; sounds are
/// forwarded to the audio thread when it exists; message queues are
/// advanced last.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems((tween_medal_count_system, medal_counter_system).chain());
    update.add_systems(
        (
            reveal_sequencer_system,
            particle_emitter_system,
            particle_motion_system,
            ttl_system,
        )
            .chain(),
    );
    update.add_systems(
        // audio systems must be together
        (
            forward_audio_cmds.run_if(resource_exists::<AudioBridge>),
            update_bevy_audio_cmds,
            poll_audio_messages.run_if(resource_exists::<AudioBridge>),
            update_bevy_audio_messages,
        )
            .chain()
            .after(reveal_sequencer_system),
    );
    update.add_systems(
        (record_reveal_messages, update_reveal_messages)
            .chain()
            .after(reveal_sequencer_system),
    );
    update
}
