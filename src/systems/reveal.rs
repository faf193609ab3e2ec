//! ECS adapter of the reveal sequencer.
//!
//! [`RevealContext`] bundles the queries and message writers a
//! [`RevealSequencer`] needs and implements [`RevealHost`] on top of them:
//!
//! - element writes go to the [`Scale`] and [`Tint`] components,
//! - sounds become [`AudioCmd::PlayFx`] messages,
//! - particles go through the [`ParticleEmitter`] component of the emitter
//!   entity,
//! - notifications become [`RevealMessage`]s.
//!
//! [`reveal_sequencer_system`] advances every sequencer once per tick;
//! [`start_reveal_observer`] and [`reset_reveal_observer`] handle the manual
//! triggers synchronously, so a reset takes effect before the next tick.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::Vec3;
use log::warn;

use crate::components::particleemitter::{Burst, Particle, ParticleEmitter};
use crate::components::revealelement::RevealElement;
use crate::components::revealsequencer::{RevealHost, RevealSequencer};
use crate::components::scale::Scale;
use crate::components::tint::{Rgba, Tint};
use crate::events::audio::AudioCmd;
use crate::events::reveal::{ResetRevealEvent, RevealMessage, StartRevealEvent};
use crate::resources::revealtimeline::RevealTimeline;
use crate::resources::worldtime::WorldTime;
use crate::systems::particleemitter::clear_particles;

/// Bundled system parameters backing [`RevealHost`].
#[derive(SystemParam)]
pub struct RevealContext<'w, 's> {
    pub time: Res<'w, WorldTime>,
    pub commands: Commands<'w, 's>,
    pub elements: Query<
        'w,
        's,
        (
            &'static RevealElement,
            &'static mut Scale,
            &'static mut Tint,
        ),
    >,
    pub emitters: Query<'w, 's, &'static mut ParticleEmitter>,
    pub particles: Query<'w, 's, (Entity, &'static Particle)>,
    pub audio_cmds: MessageWriter<'w, AudioCmd>,
    pub reveal_msgs: MessageWriter<'w, RevealMessage>,
}

impl RevealHost for RevealContext<'_, '_> {
    fn rest_state(&self, element: Entity) -> Option<RevealElement> {
        self.elements.get(element).ok().map(|(rest, _, _)| *rest)
    }

    fn set_scale(&mut self, element: Entity, scale: Vec3) {
        if let Ok((_, mut current, _)) = self.elements.get_mut(element) {
            current.scale = scale;
        }
    }

    fn set_color(&mut self, element: Entity, color: Rgba) {
        if let Ok((_, _, mut tint)) = self.elements.get_mut(element) {
            tint.color = color;
        }
    }

    fn play_fx(&mut self, id: &str) {
        self.audio_cmds.write(AudioCmd::PlayFx { id: id.to_string() });
    }

    fn play_particles(
        &mut self,
        emitter: Entity,
        bursts: &[Burst],
        color: Rgba,
        max_particles: u32,
        elapsed: f32,
    ) {
        match self.emitters.get_mut(emitter) {
            Ok(mut particle_emitter) => {
                particle_emitter.configure_and_play(bursts.iter().copied(), color, max_particles);
                // particle_emitter_system adds this tick's delta next
                particle_emitter.time = elapsed - self.time.delta.max(0.0);
            }
            Err(_) => warn!("celebration emitter {:?} has no ParticleEmitter", emitter),
        }
    }

    fn clear_particles(&mut self, emitter: Entity) {
        if let Ok(mut particle_emitter) = self.emitters.get_mut(emitter) {
            particle_emitter.stop();
        }
        clear_particles(&mut self.commands, &self.particles, emitter);
    }

    fn notify(&mut self, message: RevealMessage) {
        self.reveal_msgs.write(message);
    }
}

/// Advance every sequencer by the tick delta.
///
/// # System Ordering
///
/// Should run **before** [`particle_emitter_system`](crate::systems::particleemitter::particle_emitter_system)
/// and [`forward_audio_cmds`](crate::systems::audio::forward_audio_cmds) so
/// the celebration and sounds it fires go out on the same tick.
pub fn reveal_sequencer_system(
    mut sequencers: Query<&mut RevealSequencer>,
    mut ctx: RevealContext,
) {
    let dt = ctx.time.delta;
    for mut sequencer in sequencers.iter_mut() {
        sequencer.advance(dt, &mut ctx);
    }
}

/// Handle [`StartRevealEvent`]: start the sequencer if it is idle.
pub fn start_reveal_observer(
    trigger: On<StartRevealEvent>,
    mut sequencers: Query<&mut RevealSequencer>,
    mut ctx: RevealContext,
) {
    let event = trigger.event();
    let Ok(mut sequencer) = sequencers.get_mut(event.sequencer) else {
        warn!("start requested for {:?}, which is not a sequencer", event.sequencer);
        return;
    };
    sequencer.start(&mut ctx);
}

/// Handle [`ResetRevealEvent`]: cancel, hide and go back to idle.
pub fn reset_reveal_observer(
    trigger: On<ResetRevealEvent>,
    mut sequencers: Query<&mut RevealSequencer>,
    mut ctx: RevealContext,
) {
    let event = trigger.event();
    let Ok(mut sequencer) = sequencers.get_mut(event.sequencer) else {
        warn!("reset requested for {:?}, which is not a sequencer", event.sequencer);
        return;
    };
    sequencer.reset(&mut ctx);
}

/// Append this tick's reveal messages to the [`RevealTimeline`], if present.
pub fn record_reveal_messages(
    mut reader: MessageReader<RevealMessage>,
    time: Res<WorldTime>,
    timeline: Option<ResMut<RevealTimeline>>,
) {
    let Some(mut timeline) = timeline else {
        reader.clear();
        return;
    };
    for message in reader.read() {
        timeline.push(time.elapsed, time.frame_count, *message);
    }
}

/// Advance the ECS message queue for [`RevealMessage`].
pub fn update_reveal_messages(mut msgs: ResMut<Messages<RevealMessage>>) {
    msgs.update();
}
