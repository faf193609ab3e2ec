//! Audio thread and the systems that bridge it with the ECS world.
//!
//! - [`audio_thread`] runs on its own OS thread, owns the
//!   [`AudioBackend`](crate::resources::audio::AudioBackend), and processes
//!   [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! - [`forward_audio_cmds`] pushes `AudioCmd` messages written this tick to
//!   the thread; [`update_bevy_audio_cmds`] advances that queue.
//! - [`poll_audio_messages`] non-blockingly drains the thread's replies into
//!   the ECS queue; [`update_bevy_audio_messages`] advances it.
//!
//! Sends never block and are never awaited. A play command for an id that
//! failed to load is reported and otherwise ignored.
//!
//! See also: [`crate::events::audio`] and [`crate::resources::audio`].

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::{AudioBackend, AudioBridge};
use bevy_ecs::prelude::{MessageReader, MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};

/// Drain any pending replies from the audio thread and enqueue them into the
/// ECS [`Messages<AudioMessage>`] mailbox.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
///
/// Run this after [`poll_audio_messages`] in the schedule.
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the dedicated audio thread.
///
/// Blocks on the command channel and handles each [`AudioCmd`] in arrival
/// order until it receives [`AudioCmd::Shutdown`] or the sender is dropped,
/// then unloads everything and exits.
pub fn audio_thread(
    rx_cmd: Receiver<AudioCmd>,
    tx_msg: Sender<AudioMessage>,
    mut backend: Box<dyn AudioBackend>,
) {
    info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::LoadFx { id, path } => match backend.load_fx(&id, &path) {
                Ok(()) => {
                    debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                    let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                }
                Err(e) => {
                    warn!("[audio] fx load failed: {}", e);
                    let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                        id,
                        error: e.to_string(),
                    });
                }
            },
            AudioCmd::PlayFx { id } => match backend.play_fx(&id) {
                Ok(()) => {
                    let _ = tx_msg.send(AudioMessage::FxPlayed { id });
                }
                Err(e) => {
                    warn!("[audio] fx play failed: {}", e);
                    let _ = tx_msg.send(AudioMessage::FxPlayFailed {
                        id,
                        error: e.to_string(),
                    });
                }
            },
            AudioCmd::Shutdown => {
                debug!("[audio] shutdown requested");
                break;
            }
        }
    }

    backend.unload_all();
    let _ = tx_msg.send(AudioMessage::FxUnloadedAll);
    info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
}
