//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] and message resources. Call
//! [`shutdown_audio`] during teardown to stop the thread and free every
//! loaded sound.
//!
//! The thread does not talk to a sound device itself. It owns a boxed
//! [`AudioBackend`], so a headless run uses [`LogAudioBackend`] and a player
//! with a real mixer plugs its own implementation in.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::info;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Failures reported by an [`AudioBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("sound '{0}' is not loaded")]
    NotLoaded(String),
    #[error("cannot load sound '{id}' from '{path}': {reason}")]
    LoadFailed {
        id: String,
        path: String,
        reason: String,
    },
}

/// One-shot sound player owned by the audio thread.
pub trait AudioBackend: Send {
    /// Load (or replace) the sound stored under `id`.
    fn load_fx(&mut self, id: &str, path: &str) -> Result<(), AudioError>;
    /// Start playing `id`. Returns immediately.
    fn play_fx(&mut self, id: &str) -> Result<(), AudioError>;
    /// Forget every loaded sound. Called once as the thread exits.
    fn unload_all(&mut self);
}

/// Headless backend: remembers which ids are loaded and logs plays.
#[derive(Debug, Default)]
pub struct LogAudioBackend {
    sounds: FxHashMap<String, String>,
}

impl LogAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for LogAudioBackend {
    fn load_fx(&mut self, id: &str, path: &str) -> Result<(), AudioError> {
        if path.is_empty() {
            return Err(AudioError::LoadFailed {
                id: id.to_string(),
                path: path.to_string(),
                reason: "empty path".to_string(),
            });
        }
        self.sounds.insert(id.to_string(), path.to_string());
        Ok(())
    }

    fn play_fx(&mut self, id: &str) -> Result<(), AudioError> {
        match self.sounds.get(id) {
            Some(path) => {
                info!("[audio] playing '{}' ({})", id, path);
                Ok(())
            }
            None => Err(AudioError::NotLoaded(id.to_string())),
        }
    }

    fn unload_all(&mut self) {
        self.sounds.clear();
    }
}

/// Shared bridge between the ECS world and the audio thread.
///
/// This resource is created by [`setup_audio`]. Systems send commands by
/// writing `AudioCmd` messages, which
/// [`forward_audio_cmds`](crate::systems::audio::forward_audio_cmds) pushes
/// through [`AudioBridge::tx_cmd`].
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the audio thread and register bridge resources.
///
/// This function:
/// - Creates command/event channels.
/// - Spawns the background thread running [`audio_thread`] with `backend`.
/// - Inserts [`AudioBridge`] and initializes `Messages<AudioMessage>` and
///   `Messages<AudioCmd>` if they are not present yet.
pub fn setup_audio(world: &mut World, backend: Box<dyn AudioBackend>) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg, backend));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
}

/// Request shutdown of the audio thread and join it.
///
/// If the bridge resource exists, sends [`AudioCmd::Shutdown`], waits for the
/// thread to exit, and removes the resource from the world.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
