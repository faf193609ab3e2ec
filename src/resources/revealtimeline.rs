//! Record of reveal notifications with their tick timestamps.
//!
//! Filled by [`record_reveal_messages`](crate::systems::reveal::record_reveal_messages)
//! and written out as JSON by the headless runner.

use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::events::reveal::RevealMessage;

/// One recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineEntry {
    /// World time at the end of the tick that produced the message.
    pub time: f32,
    pub frame: u64,
    pub message: RevealMessage,
}

#[derive(Resource, Debug, Clone, Default, Serialize)]
pub struct RevealTimeline {
    pub entries: Vec<TimelineEntry>,
}

impl RevealTimeline {
    pub fn push(&mut self, time: f32, frame: u64, message: RevealMessage) {
        self.entries.push(TimelineEntry {
            time,
            frame,
            message,
        });
    }

    pub fn messages(&self) -> impl Iterator<Item = RevealMessage> + '_ {
        self.entries.iter().map(|e| e.message)
    }

    /// Time of the first entry matching `message`.
    pub fn time_of(&self, message: RevealMessage) -> Option<f32> {
        self.entries
            .iter()
            .find(|e| e.message == message)
            .map(|e| e.time)
    }
}
