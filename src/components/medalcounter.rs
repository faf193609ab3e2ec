//! Medal counter component.
//!
//! A [`MedalCounter`] sits next to a [`DynamicText`](super::dynamictext::DynamicText)
//! and holds the number of medals to display. The value is usually driven
//! by an external timeline (see [`TweenMedalCount`](super::tween::TweenMedalCount)).
//! [`crate::systems::medalcounter::medal_counter_system`] turns it into a
//! label each tick.
//!
//! The intended range is `0..=8`. Values outside it are displayed as-is.

use bevy_ecs::prelude::Component;
use log::warn;

/// Bounded integer attribute rendered as a pluralized medal label.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MedalCounter {
    pub count: i32,
}

impl MedalCounter {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 8;

    pub fn new(count: i32) -> Self {
        Self { count }
    }

    /// Set the displayed count. Out-of-range values pass through with a warning.
    pub fn set(&mut self, count: i32) {
        if !(Self::MIN..=Self::MAX).contains(&count) {
            warn!(
                "medal count {} outside {}..={}, displaying as-is",
                count,
                Self::MIN,
                Self::MAX
            );
        }
        self.count = count;
    }

    pub fn label(&self) -> String {
        medal_label(self.count)
    }
}

/// `"{count} medal"`, pluralized when `count > 1`.
pub fn medal_label(count: i32) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} medal{plural}")
}
