//! Easing functions and tween update systems.
//!
//! [`ease`] is shared by the reveal sequencer (fade-in scale curve) and by
//! [`tween_medal_count_system`], which drives a
//! [`MedalCounter`](crate::components::medalcounter::MedalCounter) from a
//! [`TweenMedalCount`] the way a timeline track animates the value.
//! Delta time is read from [`WorldTime`](crate::resources::worldtime::WorldTime).

use crate::components::medalcounter::MedalCounter;
use crate::components::tween::{Easing, TweenMedalCount};
use crate::resources::worldtime::WorldTime;
use bevy_ecs::prelude::*;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve. Every curve maps 0 to 0 and 1 to 1.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
        Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
    }
}

/// Linearly interpolate between two floats.
pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Advance tween time, stopping at the end.
pub(crate) fn advance(time: &mut f32, duration: f32, playing: &mut bool, dt: f32) {
    *time += dt;
    if *time >= duration {
        *playing = false;
        *time = time.clamp(0.0, duration.max(0.0));
    }
}

/// Animate medal counters based on [`TweenMedalCount`] components.
///
/// The value is rounded to the nearest integer. A zero duration jumps
/// straight to `to`.
pub fn tween_medal_count_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut MedalCounter, &mut TweenMedalCount)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut counter, mut tw) in query.iter_mut() {
        if !tw.playing {
            continue;
        }
        let duration = tw.duration;
        let mut t = tw.time;
        let mut playing = tw.playing;
        advance(&mut t, duration, &mut playing, dt);
        tw.time = t;
        tw.playing = playing;

        let progress = if duration > 0.0 { tw.time / duration } else { 1.0 };
        let value = lerp_f32(tw.from as f32, tw.to as f32, ease(tw.easing, progress));
        let value = value.round() as i32;
        if counter.count != value {
            counter.set(value);
        }
    }
}
