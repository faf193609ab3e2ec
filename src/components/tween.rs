//! Tween components for animated interpolation.
//!
//! This module provides the shared easing curves used by the reveal
//! sequencer's fade-in and the [`TweenMedalCount`] component, which animates
//! a [`MedalCounter`](super::medalcounter::MedalCounter) the way a timeline
//! track would.
//!
//! See [`crate::systems::tween`] for the easing functions and update systems.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
    /// Hermite ease-in-out with flat tangents at both ends (`3t² - 2t³`).
    #[default]
    SmoothStep,
}

impl Easing {
    /// Parse a config name such as `"smoothstep"` or `"quad_in_out"`.
    pub fn from_name(name: &str) -> Option<Easing> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "linear" => Some(Easing::Linear),
            "quadin" => Some(Easing::QuadIn),
            "quadout" => Some(Easing::QuadOut),
            "quadinout" => Some(Easing::QuadInOut),
            "cubicin" => Some(Easing::CubicIn),
            "cubicout" => Some(Easing::CubicOut),
            "cubicinout" => Some(Easing::CubicInOut),
            "smoothstep" | "easeinout" => Some(Easing::SmoothStep),
            _ => None,
        }
    }

    /// Config name written by [`AnimatorConfig::save_to_file`](crate::resources::animatorconfig::AnimatorConfig::save_to_file).
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
            Easing::SmoothStep => "smoothstep",
        }
    }
}

/// Animates an entity's [`MedalCounter`](super::medalcounter::MedalCounter)
/// between two values.
///
/// Plays once. The interpolated value is rounded to the nearest integer
/// each tick.
#[derive(Component, Clone, Debug)]
pub struct TweenMedalCount {
    /// Starting count.
    pub from: i32,
    /// Ending count.
    pub to: i32,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing function to use.
    pub easing: Easing,
    /// Whether the tween is currently playing.
    pub playing: bool,
    /// Current time within the tween.
    pub time: f32,
}

impl TweenMedalCount {
    pub fn new(from: i32, to: i32, duration: f32) -> Self {
        TweenMedalCount {
            from,
            to,
            duration,
            easing: Easing::Linear,
            playing: true,
            time: 0.0,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}
