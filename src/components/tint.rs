//! Color types and the tint component for revealed elements.
//!
//! [`Rgba`] is a linear floating-point color in the `[0, 1]` range. The
//! [`Tint`] component holds the current color of an element; the reveal
//! systems rewrite it every tick while a fade or highlight is active.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Floating-point RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Yellow used as the default highlight color.
    pub const YELLOW: Rgba = Rgba::new(1.0, 0.92, 0.016, 1.0);
    /// Gold override applied to celebration particles.
    pub const GOLD: Rgba = Rgba::new(1.0, 0.8, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha channel replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Component-wise linear interpolation. `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Parse `"r, g, b, a"` (alpha optional, defaults to 1.0).
    pub fn parse(s: &str) -> Option<Rgba> {
        let parts: Vec<f32> = s
            .split(',')
            .map(|p| p.trim().parse::<f32>())
            .collect::<Result<_, _>>()
            .ok()?;
        match parts.as_slice() {
            [r, g, b] => Some(Rgba::new(*r, *g, *b, 1.0)),
            [r, g, b, a] => Some(Rgba::new(*r, *g, *b, *a)),
            _ => None,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}, {}", self.r, self.g, self.b, self.a)
    }
}

/// Current color of an element.
#[derive(Component, Clone, Debug, Copy, Default)]
pub struct Tint {
    pub color: Rgba,
}

impl Tint {
    pub fn new(color: Rgba) -> Self {
        Self { color }
    }
}
