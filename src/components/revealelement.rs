//! Rest state of an element animated by the reveal sequencer.
//!
//! A [`RevealElement`] stores the scale and color an element must return to
//! after every fade, highlight or pulse. It is captured once, when the
//! element is set up, and never re-read from the live [`Scale`]/[`Tint`]
//! afterwards: those components carry transient animation state.
//!
//! Hidden state is `Scale = Vec3::ZERO` with the base color at alpha 0.

use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::components::scale::Scale;
use crate::components::tint::{Rgba, Tint};

/// Captured rest state of a revealable element.
#[derive(Component, Clone, Copy, Debug)]
pub struct RevealElement {
    /// Scale the element shows at rest.
    pub base_scale: Vec3,
    /// Color the element shows at rest.
    pub base_color: Rgba,
}

impl RevealElement {
    pub fn new(base_scale: Vec3, base_color: Rgba) -> Self {
        Self {
            base_scale,
            base_color,
        }
    }

    /// Capture the current scale and tint as the rest state.
    pub fn capture(scale: &Scale, tint: &Tint) -> Self {
        Self::new(scale.scale, tint.color)
    }

    /// Scale/tint pair for the fully hidden state.
    pub fn hidden(&self) -> (Scale, Tint) {
        (
            Scale { scale: Vec3::ZERO },
            Tint::new(self.base_color.with_alpha(0.0)),
        )
    }

    /// Scale/tint pair for the rest state.
    pub fn rest(&self) -> (Scale, Tint) {
        (Scale { scale: self.base_scale }, Tint::new(self.base_color))
    }
}
