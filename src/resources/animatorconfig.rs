//! Animator configuration resource.
//!
//! Timing, effect and audio settings for the final-call reveal, loaded from
//! an INI file. Defaults reproduce the stock presentation, so a missing file
//! only costs a warning.
//!
//! # Configuration File Format
//!
//! ```ini
//! [timing]
//! delay_between_elements = 0.3
//! fade_in_duration = 0.8
//! highlight_duration = 0.8
//! pulse_duration = 3.0
//! easing = smoothstep
//!
//! [effects]
//! use_pulse_effect = true
//! highlight_color = 1.0, 0.92, 0.016, 1.0
//!
//! [audio]
//! appearance_fx = appearance
//! appearance_path = assets/audio/appearance.wav
//! final_call_fx = final_call
//! final_call_path = assets/audio/final_call.wav
//!
//! [runner]
//! ticks_per_second = 60
//! medal_count_duration = 2.0
//! ```
//!
//! The `[texts]` section of the same file is read by
//! [`TextContent`](crate::resources::textcontent::TextContent).

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::revealsequencer::{RevealCues, RevealTiming};
use crate::components::tint::Rgba;
use crate::components::tween::Easing;

const DEFAULT_DELAY_BETWEEN_ELEMENTS: f32 = 0.3;
const DEFAULT_FADE_IN_DURATION: f32 = 0.8;
const DEFAULT_HIGHLIGHT_DURATION: f32 = 0.8;
const DEFAULT_PULSE_DURATION: f32 = 3.0;
const DEFAULT_USE_PULSE_EFFECT: bool = true;
const DEFAULT_APPEARANCE_FX: &str = "appearance";
const DEFAULT_APPEARANCE_PATH: &str = "assets/audio/appearance.wav";
const DEFAULT_FINAL_CALL_FX: &str = "final_call";
const DEFAULT_FINAL_CALL_PATH: &str = "assets/audio/final_call.wav";
const DEFAULT_TICKS_PER_SECOND: u32 = 60;
const DEFAULT_MEDAL_COUNT_DURATION: f32 = 2.0;
pub const DEFAULT_CONFIG_PATH: &str = "./finalcall.ini";

/// Errors raised while reading or writing the INI file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("failed to save config file {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value for [{section}] {key}: '{value}'")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// Reveal animator configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    pub delay_between_elements: f32,
    pub fade_in_duration: f32,
    pub highlight_duration: f32,
    pub pulse_duration: f32,
    pub easing: Easing,
    pub use_pulse_effect: bool,
    pub highlight_color: Rgba,
    /// Sound id played when a step with sound appears. Empty disables it.
    pub appearance_fx: String,
    pub appearance_path: String,
    /// Sound id played by the celebration. Empty disables it.
    pub final_call_fx: String,
    pub final_call_path: String,
    /// Fixed tick rate of the headless runner.
    pub ticks_per_second: u32,
    /// Seconds the medal counter takes to count up.
    pub medal_count_duration: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimatorConfig {
    /// Create a new configuration with the stock presentation values.
    pub fn new() -> Self {
        Self {
            delay_between_elements: DEFAULT_DELAY_BETWEEN_ELEMENTS,
            fade_in_duration: DEFAULT_FADE_IN_DURATION,
            highlight_duration: DEFAULT_HIGHLIGHT_DURATION,
            pulse_duration: DEFAULT_PULSE_DURATION,
            easing: Easing::SmoothStep,
            use_pulse_effect: DEFAULT_USE_PULSE_EFFECT,
            highlight_color: Rgba::YELLOW,
            appearance_fx: DEFAULT_APPEARANCE_FX.to_string(),
            appearance_path: DEFAULT_APPEARANCE_PATH.to_string(),
            final_call_fx: DEFAULT_FINAL_CALL_FX.to_string(),
            final_call_path: DEFAULT_FINAL_CALL_PATH.to_string(),
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            medal_count_duration: DEFAULT_MEDAL_COUNT_DURATION,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. A value that is present
    /// but unparseable is an error and leaves `self` partially updated.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;

        // [timing] section
        if let Some(v) = get_f32(&config, "timing", "delay_between_elements")? {
            self.delay_between_elements = v;
        }
        if let Some(v) = get_f32(&config, "timing", "fade_in_duration")? {
            self.fade_in_duration = v;
        }
        if let Some(v) = get_f32(&config, "timing", "highlight_duration")? {
            self.highlight_duration = v;
        }
        if let Some(v) = get_f32(&config, "timing", "pulse_duration")? {
            self.pulse_duration = v;
        }
        if let Some(name) = config.get("timing", "easing") {
            self.easing = Easing::from_name(&name).ok_or(ConfigError::InvalidValue {
                section: "timing",
                key: "easing",
                value: name,
            })?;
        }

        // [effects] section
        if let Some(v) = config
            .getbool("effects", "use_pulse_effect")
            .map_err(|value| ConfigError::InvalidValue {
                section: "effects",
                key: "use_pulse_effect",
                value,
            })?
        {
            self.use_pulse_effect = v;
        }
        if let Some(raw) = config.get("effects", "highlight_color") {
            self.highlight_color = Rgba::parse(&raw).ok_or(ConfigError::InvalidValue {
                section: "effects",
                key: "highlight_color",
                value: raw,
            })?;
        }

        // [audio] section
        if let Some(v) = config.get("audio", "appearance_fx") {
            self.appearance_fx = v;
        }
        if let Some(v) = config.get("audio", "appearance_path") {
            self.appearance_path = v;
        }
        if let Some(v) = config.get("audio", "final_call_fx") {
            self.final_call_fx = v;
        }
        if let Some(v) = config.get("audio", "final_call_path") {
            self.final_call_path = v;
        }

        // [runner] section
        if let Some(v) = config
            .getuint("runner", "ticks_per_second")
            .map_err(|value| ConfigError::InvalidValue {
                section: "runner",
                key: "ticks_per_second",
                value,
            })?
        {
            self.ticks_per_second = v as u32;
        }
        if let Some(v) = get_f32(&config, "runner", "medal_count_duration")? {
            self.medal_count_duration = v;
        }

        info!(
            "Loaded config: fade={}s delay={}s highlight={}s pulse={}s ({}), easing={}, {} ticks/s",
            self.fade_in_duration,
            self.delay_between_elements,
            self.highlight_duration,
            self.pulse_duration,
            if self.use_pulse_effect { "on" } else { "off" },
            self.easing.name(),
            self.ticks_per_second
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist. Sections other than the ones
    /// this resource owns are kept.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        // keep [texts] and anything else already in the file
        let _ = config.load(&self.config_path);

        // [timing] section
        config.set(
            "timing",
            "delay_between_elements",
            Some(self.delay_between_elements.to_string()),
        );
        config.set(
            "timing",
            "fade_in_duration",
            Some(self.fade_in_duration.to_string()),
        );
        config.set(
            "timing",
            "highlight_duration",
            Some(self.highlight_duration.to_string()),
        );
        config.set(
            "timing",
            "pulse_duration",
            Some(self.pulse_duration.to_string()),
        );
        config.set("timing", "easing", Some(self.easing.name().to_string()));

        // [effects] section
        config.set(
            "effects",
            "use_pulse_effect",
            Some(self.use_pulse_effect.to_string()),
        );
        config.set(
            "effects",
            "highlight_color",
            Some(self.highlight_color.to_string()),
        );

        // [audio] section
        config.set("audio", "appearance_fx", Some(self.appearance_fx.clone()));
        config.set("audio", "appearance_path", Some(self.appearance_path.clone()));
        config.set("audio", "final_call_fx", Some(self.final_call_fx.clone()));
        config.set("audio", "final_call_path", Some(self.final_call_path.clone()));

        // [runner] section
        config.set(
            "runner",
            "ticks_per_second",
            Some(self.ticks_per_second.to_string()),
        );
        config.set(
            "runner",
            "medal_count_duration",
            Some(self.medal_count_duration.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Timing block handed to the sequencer.
    pub fn to_timing(&self) -> RevealTiming {
        RevealTiming {
            fade_in_duration: self.fade_in_duration,
            delay_between_elements: self.delay_between_elements,
            highlight_duration: self.highlight_duration,
            pulse_duration: self.pulse_duration,
            easing: self.easing,
            highlight_color: self.highlight_color,
            use_pulse_effect: self.use_pulse_effect,
        }
    }

    /// Sound ids handed to the sequencer; empty ids disable the cue.
    pub fn to_cues(&self) -> RevealCues {
        let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
        RevealCues {
            appearance_fx: non_empty(&self.appearance_fx),
            final_call_fx: non_empty(&self.final_call_fx),
        }
    }

    /// `(id, path)` pairs to preload on the audio thread.
    pub fn sound_assets(&self) -> Vec<(String, String)> {
        [
            (&self.appearance_fx, &self.appearance_path),
            (&self.final_call_fx, &self.final_call_path),
        ]
        .into_iter()
        .filter(|(id, _)| !id.trim().is_empty())
        .map(|(id, path)| (id.clone(), path.clone()))
        .collect()
    }
}

fn get_f32(config: &Ini, section: &'static str, key: &'static str) -> Result<Option<f32>, ConfigError> {
    config
        .getfloat(section, key)
        .map(|v| v.map(|v| v as f32))
        .map_err(|value| ConfigError::InvalidValue {
            section,
            key,
            value,
        })
}
