//! ECS resources made available to systems.
//!
//! Overview
//! - `animatorconfig` – timing, effects and audio settings loaded from INI
//! - `audio` – bridge, backend trait and channels for the audio thread
//! - `revealtimeline` – timestamped record of reveal notifications
//! - `textcontent` – literal strings shown by each element
//! - `worldtime` – simulation time and delta
pub mod animatorconfig;
pub mod audio;
pub mod revealtimeline;
pub mod textcontent;
pub mod worldtime;
