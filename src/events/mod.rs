//! Event and message types exchanged across systems.
//!
//! Submodules:
//! - [`audio`] – commands and replies for the background audio thread
//! - [`reveal`] – start/reset triggers and progress notifications of a reveal
//!
//! See each submodule for concrete event data, semantics, and example usage.
pub mod audio;
pub mod reveal;
