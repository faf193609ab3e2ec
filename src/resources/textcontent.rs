//! Literal strings shown by the final-call screen.
//!
//! Each visual element reads its text from a named [`TextSlot`]. The club's
//! French content is built in; the `[texts]` section of the config file can
//! override any slot. Content is read once at initialization and never
//! reloaded.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{debug, info};
use rustc_hash::FxHashMap;
use std::path::Path;

use crate::resources::animatorconfig::ConfigError;

const SECTION: &str = "texts";

/// Named text slot of the final-call screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    ClubName,
    History,
    Olympic,
    Champions,
    Location,
    Age,
    CallToAction,
}

impl TextSlot {
    /// Slots in on-screen order.
    pub const ALL: [TextSlot; 7] = [
        TextSlot::ClubName,
        TextSlot::History,
        TextSlot::Olympic,
        TextSlot::Champions,
        TextSlot::Location,
        TextSlot::Age,
        TextSlot::CallToAction,
    ];

    /// Key of the slot in the `[texts]` section.
    pub fn key(&self) -> &'static str {
        match self {
            TextSlot::ClubName => "club_name",
            TextSlot::History => "history",
            TextSlot::Olympic => "olympic",
            TextSlot::Champions => "champions",
            TextSlot::Location => "location",
            TextSlot::Age => "age",
            TextSlot::CallToAction => "call_to_action",
        }
    }

    fn default_text(&self) -> &'static str {
        match self {
            TextSlot::ClubName => "🤺 AMICALE TARBAISE D'ESCRIME",
            TextSlot::History => "Plus de 100 ans de passion",
            TextSlot::Olympic => "🥇 8 médailles olympiques",
            TextSlot::Champions => "🏆 200 champions de France",
            TextSlot::Location => "🏠 Maison de l'Escrime - Tarbes",
            TextSlot::Age => "👶 Dès 4 ans - Tous niveaux",
            TextSlot::CallToAction => "✨ TON AVENTURE COMMENCE ICI ! ✨",
        }
    }
}

/// Slot → text table.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct TextContent {
    texts: FxHashMap<TextSlot, String>,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            texts: TextSlot::ALL
                .iter()
                .map(|slot| (*slot, slot.default_text().to_string()))
                .collect(),
        }
    }
}

impl TextContent {
    pub fn get(&self, slot: TextSlot) -> &str {
        self.texts
            .get(&slot)
            .map(String::as_str)
            .unwrap_or_else(|| slot.default_text())
    }

    pub fn set(&mut self, slot: TextSlot, text: impl Into<String>) {
        self.texts.insert(slot, text.into());
    }

    /// Override slots from the `[texts]` section of `path`.
    ///
    /// Keys that are absent keep their current text.
    pub fn load_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(path).map_err(|reason| ConfigError::Load {
            path: path.to_path_buf(),
            reason,
        })?;
        let mut overridden = 0;
        for slot in TextSlot::ALL {
            if let Some(text) = config.get(SECTION, slot.key()) {
                debug!("text slot '{}' overridden", slot.key());
                self.set(slot, text);
                overridden += 1;
            }
        }
        info!("Loaded {} text override(s) from {:?}", overridden, path);
        Ok(())
    }

    /// Write every slot into the `[texts]` section of `path`, keeping the
    /// other sections of the file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        let _ = config.load(path);
        for slot in TextSlot::ALL {
            config.set(SECTION, slot.key(), Some(self.get(slot).to_string()));
        }
        config.write(path).map_err(|source| ConfigError::Save {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_slot() {
        let texts = TextContent::default();
        for slot in TextSlot::ALL {
            assert!(!texts.get(slot).is_empty(), "{:?}", slot);
        }
        assert_eq!(texts.get(TextSlot::Olympic), "🥇 8 médailles olympiques");
        assert_eq!(
            texts.get(TextSlot::CallToAction),
            "✨ TON AVENTURE COMMENCE ICI ! ✨"
        );
    }

    #[test]
    fn test_load_overrides_only_present_keys() {
        let path = std::env::temp_dir().join(format!("finalcall_texts_{}.ini", std::process::id()));
        std::fs::write(&path, "[texts]\nhistory = Since 1921\n").unwrap();
        let mut texts = TextContent::default();
        texts.load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(texts.get(TextSlot::History), "Since 1921");
        assert_eq!(texts.get(TextSlot::Age), "👶 Dès 4 ans - Tous niveaux");
    }

    #[test]
    fn test_save_keeps_other_sections() {
        let path = std::env::temp_dir().join(format!("finalcall_texts_save_{}.ini", std::process::id()));
        std::fs::write(&path, "[timing]\nfade_in_duration = 1.0\n").unwrap();
        let mut texts = TextContent::default();
        texts.set(TextSlot::Location, "Tarbes");
        texts.save_to_file(&path).unwrap();

        let mut reloaded = TextContent::default();
        reloaded.load_from_file(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(reloaded.get(TextSlot::Location), "Tarbes");
        assert!(raw.contains("fade_in_duration"));
    }
}
