//! Bundled sample trains.
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::train::{TrainConfig, TrainConfigError};

const DEFAULT_PRESETS_DATA: &str = include_str!("../data/presets.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub train: TrainConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresetCatalog {
    #[serde(default)]
    pub presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Parse the bundled preset asset, falling back to an empty catalog.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_PRESETS_DATA).unwrap_or_default()
    }

    /// Load a preset catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a preset catalog.
    pub fn from_json(json: &str) -> Result<Self, TrainConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find a preset by id, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Preset> {
        self.presets
            .iter()
            .find(|preset| preset.id.eq_ignore_ascii_case(id.trim()))
    }

    /// Train config for the preset `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TrainConfigError::UnknownPreset`] if no preset has that id.
    pub fn train(&self, id: &str) -> Result<&TrainConfig, TrainConfigError> {
        self.find(id)
            .map(|preset| &preset.train)
            .ok_or_else(|| TrainConfigError::UnknownPreset(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[must_use]
pub fn presets() -> &'static PresetCatalog {
    static CATALOG: OnceLock<PresetCatalog> = OnceLock::new();
    CATALOG.get_or_init(PresetCatalog::load_from_static)
}
