//! Controller settings, persisted in localStorage as JSON.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::util::local_storage;

pub const ROTATION_FACTOR: f32 = 0.01;
pub const TRANSLATION_FACTOR: f32 = 0.01;
pub const DEFAULT_PLACEMENT_SCALE: f32 = 0.5;

const STORAGE_KEY: &str = "xr_controller_config";

/// What a one-finger drag does to the active selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleTouchMode {
    #[default]
    Rotate,
    Translate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Radians per pixel of drag.
    pub rotation_factor: f32,
    /// Metres per pixel of drag in translate mode.
    pub translation_factor: f32,
    /// Uniform scale given to freshly placed objects.
    pub placement_scale: f32,
    pub single_touch: SingleTouchMode,
    pub pinch_zoom: bool,
    /// Place a new clone on every select instead of once per asset.
    pub allow_duplicates: bool,
    /// Keep the reticle hidden once something has been placed.
    pub hide_reticle_after_placement: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            rotation_factor: ROTATION_FACTOR,
            translation_factor: TRANSLATION_FACTOR,
            placement_scale: DEFAULT_PLACEMENT_SCALE,
            single_touch: SingleTouchMode::Rotate,
            pinch_zoom: true,
            allow_duplicates: false,
            hide_reticle_after_placement: false,
        }
    }
}

impl ControllerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads the persisted config, falling back to defaults when absent or unreadable.
    pub fn load() -> Self {
        let Some(store) = local_storage() else {
            return Self::default();
        };
        match store.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => Self::from_json(&raw).unwrap_or_else(|err| {
                log::warn!("ignoring stored controller config: {err}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let store = local_storage().ok_or(ConfigError::StorageUnavailable)?;
        let raw = self.to_json()?;
        store
            .set_item(STORAGE_KEY, &raw)
            .map_err(|_| ConfigError::StorageWrite)
    }
}
