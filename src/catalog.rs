//! Asset manifest and the catalog of loaded templates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ConfigError;
use crate::model::{AssetId, AssetKind};

const BUILTIN_MANIFEST: &str = include_str!("../assets/manifest.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestItem {
    pub id: AssetId,
    pub url: String,
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub models: Vec<ManifestItem>,
    pub images: Vec<ManifestItem>,
}

/// A manifest item tagged with its kind.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetEntry {
    pub id: AssetId,
    pub kind: AssetKind,
    pub url: String,
    pub label: String,
}

impl AssetManifest {
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_MANIFEST)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Models first, then images, in manifest order.
    pub fn entries(&self) -> Vec<AssetEntry> {
        let tag = |kind: AssetKind| {
            move |item: &ManifestItem| AssetEntry {
                id: item.id.clone(),
                kind,
                url: item.url.clone(),
                label: item.label.clone(),
            }
        };
        self.models
            .iter()
            .map(tag(AssetKind::Model))
            .chain(self.images.iter().map(tag(AssetKind::Image)))
            .collect()
    }
}

/// A loaded asset that can be cloned into the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetTemplate {
    pub id: AssetId,
    pub kind: AssetKind,
    /// Width over height; images keep their natural proportions on the plane.
    pub aspect: f32,
}

impl AssetTemplate {
    pub fn model(entry: &AssetEntry) -> Self {
        Self {
            id: entry.id.clone(),
            kind: AssetKind::Model,
            aspect: 1.0,
        }
    }

    pub fn image(entry: &AssetEntry, width: u32, height: u32) -> Self {
        let aspect = if width == 0 || height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        Self {
            id: entry.id.clone(),
            kind: AssetKind::Image,
            aspect,
        }
    }
}

/// Filled by load completions; read-only from the controller's side.
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    templates: HashMap<AssetId, AssetTemplate>,
}

impl AssetCatalog {
    /// A later load of the same id replaces the earlier template.
    pub fn insert(&mut self, template: AssetTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn get(&self, id: &AssetId) -> Option<&AssetTemplate> {
        self.templates.get(id)
    }

    #[cfg(test)]
    pub fn contains(&self, id: &AssetId) -> bool {
        self.templates.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_manifest_lists_models_then_images() {
        let manifest = AssetManifest::builtin().unwrap();
        let entries = manifest.entries();
        assert_eq!(entries.len(), manifest.models.len() + manifest.images.len());
        assert_eq!(entries[0].kind, AssetKind::Model);
        assert_eq!(entries.last().unwrap().kind, AssetKind::Image);
        assert!(entries.iter().any(|e| e.id.as_str() == "carpet"));
    }

    #[test]
    fn builtin_manifest_includes_vehicle_models() {
        let manifest = AssetManifest::builtin().unwrap();
        for id in ["bmw", "drone", "kawasaki2", "kawasakiNinja", "mersedes"] {
            assert!(manifest.models.iter().any(|m| m.id.as_str() == id), "missing {id}");
        }
    }

    #[test]
    fn manifest_ids_are_unique() {
        let entries = AssetManifest::builtin().unwrap().entries();
        let mut ids: Vec<_> = entries.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn image_template_keeps_aspect_and_survives_zero_size() {
        let entry = AssetEntry {
            id: AssetId::new("rug"),
            kind: AssetKind::Image,
            url: "/images/rug.png".into(),
            label: "Rug".into(),
        };
        assert_eq!(AssetTemplate::image(&entry, 200, 100).aspect, 2.0);
        assert_eq!(AssetTemplate::image(&entry, 0, 0).aspect, 1.0);
    }

    #[test]
    fn catalog_insert_replaces_same_id() {
        let entry = AssetEntry {
            id: AssetId::new("rug"),
            kind: AssetKind::Image,
            url: "/images/rug.png".into(),
            label: "Rug".into(),
        };
        let mut catalog = AssetCatalog::default();
        catalog.insert(AssetTemplate::image(&entry, 100, 100));
        catalog.insert(AssetTemplate::image(&entry, 300, 100));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&entry.id).unwrap().aspect, 3.0);
        assert!(catalog.contains(&entry.id));
    }
}
