//! # Material Table Module
//!
//! The mesher needs three facts about every material: whether light passes
//! through it, whether it only hides faces of its own kind, and which
//! transparent draw bucket it belongs to. [`MaterialProperties`] is the lookup
//! the mesher consumes; [`MaterialTable`] is the data-driven implementation
//! loaded from JSON.
//!
//! ## Configuration Format
//!
//! ```json
//! { "materials": [
//!     { "id": 1, "name": "stone" },
//!     { "id": 2, "name": "water", "class": "water", "self_occluding": true },
//!     { "id": 3, "name": "glass", "class": "glass", "self_occluding": true }
//! ] }
//! ```
//!
//! `class` defaults to `"opaque"` and `self_occluding` to `false`. Material 0 is
//! always air and cannot be configured.

use std::{fs, path::Path};

use bitvec::{array::BitArray, BitArr};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{Material, AIR};

/// One bit per possible material id.
type MaterialFlags = BitArr!(for 256, in u64);

/// Which group of draw calls a material's faces belong to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransparencyClass {
    /// Fully occluding; faces go to the per-direction buckets.
    #[default]
    Opaque,
    /// Transparent liquid; faces go to the water bucket.
    Water,
    /// Transparent solid; faces go to the glass bucket.
    Glass,
}

/// Material property lookup consumed by the greedy mesher.
///
/// Implementations are keyed by material id and must be cheap: the mesher calls
/// them once per voxel face.
pub trait MaterialProperties {
    /// Whether faces behind this material can be seen.
    fn is_transparent(&self, material: Material) -> bool;

    /// Whether this material hides the faces of neighbours of the same material.
    ///
    /// Two adjacent voxels of the same self-occluding material share no face;
    /// two different materials always show the face between them.
    fn is_self_occluding(&self, material: Material) -> bool;

    /// The draw bucket class for faces of this material.
    fn transparency_class(&self, material: Material) -> TransparencyClass {
        if self.is_transparent(material) {
            TransparencyClass::Glass
        } else {
            TransparencyClass::Opaque
        }
    }
}

/// A single material entry in the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialConfig {
    /// The material id stored in voxel data
    pub id: Material,
    /// Human readable name, used in diagnostics
    pub name: String,
    /// Draw bucket class; anything but `opaque` is transparent
    #[serde(default)]
    pub class: TransparencyClass,
    /// Whether the material hides faces between neighbours of its own kind
    #[serde(default)]
    pub self_occluding: bool,
}

#[derive(Deserialize)]
struct MaterialTableFile {
    materials: Vec<MaterialConfig>,
}

/// Data-driven [`MaterialProperties`] implementation.
///
/// Unconfigured ids behave as opaque, non-self-occluding materials. Air is
/// transparent.
#[derive(Clone, Debug)]
pub struct MaterialTable {
    names: Vec<Option<String>>,
    transparent: MaterialFlags,
    self_occluding: MaterialFlags,
    water: MaterialFlags,
}

impl MaterialTable {
    /// Creates a table in which every material except air is opaque.
    pub fn new() -> Self {
        let mut transparent: MaterialFlags = BitArray::ZERO;
        transparent.set(AIR as usize, true);

        let mut names = vec![None; 256];
        names[AIR as usize] = Some("air".to_string());

        MaterialTable {
            names,
            transparent,
            self_occluding: BitArray::ZERO,
            water: BitArray::ZERO,
        }
    }

    /// Parses a table from the JSON configuration format.
    ///
    /// # Errors
    /// Returns an error if the document is malformed, an id is configured twice
    /// or the air id is configured.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: MaterialTableFile = serde_json::from_str(json)?;
        let mut table = MaterialTable::new();
        for material in file.materials {
            table.insert(material)?;
        }
        Ok(table)
    }

    /// Reads and parses a table from a JSON configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails [`MaterialTable::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let table = Self::from_json_str(&json)?;
        debug!(
            "Loaded {} materials from {}",
            table.configured_count(),
            path.display()
        );
        Ok(table)
    }

    /// Adds a material definition.
    ///
    /// # Errors
    /// Fails if `config.id` is air or already configured.
    pub fn insert(&mut self, config: MaterialConfig) -> Result<()> {
        let index = config.id as usize;
        if config.id == AIR {
            return Err(Error::ReservedMaterial(config.id));
        }
        if let Some(first) = &self.names[index] {
            return Err(Error::DuplicateMaterial {
                id: config.id,
                first: first.clone(),
                second: config.name,
            });
        }

        if config.self_occluding && config.class == TransparencyClass::Opaque {
            warn!(
                "Material {} (\"{}\") is opaque; self_occluding has no effect",
                config.id, config.name
            );
        }

        self.transparent
            .set(index, config.class != TransparencyClass::Opaque);
        self.water.set(index, config.class == TransparencyClass::Water);
        self.self_occluding.set(index, config.self_occluding);
        self.names[index] = Some(config.name);
        Ok(())
    }

    /// The configured name of `material`, if any.
    pub fn name(&self, material: Material) -> Option<&str> {
        self.names[material as usize].as_deref()
    }

    /// Number of configured materials, not counting air.
    pub fn configured_count(&self) -> usize {
        self.names.iter().skip(1).filter(|name| name.is_some()).count()
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialProperties for MaterialTable {
    #[inline]
    fn is_transparent(&self, material: Material) -> bool {
        self.transparent[material as usize]
    }

    #[inline]
    fn is_self_occluding(&self, material: Material) -> bool {
        self.self_occluding[material as usize]
    }

    #[inline]
    fn transparency_class(&self, material: Material) -> TransparencyClass {
        if self.water[material as usize] {
            TransparencyClass::Water
        } else if self.transparent[material as usize] {
            TransparencyClass::Glass
        } else {
            TransparencyClass::Opaque
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "materials": [
            { "id": 1, "name": "stone" },
            { "id": 2, "name": "water", "class": "water", "self_occluding": true },
            { "id": 3, "name": "glass", "class": "glass", "self_occluding": true }
        ]
    }"#;

    #[test]
    fn parses_classes_and_defaults() {
        let table = MaterialTable::from_json_str(TABLE).unwrap();

        assert_eq!(table.configured_count(), 3);
        assert_eq!(table.name(2), Some("water"));
        assert!(!table.is_transparent(1));
        assert!(!table.is_self_occluding(1));
        assert_eq!(table.transparency_class(1), TransparencyClass::Opaque);
        assert_eq!(table.transparency_class(2), TransparencyClass::Water);
        assert_eq!(table.transparency_class(3), TransparencyClass::Glass);
        assert!(table.is_self_occluding(3));
        assert!(table.is_transparent(AIR));
        // Unconfigured ids are plain opaque materials.
        assert!(!table.is_transparent(200));
        assert_eq!(table.name(200), None);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"{ "materials": [
            { "id": 4, "name": "sand" },
            { "id": 4, "name": "gravel" }
        ] }"#;
        match MaterialTable::from_json_str(json) {
            Err(Error::DuplicateMaterial { id, first, second }) => {
                assert_eq!(id, 4);
                assert_eq!(first, "sand");
                assert_eq!(second, "gravel");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_air_and_malformed_documents() {
        let air = r#"{ "materials": [ { "id": 0, "name": "void" } ] }"#;
        assert!(matches!(
            MaterialTable::from_json_str(air),
            Err(Error::ReservedMaterial(0))
        ));
        assert!(matches!(
            MaterialTable::from_json_str("{ \"materials\": 3 }"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = MaterialTable::from_json_file("/nonexistent/materials.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
