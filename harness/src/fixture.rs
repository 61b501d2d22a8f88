//! World fixtures: a start state and object catalog loaded from JSON.
//!
//! ```json
//! {
//!   "stacks": [["e"], ["g", "l"], []],
//!   "holding": null,
//!   "arm": 0,
//!   "objects": {
//!     "e": { "form": "ball",  "size": "large", "color": "white" },
//!     "g": { "form": "table", "size": "large", "color": "blue" },
//!     "l": { "form": "box",   "size": "large", "color": "red" }
//!   }
//! }
//! ```
//!
//! Stacks list columns left to right, each bottom to top.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use gantry_kernel::carrier::objects::{Form, ObjectCatalog, ObjectDescriptor, ObjectId, Size};
use gantry_kernel::carrier::world::{WorldState, WorldStateError};

/// Serialized description of one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub form: String,
    pub size: String,
    pub color: String,
}

/// A start world as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldFixture {
    pub stacks: Vec<Vec<String>>,
    #[serde(default)]
    pub holding: Option<String>,
    #[serde(default)]
    pub arm: usize,
    #[serde(default)]
    pub objects: BTreeMap<String, ObjectSpec>,
}

/// Error loading or validating a fixture.
#[derive(Debug)]
pub enum FixtureError {
    /// The fixture file could not be read.
    Io(std::io::Error),
    /// The JSON is malformed or has the wrong shape.
    Json(serde_json::Error),
    /// The stacks, arm and holding do not form a valid world.
    InvalidState(WorldStateError),
    /// An object in the world has no entry in `objects`.
    UnknownObject { id: String },
    /// An object entry names an unknown form or size.
    InvalidDescriptor { id: String, detail: String },
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read fixture: {e}"),
            Self::Json(e) => write!(f, "malformed fixture JSON: {e}"),
            Self::InvalidState(e) => write!(f, "invalid fixture world: {e}"),
            Self::UnknownObject { id } => write!(f, "object {id:?} has no descriptor"),
            Self::InvalidDescriptor { id, detail } => {
                write!(f, "bad descriptor for object {id:?}: {detail}")
            }
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::InvalidState(e) => Some(e),
            Self::UnknownObject { .. } | Self::InvalidDescriptor { .. } => None,
        }
    }
}

impl WorldFixture {
    /// Parse a fixture from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Json`] on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, FixtureError> {
        serde_json::from_str(json).map_err(FixtureError::Json)
    }

    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Io`] if the file cannot be read and
    /// [`FixtureError::Json`] if it does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path).map_err(FixtureError::Io)?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON for this fixture.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Json`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, FixtureError> {
        serde_json::to_string_pretty(self).map_err(FixtureError::Json)
    }

    /// Capture `state` and the descriptors of its objects as a fixture.
    ///
    /// Objects missing from `catalog` are left out of `objects`.
    #[must_use]
    pub fn from_parts(state: &WorldState, catalog: &ObjectCatalog) -> Self {
        let objects = state
            .objects()
            .filter_map(|id| {
                catalog.get(id).map(|d| {
                    (
                        id.as_str().to_owned(),
                        ObjectSpec {
                            form: d.form.name().to_owned(),
                            size: d.size.name().to_owned(),
                            color: d.color.clone(),
                        },
                    )
                })
            })
            .collect();
        Self {
            stacks: state
                .stacks()
                .iter()
                .map(|column| column.iter().map(|id| id.as_str().to_owned()).collect())
                .collect(),
            holding: state.holding().map(|id| id.as_str().to_owned()),
            arm: state.arm(),
            objects,
        }
    }

    /// Validate the fixture and split it into a start state and a catalog.
    ///
    /// The catalog holds every entry of `objects`, including objects not
    /// currently in the world.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::InvalidState`] for an invalid arm, duplicate or
    ///   missing columns.
    /// - [`FixtureError::UnknownObject`] if a placed or held object has no
    ///   descriptor.
    /// - [`FixtureError::InvalidDescriptor`] for an unknown form or size.
    pub fn into_parts(self) -> Result<(WorldState, ObjectCatalog), FixtureError> {
        let mut catalog = ObjectCatalog::new();
        for (id, entry) in &self.objects {
            catalog.insert(ObjectId::new(id.as_str()), descriptor(id, entry)?);
        }

        let stacks: Vec<Vec<ObjectId>> = self
            .stacks
            .iter()
            .map(|column| column.iter().map(|id| ObjectId::new(id.as_str())).collect())
            .collect();
        let holding = self.holding.as_deref().map(ObjectId::new);
        let state = WorldState::new(stacks, self.arm, holding).map_err(FixtureError::InvalidState)?;

        if let Some(missing) = state.objects().find(|id| !catalog.contains(id)) {
            return Err(FixtureError::UnknownObject {
                id: missing.as_str().to_owned(),
            });
        }
        Ok((state, catalog))
    }
}

fn descriptor(id: &str, entry: &ObjectSpec) -> Result<ObjectDescriptor, FixtureError> {
    let form = Form::from_name(&entry.form).ok_or_else(|| FixtureError::InvalidDescriptor {
        id: id.to_owned(),
        detail: format!("unknown form {:?}", entry.form),
    })?;
    let size = Size::from_name(&entry.size).ok_or_else(|| FixtureError::InvalidDescriptor {
        id: id.to_owned(),
        detail: format!("unknown size {:?}", entry.size),
    })?;
    Ok(ObjectDescriptor::new(form, size, entry.color.as_str()))
}
