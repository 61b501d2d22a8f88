//! Object identities and physical descriptors.

use std::collections::BTreeMap;
use std::fmt;

use crate::proof::canon::CanonError;
use crate::proof::hash::{canonical_json_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Opaque label of a world object (e.g. `"a"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

/// What a put-down lands on: the floor or another object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Support {
    Floor,
    Object(ObjectId),
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floor => f.write_str("floor"),
            Self::Object(id) => write!(f, "{id}"),
        }
    }
}

/// Shape of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Form {
    Brick,
    Plank,
    Ball,
    Pyramid,
    Box,
    Table,
}

impl Form {
    /// Parse the lowercase form name used in world files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "brick" => Some(Self::Brick),
            "plank" => Some(Self::Plank),
            "ball" => Some(Self::Ball),
            "pyramid" => Some(Self::Pyramid),
            "box" => Some(Self::Box),
            "table" => Some(Self::Table),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Brick => "brick",
            Self::Plank => "plank",
            Self::Ball => "ball",
            Self::Pyramid => "pyramid",
            Self::Box => "box",
            Self::Table => "table",
        }
    }
}

/// Object size. Ordering follows physical size: `Small < Medium < Large`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Physical description of one object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectDescriptor {
    pub form: Form,
    pub size: Size,
    pub color: String,
}

impl ObjectDescriptor {
    #[must_use]
    pub fn new(form: Form, size: Size, color: impl Into<String>) -> Self {
        Self {
            form,
            size,
            color: color.into(),
        }
    }
}

/// Ordered map from object id to its descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectCatalog {
    objects: BTreeMap<ObjectId, ObjectDescriptor>,
}

impl ObjectCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a descriptor. Returns the previous one, if any.
    pub fn insert(&mut self, id: ObjectId, descriptor: ObjectDescriptor) -> Option<ObjectDescriptor> {
        self.objects.insert(id, descriptor)
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&ObjectDescriptor> {
        self.objects.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &ObjectDescriptor)> {
        self.objects.iter()
    }

    /// JSON view: id → `{form, size, color}`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        self.objects
            .iter()
            .map(|(id, d)| {
                (
                    id.as_str().to_owned(),
                    serde_json::json!({
                        "color": d.color,
                        "form": d.form.name(),
                        "size": d.size.name(),
                    }),
                )
            })
            .collect::<serde_json::Map<_, _>>()
            .into()
    }

    /// Content digest of the catalog's canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        canonical_json_hash(HashDomain::ObjectCatalog, &self.to_json_value())
    }
}

impl FromIterator<(ObjectId, ObjectDescriptor)> for ObjectCatalog {
    fn from_iter<T: IntoIterator<Item = (ObjectId, ObjectDescriptor)>>(iter: T) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
