//! `WorldState`: columns of stacked objects, a gripper column, and an
//! optionally held object.
//!
//! States are values. Successors are built by copying the source with one
//! field changed; a state is never mutated after construction, and two
//! states never share column storage.

use std::collections::BTreeSet;
use std::fmt;

use super::objects::ObjectId;
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Why a candidate world state was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldStateError {
    /// The world has no columns at all.
    NoColumns,
    /// The arm points past the last column.
    ArmOutOfRange { arm: usize, columns: usize },
    /// An object appears more than once (in two places, or twice in one).
    DuplicateObject { id: ObjectId },
}

impl fmt::Display for WorldStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoColumns => write!(f, "world has no columns"),
            Self::ArmOutOfRange { arm, columns } => {
                write!(f, "arm column {arm} out of range for {columns} columns")
            }
            Self::DuplicateObject { id } => write!(f, "object {id} appears more than once"),
        }
    }
}

impl std::error::Error for WorldStateError {}

/// A blocks-world configuration.
///
/// Columns are ordered left to right; each column is ordered bottom to top.
///
/// Invariant: every object appears in exactly one place, either in exactly
/// one column or held, and `arm < column_count()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldState {
    stacks: Vec<Vec<ObjectId>>,
    arm: usize,
    holding: Option<ObjectId>,
}

impl WorldState {
    /// Build a validated state.
    ///
    /// # Errors
    ///
    /// Returns [`WorldStateError`] if there are no columns, the arm is out of
    /// range, or an object is duplicated.
    pub fn new(
        stacks: Vec<Vec<ObjectId>>,
        arm: usize,
        holding: Option<ObjectId>,
    ) -> Result<Self, WorldStateError> {
        if stacks.is_empty() {
            return Err(WorldStateError::NoColumns);
        }
        if arm >= stacks.len() {
            return Err(WorldStateError::ArmOutOfRange {
                arm,
                columns: stacks.len(),
            });
        }
        let mut seen: BTreeSet<&ObjectId> = BTreeSet::new();
        for id in stacks.iter().flatten().chain(holding.iter()) {
            if !seen.insert(id) {
                return Err(WorldStateError::DuplicateObject { id: id.clone() });
            }
        }
        Ok(Self {
            stacks,
            arm,
            holding,
        })
    }

    /// Convenience constructor from string labels.
    ///
    /// # Errors
    ///
    /// Same as [`WorldState::new`].
    pub fn from_labels(
        stacks: &[&[&str]],
        arm: usize,
        holding: Option<&str>,
    ) -> Result<Self, WorldStateError> {
        let stacks = stacks
            .iter()
            .map(|column| column.iter().map(|&l| ObjectId::from(l)).collect())
            .collect();
        Self::new(stacks, arm, holding.map(ObjectId::from))
    }

    #[must_use]
    pub fn stacks(&self) -> &[Vec<ObjectId>] {
        &self.stacks
    }

    #[must_use]
    pub fn arm(&self) -> usize {
        self.arm
    }

    #[must_use]
    pub fn holding(&self) -> Option<&ObjectId> {
        self.holding.as_ref()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.stacks.len()
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<&[ObjectId]> {
        self.stacks.get(index).map(Vec::as_slice)
    }

    /// Topmost object of a column (`None` for an empty or missing column).
    #[must_use]
    pub fn top_of(&self, index: usize) -> Option<&ObjectId> {
        self.stacks.get(index).and_then(|column| column.last())
    }

    /// Column holding `id`, or `None` if it is held or absent.
    #[must_use]
    pub fn stack_index_of(&self, id: &ObjectId) -> Option<usize> {
        self.stacks.iter().position(|column| column.contains(id))
    }

    /// Height of `id` in its column (0 = resting on the floor).
    #[must_use]
    pub fn position_in_stack(&self, id: &ObjectId) -> Option<usize> {
        self.stacks
            .iter()
            .find_map(|column| column.iter().position(|o| o == id))
    }

    /// Number of objects stacked above `id`.
    #[must_use]
    pub fn objects_above(&self, id: &ObjectId) -> Option<usize> {
        let column = &self.stacks[self.stack_index_of(id)?];
        let position = column.iter().position(|o| o == id)?;
        Some(column.len() - 1 - position)
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.holding.as_ref() == Some(id) || self.stack_index_of(id).is_some()
    }

    /// All objects in the world: columns left to right, bottom to top, then
    /// the held object.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectId> {
        self.stacks.iter().flatten().chain(self.holding.iter())
    }

    // -- successor construction (copy with one field modified) --------------

    pub(crate) fn with_arm(&self, arm: usize) -> Self {
        Self {
            stacks: self.stacks.clone(),
            arm,
            holding: self.holding.clone(),
        }
    }

    /// Copy with the arm column's top object moved into the gripper.
    pub(crate) fn lifted(&self) -> Option<Self> {
        let mut stacks = self.stacks.clone();
        let top = stacks.get_mut(self.arm)?.pop()?;
        Some(Self {
            stacks,
            arm: self.arm,
            holding: Some(top),
        })
    }

    /// Copy with the held object pushed onto the arm column.
    pub(crate) fn placed(&self) -> Option<Self> {
        let held = self.holding.clone()?;
        let mut stacks = self.stacks.clone();
        stacks.get_mut(self.arm)?.push(held);
        Some(Self {
            stacks,
            arm: self.arm,
            holding: None,
        })
    }

    // -- identity ----------------------------------------------------------

    /// Length-prefixed identity encoding: arm, held object, then every
    /// column with its full ordered content.
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(16 + 8 * self.stacks.len());
        out.extend_from_slice(&(self.arm as u64).to_le_bytes());
        match &self.holding {
            Some(id) => {
                out.push(1);
                push_label(&mut out, id);
            }
            None => out.push(0),
        }
        out.extend_from_slice(&(self.stacks.len() as u64).to_le_bytes());
        for column in &self.stacks {
            out.extend_from_slice(&(column.len() as u64).to_le_bytes());
            for id in column {
                push_label(&mut out, id);
            }
        }
        out
    }

    /// Content hash of [`WorldState::identity_bytes`]. Equal states have
    /// equal fingerprints.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(HashDomain::WorldState, &self.identity_bytes())
    }

    /// JSON view in the world-file shape (`stacks`, `arm`, `holding`).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "arm": self.arm,
            "holding": self.holding.as_ref().map(ObjectId::as_str),
            "stacks": self
                .stacks
                .iter()
                .map(|column| column.iter().map(ObjectId::as_str).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
        })
    }

    /// Canonical JSON bytes of [`WorldState::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }
}

fn push_label(out: &mut Vec<u8>, id: &ObjectId) {
    let bytes = id.as_str().as_bytes();
    out.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
    out.extend_from_slice(bytes);
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arm={} holding=", self.arm)?;
        match &self.holding {
            Some(id) => write!(f, "{id}")?,
            None => write!(f, "-")?,
        }
        for column in &self.stacks {
            let labels: Vec<&str> = column.iter().map(ObjectId::as_str).collect();
            write!(f, " [{}]", labels.join(","))?;
        }
        Ok(())
    }
}
