//! The four gripper actions and the `apply()` entry point.

use std::fmt;

use super::physics::PlacementOracle;
use crate::carrier::objects::Support;
use crate::carrier::world::WorldState;

/// A gripper action. Every action costs one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Lift the top object of the arm's column.
    PickUp,
    /// Drop the held object onto the arm's column.
    PutDown,
    /// Move the arm one column left.
    MoveLeft,
    /// Move the arm one column right.
    MoveRight,
}

impl Action {
    /// Enumeration order used when generating successors.
    pub const ALL: [Action; 4] = [Self::PickUp, Self::PutDown, Self::MoveLeft, Self::MoveRight];

    /// One-letter plan code: `p`, `d`, `l`, `r`.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::PickUp => 'p',
            Self::PutDown => 'd',
            Self::MoveLeft => 'l',
            Self::MoveRight => 'r',
        }
    }

    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'p' => Some(Self::PickUp),
            'd' => Some(Self::PutDown),
            'l' => Some(Self::MoveLeft),
            'r' => Some(Self::MoveRight),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Typed failure for [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyFailure {
    PreconditionNotMet { action: Action, detail: String },
}

impl fmt::Display for ApplyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreconditionNotMet { action, detail } => {
                write!(f, "precondition not met for '{action}': {detail}")
            }
        }
    }
}

impl std::error::Error for ApplyFailure {}

/// Whether `action` is enabled in `state`.
///
/// Put-down is enabled when something is held and the arm column is empty
/// or the oracle accepts the column's top as a support.
pub fn is_enabled(state: &WorldState, action: Action, placement: &dyn PlacementOracle) -> bool {
    precondition(state, action, placement).is_ok()
}

/// Apply `action` to `state`, producing a new, independent state.
///
/// # Errors
///
/// Returns [`ApplyFailure::PreconditionNotMet`] if the action is not enabled.
pub fn apply(
    state: &WorldState,
    action: Action,
    placement: &dyn PlacementOracle,
) -> Result<WorldState, ApplyFailure> {
    precondition(state, action, placement).map_err(|detail| ApplyFailure::PreconditionNotMet {
        action,
        detail: detail.to_string(),
    })?;
    let next = match action {
        Action::PickUp => state.lifted(),
        Action::PutDown => state.placed(),
        Action::MoveLeft => Some(state.with_arm(state.arm() - 1)),
        Action::MoveRight => Some(state.with_arm(state.arm() + 1)),
    };
    next.ok_or_else(|| ApplyFailure::PreconditionNotMet {
        action,
        detail: "state changed under the arm".into(),
    })
}

fn precondition(
    state: &WorldState,
    action: Action,
    placement: &dyn PlacementOracle,
) -> Result<(), &'static str> {
    match action {
        Action::PickUp => {
            if state.holding().is_some() {
                return Err("gripper is already holding an object");
            }
            if state.top_of(state.arm()).is_none() {
                return Err("arm column is empty");
            }
        }
        Action::PutDown => {
            let Some(held) = state.holding() else {
                return Err("gripper is empty");
            };
            if let Some(top) = state.top_of(state.arm()) {
                if !placement.can_place(held, &Support::Object(top.clone()), state) {
                    return Err("held object may not rest on the column's top");
                }
            }
        }
        Action::MoveLeft => {
            if state.arm() == 0 {
                return Err("arm is at the leftmost column");
            }
        }
        Action::MoveRight => {
            if state.arm() + 1 >= state.column_count() {
                return Err("arm is at the rightmost column");
            }
        }
    }
    Ok(())
}
