//! Goal-distance estimates for blocks-world planning.
//!
//! Every estimate is a lower bound on the number of remaining actions:
//! each object that has to be cleared away costs at least a pick-up and a
//! put-down, each object that has to travel costs its own pick-up and
//! put-down, and the arm has to cover the column distance to wherever it
//! must next act.

use super::formula::{DnfFormula, Literal, Relation, Target};
use crate::carrier::objects::{ObjectCatalog, ObjectId};
use crate::carrier::world::WorldState;

/// Actions needed to clear one blocking object (pick-up and put-down).
const CLEAR_COST: usize = 2;

/// Estimate for a whole formula: the cheapest conjunction, where a
/// conjunction costs as much as its most expensive literal.
///
/// Returns `f64::INFINITY` for an empty (unsatisfiable) formula, and for
/// one whose every conjunction has an impossible literal.
#[must_use]
pub fn formula_estimate(formula: &DnfFormula, state: &WorldState, catalog: &ObjectCatalog) -> f64 {
    formula
        .conjunctions()
        .iter()
        .map(|conj| {
            conj.iter()
                .map(|lit| literal_estimate(lit, state, catalog))
                .fold(0.0, f64::max)
        })
        .fold(f64::INFINITY, f64::min)
}

/// Estimate for a single literal; 0 when it already holds, infinite when
/// it never can.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn literal_estimate(literal: &Literal, state: &WorldState, catalog: &ObjectCatalog) -> f64 {
    if literal.holds(state, catalog) {
        return 0.0;
    }
    if literal.is_impossible(catalog) {
        return f64::INFINITY;
    }
    if !literal.polarity {
        // breaking a relation takes at least one action
        return 1.0;
    }
    positive_estimate(literal, state) as f64
}

fn positive_estimate(literal: &Literal, state: &WorldState) -> usize {
    let x = &literal.subject;
    let held = state.holding();
    let x_held = held == Some(x);
    match (literal.relation, &literal.target) {
        (Relation::Holding, _) => {
            let drop_other = usize::from(held.is_some());
            drop_other + fetch(state, x).unwrap_or(0)
        }
        (Relation::OnTop | Relation::Inside, Some(Target::Object(y))) => {
            if x_held {
                let approach = distance_to(state, y).unwrap_or(0);
                return approach + CLEAR_COST * above(state, y) + 1;
            }
            if held == Some(y) {
                return 1 + CLEAR_COST * above(state, x) + 2;
            }
            let clearing = match (state.stack_index_of(x), state.stack_index_of(y)) {
                (Some(cx), Some(cy)) if cx == cy => {
                    let (px, py) = (position(state, x), position(state, y));
                    if px > py {
                        above(state, y).saturating_sub(1)
                    } else {
                        above(state, x)
                    }
                }
                _ => above(state, x) + above(state, y),
            };
            distance_to(state, x).unwrap_or(0) + CLEAR_COST * clearing + 2
        }
        (Relation::OnTop | Relation::Inside, Some(Target::Floor)) => {
            if x_held {
                return 1 + (0..state.column_count())
                    .map(|i| CLEAR_COST * column_len(state, i) + state.arm().abs_diff(i))
                    .min()
                    .unwrap_or(0);
            }
            let Some(cx) = state.stack_index_of(x) else {
                return 0;
            };
            let below = position(state, x);
            let landing = (0..state.column_count())
                .map(|i| {
                    let blockers = if i == cx { below } else { column_len(state, i) };
                    CLEAR_COST * blockers + cx.abs_diff(i)
                })
                .min()
                .unwrap_or(0);
            state.arm().abs_diff(cx) + CLEAR_COST * above(state, x) + 2 + landing
        }
        (Relation::OnTop | Relation::Inside, Some(Target::FloorAt(k))) => {
            let k = *k;
            if x_held {
                return state.arm().abs_diff(k) + CLEAR_COST * column_len(state, k) + 1;
            }
            let Some(cx) = state.stack_index_of(x) else {
                return 0;
            };
            let blockers = if cx == k {
                position(state, x)
            } else {
                column_len(state, k)
            };
            state.arm().abs_diff(cx)
                + cx.abs_diff(k)
                + CLEAR_COST * (above(state, x) + blockers)
                + 2
        }
        (Relation::Above, Some(Target::Object(y))) => above_estimate(state, x, y),
        (Relation::Under, Some(Target::Object(y))) => above_estimate(state, y, x),
        (Relation::Beside | Relation::LeftOf | Relation::RightOf, Some(Target::Object(y))) => {
            if x_held || held == Some(y) {
                return 1;
            }
            let move_x = fetch(state, x).unwrap_or(0) + 1;
            let move_y = fetch(state, y).unwrap_or(0) + 1;
            move_x.min(move_y)
        }
        // `above(x, floor-k)` and friends: x must travel to k.
        (_, Some(Target::FloorAt(_) | Target::Floor)) => {
            if x_held {
                1
            } else {
                fetch(state, x).unwrap_or(0) + 1
            }
        }
        (_, None) => 0,
    }
}

/// `x` above `y`: `x` always has to move, since nothing can be slid under it.
fn above_estimate(state: &WorldState, x: &ObjectId, y: &ObjectId) -> usize {
    let held = state.holding();
    if held == Some(x) {
        return 1;
    }
    if held == Some(y) {
        return 1 + CLEAR_COST * above(state, x) + 2;
    }
    fetch(state, x).unwrap_or(0) + 1
}

/// Actions to get `x` into the gripper (approach, clear, pick up), assuming
/// the gripper is free. `None` if `x` is not in a column.
fn fetch(state: &WorldState, x: &ObjectId) -> Option<usize> {
    Some(distance_to(state, x)? + CLEAR_COST * above(state, x) + 1)
}

fn distance_to(state: &WorldState, x: &ObjectId) -> Option<usize> {
    state
        .stack_index_of(x)
        .map(|column| state.arm().abs_diff(column))
}

fn above(state: &WorldState, x: &ObjectId) -> usize {
    state.objects_above(x).unwrap_or(0)
}

fn position(state: &WorldState, x: &ObjectId) -> usize {
    state.position_in_stack(x).unwrap_or(0)
}

fn column_len(state: &WorldState, index: usize) -> usize {
    state.column(index).map_or(0, <[ObjectId]>::len)
}
