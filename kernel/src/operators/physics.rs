//! Placement physics: may a held object come to rest on a given support?
//!
//! The put-down transition consults a [`PlacementOracle`]. The oracle is
//! injected, so the state graph never hard-codes physical rules.

use crate::carrier::objects::{Form, ObjectCatalog, ObjectDescriptor, ObjectId, Size, Support};
use crate::carrier::world::WorldState;

/// Validity predicate for placing `object` on top of (or inside) `support`.
pub trait PlacementOracle {
    fn can_place(&self, object: &ObjectId, support: &Support, state: &WorldState) -> bool;
}

impl<F> PlacementOracle for F
where
    F: Fn(&ObjectId, &Support, &WorldState) -> bool,
{
    fn can_place(&self, object: &ObjectId, support: &Support, state: &WorldState) -> bool {
        self(object, support, state)
    }
}

/// Oracle that accepts every placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl PlacementOracle for Unconstrained {
    fn can_place(&self, _object: &ObjectId, _support: &Support, _state: &WorldState) -> bool {
        true
    }
}

/// Box/ball/size rules over an object catalog.
///
/// - Anything may rest on the floor.
/// - Balls rest only on the floor or inside boxes, and support nothing.
/// - Nothing rests on a smaller object.
/// - A box holds strictly smaller pyramids, planks and boxes, and balls no
///   larger than itself. Bricks and tables never go in a box.
/// - A box cannot rest on a pyramid of its own size, and a small box cannot
///   rest on a brick.
///
/// Objects missing from the catalog can never be placed on anything but the
/// floor.
#[derive(Debug, Clone)]
pub struct PhysicalLaws {
    catalog: ObjectCatalog,
}

impl PhysicalLaws {
    #[must_use]
    pub fn new(catalog: ObjectCatalog) -> Self {
        Self { catalog }
    }

    /// Rule check between two described objects.
    #[must_use]
    pub fn allows(object: &ObjectDescriptor, support: &ObjectDescriptor) -> bool {
        if support.form == Form::Box {
            return box_holds(support, object);
        }
        object.form != Form::Ball && rests_on_top(object, support)
    }
}

impl PlacementOracle for PhysicalLaws {
    fn can_place(&self, object: &ObjectId, support: &Support, _state: &WorldState) -> bool {
        let Support::Object(target) = support else {
            return true;
        };
        match (self.catalog.get(object), self.catalog.get(target)) {
            (Some(o), Some(s)) => Self::allows(o, s),
            _ => false,
        }
    }
}

fn rests_on_top(object: &ObjectDescriptor, support: &ObjectDescriptor) -> bool {
    if object.size > support.size || support.form == Form::Ball {
        return false;
    }
    if object.form == Form::Box {
        match support.form {
            Form::Pyramid => return support.size != object.size,
            Form::Brick if object.size == Size::Small => return false,
            _ => {}
        }
    }
    true
}

fn box_holds(container: &ObjectDescriptor, object: &ObjectDescriptor) -> bool {
    match object.form {
        Form::Pyramid | Form::Plank | Form::Box => container.size > object.size,
        Form::Ball => container.size >= object.size,
        Form::Brick | Form::Table => false,
    }
}
