//! Goal formulas in disjunctive normal form.
//!
//! Text form: literals like `holding(a)`, `ontop(a,floor)`,
//! `ontop(a,floor-2)` or `-beside(a,b)`, joined by ` & ` within a
//! conjunction and ` | ` between conjunctions.

use std::fmt;

use crate::carrier::objects::{Form, ObjectCatalog, ObjectId};
use crate::carrier::world::WorldState;
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Spatial relation named by a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Holding,
    OnTop,
    Inside,
    Above,
    Under,
    Beside,
    LeftOf,
    RightOf,
}

impl Relation {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Holding => "holding",
            Self::OnTop => "ontop",
            Self::Inside => "inside",
            Self::Above => "above",
            Self::Under => "under",
            Self::Beside => "beside",
            Self::LeftOf => "leftof",
            Self::RightOf => "rightof",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "holding" => Self::Holding,
            "ontop" => Self::OnTop,
            "inside" => Self::Inside,
            "above" => Self::Above,
            "under" => Self::Under,
            "beside" => Self::Beside,
            "leftof" => Self::LeftOf,
            "rightof" => Self::RightOf,
            _ => return None,
        })
    }

    /// Number of arguments the relation takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Holding => 1,
            _ => 2,
        }
    }
}

/// A literal argument: an object, the floor anywhere, or the floor of one
/// specific column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Object(ObjectId),
    Floor,
    FloorAt(usize),
}

impl Target {
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if label == "floor" {
            return Self::Floor;
        }
        if let Some(column) = label.strip_prefix("floor-").and_then(|n| n.parse().ok()) {
            return Self::FloorAt(column);
        }
        Self::Object(ObjectId::from(label))
    }

    #[must_use]
    pub fn object(&self) -> Option<&ObjectId> {
        match self {
            Self::Object(id) => Some(id),
            Self::Floor | Self::FloorAt(_) => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(id) => write!(f, "{id}"),
            Self::Floor => f.write_str("floor"),
            Self::FloorAt(column) => write!(f, "floor-{column}"),
        }
    }
}

/// Error parsing a goal formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalParseError {
    /// Literal text is not `name(args)`.
    Malformed { literal: String },
    UnknownRelation { name: String },
    WrongArity {
        relation: Relation,
        expected: usize,
        actual: usize,
    },
    /// The first argument must name an object.
    SubjectNotObject { literal: String },
}

impl fmt::Display for GoalParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { literal } => write!(f, "malformed literal: {literal:?}"),
            Self::UnknownRelation { name } => write!(f, "unknown relation: {name:?}"),
            Self::WrongArity {
                relation,
                expected,
                actual,
            } => write!(
                f,
                "relation {} takes {expected} argument(s), got {actual}",
                relation.name()
            ),
            Self::SubjectNotObject { literal } => {
                write!(f, "first argument must be an object: {literal:?}")
            }
        }
    }
}

impl std::error::Error for GoalParseError {}

/// A relation that should (or, with negative polarity, should not) hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub polarity: bool,
    pub relation: Relation,
    pub subject: ObjectId,
    pub target: Option<Target>,
}

impl Literal {
    #[must_use]
    pub fn holding(subject: impl Into<ObjectId>) -> Self {
        Self {
            polarity: true,
            relation: Relation::Holding,
            subject: subject.into(),
            target: None,
        }
    }

    #[must_use]
    pub fn binary(relation: Relation, subject: impl Into<ObjectId>, target: Target) -> Self {
        Self {
            polarity: true,
            relation,
            subject: subject.into(),
            target: Some(target),
        }
    }

    #[must_use]
    pub fn negated(mut self) -> Self {
        self.polarity = !self.polarity;
        self
    }

    /// Parse one literal, e.g. `-ontop(a,floor)`.
    ///
    /// # Errors
    ///
    /// Returns [`GoalParseError`] for malformed text, unknown relations,
    /// wrong arity, or a non-object subject.
    pub fn parse(text: &str) -> Result<Self, GoalParseError> {
        let text = text.trim();
        let malformed = || GoalParseError::Malformed {
            literal: text.to_string(),
        };
        let (polarity, body) = match text.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, text),
        };
        let (name, rest) = body.split_once('(').ok_or_else(malformed)?;
        let args = rest.strip_suffix(')').ok_or_else(malformed)?;
        let relation = Relation::from_name(name.trim()).ok_or_else(|| {
            GoalParseError::UnknownRelation {
                name: name.trim().to_string(),
            }
        })?;
        let args: Vec<&str> = args
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect();
        if args.len() != relation.arity() {
            return Err(GoalParseError::WrongArity {
                relation,
                expected: relation.arity(),
                actual: args.len(),
            });
        }
        let Target::Object(subject) = Target::parse(args[0]) else {
            return Err(GoalParseError::SubjectNotObject {
                literal: text.to_string(),
            });
        };
        Ok(Self {
            polarity,
            relation,
            subject,
            target: args.get(1).map(|a| Target::parse(a)),
        })
    }

    /// Whether the literal is true in `state`.
    ///
    /// `inside(x,y)` is `ontop(x,y)` with `y` a box according to `catalog`.
    /// Nothing is ever inside the floor.
    #[must_use]
    pub fn holds(&self, state: &WorldState, catalog: &ObjectCatalog) -> bool {
        self.relation_holds(state, catalog) == self.polarity
    }

    /// True for a positive `inside` whose container is not a catalogued
    /// box. Forms never change, so no state satisfies such a literal.
    #[must_use]
    pub fn is_impossible(&self, catalog: &ObjectCatalog) -> bool {
        self.polarity
            && self.relation == Relation::Inside
            && !self
                .target
                .as_ref()
                .is_some_and(|target| is_box(target, catalog))
    }

    fn relation_holds(&self, state: &WorldState, catalog: &ObjectCatalog) -> bool {
        let subject = &self.subject;
        if self.relation == Relation::Holding {
            return state.holding() == Some(subject);
        }
        let Some(target) = &self.target else {
            return false;
        };
        let (Some(sc), Some(sp)) = (state.stack_index_of(subject), state.position_in_stack(subject))
        else {
            return false;
        };
        match target {
            Target::Floor => match self.relation {
                Relation::OnTop => sp == 0,
                Relation::Above => true,
                _ => false,
            },
            Target::FloorAt(column) => match self.relation {
                Relation::OnTop => sp == 0 && sc == *column,
                Relation::Above => sc == *column,
                _ => false,
            },
            Target::Object(other) => {
                if other == subject {
                    return false;
                }
                let (Some(oc), Some(op)) =
                    (state.stack_index_of(other), state.position_in_stack(other))
                else {
                    return false;
                };
                match self.relation {
                    Relation::OnTop => sc == oc && sp == op + 1,
                    Relation::Inside => sc == oc && sp == op + 1 && is_box(target, catalog),
                    Relation::Above => sc == oc && sp > op,
                    Relation::Under => sc == oc && sp < op,
                    Relation::Beside => sc.abs_diff(oc) == 1,
                    Relation::LeftOf => sc < oc,
                    Relation::RightOf => sc > oc,
                    Relation::Holding => false,
                }
            }
        }
    }
}

fn is_box(target: &Target, catalog: &ObjectCatalog) -> bool {
    target
        .object()
        .and_then(|id| catalog.get(id))
        .is_some_and(|descriptor| descriptor.form == Form::Box)
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            f.write_str("-")?;
        }
        write!(f, "{}({}", self.relation.name(), self.subject)?;
        if let Some(target) = &self.target {
            write!(f, ",{target}")?;
        }
        f.write_str(")")
    }
}

/// Literals that must all hold.
pub type Conjunction = Vec<Literal>;

/// A disjunction of conjunctions. An empty formula is unsatisfiable; an
/// empty conjunction is trivially true.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DnfFormula {
    conjunctions: Vec<Conjunction>,
}

impl DnfFormula {
    #[must_use]
    pub fn new(conjunctions: Vec<Conjunction>) -> Self {
        Self { conjunctions }
    }

    /// A formula with a single literal.
    #[must_use]
    pub fn single(literal: Literal) -> Self {
        Self::new(vec![vec![literal]])
    }

    /// Parse `lit & lit | lit`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`GoalParseError`] from any literal.
    pub fn parse(text: &str) -> Result<Self, GoalParseError> {
        let conjunctions = text
            .split('|')
            .map(|conj| {
                conj.split('&')
                    .map(Literal::parse)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(conjunctions))
    }

    #[must_use]
    pub fn conjunctions(&self) -> &[Conjunction] {
        &self.conjunctions
    }

    /// Content digest of the formula's text form.
    ///
    /// Literal order is significant: `a & b` and `b & a` digest differently.
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(HashDomain::GoalFormula, self.to_string().as_bytes())
    }

    /// True iff some conjunction has all its literals true in `state`.
    #[must_use]
    pub fn holds(&self, state: &WorldState, catalog: &ObjectCatalog) -> bool {
        self.conjunctions
            .iter()
            .any(|conj| conj.iter().all(|lit| lit.holds(state, catalog)))
    }
}

impl fmt::Display for DnfFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conj) in self.conjunctions.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            for (j, lit) in conj.iter().enumerate() {
                if j > 0 {
                    f.write_str(" & ")?;
                }
                write!(f, "{lit}")?;
            }
        }
        Ok(())
    }
}
