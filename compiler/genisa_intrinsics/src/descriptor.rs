//! Intrinsic descriptors and family-slot assignment.
//!
//! # Slot Numbering
//!
//! Family slots (`Family` and `FamilyWithDefault` positions) are numbered in
//! one left-to-right pass over the return positions first, then the
//! parameters. A `MatchRef(i)` consumes a number that was already handed
//! out; it never introduces one.
//!
//! ```text
//! GenISA_uaddc: anyvector (anyint, 1)
//!               slot 0     slot 1  ^-- MatchRef(1)
//! ```

use std::fmt;

use genisa_types::{ConcreteType, ReturnSpec, TypeFamily, TypeSpec};

use crate::error::TableError;
use crate::properties::{parse_properties, PropertyFlags};
use crate::raw::{RawReturn, RawRow, RawToken};

/// A position in a signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Return(usize),
    Param(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Return(index) => write!(f, "return value {index}"),
            Position::Param(index) => write!(f, "argument {index}"),
        }
    }
}

/// A numbered family slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Where the slot was introduced.
    pub position: Position,
    pub family: TypeFamily,
    /// Fallback binding for `family:default` slots.
    pub default: Option<ConcreteType>,
}

/// The declared, unresolved signature of one intrinsic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntrinsicDescriptor {
    name: String,
    returns: ReturnSpec,
    params: Vec<TypeSpec>,
    properties: PropertyFlags,
    /// Family slots indexed by slot number.
    slots: Vec<Slot>,
}

impl IntrinsicDescriptor {
    /// Build a descriptor, numbering its family slots.
    ///
    /// Checks every back reference, every default, and every use of
    /// `void`. Property semantics are checked by the loader, which knows
    /// the configuration.
    pub fn new(
        name: impl Into<String>,
        returns: ReturnSpec,
        params: Vec<TypeSpec>,
        properties: PropertyFlags,
    ) -> Result<Self, TableError> {
        if returns.arity() == 0 {
            return Err(TableError::EmptyReturn);
        }

        let single_return = !returns.is_multi();
        let mut slots = Vec::new();
        for (position, spec) in walk(&returns, &params) {
            match spec {
                TypeSpec::Concrete(ty) => {
                    let void_allowed = single_return && position == Position::Return(0);
                    if ty.is_void() && !void_allowed {
                        return Err(TableError::VoidOperand { position });
                    }
                }
                TypeSpec::Family(family) => slots.push(Slot {
                    position,
                    family,
                    default: None,
                }),
                TypeSpec::FamilyWithDefault(family, default) => {
                    if !family.contains(default) {
                        return Err(TableError::DefaultOutsideFamily {
                            position,
                            family,
                            default,
                        });
                    }
                    slots.push(Slot {
                        position,
                        family,
                        default: Some(default),
                    });
                }
                TypeSpec::MatchRef(index) => {
                    if index as usize >= slots.len() {
                        return Err(TableError::MatchRefOutOfRange {
                            position,
                            index,
                            available: slots.len(),
                        });
                    }
                }
            }
        }

        Ok(IntrinsicDescriptor {
            name: name.into(),
            returns,
            params,
            properties,
            slots,
        })
    }

    /// Parse a raw table row.
    pub fn from_raw(name: &str, row: &RawRow) -> Result<Self, TableError> {
        let returns = match &row.ret {
            RawReturn::Single(token) => ReturnSpec::Single(token.to_spec()?),
            RawReturn::Multi(tokens) => ReturnSpec::Multi(
                tokens
                    .iter()
                    .map(RawToken::to_spec)
                    .collect::<Result<_, _>>()?,
            ),
        };
        let params = row
            .params
            .iter()
            .map(RawToken::to_spec)
            .collect::<Result<Vec<_>, _>>()?;
        let properties = parse_properties(&row.properties)?;
        Self::new(name, returns, params, properties)
    }

    /// Render back to the row form.
    pub fn to_raw(&self) -> RawRow {
        let ret = match &self.returns {
            ReturnSpec::Single(spec) => RawReturn::Single(RawToken::from(*spec)),
            ReturnSpec::Multi(specs) => {
                RawReturn::Multi(specs.iter().copied().map(RawToken::from).collect())
            }
        };
        RawRow {
            ret,
            params: self.params.iter().copied().map(RawToken::from).collect(),
            properties: self.properties.to_string(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn returns(&self) -> &ReturnSpec {
        &self.returns
    }

    #[inline]
    pub fn params(&self) -> &[TypeSpec] {
        &self.params
    }

    #[inline]
    pub fn properties(&self) -> PropertyFlags {
        self.properties
    }

    /// Family slots in slot-number order.
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: u32) -> Option<&Slot> {
        self.slots.get(index as usize)
    }

    #[inline]
    pub fn family_slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_overloaded(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Fewest arguments a call may supply: trailing `family:default`
    /// parameters may be omitted.
    pub fn min_arity(&self) -> usize {
        let defaulted = self
            .params
            .iter()
            .rev()
            .take_while(|spec| matches!(spec, TypeSpec::FamilyWithDefault(..)))
            .count();
        self.params.len() - defaulted
    }

    /// Every position, return values first.
    pub fn positions(&self) -> impl Iterator<Item = (Position, TypeSpec)> + '_ {
        walk(&self.returns, &self.params)
    }
}

impl fmt::Display for IntrinsicDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, spec) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{spec}")?;
        }
        write!(f, ") -> {} [{}]", self.returns, self.properties)
    }
}

fn walk<'a>(
    returns: &'a ReturnSpec,
    params: &'a [TypeSpec],
) -> impl Iterator<Item = (Position, TypeSpec)> + 'a {
    let returns = returns
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, spec)| (Position::Return(i), *spec));
    let params = params
        .iter()
        .enumerate()
        .map(|(i, spec)| (Position::Param(i), *spec));
    returns.chain(params)
}
