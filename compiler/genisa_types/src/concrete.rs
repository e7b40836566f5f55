//! Concrete types: scalars, vectors, pointers and `void`.
//!
//! # Design
//!
//! `ConcreteType` is small and `Copy` so bindings can be stored inline
//! during resolution. Vector lane counts are restricted to the
//! widths the hardware exposes.

use std::fmt;
use std::str::FromStr;

use crate::TypeParseError;

/// Scalar element kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ScalarKind {
    /// 1-bit integer
    Bool,
    /// 8-bit integer
    Char,
    /// 16-bit integer
    Short,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// 16-bit IEEE float
    Half,
    /// 32-bit IEEE float
    Float,
    /// 64-bit IEEE float
    Double,
}

impl ScalarKind {
    /// All scalar kinds, integers first.
    pub const ALL: [ScalarKind; 8] = [
        ScalarKind::Bool,
        ScalarKind::Char,
        ScalarKind::Short,
        ScalarKind::Int,
        ScalarKind::Long,
        ScalarKind::Half,
        ScalarKind::Float,
        ScalarKind::Double,
    ];

    /// Token name as it appears in the intrinsic table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Char => "char",
            ScalarKind::Short => "short",
            ScalarKind::Int => "int",
            ScalarKind::Long => "long",
            ScalarKind::Half => "half",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ScalarKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarKind::Bool
                | ScalarKind::Char
                | ScalarKind::Short
                | ScalarKind::Int
                | ScalarKind::Long
        )
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        !self.is_integer()
    }

    /// Width in bits.
    #[must_use]
    pub const fn bit_width(self) -> u32 {
        match self {
            ScalarKind::Bool => 1,
            ScalarKind::Char => 8,
            ScalarKind::Short | ScalarKind::Half => 16,
            ScalarKind::Int | ScalarKind::Float => 32,
            ScalarKind::Long | ScalarKind::Double => 64,
        }
    }
}

/// Pointer address spaces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum AddressSpace {
    Private,
    Global,
    Constant,
    Local,
    Generic,
}

impl AddressSpace {
    pub const ALL: [AddressSpace; 5] = [
        AddressSpace::Private,
        AddressSpace::Global,
        AddressSpace::Constant,
        AddressSpace::Local,
        AddressSpace::Generic,
    ];

    /// Name without the `ptr_` prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AddressSpace::Private => "private",
            AddressSpace::Global => "global",
            AddressSpace::Constant => "constant",
            AddressSpace::Local => "local",
            AddressSpace::Generic => "generic",
        }
    }

    /// Numeric address space used by the backend.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            AddressSpace::Private => 0,
            AddressSpace::Global => 1,
            AddressSpace::Constant => 2,
            AddressSpace::Local => 3,
            AddressSpace::Generic => 4,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        AddressSpace::ALL.into_iter().find(|space| space.name() == name)
    }
}

/// A fully determined type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConcreteType {
    /// No value. Only valid as a single return type.
    Void,
    Scalar(ScalarKind),
    /// Fixed-width vector, e.g. `float4`.
    Vector { elem: ScalarKind, lanes: u8 },
    Pointer(AddressSpace),
}

impl ConcreteType {
    /// Lane counts accepted for vector types.
    pub const VECTOR_LANES: [u8; 5] = [2, 3, 4, 8, 16];

    pub const BOOL: Self = ConcreteType::Scalar(ScalarKind::Bool);
    pub const CHAR: Self = ConcreteType::Scalar(ScalarKind::Char);
    pub const SHORT: Self = ConcreteType::Scalar(ScalarKind::Short);
    pub const INT: Self = ConcreteType::Scalar(ScalarKind::Int);
    pub const LONG: Self = ConcreteType::Scalar(ScalarKind::Long);
    pub const HALF: Self = ConcreteType::Scalar(ScalarKind::Half);
    pub const FLOAT: Self = ConcreteType::Scalar(ScalarKind::Float);
    pub const DOUBLE: Self = ConcreteType::Scalar(ScalarKind::Double);

    /// Build a vector type, rejecting unsupported lane counts.
    pub fn vector(elem: ScalarKind, lanes: u8) -> Option<Self> {
        ConcreteType::VECTOR_LANES
            .contains(&lanes)
            .then_some(ConcreteType::Vector { elem, lanes })
    }

    #[inline]
    pub const fn pointer(space: AddressSpace) -> Self {
        ConcreteType::Pointer(space)
    }

    /// Parse a concrete type name such as `int`, `float4` or `ptr_local`.
    ///
    /// Lane suffixes must be written without leading zeros so that every
    /// accepted name is also the canonical rendering.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "void" {
            return Some(ConcreteType::Void);
        }
        if let Some(space) = name.strip_prefix("ptr_") {
            return AddressSpace::from_name(space).map(ConcreteType::Pointer);
        }
        if let Some(kind) = ScalarKind::from_name(name) {
            return Some(ConcreteType::Scalar(kind));
        }

        let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &name[base.len()..];
        if digits.is_empty() || digits.starts_with('0') {
            return None;
        }
        let elem = ScalarKind::from_name(base)?;
        let lanes = digits.parse::<u8>().ok()?;
        ConcreteType::vector(elem, lanes)
    }

    #[inline]
    pub const fn is_void(self) -> bool {
        matches!(self, ConcreteType::Void)
    }

    #[inline]
    pub const fn is_vector(self) -> bool {
        matches!(self, ConcreteType::Vector { .. })
    }

    #[inline]
    pub const fn is_pointer(self) -> bool {
        matches!(self, ConcreteType::Pointer(_))
    }

    /// Scalar kind of a scalar, or lane kind of a vector.
    pub const fn element(self) -> Option<ScalarKind> {
        match self {
            ConcreteType::Scalar(kind) | ConcreteType::Vector { elem: kind, .. } => Some(kind),
            ConcreteType::Void | ConcreteType::Pointer(_) => None,
        }
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Void => f.write_str("void"),
            ConcreteType::Scalar(kind) => f.write_str(kind.name()),
            ConcreteType::Vector { elem, lanes } => write!(f, "{}{lanes}", elem.name()),
            ConcreteType::Pointer(space) => write!(f, "ptr_{}", space.name()),
        }
    }
}

impl FromStr for ConcreteType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConcreteType::from_name(s).ok_or_else(|| TypeParseError::unknown(s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
