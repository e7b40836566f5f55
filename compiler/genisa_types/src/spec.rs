//! Type specifications as written in signature rows.
//!
//! A `TypeSpec` is one position of a signature before resolution. Family
//! slots are numbered by the table loader, not here: a spec only records
//! what the token said.

use std::fmt;

use crate::{ConcreteType, TypeFamily, TypeParseError};

/// One return or parameter position of an intrinsic signature.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeSpec {
    /// A fixed type: `int`, `float4`, `ptr_local`.
    Concrete(ConcreteType),
    /// An open slot: `anyint`.
    Family(TypeFamily),
    /// An open slot with a fallback: `any:float`.
    FamilyWithDefault(TypeFamily, ConcreteType),
    /// Must equal the type bound to family slot `n`: `0`, `1`.
    MatchRef(u32),
}

impl TypeSpec {
    /// Check whether this position introduces a new family slot.
    #[inline]
    pub const fn is_family_slot(self) -> bool {
        matches!(self, TypeSpec::Family(_) | TypeSpec::FamilyWithDefault(..))
    }

    /// The family of a slot-introducing spec.
    pub const fn family(self) -> Option<TypeFamily> {
        match self {
            TypeSpec::Family(family) | TypeSpec::FamilyWithDefault(family, _) => Some(family),
            TypeSpec::Concrete(_) | TypeSpec::MatchRef(_) => None,
        }
    }
}

impl From<ConcreteType> for TypeSpec {
    fn from(ty: ConcreteType) -> Self {
        TypeSpec::Concrete(ty)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Concrete(ty) => write!(f, "{ty}"),
            TypeSpec::Family(family) => write!(f, "{family}"),
            TypeSpec::FamilyWithDefault(family, default) => write!(f, "{family}:{default}"),
            TypeSpec::MatchRef(index) => write!(f, "{index}"),
        }
    }
}

/// Parse a single type token.
///
/// Accepts, in order: a non-negative integer (back reference), a concrete
/// type name, a family keyword, or `family:concrete`.
pub fn parse_type(token: &str) -> Result<TypeSpec, TypeParseError> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        return token
            .parse::<u32>()
            .map(TypeSpec::MatchRef)
            .map_err(|_| TypeParseError::unknown(token));
    }
    if let Some(ty) = ConcreteType::from_name(token) {
        return Ok(TypeSpec::Concrete(ty));
    }
    if let Some(family) = TypeFamily::from_keyword(token) {
        return Ok(TypeSpec::Family(family));
    }
    if let Some((keyword, default)) = token.split_once(':') {
        let family = TypeFamily::from_keyword(keyword);
        let default = ConcreteType::from_name(default);
        if let (Some(family), Some(default)) = (family, default) {
            return Ok(TypeSpec::FamilyWithDefault(family, default));
        }
    }
    Err(TypeParseError::unknown(token))
}

/// Return position of a signature: one type, or a fixed-arity tuple.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReturnSpec {
    Single(TypeSpec),
    Multi(Vec<TypeSpec>),
}

impl ReturnSpec {
    /// All return positions, in order.
    pub fn as_slice(&self) -> &[TypeSpec] {
        match self {
            ReturnSpec::Single(spec) => std::slice::from_ref(spec),
            ReturnSpec::Multi(specs) => specs,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub const fn is_multi(&self) -> bool {
        matches!(self, ReturnSpec::Multi(_))
    }
}

impl From<TypeSpec> for ReturnSpec {
    fn from(spec: TypeSpec) -> Self {
        ReturnSpec::Single(spec)
    }
}

impl fmt::Display for ReturnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnSpec::Single(spec) => write!(f, "{spec}"),
            ReturnSpec::Multi(specs) => {
                f.write_str("(")?;
                for (i, spec) in specs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{spec}")?;
                }
                f.write_str(")")
            }
        }
    }
}
