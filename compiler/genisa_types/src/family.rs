//! Type families for overloaded signature slots.
//!
//! The set is closed. Membership follows the overloaded-type convention of
//! the backend: `anyint` and `anyfloat` accept vectors whose lanes are of
//! the right kind, `any` accepts everything except `void`.

use std::fmt;

use crate::ConcreteType;

/// An open slot matching any type in a family.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum TypeFamily {
    /// `any`
    Any,
    /// `anyint`
    AnyInt,
    /// `anyfloat`
    AnyFloat,
    /// `anyvector`
    AnyVector,
    /// `anyptr`
    AnyPtr,
}

impl TypeFamily {
    pub const ALL: [TypeFamily; 5] = [
        TypeFamily::Any,
        TypeFamily::AnyInt,
        TypeFamily::AnyFloat,
        TypeFamily::AnyVector,
        TypeFamily::AnyPtr,
    ];

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            TypeFamily::Any => "any",
            TypeFamily::AnyInt => "anyint",
            TypeFamily::AnyFloat => "anyfloat",
            TypeFamily::AnyVector => "anyvector",
            TypeFamily::AnyPtr => "anyptr",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        TypeFamily::ALL
            .into_iter()
            .find(|family| family.keyword() == keyword)
    }

    /// Check whether `ty` belongs to this family.
    pub const fn contains(self, ty: ConcreteType) -> bool {
        match self {
            TypeFamily::Any => !ty.is_void(),
            TypeFamily::AnyInt => match ty.element() {
                Some(kind) => kind.is_integer(),
                None => false,
            },
            TypeFamily::AnyFloat => match ty.element() {
                Some(kind) => kind.is_float(),
                None => false,
            },
            TypeFamily::AnyVector => ty.is_vector(),
            TypeFamily::AnyPtr => ty.is_pointer(),
        }
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
