//! Load-time and resolution-time errors.
//!
//! Load errors are fatal: a registry is either fully built or not built at
//! all. Resolution errors are per call site and always returned to the
//! caller.

use std::fmt;
use std::path::PathBuf;

use genisa_types::{ConcreteType, TypeFamily, TypeParseError};

use crate::descriptor::Position;
use crate::properties::{PropertyError, PropertyFlag};

/// Why a single table row was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("row is not `[return, [params...], \"flags\"]`: {0}")]
    Shape(String),
    #[error(transparent)]
    Type(#[from] TypeParseError),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error("multi-value return has no elements")]
    EmptyReturn,
    #[error("{position} refers to slot {index}, but only {available} slot(s) are assigned before it")]
    MatchRefOutOfRange {
        position: Position,
        index: u32,
        available: usize,
    },
    #[error("default `{default}` of {position} is not a member of `{family}`")]
    DefaultOutsideFamily {
        position: Position,
        family: TypeFamily,
        default: ConcreteType,
    },
    #[error("`void` is not allowed as {position}")]
    VoidOperand { position: Position },
    #[error("extension property `{0}` is rejected by the load configuration")]
    ExtensionFlagRejected(PropertyFlag),
    #[error("intrinsic is defined more than once")]
    DuplicateName,
}

/// Failure to build a registry.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("intrinsic table is malformed at `{name}`: {cause}")]
    TableMalformed {
        name: String,
        #[source]
        cause: TableError,
    },
    #[error("intrinsic table is not valid: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("cannot read intrinsic table `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn malformed(name: &str, cause: impl Into<TableError>) -> Self {
        LoadError::TableMalformed {
            name: name.to_owned(),
            cause: cause.into(),
        }
    }

    /// The row cause of a `TableMalformed` error.
    pub fn table_cause(&self) -> Option<&TableError> {
        match self {
            LoadError::TableMalformed { cause, .. } => Some(cause),
            LoadError::Syntax(_) | LoadError::Io { .. } => None,
        }
    }
}

/// What a call-site position had to match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expected {
    Type(ConcreteType),
    Family(TypeFamily),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Type(ty) => write!(f, "`{ty}`"),
            Expected::Family(family) => write!(f, "a member of `{family}`"),
        }
    }
}

/// Failure to resolve a call site.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown intrinsic `{0}`")]
    UnknownIntrinsic(String),
    #[error("`{name}` expects {expected} argument(s), found {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("`{name}` returns {expected} value(s), caller expects {actual}")]
    ReturnArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("`{name}`: {position} expected {expected}, found `{actual}`")]
    TypeMismatch {
        name: String,
        position: Position,
        expected: Expected,
        actual: ConcreteType,
    },
    #[error("`{name}`: overload slot {slot} is not determined by the arguments; supply a return type")]
    UnresolvedSlot { name: String, slot: u32 },
}
