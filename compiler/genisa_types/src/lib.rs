//! GenISA Types - Intrinsic Signature Type Vocabulary
//!
//! This crate contains the closed type vocabulary used by GenISA intrinsic
//! signatures and the parser for the type tokens that appear in the
//! intrinsic table:
//! - Concrete types (scalars, vectors, pointers, `void`)
//! - Type families (`any`, `anyint`, `anyfloat`, `anyvector`, `anyptr`)
//! - Type specifications, including defaults and back references
//!
//! # Token Grammar
//!
//! ```text
//! token    := concrete | family | family ":" concrete | index
//! concrete := "void" | scalar | scalar lanes | "ptr_" space
//! scalar   := "bool" | "char" | "short" | "int" | "long"
//!           | "half" | "float" | "double"
//! lanes    := "2" | "3" | "4" | "8" | "16"
//! space    := "private" | "global" | "constant" | "local" | "generic"
//! family   := "any" | "anyint" | "anyfloat" | "anyvector" | "anyptr"
//! index    := [0-9]+
//! ```
//!
//! `Display` renders the canonical token, which parses back to the same
//! value.

mod concrete;
mod error;
mod family;
mod spec;

pub use concrete::{AddressSpace, ConcreteType, ScalarKind};
pub use error::TypeParseError;
pub use family::TypeFamily;
pub use spec::{parse_type, ReturnSpec, TypeSpec};
