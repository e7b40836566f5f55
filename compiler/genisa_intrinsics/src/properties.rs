//! Intrinsic property flags.
//!
//! A property string such as `"Convergent,NoMem"` parses into a
//! `PropertyFlags` set. The set is a closed vocabulary: the eight
//! documented flags plus `InaccessibleMemOnly`, which the table uses but
//! does not document (see `PropertyFlag::is_extension`).
//!
//! # Design
//!
//! `None` has its own bit. An explicit `"None"` means "no special effect"
//! and is distinct from an empty (invalid) set.

use std::fmt;

use bitflags::bitflags;

/// One named property.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PropertyFlag {
    None,
    Convergent,
    NoMem,
    ReadMem,
    ReadArgMem,
    ReadWriteArgMem,
    InaccessibleMemOnly,
    NoReturn,
    NoDuplicate,
}

impl PropertyFlag {
    /// All flags, in canonical rendering order.
    pub const ALL: [PropertyFlag; 9] = [
        PropertyFlag::None,
        PropertyFlag::Convergent,
        PropertyFlag::NoMem,
        PropertyFlag::ReadMem,
        PropertyFlag::ReadArgMem,
        PropertyFlag::ReadWriteArgMem,
        PropertyFlag::InaccessibleMemOnly,
        PropertyFlag::NoReturn,
        PropertyFlag::NoDuplicate,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PropertyFlag::None => "None",
            PropertyFlag::Convergent => "Convergent",
            PropertyFlag::NoMem => "NoMem",
            PropertyFlag::ReadMem => "ReadMem",
            PropertyFlag::ReadArgMem => "ReadArgMem",
            PropertyFlag::ReadWriteArgMem => "ReadWriteArgMem",
            PropertyFlag::InaccessibleMemOnly => "InaccessibleMemOnly",
            PropertyFlag::NoReturn => "NoReturn",
            PropertyFlag::NoDuplicate => "NoDuplicate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PropertyFlag::ALL.into_iter().find(|flag| flag.name() == name)
    }

    /// Flags observed in the table but absent from the documented set.
    #[inline]
    pub const fn is_extension(self) -> bool {
        matches!(self, PropertyFlag::InaccessibleMemOnly)
    }

    pub const fn bit(self) -> PropertyFlags {
        match self {
            PropertyFlag::None => PropertyFlags::NONE,
            PropertyFlag::Convergent => PropertyFlags::CONVERGENT,
            PropertyFlag::NoMem => PropertyFlags::NO_MEM,
            PropertyFlag::ReadMem => PropertyFlags::READ_MEM,
            PropertyFlag::ReadArgMem => PropertyFlags::READ_ARG_MEM,
            PropertyFlag::ReadWriteArgMem => PropertyFlags::READ_WRITE_ARG_MEM,
            PropertyFlag::InaccessibleMemOnly => PropertyFlags::INACCESSIBLE_MEM_ONLY,
            PropertyFlag::NoReturn => PropertyFlags::NO_RETURN,
            PropertyFlag::NoDuplicate => PropertyFlags::NO_DUPLICATE,
        }
    }
}

impl fmt::Display for PropertyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Validated set of intrinsic properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct PropertyFlags: u16 {
        /// Explicitly no special effect.
        const NONE = 1 << 0;
        /// Must execute uniformly across SIMD lanes.
        const CONVERGENT = 1 << 1;
        /// Does not access memory.
        const NO_MEM = 1 << 2;
        /// May read any memory.
        const READ_MEM = 1 << 3;
        /// Reads only memory reachable from pointer arguments.
        const READ_ARG_MEM = 1 << 4;
        /// Reads and writes only memory reachable from pointer arguments.
        const READ_WRITE_ARG_MEM = 1 << 5;
        /// Touches only memory not visible to the module.
        const INACCESSIBLE_MEM_ONLY = 1 << 6;
        /// Never returns.
        const NO_RETURN = 1 << 7;
        /// Must not be duplicated.
        const NO_DUPLICATE = 1 << 8;
    }
}

/// Memory behaviour implied by a property set.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemoryEffect {
    /// No memory flag: may read and write anything.
    Unknown,
    ReadNone,
    ReadOnly,
    ArgMemReadOnly,
    ArgMemReadWrite,
    InaccessibleOnly,
}

/// Error produced while parsing or validating properties.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    #[error("property `{first}` conflicts with `{second}`")]
    Conflicting {
        first: PropertyFlag,
        second: PropertyFlag,
    },
    #[error("empty property set")]
    Empty,
}

impl PropertyFlags {
    /// Flags that each describe the whole memory footprint.
    pub const MEMORY_MASK: Self = Self::from_bits_truncate(
        Self::NO_MEM.bits()
            | Self::READ_MEM.bits()
            | Self::READ_ARG_MEM.bits()
            | Self::READ_WRITE_ARG_MEM.bits(),
    );

    /// Members of the set in canonical order.
    pub fn members(self) -> impl Iterator<Item = PropertyFlag> {
        PropertyFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(flag.bit()))
    }

    /// The first extension flag in the set, if any.
    pub fn extension(self) -> Option<PropertyFlag> {
        self.members().find(|flag| flag.is_extension())
    }

    /// Check the set for contradictory combinations.
    pub fn validate(self) -> Result<(), PropertyError> {
        if self.is_empty() {
            return Err(PropertyError::Empty);
        }
        if self.contains(Self::NONE) {
            if let Some(other) = self.difference(Self::NONE).members().next() {
                return Err(PropertyError::Conflicting {
                    first: PropertyFlag::None,
                    second: other,
                });
            }
        }

        let mut memory = self.intersection(Self::MEMORY_MASK).members();
        if let (Some(first), Some(second)) = (memory.next(), memory.next()) {
            return Err(PropertyError::Conflicting { first, second });
        }

        if self.contains(Self::NO_MEM | Self::INACCESSIBLE_MEM_ONLY) {
            return Err(PropertyError::Conflicting {
                first: PropertyFlag::NoMem,
                second: PropertyFlag::InaccessibleMemOnly,
            });
        }
        Ok(())
    }

    pub fn memory_effect(self) -> MemoryEffect {
        if self.contains(Self::NO_MEM) {
            MemoryEffect::ReadNone
        } else if self.contains(Self::READ_MEM) {
            MemoryEffect::ReadOnly
        } else if self.contains(Self::READ_ARG_MEM) {
            MemoryEffect::ArgMemReadOnly
        } else if self.contains(Self::READ_WRITE_ARG_MEM) {
            MemoryEffect::ArgMemReadWrite
        } else if self.contains(Self::INACCESSIBLE_MEM_ONLY) {
            MemoryEffect::InaccessibleOnly
        } else {
            MemoryEffect::Unknown
        }
    }

    #[inline]
    pub fn may_read_memory(self) -> bool {
        self.memory_effect() != MemoryEffect::ReadNone
    }

    #[inline]
    pub fn may_write_memory(self) -> bool {
        matches!(
            self.memory_effect(),
            MemoryEffect::Unknown | MemoryEffect::ArgMemReadWrite | MemoryEffect::InaccessibleOnly
        )
    }

    #[inline]
    pub const fn is_convergent(self) -> bool {
        self.contains(Self::CONVERGENT)
    }

    #[inline]
    pub const fn is_no_return(self) -> bool {
        self.contains(Self::NO_RETURN)
    }

    #[inline]
    pub const fn is_no_duplicate(self) -> bool {
        self.contains(Self::NO_DUPLICATE)
    }
}

impl From<PropertyFlag> for PropertyFlags {
    fn from(flag: PropertyFlag) -> Self {
        flag.bit()
    }
}

impl FromIterator<PropertyFlag> for PropertyFlags {
    fn from_iter<I: IntoIterator<Item = PropertyFlag>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PropertyFlags::empty(), |set, flag| set | flag.bit())
    }
}

impl fmt::Display for PropertyFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, flag) in self.members().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(flag.name())?;
        }
        Ok(())
    }
}

/// Parse a comma-separated property list.
///
/// Tokens are trimmed; repeats are folded into the set. The first
/// unrecognized token (including an empty one) is reported.
pub fn parse_properties(text: &str) -> Result<PropertyFlags, PropertyError> {
    let mut flags = PropertyFlags::empty();
    for token in text.split(',').map(str::trim) {
        let flag = PropertyFlag::from_name(token)
            .ok_or_else(|| PropertyError::UnknownProperty(token.to_owned()))?;
        flags |= flag.bit();
    }
    Ok(flags)
}
