//! Loader and emitter configuration.

/// How the loader treats property flags outside the documented set.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ExtensionPolicy {
    /// Extension flags are first-class members of the vocabulary.
    #[default]
    Allow,
    /// Only the documented flags are accepted.
    Reject,
}

/// Configuration for table loading.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LoadConfig {
    /// Treatment of `InaccessibleMemOnly` and any future extension flag.
    pub extension_flags: ExtensionPolicy,
    /// Reject contradictory property combinations (`None,NoMem`, `NoMem,ReadMem`).
    pub check_property_conflicts: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            extension_flags: ExtensionPolicy::Allow,
            check_property_conflicts: true,
        }
    }
}

impl LoadConfig {
    /// Documented vocabulary only, all checks on.
    pub fn strict() -> Self {
        LoadConfig {
            extension_flags: ExtensionPolicy::Reject,
            check_property_conflicts: true,
        }
    }

    /// Accept everything that parses.
    pub fn permissive() -> Self {
        LoadConfig {
            extension_flags: ExtensionPolicy::Allow,
            check_property_conflicts: false,
        }
    }
}

/// Configuration for IR name and declaration emission.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EmitConfig {
    /// Prefix for emitted intrinsic names.
    pub namespace: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        EmitConfig {
            namespace: "llvm.genx".to_owned(),
        }
    }
}
