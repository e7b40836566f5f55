//! The intrinsic registry: every descriptor of a loaded table.
//!
//! # Design
//!
//! - Descriptors are stored once, in table load order, so `list_all` and
//!   `iter` are deterministic.
//! - An `FxHashMap` from name to position gives O(1) lookup.
//! - A registry is immutable once built. Replacing the table means
//!   building a new registry (see `SharedRegistry`).

use std::path::Path;

use genisa_types::ConcreteType;
use rustc_hash::FxHashMap;

use crate::config::{ExtensionPolicy, LoadConfig};
use crate::descriptor::IntrinsicDescriptor;
use crate::error::{LoadError, ResolveError, TableError};
use crate::properties::{PropertyFlag, PropertyFlags};
use crate::raw::RawTable;
use crate::resolve::{resolve_descriptor, ResolvedSignature};

/// An immutable set of intrinsic descriptors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    /// Descriptors in load order.
    descriptors: Vec<IntrinsicDescriptor>,
    /// Name -> index into `descriptors`.
    by_name: FxHashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Build a registry from a raw table.
    ///
    /// The whole table is validated before anything is returned; the first
    /// bad row aborts the load.
    #[tracing::instrument(level = "debug", skip_all, fields(rows = table.len()))]
    pub fn load(table: &RawTable, config: &LoadConfig) -> Result<Self, LoadError> {
        let mut registry = Registry {
            descriptors: Vec::with_capacity(table.len()),
            by_name: FxHashMap::default(),
        };
        registry.by_name.reserve(table.len());

        for (name, row) in table.iter() {
            if registry.by_name.contains_key(name) {
                return Err(LoadError::malformed(name, TableError::DuplicateName));
            }
            let row = row
                .map_err(|message| LoadError::malformed(name, TableError::Shape(message.to_owned())))?;
            let descriptor = IntrinsicDescriptor::from_raw(name, row)
                .map_err(|cause| LoadError::malformed(name, cause))?;
            check_properties(descriptor.properties(), config)
                .map_err(|cause| LoadError::malformed(name, cause))?;
            registry.insert(descriptor);
        }

        tracing::debug!(intrinsics = registry.len(), "intrinsic registry built");
        Ok(registry)
    }

    /// Parse and load the JSON form of a table.
    pub fn from_json(text: &str, config: &LoadConfig) -> Result<Self, LoadError> {
        let table = RawTable::from_json(text)?;
        Self::load(&table, config)
    }

    /// Read and load a JSON table file.
    pub fn from_path(path: impl AsRef<Path>, config: &LoadConfig) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text, config)
    }

    fn insert(&mut self, descriptor: IntrinsicDescriptor) {
        self.by_name
            .insert(descriptor.name().to_owned(), self.descriptors.len());
        self.descriptors.push(descriptor);
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&IntrinsicDescriptor> {
        self.by_name.get(name).map(|&index| &self.descriptors[index])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The unresolved descriptor of `name`.
    pub fn describe(&self, name: &str) -> Result<&IntrinsicDescriptor, ResolveError> {
        self.get(name)
            .ok_or_else(|| ResolveError::UnknownIntrinsic(name.to_owned()))
    }

    /// All intrinsic names in load order.
    pub fn list_all(&self) -> Vec<&str> {
        self.descriptors.iter().map(IntrinsicDescriptor::name).collect()
    }

    /// All descriptors in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, IntrinsicDescriptor> {
        self.descriptors.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors carrying `flag`, in load order.
    pub fn with_property(&self, flag: PropertyFlag) -> impl Iterator<Item = &IntrinsicDescriptor> {
        self.descriptors
            .iter()
            .filter(move |descriptor| descriptor.properties().contains(flag.bit()))
    }

    /// Number of family slots declared by `name`.
    pub fn family_slot_count(&self, name: &str) -> Option<usize> {
        self.get(name).map(IntrinsicDescriptor::family_slot_count)
    }

    /// Render the registry back to a raw table.
    pub fn to_raw_table(&self) -> RawTable {
        self.descriptors
            .iter()
            .map(|descriptor| (descriptor.name(), descriptor.to_raw()))
            .collect()
    }

    /// Resolve a call site from its argument types.
    pub fn resolve(
        &self,
        name: &str,
        args: &[ConcreteType],
    ) -> Result<ResolvedSignature, ResolveError> {
        resolve_descriptor(self.describe(name)?, None, args)
    }

    /// Resolve a call site whose result types are also known.
    pub fn resolve_with_return(
        &self,
        name: &str,
        ret: &[ConcreteType],
        args: &[ConcreteType],
    ) -> Result<ResolvedSignature, ResolveError> {
        resolve_descriptor(self.describe(name)?, Some(ret), args)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a IntrinsicDescriptor;
    type IntoIter = std::slice::Iter<'a, IntrinsicDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_properties(properties: PropertyFlags, config: &LoadConfig) -> Result<(), TableError> {
    if config.check_property_conflicts {
        properties.validate()?;
    }
    if config.extension_flags == ExtensionPolicy::Reject {
        if let Some(flag) = properties.extension() {
            return Err(TableError::ExtensionFlagRejected(flag));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
