//! Thread-safe, hot-reloadable registry handle.
//!
//! Readers take a snapshot (`Arc<Registry>`) and resolve against it
//! without holding the lock. A reload builds the new registry first and
//! then swaps the published `Arc`, so a reader sees either the old
//! registry or the new one, never a mix.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use genisa_types::ConcreteType;
use parking_lot::RwLock;

use crate::config::LoadConfig;
use crate::error::{LoadError, ResolveError};
use crate::registry::Registry;
use crate::resolve::ResolvedSignature;

struct Published {
    current: RwLock<Arc<Registry>>,
    generation: AtomicU64,
}

/// Cloneable handle to the published registry.
#[derive(Clone)]
pub struct SharedRegistry(Arc<Published>);

impl SharedRegistry {
    /// Publish `registry` as generation 0.
    pub fn new(registry: Registry) -> Self {
        SharedRegistry(Arc::new(Published {
            current: RwLock::new(Arc::new(registry)),
            generation: AtomicU64::new(0),
        }))
    }

    /// The registry published right now.
    pub fn snapshot(&self) -> Arc<Registry> {
        Arc::clone(&self.0.current.read())
    }

    /// Number of successful swaps since creation.
    pub fn generation(&self) -> u64 {
        self.0.generation.load(Ordering::Acquire)
    }

    /// Publish a new registry, returning the one it replaced.
    pub fn replace(&self, registry: Registry) -> Arc<Registry> {
        let intrinsics = registry.len();
        let next = Arc::new(registry);
        let (previous, generation) = {
            let mut current = self.0.current.write();
            let generation = self.0.generation.fetch_add(1, Ordering::AcqRel) + 1;
            (std::mem::replace(&mut *current, next), generation)
        };
        tracing::info!(generation, intrinsics, "intrinsic registry replaced");
        previous
    }

    /// Load a new table and publish it.
    ///
    /// On failure the published registry is left untouched.
    pub fn reload_from_json(&self, text: &str, config: &LoadConfig) -> Result<(), LoadError> {
        match Registry::from_json(text, config) {
            Ok(registry) => {
                self.replace(registry);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "intrinsic table reload rejected");
                Err(err)
            }
        }
    }

    /// Resolve against the current snapshot.
    pub fn resolve(
        &self,
        name: &str,
        args: &[ConcreteType],
    ) -> Result<ResolvedSignature, ResolveError> {
        self.snapshot().resolve(name, args)
    }

    pub fn resolve_with_return(
        &self,
        name: &str,
        ret: &[ConcreteType],
        args: &[ConcreteType],
    ) -> Result<ResolvedSignature, ResolveError> {
        self.snapshot().resolve_with_return(name, ret, args)
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        SharedRegistry::new(registry)
    }
}

impl fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SharedRegistry(generation {}, {} intrinsics)",
            self.generation(),
            self.0.current.read().len()
        )
    }
}
