//! GenISA Intrinsics - Signature Registry and Resolver
//!
//! Loads the GenISA intrinsic table, validates it, and resolves the
//! overloaded signatures at call sites:
//! - Property flag parsing and validation
//! - Table loading with whole-table static checks
//! - Call-site resolution of family slots and back references
//! - Queries, IR names and declarations for resolved signatures
//! - A shared registry handle that can be reloaded atomically
//!
//! # Example
//!
//! ```
//! use genisa_intrinsics::{LoadConfig, Registry};
//! use genisa_types::ConcreteType;
//!
//! let table = r#"{"GenISA_imulH": ["anyint",[0,0],"NoMem"]}"#;
//! let registry = Registry::from_json(table, &LoadConfig::default()).unwrap();
//! let sig = registry
//!     .resolve("GenISA_imulH", &[ConcreteType::INT, ConcreteType::INT])
//!     .unwrap();
//! assert_eq!(sig.to_string(), "GenISA_imulH(int, int) -> int");
//! ```
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=genisa_intrinsics=debug`: table loads and reloads.
//! - `RUST_LOG=genisa_intrinsics=trace`: every resolution.

mod config;
mod descriptor;
mod emit;
mod error;
mod properties;
mod raw;
mod registry;
mod resolve;
mod shared;

use std::sync::Once;

pub use config::{EmitConfig, ExtensionPolicy, LoadConfig};
pub use descriptor::{IntrinsicDescriptor, Position, Slot};
pub use emit::{attributes, ir_type, render_table, type_suffix, Emitter};
pub use error::{Expected, LoadError, ResolveError, TableError};
pub use properties::{parse_properties, MemoryEffect, PropertyError, PropertyFlag, PropertyFlags};
pub use raw::{RawReturn, RawRow, RawTable, RawToken};
pub use registry::Registry;
pub use resolve::{ResolvedSignature, ReturnType};
pub use shared::SharedRegistry;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
