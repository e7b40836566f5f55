//! IR names, declarations, and canonical table text.
//!
//! # Naming
//!
//! ```text
//! GenISA_imulH                            -> llvm.genx.GenISA.imulH
//! GenISA_imulH [int]                      -> llvm.genx.GenISA.imulH.i32
//! GenISA_ldraw_indexed [float, ptr_global] -> llvm.genx.GenISA.ldraw_indexed.f32.p1i8
//! ```
//!
//! The `GenISA_` prefix becomes `<namespace>.GenISA.`; one suffix is
//! appended per overload slot.

use genisa_types::{ConcreteType, ScalarKind};

use crate::config::EmitConfig;
use crate::properties::{PropertyFlag, PropertyFlags};
use crate::registry::Registry;
use crate::resolve::{ResolvedSignature, ReturnType};

const GENISA_PREFIX: &str = "GenISA_";

/// Renders resolved signatures as IR names and declarations.
#[derive(Clone, Debug, Default)]
pub struct Emitter {
    config: EmitConfig,
}

impl Emitter {
    pub fn new(config: EmitConfig) -> Self {
        Emitter { config }
    }

    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Unmangled IR name for a table name.
    pub fn intrinsic_name(&self, name: &str) -> String {
        let namespace = &self.config.namespace;
        match name.strip_prefix(GENISA_PREFIX) {
            Some(base) => format!("{namespace}.GenISA.{base}"),
            None => format!("{namespace}.{name}"),
        }
    }

    /// IR name with one suffix per overload slot.
    pub fn mangled_name(&self, signature: &ResolvedSignature) -> String {
        let mut name = self.intrinsic_name(&signature.name);
        for ty in &signature.overloads {
            name.push('.');
            name.push_str(&type_suffix(*ty));
        }
        name
    }

    /// A `declare` line for the resolved signature.
    pub fn declaration(&self, signature: &ResolvedSignature) -> String {
        let params: Vec<_> = signature.params.iter().map(|ty| ir_type(*ty)).collect();
        let mut line = format!(
            "declare {} @{}({}) nounwind",
            ir_return_type(&signature.ret),
            self.mangled_name(signature),
            params.join(", ")
        );
        for attribute in attributes(signature.properties) {
            line.push(' ');
            line.push_str(attribute);
        }
        line
    }
}

/// Overload suffix: `i32`, `f16`, `v4f32`, `p1i8`.
pub fn type_suffix(ty: ConcreteType) -> String {
    match ty {
        // Never an overload binding: no family admits `void`.
        ConcreteType::Void => "void".to_owned(),
        ConcreteType::Scalar(kind) => scalar_suffix(kind),
        ConcreteType::Vector { elem, lanes } => format!("v{lanes}{}", scalar_suffix(elem)),
        ConcreteType::Pointer(space) => format!("p{}i8", space.number()),
    }
}

fn scalar_suffix(kind: ScalarKind) -> String {
    let prefix = if kind.is_integer() { 'i' } else { 'f' };
    format!("{prefix}{}", kind.bit_width())
}

/// IR spelling of a type.
pub fn ir_type(ty: ConcreteType) -> String {
    match ty {
        ConcreteType::Void => "void".to_owned(),
        ConcreteType::Scalar(kind) => ir_scalar(kind).to_owned(),
        ConcreteType::Vector { elem, lanes } => format!("<{lanes} x {}>", ir_scalar(elem)),
        ConcreteType::Pointer(space) => match space.number() {
            0 => "i8*".to_owned(),
            n => format!("i8 addrspace({n})*"),
        },
    }
}

fn ir_scalar(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Bool => "i1",
        ScalarKind::Char => "i8",
        ScalarKind::Short => "i16",
        ScalarKind::Int => "i32",
        ScalarKind::Long => "i64",
        ScalarKind::Half => "half",
        ScalarKind::Float => "float",
        ScalarKind::Double => "double",
    }
}

fn ir_return_type(ret: &ReturnType) -> String {
    match ret {
        ReturnType::Single(ty) => ir_type(*ty),
        ReturnType::Multi(types) => {
            let fields: Vec<_> = types.iter().map(|ty| ir_type(*ty)).collect();
            format!("{{ {} }}", fields.join(", "))
        }
    }
}

/// Function attributes implied by a property set, in canonical flag order.
pub fn attributes(properties: PropertyFlags) -> Vec<&'static str> {
    properties
        .members()
        .filter_map(|flag| match flag {
            PropertyFlag::None => None,
            PropertyFlag::Convergent => Some("convergent"),
            PropertyFlag::NoMem => Some("readnone"),
            PropertyFlag::ReadMem => Some("readonly"),
            PropertyFlag::ReadArgMem => Some("readonly argmemonly"),
            PropertyFlag::ReadWriteArgMem => Some("argmemonly"),
            PropertyFlag::InaccessibleMemOnly => Some("inaccessiblememonly"),
            PropertyFlag::NoReturn => Some("noreturn"),
            PropertyFlag::NoDuplicate => Some("noduplicate"),
        })
        .collect()
}

/// Canonical JSON text of a registry: one row per line, load order.
pub fn render_table(registry: &Registry) -> Result<String, serde_json::Error> {
    if registry.is_empty() {
        return Ok("{}\n".to_owned());
    }
    let mut text = String::from("{\n");
    for (i, descriptor) in registry.iter().enumerate() {
        if i > 0 {
            text.push_str(",\n");
        }
        text.push_str("    ");
        text.push_str(&serde_json::to_string(descriptor.name())?);
        text.push_str(": ");
        text.push_str(&serde_json::to_string(&descriptor.to_raw())?);
    }
    text.push_str("\n}\n");
    Ok(text)
}
