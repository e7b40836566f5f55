//! Call-site signature resolution.
//!
//! Resolution walks the return positions, then the parameters, binding
//! each family slot to the concrete type observed at the position that
//! introduced it. Back references must see the same type.
//!
//! A slot with nothing observed at its own position stays pending. A later
//! back reference may bind it (`GenISA_imulH: anyint (0, 0)` learns its
//! return type from the arguments). Anything still pending after the walk
//! falls back to its default, or fails with `UnresolvedSlot`.

use std::fmt;

use genisa_types::{ConcreteType, TypeFamily, TypeSpec};
use smallvec::{smallvec, SmallVec};

use crate::descriptor::{IntrinsicDescriptor, Position};
use crate::error::{Expected, ResolveError};
use crate::properties::PropertyFlags;

/// Concrete result of a resolved call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Single(ConcreteType),
    Multi(Vec<ConcreteType>),
}

impl ReturnType {
    pub fn as_slice(&self) -> &[ConcreteType] {
        match self {
            ReturnType::Single(ty) => std::slice::from_ref(ty),
            ReturnType::Multi(types) => types,
        }
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, ReturnType::Single(ConcreteType::Void))
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Single(ty) => write!(f, "{ty}"),
            ReturnType::Multi(types) => {
                f.write_str("(")?;
                write_list(f, types)?;
                f.write_str(")")
            }
        }
    }
}

/// A fully concrete signature for one call site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedSignature {
    pub name: String,
    pub ret: ReturnType,
    /// Every parameter, including omitted trailing defaults.
    pub params: Vec<ConcreteType>,
    pub properties: PropertyFlags,
    /// Type bound to each family slot, in slot order.
    pub overloads: Vec<ConcreteType>,
}

impl fmt::Display for ResolvedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_list(f, &self.params)?;
        write!(f, ") -> {}", self.ret)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[ConcreteType]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

/// Resolve `descriptor` against call-site types.
///
/// `ret` is the caller's expectation for the return values, if known.
/// `args` may stop short of the parameter list only where every missing
/// parameter is a trailing `family:default` slot.
#[tracing::instrument(level = "trace", skip_all, fields(name = descriptor.name()))]
pub(crate) fn resolve_descriptor(
    descriptor: &IntrinsicDescriptor,
    ret: Option<&[ConcreteType]>,
    args: &[ConcreteType],
) -> Result<ResolvedSignature, ResolveError> {
    let params = descriptor.params();
    if args.len() < descriptor.min_arity() || args.len() > params.len() {
        return Err(ResolveError::ArityMismatch {
            name: descriptor.name().to_owned(),
            expected: params.len(),
            actual: args.len(),
        });
    }
    let returns = descriptor.returns().as_slice();
    if let Some(ret) = ret {
        if ret.len() != returns.len() {
            return Err(ResolveError::ReturnArityMismatch {
                name: descriptor.name().to_owned(),
                expected: returns.len(),
                actual: ret.len(),
            });
        }
    }

    let mut binder = Binder::new(descriptor);
    for (i, spec) in returns.iter().enumerate() {
        let actual = ret.and_then(|ret| ret.get(i).copied());
        binder.visit(Position::Return(i), *spec, actual)?;
    }
    for (i, spec) in params.iter().enumerate() {
        binder.visit(Position::Param(i), *spec, args.get(i).copied())?;
    }
    let overloads = binder.finish()?;

    let mut next_slot = 0;
    let mut concrete = |spec: &TypeSpec| match *spec {
        TypeSpec::Concrete(ty) => ty,
        TypeSpec::MatchRef(index) => overloads[index as usize],
        TypeSpec::Family(_) | TypeSpec::FamilyWithDefault(..) => {
            next_slot += 1;
            overloads[next_slot - 1]
        }
    };
    let ret = match descriptor.returns().as_slice() {
        [single] if !descriptor.returns().is_multi() => ReturnType::Single(concrete(single)),
        multi => ReturnType::Multi(multi.iter().map(&mut concrete).collect()),
    };
    let params = params.iter().map(&mut concrete).collect();

    Ok(ResolvedSignature {
        name: descriptor.name().to_owned(),
        ret,
        params,
        properties: descriptor.properties(),
        overloads: overloads.into_vec(),
    })
}

/// Slot bindings accumulated during one walk.
struct Binder<'d> {
    descriptor: &'d IntrinsicDescriptor,
    bindings: SmallVec<[Option<ConcreteType>; 4]>,
    next_slot: usize,
}

impl<'d> Binder<'d> {
    fn new(descriptor: &'d IntrinsicDescriptor) -> Self {
        Binder {
            descriptor,
            bindings: smallvec![None; descriptor.family_slot_count()],
            next_slot: 0,
        }
    }

    fn visit(
        &mut self,
        position: Position,
        spec: TypeSpec,
        actual: Option<ConcreteType>,
    ) -> Result<(), ResolveError> {
        match spec {
            TypeSpec::Concrete(ty) => match actual {
                Some(actual) if actual != ty => {
                    Err(self.mismatch(position, Expected::Type(ty), actual))
                }
                _ => Ok(()),
            },
            TypeSpec::Family(family) | TypeSpec::FamilyWithDefault(family, _) => {
                let slot = self.next_slot;
                self.next_slot += 1;
                match actual {
                    Some(actual) => self.bind(slot, family, position, actual),
                    None => Ok(()),
                }
            }
            TypeSpec::MatchRef(index) => {
                let Some(actual) = actual else {
                    return Ok(());
                };
                let slot = index as usize;
                match self.bindings.get(slot).copied().flatten() {
                    Some(bound) if bound != actual => {
                        Err(self.mismatch(position, Expected::Type(bound), actual))
                    }
                    Some(_) => Ok(()),
                    None => {
                        let family = self
                            .descriptor
                            .slot(index)
                            .map_or(TypeFamily::Any, |slot| slot.family);
                        self.bind(slot, family, position, actual)
                    }
                }
            }
        }
    }

    fn bind(
        &mut self,
        slot: usize,
        family: TypeFamily,
        position: Position,
        actual: ConcreteType,
    ) -> Result<(), ResolveError> {
        if !family.contains(actual) {
            return Err(self.mismatch(position, Expected::Family(family), actual));
        }
        if let Some(binding) = self.bindings.get_mut(slot) {
            *binding = Some(actual);
        }
        Ok(())
    }

    /// Apply defaults and require every slot to be bound.
    fn finish(self) -> Result<SmallVec<[ConcreteType; 4]>, ResolveError> {
        self.bindings
            .iter()
            .zip(self.descriptor.slots())
            .enumerate()
            .map(|(index, (binding, slot))| {
                binding
                    .or(slot.default)
                    .ok_or_else(|| ResolveError::UnresolvedSlot {
                        name: self.descriptor.name().to_owned(),
                        slot: u32::try_from(index).unwrap_or(u32::MAX),
                    })
            })
            .collect()
    }

    fn mismatch(&self, position: Position, expected: Expected, actual: ConcreteType) -> ResolveError {
        ResolveError::TypeMismatch {
            name: self.descriptor.name().to_owned(),
            position,
            expected,
            actual,
        }
    }
}
