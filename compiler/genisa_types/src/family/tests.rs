use super::*;
use crate::{AddressSpace, ScalarKind};

fn ty(name: &str) -> ConcreteType {
    ConcreteType::from_name(name).unwrap()
}

#[test]
fn keywords_round_trip() {
    for family in TypeFamily::ALL {
        assert_eq!(TypeFamily::from_keyword(family.keyword()), Some(family));
        assert_eq!(family.to_string(), family.keyword());
    }
    assert_eq!(TypeFamily::from_keyword("anyhalf"), None);
    assert_eq!(TypeFamily::from_keyword("int"), None);
}

#[test]
fn anyint_accepts_integer_scalars_and_vectors() {
    for name in ["bool", "char", "short", "int", "long", "int4", "short4", "int16"] {
        assert!(TypeFamily::AnyInt.contains(ty(name)), "{name}");
    }
    for name in ["half", "float", "float4", "ptr_global", "void"] {
        assert!(!TypeFamily::AnyInt.contains(ty(name)), "{name}");
    }
}

#[test]
fn anyfloat_accepts_float_scalars_and_vectors() {
    for name in ["half", "float", "double", "float2", "float8"] {
        assert!(TypeFamily::AnyFloat.contains(ty(name)), "{name}");
    }
    for name in ["int", "int2", "ptr_private", "void"] {
        assert!(!TypeFamily::AnyFloat.contains(ty(name)), "{name}");
    }
}

#[test]
fn anyvector_accepts_only_vectors() {
    assert!(TypeFamily::AnyVector.contains(ty("float4")));
    assert!(TypeFamily::AnyVector.contains(ty("int2")));
    assert!(!TypeFamily::AnyVector.contains(ty("float")));
    assert!(!TypeFamily::AnyVector.contains(ty("ptr_local")));
}

#[test]
fn anyptr_accepts_every_address_space() {
    for space in AddressSpace::ALL {
        assert!(TypeFamily::AnyPtr.contains(ConcreteType::Pointer(space)));
    }
    assert!(!TypeFamily::AnyPtr.contains(ConcreteType::INT));
}

#[test]
fn any_rejects_only_void() {
    for kind in ScalarKind::ALL {
        assert!(TypeFamily::Any.contains(ConcreteType::Scalar(kind)));
    }
    assert!(TypeFamily::Any.contains(ty("float4")));
    assert!(TypeFamily::Any.contains(ty("ptr_generic")));
    assert!(!TypeFamily::Any.contains(ConcreteType::Void));
}
