use super::*;

#[test]
fn parses_scalars() {
    for kind in ScalarKind::ALL {
        assert_eq!(
            ConcreteType::from_name(kind.name()),
            Some(ConcreteType::Scalar(kind))
        );
    }
}

#[test]
fn parses_table_vectors() {
    assert_eq!(
        ConcreteType::from_name("float4"),
        Some(ConcreteType::Vector {
            elem: ScalarKind::Float,
            lanes: 4
        })
    );
    assert_eq!(
        ConcreteType::from_name("int16"),
        Some(ConcreteType::Vector {
            elem: ScalarKind::Int,
            lanes: 16
        })
    );
    assert_eq!(
        ConcreteType::from_name("short4"),
        ConcreteType::vector(ScalarKind::Short, 4)
    );
}

#[test]
fn rejects_unsupported_lanes() {
    assert_eq!(ConcreteType::from_name("float5"), None);
    assert_eq!(ConcreteType::from_name("float1"), None);
    assert_eq!(ConcreteType::from_name("float04"), None);
    assert_eq!(ConcreteType::from_name("float300"), None);
    assert_eq!(ConcreteType::vector(ScalarKind::Int, 32), None);
}

#[test]
fn parses_pointers() {
    for space in AddressSpace::ALL {
        let name = format!("ptr_{}", space.name());
        assert_eq!(
            ConcreteType::from_name(&name),
            Some(ConcreteType::Pointer(space))
        );
    }
    assert_eq!(ConcreteType::from_name("ptr_shared"), None);
    assert_eq!(ConcreteType::from_name("ptr_"), None);
}

#[test]
fn rejects_garbage() {
    for name in ["", "Int", "int ", "vec4", "4", "anyint", "any:float", "voidptr"] {
        assert_eq!(ConcreteType::from_name(name), None, "{name:?}");
    }
}

#[test]
fn display_is_canonical() {
    for name in ["void", "bool", "int", "float4", "short4", "int16", "ptr_local"] {
        let ty: ConcreteType = name.parse().unwrap();
        assert_eq!(ty.to_string(), name);
    }
}

#[test]
fn from_str_reports_token() {
    let err = "float5".parse::<ConcreteType>().unwrap_err();
    assert_eq!(err, TypeParseError::UnknownType("float5".to_owned()));
}

#[test]
fn scalar_classification() {
    assert!(ScalarKind::Bool.is_integer());
    assert!(ScalarKind::Long.is_integer());
    assert!(ScalarKind::Half.is_float());
    assert!(!ScalarKind::Double.is_integer());
    assert_eq!(ScalarKind::Bool.bit_width(), 1);
    assert_eq!(ScalarKind::Short.bit_width(), 16);
    assert_eq!(ScalarKind::Double.bit_width(), 64);
}

#[test]
fn element_of_vectors_and_scalars() {
    assert_eq!(ConcreteType::INT.element(), Some(ScalarKind::Int));
    assert_eq!(
        ConcreteType::vector(ScalarKind::Half, 8).and_then(ConcreteType::element),
        Some(ScalarKind::Half)
    );
    assert_eq!(ConcreteType::Void.element(), None);
    assert_eq!(ConcreteType::pointer(AddressSpace::Global).element(), None);
}

#[test]
fn address_space_numbers() {
    let numbers: Vec<u32> = AddressSpace::ALL.iter().map(|s| s.number()).collect();
    assert_eq!(numbers, vec![0, 1, 2, 3, 4]);
}
