//! Property-based tests for the type token grammar.
//!
//! Generates well-formed tokens and checks that parsing and rendering agree:
//! 1. `display(parse(t)) == t` for canonical tokens
//! 2. `parse(display(parse(t))) == parse(t)` (idempotence)

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use genisa_types::{parse_type, AddressSpace, ConcreteType, ScalarKind, TypeFamily, TypeSpec};
use proptest::prelude::*;

fn scalar_strategy() -> impl Strategy<Value = ScalarKind> {
    prop::sample::select(ScalarKind::ALL.to_vec())
}

fn concrete_strategy() -> impl Strategy<Value = ConcreteType> {
    prop_oneof![
        Just(ConcreteType::Void),
        scalar_strategy().prop_map(ConcreteType::Scalar),
        (
            scalar_strategy(),
            prop::sample::select(ConcreteType::VECTOR_LANES.to_vec())
        )
            .prop_map(|(elem, lanes)| ConcreteType::Vector { elem, lanes }),
        prop::sample::select(AddressSpace::ALL.to_vec()).prop_map(ConcreteType::Pointer),
    ]
}

fn family_strategy() -> impl Strategy<Value = TypeFamily> {
    prop::sample::select(TypeFamily::ALL.to_vec())
}

fn spec_strategy() -> impl Strategy<Value = TypeSpec> {
    prop_oneof![
        concrete_strategy().prop_map(TypeSpec::Concrete),
        family_strategy().prop_map(TypeSpec::Family),
        (family_strategy(), concrete_strategy())
            .prop_map(|(family, default)| TypeSpec::FamilyWithDefault(family, default)),
        (0u32..64).prop_map(TypeSpec::MatchRef),
    ]
}

proptest! {
    #[test]
    fn canonical_token_round_trips(spec in spec_strategy()) {
        let token = spec.to_string();
        prop_assert_eq!(parse_type(&token), Ok(spec));
    }

    #[test]
    fn reserialization_is_idempotent(spec in spec_strategy()) {
        let first = parse_type(&spec.to_string()).unwrap();
        let token = first.to_string();
        let second = parse_type(&token).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(second.to_string(), token);
    }

    #[test]
    fn concrete_names_never_parse_as_families(ty in concrete_strategy()) {
        prop_assert_eq!(parse_type(&ty.to_string()), Ok(TypeSpec::Concrete(ty)));
    }

    #[test]
    fn arbitrary_text_never_panics(token in "[a-z0-9_:]{0,12}") {
        if let Ok(spec) = parse_type(&token) {
            let again = parse_type(&spec.to_string());
            prop_assert_eq!(again, Ok(spec));
        }
    }
}
