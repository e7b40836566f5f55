//! Property-based tests for table loading and resolution.
//!
//! 1. A back reference loads only if it names a slot assigned before it
//! 2. Rendered property sets parse back to the same set
//! 3. Resolution never panics on arbitrary call-site types

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::OnceLock;

use genisa_intrinsics::{
    parse_properties, LoadConfig, LoadError, Position, PropertyFlag, PropertyFlags, RawRow,
    RawTable, RawToken, Registry, TableError,
};
use genisa_types::{AddressSpace, ConcreteType, ScalarKind};
use proptest::prelude::*;

const TABLE: &str = include_str!("../data/intrinsics.json");

fn bundled() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| Registry::from_json(TABLE, &LoadConfig::default()).unwrap())
}

fn concrete_strategy() -> impl Strategy<Value = ConcreteType> {
    let scalar = prop::sample::select(ScalarKind::ALL.to_vec());
    prop_oneof![
        scalar.clone().prop_map(ConcreteType::Scalar),
        (scalar, prop::sample::select(ConcreteType::VECTOR_LANES.to_vec()))
            .prop_map(|(elem, lanes)| ConcreteType::Vector { elem, lanes }),
        prop::sample::select(AddressSpace::ALL.to_vec()).prop_map(ConcreteType::Pointer),
    ]
}

proptest! {
    #[test]
    fn match_ref_loads_only_when_in_range(slots in 0usize..4, index in 0u32..6) {
        let mut params: Vec<RawToken> = (0..slots).map(|_| RawToken::from("anyint")).collect();
        params.push(RawToken::Index(index));
        let table: RawTable = [("GenISA_probe", RawRow::new("int", params, "NoMem"))]
            .into_iter()
            .collect();

        match Registry::load(&table, &LoadConfig::default()) {
            Ok(registry) => {
                prop_assert!((index as usize) < slots);
                prop_assert_eq!(registry.family_slot_count("GenISA_probe"), Some(slots));
            }
            Err(LoadError::TableMalformed { cause, .. }) => {
                prop_assert!((index as usize) >= slots);
                prop_assert_eq!(
                    cause,
                    TableError::MatchRefOutOfRange {
                        position: Position::Param(slots),
                        index,
                        available: slots,
                    }
                );
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn property_sets_round_trip(flags in prop::sample::subsequence(PropertyFlag::ALL.to_vec(), 1..=9)) {
        let set: PropertyFlags = flags.into_iter().collect();
        prop_assert_eq!(parse_properties(&set.to_string()), Ok(set));
    }

    #[test]
    fn resolution_never_panics(
        pick in 0usize..230,
        args in prop::collection::vec(concrete_strategy(), 0..8),
    ) {
        let registry = bundled();
        let descriptor = registry.iter().nth(pick % registry.len()).unwrap();
        if let Ok(sig) = registry.resolve(descriptor.name(), &args) {
            prop_assert_eq!(sig.params.len(), descriptor.params().len());
            prop_assert_eq!(sig.overloads.len(), descriptor.family_slot_count());
        }
    }
}
