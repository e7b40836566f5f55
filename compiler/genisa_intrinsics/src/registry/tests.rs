use super::*;
use crate::raw::{RawRow, RawToken};
use pretty_assertions::assert_eq;

const TABLE: &str = r#"{
    "GenISA_ROUNDNE": ["float",["float"],"NoMem"],
    "GenISA_imulH": ["anyint",[0,0],"NoMem"],
    "GenISA_threadgroupbarrier": ["void",[],"Convergent"],
    "GenISA_WaveBallot": ["int",["bool"],"Convergent,InaccessibleMemOnly"],
    "GenISA_ldraw_indexed": ["any:float",["anyptr","int","int"],"ReadArgMem"]
}"#;

fn registry() -> Registry {
    Registry::from_json(TABLE, &LoadConfig::default()).unwrap()
}

fn cause(result: Result<Registry, LoadError>) -> (String, TableError) {
    match result.unwrap_err() {
        LoadError::TableMalformed { name, cause } => (name, cause),
        other => panic!("expected TableMalformed, got {other:?}"),
    }
}

#[test]
fn lists_names_in_load_order() {
    let registry = registry();
    assert_eq!(
        registry.list_all(),
        vec![
            "GenISA_ROUNDNE",
            "GenISA_imulH",
            "GenISA_threadgroupbarrier",
            "GenISA_WaveBallot",
            "GenISA_ldraw_indexed",
        ]
    );
    assert_eq!(registry.len(), 5);
    assert!(!registry.is_empty());
    assert_eq!(registry.iter().count(), 5);
    assert_eq!((&registry).into_iter().count(), 5);
}

#[test]
fn describe_returns_unresolved_descriptor() {
    let registry = registry();
    let imul = registry.describe("GenISA_imulH").unwrap();
    assert_eq!(imul.params().len(), 2);
    assert_eq!(imul.family_slot_count(), 1);
    assert_eq!(registry.family_slot_count("GenISA_ldraw_indexed"), Some(2));
    assert_eq!(registry.family_slot_count("GenISA_ROUNDNE"), Some(0));
    assert!(registry.contains("GenISA_ROUNDNE"));
}

#[test]
fn describe_unknown_name() {
    assert_eq!(
        registry().describe("GenISA_nope"),
        Err(ResolveError::UnknownIntrinsic("GenISA_nope".to_owned()))
    );
    assert_eq!(registry().family_slot_count("GenISA_nope"), None);
}

#[test]
fn filters_by_property() {
    let registry = registry();
    let convergent: Vec<_> = registry
        .with_property(PropertyFlag::Convergent)
        .map(IntrinsicDescriptor::name)
        .collect();
    assert_eq!(
        convergent,
        vec!["GenISA_threadgroupbarrier", "GenISA_WaveBallot"]
    );
    assert_eq!(registry.with_property(PropertyFlag::NoReturn).count(), 0);
}

#[test]
fn duplicate_name_is_fatal() {
    let text = r#"{
        "GenISA_a": ["int",[],"NoMem"],
        "GenISA_b": ["int",[],"NoMem"],
        "GenISA_a": ["float",[],"NoMem"]
    }"#;
    assert_eq!(
        cause(Registry::from_json(text, &LoadConfig::default())),
        ("GenISA_a".to_owned(), TableError::DuplicateName)
    );
}

#[test]
fn bad_row_aborts_whole_load() {
    let table: RawTable = [
        ("GenISA_ok", RawRow::new("int", [], "NoMem")),
        ("GenISA_bad", RawRow::new("int", [RawToken::from("int33")], "NoMem")),
    ]
    .into_iter()
    .collect();
    let (name, cause) = cause(Registry::load(&table, &LoadConfig::default()));
    assert_eq!(name, "GenISA_bad");
    assert!(matches!(cause, TableError::Type(_)));
}

#[test]
fn misshapen_row_is_reported_by_name() {
    for row in [
        r#"["int",["int"]]"#,
        r#"["int",[-1],"NoMem"]"#,
        r#"["int",[true],"NoMem"]"#,
    ] {
        let text = format!(r#"{{"GenISA_ok": ["int",["int"],"NoMem"], "GenISA_bad": {row}}}"#);
        let (name, cause) = cause(Registry::from_json(&text, &LoadConfig::default()));
        assert_eq!(name, "GenISA_bad", "{row}");
        assert!(matches!(cause, TableError::Shape(_)), "{row}: {cause:?}");
    }
}

#[test]
fn out_of_range_match_ref_is_fatal() {
    let text = r#"{"GenISA_bad": ["int",["anyint",1],"NoMem"]}"#;
    assert_eq!(
        cause(Registry::from_json(text, &LoadConfig::default())).1,
        TableError::MatchRefOutOfRange {
            position: crate::descriptor::Position::Param(1),
            index: 1,
            available: 1,
        }
    );
}

#[test]
fn unknown_property_is_fatal() {
    let text = r#"{"GenISA_bad": ["int",[],"NoMem,Speedy"]}"#;
    assert_eq!(
        cause(Registry::from_json(text, &LoadConfig::default())).1,
        TableError::Property(crate::properties::PropertyError::UnknownProperty(
            "Speedy".to_owned()
        ))
    );
}

#[test]
fn conflicting_properties_depend_on_config() {
    let text = r#"{"GenISA_odd": ["int",[],"NoMem,ReadMem"]}"#;
    assert!(matches!(
        cause(Registry::from_json(text, &LoadConfig::default())).1,
        TableError::Property(crate::properties::PropertyError::Conflicting { .. })
    ));
    assert!(Registry::from_json(text, &LoadConfig::permissive()).is_ok());
}

#[test]
fn strict_config_rejects_extension_flags() {
    assert_eq!(
        cause(Registry::from_json(TABLE, &LoadConfig::strict())),
        (
            "GenISA_WaveBallot".to_owned(),
            TableError::ExtensionFlagRejected(PropertyFlag::InaccessibleMemOnly)
        )
    );
}

#[test]
fn syntax_errors_are_not_row_errors() {
    let err = Registry::from_json("{ not json", &LoadConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Syntax(_)));
    assert_eq!(err.table_cause(), None);
}

#[test]
fn missing_file_reports_path() {
    let err = Registry::from_path("/nonexistent/intrinsics.json", &LoadConfig::default())
        .unwrap_err();
    match err {
        LoadError::Io { path, .. } => {
            assert_eq!(path, std::path::PathBuf::from("/nonexistent/intrinsics.json"));
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn raw_table_round_trips() {
    let registry = registry();
    let reloaded = Registry::load(&registry.to_raw_table(), &LoadConfig::default()).unwrap();
    assert_eq!(reloaded, registry);
}

#[test]
fn empty_table_is_empty_registry() {
    let registry = Registry::from_json("{}", &LoadConfig::default()).unwrap();
    assert!(registry.is_empty());
    assert_eq!(registry, Registry::new());
}
