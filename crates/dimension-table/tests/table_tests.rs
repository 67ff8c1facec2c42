use dimension_table::{load_table, TableError};
use fitting_types::{BossShape, DimensionSet, FittingKind, Quantity};

const TEE_TABLE: &str = r#"{
    "kind": { "type": "Tee" },
    "unit": "in",
    "columns": ["Name", "M", "M1", "POD", "POD1", "PID", "PID1",
                "G", "G1", "G2", "H", "H1", "H2"],
    "rows": [
        ["T-300", 5, 4, 3, 2, 2, 1, 3, 3, 3, 4, 5, 6],
        ["T-150", "2-3/8", "2-3/8", "1-29/32", "1-29/32", "1-1/2", "1-1/2",
         "1-1/4", "1-1/4", "1-1/4", "2-3/16", "2-3/16", "2-3/16"]
    ]
}"#;

#[test]
fn tee_row_matches_built_in_scenario() {
    let table = load_table(TEE_TABLE).unwrap();
    assert_eq!(table.kind(), FittingKind::Tee);
    assert_eq!(table.len(), 2);

    let spec = table.spec("T-300").unwrap();
    assert_eq!(spec.dims, DimensionSet::defaults_for(FittingKind::Tee));

    let small = table.lookup("T-150").unwrap();
    assert!((small.length("POD").unwrap() - (1.0 + 29.0 / 32.0) * 25.4).abs() < 1e-9);
}

#[test]
fn missing_schema_column_is_reported_at_load() {
    let json = TEE_TABLE.replace(r#""G2", "#, "");
    let err = load_table(&json).unwrap_err();
    match err {
        TableError::SchemaMismatch { kind, reason } => {
            assert_eq!(kind, FittingKind::Tee);
            assert!(reason.contains("G2"), "{}", reason);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_part_is_part_not_found() {
    let table = load_table(TEE_TABLE).unwrap();
    assert!(matches!(
        table.spec("T-999"),
        Err(TableError::PartNotFound { .. })
    ));
}

#[test]
fn bushing_table_carries_boss_and_angles_default_to_degrees() {
    let json = r#"{
        "kind": { "type": "Bushing", "boss": "Octagon" },
        "unit": "mm",
        "columns": ["Name", "POD", "PID", "POD1", "PID1", "L", "N", "X", "G"],
        "rows": [["B-40", 40, 30, "2.5 cm", 15, 50, 15, 50, 20]]
    }"#;
    let table = load_table(json).unwrap();
    assert_eq!(
        table.kind(),
        FittingKind::Bushing {
            boss: BossShape::Octagon
        }
    );
    let dims = table.lookup("B-40").unwrap();
    assert_eq!(dims.get("POD1"), Some(&Quantity::mm(25.0)));

    let elbow = r#"{
        "kind": { "type": "ElbowAlpha" },
        "unit": "cm",
        "columns": ["Name", "alpha", "M", "POD", "PID", "G", "H", "R"],
        "rows": [["E-45", 45, 3, 2, 1, 1, 3, 3]]
    }"#;
    let table = load_table(elbow).unwrap();
    let alpha = table.lookup("E-45").unwrap().angle("alpha").unwrap();
    assert!((alpha - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        load_table("{ not json"),
        Err(TableError::ParseError(_))
    ));
}
