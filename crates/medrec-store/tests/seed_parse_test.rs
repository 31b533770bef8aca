// Integration tests for seed parsing

use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_parse_minimal_seed() {
    let path = fixtures_dir().join("seed_minimal.yaml");

    let result = medrec_store::seed::parse_seed_file(&path);
    assert!(
        result.is_ok(),
        "Should parse minimal seed: {:?}",
        result.err()
    );

    let seed = result.unwrap();
    assert_eq!(seed.schema_version, 0);
    assert_eq!(seed.patients.len(), 1);
    assert_eq!(seed.doctors.len(), 1);
    assert!(seed.appointments.is_empty());
    assert!(seed.medical_records.is_empty());
}

#[test]
fn test_parse_full_seed() {
    let path = fixtures_dir().join("seed_full.yaml");

    let seed = medrec_store::seed::parse_seed_file(&path).unwrap();

    assert_eq!(seed.patients.len(), 2);
    assert_eq!(seed.appointments.len(), 2);
    assert_eq!(seed.appointments[0].notes.as_deref(), Some("Persistent cough"));
    assert_eq!(seed.appointments[1].notes, None);
    assert_eq!(seed.medical_records[0].doctor, "house");
}

#[test]
fn test_reject_invalid_schema_version() {
    let path = fixtures_dir().join("seed_invalid_schema_version.yaml");

    let err = medrec_store::seed::parse_seed_file(&path).unwrap_err();

    assert_eq!(err.code(), "ERR_SEED");
    assert!(err.to_string().contains("schema_version"));
}

#[test]
fn test_reject_duplicate_keys() {
    let path = fixtures_dir().join("seed_duplicate_keys.yaml");

    let err = medrec_store::seed::parse_seed_file(&path).unwrap_err();

    assert!(err.to_string().contains("Duplicate patient key: jdoe"));
}

#[test]
fn test_reject_missing_reference() {
    let path = fixtures_dir().join("seed_missing_reference.yaml");

    let err = medrec_store::seed::parse_seed_file(&path).unwrap_err();

    assert!(err.to_string().contains("non-existent doctor: nobody"));
}

#[test]
fn test_missing_file() {
    let path = fixtures_dir().join("does_not_exist.yaml");

    let err = medrec_store::seed::parse_seed_file(&path).unwrap_err();

    assert!(err.to_string().contains("Failed to read seed file"));
}

#[test]
fn test_rejected_seed_leaves_database_alone() {
    let mut session = medrec_store::Session::open_in_memory().unwrap();
    medrec_store::PatientRepo::create(&session.conn, &mut session.registry, "Keep", "Me", 50)
        .unwrap();

    let path = fixtures_dir().join("seed_missing_reference.yaml");
    assert!(medrec_store::seed::import_seed_file(&path, &mut session.conn).is_err());

    let count: i64 = session
        .conn
        .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_import_full_seed_links_rows() {
    let mut session = medrec_store::Session::open_in_memory().unwrap();
    let path = fixtures_dir().join("seed_full.yaml");

    let summary = medrec_store::seed::import_seed_file(&path, &mut session.conn).unwrap();
    assert_eq!(summary.appointments, 2);

    let john = medrec_store::PatientRepo::find_by_name(
        &session.conn,
        &mut session.registry,
        "John",
        "Doe",
    )
    .unwrap()
    .unwrap();
    let john = john.borrow();
    assert_eq!(john.appointments().len(), 1);
    assert_eq!(john.medical_records().len(), 1);
    assert_eq!(john.medical_records()[0].borrow().diagnosis(), "Bronchitis");
}
