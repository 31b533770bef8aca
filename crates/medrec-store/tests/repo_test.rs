// Integration tests for the persistence operations
// Covers validation on create, identity preservation, update/delete and
// foreign key handling

use chrono::{NaiveDate, NaiveDateTime};
use medrec_core::{EntityKind, ExErrorKind, MedicalRecord, Patient, Registry};
use medrec_store::{AppointmentRepo, DoctorRepo, MedicalRecordRepo, PatientRepo, Session};
use std::rc::Rc;

fn setup() -> Session {
    Session::open_in_memory().unwrap()
}

fn at(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").unwrap()
}

fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn count(session: &Session, table: &str) -> i64 {
    session
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap()
}

#[test]
fn test_create_patient_rejects_empty_first_name() {
    let mut s = setup();

    let err = PatientRepo::create(&s.conn, &mut s.registry, "   ", "Doe", 30).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.message(), "First name must be a non-empty string");
    assert_eq!(count(&s, "patients"), 0);
}

#[test]
fn test_create_patient_assigns_id() {
    let mut s = setup();

    let first = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let second = PatientRepo::create(&s.conn, &mut s.registry, "Jane", "Smith", 25).unwrap();

    let first_id = first.borrow().id().unwrap();
    let second_id = second.borrow().id().unwrap();
    assert!(second_id > first_id);
    assert!(s.registry.patients.contains(first_id));
}

#[test]
fn test_save_twice_is_rejected() {
    let mut s = setup();
    let patient = Patient::new("John", "Doe", 30).unwrap();
    let saved = PatientRepo::save(&s.conn, &mut s.registry, patient).unwrap();

    let copy = saved.borrow().clone();
    let err = PatientRepo::save(&s.conn, &mut s.registry, copy).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    assert_eq!(count(&s, "patients"), 1);
}

#[test]
fn test_update_unsaved_is_rejected() {
    let s = setup();
    let patient = Patient::new("John", "Doe", 30).unwrap();

    let err = PatientRepo::update(&s.conn, &patient).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotPersisted);
    assert_eq!(err.op(), Some("patient.update"));
}

#[test]
fn test_loading_twice_returns_same_instance() {
    let mut s = setup();
    let created = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let id = created.borrow().id().unwrap();

    // Change the row behind the registry's back
    s.conn
        .execute("UPDATE patients SET age = 31 WHERE id = ?1", [id])
        .unwrap();

    let loaded = PatientRepo::find_by_id(&s.conn, &mut s.registry, id)
        .unwrap()
        .unwrap();
    let again = PatientRepo::get_all(&s.conn, &mut s.registry).unwrap();

    assert!(Rc::ptr_eq(&created, &loaded));
    assert!(Rc::ptr_eq(&created, &again[0]));
    assert_eq!(created.borrow().age(), 31);
}

#[test]
fn test_delete_then_find_returns_none() {
    let mut s = setup();
    let patient = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let id = patient.borrow().id().unwrap();

    PatientRepo::delete(&s.conn, &patient.borrow()).unwrap();

    assert!(PatientRepo::find_by_id(&s.conn, &mut s.registry, id)
        .unwrap()
        .is_none());

    // The stale instance still carries its id; the row is gone
    let err = PatientRepo::delete(&s.conn, &patient.borrow()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity(), Some(EntityKind::Patient));
}

#[test]
fn test_update_persists_all_fields() {
    let mut s = setup();
    let patient = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let id = patient.borrow().id().unwrap();

    {
        let mut p = patient.borrow_mut();
        p.set_first_name("Johnny").unwrap();
        p.set_last_name("Dough").unwrap();
        p.set_age(31).unwrap();
    }
    PatientRepo::update(&s.conn, &patient.borrow()).unwrap();

    let mut fresh = Registry::new();
    let reloaded = PatientRepo::find_by_id(&s.conn, &mut fresh, id)
        .unwrap()
        .unwrap();
    let reloaded = reloaded.borrow();
    assert_eq!(reloaded.first_name(), "Johnny");
    assert_eq!(reloaded.last_name(), "Dough");
    assert_eq!(reloaded.age(), 31);
}

#[test]
fn test_find_by_name() {
    let mut s = setup();
    PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let jane = PatientRepo::create(&s.conn, &mut s.registry, "Jane", "Doe", 25).unwrap();

    let found = PatientRepo::find_by_name(&s.conn, &mut s.registry, "Jane", "Doe")
        .unwrap()
        .unwrap();
    assert!(Rc::ptr_eq(&found, &jane));

    assert!(PatientRepo::find_by_name(&s.conn, &mut s.registry, "Jim", "Doe")
        .unwrap()
        .is_none());
}

#[test]
fn test_find_by_specialty_ignores_case() {
    let mut s = setup();
    DoctorRepo::create(&s.conn, &mut s.registry, "Gregory", "House", "Diagnostics").unwrap();
    DoctorRepo::create(&s.conn, &mut s.registry, "Meredith", "Grey", "General Surgery").unwrap();

    let found = DoctorRepo::find_by_specialty(&s.conn, &mut s.registry, "diagnostics").unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].borrow().last_name(), "House");
}

#[test]
fn test_find_by_patient_id_filters_and_orders() {
    let mut s = setup();
    let john = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let jane = PatientRepo::create(&s.conn, &mut s.registry, "Jane", "Smith", 25).unwrap();
    let house = DoctorRepo::create(&s.conn, &mut s.registry, "Gregory", "House", "Diagnostics").unwrap();
    let (john_id, jane_id, house_id) = (
        john.borrow().id().unwrap(),
        jane.borrow().id().unwrap(),
        house.borrow().id().unwrap(),
    );

    for (patient_id, diagnosis) in [(john_id, "Flu"), (jane_id, "Migraine"), (john_id, "Cold")] {
        MedicalRecordRepo::create(
            &s.conn,
            &mut s.registry,
            patient_id,
            house_id,
            day("2024-04-01"),
            diagnosis,
            "Rest",
        )
        .unwrap();
    }

    let records = MedicalRecordRepo::find_by_patient_id(&s.conn, &mut s.registry, john_id).unwrap();
    let diagnoses: Vec<String> = records
        .iter()
        .map(|r| r.borrow().diagnosis().to_string())
        .collect();
    assert_eq!(diagnoses, vec!["Flu", "Cold"]);

    let by_doctor = MedicalRecordRepo::find_by_doctor_id(&s.conn, &mut s.registry, house_id).unwrap();
    assert_eq!(by_doctor.len(), 3);
}

#[test]
fn test_appointment_finders_filter_and_order() {
    let mut s = setup();
    let john = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let jane = PatientRepo::create(&s.conn, &mut s.registry, "Jane", "Smith", 25).unwrap();
    let house = DoctorRepo::create(&s.conn, &mut s.registry, "Gregory", "House", "Diagnostics").unwrap();
    let grey = DoctorRepo::create(&s.conn, &mut s.registry, "Meredith", "Grey", "General Surgery").unwrap();
    let (john_id, jane_id) = (john.borrow().id().unwrap(), jane.borrow().id().unwrap());
    let (house_id, grey_id) = (house.borrow().id().unwrap(), grey.borrow().id().unwrap());

    // later dates are inserted first; finders follow insertion order
    for (when, patient_id, doctor_id, notes) in [
        ("2024-06-03 09:00", john_id, house_id, "first"),
        ("2024-06-02 09:00", jane_id, house_id, "second"),
        ("2024-06-01 09:00", john_id, grey_id, "third"),
        ("2024-05-31 09:00", jane_id, grey_id, "fourth"),
    ] {
        AppointmentRepo::create(
            &s.conn,
            &mut s.registry,
            at(when),
            patient_id,
            doctor_id,
            Some(notes),
        )
        .unwrap();
    }

    let notes_of = |list: &[medrec_core::Shared<medrec_core::Appointment>]| -> Vec<String> {
        list.iter()
            .map(|a| a.borrow().notes().unwrap_or_default().to_string())
            .collect()
    };

    let for_john = AppointmentRepo::find_by_patient_id(&s.conn, &mut s.registry, john_id).unwrap();
    assert_eq!(notes_of(&for_john), vec!["first", "third"]);
    assert!(for_john.iter().all(|a| a.borrow().patient_id() == john_id));

    let for_grey = AppointmentRepo::find_by_doctor_id(&s.conn, &mut s.registry, grey_id).unwrap();
    assert_eq!(notes_of(&for_grey), vec!["third", "fourth"]);
    assert!(for_grey.iter().all(|a| a.borrow().doctor_id() == grey_id));

    assert!(AppointmentRepo::find_by_patient_id(&s.conn, &mut s.registry, 999)
        .unwrap()
        .is_empty());
}

#[test]
fn test_patient_load_attaches_related_rows() {
    let mut s = setup();
    let john = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let house = DoctorRepo::create(&s.conn, &mut s.registry, "Gregory", "House", "Diagnostics").unwrap();
    let (john_id, house_id) = (john.borrow().id().unwrap(), house.borrow().id().unwrap());

    let appointment = AppointmentRepo::create(
        &s.conn,
        &mut s.registry,
        at("2024-05-01 10:00"),
        john_id,
        house_id,
        Some("bring x-rays"),
    )
    .unwrap();
    MedicalRecordRepo::create(
        &s.conn,
        &mut s.registry,
        john_id,
        house_id,
        day("2024-05-01"),
        "Lupus",
        "Steroids",
    )
    .unwrap();

    let loaded = PatientRepo::find_by_id(&s.conn, &mut s.registry, john_id)
        .unwrap()
        .unwrap();
    let loaded = loaded.borrow();
    assert_eq!(loaded.medical_records().len(), 1);
    assert_eq!(loaded.appointments().len(), 1);
    assert!(Rc::ptr_eq(&loaded.appointments()[0], &appointment));

    let doctor = DoctorRepo::find_by_id(&s.conn, &mut s.registry, house_id)
        .unwrap()
        .unwrap();
    assert_eq!(doctor.borrow().appointments().len(), 1);
    assert_eq!(doctor.borrow().medical_records().len(), 1);
}

#[test]
fn test_appointment_with_missing_doctor_writes_nothing() {
    let mut s = setup();
    let john = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let john_id = john.borrow().id().unwrap();

    let err = AppointmentRepo::create(
        &s.conn,
        &mut s.registry,
        at("2024-05-01 10:00"),
        john_id,
        99,
        None,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::UnknownReference);
    assert_eq!(err.entity(), Some(EntityKind::Doctor));
    assert_eq!(err.entity_id(), Some(99));
    assert_eq!(count(&s, "appointments"), 0);
}

#[test]
fn test_record_update_to_missing_patient_is_rejected() {
    let mut s = setup();
    let john = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let house = DoctorRepo::create(&s.conn, &mut s.registry, "Gregory", "House", "Diagnostics").unwrap();
    let record = MedicalRecord::new(
        john.borrow().id().unwrap(),
        house.borrow().id().unwrap(),
        day("2024-05-01"),
        "Lupus",
        "Steroids",
    )
    .unwrap();
    let record = MedicalRecordRepo::save(&s.conn, &mut s.registry, record).unwrap();

    record.borrow_mut().set_patient_id(42).unwrap();
    let err = MedicalRecordRepo::update(&s.conn, &record.borrow()).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::UnknownReference);
    assert_eq!(err.entity(), Some(EntityKind::Patient));
}

#[test]
fn test_deleting_patient_cascades() {
    let mut s = setup();
    let john = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let house = DoctorRepo::create(&s.conn, &mut s.registry, "Gregory", "House", "Diagnostics").unwrap();
    let (john_id, house_id) = (john.borrow().id().unwrap(), house.borrow().id().unwrap());
    AppointmentRepo::create(
        &s.conn,
        &mut s.registry,
        at("2024-05-01 10:00"),
        john_id,
        house_id,
        None,
    )
    .unwrap();

    PatientRepo::delete(&s.conn, &john.borrow()).unwrap();

    assert_eq!(count(&s, "appointments"), 0);
    assert!(AppointmentRepo::find_by_doctor_id(&s.conn, &mut s.registry, house_id)
        .unwrap()
        .is_empty());
}

#[test]
fn test_drop_and_create_table() {
    let mut s = setup();
    PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();

    MedicalRecordRepo::drop_table(&s.conn, &mut s.registry).unwrap();
    AppointmentRepo::drop_table(&s.conn, &mut s.registry).unwrap();
    PatientRepo::drop_table(&s.conn, &mut s.registry).unwrap();
    PatientRepo::create_table(&s.conn).unwrap();
    AppointmentRepo::create_table(&s.conn).unwrap();
    MedicalRecordRepo::create_table(&s.conn).unwrap();

    assert!(PatientRepo::get_all(&s.conn, &mut s.registry)
        .unwrap()
        .is_empty());
}

#[test]
fn test_recreated_table_does_not_reuse_registered_instance() {
    let mut s = setup();
    let john = PatientRepo::create(&s.conn, &mut s.registry, "John", "Doe", 30).unwrap();
    let john_id = john.borrow().id();

    PatientRepo::drop_table(&s.conn, &mut s.registry).unwrap();
    PatientRepo::create_table(&s.conn).unwrap();
    assert!(s.registry.patients.is_empty());
    assert!(s.registry.appointments.is_empty());

    let ann = PatientRepo::create(&s.conn, &mut s.registry, "Ann", "Able", 41).unwrap();

    assert_eq!(ann.borrow().id(), john_id);
    assert!(!Rc::ptr_eq(&john, &ann));
    assert_eq!(john.borrow().full_name(), "John Doe");
    let found = PatientRepo::find_by_id(&s.conn, &mut s.registry, john_id.unwrap())
        .unwrap()
        .unwrap();
    assert!(Rc::ptr_eq(&found, &ann));
}
