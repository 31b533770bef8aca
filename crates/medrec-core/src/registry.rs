//! Entity registry
//!
//! Keeps at most one live instance per primary key and entity type. Loading a
//! row whose id is already registered refreshes the existing instance in place,
//! so every `Shared<T>` handed out earlier observes the new values.
//!
//! The registry is an ordinary value owned by the caller (usually one per
//! shell session) and passed by `&mut` into load operations.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::errors::{EntityKind, MedRecError, Result};
use crate::model::{Appointment, Doctor, MedicalRecord, Patient};

/// Handle to a live registered instance
pub type Shared<T> = Rc<RefCell<T>>;

/// A validated record that maps to one table row
pub trait Record: fmt::Debug {
    const KIND: EntityKind;

    /// Primary key, `None` until the record is saved
    fn id(&self) -> Option<i64>;

    /// Overwrite column values from a freshly loaded copy of the same row
    ///
    /// Identity and anything attached after loading (related records) are
    /// left alone; the loader re-derives those itself.
    fn refresh_from(&mut self, row: Self);
}

/// Primary key to live instance mapping for one entity type
#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: HashMap<i64, Shared<T>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Record> IdentityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<Shared<T>> {
        self.entries.get(&id).cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every instance; handles already given out stay valid but are no
    /// longer refreshed by later loads
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Insert a loaded record, or refresh the instance already registered
    /// under its id
    ///
    /// # Errors
    ///
    /// `NotPersisted` if the record has no id.
    pub fn register(&mut self, record: T) -> Result<Shared<T>> {
        let id = record
            .id()
            .ok_or(MedRecError::NotPersisted { entity: T::KIND })?;

        if let Some(existing) = self.entries.get(&id) {
            existing.borrow_mut().refresh_from(record);
            return Ok(Rc::clone(existing));
        }

        let shared = Rc::new(RefCell::new(record));
        self.entries.insert(id, Rc::clone(&shared));
        Ok(shared)
    }
}

/// One identity map per entity type
#[derive(Debug, Default)]
pub struct Registry {
    pub patients: IdentityMap<Patient>,
    pub doctors: IdentityMap<Doctor>,
    pub appointments: IdentityMap<Appointment>,
    pub medical_records: IdentityMap<MedicalRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of live instances across all entity types
    pub fn len(&self) -> usize {
        self.patients.len()
            + self.doctors.len()
            + self.appointments.len()
            + self.medical_records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget the instances of `kind` and of every kind whose rows are
    /// removed along with it
    ///
    /// Called when a table is dropped: its id sequence restarts, so a new row
    /// could otherwise reuse the id of a registered instance.
    pub fn forget(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Patient => self.patients.clear(),
            EntityKind::Doctor => self.doctors.clear(),
            EntityKind::Appointment | EntityKind::MedicalRecord => {}
        }
        if matches!(kind, EntityKind::Patient | EntityKind::Doctor | EntityKind::Appointment) {
            self.appointments.clear();
        }
        if matches!(kind, EntityKind::Patient | EntityKind::Doctor | EntityKind::MedicalRecord) {
            self.medical_records.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_patient(id: i64, first: &str, age: i64) -> Patient {
        Patient::from_row(id, first, "Doe", age).unwrap()
    }

    #[test]
    fn test_register_same_id_returns_same_instance() {
        let mut map = IdentityMap::new();
        let first = map.register(loaded_patient(1, "John", 30)).unwrap();
        let second = map.register(loaded_patient(1, "Johnny", 31)).unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.borrow().first_name(), "Johnny");
        assert_eq!(first.borrow().age(), 31);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_register_distinct_ids() {
        let mut map = IdentityMap::new();
        map.register(loaded_patient(2, "Jane", 25)).unwrap();
        map.register(loaded_patient(1, "John", 30)).unwrap();
        assert_eq!(map.ids(), vec![1, 2]);
        assert!(map.contains(2));
        assert!(!map.contains(3));
    }

    #[test]
    fn test_register_unsaved_record_fails() {
        let mut map: IdentityMap<Patient> = IdentityMap::new();
        let unsaved = Patient::new("Eve", "Davis", 35).unwrap();
        let err = map.register(unsaved).unwrap_err();
        assert_eq!(
            err,
            MedRecError::NotPersisted {
                entity: EntityKind::Patient
            }
        );
        assert!(map.is_empty());
    }

    #[test]
    fn test_registry_counts_all_maps() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        registry.patients.register(loaded_patient(1, "John", 30)).unwrap();
        registry
            .doctors
            .register(Doctor::from_row(1, "Gregory", "House", "Diagnostics").unwrap())
            .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_forget_patient_clears_dependent_maps() {
        let mut registry = Registry::new();
        registry.patients.register(loaded_patient(1, "John", 30)).unwrap();
        registry
            .doctors
            .register(Doctor::from_row(1, "Gregory", "House", "Diagnostics").unwrap())
            .unwrap();
        let date = crate::validation::parse_record_date("2024-01-10").unwrap();
        registry
            .medical_records
            .register(MedicalRecord::from_row(1, 1, 1, date, "Flu", "Rest").unwrap())
            .unwrap();

        registry.forget(EntityKind::Patient);

        assert!(registry.patients.is_empty());
        assert!(registry.medical_records.is_empty());
        assert_eq!(registry.doctors.len(), 1);
    }

    #[test]
    fn test_forget_leaf_kind_only_clears_itself() {
        let mut registry = Registry::new();
        registry.patients.register(loaded_patient(1, "John", 30)).unwrap();
        let date = crate::validation::parse_record_date("2024-01-10").unwrap();
        registry
            .medical_records
            .register(MedicalRecord::from_row(1, 1, 1, date, "Flu", "Rest").unwrap())
            .unwrap();

        registry.forget(EntityKind::MedicalRecord);

        assert!(registry.medical_records.is_empty());
        assert_eq!(registry.patients.len(), 1);
    }
}
