//! Embedded SQL migrations

use crate::schema;

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_patients",
            sql: schema::PATIENTS_DDL,
        },
        Migration {
            id: "002_doctors",
            sql: schema::DOCTORS_DDL,
        },
        Migration {
            id: "003_appointments",
            sql: schema::APPOINTMENTS_DDL,
        },
        Migration {
            id: "004_medical_records",
            sql: schema::MEDICAL_RECORDS_DDL,
        },
    ]
}
