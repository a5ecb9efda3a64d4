//! Flat-file persistence for the clinic store.
//!
//! Each collection lives in its own comma-delimited file with a header row.
//! Loading replaces the in-memory collection and rebuilds the next-id
//! counter from the highest identifier on disk; rows that are short or
//! carry unparseable numeric fields are skipped. Saving rewrites the whole
//! file in place, with no atomic replace and no backup.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codec;
use crate::models::{Appointment, Bill, Doctor, Patient, StoreError};
use crate::store::ClinicStore;

const PATIENT_HEADER: [&str; 5] = ["id", "name", "age", "gender", "contact"];
const DOCTOR_HEADER: [&str; 4] = ["id", "name", "specialty", "contact"];
const APPOINTMENT_HEADER: [&str; 5] = ["id", "patientId", "doctorId", "date", "time"];
const BILL_HEADER: [&str; 6] = [
    "billId",
    "appointmentId",
    "doctorId",
    "amount",
    "description",
    "date",
];

/// File locations for every persisted collection.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub patients: PathBuf,
    pub doctors: PathBuf,
    pub appointments: PathBuf,
    pub bills: PathBuf,
}

impl StorageConfig {
    /// Conventional file names under the given data directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            patients: dir.join("patients.csv"),
            doctors: dir.join("doctors.csv"),
            appointments: dir.join("appointments.csv"),
            bills: dir.join("billing.csv"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::in_dir("data")
    }
}

// ----------------------------------------------------------------------
// Row mapping
// ----------------------------------------------------------------------

fn patient_from_row(row: &[String]) -> Option<Patient> {
    if row.len() < 5 {
        return None;
    }
    Some(Patient {
        id: row[0].parse().ok()?,
        name: row[1].clone(),
        age: row[2].parse().ok()?,
        gender: row[3].clone(),
        contact: row[4].clone(),
    })
}

fn doctor_from_row(row: &[String]) -> Option<Doctor> {
    if row.len() < 4 {
        return None;
    }
    Some(Doctor {
        id: row[0].parse().ok()?,
        name: row[1].clone(),
        specialty: row[2].clone(),
        contact: row[3].clone(),
    })
}

fn appointment_from_row(row: &[String]) -> Option<Appointment> {
    if row.len() < 5 {
        return None;
    }
    Some(Appointment {
        id: row[0].parse().ok()?,
        patient_id: row[1].parse().ok()?,
        doctor_id: row[2].parse().ok()?,
        date: row[3].clone(),
        time: row[4].clone(),
    })
}

fn bill_from_row(row: &[String]) -> Option<Bill> {
    if row.len() < 6 {
        return None;
    }
    Some(Bill {
        id: row[0].parse().ok()?,
        appointment_id: row[1].parse().ok()?,
        doctor_id: row[2].parse().ok()?,
        amount: row[3].parse().ok()?,
        description: row[4].clone(),
        date: row[5].clone(),
    })
}

fn collect_rows<T>(rows: Vec<Vec<String>>, from_row: fn(&[String]) -> Option<T>, what: &str) -> Vec<T> {
    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        match from_row(row) {
            Some(record) => records.push(record),
            None => warn!("skipping malformed {what} row: {row:?}"),
        }
    }
    records
}

// ----------------------------------------------------------------------
// Load
// ----------------------------------------------------------------------

/// Load the patient file, replacing the in-memory collection. Returns the
/// number of records loaded.
pub fn load_patients(store: &mut ClinicStore, path: &Path) -> Result<usize, StoreError> {
    let records = collect_rows(codec::read_rows(path)?, patient_from_row, "patient");
    let count = records.len();
    store.replace_patients(records);
    info!("loaded {count} patients from {}", path.display());
    Ok(count)
}

/// Load the doctor file; see [`load_patients`].
pub fn load_doctors(store: &mut ClinicStore, path: &Path) -> Result<usize, StoreError> {
    let records = collect_rows(codec::read_rows(path)?, doctor_from_row, "doctor");
    let count = records.len();
    store.replace_doctors(records);
    info!("loaded {count} doctors from {}", path.display());
    Ok(count)
}

/// Load the appointment file; see [`load_patients`].
pub fn load_appointments(store: &mut ClinicStore, path: &Path) -> Result<usize, StoreError> {
    let records = collect_rows(codec::read_rows(path)?, appointment_from_row, "appointment");
    let count = records.len();
    store.replace_appointments(records);
    info!("loaded {count} appointments from {}", path.display());
    Ok(count)
}

/// Load the billing file; see [`load_patients`].
pub fn load_bills(store: &mut ClinicStore, path: &Path) -> Result<usize, StoreError> {
    let records = collect_rows(codec::read_rows(path)?, bill_from_row, "bill");
    let count = records.len();
    store.replace_bills(records);
    info!("loaded {count} bills from {}", path.display());
    Ok(count)
}

/// Load every collection named by the config, failing on the first I/O
/// error.
pub fn load_all(store: &mut ClinicStore, config: &StorageConfig) -> Result<(), StoreError> {
    load_patients(store, &config.patients)?;
    load_doctors(store, &config.doctors)?;
    load_appointments(store, &config.appointments)?;
    load_bills(store, &config.bills)?;
    Ok(())
}

// ----------------------------------------------------------------------
// Save
// ----------------------------------------------------------------------

/// Write the full patient collection, overwriting the target.
pub fn save_patients(store: &ClinicStore, path: &Path) -> Result<(), StoreError> {
    let rows: Vec<Vec<String>> = store
        .patients()
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.age.to_string(),
                p.gender.clone(),
                p.contact.clone(),
            ]
        })
        .collect();
    codec::write_rows(path, &PATIENT_HEADER, &rows)?;
    info!("saved {} patients to {}", rows.len(), path.display());
    Ok(())
}

/// Write the full doctor collection, overwriting the target.
pub fn save_doctors(store: &ClinicStore, path: &Path) -> Result<(), StoreError> {
    let rows: Vec<Vec<String>> = store
        .doctors()
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.name.clone(),
                d.specialty.clone(),
                d.contact.clone(),
            ]
        })
        .collect();
    codec::write_rows(path, &DOCTOR_HEADER, &rows)?;
    info!("saved {} doctors to {}", rows.len(), path.display());
    Ok(())
}

/// Write the full appointment collection, overwriting the target.
pub fn save_appointments(store: &ClinicStore, path: &Path) -> Result<(), StoreError> {
    let rows: Vec<Vec<String>> = store
        .appointments()
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                a.patient_id.to_string(),
                a.doctor_id.to_string(),
                a.date.clone(),
                a.time.clone(),
            ]
        })
        .collect();
    codec::write_rows(path, &APPOINTMENT_HEADER, &rows)?;
    info!("saved {} appointments to {}", rows.len(), path.display());
    Ok(())
}

/// Write the full bill collection, overwriting the target.
pub fn save_bills(store: &ClinicStore, path: &Path) -> Result<(), StoreError> {
    let rows: Vec<Vec<String>> = store
        .bills()
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                b.appointment_id.to_string(),
                b.doctor_id.to_string(),
                b.amount.to_string(),
                b.description.clone(),
                b.date.clone(),
            ]
        })
        .collect();
    codec::write_rows(path, &BILL_HEADER, &rows)?;
    info!("saved {} bills to {}", rows.len(), path.display());
    Ok(())
}

/// Save every collection named by the config, failing on the first I/O
/// error.
pub fn save_all(store: &ClinicStore, config: &StorageConfig) -> Result<(), StoreError> {
    save_patients(store, &config.patients)?;
    save_doctors(store, &config.doctors)?;
    save_appointments(store, &config.appointments)?;
    save_bills(store, &config.bills)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_skips_short_and_unparseable_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.csv");
        fs::write(
            &path,
            "id,name,age,gender,contact\n\
             1,Anna,41,Female,555-0101\n\
             oops,Broken,30,Male,555-0102\n\
             2,Short,19\n\
             3,Carl,not-a-number,Male,555-0103\n\
             4,Elena,28,Female,555-0104\n",
        )
        .unwrap();

        let mut store = ClinicStore::new();
        let count = load_patients(&mut store, &path).unwrap();

        assert_eq!(count, 2);
        let ids: Vec<u32> = store.patients().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_load_rebuilds_counter_past_max_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doctors.csv");
        fs::write(
            &path,
            "id,name,specialty,contact\n7,Dr. Weber,Cardiology,555-0201\n3,Dr. Braun,ENT,555-0202\n",
        )
        .unwrap();

        let mut store = ClinicStore::new();
        load_doctors(&mut store, &path).unwrap();

        assert_eq!(store.add_doctor("Dr. New", "Neurology", "555-0203").id, 8);
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.csv");

        let mut store = ClinicStore::new();
        store.add_patient("Anna", 41, "Female", "555-0101");
        store.add_patient("Carl", 67, "Male", "555-0102");
        save_patients(&store, &path).unwrap();

        store.delete_patient(2);
        save_patients(&store, &path).unwrap();

        let mut reloaded = ClinicStore::new();
        assert_eq!(load_patients(&mut reloaded, &path).unwrap(), 1);
        assert_eq!(reloaded.patients()[0].name, "Anna");
    }

    #[test]
    fn test_load_missing_file_is_an_io_error() {
        let mut store = ClinicStore::new();
        let err = load_patients(&mut store, Path::new("no/such/dir/patients.csv")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
