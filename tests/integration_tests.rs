use std::fs;

use tempfile::TempDir;

use clinic_core::{storage, ClinicStore, StorageConfig, StoreError};

fn seeded_store() -> ClinicStore {
    let mut store = ClinicStore::new();
    store.add_patient("Anna Schmidt", 41, "Female", "555-0101");
    store.add_patient("Carl Meyer", 67, "Male", "555-0102");
    store.add_patient("Elena Braun", 28, "Female", "555-0103");
    store.add_doctor("Dr. Weber", "Cardiology", "555-0201");
    store.add_doctor("Dr. Fischer", "Dermatology", "555-0202");
    store
}

#[test]
fn test_full_workflow_survives_a_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::in_dir(dir.path());

    let mut store = seeded_store();
    let appointment = store.book_appointment(1, 1, "2024-01-01", "10:00").unwrap();
    let bill = store.generate_bill(appointment.id).unwrap();
    assert_eq!(bill.amount, 944);

    storage::save_all(&store, &config).unwrap();

    let mut reloaded = ClinicStore::new();
    storage::load_all(&mut reloaded, &config).unwrap();

    assert_eq!(reloaded.patients(), store.patients());
    assert_eq!(reloaded.doctors(), store.doctors());
    assert_eq!(reloaded.appointments(), store.appointments());
    assert_eq!(reloaded.bills(), store.bills());
}

#[test]
fn test_round_trip_preserves_order_and_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patients.csv");

    let mut store = seeded_store();
    store.delete_patient(2);
    storage::save_patients(&store, &path).unwrap();

    let mut reloaded = ClinicStore::new();
    storage::load_patients(&mut reloaded, &path).unwrap();

    let ids: Vec<u32> = reloaded.patients().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(reloaded.patients(), store.patients());
}

#[test]
fn test_comma_bearing_fields_survive_a_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patients.csv");

    let mut store = ClinicStore::new();
    store.add_patient("Schmidt, Anna", 41, "Female", "12 Elm St, Apt 4");
    storage::save_patients(&store, &path).unwrap();

    let mut reloaded = ClinicStore::new();
    storage::load_patients(&mut reloaded, &path).unwrap();

    assert_eq!(reloaded.patients()[0].name, "Schmidt, Anna");
    assert_eq!(reloaded.patients()[0].contact, "12 Elm St, Apt 4");
}

#[test]
fn test_ids_continue_past_reloaded_records() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::in_dir(dir.path());

    let mut store = seeded_store();
    storage::save_all(&store, &config).unwrap();

    let mut reloaded = ClinicStore::new();
    storage::load_all(&mut reloaded, &config).unwrap();

    // Patient ids 1..=3 are on disk, so the next assignment must be 4.
    assert_eq!(reloaded.add_patient("Dana Weiß", 30, "Female", "555-0104").id, 4);
    assert_eq!(reloaded.add_doctor("Dr. Klein", "ENT", "555-0203").id, 3);
}

#[test]
fn test_malformed_rows_are_skipped_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("appointments.csv");
    fs::write(
        &path,
        "id,patientId,doctorId,date,time\n\
         1,1,1,2024-01-01,10:00\n\
         two,1,1,2024-01-02,10:00\n\
         3,abc,1,2024-01-03,10:00\n\
         4,1,1,2024-01-04\n\
         5,2,2,2024-01-05,09:30\n",
    )
    .unwrap();

    let mut store = ClinicStore::new();
    let count = storage::load_appointments(&mut store, &path).unwrap();

    assert_eq!(count, 2);
    let ids: Vec<u32> = store.appointments().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 5]);
}

#[test]
fn test_billing_after_doctor_removed_by_reload() {
    // A reload can resurrect an appointment whose doctor's row is gone; the
    // in-memory cascade never saw the deletion, and billing must fail
    // rather than invent a fee.
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::in_dir(dir.path());

    let mut store = seeded_store();
    let appointment = store.book_appointment(1, 2, "2024-02-01", "14:00").unwrap();
    storage::save_all(&store, &config).unwrap();

    // Rewrite the doctor file without doctor 2, then reload everything.
    fs::write(
        &config.doctors,
        "id,name,specialty,contact\n1,Dr. Weber,Cardiology,555-0201\n",
    )
    .unwrap();

    let mut reloaded = ClinicStore::new();
    storage::load_all(&mut reloaded, &config).unwrap();
    assert_eq!(reloaded.appointments().len(), 1);

    let err = reloaded.generate_bill(appointment.id).unwrap_err();
    assert!(matches!(err, StoreError::DoctorNotFound(2)));
    assert!(reloaded.bills().is_empty());
}

#[test]
fn test_booking_conflicts_detected_across_reload() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::in_dir(dir.path());

    let mut store = seeded_store();
    store.book_appointment(1, 1, "2024-01-01", "10:00").unwrap();
    storage::save_all(&store, &config).unwrap();

    let mut reloaded = ClinicStore::new();
    storage::load_all(&mut reloaded, &config).unwrap();

    let err = reloaded
        .book_appointment(2, 1, "2024-01-01", "10:00")
        .unwrap_err();
    assert!(matches!(err, StoreError::SlotTaken { doctor_id: 1, .. }));
    assert_eq!(reloaded.appointments().len(), 1);
}

#[test]
fn test_saved_files_carry_expected_headers() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::in_dir(dir.path());

    let store = seeded_store();
    storage::save_all(&store, &config).unwrap();

    let patients = fs::read_to_string(&config.patients).unwrap();
    assert!(patients.starts_with("id,name,age,gender,contact\n"));

    let bills = fs::read_to_string(&config.bills).unwrap();
    assert!(bills.starts_with("billId,appointmentId,doctorId,amount,description,date\n"));
}

#[test]
fn test_empty_store_saves_header_only_files() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::in_dir(dir.path());

    let store = ClinicStore::new();
    storage::save_all(&store, &config).unwrap();

    let mut reloaded = ClinicStore::new();
    storage::load_all(&mut reloaded, &config).unwrap();
    assert!(reloaded.patients().is_empty());
    assert_eq!(reloaded.add_patient("First", 1, "F", "x").id, 1);
}
