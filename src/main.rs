use std::fmt;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use clinic_core::{storage, ClinicStore, StorageConfig, StoreError};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "clinic")]
#[command(about = "Clinic records - patients, doctors, appointments and billing")]
#[command(version)]
struct Args {
    /// Directory holding the data files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Print listings as JSON instead of plain text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every patient
    ListPatients,
    /// Register a new patient
    AddPatient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        contact: String,
    },
    /// Overwrite a patient's details
    EditPatient {
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        contact: String,
    },
    /// Remove a patient together with their appointments
    DeletePatient { id: u32 },
    /// Search patients by name (case-insensitive substring)
    SearchPatients { query: String },
    /// List every doctor
    ListDoctors,
    /// Add a doctor to the roster
    AddDoctor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        specialty: String,
        #[arg(long)]
        contact: String,
    },
    /// Overwrite a doctor's details
    EditDoctor {
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        specialty: String,
        #[arg(long)]
        contact: String,
    },
    /// Remove a doctor together with their appointments
    DeleteDoctor { id: u32 },
    /// Search doctors by name (case-insensitive substring)
    SearchDoctors { query: String },
    /// List every appointment
    ListAppointments,
    /// Book an appointment for a patient with a doctor
    BookAppointment {
        #[arg(long)]
        patient: u32,
        #[arg(long)]
        doctor: u32,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Time as HH:MM
        #[arg(long)]
        time: String,
    },
    /// Generate the bill for an appointment
    GenerateBill { appointment_id: u32 },
    /// List every bill
    ListBills,
}

// ============================================================================
// Startup and persistence policy
// ============================================================================

/// A missing data file just means an empty collection (first run); any other
/// I/O failure aborts startup.
fn allow_missing(result: Result<usize, StoreError>, what: &str) -> anyhow::Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(StoreError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            info!("no {what} file yet, starting with an empty collection");
            Ok(())
        }
        Err(err) => Err(err).with_context(|| format!("failed to load {what}")),
    }
}

fn load_store(store: &mut ClinicStore, config: &StorageConfig) -> anyhow::Result<()> {
    allow_missing(storage::load_patients(store, &config.patients), "patients")?;
    allow_missing(storage::load_doctors(store, &config.doctors), "doctors")?;
    allow_missing(
        storage::load_appointments(store, &config.appointments),
        "appointments",
    )?;
    allow_missing(storage::load_bills(store, &config.bills), "bills")?;
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn print_listing<T>(items: &[T], json: bool) -> anyhow::Result<()>
where
    T: fmt::Display + Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else if items.is_empty() {
        println!("(no records)");
    } else {
        for item in items {
            println!("{item}");
        }
    }
    Ok(())
}

// ============================================================================
// Command dispatch
// ============================================================================

/// Apply one command. Returns whether the store was mutated and needs to be
/// written back.
fn run(args: &Args, store: &mut ClinicStore) -> anyhow::Result<bool> {
    match &args.command {
        Command::ListPatients => {
            print_listing(store.patients(), args.json)?;
            Ok(false)
        }
        Command::AddPatient {
            name,
            age,
            gender,
            contact,
        } => {
            let patient = store.add_patient(name.clone(), *age, gender.clone(), contact.clone());
            println!("Added: {patient}");
            Ok(true)
        }
        Command::EditPatient {
            id,
            name,
            age,
            gender,
            contact,
        } => {
            if store.edit_patient(*id, name.clone(), *age, gender.clone(), contact.clone()) {
                println!("Patient {id} updated");
                Ok(true)
            } else {
                println!("Patient {id} not found");
                Ok(false)
            }
        }
        Command::DeletePatient { id } => {
            if store.delete_patient(*id) {
                println!("Patient {id} deleted");
                Ok(true)
            } else {
                println!("Patient {id} not found");
                Ok(false)
            }
        }
        Command::SearchPatients { query } => {
            print_listing(&store.search_patients_by_name(query), args.json)?;
            Ok(false)
        }
        Command::ListDoctors => {
            print_listing(store.doctors(), args.json)?;
            Ok(false)
        }
        Command::AddDoctor {
            name,
            specialty,
            contact,
        } => {
            let doctor = store.add_doctor(name.clone(), specialty.clone(), contact.clone());
            println!("Added: {doctor}");
            Ok(true)
        }
        Command::EditDoctor {
            id,
            name,
            specialty,
            contact,
        } => {
            if store.edit_doctor(*id, name.clone(), specialty.clone(), contact.clone()) {
                println!("Doctor {id} updated");
                Ok(true)
            } else {
                println!("Doctor {id} not found");
                Ok(false)
            }
        }
        Command::DeleteDoctor { id } => {
            if store.delete_doctor(*id) {
                println!("Doctor {id} deleted");
                Ok(true)
            } else {
                println!("Doctor {id} not found");
                Ok(false)
            }
        }
        Command::SearchDoctors { query } => {
            print_listing(&store.search_doctors_by_name(query), args.json)?;
            Ok(false)
        }
        Command::ListAppointments => {
            print_listing(store.appointments(), args.json)?;
            Ok(false)
        }
        Command::BookAppointment {
            patient,
            doctor,
            date,
            time,
        } => {
            let appointment = store
                .book_appointment(*patient, *doctor, date.clone(), time.clone())
                .context("failed to book appointment")?;
            println!("Booked: {appointment}");
            Ok(true)
        }
        Command::GenerateBill { appointment_id } => {
            let bill = store
                .generate_bill(*appointment_id)
                .context("failed to generate bill")?;
            println!("Generated: {bill}");
            Ok(true)
        }
        Command::ListBills => {
            print_listing(store.bills(), args.json)?;
            Ok(false)
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = StorageConfig::in_dir(&args.data_dir);

    let mut store = ClinicStore::new();
    load_store(&mut store, &config)?;

    let mutated = run(&args, &mut store)?;

    if mutated {
        std::fs::create_dir_all(&args.data_dir).with_context(|| {
            format!("failed to create data directory {}", args.data_dir.display())
        })?;
        storage::save_all(&store, &config).context("failed to save data files")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_tolerated_on_load() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(allow_missing(Err(StoreError::Io(err)), "patients").is_ok());
    }

    #[test]
    fn test_other_io_errors_abort_load() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "locked");
        assert!(allow_missing(Err(StoreError::Io(err)), "patients").is_err());
    }

    #[test]
    fn test_cli_parses_book_appointment() {
        let args = Args::try_parse_from([
            "clinic",
            "book-appointment",
            "--patient",
            "1",
            "--doctor",
            "2",
            "--date",
            "2024-01-01",
            "--time",
            "10:00",
        ])
        .unwrap();

        match args.command {
            Command::BookAppointment {
                patient,
                doctor,
                date,
                time,
            } => {
                assert_eq!((patient, doctor), (1, 2));
                assert_eq!(date, "2024-01-01");
                assert_eq!(time, "10:00");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
