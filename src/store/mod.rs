//! The in-memory record store.
//!
//! Four insertion-ordered collections with per-collection monotonic
//! identifier counters. All lookups and searches are linear scans over
//! small collections.

pub mod fees;

use tracing::debug;

use crate::models::{Appointment, Bill, Doctor, Patient, StoreError};

/// Fixed description attached to every generated bill.
pub const BILL_DESCRIPTION: &str = "Consultation fee (incl. 18% tax)";

/// Owns all clinic records and enforces consistency between them.
///
/// Not synchronized: a multi-user caller must serialize access so that only
/// one mutation is in flight at a time.
#[derive(Debug)]
pub struct ClinicStore {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    bills: Vec<Bill>,

    next_patient_id: u32,
    next_doctor_id: u32,
    next_appointment_id: u32,
    next_bill_id: u32,
}

impl ClinicStore {
    /// Create an empty store. All identifier counters start at 1.
    pub fn new() -> Self {
        Self {
            patients: Vec::new(),
            doctors: Vec::new(),
            appointments: Vec::new(),
            bills: Vec::new(),
            next_patient_id: 1,
            next_doctor_id: 1,
            next_appointment_id: 1,
            next_bill_id: 1,
        }
    }

    // ------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------

    /// Register a patient under the next free identifier.
    pub fn add_patient(
        &mut self,
        name: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
        contact: impl Into<String>,
    ) -> Patient {
        let patient = Patient {
            id: self.next_patient_id,
            name: name.into(),
            age,
            gender: gender.into(),
            contact: contact.into(),
        };
        self.next_patient_id += 1;
        self.patients.push(patient.clone());
        debug!("added {patient}");
        patient
    }

    /// Overwrite every mutable field of the patient with this id. Returns
    /// whether a patient was found; no field is validated.
    pub fn edit_patient(
        &mut self,
        id: u32,
        name: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
        contact: impl Into<String>,
    ) -> bool {
        match self.patients.iter_mut().find(|p| p.id == id) {
            Some(patient) => {
                patient.name = name.into();
                patient.age = age;
                patient.gender = gender.into();
                patient.contact = contact.into();
                true
            }
            None => false,
        }
    }

    /// Remove the patient with this id together with every appointment that
    /// references them. Returns whether a patient was removed.
    pub fn delete_patient(&mut self, id: u32) -> bool {
        let before = self.patients.len();
        self.patients.retain(|p| p.id != id);
        if self.patients.len() == before {
            return false;
        }
        self.appointments.retain(|a| a.patient_id != id);
        debug!("deleted patient {id} and their appointments");
        true
    }

    pub fn find_patient(&self, id: u32) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Case-insensitive substring search over patient names. An empty query
    /// matches everyone; results keep insertion order.
    pub fn search_patients_by_name(&self, query: &str) -> Vec<&Patient> {
        let needle = query.to_lowercase();
        self.patients
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    // ------------------------------------------------------------------
    // Doctors
    // ------------------------------------------------------------------

    /// Add a doctor to the roster under the next free identifier.
    pub fn add_doctor(
        &mut self,
        name: impl Into<String>,
        specialty: impl Into<String>,
        contact: impl Into<String>,
    ) -> Doctor {
        let doctor = Doctor {
            id: self.next_doctor_id,
            name: name.into(),
            specialty: specialty.into(),
            contact: contact.into(),
        };
        self.next_doctor_id += 1;
        self.doctors.push(doctor.clone());
        debug!("added {doctor}");
        doctor
    }

    /// Overwrite every mutable field of the doctor with this id. Returns
    /// whether a doctor was found.
    pub fn edit_doctor(
        &mut self,
        id: u32,
        name: impl Into<String>,
        specialty: impl Into<String>,
        contact: impl Into<String>,
    ) -> bool {
        match self.doctors.iter_mut().find(|d| d.id == id) {
            Some(doctor) => {
                doctor.name = name.into();
                doctor.specialty = specialty.into();
                doctor.contact = contact.into();
                true
            }
            None => false,
        }
    }

    /// Remove the doctor with this id together with every appointment that
    /// references them. Returns whether a doctor was removed.
    pub fn delete_doctor(&mut self, id: u32) -> bool {
        let before = self.doctors.len();
        self.doctors.retain(|d| d.id != id);
        if self.doctors.len() == before {
            return false;
        }
        self.appointments.retain(|a| a.doctor_id != id);
        debug!("deleted doctor {id} and their appointments");
        true
    }

    pub fn find_doctor(&self, id: u32) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    /// Case-insensitive substring search over doctor names. An empty query
    /// matches everyone; results keep insertion order.
    pub fn search_doctors_by_name(&self, query: &str) -> Vec<&Doctor> {
        let needle = query.to_lowercase();
        self.doctors
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    // ------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------

    /// Book an appointment for an existing patient with an existing doctor.
    ///
    /// Fails when either reference does not resolve, or when the doctor
    /// already has an appointment at exactly this date and time (string
    /// equality; there is no symmetric check for the patient). On failure
    /// no collection is touched.
    pub fn book_appointment(
        &mut self,
        patient_id: u32,
        doctor_id: u32,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Result<Appointment, StoreError> {
        if self.find_patient(patient_id).is_none() {
            return Err(StoreError::PatientNotFound(patient_id));
        }
        if self.find_doctor(doctor_id).is_none() {
            return Err(StoreError::DoctorNotFound(doctor_id));
        }

        let date = date.into();
        let time = time.into();
        let taken = self
            .appointments
            .iter()
            .any(|a| a.doctor_id == doctor_id && a.date == date && a.time == time);
        if taken {
            return Err(StoreError::SlotTaken {
                doctor_id,
                date,
                time,
            });
        }

        let appointment = Appointment {
            id: self.next_appointment_id,
            patient_id,
            doctor_id,
            date,
            time,
        };
        self.next_appointment_id += 1;
        self.appointments.push(appointment.clone());
        debug!("booked {appointment}");
        Ok(appointment)
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    // ------------------------------------------------------------------
    // Billing
    // ------------------------------------------------------------------

    /// Generate and append the bill for an appointment.
    ///
    /// The doctor is resolved at generation time; an appointment can
    /// outlive its doctor when a reload bypasses the in-memory cascade, and
    /// that surfaces here as [`StoreError::DoctorNotFound`]. On failure no
    /// collection is touched.
    pub fn generate_bill(&mut self, appointment_id: u32) -> Result<Bill, StoreError> {
        let appointment = self
            .appointments
            .iter()
            .find(|a| a.id == appointment_id)
            .ok_or(StoreError::AppointmentNotFound(appointment_id))?;
        let doctor = self
            .doctors
            .iter()
            .find(|d| d.id == appointment.doctor_id)
            .ok_or(StoreError::DoctorNotFound(appointment.doctor_id))?;

        let base = fees::base_fee(&doctor.specialty);
        let bill = Bill {
            id: self.next_bill_id,
            appointment_id: appointment.id,
            doctor_id: doctor.id,
            amount: fees::bill_total(base),
            description: BILL_DESCRIPTION.to_string(),
            date: appointment.date.clone(),
        };
        self.next_bill_id += 1;
        self.bills.push(bill.clone());
        debug!("generated {bill}");
        Ok(bill)
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    // ------------------------------------------------------------------
    // Bulk replacement (reload from storage)
    // ------------------------------------------------------------------

    /// Replace the patient collection wholesale and reset the id counter to
    /// one past the highest id present.
    pub fn replace_patients(&mut self, records: Vec<Patient>) {
        self.next_patient_id = records.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        self.patients = records;
    }

    /// Replace the doctor collection wholesale; see [`Self::replace_patients`].
    pub fn replace_doctors(&mut self, records: Vec<Doctor>) {
        self.next_doctor_id = records.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        self.doctors = records;
    }

    /// Replace the appointment collection wholesale; see
    /// [`Self::replace_patients`].
    pub fn replace_appointments(&mut self, records: Vec<Appointment>) {
        self.next_appointment_id = records.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        self.appointments = records;
    }

    /// Replace the bill collection wholesale; see [`Self::replace_patients`].
    pub fn replace_bills(&mut self, records: Vec<Bill>) {
        self.next_bill_id = records.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        self.bills = records;
    }
}

impl Default for ClinicStore {
    fn default() -> Self {
        Self::new()
    }
}
