use thiserror::Error;

/// Failures surfaced by store operations and persistence calls.
///
/// Malformed rows encountered while loading are not represented here: they
/// are recovered locally by skipping the row.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("patient {0} not found")]
    PatientNotFound(u32),

    #[error("doctor {0} not found")]
    DoctorNotFound(u32),

    #[error("appointment {0} not found")]
    AppointmentNotFound(u32),

    /// The requested slot collides with an existing appointment for the
    /// same doctor, date and time.
    #[error("doctor {doctor_id} is not available on {date} at {time}")]
    SlotTaken {
        doctor_id: u32,
        date: String,
        time: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
