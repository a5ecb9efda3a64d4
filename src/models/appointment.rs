use std::fmt;

use serde::{Deserialize, Serialize};

/// A booked consultation slot.
///
/// `date` (`YYYY-MM-DD`) and `time` (`HH:MM`) are opaque text: the store
/// compares them by exact string equality and never parses or normalizes
/// them. Identity and schedule are immutable once booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    pub date: String,
    pub time: String,
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment[id={}, patient={}, doctor={}, date={}, time={}]",
            self.id, self.patient_id, self.doctor_id, self.date, self.time
        )
    }
}
