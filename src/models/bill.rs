use std::fmt;

use serde::{Deserialize, Serialize};

/// An issued bill. Bills are append-only: the store never edits or deletes
/// them.
///
/// `doctor_id` is a copy of the billed appointment's doctor taken at
/// generation time, not re-derived later; `date` is copied from the
/// appointment. `amount` is a whole-unit currency value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: u32,
    pub appointment_id: u32,
    pub doctor_id: u32,
    pub amount: i64,
    pub description: String,
    pub date: String,
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bill[id={}, appointment={}, doctor={}, amount={}, description={}, date={}]",
            self.id, self.appointment_id, self.doctor_id, self.amount, self.description, self.date
        )
    }
}
