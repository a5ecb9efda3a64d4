use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered patient.
///
/// Identifiers are assigned by the store and are unique within the patient
/// collection; no field beyond the id carries any validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient[id={}, name={}, age={}, gender={}, contact={}]",
            self.id, self.name, self.age, self.gender, self.contact
        )
    }
}
