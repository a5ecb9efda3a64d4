use std::fmt;

use serde::{Deserialize, Serialize};

/// A doctor on the clinic roster. The specialty drives billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub contact: String,
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Doctor[id={}, name={}, specialty={}, contact={}]",
            self.id, self.name, self.specialty, self.contact
        )
    }
}
