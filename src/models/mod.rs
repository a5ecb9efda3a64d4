pub mod appointment;
pub mod bill;
pub mod doctor;
pub mod error;
pub mod patient;

pub use appointment::*;
pub use bill::*;
pub use doctor::*;
pub use error::*;
pub use patient::*;
