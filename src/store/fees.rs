//! Consultation fee schedule.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Base fee charged when a specialty has no entry in the schedule.
pub const DEFAULT_BASE_FEE: f64 = 500.0;

/// Tax applied on top of the base consultation fee.
pub const TAX_RATE: f64 = 0.18;

static BASE_FEES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("Cardiology", 800.0),
        ("Neurology", 900.0),
        ("Orthopedics", 700.0),
        ("Dermatology", 500.0),
        ("Gynecology", 600.0),
        ("General Medicine", 400.0),
        ("Oncology", 850.0),
        ("Pediatrics", 500.0),
        ("ENT", 450.0),
        ("Ophthalmology", 550.0),
        ("Endocrinology", 700.0),
        ("Nephrology", 750.0),
        ("Gastroenterology", 720.0),
        ("Pulmonology", 650.0),
        ("Urology", 680.0),
        ("Rheumatology", 670.0),
        ("Physiotherapy", 500.0),
        ("General Surgery", 600.0),
        ("Psychiatry", 500.0),
    ])
});

/// Base consultation fee for a specialty, falling back to
/// [`DEFAULT_BASE_FEE`] for anything unlisted.
pub fn base_fee(specialty: &str) -> f64 {
    BASE_FEES.get(specialty).copied().unwrap_or(DEFAULT_BASE_FEE)
}

/// Total billed amount: base plus tax, rounded to the nearest whole unit
/// with halves away from zero (`f64::round`).
pub fn bill_total(base: f64) -> i64 {
    (base * (1.0 + TAX_RATE)).round() as i64
}
