//! Physics Engine Module
//!
//! Deterministic calculations behind the analyzers.
//! All math here is pure physics/statistics with no side effects.
//!
//! - `calculate_npsha()` - Net positive suction head available
//! - `calculate_differential_head()` - Pump head from gauge pressures
//! - `vapor_pressure_kpa()` - Temperature-corrected product vapor pressure
//! - `imbalance_percent()` - Three-phase imbalance (NEMA MG-1)

pub mod metrics;
pub mod pump_models;

pub use metrics::{imbalance_percent, mean, round1, round2, round_to};
pub use pump_models::{calculate_differential_head, calculate_npsha, vapor_pressure_kpa};
