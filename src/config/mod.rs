//! Reference Data Module
//!
//! Equipment tables and analyzer thresholds loaded from TOML, so plant
//! engineering standards are operator-tunable values rather than constants.
//!
//! ## Loading Order
//!
//! 1. `PUMP_DIAGNOSIS_CONFIG` environment variable (path to TOML file)
//! 2. `pump_reference.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Load once at startup and pass a reference to every analyzer call:
//!
//! ```ignore
//! let reference = ReferenceData::load();
//! let assessment = analyze_electrical(&reading, PumpSize::Medium, &reference)?;
//! ```

mod reference_data;
pub mod defaults;
pub mod validation;

pub use reference_data::*;
