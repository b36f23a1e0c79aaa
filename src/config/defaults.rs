//! Fixed engineering constants.
//!
//! Values here are not operator-tunable; tunable thresholds live in
//! `ReferenceData`.

// ============================================================================
// Hydraulics
// ============================================================================

/// NPSH safety margin added on top of NPSHr (m), per API 610 practice.
pub const NPSH_SAFETY_MARGIN_M: f64 = 1.0;

/// Standard gravity (m/s²).
pub const STANDARD_GRAVITY_M_S2: f64 = 9.80665;

/// Standard atmosphere (kPa). Converts gauge suction pressure to absolute.
pub const STANDARD_ATMOSPHERE_KPA: f64 = 101.325;

/// kPa to Pa.
pub const PA_PER_KPA: f64 = 1000.0;

// ============================================================================
// Reference Data Loading
// ============================================================================

/// Environment variable naming the reference data TOML file.
pub const CONFIG_ENV_VAR: &str = "PUMP_DIAGNOSIS_CONFIG";

/// Reference data file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "pump_reference.toml";
