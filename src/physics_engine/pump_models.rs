//! Centrifugal pump hydraulics models
//!
//! Key calculations for suction-side health and operating point:
//! - Temperature-corrected vapor pressure
//! - NPSH available
//! - Differential head

use crate::config::{defaults, PhysicsConfig, ProductProfile};
use crate::error::{check_finite, check_positive, AnalysisError, AnalysisResult};

// ============================================================================
// Vapor Pressure
// ============================================================================

/// Product vapor pressure at `temperature_c` (kPa abs)
///
/// Formula: Pv(T) = Pv_ref × exp(k × (T - T_ref))
///
/// Where:
/// - Pv_ref = product vapor pressure at its default temperature
/// - T_ref = product default temperature (°C)
/// - k = `physics.vapor_pressure_temp_coeff` (per °C)
///
/// An exponential fit is adequate over the ambient handling range of refined
/// products; it is not meant for heated service.
pub fn vapor_pressure_kpa(product: &ProductProfile, temperature_c: f64, physics: &PhysicsConfig) -> f64 {
    let delta_t = temperature_c - product.default_temp_c;
    product.vapor_pressure_kpa * (physics.vapor_pressure_temp_coeff * delta_t).exp()
}

// ============================================================================
// NPSH Available
// ============================================================================

/// Calculate Net Positive Suction Head available (m)
///
/// Formula: NPSHa = (P_suction_abs - Pv(T)) × 1000 / (ρ × g)
///
/// Where:
/// - P_suction_abs = gauge suction pressure + atmospheric pressure (kPa)
/// - Pv(T) = vapor pressure at the product temperature (kPa)
/// - ρ = product density (kg/m³)
/// - g = gravitational acceleration (m/s²)
///
/// Suction gauge pressure is assumed to be referenced at the pump centerline,
/// so no static or friction terms are added.
///
/// ## Errors
/// Validation error when the absolute suction pressure is not above zero or
/// when density/gravity would be used as a zero divisor.
pub fn calculate_npsha(
    suction_gauge_kpa: f64,
    temperature_c: f64,
    product: &ProductProfile,
    physics: &PhysicsConfig,
) -> AnalysisResult<f64> {
    check_finite("suction_pressure_kpa", suction_gauge_kpa)?;
    check_finite("temperature_c", temperature_c)?;
    let rho_g = fluid_weight(product, physics)?;

    let suction_abs = suction_gauge_kpa + physics.atmospheric_pressure_kpa;
    if suction_abs <= 0.0 {
        return Err(AnalysisError::invalid(
            "suction_pressure_kpa",
            suction_gauge_kpa,
            "absolute suction pressure must be above zero",
        ));
    }

    let vapor = vapor_pressure_kpa(product, temperature_c, physics);
    Ok((suction_abs - vapor) * defaults::PA_PER_KPA / rho_g)
}

// ============================================================================
// Differential Head
// ============================================================================

/// Calculate pump differential head (m)
///
/// Formula: H = (P_discharge - P_suction) × 1000 / (ρ × g)
///
/// Both pressures are gauge (kPa); the atmospheric term cancels.
pub fn calculate_differential_head(
    suction_kpa: f64,
    discharge_kpa: f64,
    product: &ProductProfile,
    physics: &PhysicsConfig,
) -> AnalysisResult<f64> {
    check_finite("suction_pressure_kpa", suction_kpa)?;
    check_finite("discharge_pressure_kpa", discharge_kpa)?;
    let rho_g = fluid_weight(product, physics)?;
    Ok((discharge_kpa - suction_kpa) * defaults::PA_PER_KPA / rho_g)
}

/// Specific weight ρ·g (N/m³).
fn fluid_weight(product: &ProductProfile, physics: &PhysicsConfig) -> AnalysisResult<f64> {
    let rho = check_positive("density_kg_m3", product.density_kg_m3)?;
    let g = check_positive("gravity_m_s2", physics.gravity_m_s2)?;
    Ok(rho * g)
}

// ============================================================================
// Tests
// ============================================================================
