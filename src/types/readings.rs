//! Input snapshots. Pre-aggregated scalar readings, one record per domain.

use serde::{Deserialize, Serialize};

use crate::error::{check_finite, check_non_negative, AnalysisResult};
use super::Direction;

// ============================================================================
// Electrical
// ============================================================================

/// Per-phase RMS voltage (V) and current (A).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricalReading {
    pub voltage_l1: f64,
    pub voltage_l2: f64,
    pub voltage_l3: f64,
    pub current_l1: f64,
    pub current_l2: f64,
    pub current_l3: f64,
}

impl ElectricalReading {
    pub fn voltages(&self) -> [f64; 3] {
        [self.voltage_l1, self.voltage_l2, self.voltage_l3]
    }

    pub fn currents(&self) -> [f64; 3] {
        [self.current_l1, self.current_l2, self.current_l3]
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        check_non_negative("voltage_l1", self.voltage_l1)?;
        check_non_negative("voltage_l2", self.voltage_l2)?;
        check_non_negative("voltage_l3", self.voltage_l3)?;
        check_non_negative("current_l1", self.current_l1)?;
        check_non_negative("current_l2", self.current_l2)?;
        check_non_negative("current_l3", self.current_l3)?;
        Ok(())
    }
}

// ============================================================================
// Hydraulic
// ============================================================================

/// Suction/discharge gauge pressures (kPa), flow (m³/h) and optional product
/// temperature (°C). Without a temperature the product default is used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydraulicReading {
    pub suction_pressure_kpa: f64,
    pub discharge_pressure_kpa: f64,
    pub flow_rate_m3h: f64,
    #[serde(default)]
    pub temperature_c: Option<f64>,
}

impl HydraulicReading {
    /// Gauge pressures may be negative (suction under vacuum); the absolute
    /// check happens in the NPSHa calculation.
    pub fn validate(&self) -> AnalysisResult<()> {
        check_finite("suction_pressure_kpa", self.suction_pressure_kpa)?;
        check_finite("discharge_pressure_kpa", self.discharge_pressure_kpa)?;
        check_non_negative("flow_rate_m3h", self.flow_rate_m3h)?;
        if let Some(t) = self.temperature_c {
            check_finite("temperature_c", t)?;
        }
        Ok(())
    }
}

// ============================================================================
// Vibration
// ============================================================================

/// Overall velocity (mm/s RMS) at the drive-end and non-drive-end bearings on
/// each axis, plus the high-frequency band and envelope demodulation values.
///
/// Field names follow the data-collector export (`DE_H`, `NDE_A`, `HF_5_16kHz`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VibrationReading {
    #[serde(rename = "DE_H", alias = "de_h")]
    pub de_h: f64,
    #[serde(rename = "DE_V", alias = "de_v")]
    pub de_v: f64,
    #[serde(rename = "DE_A", alias = "de_a")]
    pub de_a: f64,
    #[serde(rename = "NDE_H", alias = "nde_h")]
    pub nde_h: f64,
    #[serde(rename = "NDE_V", alias = "nde_v")]
    pub nde_v: f64,
    #[serde(rename = "NDE_A", alias = "nde_a")]
    pub nde_a: f64,
    #[serde(rename = "HF_5_16kHz", alias = "hf_5_16khz", default)]
    pub hf_5_16khz: f64,
    #[serde(rename = "Demodulation", alias = "demodulation", default)]
    pub demodulation: f64,
}

impl VibrationReading {
    /// `(DE, NDE)` amplitude pair for an axis.
    pub fn pair(&self, direction: Direction) -> (f64, f64) {
        match direction {
            Direction::Horizontal => (self.de_h, self.nde_h),
            Direction::Vertical => (self.de_v, self.nde_v),
            Direction::Axial => (self.de_a, self.nde_a),
        }
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        check_non_negative("DE_H", self.de_h)?;
        check_non_negative("DE_V", self.de_v)?;
        check_non_negative("DE_A", self.de_a)?;
        check_non_negative("NDE_H", self.nde_h)?;
        check_non_negative("NDE_V", self.nde_v)?;
        check_non_negative("NDE_A", self.nde_a)?;
        check_non_negative("HF_5_16kHz", self.hf_5_16khz)?;
        check_non_negative("Demodulation", self.demodulation)?;
        Ok(())
    }
}
