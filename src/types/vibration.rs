//! Vibration and mechanical assessment records

use serde::Serialize;

use super::{Component, Direction, FaultType, Recommendation, RiskLevel, Status, Zone};

/// Per-axis means of DE and NDE amplitudes (mm/s RMS).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VibrationAverages {
    #[serde(rename = "Avr_H")]
    pub avr_h: f64,
    #[serde(rename = "Avr_V")]
    pub avr_v: f64,
    #[serde(rename = "Avr_A")]
    pub avr_a: f64,
    /// Quick-look summary only; zones are classified per axis.
    #[serde(rename = "Overall_Max")]
    pub overall_max: f64,
}

impl VibrationAverages {
    pub fn get(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.avr_h,
            Direction::Vertical => self.avr_v,
            Direction::Axial => self.avr_a,
        }
    }
}

/// ISO 10816-3 zone of one axis with its description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneClassification {
    pub zone: Zone,
    pub name: &'static str,
    pub color: &'static str,
    pub recommendation: &'static str,
}

impl From<Zone> for ZoneClassification {
    fn from(zone: Zone) -> Self {
        let d = zone.describe();
        Self {
            zone,
            name: d.name,
            color: d.color,
            recommendation: d.recommendation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisZones {
    #[serde(rename = "Zone_H")]
    pub horizontal: ZoneClassification,
    #[serde(rename = "Zone_V")]
    pub vertical: ZoneClassification,
    #[serde(rename = "Zone_A")]
    pub axial: ZoneClassification,
}

impl AxisZones {
    pub fn get(&self, direction: Direction) -> &ZoneClassification {
        match direction {
            Direction::Horizontal => &self.horizontal,
            Direction::Vertical => &self.vertical,
            Direction::Axial => &self.axial,
        }
    }

    /// Worst zone over the three axes.
    pub fn worst(&self) -> Zone {
        Direction::ALL
            .iter()
            .map(|d| self.get(*d).zone)
            .max()
            .unwrap_or(Zone::A)
    }
}

/// Fault mapped to one axis with a confidence derived from its amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionFault {
    #[serde(rename = "type")]
    pub fault: FaultType,
    pub confidence: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultIndicator {
    pub primary_fault: FaultType,
    pub primary_direction: Direction,
    #[serde(rename = "fault_H")]
    pub horizontal: DirectionFault,
    #[serde(rename = "fault_V")]
    pub vertical: DirectionFault,
    #[serde(rename = "fault_A")]
    pub axial: DirectionFault,
}

/// High-frequency band and envelope demodulation screening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HfAnalysis {
    pub hf_value: f64,
    pub demod_value: f64,
    /// Product-dependent HF limit that was applied.
    pub cavitation_threshold: f64,
    pub cavitation_risk: bool,
    pub bearing_defect_risk: bool,
    pub recommendation: Recommendation,
}

impl HfAnalysis {
    pub fn has_finding(&self) -> bool {
        self.cavitation_risk || self.bearing_defect_risk
    }
}

/// Vibration verdict for one unit (motor or pump).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VibrationAssessment {
    pub averages: VibrationAverages,
    pub zones: AxisZones,
    pub faults: FaultIndicator,
    pub hf_analysis: HfAnalysis,
    pub overall_zone: Zone,
    pub severity: &'static str,
    pub recommendation: &'static str,
}

/// Combined driver + driven verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MechanicalAssessment {
    pub driver: VibrationAssessment,
    pub driven: VibrationAssessment,
    pub primary_component: Component,
    pub overall_zone: Zone,
    /// Severity name of the dominant component's worst zone.
    pub overall_severity: &'static str,
    pub primary_fault: FaultType,
    pub status: Status,
    pub recommendations: Vec<Recommendation>,
    pub has_issue: bool,
}
