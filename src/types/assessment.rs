//! Electrical and hydraulic assessment records

use serde::Serialize;

use super::{
    FlowStatus, ImbalanceTier, LoadStatus, Recommendation, RiskLevel, Status,
};

// ============================================================================
// Electrical
// ============================================================================

/// One measured quantity across the three phases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSummary {
    pub l1: f64,
    pub l2: f64,
    pub l3: f64,
    /// Mean of the three phases, 1 decimal.
    pub average: f64,
    /// Max deviation from the mean as % of the mean, 2 decimals.
    pub imbalance_pct: f64,
    pub status: ImbalanceTier,
}

/// Motor load relative to rated full-load amps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub fla: f64,
    /// Average current as % of FLA, 1 decimal.
    pub percentage: f64,
    pub status: LoadStatus,
}

/// Electrical verdict for one motor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricalAssessment {
    pub voltage: PhaseSummary,
    pub current: PhaseSummary,
    pub load: LoadSummary,
    pub overall_status: Status,
    pub recommendations: Vec<Recommendation>,
    pub has_issue: bool,
}

// ============================================================================
// Hydraulic
// ============================================================================

/// Hydraulic verdict for one pump.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydraulicAssessment {
    /// NPSH available (m), 2 decimals.
    pub npsha: f64,
    /// NPSH required from the pump size profile (m).
    pub npshr: f64,
    /// `npsha - (npshr + safety margin)` (m), 2 decimals.
    pub npsha_margin: f64,
    pub cavitation_risk: RiskLevel,
    /// Differential head (m), 2 decimals.
    pub head: f64,
    pub flow_rate: f64,
    pub bep_flow: f64,
    /// `flow_rate / bep_flow`, 2 decimals.
    pub flow_ratio: f64,
    pub flow_status: FlowStatus,
    /// Product temperature the NPSHa was computed at (°C).
    pub temperature_c: f64,
    pub status: Status,
    pub recommendations: Vec<Recommendation>,
    pub has_issue: bool,
}
