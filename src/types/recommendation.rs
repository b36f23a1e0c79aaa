//! Structured recommendation records
//!
//! Analyzers emit plain records; decoration (icons, colors, localisation) is left
//! to whatever renders the diagnosis.

use serde::{Deserialize, Serialize};

/// Diagnostic domain. Also the vocabulary of the diagnosis priority list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    Hydraulic,
    Electrical,
    Mechanical,
    /// Declared in the priority order, but no analyzer produces it yet.
    Thermal,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Hydraulic,
        Domain::Electrical,
        Domain::Mechanical,
        Domain::Thermal,
    ];

    /// Domains backed by an analyzer.
    pub const ANALYZED: [Domain; 3] = [Domain::Hydraulic, Domain::Electrical, Domain::Mechanical];

    pub fn label(self) -> &'static str {
        match self {
            Domain::Hydraulic => "Hydraulic",
            Domain::Electrical => "Electrical",
            Domain::Mechanical => "Mechanical",
            Domain::Thermal => "Thermal",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Hydraulic => write!(f, "HYDRAULIC"),
            Domain::Electrical => write!(f, "ELECTRICAL"),
            Domain::Mechanical => write!(f, "MECHANICAL"),
            Domain::Thermal => write!(f, "THERMAL"),
        }
    }
}

/// How urgent a recommendation is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Stable identifier of a recommendation, independent of its wording.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKey {
    // Electrical
    VoltageImbalance,
    CurrentImbalance,
    MotorOverload,
    MotorOverloadCritical,
    MotorUnderload,
    ElectricalNormal,
    // Hydraulic
    NpshInsufficient,
    NpshLowMargin,
    FlowRecirculation,
    FlowOverload,
    HydraulicNormal,
    // Vibration / mechanical
    MotorVibrationZone,
    PumpVibrationZone,
    DynamicBalancing,
    FoundationCheck,
    LaserAlignment,
    HfCavitation,
    BearingDefect,
    HfNormal,
    // Diagnosis
    DomainUnavailable,
    AllDomainsNormal,
}

/// One advisory line of a diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub domain: Domain,
    pub severity: Severity,
    pub key: RecommendationKey,
    pub message: String,
}

impl Recommendation {
    pub fn new(
        domain: Domain,
        severity: Severity,
        key: RecommendationKey,
        message: impl Into<String>,
    ) -> Self {
        Self {
            domain,
            severity,
            key,
            message: message.into(),
        }
    }

    pub fn info(domain: Domain, key: RecommendationKey, message: impl Into<String>) -> Self {
        Self::new(domain, Severity::Info, key, message)
    }

    pub fn warning(domain: Domain, key: RecommendationKey, message: impl Into<String>) -> Self {
        Self::new(domain, Severity::Warning, key, message)
    }

    pub fn critical(domain: Domain, key: RecommendationKey, message: impl Into<String>) -> Self {
        Self::new(domain, Severity::Critical, key, message)
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.domain, self.message)
    }
}
