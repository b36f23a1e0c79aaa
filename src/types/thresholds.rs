//! Status tiers and the monotone threshold table used by every analyzer
//!
//! Each engineering standard (imbalance bands, FLA load bands, BEP flow bands,
//! NPSH margin bands, ISO 10816-3 zones, fault confidence) is expressed as an
//! ordered list of `(upper bound, tier)` pairs plus a tier for anything above the
//! last bound. Adjusting a standard is a data change in `ReferenceData`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Threshold Table
// ============================================================================

/// Upper edge of a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// `value < limit` falls in the band.
    Below(f64),
    /// `value <= limit` falls in the band. A reading exactly at the limit stays in
    /// the lower band.
    AtMost(f64),
}

impl Bound {
    fn limit(self) -> f64 {
        match self {
            Bound::Below(v) | Bound::AtMost(v) => v,
        }
    }

    fn admits(self, value: f64) -> bool {
        match self {
            Bound::Below(limit) => value < limit,
            Bound::AtMost(limit) => value <= limit,
        }
    }
}

/// Ordered `(bound, tier)` bands evaluated by a single monotone lookup.
///
/// Bands must be added with non-decreasing limits. NaN is admitted by no band
/// and lands in the `above` tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable<T> {
    bands: Vec<(Bound, T)>,
    above: T,
}

impl<T: Copy> ThresholdTable<T> {
    /// Start a table whose only tier is `above`.
    pub fn new(above: T) -> Self {
        Self {
            bands: Vec::new(),
            above,
        }
    }

    /// Append a band. Limits must not decrease.
    #[must_use]
    pub fn band(mut self, bound: Bound, tier: T) -> Self {
        debug_assert!(
            self.bands
                .last()
                .map_or(true, |(prev, _)| prev.limit() <= bound.limit()),
            "threshold bands must be added in non-decreasing order"
        );
        self.bands.push((bound, tier));
        self
    }

    /// Tier of the first band admitting `value`, or the `above` tier.
    pub fn classify(&self, value: f64) -> T {
        self.bands
            .iter()
            .find(|(bound, _)| bound.admits(value))
            .map_or(self.above, |(_, tier)| *tier)
    }
}

// ============================================================================
// Domain Status
// ============================================================================

/// Roll-up status shared by all domains. Ordered NORMAL < WARNING < CRITICAL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Normal => write!(f, "NORMAL"),
            Status::Warning => write!(f, "WARNING"),
            Status::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ============================================================================
// Electrical Tiers
// ============================================================================

/// Voltage or current imbalance tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImbalanceTier {
    Normal,
    Warning,
    Alarm,
}

impl ImbalanceTier {
    pub fn status(self) -> Status {
        match self {
            ImbalanceTier::Normal => Status::Normal,
            ImbalanceTier::Warning => Status::Warning,
            ImbalanceTier::Alarm => Status::Critical,
        }
    }
}

impl std::fmt::Display for ImbalanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImbalanceTier::Normal => write!(f, "NORMAL"),
            ImbalanceTier::Warning => write!(f, "WARNING"),
            ImbalanceTier::Alarm => write!(f, "ALARM"),
        }
    }
}

/// Motor load relative to full-load amps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadStatus {
    Underload,
    Normal,
    OverloadWarning,
    OverloadAlarm,
}

impl LoadStatus {
    /// Underload is a warning too: the pump is likely running far below BEP.
    pub fn status(self) -> Status {
        match self {
            LoadStatus::Normal => Status::Normal,
            LoadStatus::Underload | LoadStatus::OverloadWarning => Status::Warning,
            LoadStatus::OverloadAlarm => Status::Critical,
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatus::Underload => write!(f, "UNDERLOAD"),
            LoadStatus::Normal => write!(f, "NORMAL"),
            LoadStatus::OverloadWarning => write!(f, "OVERLOAD_WARNING"),
            LoadStatus::OverloadAlarm => write!(f, "OVERLOAD_ALARM"),
        }
    }
}

// ============================================================================
// Hydraulic Tiers
// ============================================================================

/// Operating point relative to the best efficiency point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowStatus {
    RecirculationRisk,
    Normal,
    OverloadCavitationRisk,
}

impl std::fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowStatus::RecirculationRisk => write!(f, "RECIRCULATION_RISK"),
            FlowStatus::Normal => write!(f, "NORMAL"),
            FlowStatus::OverloadCavitationRisk => write!(f, "OVERLOAD_CAVITATION_RISK"),
        }
    }
}

/// Three-level risk used for NPSH cavitation risk and fault confidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}
