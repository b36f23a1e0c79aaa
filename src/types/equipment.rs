//! Equipment classification enums: pump size, product, foundation, measurement axis,
//! vibration zone, fault type and mechanical component.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AnalysisError;

/// Trim and lowercase a user-supplied name for case-insensitive matching.
fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

// ============================================================================
// Pump Size
// ============================================================================

/// Pump size class. Selects NPSHr, BEP flow and motor FLA defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PumpSize {
    Small,
    Medium,
    Large,
}

impl PumpSize {
    pub const ALL: [PumpSize; 3] = [PumpSize::Small, PumpSize::Medium, PumpSize::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            PumpSize::Small => "Small",
            PumpSize::Medium => "Medium",
            PumpSize::Large => "Large",
        }
    }
}

impl FromStr for PumpSize {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "small" => Ok(PumpSize::Small),
            "medium" => Ok(PumpSize::Medium),
            "large" => Ok(PumpSize::Large),
            _ => Err(AnalysisError::unknown("pump size", s)),
        }
    }
}

impl std::fmt::Display for PumpSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Product
// ============================================================================

/// Pumped fuel product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    Gasoline,
    Diesel,
    Avtur,
    Naphtha,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::Gasoline,
        ProductType::Diesel,
        ProductType::Avtur,
        ProductType::Naphtha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Gasoline => "Gasoline",
            ProductType::Diesel => "Diesel",
            ProductType::Avtur => "Avtur",
            ProductType::Naphtha => "Naphtha",
        }
    }
}

impl FromStr for ProductType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "gasoline" => Ok(ProductType::Gasoline),
            "diesel" => Ok(ProductType::Diesel),
            "avtur" => Ok(ProductType::Avtur),
            "naphtha" => Ok(ProductType::Naphtha),
            _ => Err(AnalysisError::unknown("product type", s)),
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Foundation
// ============================================================================

/// Machine support type. Flexible foundations get looser ISO 10816-3 limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoundationType {
    Rigid,
    Flexible,
}

impl FoundationType {
    pub fn as_str(self) -> &'static str {
        match self {
            FoundationType::Rigid => "rigid",
            FoundationType::Flexible => "flexible",
        }
    }
}

impl FromStr for FoundationType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "rigid" => Ok(FoundationType::Rigid),
            "flexible" => Ok(FoundationType::Flexible),
            _ => Err(AnalysisError::unknown("foundation type", s)),
        }
    }
}

impl std::fmt::Display for FoundationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Measurement Direction
// ============================================================================

/// Vibration measurement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "H")]
    Horizontal,
    #[serde(rename = "V")]
    Vertical,
    #[serde(rename = "A")]
    Axial,
}

impl Direction {
    /// Evaluation order. Also the tie-break priority for the dominant axis.
    pub const ALL: [Direction; 3] = [Direction::Horizontal, Direction::Vertical, Direction::Axial];

    pub fn code(self) -> &'static str {
        match self {
            Direction::Horizontal => "H",
            Direction::Vertical => "V",
            Direction::Axial => "A",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// ISO 10816-3 Zone
// ============================================================================

/// ISO 10816-3 evaluation zone. Ordered A (good) < B < C < D (damaging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    A,
    B,
    C,
    D,
}

/// Static text attached to each zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneDescription {
    pub name: &'static str,
    pub color: &'static str,
    pub recommendation: &'static str,
}

impl Zone {
    pub fn describe(self) -> ZoneDescription {
        match self {
            Zone::A => ZoneDescription {
                name: "Good",
                color: "green",
                recommendation: "Vibration typical of newly commissioned machines - continue normal monitoring",
            },
            Zone::B => ZoneDescription {
                name: "Satisfactory",
                color: "yellow",
                recommendation: "Acceptable for unrestricted long-term operation - keep routine monitoring interval",
            },
            Zone::C => ZoneDescription {
                name: "Unsatisfactory",
                color: "orange",
                recommendation: "Not suitable for continuous long-term operation - plan corrective maintenance",
            },
            Zone::D => ZoneDescription {
                name: "Unacceptable",
                color: "red",
                recommendation: "Vibration severe enough to cause damage - stop and repair as soon as possible",
            },
        }
    }

    /// Zones C and D call for corrective action.
    pub fn needs_action(self) -> bool {
        self >= Zone::C
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Zone::A => "A",
            Zone::B => "B",
            Zone::C => "C",
            Zone::D => "D",
        };
        write!(f, "{letter}")
    }
}

// ============================================================================
// Fault Type
// ============================================================================

/// Mechanical fault attributed from the dominant vibration axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultType {
    Unbalance,
    Looseness,
    Misalignment,
}

impl FaultType {
    pub fn label(self) -> &'static str {
        match self {
            FaultType::Unbalance => "Unbalance",
            FaultType::Looseness => "Mechanical Looseness / Foundation Issue",
            FaultType::Misalignment => "Misalignment / Coupling Issue",
        }
    }

    /// Remedial action for the fault.
    pub fn remedy(self) -> &'static str {
        match self {
            FaultType::Unbalance => "perform dynamic balancing",
            FaultType::Looseness => "check foundation bolts & grouting",
            FaultType::Misalignment => "perform laser alignment",
        }
    }
}

impl std::fmt::Display for FaultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Mechanical Component
// ============================================================================

/// Unit of the pump train a vibration reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    /// Motor
    Driver,
    /// Pump
    Driven,
}

impl Component {
    pub fn label(self) -> &'static str {
        match self {
            Component::Driver => "Motor (Driver)",
            Component::Driven => "Pump (Driven)",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
