//! Pump Diagnosis: condition assessment for fuel transfer pump trains
//!
//! Turns one inspection's readings into a cross-domain health verdict.
//!
//! ## Architecture
//!
//! - **Analyzers**: Electrical, hydraulic, vibration and mechanical assessments
//! - **Aggregator**: Cross-domain roll-up with priority-ordered recommendations
//! - **Physics Engine**: NPSHa, differential head, phase imbalance
//! - **Reference Data**: Equipment tables and thresholds, loaded from TOML
//! - **Batch**: Parallel evaluation of reading sets
//!
//! Every analyzer is a pure function of its reading and an immutable
//! `ReferenceData` passed by reference.

pub mod analyzers;
pub mod batch;
pub mod config;
pub mod error;
pub mod physics_engine;
pub mod types;

// Re-export reference data
pub use config::{ConfigError, ReferenceData};

// Re-export errors
pub use error::{AnalysisError, AnalysisResult};

// Re-export analyzers
pub use analyzers::{
    aggregate_diagnosis, analyze_electrical, analyze_hydraulic, analyze_mechanical,
    analyze_vibration, DiagnosisAggregator, DomainAssessment,
};

// Re-export batch evaluation
pub use batch::{evaluate, evaluate_batch, AssetDiagnosis, ReadingSet};

// Re-export commonly used types
pub use types::{
    Domain, DomainOutcome, DomainState, ElectricalAssessment, ElectricalReading, FoundationType,
    HydraulicAssessment, HydraulicReading, MechanicalAssessment, OverallDiagnosis, ProductType,
    PumpSize, Recommendation, Severity, Status, VibrationAssessment, VibrationReading, Zone,
};
