//! Domain analyzers and the cross-domain aggregator
//!
//! Each analyzer turns one domain's reading into a typed assessment, or fails
//! atomically with an `AnalysisError`. The aggregator rolls evaluated domains
//! into a single `OverallDiagnosis`.
//!
//! ## Analyzers
//!
//! 1. **Electrical** - phase imbalance and motor load against FLA
//! 2. **Hydraulic** - NPSHa margin, differential head, BEP flow ratio
//! 3. **Vibration** - ISO 10816-3 zones, fault attribution, HF screening
//! 4. **Mechanical** - driver + driven vibration combined per pump train

pub mod aggregator;
pub mod electrical;
pub mod hydraulic;
pub mod mechanical;
pub mod vibration;

pub use aggregator::{aggregate_diagnosis, roll_up, DiagnosisAggregator, RollUp};
pub use electrical::analyze_electrical;
pub use hydraulic::{analyze_hydraulic, classify_cavitation};
pub use mechanical::analyze_mechanical;
pub use vibration::{analyze_hf, analyze_vibration, calculate_averages, classify_zones, identify_faults};

use crate::types::{
    Domain, ElectricalAssessment, HydraulicAssessment, MechanicalAssessment, Recommendation,
    Status,
};

/// Common view of a domain verdict used by the aggregator.
pub trait DomainAssessment: Send + Sync {
    fn domain(&self) -> Domain;

    fn status(&self) -> Status;

    fn recommendations(&self) -> &[Recommendation];
}

impl DomainAssessment for ElectricalAssessment {
    fn domain(&self) -> Domain {
        Domain::Electrical
    }

    fn status(&self) -> Status {
        self.overall_status
    }

    fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }
}

impl DomainAssessment for HydraulicAssessment {
    fn domain(&self) -> Domain {
        Domain::Hydraulic
    }

    fn status(&self) -> Status {
        self.status
    }

    fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }
}

impl DomainAssessment for MechanicalAssessment {
    fn domain(&self) -> Domain {
        Domain::Mechanical
    }

    fn status(&self) -> Status {
        self.status
    }

    fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }
}
