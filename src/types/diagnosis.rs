//! Cross-domain diagnosis record

use serde::Serialize;

use super::{
    Domain, ElectricalAssessment, HydraulicAssessment, MechanicalAssessment, Recommendation,
    Status,
};
use crate::error::AnalysisError;

/// Outcome of one domain as supplied to the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainOutcome<T> {
    Evaluated(T),
    Failed(AnalysisError),
    /// The reading set had no section for this domain.
    NotSupplied,
}

impl<T> DomainOutcome<T> {
    pub fn as_evaluated(&self) -> Option<&T> {
        match self {
            DomainOutcome::Evaluated(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_evaluated(self) -> Option<T> {
        match self {
            DomainOutcome::Evaluated(a) => Some(a),
            _ => None,
        }
    }
}

impl<T> From<Result<T, AnalysisError>> for DomainOutcome<T> {
    fn from(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(a) => DomainOutcome::Evaluated(a),
            Err(e) => DomainOutcome::Failed(e),
        }
    }
}

/// What the aggregator knows about a domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DomainState {
    Evaluated { status: Status },
    Failed { error: AnalysisError },
    NotSupplied,
    /// Declared in the priority order without an analyzer behind it.
    NoData,
}

/// Per-domain line of the diagnosis, listed in priority order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainReport {
    pub domain: Domain,
    #[serde(flatten)]
    pub state: DomainState,
}

/// Final cross-domain verdict for one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallDiagnosis {
    pub overall_status: Status,
    /// Most severe domain; earlier priority wins ties. `None` when all normal.
    pub primary_domain: Option<Domain>,
    pub domains: Vec<DomainReport>,
    pub recommendations: Vec<Recommendation>,
    /// True when every analyzed domain was evaluated.
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electrical: Option<ElectricalAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydraulic: Option<HydraulicAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanical: Option<MechanicalAssessment>,
}

impl OverallDiagnosis {
    pub fn domain_state(&self, domain: Domain) -> Option<&DomainState> {
        self.domains
            .iter()
            .find(|r| r.domain == domain)
            .map(|r| &r.state)
    }
}
