//! Diagnosis Aggregator - cross-domain roll-up
//!
//! Combines the per-domain assessments of one asset into an `OverallDiagnosis`.
//!
//! ## Roll-up Rules
//!
//! - Overall status is the most severe status among evaluated domains
//! - The primary domain is the most severe one; ties go to the earlier domain
//!   in the configured priority order
//! - Recommendations of triggered (non-NORMAL) domains are grouped by domain in
//!   priority order and de-duplicated by message text
//! - A domain that failed to evaluate adds a warning naming it and never
//!   blocks the others
//! - Domains without an analyzer (THERMAL) are reported as `no_data`
//!
//! The result depends only on the set of assessments, never on the order in
//! which they are supplied.

use std::collections::HashSet;

use super::DomainAssessment;
use crate::config::ReferenceData;
use crate::error::AnalysisError;
use crate::types::{
    Domain, DomainOutcome, DomainReport, DomainState, ElectricalAssessment, HydraulicAssessment,
    MechanicalAssessment, OverallDiagnosis, Recommendation, RecommendationKey, Status,
};
use tracing::{debug, info};

// ============================================================================
// Roll-up
// ============================================================================

/// Status, primary domain and ranked recommendations of a set of domains.
#[derive(Debug, Clone, PartialEq)]
pub struct RollUp {
    pub overall_status: Status,
    pub primary_domain: Option<Domain>,
    pub recommendations: Vec<Recommendation>,
}

/// Roll up evaluated domain assessments, independent of their order.
pub fn roll_up(assessments: &[&dyn DomainAssessment], reference: &ReferenceData) -> RollUp {
    roll_up_with_failures(assessments, &[], reference)
}

fn roll_up_with_failures(
    assessments: &[&dyn DomainAssessment],
    failures: &[(Domain, &AnalysisError)],
    reference: &ReferenceData,
) -> RollUp {
    let mut ranked: Vec<&dyn DomainAssessment> = assessments.to_vec();
    ranked.sort_by_key(|a| reference.priority_index(a.domain()));

    let overall_status = ranked
        .iter()
        .map(|a| a.status())
        .max()
        .unwrap_or_default();

    let primary_domain = if overall_status == Status::Normal {
        None
    } else {
        ranked
            .iter()
            .find(|a| a.status() == overall_status)
            .map(|a| a.domain())
    };

    // (priority, recommendations) per triggered or failed domain
    let mut groups: Vec<(usize, Vec<Recommendation>)> = ranked
        .iter()
        .filter(|a| a.status() != Status::Normal)
        .map(|a| (reference.priority_index(a.domain()), a.recommendations().to_vec()))
        .collect();
    groups.extend(failures.iter().map(|(domain, error)| {
        (
            reference.priority_index(*domain),
            vec![Recommendation::warning(
                *domain,
                RecommendationKey::DomainUnavailable,
                format!("{} condition could not be evaluated: {}", domain.label(), error),
            )],
        )
    }));
    groups.sort_by_key(|(priority, _)| *priority);

    let mut seen = HashSet::new();
    let mut recommendations: Vec<Recommendation> = groups
        .into_iter()
        .flat_map(|(_, recs)| recs)
        .filter(|r| seen.insert(r.message.clone()))
        .collect();

    if recommendations.is_empty() {
        if let Some(first) = ranked.first() {
            recommendations.push(Recommendation::info(
                first.domain(),
                RecommendationKey::AllDomainsNormal,
                "All evaluated domains within normal limits - continue routine monitoring",
            ));
        }
    }

    RollUp {
        overall_status,
        primary_domain,
        recommendations,
    }
}

// ============================================================================
// Aggregator
// ============================================================================

/// Builds the overall diagnosis of one asset against a fixed reference.
pub struct DiagnosisAggregator<'a> {
    reference: &'a ReferenceData,
}

impl<'a> DiagnosisAggregator<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Domains in report order: the configured priority list, then any
    /// domain it omits.
    fn report_order(&self) -> Vec<Domain> {
        let mut seen = HashSet::new();
        self.reference
            .diagnosis
            .priority
            .iter()
            .chain(Domain::ALL.iter())
            .copied()
            .filter(|domain| seen.insert(*domain))
            .collect()
    }

    pub fn aggregate(
        &self,
        electrical: DomainOutcome<ElectricalAssessment>,
        hydraulic: DomainOutcome<HydraulicAssessment>,
        mechanical: DomainOutcome<MechanicalAssessment>,
    ) -> OverallDiagnosis {
        let mut evaluated: Vec<&dyn DomainAssessment> = Vec::new();
        let mut failures: Vec<(Domain, &AnalysisError)> = Vec::new();

        if let Some(a) = electrical.as_evaluated() {
            evaluated.push(a);
        }
        if let Some(a) = hydraulic.as_evaluated() {
            evaluated.push(a);
        }
        if let Some(a) = mechanical.as_evaluated() {
            evaluated.push(a);
        }
        for (domain, error) in [
            (Domain::Electrical, failure(&electrical)),
            (Domain::Hydraulic, failure(&hydraulic)),
            (Domain::Mechanical, failure(&mechanical)),
        ] {
            if let Some(e) = error {
                failures.push((domain, e));
            }
        }

        let rolled = roll_up_with_failures(&evaluated, &failures, self.reference);

        let domains: Vec<DomainReport> = self
            .report_order()
            .into_iter()
            .map(|domain| DomainReport {
                domain,
                state: match domain {
                    Domain::Electrical => state_of(&electrical),
                    Domain::Hydraulic => state_of(&hydraulic),
                    Domain::Mechanical => state_of(&mechanical),
                    Domain::Thermal => DomainState::NoData,
                },
            })
            .collect();

        let complete = failures.is_empty() && evaluated.len() == Domain::ANALYZED.len();

        for (domain, error) in &failures {
            debug!(domain = %domain, error = %error, "Domain excluded from roll-up");
        }

        info!(
            status = %rolled.overall_status,
            primary = ?rolled.primary_domain,
            evaluated = evaluated.len(),
            failed = failures.len(),
            recommendations = rolled.recommendations.len(),
            "Diagnosis aggregated"
        );

        OverallDiagnosis {
            overall_status: rolled.overall_status,
            primary_domain: rolled.primary_domain,
            domains,
            recommendations: rolled.recommendations,
            complete,
            electrical: electrical.into_evaluated(),
            hydraulic: hydraulic.into_evaluated(),
            mechanical: mechanical.into_evaluated(),
        }
    }
}

fn failure<T>(outcome: &DomainOutcome<T>) -> Option<&AnalysisError> {
    match outcome {
        DomainOutcome::Failed(e) => Some(e),
        _ => None,
    }
}

fn state_of<T: DomainAssessment>(outcome: &DomainOutcome<T>) -> DomainState {
    match outcome {
        DomainOutcome::Evaluated(a) => DomainState::Evaluated { status: a.status() },
        DomainOutcome::Failed(e) => DomainState::Failed { error: e.clone() },
        DomainOutcome::NotSupplied => DomainState::NotSupplied,
    }
}

/// Roll up one asset's domain outcomes into the overall diagnosis.
pub fn aggregate_diagnosis(
    electrical: DomainOutcome<ElectricalAssessment>,
    hydraulic: DomainOutcome<HydraulicAssessment>,
    mechanical: DomainOutcome<MechanicalAssessment>,
    reference: &ReferenceData,
) -> OverallDiagnosis {
    DiagnosisAggregator::new(reference).aggregate(electrical, hydraulic, mechanical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    /// Minimal domain verdict for roll-up tests.
    struct Stub {
        domain: Domain,
        status: Status,
        recommendations: Vec<Recommendation>,
    }

    impl Stub {
        fn new(domain: Domain, status: Status, messages: &[&str]) -> Self {
            Self {
                domain,
                status,
                recommendations: messages
                    .iter()
                    .map(|m| Recommendation::warning(domain, RecommendationKey::DomainUnavailable, *m))
                    .collect(),
            }
        }
    }

    impl DomainAssessment for Stub {
        fn domain(&self) -> Domain {
            self.domain
        }
        fn status(&self) -> Status {
            self.status
        }
        fn recommendations(&self) -> &[Recommendation] {
            &self.recommendations
        }
    }

    #[test]
    fn test_most_severe_domain_wins() {
        let reference = ReferenceData::default();
        let e = Stub::new(Domain::Electrical, Status::Critical, &["e1"]);
        let h = Stub::new(Domain::Hydraulic, Status::Warning, &["h1"]);
        let r = roll_up(&[&e, &h], &reference);
        assert_eq!(r.overall_status, Status::Critical);
        assert_eq!(r.primary_domain, Some(Domain::Electrical));
    }

    #[test]
    fn test_tie_goes_to_priority_order() {
        let reference = ReferenceData::default();
        let e = Stub::new(Domain::Electrical, Status::Warning, &["e1"]);
        let m = Stub::new(Domain::Mechanical, Status::Warning, &["m1"]);
        let h = Stub::new(Domain::Hydraulic, Status::Warning, &["h1"]);
        let r = roll_up(&[&m, &e, &h], &reference);
        assert_eq!(r.primary_domain, Some(Domain::Hydraulic));
        let messages: Vec<_> = r.recommendations.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["h1", "e1", "m1"]);
    }

    #[test]
    fn test_custom_priority_changes_tie_break() {
        let mut reference = ReferenceData::default();
        reference.diagnosis.priority = vec![Domain::Mechanical, Domain::Electrical, Domain::Hydraulic];
        let e = Stub::new(Domain::Electrical, Status::Warning, &["e1"]);
        let h = Stub::new(Domain::Hydraulic, Status::Warning, &["h1"]);
        let r = roll_up(&[&h, &e], &reference);
        assert_eq!(r.primary_domain, Some(Domain::Electrical));
    }

    #[test]
    fn test_order_independent() {
        let reference = ReferenceData::default();
        let e = Stub::new(Domain::Electrical, Status::Warning, &["e1", "shared"]);
        let h = Stub::new(Domain::Hydraulic, Status::Critical, &["h1"]);
        let m = Stub::new(Domain::Mechanical, Status::Warning, &["shared", "m1"]);
        let a = roll_up(&[&e, &h, &m], &reference);
        let b = roll_up(&[&m, &e, &h], &reference);
        let c = roll_up(&[&h, &m, &e], &reference);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_duplicate_messages_removed_first_kept() {
        let reference = ReferenceData::default();
        let e = Stub::new(Domain::Electrical, Status::Warning, &["shared", "e1"]);
        let m = Stub::new(Domain::Mechanical, Status::Warning, &["m1", "shared"]);
        let r = roll_up(&[&e, &m], &reference);
        let messages: Vec<_> = r.recommendations.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["shared", "e1", "m1"]);
        assert_eq!(r.recommendations[0].domain, Domain::Electrical);
    }

    #[test]
    fn test_normal_domains_contribute_no_recommendations() {
        let reference = ReferenceData::default();
        let e = Stub::new(Domain::Electrical, Status::Normal, &["fine"]);
        let h = Stub::new(Domain::Hydraulic, Status::Warning, &["h1"]);
        let r = roll_up(&[&e, &h], &reference);
        assert_eq!(r.recommendations.len(), 1);
        assert_eq!(r.recommendations[0].message, "h1");
    }

    #[test]
    fn test_all_normal_single_confirmation() {
        let reference = ReferenceData::default();
        let e = Stub::new(Domain::Electrical, Status::Normal, &["fine"]);
        let m = Stub::new(Domain::Mechanical, Status::Normal, &["fine too"]);
        let r = roll_up(&[&m, &e], &reference);
        assert_eq!(r.overall_status, Status::Normal);
        assert_eq!(r.primary_domain, None);
        assert_eq!(r.recommendations.len(), 1);
        assert_eq!(r.recommendations[0].key, RecommendationKey::AllDomainsNormal);
        assert_eq!(r.recommendations[0].severity, Severity::Info);
        assert_eq!(r.recommendations[0].domain, Domain::Electrical);
    }

    #[test]
    fn test_failed_domain_reported_without_changing_status() {
        let reference = ReferenceData::default();
        let d = aggregate_diagnosis(
            DomainOutcome::Failed(AnalysisError::invalid("fla_a", 0.0, "must be greater than zero (used as divisor)")),
            DomainOutcome::NotSupplied,
            DomainOutcome::NotSupplied,
            &reference,
        );
        assert_eq!(d.overall_status, Status::Normal);
        assert!(!d.complete);
        assert_eq!(d.recommendations.len(), 1);
        assert_eq!(d.recommendations[0].key, RecommendationKey::DomainUnavailable);
        assert_eq!(d.recommendations[0].severity, Severity::Warning);
        assert!(matches!(
            d.domain_state(Domain::Electrical),
            Some(DomainState::Failed { .. })
        ));
        assert_eq!(d.domain_state(Domain::Hydraulic), Some(&DomainState::NotSupplied));
    }

    #[test]
    fn test_thermal_reported_as_no_data_in_priority_position() {
        let reference = ReferenceData::default();
        let d = aggregate_diagnosis(
            DomainOutcome::NotSupplied,
            DomainOutcome::NotSupplied,
            DomainOutcome::NotSupplied,
            &reference,
        );
        let order: Vec<_> = d.domains.iter().map(|r| r.domain).collect();
        assert_eq!(order, Domain::ALL.to_vec());
        assert_eq!(d.domain_state(Domain::Thermal), Some(&DomainState::NoData));
        assert!(d.recommendations.is_empty());
    }

    #[test]
    fn test_report_order_drops_repeated_domains() {
        let mut reference = ReferenceData::default();
        reference.diagnosis.priority = vec![
            Domain::Mechanical,
            Domain::Electrical,
            Domain::Mechanical,
            Domain::Hydraulic,
        ];
        let order = DiagnosisAggregator::new(&reference).report_order();
        assert_eq!(
            order,
            vec![Domain::Mechanical, Domain::Electrical, Domain::Hydraulic, Domain::Thermal]
        );
    }

    #[test]
    fn test_priority_without_thermal_still_reports_it_last() {
        let mut reference = ReferenceData::default();
        reference.diagnosis.priority = vec![Domain::Electrical, Domain::Hydraulic, Domain::Mechanical];
        let order: Vec<_> = DiagnosisAggregator::new(&reference).report_order();
        assert_eq!(
            order,
            vec![Domain::Electrical, Domain::Hydraulic, Domain::Mechanical, Domain::Thermal]
        );
    }
}
