//! Batch evaluation of reading sets
//!
//! A reading set is everything collected for one asset in one inspection: the
//! equipment names and whichever domain sections were measured. Sets are
//! independent, so a batch is evaluated in parallel with rayon and results
//! keep input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analyzers::{aggregate_diagnosis, analyze_electrical, analyze_hydraulic, analyze_mechanical};
use crate::config::ReferenceData;
use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{
    Domain, DomainOutcome, ElectricalReading, FoundationType, HydraulicReading, OverallDiagnosis,
    ProductType, PumpSize, VibrationReading,
};

/// Readings of one asset as exported by the data collector.
///
/// Equipment names are matched case-insensitively. Omitted names fall back to
/// a Medium pump on Diesel with a rigid foundation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSet {
    #[serde(default)]
    pub asset_id: String,

    #[serde(default = "default_pump_size")]
    pub pump_size: String,

    #[serde(default = "default_product_type")]
    pub product_type: String,

    #[serde(default = "default_foundation_type")]
    pub foundation_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical: Option<ElectricalReading>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydraulic: Option<HydraulicReading>,

    /// Motor vibration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<VibrationReading>,

    /// Pump vibration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driven: Option<VibrationReading>,
}

fn default_pump_size() -> String {
    PumpSize::Medium.as_str().to_string()
}

fn default_product_type() -> String {
    ProductType::Diesel.as_str().to_string()
}

fn default_foundation_type() -> String {
    FoundationType::Rigid.as_str().to_string()
}

/// Diagnosis of one reading set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetDiagnosis {
    pub asset_id: String,
    #[serde(flatten)]
    pub diagnosis: OverallDiagnosis,
}

/// Evaluate every supplied domain of one reading set and aggregate.
///
/// An unknown equipment name fails only the domains that need it.
pub fn evaluate(set: &ReadingSet, reference: &ReferenceData) -> AssetDiagnosis {
    let pump_size: AnalysisResult<PumpSize> = set.pump_size.parse();
    let product: AnalysisResult<ProductType> = set.product_type.parse();
    let foundation: AnalysisResult<FoundationType> = set.foundation_type.parse();

    let electrical = match &set.electrical {
        None => DomainOutcome::NotSupplied,
        Some(reading) => pump_size
            .clone()
            .and_then(|size| analyze_electrical(reading, size, reference))
            .into(),
    };

    let hydraulic = match &set.hydraulic {
        None => DomainOutcome::NotSupplied,
        Some(reading) => {
            let run = || -> AnalysisResult<_> {
                analyze_hydraulic(reading, product.clone()?, pump_size.clone()?, reference)
            };
            run().into()
        }
    };

    let mechanical = match (&set.driver, &set.driven) {
        (None, None) => DomainOutcome::NotSupplied,
        (Some(_), None) => DomainOutcome::Failed(AnalysisError::Incomplete {
            missing: "driven",
            present: "driver",
        }),
        (None, Some(_)) => DomainOutcome::Failed(AnalysisError::Incomplete {
            missing: "driver",
            present: "driven",
        }),
        (Some(driver), Some(driven)) => {
            let run = || -> AnalysisResult<_> {
                analyze_mechanical(driver, driven, foundation.clone()?, product.clone()?, reference)
            };
            run().into()
        }
    };

    log_rejected(&set.asset_id, Domain::Electrical, &electrical);
    log_rejected(&set.asset_id, Domain::Hydraulic, &hydraulic);
    log_rejected(&set.asset_id, Domain::Mechanical, &mechanical);

    AssetDiagnosis {
        asset_id: set.asset_id.clone(),
        diagnosis: aggregate_diagnosis(electrical, hydraulic, mechanical, reference),
    }
}

fn log_rejected<T>(asset_id: &str, domain: Domain, outcome: &DomainOutcome<T>) {
    if let DomainOutcome::Failed(error) = outcome {
        warn!(asset = %asset_id, domain = %domain, kind = error.kind(), error = %error, "Reading rejected");
    }
}

/// Evaluate reading sets in parallel. Output order matches input order.
pub fn evaluate_batch(sets: &[ReadingSet], reference: &ReferenceData) -> Vec<AssetDiagnosis> {
    let results: Vec<AssetDiagnosis> = sets.par_iter().map(|set| evaluate(set, reference)).collect();

    let incomplete = results.iter().filter(|r| !r.diagnosis.complete).count();
    info!(assets = results.len(), incomplete = incomplete, "Batch evaluation complete");

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DomainState, Status};

    fn electrical() -> ElectricalReading {
        ElectricalReading {
            voltage_l1: 400.0,
            voltage_l2: 400.0,
            voltage_l3: 400.0,
            current_l1: 30.0,
            current_l2: 30.0,
            current_l3: 30.0,
        }
    }

    fn vibration(level: f64) -> VibrationReading {
        VibrationReading {
            de_h: level,
            de_v: level,
            de_a: level,
            nde_h: level,
            nde_v: level,
            nde_a: level,
            hf_5_16khz: 0.0,
            demodulation: 0.0,
        }
    }

    fn set(asset_id: &str) -> ReadingSet {
        ReadingSet {
            asset_id: asset_id.to_string(),
            pump_size: default_pump_size(),
            product_type: default_product_type(),
            foundation_type: default_foundation_type(),
            electrical: None,
            hydraulic: None,
            driver: None,
            driven: None,
        }
    }

    #[test]
    fn test_defaults_applied_when_names_omitted() {
        let parsed: ReadingSet = serde_json::from_str(r#"{"asset_id": "P-101"}"#).unwrap();
        assert_eq!(parsed.pump_size, "Medium");
        assert_eq!(parsed.product_type, "Diesel");
        assert_eq!(parsed.foundation_type, "rigid");
        assert!(parsed.electrical.is_none());
    }

    #[test]
    fn test_unknown_pump_size_fails_only_dependent_domains() {
        let reference = ReferenceData::default();
        let mut s = set("P-102");
        s.pump_size = "Huge".to_string();
        s.electrical = Some(electrical());
        s.driver = Some(vibration(1.0));
        s.driven = Some(vibration(1.0));

        let result = evaluate(&s, &reference);
        match result.diagnosis.domain_state(Domain::Electrical) {
            Some(DomainState::Failed { error }) => assert_eq!(error.kind(), "configuration"),
            other => panic!("expected electrical failure, got {:?}", other),
        }
        assert_eq!(
            result.diagnosis.domain_state(Domain::Mechanical),
            Some(&DomainState::Evaluated { status: Status::Normal })
        );
        assert!(!result.diagnosis.complete);
    }

    #[test]
    fn test_half_mechanical_section_is_incomplete() {
        let reference = ReferenceData::default();
        let mut s = set("P-103");
        s.driver = Some(vibration(1.0));
        let result = evaluate(&s, &reference);
        match result.diagnosis.domain_state(Domain::Mechanical) {
            Some(DomainState::Failed { error }) => assert_eq!(error.kind(), "incomplete"),
            other => panic!("expected mechanical failure, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let reference = ReferenceData::default();
        let sets: Vec<ReadingSet> = (0..32_u32)
            .map(|i| {
                let mut s = set(&format!("P-{i:03}"));
                s.driver = Some(vibration(f64::from(i) * 0.3));
                s.driven = Some(vibration(1.0));
                s
            })
            .collect();

        let results = evaluate_batch(&sets, &reference);
        assert_eq!(results.len(), sets.len());
        for (s, r) in sets.iter().zip(&results) {
            assert_eq!(s.asset_id, r.asset_id);
            assert_eq!(r.diagnosis, evaluate(s, &reference).diagnosis);
        }
    }
}
