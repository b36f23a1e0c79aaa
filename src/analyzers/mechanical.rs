//! Mechanical aggregator - driver and driven vibration combined per pump train

use tracing::debug;

use super::vibration::analyze_vibration;
use crate::config::ReferenceData;
use crate::error::AnalysisResult;
use crate::types::{
    Component, Domain, FaultType, FoundationType, MechanicalAssessment, ProductType,
    Recommendation, RecommendationKey, Severity, Status, VibrationAssessment, VibrationReading,
    Zone,
};

/// Evaluate motor (driver) and pump (driven) vibration in the same foundation
/// and product context.
///
/// The dominant component is the driver only when its overall maximum is
/// strictly greater than the driven unit's.
pub fn analyze_mechanical(
    driver: &VibrationReading,
    driven: &VibrationReading,
    foundation: FoundationType,
    product: ProductType,
    reference: &ReferenceData,
) -> AnalysisResult<MechanicalAssessment> {
    let driver = analyze_vibration(driver, foundation, product, reference)?;
    let driven = analyze_vibration(driven, foundation, product, reference)?;

    let (primary_component, primary) =
        if driver.averages.overall_max > driven.averages.overall_max {
            (Component::Driver, &driver)
        } else {
            (Component::Driven, &driven)
        };

    let overall_zone = driver.overall_zone.max(driven.overall_zone);
    let status = zone_status(overall_zone);
    let primary_fault = primary.faults.primary_fault;
    let overall_severity = primary.severity;

    let mut recommendations = Vec::new();

    if driver.overall_zone.needs_action() {
        recommendations.push(Recommendation::new(
            Domain::Mechanical,
            zone_severity(driver.overall_zone),
            RecommendationKey::MotorVibrationZone,
            format!(
                "Motor vibration Zone {} - check coupling alignment & rotor balance",
                driver.overall_zone
            ),
        ));
    }

    if driven.overall_zone.needs_action() {
        recommendations.push(Recommendation::new(
            Domain::Mechanical,
            zone_severity(driven.overall_zone),
            RecommendationKey::PumpVibrationZone,
            format!(
                "Pump vibration Zone {} - check impeller balance & bearing condition",
                driven.overall_zone
            ),
        ));
    }

    recommendations.push(Recommendation::new(
        Domain::Mechanical,
        if status == Status::Normal { Severity::Info } else { Severity::Warning },
        fault_key(primary_fault),
        format!(
            "Primary fault on {}: {} - {}",
            primary_component,
            primary_fault,
            primary_fault.remedy()
        ),
    ));

    for (component, report) in [(Component::Driver, &driver), (Component::Driven, &driven)] {
        recommendations.extend(hf_finding(component, report));
    }

    debug!(
        primary_component = %primary_component,
        zone = %overall_zone,
        fault = %primary_fault,
        status = %status,
        "Mechanical analysis complete"
    );

    Ok(MechanicalAssessment {
        primary_component,
        overall_zone,
        overall_severity,
        primary_fault,
        status,
        recommendations,
        has_issue: overall_zone.needs_action(),
        driver,
        driven,
    })
}

fn zone_status(zone: Zone) -> Status {
    match zone {
        Zone::A => Status::Normal,
        Zone::B => Status::Warning,
        Zone::C | Zone::D => Status::Critical,
    }
}

fn zone_severity(zone: Zone) -> Severity {
    if zone == Zone::D {
        Severity::Critical
    } else {
        Severity::Warning
    }
}

fn fault_key(fault: FaultType) -> RecommendationKey {
    match fault {
        FaultType::Unbalance => RecommendationKey::DynamicBalancing,
        FaultType::Looseness => RecommendationKey::FoundationCheck,
        FaultType::Misalignment => RecommendationKey::LaserAlignment,
    }
}

/// HF screening result of one unit, labelled with the unit. Nothing when normal.
fn hf_finding(component: Component, report: &VibrationAssessment) -> Option<Recommendation> {
    let hf = &report.hf_analysis;
    if !hf.has_finding() {
        return None;
    }
    Some(Recommendation::new(
        Domain::Mechanical,
        hf.recommendation.severity,
        hf.recommendation.key,
        format!("{}: {}", component, hf.recommendation.message),
    ))
}
