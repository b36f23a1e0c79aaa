//! Hydraulic analyzer - NPSH margin, differential head and BEP operating point

use tracing::debug;

use crate::config::{defaults, HydraulicThresholds, ReferenceData};
use crate::error::{check_non_negative, check_positive, AnalysisResult};
use crate::physics_engine::{calculate_differential_head, calculate_npsha, round2};
use crate::types::{
    Domain, FlowStatus, HydraulicAssessment, HydraulicReading, ProductType, PumpSize,
    Recommendation, RecommendationKey, RiskLevel, Status,
};

/// Classify cavitation risk from NPSH available and required (m).
///
/// Returns `(margin, risk)` where `margin = npsha - (npshr + safety margin)`.
/// The risk is taken from the exact margin; only the returned margin is
/// rounded to 2 decimals. A margin of exactly zero is MEDIUM, not HIGH.
pub fn classify_cavitation(
    npsha: f64,
    npshr: f64,
    thresholds: &HydraulicThresholds,
) -> (f64, RiskLevel) {
    let margin = npsha - (npshr + defaults::NPSH_SAFETY_MARGIN_M);
    (round2(margin), thresholds.cavitation_table().classify(margin))
}

/// Evaluate suction margin and operating point for one pump.
///
/// The product temperature defaults to the product's reference temperature
/// when the reading carries none.
pub fn analyze_hydraulic(
    reading: &HydraulicReading,
    product: ProductType,
    pump_size: PumpSize,
    reference: &ReferenceData,
) -> AnalysisResult<HydraulicAssessment> {
    reading.validate()?;

    let profile = reference.pump_profile(pump_size);
    let npshr = check_non_negative("npshr_m", profile.npshr_m)?;
    let bep_flow = check_positive("bep_flow_m3h", profile.bep_flow_m3h)?;
    let fluid = reference.product(product);
    let physics = &reference.physics;
    let thresholds = &reference.thresholds.hydraulic;

    let temperature_c = reading.temperature_c.unwrap_or(fluid.default_temp_c);
    let raw_npsha = calculate_npsha(reading.suction_pressure_kpa, temperature_c, fluid, physics)?;
    let npsha = round2(raw_npsha);
    let head = round2(calculate_differential_head(
        reading.suction_pressure_kpa,
        reading.discharge_pressure_kpa,
        fluid,
        physics,
    )?);

    // Tiers come from unrounded values; rounding is for the reported fields
    let (npsha_margin, cavitation_risk) = classify_cavitation(raw_npsha, npshr, thresholds);

    let raw_flow_ratio = reading.flow_rate_m3h / bep_flow;
    let flow_ratio = round2(raw_flow_ratio);
    let flow_status = thresholds.flow_table().classify(raw_flow_ratio);

    let status = if cavitation_risk == RiskLevel::High {
        Status::Critical
    } else if cavitation_risk == RiskLevel::Medium || flow_status != FlowStatus::Normal {
        Status::Warning
    } else {
        Status::Normal
    };

    let mut recommendations = Vec::new();

    match cavitation_risk {
        RiskLevel::High => recommendations.push(Recommendation::critical(
            Domain::Hydraulic,
            RecommendationKey::NpshInsufficient,
            format!(
                "NPSHa {:.2} m < NPSHr {:.2} m + {:.1} m safety margin - raise suction pressure or reduce flow",
                npsha,
                npshr,
                defaults::NPSH_SAFETY_MARGIN_M
            ),
        )),
        RiskLevel::Medium => recommendations.push(Recommendation::warning(
            Domain::Hydraulic,
            RecommendationKey::NpshLowMargin,
            format!(
                "Low NPSHa margin {:.2} m - monitor suction strainer and tank level",
                npsha_margin
            ),
        )),
        RiskLevel::Low => {}
    }

    match flow_status {
        FlowStatus::RecirculationRisk => recommendations.push(Recommendation::warning(
            Domain::Hydraulic,
            RecommendationKey::FlowRecirculation,
            format!(
                "Flow {:.0}% of BEP < {:.0}% - risk of recirculation & vibration",
                flow_ratio * 100.0,
                thresholds.recirculation_flow_ratio * 100.0
            ),
        )),
        FlowStatus::OverloadCavitationRisk => recommendations.push(Recommendation::warning(
            Domain::Hydraulic,
            RecommendationKey::FlowOverload,
            format!(
                "Flow {:.0}% of BEP > {:.0}% - risk of cavitation & overload",
                flow_ratio * 100.0,
                thresholds.overload_flow_ratio * 100.0
            ),
        )),
        FlowStatus::Normal => {}
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::info(
            Domain::Hydraulic,
            RecommendationKey::HydraulicNormal,
            "NPSHa adequate and flow within acceptable range",
        ));
    }

    debug!(
        product = %product,
        pump_size = %pump_size,
        npsha = npsha,
        margin = npsha_margin,
        cavitation = %cavitation_risk,
        flow_ratio = flow_ratio,
        status = %status,
        "Hydraulic analysis complete"
    );

    Ok(HydraulicAssessment {
        npsha,
        npshr,
        npsha_margin,
        cavitation_risk,
        head,
        flow_rate: reading.flow_rate_m3h,
        bep_flow,
        flow_ratio,
        flow_status,
        temperature_c,
        status,
        recommendations,
        has_issue: cavitation_risk != RiskLevel::Low || flow_status != FlowStatus::Normal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(suction: f64, discharge: f64, flow: f64) -> HydraulicReading {
        HydraulicReading {
            suction_pressure_kpa: suction,
            discharge_pressure_kpa: discharge,
            flow_rate_m3h: flow,
            temperature_c: None,
        }
    }

    #[test]
    fn test_cavitation_bands() {
        let t = HydraulicThresholds::default();
        assert_eq!(classify_cavitation(5.0, 4.5, &t), (-0.5, RiskLevel::High));
        assert_eq!(classify_cavitation(5.5, 4.5, &t), (0.0, RiskLevel::Medium));
        assert_eq!(classify_cavitation(6.49, 4.5, &t).1, RiskLevel::Medium);
        assert_eq!(classify_cavitation(6.5, 4.5, &t).1, RiskLevel::Low);
    }

    #[test]
    fn test_low_flow_recirculation() {
        let reference = ReferenceData::default();
        let a = analyze_hydraulic(
            &reading(50.0, 450.0, 20.0),
            ProductType::Diesel,
            PumpSize::Medium,
            &reference,
        )
        .unwrap();

        assert_eq!(a.flow_ratio, 0.2);
        assert_eq!(a.flow_status, FlowStatus::RecirculationRisk);
        assert_eq!(a.cavitation_risk, RiskLevel::Low);
        assert_eq!(a.status, Status::Warning);
        assert!(a.has_issue);
        assert_eq!(a.temperature_c, 25.0);
        assert!((a.head - 48.56).abs() < 0.011, "head {}", a.head);
        assert_eq!(a.recommendations[0].key, RecommendationKey::FlowRecirculation);
    }

    #[test]
    fn test_healthy_operating_point() {
        let reference = ReferenceData::default();
        let a = analyze_hydraulic(
            &reading(50.0, 450.0, 95.0),
            ProductType::Diesel,
            PumpSize::Medium,
            &reference,
        )
        .unwrap();
        assert_eq!(a.status, Status::Normal);
        assert!(!a.has_issue);
        assert_eq!(a.recommendations.len(), 1);
        assert_eq!(a.recommendations[0].key, RecommendationKey::HydraulicNormal);
    }

    #[test]
    fn test_hot_gasoline_under_vacuum_is_critical() {
        let reference = ReferenceData::default();
        let mut r = reading(-40.0, 300.0, 100.0);
        r.temperature_c = Some(45.0);
        let a = analyze_hydraulic(&r, ProductType::Gasoline, PumpSize::Medium, &reference).unwrap();
        assert_eq!(a.cavitation_risk, RiskLevel::High);
        assert_eq!(a.status, Status::Critical);
        assert_eq!(a.recommendations[0].key, RecommendationKey::NpshInsufficient);
    }

    #[test]
    fn test_flow_ratio_boundaries() {
        let reference = ReferenceData::default();
        let at_low = analyze_hydraulic(&reading(50.0, 450.0, 60.0), ProductType::Diesel, PumpSize::Medium, &reference).unwrap();
        assert_eq!(at_low.flow_status, FlowStatus::Normal);
        let at_high = analyze_hydraulic(&reading(50.0, 450.0, 120.0), ProductType::Diesel, PumpSize::Medium, &reference).unwrap();
        assert_eq!(at_high.flow_status, FlowStatus::Normal);
        let over = analyze_hydraulic(&reading(50.0, 450.0, 121.0), ProductType::Diesel, PumpSize::Medium, &reference).unwrap();
        assert_eq!(over.flow_status, FlowStatus::OverloadCavitationRisk);
    }

    #[test]
    fn test_flow_just_outside_band_not_rounded_into_it() {
        let reference = ReferenceData::default();
        let low = analyze_hydraulic(&reading(50.0, 450.0, 59.6), ProductType::Diesel, PumpSize::Medium, &reference).unwrap();
        assert_eq!(low.flow_ratio, 0.6, "reported ratio is rounded");
        assert_eq!(low.flow_status, FlowStatus::RecirculationRisk);
        assert_eq!(low.status, Status::Warning);

        let high = analyze_hydraulic(&reading(50.0, 450.0, 120.4), ProductType::Diesel, PumpSize::Medium, &reference).unwrap();
        assert_eq!(high.flow_ratio, 1.2);
        assert_eq!(high.flow_status, FlowStatus::OverloadCavitationRisk);
    }

    #[test]
    fn test_cavitation_uses_exact_margin_for_fine_npshr() {
        let t = HydraulicThresholds::default();
        // 5.5 < 4.504 + 1.0, although the margin rounds to zero
        let (margin, risk) = classify_cavitation(5.5, 4.504, &t);
        assert_eq!(risk, RiskLevel::High);
        assert_eq!(margin, 0.0);
        assert_eq!(classify_cavitation(6.503, 4.504, &t).1, RiskLevel::Medium);
    }

    #[test]
    fn test_negative_flow_rejected() {
        let reference = ReferenceData::default();
        let err = analyze_hydraulic(&reading(50.0, 450.0, -1.0), ProductType::Diesel, PumpSize::Medium, &reference)
            .unwrap_err();
        assert!(err.to_string().contains("flow_rate_m3h"));
    }

    #[test]
    fn test_zero_bep_rejected() {
        let mut reference = ReferenceData::default();
        reference.pump_sizes.large.bep_flow_m3h = 0.0;
        let err = analyze_hydraulic(&reading(50.0, 450.0, 100.0), ProductType::Diesel, PumpSize::Large, &reference)
            .unwrap_err();
        assert!(err.to_string().contains("bep_flow_m3h"));
    }

    #[test]
    fn test_absolute_vacuum_rejected() {
        let reference = ReferenceData::default();
        let err = analyze_hydraulic(&reading(-101.325, 450.0, 100.0), ProductType::Diesel, PumpSize::Medium, &reference)
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
    }
}
