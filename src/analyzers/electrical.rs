//! Electrical analyzer - phase imbalance and motor load

use tracing::debug;

use crate::config::ReferenceData;
use crate::error::{check_positive, AnalysisResult};
use crate::physics_engine::{imbalance_percent, mean, round1, round2};
use crate::types::{
    Domain, ElectricalAssessment, ElectricalReading, ImbalanceTier, LoadStatus, LoadSummary,
    PhaseSummary, PumpSize, Recommendation, RecommendationKey, ThresholdTable,
};

/// Evaluate three-phase voltage and current for one motor.
///
/// FLA comes from the pump size profile. Tiers are classified on unrounded
/// values; imbalance is reported to 2 dp and load to 1 dp.
pub fn analyze_electrical(
    reading: &ElectricalReading,
    pump_size: PumpSize,
    reference: &ReferenceData,
) -> AnalysisResult<ElectricalAssessment> {
    reading.validate()?;
    let fla = check_positive("fla_a", reference.pump_profile(pump_size).fla_a)?;
    let thresholds = &reference.thresholds.electrical;

    let voltage = phase_summary(reading.voltages(), &thresholds.voltage_imbalance_table());
    let current = phase_summary(reading.currents(), &thresholds.current_imbalance_table());

    let raw_load = mean(&reading.currents()) / fla * 100.0;
    let load = LoadSummary {
        fla,
        percentage: round1(raw_load),
        status: thresholds.load_table().classify(raw_load),
    };

    let overall_status = voltage
        .status
        .status()
        .max(current.status.status())
        .max(load.status.status());

    let mut recommendations = Vec::new();

    if voltage.status != ImbalanceTier::Normal {
        recommendations.push(imbalance_recommendation(
            voltage.status,
            RecommendationKey::VoltageImbalance,
            format!(
                "Voltage imbalance {:.2}% > {}% - check power supply quality",
                voltage.imbalance_pct, thresholds.voltage_imbalance_warning_pct
            ),
        ));
    }

    if current.status != ImbalanceTier::Normal {
        recommendations.push(imbalance_recommendation(
            current.status,
            RecommendationKey::CurrentImbalance,
            format!(
                "Current imbalance {:.2}% > {}% - check winding & connections",
                current.imbalance_pct, thresholds.current_imbalance_warning_pct
            ),
        ));
    }

    match load.status {
        LoadStatus::OverloadWarning => recommendations.push(Recommendation::warning(
            Domain::Electrical,
            RecommendationKey::MotorOverload,
            format!(
                "Motor load {:.1}% > {}% FLA - check pump head & impeller",
                load.percentage, thresholds.overload_warning_pct
            ),
        )),
        LoadStatus::OverloadAlarm => recommendations.push(Recommendation::critical(
            Domain::Electrical,
            RecommendationKey::MotorOverloadCritical,
            format!(
                "Motor load {:.1}% > {}% FLA - immediate action required",
                load.percentage, thresholds.overload_alarm_pct
            ),
        )),
        LoadStatus::Underload => recommendations.push(Recommendation::warning(
            Domain::Electrical,
            RecommendationKey::MotorUnderload,
            format!(
                "Motor underload {:.1}% < {}% FLA - check if pump operating below BEP",
                load.percentage, thresholds.underload_pct
            ),
        )),
        LoadStatus::Normal => {}
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::info(
            Domain::Electrical,
            RecommendationKey::ElectricalNormal,
            "Electrical parameters within normal range",
        ));
    }

    debug!(
        pump_size = %pump_size,
        voltage_imbalance = voltage.imbalance_pct,
        current_imbalance = current.imbalance_pct,
        load_pct = load.percentage,
        status = %overall_status,
        "Electrical analysis complete"
    );

    Ok(ElectricalAssessment {
        voltage,
        current,
        load,
        overall_status,
        recommendations,
        has_issue: overall_status != crate::types::Status::Normal,
    })
}

fn phase_summary(phases: [f64; 3], table: &ThresholdTable<ImbalanceTier>) -> PhaseSummary {
    let imbalance = imbalance_percent(&phases);
    PhaseSummary {
        l1: phases[0],
        l2: phases[1],
        l3: phases[2],
        average: round1(mean(&phases)),
        imbalance_pct: round2(imbalance),
        status: table.classify(imbalance),
    }
}

fn imbalance_recommendation(
    tier: ImbalanceTier,
    key: RecommendationKey,
    message: String,
) -> Recommendation {
    match tier {
        ImbalanceTier::Alarm => Recommendation::critical(Domain::Electrical, key, message),
        _ => Recommendation::warning(Domain::Electrical, key, message),
    }
}
