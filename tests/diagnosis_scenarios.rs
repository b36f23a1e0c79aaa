//! Diagnosis Scenario Tests
//!
//! End-to-end checks of the analyzers and the aggregator through the public
//! API, using realistic field readings.

use pump_diagnosis::analyzers::{classify_cavitation, roll_up, DomainAssessment};
use pump_diagnosis::types::{FaultType, FlowStatus, ImbalanceTier, LoadStatus, RiskLevel};
use pump_diagnosis::{
    aggregate_diagnosis, analyze_electrical, analyze_hydraulic, analyze_mechanical,
    analyze_vibration, evaluate, Domain, DomainOutcome, DomainState, ElectricalReading,
    FoundationType, HydraulicReading, ProductType, PumpSize, ReadingSet, ReferenceData, Severity,
    Status, VibrationReading, Zone,
};

fn vibration(h: (f64, f64), v: (f64, f64), a: (f64, f64)) -> VibrationReading {
    VibrationReading {
        de_h: h.0,
        nde_h: h.1,
        de_v: v.0,
        nde_v: v.1,
        de_a: a.0,
        nde_a: a.1,
        hf_5_16khz: 0.1,
        demodulation: 0.1,
    }
}

fn quiet() -> VibrationReading {
    vibration((1.0, 1.0), (1.0, 1.0), (1.0, 1.0))
}

// ============================================================================
// Field Scenarios
// ============================================================================

#[test]
fn scenario_supply_voltage_imbalance() {
    let reference = ReferenceData::default();
    let reading = ElectricalReading {
        voltage_l1: 390.0,
        voltage_l2: 380.0,
        voltage_l3: 370.0,
        current_l1: 30.0,
        current_l2: 30.0,
        current_l3: 30.0,
    };
    let a = analyze_electrical(&reading, PumpSize::Medium, &reference).expect("valid reading");

    assert_eq!(a.voltage.imbalance_pct, 2.63);
    assert_eq!(a.voltage.status, ImbalanceTier::Warning);
    assert_eq!(a.current.imbalance_pct, 0.0);
    assert_eq!(a.current.status, ImbalanceTier::Normal);
    assert_eq!(a.load.percentage, 100.0);
    assert_eq!(a.load.status, LoadStatus::Normal);
    assert_eq!(a.overall_status, Status::Warning);
}

#[test]
fn scenario_throttled_discharge_recirculation() {
    let reference = ReferenceData::default();
    let reading = HydraulicReading {
        suction_pressure_kpa: 50.0,
        discharge_pressure_kpa: 450.0,
        flow_rate_m3h: 20.0,
        temperature_c: None,
    };
    let a = analyze_hydraulic(&reading, ProductType::Diesel, PumpSize::Medium, &reference)
        .expect("valid reading");
    assert_eq!(a.flow_ratio, 0.2);
    assert_eq!(a.flow_status, FlowStatus::RecirculationRisk);
    assert!(a.has_issue);

    // A starved suction at the same pump: NPSHa 5.0 m against NPSHr 4.5 m
    let (margin, risk) = classify_cavitation(5.0, a.npshr, &reference.thresholds.hydraulic);
    assert_eq!(margin, -0.5);
    assert_eq!(risk, RiskLevel::High);
}

#[test]
fn scenario_horizontal_unbalance_on_rigid_base() {
    let reference = ReferenceData::default();
    let reading = vibration((5.0, 4.0), (2.0, 2.0), (1.0, 1.0));
    let a = analyze_vibration(&reading, FoundationType::Rigid, ProductType::Diesel, &reference)
        .expect("valid reading");

    assert_eq!(a.averages.avr_h, 4.5);
    assert_eq!(a.zones.horizontal.zone, Zone::B);
    assert_eq!(a.zones.vertical.zone, Zone::A);
    assert_eq!(a.zones.axial.zone, Zone::A);
    assert_eq!(a.faults.primary_fault, FaultType::Unbalance);
    assert_eq!(a.overall_zone, Zone::B);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn imbalance_is_zero_for_equal_phases() {
    let reference = ReferenceData::default();
    for level in [0.0, 1.0, 230.0, 400.0, 6600.0] {
        let reading = ElectricalReading {
            voltage_l1: level,
            voltage_l2: level,
            voltage_l3: level,
            current_l1: 30.0,
            current_l2: 30.0,
            current_l3: 30.0,
        };
        let a = analyze_electrical(&reading, PumpSize::Medium, &reference).expect("valid reading");
        assert_eq!(a.voltage.imbalance_pct, 0.0, "level {}", level);
    }
}

#[test]
fn cavitation_high_iff_below_required_plus_margin() {
    let reference = ReferenceData::default();
    let thresholds = &reference.thresholds.hydraulic;
    for npshr in [3.0, 4.504, 2.3333, 5.0001] {
        for step in 0..=800_u32 {
            let npsha = f64::from(step) * 0.01;
            let (_, risk) = classify_cavitation(npsha, npshr, thresholds);
            assert_eq!(
                risk == RiskLevel::High,
                npsha < npshr + 1.0,
                "npsha {} with npshr {} misclassified as {}",
                npsha,
                npshr,
                risk
            );
        }
        let (_, at_edge) = classify_cavitation(npshr + 1.0, npshr, thresholds);
        assert_eq!(at_edge, RiskLevel::Medium, "npshr {}", npshr);
    }
}

#[test]
fn fine_npshr_from_reference_file_is_not_rounded_away() {
    let reference = ReferenceData::from_toml_str(
        r#"
[pump_sizes.medium]
npshr_m = 4.504
bep_flow_m3h = 100.0
fla_a = 30.0
"#,
    )
    .expect("reference parses");
    let npshr = reference.pump_profile(PumpSize::Medium).npshr_m;
    let (margin, risk) = classify_cavitation(5.5, npshr, &reference.thresholds.hydraulic);
    assert_eq!(risk, RiskLevel::High, "5.5 m is below 4.504 + 1.0 m");
    assert_eq!(margin, 0.0);
}

#[test]
fn band_edges_use_unrounded_ratios() {
    let reference = ReferenceData::default();
    let hydraulic = |flow| {
        let reading = HydraulicReading {
            suction_pressure_kpa: 50.0,
            discharge_pressure_kpa: 450.0,
            flow_rate_m3h: flow,
            temperature_c: None,
        };
        analyze_hydraulic(&reading, ProductType::Diesel, PumpSize::Medium, &reference)
            .expect("valid reading")
    };
    assert_eq!(hydraulic(59.6).flow_status, FlowStatus::RecirculationRisk);
    assert_eq!(hydraulic(60.0).flow_status, FlowStatus::Normal);
    assert_eq!(hydraulic(120.0).flow_status, FlowStatus::Normal);
    assert_eq!(hydraulic(120.4).flow_status, FlowStatus::OverloadCavitationRisk);

    let reading = ElectricalReading {
        voltage_l1: 400.0,
        voltage_l2: 400.0,
        voltage_l3: 400.0,
        current_l1: 23.988,
        current_l2: 23.988,
        current_l3: 23.988,
    };
    let electrical = analyze_electrical(&reading, PumpSize::Medium, &reference).expect("valid reading");
    assert_eq!(electrical.load.status, LoadStatus::Underload, "79.96 % FLA is underload");
}

#[test]
fn averages_lie_between_bearing_readings() {
    let reference = ReferenceData::default();
    let pairs = [(0.0, 0.01), (1.234, 5.678), (7.105, 7.106), (11.0, 2.0), (3.333, 3.333)];
    for (de, nde) in pairs {
        let reading = vibration((de, nde), (nde, de), (de, de));
        let a = analyze_vibration(&reading, FoundationType::Flexible, ProductType::Avtur, &reference)
            .expect("valid reading");
        for avg in [a.averages.avr_h, a.averages.avr_v] {
            assert!(avg >= de.min(nde) && avg <= de.max(nde), "{} outside [{}, {}]", avg, de, nde);
        }
    }
}

#[test]
fn overall_zone_is_worst_axis() {
    let reference = ReferenceData::default();
    let cases = [
        ((8.0, 8.0), (1.0, 1.0), (1.0, 1.0), Zone::D),
        ((1.0, 1.0), (5.0, 5.0), (1.0, 1.0), Zone::C),
        ((1.0, 1.0), (1.0, 1.0), (3.0, 3.0), Zone::B),
    ];
    for (h, v, a, expected) in cases {
        let report = analyze_vibration(&vibration(h, v, a), FoundationType::Rigid, ProductType::Diesel, &reference)
            .expect("valid reading");
        assert_eq!(report.overall_zone, expected);
        assert_eq!(report.overall_zone, report.zones.worst());
    }
}

// ============================================================================
// Aggregation
// ============================================================================

fn field_assessments(
    reference: &ReferenceData,
) -> (
    pump_diagnosis::ElectricalAssessment,
    pump_diagnosis::HydraulicAssessment,
    pump_diagnosis::MechanicalAssessment,
) {
    let electrical = analyze_electrical(
        &ElectricalReading {
            voltage_l1: 390.0,
            voltage_l2: 380.0,
            voltage_l3: 370.0,
            current_l1: 30.0,
            current_l2: 30.0,
            current_l3: 30.0,
        },
        PumpSize::Medium,
        reference,
    )
    .expect("valid electrical");
    let hydraulic = analyze_hydraulic(
        &HydraulicReading {
            suction_pressure_kpa: 50.0,
            discharge_pressure_kpa: 450.0,
            flow_rate_m3h: 20.0,
            temperature_c: None,
        },
        ProductType::Diesel,
        PumpSize::Medium,
        reference,
    )
    .expect("valid hydraulic");
    let mechanical = analyze_mechanical(
        &quiet(),
        &vibration((5.0, 4.0), (2.0, 2.0), (1.0, 1.0)),
        FoundationType::Rigid,
        ProductType::Diesel,
        reference,
    )
    .expect("valid mechanical");
    (electrical, hydraulic, mechanical)
}

#[test]
fn aggregation_is_independent_of_supply_order() {
    let reference = ReferenceData::default();
    let (e, h, m) = field_assessments(&reference);

    let orders: [[&dyn DomainAssessment; 3]; 3] = [[&e, &h, &m], [&m, &e, &h], [&h, &m, &e]];
    let results: Vec<_> = orders.iter().map(|o| roll_up(o, &reference)).collect();
    for r in &results[1..] {
        assert_eq!(r, &results[0]);
    }
    assert_eq!(results[0].overall_status, Status::Warning);
    // All three are WARNING: hydraulic is first in the priority order
    assert_eq!(results[0].primary_domain, Some(Domain::Hydraulic));
}

#[test]
fn full_diagnosis_groups_recommendations_by_priority() {
    let reference = ReferenceData::default();
    let (e, h, m) = field_assessments(&reference);
    let d = aggregate_diagnosis(
        DomainOutcome::Evaluated(e),
        DomainOutcome::Evaluated(h),
        DomainOutcome::Evaluated(m),
        &reference,
    );

    assert!(d.complete);
    let domains: Vec<_> = d.recommendations.iter().map(|r| r.domain).collect();
    let mut sorted = domains.clone();
    sorted.sort_by_key(|dom| reference.priority_index(*dom));
    assert_eq!(domains, sorted, "recommendations must be grouped in priority order");
    assert_eq!(domains.first(), Some(&Domain::Hydraulic));
    assert_eq!(d.domain_state(Domain::Thermal), Some(&DomainState::NoData));

    let json = serde_json::to_value(&d).expect("diagnosis serializes");
    assert_eq!(json["overall_status"], "WARNING");
    assert_eq!(json["mechanical"]["driven"]["averages"]["Avr_H"], 4.5);
}

#[test]
fn partial_failure_does_not_block_other_domains() {
    let reference = ReferenceData::default();
    let set: ReadingSet = serde_json::from_str(
        r#"{
            "asset_id": "P-7",
            "pump_size": "Large",
            "product_type": "Kerosene",
            "foundation_type": "Rigid",
            "electrical": {
                "voltage_l1": 400.0, "voltage_l2": 400.0, "voltage_l3": 400.0,
                "current_l1": 80.0, "current_l2": 80.0, "current_l3": 80.0
            },
            "hydraulic": {
                "suction_pressure_kpa": 60.0, "discharge_pressure_kpa": 500.0, "flow_rate_m3h": 240.0
            }
        }"#,
    )
    .expect("reading set parses");

    let result = evaluate(&set, &reference);
    let d = &result.diagnosis;

    // Large FLA 60 A, 80 A → 133.3 % overload alarm
    assert_eq!(d.overall_status, Status::Critical);
    assert_eq!(d.primary_domain, Some(Domain::Electrical));
    assert!(!d.complete);
    assert!(matches!(d.domain_state(Domain::Hydraulic), Some(DomainState::Failed { .. })));
    assert_eq!(d.domain_state(Domain::Mechanical), Some(&DomainState::NotSupplied));

    let unavailable: Vec<_> = d
        .recommendations
        .iter()
        .filter(|r| r.domain == Domain::Hydraulic)
        .collect();
    assert_eq!(unavailable.len(), 1);
    assert_eq!(unavailable[0].severity, Severity::Warning);
    assert!(unavailable[0].message.contains("Kerosene"));
    // Hydraulic precedes electrical in the priority order
    assert_eq!(d.recommendations[0].domain, Domain::Hydraulic);
}
