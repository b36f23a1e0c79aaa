//! Vibration analyzer - ISO 10816-3 zones, fault attribution, HF screening
//!
//! One reading covers one unit (motor or pump): overall velocity at the
//! drive-end and non-drive-end bearings on each axis, plus the HF band and
//! envelope demodulation values.

use tracing::debug;

use crate::config::{ReferenceData, ZoneLimits};
use crate::error::AnalysisResult;
use crate::physics_engine::round2;
use crate::types::{
    AxisZones, Direction, DirectionFault, Domain, FaultIndicator, FoundationType, HfAnalysis,
    ProductType, Recommendation, RecommendationKey, VibrationAssessment, VibrationAverages,
    VibrationReading, ZoneClassification,
};

// ============================================================================
// Averages
// ============================================================================

/// Per-axis mean of DE and NDE amplitudes, 2 decimals.
///
/// The rounded mean is kept inside `[min, max]` of its two inputs. A NaN
/// amplitude yields a NaN average, which classifies as zone D.
pub fn calculate_averages(reading: &VibrationReading) -> VibrationAverages {
    let axis = |direction| {
        let (de, nde) = reading.pair(direction);
        let avg = round2((de + nde) / 2.0);
        if avg.is_nan() {
            avg
        } else {
            avg.clamp(de.min(nde), de.max(nde))
        }
    };

    let avr_h = axis(Direction::Horizontal);
    let avr_v = axis(Direction::Vertical);
    let avr_a = axis(Direction::Axial);

    VibrationAverages {
        avr_h,
        avr_v,
        avr_a,
        overall_max: avr_h.max(avr_v).max(avr_a),
    }
}

// ============================================================================
// Zones
// ============================================================================

/// Classify each axis average against the foundation's zone breakpoints.
pub fn classify_zones(averages: &VibrationAverages, limits: &ZoneLimits) -> AxisZones {
    let table = limits.table();
    let zone = |direction| ZoneClassification::from(table.classify(averages.get(direction)));

    AxisZones {
        horizontal: zone(Direction::Horizontal),
        vertical: zone(Direction::Vertical),
        axial: zone(Direction::Axial),
    }
}

// ============================================================================
// Fault Attribution
// ============================================================================

/// Attribute the primary fault to the axis with the largest average.
///
/// Ties go to the earlier axis in H, V, A order.
pub fn identify_faults(averages: &VibrationAverages, reference: &ReferenceData) -> FaultIndicator {
    let confidence = reference.thresholds.vibration.confidence_table();
    let fault = |direction| DirectionFault {
        fault: reference.fault_for(direction),
        confidence: confidence.classify(averages.get(direction)),
    };

    let mut primary_direction = Direction::Horizontal;
    for direction in Direction::ALL {
        if averages.get(direction) > averages.get(primary_direction) {
            primary_direction = direction;
        }
    }

    FaultIndicator {
        primary_fault: reference.fault_for(primary_direction),
        primary_direction,
        horizontal: fault(Direction::Horizontal),
        vertical: fault(Direction::Vertical),
        axial: fault(Direction::Axial),
    }
}

// ============================================================================
// High-Frequency Screening
// ============================================================================

/// Screen the HF band for cavitation and the demodulation value for bearing
/// defects.
///
/// Volatile products use the more sensitive cavitation limit. Exactly one
/// recommendation is produced; cavitation takes precedence.
pub fn analyze_hf(reading: &VibrationReading, product: ProductType, reference: &ReferenceData) -> HfAnalysis {
    let thresholds = &reference.thresholds.vibration;
    let cavitation_threshold = thresholds.hf_cavitation_limit(reference.product(product).volatile);

    let cavitation_risk = reading.hf_5_16khz > cavitation_threshold;
    let bearing_defect_risk = reading.demodulation > thresholds.demodulation_bearing_defect_ge;

    let recommendation = if cavitation_risk {
        Recommendation::warning(
            Domain::Mechanical,
            RecommendationKey::HfCavitation,
            format!(
                "High-frequency vibration {:.2} g > {:.2} g indicates cavitation risk - verify NPSHa",
                reading.hf_5_16khz, cavitation_threshold
            ),
        )
    } else if bearing_defect_risk {
        Recommendation::warning(
            Domain::Mechanical,
            RecommendationKey::BearingDefect,
            format!(
                "Demodulation {:.2} gE indicates early bearing defect - plan bearing inspection",
                reading.demodulation
            ),
        )
    } else {
        Recommendation::info(
            Domain::Mechanical,
            RecommendationKey::HfNormal,
            "HF vibration within normal range",
        )
    };

    HfAnalysis {
        hf_value: reading.hf_5_16khz,
        demod_value: reading.demodulation,
        cavitation_threshold,
        cavitation_risk,
        bearing_defect_risk,
        recommendation,
    }
}

// ============================================================================
// Unit Report
// ============================================================================

/// Full vibration verdict for one unit.
pub fn analyze_vibration(
    reading: &VibrationReading,
    foundation: FoundationType,
    product: ProductType,
    reference: &ReferenceData,
) -> AnalysisResult<VibrationAssessment> {
    reading.validate()?;

    let averages = calculate_averages(reading);
    let zones = classify_zones(&averages, reference.zone_limits(foundation));
    let faults = identify_faults(&averages, reference);
    let hf_analysis = analyze_hf(reading, product, reference);

    let overall_zone = zones.worst();
    let description = overall_zone.describe();

    debug!(
        foundation = %foundation,
        avr_h = averages.avr_h,
        avr_v = averages.avr_v,
        avr_a = averages.avr_a,
        zone = %overall_zone,
        primary_fault = %faults.primary_fault,
        "Vibration analysis complete"
    );

    Ok(VibrationAssessment {
        averages,
        zones,
        faults,
        hf_analysis,
        overall_zone,
        severity: description.name,
        recommendation: description.recommendation,
    })
}
