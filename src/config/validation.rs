//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use crate::types::ProductType;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for ReferenceData.
///
/// Maintained manually to match the struct hierarchy in reference_data.rs.
/// Any new field added to ReferenceData must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [site]
        "site",
        "site.name",
        "site.company",
        "site.location",
        // [diagnosis]
        "diagnosis",
        "diagnosis.priority",
        // [pump_sizes]
        "pump_sizes",
        "pump_sizes.small",
        "pump_sizes.small.npshr_m",
        "pump_sizes.small.bep_flow_m3h",
        "pump_sizes.small.fla_a",
        "pump_sizes.medium",
        "pump_sizes.medium.npshr_m",
        "pump_sizes.medium.bep_flow_m3h",
        "pump_sizes.medium.fla_a",
        "pump_sizes.large",
        "pump_sizes.large.npshr_m",
        "pump_sizes.large.bep_flow_m3h",
        "pump_sizes.large.fla_a",
        // [products]
        "products",
        "products.gasoline",
        "products.gasoline.density_kg_m3",
        "products.gasoline.default_temp_c",
        "products.gasoline.risk_factor",
        "products.gasoline.vapor_pressure_kpa",
        "products.gasoline.volatile",
        "products.diesel",
        "products.diesel.density_kg_m3",
        "products.diesel.default_temp_c",
        "products.diesel.risk_factor",
        "products.diesel.vapor_pressure_kpa",
        "products.diesel.volatile",
        "products.avtur",
        "products.avtur.density_kg_m3",
        "products.avtur.default_temp_c",
        "products.avtur.risk_factor",
        "products.avtur.vapor_pressure_kpa",
        "products.avtur.volatile",
        "products.naphtha",
        "products.naphtha.density_kg_m3",
        "products.naphtha.default_temp_c",
        "products.naphtha.risk_factor",
        "products.naphtha.vapor_pressure_kpa",
        "products.naphtha.volatile",
        // [iso_limits]
        "iso_limits",
        "iso_limits.rigid",
        "iso_limits.rigid.zone_a_max",
        "iso_limits.rigid.zone_b_max",
        "iso_limits.rigid.zone_c_max",
        "iso_limits.flexible",
        "iso_limits.flexible.zone_a_max",
        "iso_limits.flexible.zone_b_max",
        "iso_limits.flexible.zone_c_max",
        // [fault_mapping]
        "fault_mapping",
        "fault_mapping.horizontal",
        "fault_mapping.vertical",
        "fault_mapping.axial",
        // [thresholds]
        "thresholds",
        // [thresholds.electrical]
        "thresholds.electrical",
        "thresholds.electrical.voltage_imbalance_warning_pct",
        "thresholds.electrical.voltage_imbalance_alarm_pct",
        "thresholds.electrical.current_imbalance_warning_pct",
        "thresholds.electrical.current_imbalance_alarm_pct",
        "thresholds.electrical.underload_pct",
        "thresholds.electrical.overload_warning_pct",
        "thresholds.electrical.overload_alarm_pct",
        // [thresholds.hydraulic]
        "thresholds.hydraulic",
        "thresholds.hydraulic.recirculation_flow_ratio",
        "thresholds.hydraulic.overload_flow_ratio",
        "thresholds.hydraulic.npsh_margin_warning_m",
        // [thresholds.vibration]
        "thresholds.vibration",
        "thresholds.vibration.confidence_high_mm_s",
        "thresholds.vibration.confidence_medium_mm_s",
        "thresholds.vibration.hf_cavitation_volatile_g",
        "thresholds.vibration.hf_cavitation_default_g",
        "thresholds.vibration.demodulation_bearing_defect_ge",
        // [physics]
        "physics",
        "physics.atmospheric_pressure_kpa",
        "physics.gravity_m_s2",
        "physics.vapor_pressure_temp_coeff",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_len = a.len();
    let b_len = b.len();
    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist <= 3 {
            if let Some((_, best_dist)) = best {
                if dist < best_dist {
                    best = Some((k, dist));
                }
            } else {
                best = Some((k, dist));
            }
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys; it only warns. Existing configs
/// always continue to work.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();

    for key in &found {
        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(key, &known);
            let message = format!("Unknown config key '{key}'");
            warnings.push(ValidationWarning {
                field: key.clone(),
                message,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on parsed ReferenceData.
///
/// Returns (errors, warnings). Errors are impossible values that must reject
/// the file; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    reference: &super::ReferenceData,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for product in ProductType::ALL {
        let p = reference.product(product);
        let key = product.as_str().to_ascii_lowercase();

        // Liquid hydrocarbons: 300-2000 kg/m³ covers LPG to heavy residue
        if p.density_kg_m3 < 300.0 || p.density_kg_m3 > 2000.0 {
            errors.push(format!(
                "products.{key}.density_kg_m3 = {:.1} is outside physical range (300-2000 kg/m³)",
                p.density_kg_m3
            ));
        }

        if !(1..=5).contains(&p.risk_factor) {
            errors.push(format!(
                "products.{key}.risk_factor = {} must be between 1 and 5",
                p.risk_factor
            ));
        }

        // Ambient storage and transfer temperatures
        if p.default_temp_c < -40.0 || p.default_temp_c > 150.0 {
            warnings.push(ValidationWarning {
                field: format!("products.{key}.default_temp_c"),
                message: format!(
                    "default_temp_c = {:.1} is outside typical range (-40 to 150 °C)",
                    p.default_temp_c
                ),
                suggestion: None,
            });
        }

        // A vapor pressure above one atmosphere means the product boils in the tank
        if p.vapor_pressure_kpa > reference.physics.atmospheric_pressure_kpa {
            warnings.push(ValidationWarning {
                field: format!("products.{key}.vapor_pressure_kpa"),
                message: format!(
                    "vapor_pressure_kpa = {:.1} exceeds atmospheric pressure ({:.1} kPa)",
                    p.vapor_pressure_kpa, reference.physics.atmospheric_pressure_kpa
                ),
                suggestion: None,
            });
        }
    }

    // Atmospheric pressure: 50-110 kPa spans sea level to high-altitude sites
    let atm = reference.physics.atmospheric_pressure_kpa;
    if !(50.0..=110.0).contains(&atm) {
        errors.push(format!(
            "physics.atmospheric_pressure_kpa = {:.3} is outside physical range (50-110 kPa)",
            atm
        ));
    }

    let g = reference.physics.gravity_m_s2;
    if g > 0.0 && !(9.7..=9.9).contains(&g) {
        warnings.push(ValidationWarning {
            field: "physics.gravity_m_s2".to_string(),
            message: format!("gravity_m_s2 = {:.4} is outside terrestrial range (9.7-9.9 m/s²)", g),
            suggestion: None,
        });
    }

    let coeff = reference.physics.vapor_pressure_temp_coeff;
    if coeff < 0.0 {
        errors.push(format!(
            "physics.vapor_pressure_temp_coeff = {:.4} cannot be negative",
            coeff
        ));
    } else if coeff > 0.1 {
        warnings.push(ValidationWarning {
            field: "physics.vapor_pressure_temp_coeff".to_string(),
            message: format!(
                "vapor_pressure_temp_coeff = {:.4} is outside typical range (0-0.1 per °C)",
                coeff
            ),
            suggestion: None,
        });
    }

    // Imbalance percentages beyond 20% would leave every motor normal
    let e = &reference.thresholds.electrical;
    for (field, value) in [
        ("voltage_imbalance_alarm_pct", e.voltage_imbalance_alarm_pct),
        ("current_imbalance_alarm_pct", e.current_imbalance_alarm_pct),
    ] {
        if value < 0.0 {
            errors.push(format!("thresholds.electrical.{field} = {:.2} cannot be negative", value));
        } else if value > 20.0 {
            warnings.push(ValidationWarning {
                field: format!("thresholds.electrical.{field}"),
                message: format!("{field} = {:.2} is outside typical range (0-20 %)", value),
                suggestion: None,
            });
        }
    }

    let v = &reference.thresholds.vibration;
    for (field, value) in [
        ("hf_cavitation_volatile_g", v.hf_cavitation_volatile_g),
        ("hf_cavitation_default_g", v.hf_cavitation_default_g),
        ("demodulation_bearing_defect_ge", v.demodulation_bearing_defect_ge),
    ] {
        if value <= 0.0 {
            errors.push(format!("thresholds.vibration.{field} = {:.3} must be > 0", value));
        }
    }
    if v.hf_cavitation_volatile_g > v.hf_cavitation_default_g {
        warnings.push(ValidationWarning {
            field: "thresholds.vibration.hf_cavitation_volatile_g".to_string(),
            message: format!(
                "hf_cavitation_volatile_g = {:.2} is less sensitive than hf_cavitation_default_g = {:.2}",
                v.hf_cavitation_volatile_g, v.hf_cavitation_default_g
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
