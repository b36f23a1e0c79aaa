//! Reference Data - equipment tables and analyzer thresholds as operator-tunable TOML values
//!
//! Every table the analyzers consult is a field in this module. Each struct
//! implements `Default` with the values of the plant engineering standard, so an
//! absent config file gives the standard behavior.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::{
    Bound, Direction, Domain, FaultType, FlowStatus, FoundationType, ImbalanceTier, LoadStatus,
    ProductType, PumpSize, RiskLevel, ThresholdTable, Zone,
};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Immutable lookup data supplied to every analyzer.
///
/// Load with `ReferenceData::load()` which searches:
/// 1. `$PUMP_DIAGNOSIS_CONFIG` env var
/// 2. `./pump_reference.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Site identification
    #[serde(default)]
    pub site: SiteInfo,

    /// Diagnosis roll-up settings
    #[serde(default)]
    pub diagnosis: DiagnosisConfig,

    /// Pump size class defaults
    #[serde(default)]
    pub pump_sizes: PumpSizeTable,

    /// Product properties
    #[serde(default)]
    pub products: ProductTable,

    /// ISO 10816-3 zone limits per foundation type
    #[serde(default)]
    pub iso_limits: IsoLimitsTable,

    /// Fault attributed to each measurement axis
    #[serde(default)]
    pub fault_mapping: FaultMapping,

    /// Analyzer band thresholds
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Physical constants used by the hydraulic models
    #[serde(default)]
    pub physics: PhysicsConfig,
}

impl ReferenceData {
    /// Load reference data using the standard search order:
    /// 1. `$PUMP_DIAGNOSIS_CONFIG` environment variable
    /// 2. `./pump_reference.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(reference) => {
                        info!(path = %p.display(), site = %reference.site.name, "Loaded reference data from {}", defaults::CONFIG_ENV_VAR);
                        return reference;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load reference data from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./pump_reference.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(reference) => {
                    info!(site = %reference.site.name, "Loaded reference data from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return reference;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No reference data file found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML contents.
    ///
    /// Unknown keys are logged as warnings and never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let reference: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        reference.validate()?;
        Ok(reference)
    }

    /// Serialize the reference data to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn pump_profile(&self, size: PumpSize) -> &PumpSizeProfile {
        self.pump_sizes.get(size)
    }

    pub fn product(&self, product: ProductType) -> &ProductProfile {
        self.products.get(product)
    }

    pub fn zone_limits(&self, foundation: FoundationType) -> &ZoneLimits {
        self.iso_limits.get(foundation)
    }

    pub fn fault_for(&self, direction: Direction) -> FaultType {
        self.fault_mapping.get(direction)
    }

    /// Position of a domain in the priority order. Unlisted domains rank last.
    pub fn priority_index(&self, domain: Domain) -> usize {
        self.diagnosis
            .priority
            .iter()
            .position(|d| *d == domain)
            .unwrap_or(usize::MAX)
    }

    /// Validate all tables for internal consistency.
    ///
    /// Rules:
    /// - Alarm thresholds must be >= warning thresholds
    /// - Zone breakpoints must be positive and strictly increasing
    /// - Flexible-foundation limits must not be tighter than rigid ones
    /// - Values used as divisors must be positive
    /// - The priority list must name every analyzed domain exactly once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        // Electrical: alarm >= warning
        let e = &self.thresholds.electrical;
        Self::check_escalation(
            e.voltage_imbalance_warning_pct,
            e.voltage_imbalance_alarm_pct,
            "electrical.voltage_imbalance",
            &mut errors,
        );
        Self::check_escalation(
            e.current_imbalance_warning_pct,
            e.current_imbalance_alarm_pct,
            "electrical.current_imbalance",
            &mut errors,
        );
        Self::check_escalation(
            e.overload_warning_pct,
            e.overload_alarm_pct,
            "electrical.overload",
            &mut errors,
        );
        if e.underload_pct >= e.overload_warning_pct {
            errors.push(format!(
                "electrical.underload_pct ({:.1}) must be less than overload_warning_pct ({:.1})",
                e.underload_pct, e.overload_warning_pct
            ));
        }

        // Hydraulic: recirculation band below overload band
        let h = &self.thresholds.hydraulic;
        if h.recirculation_flow_ratio >= h.overload_flow_ratio {
            errors.push(format!(
                "hydraulic.recirculation_flow_ratio ({:.2}) must be less than overload_flow_ratio ({:.2})",
                h.recirculation_flow_ratio, h.overload_flow_ratio
            ));
        }
        if h.npsh_margin_warning_m <= 0.0 {
            errors.push("hydraulic.npsh_margin_warning_m must be > 0".to_string());
        }

        // Vibration confidence bands
        let v = &self.thresholds.vibration;
        Self::check_escalation(
            v.confidence_medium_mm_s,
            v.confidence_high_mm_s,
            "vibration.confidence",
            &mut errors,
        );

        // ISO limits
        for (name, limits) in [("rigid", &self.iso_limits.rigid), ("flexible", &self.iso_limits.flexible)] {
            if !(limits.zone_a_max > 0.0
                && limits.zone_a_max < limits.zone_b_max
                && limits.zone_b_max < limits.zone_c_max)
            {
                errors.push(format!(
                    "iso_limits.{name}: breakpoints must satisfy 0 < zone_a_max < zone_b_max < zone_c_max (got {}, {}, {})",
                    limits.zone_a_max, limits.zone_b_max, limits.zone_c_max
                ));
            }
        }
        let (rigid, flexible) = (&self.iso_limits.rigid, &self.iso_limits.flexible);
        if flexible.zone_a_max < rigid.zone_a_max
            || flexible.zone_b_max < rigid.zone_b_max
            || flexible.zone_c_max < rigid.zone_c_max
        {
            errors.push(
                "iso_limits.flexible must not be tighter than iso_limits.rigid".to_string(),
            );
        }

        // Divisors
        for size in PumpSize::ALL {
            let p = self.pump_profile(size);
            let key = size.as_str().to_ascii_lowercase();
            if p.bep_flow_m3h <= 0.0 {
                errors.push(format!("pump_sizes.{key}.bep_flow_m3h must be > 0 (used as divisor)"));
            }
            if p.fla_a <= 0.0 {
                errors.push(format!("pump_sizes.{key}.fla_a must be > 0 (used as divisor)"));
            }
            if p.npshr_m < 0.0 {
                errors.push(format!("pump_sizes.{key}.npshr_m cannot be negative"));
            }
        }
        for product in ProductType::ALL {
            let p = self.product(product);
            let key = product.as_str().to_ascii_lowercase();
            if p.density_kg_m3 <= 0.0 {
                errors.push(format!("products.{key}.density_kg_m3 must be > 0 (used as divisor)"));
            }
            if p.vapor_pressure_kpa < 0.0 {
                errors.push(format!("products.{key}.vapor_pressure_kpa cannot be negative"));
            }
        }
        if self.physics.gravity_m_s2 <= 0.0 {
            errors.push("physics.gravity_m_s2 must be > 0 (used as divisor)".to_string());
        }

        // Priority list
        for domain in Domain::ANALYZED {
            let count = self.diagnosis.priority.iter().filter(|d| **d == domain).count();
            if count != 1 {
                errors.push(format!(
                    "diagnosis.priority must list {domain} exactly once (found {count})"
                ));
            }
        }
        if self
            .diagnosis
            .priority
            .iter()
            .filter(|d| **d == Domain::Thermal)
            .count()
            > 1
        {
            errors.push("diagnosis.priority lists THERMAL more than once".to_string());
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        // Reject NaN/Inf in any value (sweep all f64 fields via serialization)
        if let Ok(value) = toml::Value::try_from(self) {
            let mut bad = Vec::new();
            collect_non_finite(&value, "", &mut bad);
            for path in bad {
                errors.push(format!("{path} must be a finite number"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_escalation(warning: f64, alarm: f64, name: &str, errors: &mut Vec<String>) {
        // NaN/Inf comparisons silently pass
        if !warning.is_finite() || !alarm.is_finite() {
            errors.push(format!(
                "{name}: values must be finite (got warning={warning}, alarm={alarm})"
            ));
            return;
        }
        if alarm < warning {
            errors.push(format!(
                "{name}: alarm ({alarm:.3}) must be >= warning ({warning:.3})"
            ));
        }
    }
}

fn collect_non_finite(value: &toml::Value, prefix: &str, out: &mut Vec<String>) {
    match value {
        toml::Value::Float(f) if !f.is_finite() => out.push(prefix.to_string()),
        toml::Value::Table(table) => {
            for (key, child) in table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_non_finite(child, &path, out);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Reference data validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Site Info
// ============================================================================

/// Identification metadata. Not used for logic; appears in logs and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Site / terminal name
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Operating company
    #[serde(default)]
    pub company: String,

    /// Free-form location
    #[serde(default)]
    pub location: String,
}

fn default_site_name() -> String {
    "DEFAULT".to_string()
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            company: String::new(),
            location: String::new(),
        }
    }
}

// ============================================================================
// Diagnosis
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisConfig {
    /// Domain order used to break ties between equally severe domains and to
    /// group recommendations.
    #[serde(default = "default_priority")]
    pub priority: Vec<Domain>,
}

fn default_priority() -> Vec<Domain> {
    Domain::ALL.to_vec()
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
        }
    }
}

// ============================================================================
// Pump Sizes
// ============================================================================

/// Pump size class defaults. A profile section, when present, must be complete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpSizeProfile {
    /// NPSH required (m)
    pub npshr_m: f64,
    /// Best efficiency point flow (m³/h)
    pub bep_flow_m3h: f64,
    /// Motor full-load amps (A)
    pub fla_a: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PumpSizeTable {
    #[serde(default = "default_small_pump")]
    pub small: PumpSizeProfile,
    #[serde(default = "default_medium_pump")]
    pub medium: PumpSizeProfile,
    #[serde(default = "default_large_pump")]
    pub large: PumpSizeProfile,
}

fn default_small_pump() -> PumpSizeProfile {
    PumpSizeProfile { npshr_m: 3.0, bep_flow_m3h: 30.0, fla_a: 15.0 }
}
fn default_medium_pump() -> PumpSizeProfile {
    PumpSizeProfile { npshr_m: 4.5, bep_flow_m3h: 100.0, fla_a: 30.0 }
}
fn default_large_pump() -> PumpSizeProfile {
    PumpSizeProfile { npshr_m: 6.0, bep_flow_m3h: 250.0, fla_a: 60.0 }
}

impl PumpSizeTable {
    pub fn get(&self, size: PumpSize) -> &PumpSizeProfile {
        match size {
            PumpSize::Small => &self.small,
            PumpSize::Medium => &self.medium,
            PumpSize::Large => &self.large,
        }
    }
}

impl Default for PumpSizeTable {
    fn default() -> Self {
        Self {
            small: default_small_pump(),
            medium: default_medium_pump(),
            large: default_large_pump(),
        }
    }
}

// ============================================================================
// Products
// ============================================================================

/// Fluid properties of a pumped product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductProfile {
    /// Density (kg/m³)
    pub density_kg_m3: f64,
    /// Temperature assumed when a reading carries none (°C)
    pub default_temp_c: f64,
    /// Relative fire/handling risk (1-5)
    pub risk_factor: u8,
    /// True vapor pressure at `default_temp_c` (kPa abs)
    pub vapor_pressure_kpa: f64,
    /// Volatile products get a more sensitive HF cavitation limit.
    pub volatile: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTable {
    #[serde(default = "default_gasoline")]
    pub gasoline: ProductProfile,
    #[serde(default = "default_diesel")]
    pub diesel: ProductProfile,
    #[serde(default = "default_avtur")]
    pub avtur: ProductProfile,
    #[serde(default = "default_naphtha")]
    pub naphtha: ProductProfile,
}

fn default_gasoline() -> ProductProfile {
    ProductProfile { density_kg_m3: 740.0, default_temp_c: 30.0, risk_factor: 5, vapor_pressure_kpa: 55.0, volatile: true }
}
fn default_diesel() -> ProductProfile {
    ProductProfile { density_kg_m3: 840.0, default_temp_c: 25.0, risk_factor: 3, vapor_pressure_kpa: 0.3, volatile: false }
}
fn default_avtur() -> ProductProfile {
    ProductProfile { density_kg_m3: 780.0, default_temp_c: 28.0, risk_factor: 4, vapor_pressure_kpa: 1.0, volatile: true }
}
fn default_naphtha() -> ProductProfile {
    ProductProfile { density_kg_m3: 700.0, default_temp_c: 32.0, risk_factor: 5, vapor_pressure_kpa: 40.0, volatile: true }
}

impl ProductTable {
    pub fn get(&self, product: ProductType) -> &ProductProfile {
        match product {
            ProductType::Gasoline => &self.gasoline,
            ProductType::Diesel => &self.diesel,
            ProductType::Avtur => &self.avtur,
            ProductType::Naphtha => &self.naphtha,
        }
    }
}

impl Default for ProductTable {
    fn default() -> Self {
        Self {
            gasoline: default_gasoline(),
            diesel: default_diesel(),
            avtur: default_avtur(),
            naphtha: default_naphtha(),
        }
    }
}

// ============================================================================
// ISO 10816-3 Limits
// ============================================================================

/// Cumulative zone breakpoints (mm/s RMS). Above `zone_c_max` is zone D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneLimits {
    pub zone_a_max: f64,
    pub zone_b_max: f64,
    pub zone_c_max: f64,
}

impl ZoneLimits {
    /// A reading exactly at a breakpoint belongs to the lower zone.
    pub fn table(&self) -> ThresholdTable<Zone> {
        ThresholdTable::new(Zone::D)
            .band(Bound::AtMost(self.zone_a_max), Zone::A)
            .band(Bound::AtMost(self.zone_b_max), Zone::B)
            .band(Bound::AtMost(self.zone_c_max), Zone::C)
    }
}

/// Class III machine limits per foundation type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsoLimitsTable {
    #[serde(default = "default_rigid_limits")]
    pub rigid: ZoneLimits,
    #[serde(default = "default_flexible_limits")]
    pub flexible: ZoneLimits,
}

fn default_rigid_limits() -> ZoneLimits {
    ZoneLimits { zone_a_max: 2.8, zone_b_max: 4.5, zone_c_max: 7.1 }
}
fn default_flexible_limits() -> ZoneLimits {
    ZoneLimits { zone_a_max: 4.5, zone_b_max: 7.1, zone_c_max: 11.2 }
}

impl IsoLimitsTable {
    pub fn get(&self, foundation: FoundationType) -> &ZoneLimits {
        match foundation {
            FoundationType::Rigid => &self.rigid,
            FoundationType::Flexible => &self.flexible,
        }
    }
}

impl Default for IsoLimitsTable {
    fn default() -> Self {
        Self {
            rigid: default_rigid_limits(),
            flexible: default_flexible_limits(),
        }
    }
}

// ============================================================================
// Fault Mapping
// ============================================================================

/// Fault attributed when an axis carries the highest vibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultMapping {
    #[serde(default = "default_fault_h")]
    pub horizontal: FaultType,
    #[serde(default = "default_fault_v")]
    pub vertical: FaultType,
    #[serde(default = "default_fault_a")]
    pub axial: FaultType,
}

fn default_fault_h() -> FaultType { FaultType::Unbalance }
fn default_fault_v() -> FaultType { FaultType::Looseness }
fn default_fault_a() -> FaultType { FaultType::Misalignment }

impl FaultMapping {
    pub fn get(&self, direction: Direction) -> FaultType {
        match direction {
            Direction::Horizontal => self.horizontal,
            Direction::Vertical => self.vertical,
            Direction::Axial => self.axial,
        }
    }
}

impl Default for FaultMapping {
    fn default() -> Self {
        Self {
            horizontal: default_fault_h(),
            vertical: default_fault_v(),
            axial: default_fault_a(),
        }
    }
}

// ============================================================================
// Threshold Config (master container)
// ============================================================================

/// All analyzer band thresholds, grouped by domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub electrical: ElectricalThresholds,

    #[serde(default)]
    pub hydraulic: HydraulicThresholds,

    #[serde(default)]
    pub vibration: VibrationThresholds,
}

// ============================================================================
// Electrical Thresholds
// ============================================================================

/// Imbalance (NEMA MG-1 definition) and FLA load bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricalThresholds {
    /// Voltage imbalance above this is a warning (%).
    #[serde(default = "default_voltage_imbalance_warning")]
    pub voltage_imbalance_warning_pct: f64,

    /// Voltage imbalance above this is an alarm (%).
    #[serde(default = "default_voltage_imbalance_alarm")]
    pub voltage_imbalance_alarm_pct: f64,

    /// Current imbalance above this is a warning (%).
    #[serde(default = "default_current_imbalance_warning")]
    pub current_imbalance_warning_pct: f64,

    /// Current imbalance above this is an alarm (%).
    #[serde(default = "default_current_imbalance_alarm")]
    pub current_imbalance_alarm_pct: f64,

    /// Load below this is underload (% FLA).
    #[serde(default = "default_underload")]
    pub underload_pct: f64,

    /// Load above this is an overload warning (% FLA).
    #[serde(default = "default_overload_warning")]
    pub overload_warning_pct: f64,

    /// Load above this is an overload alarm (% FLA).
    #[serde(default = "default_overload_alarm")]
    pub overload_alarm_pct: f64,
}

fn default_voltage_imbalance_warning() -> f64 { 2.0 }
fn default_voltage_imbalance_alarm() -> f64 { 5.0 }
fn default_current_imbalance_warning() -> f64 { 5.0 }
fn default_current_imbalance_alarm() -> f64 { 10.0 }
fn default_underload() -> f64 { 80.0 }
fn default_overload_warning() -> f64 { 110.0 }
fn default_overload_alarm() -> f64 { 125.0 }

impl ElectricalThresholds {
    pub fn voltage_imbalance_table(&self) -> ThresholdTable<ImbalanceTier> {
        imbalance_table(self.voltage_imbalance_warning_pct, self.voltage_imbalance_alarm_pct)
    }

    pub fn current_imbalance_table(&self) -> ThresholdTable<ImbalanceTier> {
        imbalance_table(self.current_imbalance_warning_pct, self.current_imbalance_alarm_pct)
    }

    pub fn load_table(&self) -> ThresholdTable<LoadStatus> {
        ThresholdTable::new(LoadStatus::OverloadAlarm)
            .band(Bound::Below(self.underload_pct), LoadStatus::Underload)
            .band(Bound::AtMost(self.overload_warning_pct), LoadStatus::Normal)
            .band(Bound::AtMost(self.overload_alarm_pct), LoadStatus::OverloadWarning)
    }
}

fn imbalance_table(warning: f64, alarm: f64) -> ThresholdTable<ImbalanceTier> {
    ThresholdTable::new(ImbalanceTier::Alarm)
        .band(Bound::AtMost(warning), ImbalanceTier::Normal)
        .band(Bound::AtMost(alarm), ImbalanceTier::Warning)
}

impl Default for ElectricalThresholds {
    fn default() -> Self {
        Self {
            voltage_imbalance_warning_pct: default_voltage_imbalance_warning(),
            voltage_imbalance_alarm_pct: default_voltage_imbalance_alarm(),
            current_imbalance_warning_pct: default_current_imbalance_warning(),
            current_imbalance_alarm_pct: default_current_imbalance_alarm(),
            underload_pct: default_underload(),
            overload_warning_pct: default_overload_warning(),
            overload_alarm_pct: default_overload_alarm(),
        }
    }
}

// ============================================================================
// Hydraulic Thresholds
// ============================================================================

/// BEP flow bands and the NPSH margin warning band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydraulicThresholds {
    /// Flow below this fraction of BEP risks suction/discharge recirculation.
    #[serde(default = "default_recirculation_ratio")]
    pub recirculation_flow_ratio: f64,

    /// Flow above this fraction of BEP risks cavitation and motor overload.
    #[serde(default = "default_overload_ratio")]
    pub overload_flow_ratio: f64,

    /// NPSHa margin (beyond NPSHr + safety margin) below which risk is MEDIUM (m).
    #[serde(default = "default_npsh_margin_warning")]
    pub npsh_margin_warning_m: f64,
}

fn default_recirculation_ratio() -> f64 { 0.6 }
fn default_overload_ratio() -> f64 { 1.2 }
fn default_npsh_margin_warning() -> f64 { 1.0 }

impl HydraulicThresholds {
    pub fn flow_table(&self) -> ThresholdTable<FlowStatus> {
        ThresholdTable::new(FlowStatus::OverloadCavitationRisk)
            .band(Bound::Below(self.recirculation_flow_ratio), FlowStatus::RecirculationRisk)
            .band(Bound::AtMost(self.overload_flow_ratio), FlowStatus::Normal)
    }

    /// Classifies `npsha - (npshr + safety margin)`.
    pub fn cavitation_table(&self) -> ThresholdTable<RiskLevel> {
        ThresholdTable::new(RiskLevel::Low)
            .band(Bound::Below(0.0), RiskLevel::High)
            .band(Bound::Below(self.npsh_margin_warning_m), RiskLevel::Medium)
    }
}

impl Default for HydraulicThresholds {
    fn default() -> Self {
        Self {
            recirculation_flow_ratio: default_recirculation_ratio(),
            overload_flow_ratio: default_overload_ratio(),
            npsh_margin_warning_m: default_npsh_margin_warning(),
        }
    }
}

// ============================================================================
// Vibration Thresholds
// ============================================================================

/// Fault confidence bands and high-frequency screening limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VibrationThresholds {
    /// Axis average above this gives HIGH fault confidence (mm/s).
    #[serde(default = "default_confidence_high")]
    pub confidence_high_mm_s: f64,

    /// Axis average above this gives MEDIUM fault confidence (mm/s).
    #[serde(default = "default_confidence_medium")]
    pub confidence_medium_mm_s: f64,

    /// HF band cavitation limit for volatile products (g).
    #[serde(default = "default_hf_volatile")]
    pub hf_cavitation_volatile_g: f64,

    /// HF band cavitation limit for other products (g).
    #[serde(default = "default_hf_default")]
    pub hf_cavitation_default_g: f64,

    /// Demodulation level indicating an early bearing defect (gE).
    #[serde(default = "default_demodulation_bearing")]
    pub demodulation_bearing_defect_ge: f64,
}

fn default_confidence_high() -> f64 { 4.5 }
fn default_confidence_medium() -> f64 { 2.8 }
fn default_hf_volatile() -> f64 { 0.3 }
fn default_hf_default() -> f64 { 0.5 }
fn default_demodulation_bearing() -> f64 { 0.5 }

impl VibrationThresholds {
    pub fn confidence_table(&self) -> ThresholdTable<RiskLevel> {
        ThresholdTable::new(RiskLevel::High)
            .band(Bound::AtMost(self.confidence_medium_mm_s), RiskLevel::Low)
            .band(Bound::AtMost(self.confidence_high_mm_s), RiskLevel::Medium)
    }

    pub fn hf_cavitation_limit(&self, volatile: bool) -> f64 {
        if volatile {
            self.hf_cavitation_volatile_g
        } else {
            self.hf_cavitation_default_g
        }
    }
}

impl Default for VibrationThresholds {
    fn default() -> Self {
        Self {
            confidence_high_mm_s: default_confidence_high(),
            confidence_medium_mm_s: default_confidence_medium(),
            hf_cavitation_volatile_g: default_hf_volatile(),
            hf_cavitation_default_g: default_hf_default(),
            demodulation_bearing_defect_ge: default_demodulation_bearing(),
        }
    }
}

// ============================================================================
// Physics Config
// ============================================================================

/// Constants for NPSHa and head conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Local atmospheric pressure (kPa). Suction gauge + this = absolute.
    #[serde(default = "default_atmospheric")]
    pub atmospheric_pressure_kpa: f64,

    /// Gravitational acceleration (m/s²).
    #[serde(default = "default_gravity")]
    pub gravity_m_s2: f64,

    /// Exponential vapor pressure growth per °C above the product default temperature.
    #[serde(default = "default_vapor_coeff")]
    pub vapor_pressure_temp_coeff: f64,
}

fn default_atmospheric() -> f64 { defaults::STANDARD_ATMOSPHERE_KPA }
fn default_gravity() -> f64 { defaults::STANDARD_GRAVITY_M_S2 }
fn default_vapor_coeff() -> f64 { 0.035 }

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            atmospheric_pressure_kpa: default_atmospheric(),
            gravity_m_s2: default_gravity(),
            vapor_pressure_temp_coeff: default_vapor_coeff(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ReferenceData::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_roundtrip_through_toml() {
        let toml_str = ReferenceData::default().to_toml().unwrap();
        let parsed = ReferenceData::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed.pump_profile(PumpSize::Medium).fla_a, 30.0);
        assert_eq!(parsed.diagnosis.priority, Domain::ALL.to_vec());
        assert_eq!(parsed.fault_for(Direction::Axial), FaultType::Misalignment);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let reference = ReferenceData::from_toml_str("").unwrap();
        assert_eq!(reference.zone_limits(FoundationType::Rigid).zone_b_max, 4.5);
        assert_eq!(reference.product(ProductType::Diesel).density_kg_m3, 840.0);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let reference = ReferenceData::from_toml_str(
            r#"
[thresholds.electrical]
voltage_imbalance_warning_pct = 1.5

[pump_sizes.small]
npshr_m = 2.5
bep_flow_m3h = 25.0
fla_a = 12.0
"#,
        )
        .unwrap();
        assert_eq!(reference.thresholds.electrical.voltage_imbalance_warning_pct, 1.5);
        assert_eq!(reference.thresholds.electrical.voltage_imbalance_alarm_pct, 5.0);
        assert_eq!(reference.pump_profile(PumpSize::Small).fla_a, 12.0);
        assert_eq!(reference.pump_profile(PumpSize::Large).fla_a, 60.0);
    }

    #[test]
    fn test_incomplete_profile_is_parse_error() {
        let result = ReferenceData::from_toml_str(
            r#"
[pump_sizes.small]
npshr_m = 2.5
"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_, _))));
    }

    #[test]
    fn test_inverted_escalation_rejected() {
        let mut reference = ReferenceData::default();
        reference.thresholds.electrical.current_imbalance_alarm_pct = 3.0;
        let err = reference.validate().unwrap_err();
        assert!(err.to_string().contains("electrical.current_imbalance"));
    }

    #[test]
    fn test_non_increasing_zone_limits_rejected() {
        let mut reference = ReferenceData::default();
        reference.iso_limits.rigid.zone_b_max = 2.0;
        let err = reference.validate().unwrap_err();
        assert!(err.to_string().contains("iso_limits.rigid"));
    }

    #[test]
    fn test_flexible_tighter_than_rigid_rejected() {
        let mut reference = ReferenceData::default();
        reference.iso_limits.flexible = ZoneLimits { zone_a_max: 2.0, zone_b_max: 4.0, zone_c_max: 7.0 };
        let err = reference.validate().unwrap_err();
        assert!(err.to_string().contains("iso_limits.flexible"));
    }

    #[test]
    fn test_zero_bep_flow_rejected() {
        let mut reference = ReferenceData::default();
        reference.pump_sizes.medium.bep_flow_m3h = 0.0;
        let err = reference.validate().unwrap_err();
        assert!(err.to_string().contains("pump_sizes.medium.bep_flow_m3h"));
    }

    #[test]
    fn test_priority_must_list_each_analyzed_domain_once() {
        let mut reference = ReferenceData::default();
        reference.diagnosis.priority = vec![Domain::Hydraulic, Domain::Hydraulic, Domain::Mechanical];
        let msg = reference.validate().unwrap_err().to_string();
        assert!(msg.contains("HYDRAULIC exactly once"));
        assert!(msg.contains("ELECTRICAL exactly once"));
    }

    #[test]
    fn test_priority_index_follows_declared_order() {
        let reference = ReferenceData::default();
        assert!(reference.priority_index(Domain::Hydraulic) < reference.priority_index(Domain::Electrical));
        assert!(reference.priority_index(Domain::Electrical) < reference.priority_index(Domain::Mechanical));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let mut reference = ReferenceData::default();
        reference.thresholds.vibration.hf_cavitation_default_g = f64::NAN;
        let msg = reference.validate().unwrap_err().to_string();
        assert!(msg.contains("thresholds.vibration.hf_cavitation_default_g must be a finite number"));
    }

    #[test]
    fn test_zone_table_boundaries() {
        let table = default_rigid_limits().table();
        assert_eq!(table.classify(2.8), Zone::A);
        assert_eq!(table.classify(4.5), Zone::B);
        assert_eq!(table.classify(7.1), Zone::C);
        assert_eq!(table.classify(7.11), Zone::D);
    }
}
