//! Shared data structures for the pump diagnosis pipeline:
//! - Equipment vocabulary (pump size, product, foundation, axis, zone, fault)
//! - Threshold tables and status tiers
//! - Readings (analyzer inputs)
//! - Assessments (analyzer outputs) and the overall diagnosis
//! - Structured recommendations

mod equipment;
pub mod thresholds;
mod readings;
mod assessment;
mod vibration;
mod recommendation;
mod diagnosis;

pub use equipment::*;
pub use thresholds::*;
pub use readings::*;
pub use assessment::*;
pub use vibration::*;
pub use recommendation::*;
pub use diagnosis::*;
