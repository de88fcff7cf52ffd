//! Application constants for the UKF trace parser
//!
//! Marker literals, field patterns and column names emitted by the two
//! estimator test harnesses, plus defaults used by the CLI.

// =============================================================================
// Narrative Log Markers
// =============================================================================

/// Marker opening the normal-operation section (delimited rows)
pub const NORMAL_OPERATION_MARKER: &str = "Case 1:";

/// Marker opening the missing-measurement section (`k=.. t=.. (with meas|NO meas) ..`)
pub const MISSING_MEASUREMENT_MARKER: &str = "Case 2:";

/// Marker opening the low-noise section (`k=.. t=.. x_true=.. z_meas=.. x_est=..`)
pub const LOW_NOISE_MARKER: &str = "Case 3:";

/// Column header printed at the top of the normal-operation section
pub const NORMAL_OPERATION_HEADER_PREFIX: &str = "k,";

/// Field delimiter of normal-operation rows
pub const NORMAL_OPERATION_DELIMITER: char = ',';

/// Number of fields in a normal-operation row, including the leading index
pub const NORMAL_OPERATION_FIELD_COUNT: usize = 7;

// =============================================================================
// Field Grammar
// =============================================================================

/// Signed decimal with optional fraction and exponent
pub const NUMBER_PATTERN: &str = r"[-+]?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?";

/// Signed integer index
pub const INTEGER_PATTERN: &str = r"[-+]?\d+";

/// Flag literal printed when the filter consumed a measurement
pub const WITH_MEASUREMENT_LITERAL: &str = "with meas";

/// Flag literal printed for predict-only steps
pub const WITHOUT_MEASUREMENT_LITERAL: &str = "NO meas";

// =============================================================================
// Column Names
// =============================================================================

/// Column names shared by the narrative datasets
pub mod columns {
    pub const INDEX: &str = "k";
    pub const TIME: &str = "t";
    pub const X_TRUE: &str = "x_true";
    pub const V_TRUE: &str = "v_true";
    pub const Z_MEAS: &str = "z_meas";
    pub const X_EST: &str = "x_est";
    pub const V_EST: &str = "v_est";
    pub const HAS_MEAS: &str = "has_meas";
}

/// Header names every battery-harness table must carry
pub const BATTERY_COLUMNS: [&str; 17] = [
    "k", "t", "I", "SOC_true", "SOC_est", "T_true", "T_est", "H_est", "V_true", "V_meas", "V_est",
    "R0_true", "R0_model", "R1_true", "R1_model", "C1_true", "C1_model",
];

// =============================================================================
// Acquisition And CLI Defaults
// =============================================================================

/// Harness executed when the narrative command gets no input file
pub const DEFAULT_NARRATIVE_COMMAND: &str = "./ukf_test";

/// Harness executed when the tabular command gets no input file
pub const DEFAULT_TABULAR_COMMAND: &str = "./ukf_ecm_test";

/// Default number of skip messages kept in parse statistics
pub const DEFAULT_MAX_ERROR_SAMPLES: usize = 20;

/// Default tabular delimiter
pub const DEFAULT_TABULAR_DELIMITER: char = ',';

/// Crate name used as the default `tracing` filter target
pub const LOG_TARGET: &str = "ukf_trace";
