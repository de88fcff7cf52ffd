//! Test utilities and fixtures for trace parser testing
//!
//! This module provides captured harness output and helper functions used
//! across the parser test modules.

use crate::app::models::RawLine;
use crate::constants::BATTERY_COLUMNS;

mod record_parser_tests;
mod stats_tests;

/// Narrative log shaped like a short scalar UKF harness run
pub fn create_test_narrative_log() -> String {
    r#"P0 = [  0.10000  0.00000 ]
Time step dt = 0.100, N = 60
Case 1: Normal operation with measurement every step.
k, t, x_true, v_true, z_meas, x_est, v_est
 0, 0.10,  0.1000,  1.0000,  0.1243,  0.0200,  0.5000
 1, 0.20,  0.2000,  1.0000,  0.1781,  0.0914,  0.7261
 2, 0.30,  0.3000,  1.0000,  0.3347,  0.2411,  0.8846

Case 2: Missing measurement from k=20 to k=29.
k=19 t=1.90 (with meas) x_true=1.900 x_est=1.887
k=20 t=2.00 (NO meas)  x_true=2.000 x_est=1.987
k=21 t=2.10 (NO meas)  x_true=2.100 x_est=2.087
k=30 t=3.00 (with meas) x_true=3.000 x_est=2.996

Case 3: Very small measurement noise (R ~ 0).
k= 0 t=0.10 x_true=0.10000 z_meas=0.10001 x_est=0.10000
k= 1 t=0.20 x_true=0.20000 z_meas=0.19999 x_est=0.20000
"#
    .to_string()
}

/// Battery table shaped like the ECM harness output
pub fn create_test_battery_table() -> String {
    let mut table = BATTERY_COLUMNS.join(",");
    table.push('\n');
    table.push_str(
        "0,0.00,1.0000,0.90000,0.85000,25.00,25.00,0.00000,4.0500,4.0512,4.0401,0.012000,0.012500,0.015000,0.015200,2400.00,2380.00\n",
    );
    table.push_str(
        "1,1.00,1.0000,0.89972,0.85100,25.01,25.00,-0.00010,4.0498,4.0470,4.0420,0.012001,0.012490,0.015001,0.015190,2400.10,2381.00\n",
    );
    table.push_str(
        "2,2.00,1.0000,0.89944,0.85190,25.02,25.01,-0.00020,4.0496,4.0521,4.0437,0.012002,0.012480,0.015002,0.015180,2400.20,2382.00\n",
    );
    table
}

/// Number the lines of a block of text
pub fn lines_of(content: &str) -> Vec<RawLine> {
    RawLine::from_lines(content.lines())
}
