// ABOUTME: Atmospheric constants for lapse-rate, dew-point, and heat-index calculations
// ABOUTME: Magnus coefficients and NWS Rothfusz regression terms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Atmospheric constants
//!
//! References:
//! - Alduchov, O.A. & Eskridge, R.E. (1996). Improved Magnus form approximation of saturation vapor pressure
//! - Rothfusz, L.P. (1990). The heat index equation, NWS Technical Attachment SR 90-23

/// Dry adiabatic environmental lapse rate (°C per metre)
pub const DRY_LAPSE_RATE_C_PER_M: f64 = 0.0065;

/// Moist (saturated) lapse rate used above the humidity cut-over (°C per metre)
pub const MOIST_LAPSE_RATE_C_PER_M: f64 = 0.005;

/// Magnus coefficient `a` (dimensionless)
pub const MAGNUS_A: f64 = 17.625;

/// Magnus coefficient `b` (°C)
pub const MAGNUS_B: f64 = 243.04;

/// Rothfusz regression coefficients, applied in °F and percent humidity
pub mod rothfusz {
    /// Constant term
    pub const C1: f64 = -42.379;
    /// Temperature term
    pub const C2: f64 = 2.049_015_23;
    /// Humidity term
    pub const C3: f64 = 10.143_331_27;
    /// Temperature × humidity term
    pub const C4: f64 = -0.224_755_41;
    /// Temperature² term
    pub const C5: f64 = -6.837_83e-3;
    /// Humidity² term
    pub const C6: f64 = -5.481_717e-2;
    /// Temperature² × humidity term
    pub const C7: f64 = 1.228_74e-3;
    /// Temperature × humidity² term
    pub const C8: f64 = 8.528_2e-4;
    /// Temperature² × humidity² term
    pub const C9: f64 = -1.99e-6;
}
