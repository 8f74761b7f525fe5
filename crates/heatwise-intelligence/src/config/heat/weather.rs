// ABOUTME: Weather interpolation configuration for elevation and humidity correction
// ABOUTME: Configures lapse rates, heat-index applicability, feels-like offsets, and gap tolerance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use heatwise_core::constants::atmosphere::{DRY_LAPSE_RATE_C_PER_M, MOIST_LAPSE_RATE_C_PER_M};
use serde::{Deserialize, Serialize};

/// Weather interpolation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherInterpolationConfig {
    /// Lapse rate applied when humidity is at or below the moist threshold (°C/m)
    pub dry_lapse_rate_c_per_m: f64,
    /// Lapse rate applied above the moist threshold (°C/m)
    pub moist_lapse_rate_c_per_m: f64,
    /// Humidity above which the moist lapse rate applies (%)
    pub moist_humidity_threshold: f64,
    /// Minimum temperature for the Rothfusz heat index (°C, 80 °F)
    pub heat_index_min_temperature_celsius: f64,
    /// Minimum humidity for the Rothfusz heat index (%)
    pub heat_index_min_humidity: f64,
    /// Temperature at which feels-like switches to the heat index (°C)
    pub feels_like_heat_index_celsius: f64,
    /// Humidity around which the feels-like offset is zero (%)
    pub feels_like_reference_humidity: f64,
    /// Feels-like offset per humidity percent above reference (°C/%)
    pub feels_like_offset_per_percent: f64,
    /// Maximum absolute feels-like offset (°C)
    pub feels_like_max_offset_celsius: f64,
    /// Bracketing observations further apart than this fall back to nearest (hours)
    pub max_interpolation_gap_hours: f64,
}

impl Default for WeatherInterpolationConfig {
    fn default() -> Self {
        Self {
            dry_lapse_rate_c_per_m: DRY_LAPSE_RATE_C_PER_M,
            moist_lapse_rate_c_per_m: MOIST_LAPSE_RATE_C_PER_M,
            moist_humidity_threshold: 70.0,
            heat_index_min_temperature_celsius: 26.7,
            heat_index_min_humidity: 40.0,
            feels_like_heat_index_celsius: 27.0,
            feels_like_reference_humidity: 50.0,
            feels_like_offset_per_percent: 0.02,
            feels_like_max_offset_celsius: 1.0,
            max_interpolation_gap_hours: 3.0,
        }
    }
}
