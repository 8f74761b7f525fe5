// ABOUTME: Environmental risk classification configuration
// ABOUTME: Heat-index risk bands, humidity strain, cooling climbs, and peak-heat window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Environmental risk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskClassificationConfig {
    /// Heat index at which caution begins (°C)
    pub caution_heat_index: f64,
    /// Heat index at which extreme caution begins (°C)
    pub extreme_caution_heat_index: f64,
    /// Heat index at which danger begins (°C)
    pub danger_heat_index: f64,
    /// Heat index at which extreme danger begins (°C)
    pub extreme_danger_heat_index: f64,
    /// Humidity at or above which strain accumulates (%)
    pub high_humidity_percent: f64,
    /// Sample-to-sample gain that opens a cooling climb (m)
    pub cooling_climb_start_gain_m: f64,
    /// Sample-to-sample gain below which a cooling climb closes (m)
    pub cooling_climb_continue_gain_m: f64,
    /// Minimum start-to-end temperature drop for a cooling segment (°C)
    pub cooling_min_drop_celsius: f64,
    /// Drop above which a cooling segment counts as significant (°C)
    pub cooling_significant_drop_celsius: f64,
    /// Maximum width of the peak-heat window (minutes)
    pub peak_window_minutes: f64,
}

impl Default for RiskClassificationConfig {
    fn default() -> Self {
        Self {
            caution_heat_index: 27.0,
            extreme_caution_heat_index: 32.0,
            danger_heat_index: 39.0,
            extreme_danger_heat_index: 51.0,
            high_humidity_percent: 80.0,
            cooling_climb_start_gain_m: 10.0,
            cooling_climb_continue_gain_m: 5.0,
            cooling_min_drop_celsius: 2.0,
            cooling_significant_drop_celsius: 5.0,
            peak_window_minutes: 60.0,
        }
    }
}
