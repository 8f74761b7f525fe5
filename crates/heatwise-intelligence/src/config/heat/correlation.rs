// ABOUTME: Correlation engine configuration for environment/physiology alignment
// ABOUTME: Spike detection, look-back window, primary-factor cut-offs, and confidence steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Correlation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Fraction of the stream used for the heat-index baseline
    pub baseline_fraction: f64,
    /// Rise above baseline heat index that emits a heat spike (°C)
    pub heat_spike_delta_celsius: f64,
    /// Humidity crossing that emits a humidity spike (%)
    pub humidity_spike_percent: f64,
    /// Samples suppressed after each emitted spike
    pub spike_cooldown_samples: usize,
    /// Distance before an onset searched for a spike (km)
    pub preceding_window_km: f64,
    /// Mean heat index earning the first bonus step (°C)
    pub warm_bonus_heat_index: f64,
    /// Mean heat index earning the second bonus step (°C)
    pub hot_bonus_heat_index: f64,
    /// Size of each heat bonus step
    pub heat_bonus_step: f64,
    /// Mean heat index above which heat is a primary factor (°C)
    pub primary_heat_index: f64,
    /// Mean temperature above which heat is a primary factor (°C)
    pub primary_temperature_celsius: f64,
    /// Mean humidity above which humidity is a primary factor (%)
    pub primary_humidity_percent: f64,
    /// Starting confidence
    pub base_confidence: f64,
    /// Weather streams longer than this earn a confidence step
    pub dense_weather_points: usize,
    /// Size of each confidence step
    pub confidence_step: f64,
    /// Confidence removed when no environmental spike exists
    pub no_spike_penalty: f64,
    /// Strength below which the summary reports limited evidence
    pub weak_strength_threshold: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            baseline_fraction: 0.30,
            heat_spike_delta_celsius: 5.0,
            humidity_spike_percent: 80.0,
            spike_cooldown_samples: 10,
            preceding_window_km: 5.0,
            warm_bonus_heat_index: 27.0,
            hot_bonus_heat_index: 32.0,
            heat_bonus_step: 0.5,
            primary_heat_index: 32.0,
            primary_temperature_celsius: 25.0,
            primary_humidity_percent: 70.0,
            base_confidence: 0.5,
            dense_weather_points: 100,
            confidence_step: 0.1,
            no_spike_penalty: 0.2,
            weak_strength_threshold: 0.3,
        }
    }
}
