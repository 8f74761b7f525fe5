// ABOUTME: Weather models for hourly observations and per-sample adjusted conditions
// ABOUTME: AdjustedWeatherPoint is produced once per activity and consumed read-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::units::METERS_PER_KM;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hourly weather observation from the weather-history provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Observation time
    pub timestamp: DateTime<Utc>,
    /// Dry-bulb temperature in Celsius
    pub temperature_celsius: f64,
    /// Relative humidity (0-100)
    pub humidity_percent: f64,
    /// Dew point reported by the provider, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dew_point_celsius: Option<f64>,
}

impl WeatherObservation {
    /// Create an observation without a reported dew point
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        temperature_celsius: f64,
        humidity_percent: f64,
    ) -> Self {
        Self {
            timestamp,
            temperature_celsius,
            humidity_percent,
            dew_point_celsius: None,
        }
    }
}

/// Elevation- and time-adjusted weather at one activity sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedWeatherPoint {
    /// Absolute sample time
    pub timestamp: DateTime<Utc>,
    /// Seconds since the first sample
    pub elapsed_seconds: f64,
    /// Cumulative distance at this sample (metres)
    pub distance_meters: f64,
    /// Elevation used for the lapse-rate correction (metres)
    pub elevation_meters: f64,
    /// Elevation-corrected temperature (Celsius)
    pub temperature_celsius: f64,
    /// Elevation-corrected relative humidity (0-100)
    pub humidity_percent: f64,
    /// Dew point held constant through the correction (Celsius)
    pub dew_point_celsius: f64,
    /// Heat index (Celsius)
    pub heat_index_celsius: f64,
    /// Feels-like temperature (Celsius)
    pub feels_like_celsius: f64,
}

impl AdjustedWeatherPoint {
    /// Distance of this sample in kilometres
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / METERS_PER_KM
    }
}
