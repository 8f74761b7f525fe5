// ABOUTME: Weather interpolation engine projecting hourly observations onto activity samples
// ABOUTME: Applies lapse-rate temperature correction, dew-point-conserving humidity, heat index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Elevation-corrected, time-interpolated weather per activity sample.
//!
//! Hourly observations are taken at the weather station's elevation. Each
//! activity sample gets a linearly interpolated temperature and humidity,
//! which are then corrected to the sample's elevation. Humidity is corrected
//! by holding the dew point constant, so no moisture is created or destroyed
//! by the temperature change.

use crate::config::heat::WeatherInterpolationConfig;
use chrono::{DateTime, Utc};
use heatwise_core::constants::atmosphere::{rothfusz, MAGNUS_A, MAGNUS_B};
use heatwise_core::constants::units::{
    celsius_to_fahrenheit, fahrenheit_to_celsius, SECONDS_PER_HOUR,
};
use heatwise_core::errors::{AppError, AppResult};
use heatwise_core::models::{AdjustedWeatherPoint, StreamBundle, WeatherObservation};
use tracing::debug;

/// Observed dew point deviating this much from the Magnus estimate is logged
const DEW_POINT_DISAGREEMENT_CELSIUS: f64 = 3.0;

/// Projects hourly weather onto an activity's per-sample timeline
pub struct WeatherInterpolationEngine<'a> {
    config: &'a WeatherInterpolationConfig,
}

impl<'a> WeatherInterpolationEngine<'a> {
    /// Create an engine bound to the given configuration
    #[must_use]
    pub const fn new(config: &'a WeatherInterpolationConfig) -> Self {
        Self { config }
    }

    /// Interpolate weather for every sample of an activity
    ///
    /// Samples without elevation are treated as lying at `base_elevation`.
    ///
    /// # Errors
    ///
    /// Returns an error if `observations` is empty
    pub fn interpolate_activity(
        &self,
        bundle: &StreamBundle,
        observations: &[WeatherObservation],
        base_elevation: f64,
    ) -> AppResult<Vec<AdjustedWeatherPoint>> {
        let elevations = bundle.elevations_or(base_elevation);
        let timestamps = bundle.timestamps();
        let mut points =
            self.interpolate(observations, &elevations, &timestamps, base_elevation)?;
        for (point, sample) in points.iter_mut().zip(bundle.samples()) {
            point.distance_meters = sample.distance_meters;
        }
        Ok(points)
    }

    /// Interpolate weather onto parallel elevation and timestamp streams
    ///
    /// The returned points carry a zero distance; use
    /// [`Self::interpolate_activity`] to attach distances from a bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if the two streams differ in length or `observations` is empty
    pub fn interpolate(
        &self,
        observations: &[WeatherObservation],
        elevations: &[f64],
        timestamps: &[DateTime<Utc>],
        base_elevation: f64,
    ) -> AppResult<Vec<AdjustedWeatherPoint>> {
        if elevations.len() != timestamps.len() {
            return Err(AppError::invalid_input(format!(
                "Elevation stream has {} samples but timestamp stream has {}",
                elevations.len(),
                timestamps.len()
            )));
        }
        if observations.is_empty() {
            return Err(AppError::missing_field("hourly weather observations"));
        }

        let origin = timestamps.first().copied();
        let points: Vec<AdjustedWeatherPoint> = elevations
            .iter()
            .zip(timestamps)
            .map(|(&elevation, &timestamp)| {
                let (temperature, humidity) = self.conditions_at(observations, timestamp);
                let elapsed_seconds = origin.map_or(0.0, |start| {
                    (timestamp - start).num_milliseconds() as f64 / 1000.0
                });
                self.adjust_point(
                    timestamp,
                    elapsed_seconds,
                    elevation,
                    base_elevation,
                    temperature,
                    humidity,
                )
            })
            .collect();

        debug!(
            samples = points.len(),
            observations = observations.len(),
            base_elevation,
            "Interpolated weather onto activity timeline"
        );
        Ok(points)
    }

    fn adjust_point(
        &self,
        timestamp: DateTime<Utc>,
        elapsed_seconds: f64,
        elevation: f64,
        base_elevation: f64,
        temperature: f64,
        humidity: f64,
    ) -> AdjustedWeatherPoint {
        let corrected_temperature =
            self.adjust_temperature_for_elevation(temperature, humidity, elevation, base_elevation);
        let corrected_humidity =
            adjust_humidity_for_elevation(temperature, humidity, corrected_temperature);
        let heat_index = self.heat_index(corrected_temperature, corrected_humidity);

        AdjustedWeatherPoint {
            timestamp,
            elapsed_seconds,
            distance_meters: 0.0,
            elevation_meters: elevation,
            temperature_celsius: corrected_temperature,
            humidity_percent: corrected_humidity,
            dew_point_celsius: dew_point(temperature, humidity),
            heat_index_celsius: heat_index,
            feels_like_celsius: self.feels_like(
                corrected_temperature,
                corrected_humidity,
                heat_index,
            ),
        }
    }

    /// Temperature and humidity at `timestamp`, linearly interpolated
    ///
    /// Outside the observation range, or across a gap wider than the
    /// configured tolerance, the nearest observation is used.
    #[must_use]
    pub fn conditions_at(
        &self,
        observations: &[WeatherObservation],
        timestamp: DateTime<Utc>,
    ) -> (f64, f64) {
        let after = observations.partition_point(|o| o.timestamp <= timestamp);
        let (before, after) = match (after.checked_sub(1), observations.get(after)) {
            (Some(i), Some(next)) => (&observations[i], next),
            (Some(i), None) => return reported(&observations[i]),
            (None, Some(next)) => return reported(next),
            // Callers guarantee at least one observation
            (None, None) => return (0.0, 0.0),
        };

        let span = (after.timestamp - before.timestamp).num_milliseconds() as f64 / 1000.0;
        let offset = (timestamp - before.timestamp).num_milliseconds() as f64 / 1000.0;
        if span <= 0.0 {
            return reported(before);
        }
        if span > self.config.max_interpolation_gap_hours * SECONDS_PER_HOUR {
            let nearest = if offset <= span / 2.0 { before } else { after };
            return reported(nearest);
        }

        if let Some(observed) = before.dew_point_celsius {
            let estimated = dew_point(before.temperature_celsius, before.humidity_percent);
            if (observed - estimated).abs() > DEW_POINT_DISAGREEMENT_CELSIUS {
                debug!(
                    observed,
                    estimated, "Reported dew point disagrees with Magnus estimate"
                );
            }
        }

        let ratio = offset / span;
        (
            lerp(before.temperature_celsius, after.temperature_celsius, ratio),
            lerp(before.humidity_percent, after.humidity_percent, ratio),
        )
    }

    /// Correct a station temperature to a target elevation
    ///
    /// Uses the moist lapse rate when humidity exceeds the configured
    /// threshold, otherwise the dry rate.
    #[must_use]
    pub fn adjust_temperature_for_elevation(
        &self,
        temperature: f64,
        humidity: f64,
        target_elevation: f64,
        base_elevation: f64,
    ) -> f64 {
        let rate = if humidity > self.config.moist_humidity_threshold {
            self.config.moist_lapse_rate_c_per_m
        } else {
            self.config.dry_lapse_rate_c_per_m
        };
        (target_elevation - base_elevation).mul_add(-rate, temperature)
    }

    /// Heat index via the Rothfusz regression, or the temperature itself when cool or dry
    #[must_use]
    pub fn heat_index(&self, temperature: f64, humidity: f64) -> f64 {
        if temperature < self.config.heat_index_min_temperature_celsius
            || humidity < self.config.heat_index_min_humidity
        {
            return temperature;
        }
        fahrenheit_to_celsius(rothfusz_fahrenheit(
            celsius_to_fahrenheit(temperature),
            humidity,
        ))
    }

    /// Feels-like temperature
    ///
    /// At or above the switch temperature this is the heat index; below it,
    /// the temperature nudged by at most the configured offset for humidity.
    #[must_use]
    pub fn feels_like(&self, temperature: f64, humidity: f64, heat_index: f64) -> f64 {
        if temperature >= self.config.feels_like_heat_index_celsius {
            return heat_index;
        }
        let cap = self.config.feels_like_max_offset_celsius;
        let offset = ((humidity - self.config.feels_like_reference_humidity)
            * self.config.feels_like_offset_per_percent)
            .clamp(-cap, cap);
        temperature + offset
    }
}

/// Dew point via the Magnus formula (Celsius)
///
/// Humidity is floored at 0.01 % so bone-dry air still yields a finite dew point.
#[must_use]
pub fn dew_point(temperature: f64, humidity: f64) -> f64 {
    let gamma = (humidity.clamp(0.01, 100.0) / 100.0).ln() + magnus_term(temperature);
    MAGNUS_B * gamma / (MAGNUS_A - gamma)
}

/// Relative humidity at `corrected_temperature` that conserves the dew point
/// of (`original_temperature`, `original_humidity`), clamped to [0, 100]
#[must_use]
pub fn adjust_humidity_for_elevation(
    original_temperature: f64,
    original_humidity: f64,
    corrected_temperature: f64,
) -> f64 {
    if original_humidity <= 0.0 {
        return 0.0;
    }
    let td = dew_point(original_temperature, original_humidity);
    let humidity = 100.0 * (magnus_term(td) - magnus_term(corrected_temperature)).exp();
    if humidity.is_finite() {
        humidity.clamp(0.0, 100.0)
    } else {
        original_humidity.clamp(0.0, 100.0)
    }
}

fn magnus_term(temperature: f64) -> f64 {
    MAGNUS_A * temperature / (MAGNUS_B + temperature)
}

fn rothfusz_fahrenheit(t: f64, rh: f64) -> f64 {
    let t2 = t * t;
    let rh2 = rh * rh;
    rothfusz::C9.mul_add(
        t2 * rh2,
        rothfusz::C8.mul_add(
            t * rh2,
            rothfusz::C7.mul_add(
                t2 * rh,
                rothfusz::C6.mul_add(
                    rh2,
                    rothfusz::C5.mul_add(
                        t2,
                        rothfusz::C4.mul_add(
                            t * rh,
                            rothfusz::C3.mul_add(rh, rothfusz::C2.mul_add(t, rothfusz::C1)),
                        ),
                    ),
                ),
            ),
        ),
    )
}

fn reported(observation: &WeatherObservation) -> (f64, f64) {
    (
        observation.temperature_celsius,
        observation.humidity_percent,
    )
}

fn lerp(from: f64, to: f64, ratio: f64) -> f64 {
    (to - from).mul_add(ratio, from)
}
