// ABOUTME: Shared fixtures for heat analysis integration tests
// ABOUTME: Synthetic stream bundles, weather series, and adjusted points for known scenarios
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::too_many_lines,
    clippy::similar_names,
    clippy::cast_precision_loss
)]
//! Shared test utilities for heat analysis integration tests
//!
//! Streams are generated at a fixed 10 s sample interval unless stated
//! otherwise, so a 600-sample bundle covers 100 minutes.

use chrono::{DateTime, Duration, TimeZone, Utc};
use heatwise::models::{AdjustedWeatherPoint, StreamBundle, StreamSample, WeatherObservation};
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Sample interval used by the stream builders (seconds)
pub const SAMPLE_INTERVAL_SECONDS: f64 = 10.0;

/// Initialize quiet logging for tests (call once per test)
///
/// Set `TEST_LOG=debug` to see pipeline logs while debugging a test.
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") | Ok("trace") => Level::TRACE,
            Ok("DEBUG") | Ok("debug") => Level::DEBUG,
            Ok("INFO") | Ok("info") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .compact()
            .try_init()
            .ok();
    });
}

/// Fixed activity start used by every fixture
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 15, 8, 0, 0).unwrap()
}

/// A steady effort on flat ground: 3 m/s, 140 bpm, 170 spm, grade 0
pub fn steady_samples(count: usize, elevation: f64) -> Vec<StreamSample> {
    let mut distance = 0.0;
    (0..count)
        .map(|i| {
            if i > 0 {
                distance += 3.0 * SAMPLE_INTERVAL_SECONDS;
            }
            StreamSample {
                elapsed_seconds: i as f64 * SAMPLE_INTERVAL_SECONDS,
                distance_meters: distance,
                elevation_meters: Some(elevation),
                velocity_mps: Some(3.0),
                heart_rate_bpm: Some(140.0),
                cadence_spm: Some(170.0),
                grade: Some(0.0),
            }
        })
        .collect()
}

/// Recompute cumulative distance from each sample's velocity
pub fn recompute_distance(samples: &mut [StreamSample]) {
    let mut distance = 0.0;
    let mut previous: Option<(f64, f64)> = None;
    for sample in samples.iter_mut() {
        if let Some((elapsed, velocity)) = previous {
            distance += velocity * (sample.elapsed_seconds - elapsed);
        }
        sample.distance_meters = distance;
        previous = Some((sample.elapsed_seconds, sample.velocity_mps.unwrap_or(0.0)));
    }
}

/// Build a bundle starting at [`start_time`]
pub fn bundle(samples: Vec<StreamSample>) -> StreamBundle {
    StreamBundle::new(start_time(), samples).unwrap()
}

/// Hot and humid run: HR drifts 15 bpm and velocity fades 20 % from halfway
///
/// 600 samples, flat at sea level, grade channel present.
pub fn hot_humid_samples() -> Vec<StreamSample> {
    let mut samples = steady_samples(600, 0.0);
    for sample in samples.iter_mut().skip(300) {
        sample.heart_rate_bpm = Some(155.0);
        sample.velocity_mps = Some(2.4);
    }
    recompute_distance(&mut samples);
    samples
}

/// Cool, stable run with no physiological deviation
pub fn cool_stable_samples() -> Vec<StreamSample> {
    steady_samples(600, 100.0)
}

/// Hourly observations with constant conditions around the activity
pub fn constant_weather(temperature: f64, humidity: f64, hours: i64) -> Vec<WeatherObservation> {
    (-1..=hours + 1)
        .map(|h| WeatherObservation::new(start_time() + Duration::hours(h), temperature, humidity))
        .collect()
}

/// One adjusted point with the fields the risk and correlation stages read
pub fn adjusted_point(
    elapsed_seconds: f64,
    distance_meters: f64,
    elevation_meters: f64,
    temperature_celsius: f64,
    humidity_percent: f64,
    heat_index_celsius: f64,
) -> AdjustedWeatherPoint {
    AdjustedWeatherPoint {
        timestamp: start_time() + Duration::milliseconds((elapsed_seconds * 1000.0) as i64),
        elapsed_seconds,
        distance_meters,
        elevation_meters,
        temperature_celsius,
        humidity_percent,
        dew_point_celsius: temperature_celsius - 5.0,
        heat_index_celsius,
        feels_like_celsius: heat_index_celsius,
    }
}

/// Points at a fixed interval whose heat index follows `heat_indices`
pub fn points_with_heat_index(heat_indices: &[f64], interval_seconds: f64) -> Vec<AdjustedWeatherPoint> {
    heat_indices
        .iter()
        .enumerate()
        .map(|(i, &hi)| {
            let t = i as f64 * interval_seconds;
            adjusted_point(t, t * 3.0, 0.0, hi, 50.0, hi)
        })
        .collect()
}

/// A 600 m climb over 30 minutes with the air cooling from 25 °C to 19 °C
///
/// Ten flat points precede and follow the climb. The climb runs from
/// index 10 to index 60 inclusive.
pub fn cooling_climb_points() -> Vec<AdjustedWeatherPoint> {
    let interval = 36.0;
    let mut points = Vec::with_capacity(71);
    for i in 0..71_usize {
        let t = i as f64 * interval;
        let climb_step = i.saturating_sub(10).min(50) as f64;
        let elevation = climb_step * 12.0;
        let temperature = 25.0 - 6.0 * climb_step / 50.0;
        points.push(adjusted_point(t, t * 3.0, elevation, temperature, 55.0, temperature));
    }
    points
}
