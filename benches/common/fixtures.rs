// ABOUTME: Benchmark fixtures for generating synthetic activity streams and weather
// ABOUTME: Provides deterministic data generation for reproducible performance measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for generating synthetic activity streams and weather.
//!
//! Provides deterministic data generation for reproducible performance measurements.

use chrono::{DateTime, Duration, TimeZone, Utc};
use heatwise::intelligence::heat::HeatAnalysisInput;
use heatwise::models::{StreamBundle, StreamSample, WeatherObservation};

/// Seconds between generated samples
const SAMPLE_INTERVAL_SECONDS: f64 = 5.0;

/// Predefined stream lengths for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum StreamLength {
    /// 30 minutes at 5 s sampling
    Short,
    /// Two hours at 5 s sampling - typical long run
    Medium,
    /// Six hours at 5 s sampling - ultra or long ride
    Long,
}

impl StreamLength {
    #[must_use]
    pub const fn samples(self) -> usize {
        match self {
            Self::Short => 360,
            Self::Medium => 1440,
            Self::Long => 4320,
        }
    }
}

/// Fixed start so every run generates identical data
fn bench_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 15, 7, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Rolling terrain with a slow heart-rate drift and late pace fade
#[allow(clippy::cast_precision_loss)]
fn generate_samples(count: usize) -> Vec<StreamSample> {
    let mut distance = 0.0;
    let mut elevation = 120.0;
    (0..count)
        .map(|index| {
            let progress = index as f64 / count as f64;
            // Ten-minute climbs alternating with ten-minute descents
            let grade = if (index / 120) % 2 == 0 { 0.04 } else { -0.03 };
            let velocity = 3.2 - 0.6 * progress + ((index * 7) % 11) as f64 * 0.01;
            if index > 0 {
                let step = velocity * SAMPLE_INTERVAL_SECONDS;
                distance += step;
                elevation += step * grade;
            }
            StreamSample {
                elapsed_seconds: index as f64 * SAMPLE_INTERVAL_SECONDS,
                distance_meters: distance,
                elevation_meters: Some(elevation),
                velocity_mps: Some(velocity),
                heart_rate_bpm: Some(138.0 + 18.0 * progress + ((index * 13) % 5) as f64),
                cadence_spm: Some(172.0 - 6.0 * progress),
                grade: Some(grade),
            }
        })
        .collect()
}

/// Hourly observations warming through the morning
fn generate_weather(hours: i64) -> Vec<WeatherObservation> {
    (-1..=hours + 1)
        .map(|hour| {
            let temperature = 24.0 + 1.5 * hour as f64;
            let humidity = (88.0 - 4.0 * hour as f64).max(40.0);
            WeatherObservation::new(
                bench_start() + Duration::hours(hour),
                temperature,
                humidity,
            )
        })
        .collect()
}

/// Build one complete pipeline input of the requested length
///
/// # Panics
///
/// Panics if the generated samples are not time-ordered
#[must_use]
#[allow(clippy::expect_used, clippy::cast_possible_truncation)]
pub fn generate_input(length: StreamLength) -> HeatAnalysisInput {
    let samples = generate_samples(length.samples());
    let bundle = StreamBundle::new(bench_start(), samples).expect("generated streams are ordered");
    let duration_minutes = bundle.duration_seconds() / 60.0;
    let hours = (duration_minutes / 60.0).ceil() as i64;
    HeatAnalysisInput {
        bundle,
        weather: generate_weather(hours),
        duration_minutes,
        base_elevation: 100.0,
    }
}

/// Build a batch of identical-shape inputs for fan-out benchmarks
#[must_use]
pub fn generate_batch(count: usize, length: StreamLength) -> Vec<HeatAnalysisInput> {
    (0..count).map(|_| generate_input(length)).collect()
}
