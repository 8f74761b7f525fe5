// ABOUTME: Activity stream models with index alignment enforced at construction
// ABOUTME: StreamBundle stores one record per instant instead of parallel arrays
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::units::METERS_PER_KM;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Sensor readings at one instant of an activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamSample {
    /// Seconds since activity start
    pub elapsed_seconds: f64,
    /// Cumulative distance in metres
    pub distance_meters: f64,
    /// Elevation in metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_meters: Option<f64>,
    /// Instantaneous velocity in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_mps: Option<f64>,
    /// Heart rate in beats per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate_bpm: Option<f64>,
    /// Cadence in steps per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence_spm: Option<f64>,
    /// Terrain grade as a ratio (0.05 = 5 %)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
}

impl StreamSample {
    /// Distance of this sample in kilometres
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / METERS_PER_KM
    }
}

/// Parallel-array form of an activity's streams, as returned by stream stores
///
/// `time` and `distance` are mandatory; every other array is optional but,
/// when present, must match their length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamArrays {
    /// Absolute activity start time
    pub start_time: DateTime<Utc>,
    /// Elapsed seconds per sample
    #[serde(default)]
    pub time: Option<Vec<f64>>,
    /// Cumulative distance per sample (metres)
    #[serde(default)]
    pub distance: Option<Vec<f64>>,
    /// Elevation per sample (metres)
    #[serde(default)]
    pub elevation: Option<Vec<f64>>,
    /// Velocity per sample (m/s)
    #[serde(default)]
    pub velocity: Option<Vec<f64>>,
    /// Heart rate per sample (bpm)
    #[serde(default)]
    pub heart_rate: Option<Vec<f64>>,
    /// Cadence per sample (steps/min)
    #[serde(default)]
    pub cadence: Option<Vec<f64>>,
    /// Grade per sample (ratio)
    #[serde(default)]
    pub grade: Option<Vec<f64>>,
}

/// Ordered, index-aligned activity samples
#[derive(Debug, Clone, PartialEq)]
pub struct StreamBundle {
    start_time: DateTime<Utc>,
    samples: Vec<StreamSample>,
}

impl StreamBundle {
    /// Build a bundle from per-sample records
    ///
    /// # Errors
    ///
    /// Returns an error if any sample carries a non-finite time or distance,
    /// or an elapsed time that cannot be placed on the calendar
    pub fn new(start_time: DateTime<Utc>, samples: Vec<StreamSample>) -> AppResult<Self> {
        if let Some(index) = samples
            .iter()
            .position(|s| !s.elapsed_seconds.is_finite() || !s.distance_meters.is_finite())
        {
            return Err(AppError::invalid_input(format!(
                "Sample {index} has a non-finite time or distance"
            )));
        }
        if let Some((index, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| offset_time(start_time, s.elapsed_seconds).is_none())
        {
            return Err(AppError::out_of_range(format!(
                "Sample {index} lies {} s from the start, beyond the representable time range",
                sample.elapsed_seconds
            )));
        }
        Ok(Self {
            start_time,
            samples,
        })
    }

    /// Build a bundle from parallel arrays
    ///
    /// # Errors
    ///
    /// Returns an error if `time` or `distance` is missing, or if any
    /// supplied array differs in length from `time`
    pub fn from_parallel_streams(arrays: StreamArrays) -> AppResult<Self> {
        let time = arrays.time.ok_or_else(|| AppError::missing_field("time"))?;
        let distance = arrays
            .distance
            .ok_or_else(|| AppError::missing_field("distance"))?;
        let len = time.len();

        check_len("distance", Some(&distance), len)?;
        check_len("elevation", arrays.elevation.as_ref(), len)?;
        check_len("velocity", arrays.velocity.as_ref(), len)?;
        check_len("heart_rate", arrays.heart_rate.as_ref(), len)?;
        check_len("cadence", arrays.cadence.as_ref(), len)?;
        check_len("grade", arrays.grade.as_ref(), len)?;

        let pick = |stream: &Option<Vec<f64>>, i: usize| {
            stream.as_ref().and_then(|values| values.get(i).copied())
        };

        let samples = (0..len)
            .map(|i| StreamSample {
                elapsed_seconds: time[i],
                distance_meters: distance[i],
                elevation_meters: pick(&arrays.elevation, i),
                velocity_mps: pick(&arrays.velocity, i),
                heart_rate_bpm: pick(&arrays.heart_rate, i),
                cadence_spm: pick(&arrays.cadence, i),
                grade: pick(&arrays.grade, i),
            })
            .collect();

        Self::new(arrays.start_time, samples)
    }

    /// Absolute activity start time
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// All samples in order
    #[must_use]
    pub fn samples(&self) -> &[StreamSample] {
        &self.samples
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the bundle has no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Absolute time `elapsed_seconds` after the start, if representable
    #[must_use]
    pub fn time_at(&self, elapsed_seconds: f64) -> Option<DateTime<Utc>> {
        offset_time(self.start_time, elapsed_seconds)
    }

    /// Absolute timestamp of every sample
    #[must_use]
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        // Every offset was checked in `new`
        self.samples
            .iter()
            .map(|s| self.time_at(s.elapsed_seconds).unwrap_or(self.start_time))
            .collect()
    }

    /// Elevation of every sample, substituting `fallback` where unrecorded
    #[must_use]
    pub fn elevations_or(&self, fallback: f64) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| s.elevation_meters.unwrap_or(fallback))
            .collect()
    }

    /// Elapsed time between first and last sample (seconds)
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => (last.elapsed_seconds - first.elapsed_seconds).max(0.0),
            _ => 0.0,
        }
    }

    /// Total distance covered (km)
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => {
                (last.distance_meters - first.distance_meters).max(0.0) / METERS_PER_KM
            }
            _ => 0.0,
        }
    }

    /// Whether any sample carries elevation
    #[must_use]
    pub fn has_elevation(&self) -> bool {
        self.samples.iter().any(|s| s.elevation_meters.is_some())
    }

    /// Whether any sample carries velocity
    #[must_use]
    pub fn has_velocity(&self) -> bool {
        self.samples.iter().any(|s| s.velocity_mps.is_some())
    }

    /// Whether any sample carries heart rate
    #[must_use]
    pub fn has_heart_rate(&self) -> bool {
        self.samples.iter().any(|s| s.heart_rate_bpm.is_some())
    }

    /// Whether any sample carries cadence
    #[must_use]
    pub fn has_cadence(&self) -> bool {
        self.samples.iter().any(|s| s.cadence_spm.is_some())
    }

    /// Whether any sample carries grade
    #[must_use]
    pub fn has_grade(&self) -> bool {
        self.samples.iter().any(|s| s.grade.is_some())
    }
}

impl TryFrom<StreamArrays> for StreamBundle {
    type Error = AppError;

    fn try_from(arrays: StreamArrays) -> AppResult<Self> {
        Self::from_parallel_streams(arrays)
    }
}

fn check_len(name: &str, stream: Option<&Vec<f64>>, expected: usize) -> AppResult<()> {
    match stream {
        Some(values) if values.len() != expected => Err(AppError::invalid_input(format!(
            "Stream '{name}' has {} samples but time has {expected}",
            values.len()
        ))),
        _ => Ok(()),
    }
}

fn offset_time(start_time: DateTime<Utc>, elapsed_seconds: f64) -> Option<DateTime<Utc>> {
    if !elapsed_seconds.is_finite() {
        return None;
    }
    // Millisecond resolution is plenty for hourly weather alignment
    let offset = Duration::try_milliseconds((elapsed_seconds * 1000.0).round() as i64)?;
    start_time.checked_add_signed(offset)
}
