// ABOUTME: Physiological stress detection configuration
// ABOUTME: Baseline windows, rolling window sizing, and per-signature detection thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Stress signature detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressDetectionConfig {
    /// Streams shorter than this are insufficient for any detector
    pub min_samples: usize,
    /// Rolling window size as a fraction of stream length
    pub window_fraction: f64,
    /// Upper bound on rolling window size (samples)
    pub max_window_samples: usize,
    /// Heart rate drift detection
    pub heart_rate: HrDriftConfig,
    /// Pace degradation detection
    pub pace: PaceDegradationConfig,
    /// Climbing rate (VAM) decline detection
    pub vam: VamDeclineConfig,
    /// Cadence drop detection
    pub cadence: CadenceDropConfig,
}

/// Heart rate drift thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrDriftConfig {
    /// Baseline window start (fraction of stream, skips warm-up)
    pub baseline_start_fraction: f64,
    /// Baseline window end and scan start (fraction of stream)
    pub baseline_end_fraction: f64,
    /// Drift above baseline that counts as detected (bpm)
    pub drift_threshold_bpm: f64,
    /// Number of windows after the peak inspected for persistence
    pub sustained_windows: usize,
    /// Share of peak drift that must persist to call it sustained
    pub sustained_retention: f64,
}

/// Pace degradation thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaceDegradationConfig {
    /// Baseline window end and scan start (fraction of stream)
    pub baseline_end_fraction: f64,
    /// Samples slower than this are treated as stationary (m/s)
    pub stationary_velocity_mps: f64,
    /// Maximum grade difference for a window to be comparable (ratio)
    pub grade_match_tolerance: f64,
    /// Velocity reduction that counts as detected (%)
    pub degradation_threshold_percent: f64,
}

/// Climbing rate decline thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VamDeclineConfig {
    /// Sample-to-sample gain that opens a climb (m)
    pub climb_start_gain_m: f64,
    /// Sample-to-sample gain below which a climb closes (m)
    pub climb_continue_gain_m: f64,
    /// Minimum total gain for a qualifying climb (m)
    pub min_climb_gain_m: f64,
    /// Minimum duration for a qualifying climb (s)
    pub min_climb_duration_seconds: f64,
    /// Minimum number of qualifying climbs
    pub min_climbs: usize,
    /// Late-vs-early VAM reduction that counts as detected (%)
    pub decline_threshold_percent: f64,
}

/// Cadence drop thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadenceDropConfig {
    /// Baseline window end and scan start (fraction of stream)
    pub baseline_end_fraction: f64,
    /// Samples at or below this are not running cadence (spm)
    pub min_running_cadence_spm: f64,
    /// Maximum grade difference for a window to be comparable (ratio)
    pub grade_match_tolerance: f64,
    /// Cadence reduction that counts as detected (%)
    pub drop_threshold_percent: f64,
}

impl Default for StressDetectionConfig {
    fn default() -> Self {
        Self {
            min_samples: 100,
            window_fraction: 0.10,
            max_window_samples: 20,
            heart_rate: HrDriftConfig::default(),
            pace: PaceDegradationConfig::default(),
            vam: VamDeclineConfig::default(),
            cadence: CadenceDropConfig::default(),
        }
    }
}

impl Default for HrDriftConfig {
    fn default() -> Self {
        Self {
            baseline_start_fraction: 0.10,
            baseline_end_fraction: 0.30,
            drift_threshold_bpm: 10.0,
            sustained_windows: 3,
            sustained_retention: 0.70,
        }
    }
}

impl Default for PaceDegradationConfig {
    fn default() -> Self {
        Self {
            baseline_end_fraction: 0.30,
            stationary_velocity_mps: 0.5,
            grade_match_tolerance: 0.03,
            degradation_threshold_percent: 15.0,
        }
    }
}

impl Default for VamDeclineConfig {
    fn default() -> Self {
        Self {
            climb_start_gain_m: 3.0,
            climb_continue_gain_m: 1.0,
            min_climb_gain_m: 50.0,
            min_climb_duration_seconds: 300.0,
            min_climbs: 2,
            decline_threshold_percent: 20.0,
        }
    }
}

impl Default for CadenceDropConfig {
    fn default() -> Self {
        Self {
            baseline_end_fraction: 0.30,
            min_running_cadence_spm: 100.0,
            grade_match_tolerance: 0.03,
            drop_threshold_percent: 8.0,
        }
    }
}
