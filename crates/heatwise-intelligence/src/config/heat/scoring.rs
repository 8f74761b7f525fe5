// ABOUTME: Impact scoring configuration for sub-scores, composite weights, and severity bands
// ABOUTME: Weights intentionally do not sum to one; see the composite score documentation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Impact scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactScoringConfig {
    /// Per-signature weights for the physiological sub-score
    pub physiological: PhysiologicalWeights,
    /// Composite weights across sub-scores
    pub composite: CompositeWeights,
    /// Time multiplier for danger and extreme-danger dwell
    pub danger_time_multiplier: f64,
    /// Time multiplier for caution and extreme-caution dwell
    pub caution_time_multiplier: f64,
    /// Peak humidity above which the flat bonus applies (%)
    pub peak_humidity_bonus_threshold: f64,
    /// Flat humidity bonus (points)
    pub peak_humidity_bonus: f64,
    /// Points per significant cooling segment
    pub significant_cooling_bonus: f64,
    /// Score at which severity becomes moderate
    pub moderate_threshold: u8,
    /// Score at which severity becomes high
    pub high_threshold: u8,
    /// Score at which severity becomes extreme
    pub extreme_threshold: u8,
    /// Reference distance for normalization (km)
    pub reference_distance_km: f64,
    /// Sub-score cut-offs for the recommendation rule table
    pub recommendations: RecommendationThresholds,
}

/// Weights and scales for the physiological sub-score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysiologicalWeights {
    /// Heart rate drift weight
    pub hr_drift_weight: f64,
    /// Pace degradation weight
    pub pace_weight: f64,
    /// VAM decline weight
    pub vam_weight: f64,
    /// Cadence drop weight
    pub cadence_weight: f64,
    /// Drift that maps to a full 100 (bpm)
    pub hr_drift_full_scale_bpm: f64,
    /// Points per percent of pace degradation
    pub pace_points_per_percent: f64,
    /// Points per percent of VAM decline
    pub vam_points_per_percent: f64,
    /// Points per percent of cadence drop
    pub cadence_points_per_percent: f64,
    /// Multiplier for sustained heart rate drift
    pub sustained_multiplier: f64,
    /// Multiplier for grade-controlled pace degradation
    pub grade_controlled_multiplier: f64,
}

/// Composite weights (cooling is subtracted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeWeights {
    /// Physiological sub-score weight
    pub physiological: f64,
    /// Heat-stress sub-score weight
    pub heat: f64,
    /// Humidity sub-score weight
    pub humidity: f64,
    /// Cooling-benefit sub-score weight (subtracted)
    pub cooling: f64,
}

/// Sub-score thresholds that trigger recommendation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    /// Humidity sub-score above which hydration pacing advice applies
    pub humidity_advice: f64,
    /// Cooling sub-score above which elevation advice applies
    pub cooling_advice: f64,
    /// Physiological sub-score above which pacing advice applies
    pub physiological_advice: f64,
    /// Heat sub-score above which acclimatization advice applies
    pub heat_advice: f64,
}

impl Default for ImpactScoringConfig {
    fn default() -> Self {
        Self {
            physiological: PhysiologicalWeights::default(),
            composite: CompositeWeights::default(),
            danger_time_multiplier: 10.0,
            caution_time_multiplier: 2.0,
            peak_humidity_bonus_threshold: 90.0,
            peak_humidity_bonus: 20.0,
            significant_cooling_bonus: 10.0,
            moderate_threshold: 25,
            high_threshold: 50,
            extreme_threshold: 75,
            reference_distance_km: 50.0,
            recommendations: RecommendationThresholds::default(),
        }
    }
}

impl Default for PhysiologicalWeights {
    fn default() -> Self {
        Self {
            hr_drift_weight: 0.25,
            pace_weight: 0.25,
            vam_weight: 0.15,
            cadence_weight: 0.15,
            hr_drift_full_scale_bpm: 20.0,
            pace_points_per_percent: 2.0,
            vam_points_per_percent: 2.0,
            cadence_points_per_percent: 5.0,
            sustained_multiplier: 1.2,
            grade_controlled_multiplier: 1.2,
        }
    }
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            physiological: 0.4,
            heat: 0.4,
            humidity: 0.2,
            cooling: 0.1,
        }
    }
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            humidity_advice: 60.0,
            cooling_advice: 40.0,
            physiological_advice: 50.0,
            heat_advice: 50.0,
        }
    }
}
