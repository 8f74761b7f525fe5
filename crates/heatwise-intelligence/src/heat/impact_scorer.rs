// ABOUTME: Composite heat impact scoring with severity bands, distance normalization, and history
// ABOUTME: Combines physiological, heat, humidity, and cooling sub-scores into a 0-100 score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Heat impact scoring.
//!
//! The physiological weights sum to 0.80 and the composite weights are
//! 0.4/0.4/0.2 with cooling subtracted at 0.1. Both are kept as tuned; no
//! renormalization is applied.

use super::environmental_risk::{CoolingBenefit, EnvironmentalRisk, HumidityStrain, TimeInZone};
use super::physiological_stress::{PhysiologicalStress, StressSignal};
use super::recommendations;
use crate::config::heat::ImpactScoringConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const MAX_SCORE: f64 = 100.0;

/// Severity tier derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    /// Little measurable heat impact
    Low,
    /// Noticeable heat impact
    Moderate,
    /// Substantial heat impact
    High,
    /// Severe heat impact
    Extreme,
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Extreme => "extreme",
        };
        f.write_str(label)
    }
}

/// The four sub-scores, each 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// Dwell time in elevated heat-risk tiers
    pub heat_stress: f64,
    /// Weighted physiological stress signatures
    pub physiological_stress: f64,
    /// Time at high humidity
    pub humidity_strain: f64,
    /// Elevation-driven relief (subtracted)
    pub cooling_benefit: f64,
}

/// Terminal output of the scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatImpactScore {
    /// Composite score (0-100)
    pub overall_score: u8,
    /// Severity tier
    pub severity: SeverityLevel,
    /// Sub-scores
    pub components: ScoreComponents,
}

/// Position of a score within an athlete's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalComparison {
    /// Share of prior scores strictly below this one (0-100)
    pub percentile: f64,
    /// Interpretive band
    pub interpretation: String,
    /// Number of prior scores compared against
    pub sample_size: usize,
}

/// Computes the composite heat impact score
pub struct ImpactScorer<'a> {
    config: &'a ImpactScoringConfig,
}

impl<'a> ImpactScorer<'a> {
    /// Create a scorer bound to the given configuration
    #[must_use]
    pub const fn new(config: &'a ImpactScoringConfig) -> Self {
        Self { config }
    }

    /// Score one activity
    #[must_use]
    pub fn score(&self, stress: &PhysiologicalStress, risk: &EnvironmentalRisk) -> HeatImpactScore {
        let components = ScoreComponents {
            heat_stress: self.heat_stress_score(&risk.time_in_zones),
            physiological_stress: self.physiological_score(stress),
            humidity_strain: self.humidity_score(&risk.humidity_strain),
            cooling_benefit: self
                .cooling_score(&risk.cooling_benefit, risk.time_in_zones.total_seconds()),
        };
        let overall_score = self.composite(&components);
        let severity = self.severity_for(overall_score);

        debug!(
            overall_score,
            severity = %severity,
            heat = components.heat_stress,
            physiological = components.physiological_stress,
            humidity = components.humidity_strain,
            cooling = components.cooling_benefit,
            "Heat impact scored"
        );

        HeatImpactScore {
            overall_score,
            severity,
            components,
        }
    }

    /// Weighted sum of the four signatures, each scaled and capped at 100 first
    #[must_use]
    pub fn physiological_score(&self, stress: &PhysiologicalStress) -> f64 {
        let w = &self.config.physiological;

        let mut hr = (stress.hr_drift.magnitude() / w.hr_drift_full_scale_bpm * 100.0).min(MAX_SCORE);
        if stress.hr_drift.detected && stress.hr_drift.sustained {
            hr *= w.sustained_multiplier;
        }

        let mut pace =
            (stress.pace_degradation.magnitude() * w.pace_points_per_percent).min(MAX_SCORE);
        if stress.pace_degradation.detected && stress.pace_degradation.grade_controlled {
            pace *= w.grade_controlled_multiplier;
        }

        let vam = (stress.vam_decline.magnitude() * w.vam_points_per_percent).min(MAX_SCORE);
        let cadence =
            (stress.cadence_drop.magnitude() * w.cadence_points_per_percent).min(MAX_SCORE);

        let total = hr.mul_add(
            w.hr_drift_weight,
            pace.mul_add(
                w.pace_weight,
                vam.mul_add(w.vam_weight, cadence * w.cadence_weight),
            ),
        );
        total.clamp(0.0, MAX_SCORE)
    }

    /// Danger dwell dominates; caution dwell contributes at a lower multiplier
    #[must_use]
    pub fn heat_stress_score(&self, time: &TimeInZone) -> f64 {
        let total = time.total_seconds();
        if total <= 0.0 {
            return 0.0;
        }
        let danger = (time.danger_seconds + time.extreme_danger_seconds) / total;
        let caution = (time.caution_seconds + time.extreme_caution_seconds) / total;
        (danger * 100.0)
            .mul_add(
                self.config.danger_time_multiplier,
                caution * 100.0 * self.config.caution_time_multiplier,
            )
            .clamp(0.0, MAX_SCORE)
    }

    /// High-humidity share plus a flat bonus for a very humid peak
    #[must_use]
    pub fn humidity_score(&self, strain: &HumidityStrain) -> f64 {
        let mut score = strain.high_humidity_fraction * 100.0;
        if strain.peak_humidity_percent > self.config.peak_humidity_bonus_threshold {
            score += self.config.peak_humidity_bonus;
        }
        score.clamp(0.0, MAX_SCORE)
    }

    /// Cooling share of the activity plus points per significant segment
    #[must_use]
    pub fn cooling_score(&self, cooling: &CoolingBenefit, total_seconds: f64) -> f64 {
        let share = if total_seconds > 0.0 {
            cooling.total_cooling_seconds / total_seconds * 100.0
        } else {
            0.0
        };
        (cooling.significant_segments as f64)
            .mul_add(self.config.significant_cooling_bonus, share)
            .clamp(0.0, MAX_SCORE)
    }

    /// Weighted composite, floored at zero and rounded
    #[must_use]
    pub fn composite(&self, components: &ScoreComponents) -> u8 {
        let w = &self.config.composite;
        let raw = components.physiological_stress.mul_add(
            w.physiological,
            components.heat_stress.mul_add(
                w.heat,
                components
                    .humidity_strain
                    .mul_add(w.humidity, -components.cooling_benefit * w.cooling),
            ),
        );
        raw.max(0.0).round().min(MAX_SCORE) as u8
    }

    /// Severity tier for a score
    #[must_use]
    pub const fn severity_for(&self, score: u8) -> SeverityLevel {
        if score < self.config.moderate_threshold {
            SeverityLevel::Low
        } else if score < self.config.high_threshold {
            SeverityLevel::Moderate
        } else if score < self.config.extreme_threshold {
            SeverityLevel::High
        } else {
            SeverityLevel::Extreme
        }
    }

    /// Deflate a score relative to the reference distance
    ///
    /// Non-positive distances return the score unchanged.
    #[must_use]
    pub fn normalize_for_distance(&self, score: f64, distance_km: f64) -> f64 {
        if distance_km <= 0.0 {
            return score;
        }
        score / (distance_km / self.config.reference_distance_km).sqrt()
    }

    /// Where a score sits among the athlete's prior scores
    #[must_use]
    pub fn compare_to_history(&self, score: u8, prior_scores: &[u8]) -> HistoricalComparison {
        if prior_scores.is_empty() {
            return HistoricalComparison {
                percentile: 50.0,
                interpretation: "No prior heat scores to compare against; \
                                 reporting a neutral 50th percentile"
                    .to_owned(),
                sample_size: 0,
            };
        }

        let below = prior_scores.iter().filter(|s| **s < score).count();
        let percentile = below as f64 / prior_scores.len() as f64 * 100.0;
        let interpretation = if percentile < 25.0 {
            "Minimal heat impact compared to your history"
        } else if percentile < 50.0 {
            "Below average heat impact for you"
        } else if percentile < 75.0 {
            "Above average heat impact for you"
        } else {
            "Among your most heat-challenging activities"
        };

        HistoricalComparison {
            percentile,
            interpretation: interpretation.to_owned(),
            sample_size: prior_scores.len(),
        }
    }

    /// Prioritized advice for a score; never empty
    #[must_use]
    pub fn recommendations(&self, score: &HeatImpactScore) -> Vec<String> {
        recommendations::recommend(score, &self.config.recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_floors_negative_at_zero() {
        let config = ImpactScoringConfig::default();
        let scorer = ImpactScorer::new(&config);
        let components = ScoreComponents {
            cooling_benefit: 100.0,
            ..ScoreComponents::default()
        };
        assert_eq!(scorer.composite(&components), 0);
    }

    #[test]
    fn test_cooling_score_without_duration_counts_only_bonus() {
        let config = ImpactScoringConfig::default();
        let scorer = ImpactScorer::new(&config);
        let cooling = CoolingBenefit {
            segments: Vec::new(),
            total_cooling_seconds: 100.0,
            significant_segments: 2,
        };
        assert!((scorer.cooling_score(&cooling, 0.0) - 20.0).abs() < f64::EPSILON);
    }
}
