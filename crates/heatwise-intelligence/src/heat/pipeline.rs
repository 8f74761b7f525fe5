// ABOUTME: Heat stress analyzer wiring the five analysis stages in dependency order
// ABOUTME: Single-activity analysis plus rayon fan-out across independent activities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::correlation::{CorrelationEngine, EnvironmentalCorrelation};
use super::environmental_risk::{EnvironmentalRisk, EnvironmentalRiskClassifier};
use super::impact_scorer::{HeatImpactScore, HistoricalComparison, ImpactScorer};
use super::physiological_stress::{PhysiologicalStress, PhysiologicalStressDetector};
use super::weather_interpolation::WeatherInterpolationEngine;
use crate::config::heat::HeatAnalysisConfig;
use heatwise_core::errors::AppResult;
use heatwise_core::models::{StreamBundle, WeatherObservation};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Shortest activity for which heat analysis is meaningful (minutes)
pub const MIN_MEANINGFUL_DURATION_MINUTES: f64 = 10.0;

/// Full result of analyzing one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatImpactAnalysis {
    /// Composite score, severity, and sub-scores
    pub score: HeatImpactScore,
    /// Score deflated relative to the reference distance
    pub normalized_score: f64,
    /// Environment/physiology alignment
    pub correlation: EnvironmentalCorrelation,
    /// The four stress signatures
    pub physiological_stress: PhysiologicalStress,
    /// Zones, dwell time, humidity, cooling, peak heat, and weather summary
    pub environment: EnvironmentalRisk,
    /// Prioritized advice
    pub recommendations: Vec<String>,
    /// Activity distance (km)
    pub distance_km: f64,
    /// Activity duration as reported by the caller (minutes)
    pub duration_minutes: f64,
}

/// One activity queued for batch analysis
#[derive(Debug, Clone)]
pub struct HeatAnalysisInput {
    /// Activity streams
    pub bundle: StreamBundle,
    /// Hourly observations covering the activity
    pub weather: Vec<WeatherObservation>,
    /// Activity duration (minutes)
    pub duration_minutes: f64,
    /// Elevation of the weather source (m)
    pub base_elevation: f64,
}

/// Runs the heat-stress pipeline
#[derive(Debug, Clone, Default)]
pub struct HeatStressAnalyzer {
    config: HeatAnalysisConfig,
}

impl HeatStressAnalyzer {
    /// Create an analyzer with an explicit configuration
    #[must_use]
    pub const fn new(config: HeatAnalysisConfig) -> Self {
        Self { config }
    }

    /// Create an analyzer from the global configuration
    #[must_use]
    pub fn from_global_config() -> Self {
        Self::new(HeatAnalysisConfig::global().clone())
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &HeatAnalysisConfig {
        &self.config
    }

    /// Analyze one activity
    ///
    /// Durations under ten minutes are analyzed anyway; enforcing the
    /// minimum is the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns an error only for structural problems with the inputs, such as
    /// an empty weather series
    pub fn analyze(
        &self,
        bundle: &StreamBundle,
        weather: &[WeatherObservation],
        activity_duration_minutes: f64,
        base_elevation: f64,
    ) -> AppResult<HeatImpactAnalysis> {
        if activity_duration_minutes < MIN_MEANINGFUL_DURATION_MINUTES {
            warn!(
                activity_duration_minutes,
                "Analyzing activity shorter than the meaningful minimum"
            );
        }

        let points = WeatherInterpolationEngine::new(&self.config.weather).interpolate_activity(
            bundle,
            weather,
            base_elevation,
        )?;
        let physiological_stress =
            PhysiologicalStressDetector::new(&self.config.stress).detect(bundle);
        let environment = EnvironmentalRiskClassifier::new(&self.config.risk).assess(&points);
        let correlation = CorrelationEngine::new(&self.config.correlation).correlate(
            &physiological_stress,
            &points,
            bundle.samples(),
        );

        let scorer = ImpactScorer::new(&self.config.scoring);
        let score = scorer.score(&physiological_stress, &environment);
        let distance_km = bundle.total_distance_km();
        let normalized_score =
            scorer.normalize_for_distance(f64::from(score.overall_score), distance_km);
        let recommendations = scorer.recommendations(&score);

        debug!(
            samples = bundle.len(),
            distance_km,
            overall_score = score.overall_score,
            normalized_score,
            "Heat impact analysis complete"
        );

        Ok(HeatImpactAnalysis {
            score,
            normalized_score,
            correlation,
            physiological_stress,
            environment,
            recommendations,
            distance_km,
            duration_minutes: activity_duration_minutes,
        })
    }

    /// Analyze independent activities in parallel, preserving input order
    #[must_use]
    pub fn analyze_batch(&self, inputs: &[HeatAnalysisInput]) -> Vec<AppResult<HeatImpactAnalysis>> {
        inputs
            .par_iter()
            .map(|input| {
                self.analyze(
                    &input.bundle,
                    &input.weather,
                    input.duration_minutes,
                    input.base_elevation,
                )
            })
            .collect()
    }

    /// Where a score sits among the athlete's prior scores
    #[must_use]
    pub fn compare_to_history(&self, score: u8, prior_scores: &[u8]) -> HistoricalComparison {
        ImpactScorer::new(&self.config.scoring).compare_to_history(score, prior_scores)
    }
}
