// ABOUTME: Heat analysis service wiring weather, streams, score storage, and narratives
// ABOUTME: Soft-skips activities that are too short or structurally invalid
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::providers::{
    ActivityStreamStore, ActivitySummary, HeatNarrative, HeatScoreStore, NarrativeGenerator,
    NarrativeRequest, StoredHeatScore, WeatherHistoryProvider,
};
use chrono::{DateTime, Duration, Utc};
use heatwise_core::constants::units::SECONDS_PER_MINUTE;
use heatwise_core::errors::{AppError, AppResult};
use heatwise_core::models::{StreamBundle, WeatherObservation};
use heatwise_intelligence::heat::{
    HeatImpactAnalysis, HeatStressAnalyzer, HistoricalComparison, MIN_MEANINGFUL_DURATION_MINUTES,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task;
use tracing::{info, warn};
use uuid::Uuid;

/// Hours of weather fetched on either side of the activity
const WEATHER_PADDING_HOURS: i64 = 1;

/// One activity to analyze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityHeatRequest {
    /// Activity identifier in the stream store
    pub activity_id: String,
    /// Owner of the activity
    pub athlete_id: String,
    /// Latitude used for the weather lookup
    pub latitude: f64,
    /// Longitude used for the weather lookup
    pub longitude: f64,
    /// Elevation of the weather source (m)
    pub base_elevation: f64,
    /// Reported duration (minutes); derived from the streams when absent
    pub duration_minutes: Option<f64>,
}

/// Everything produced for a completed analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatAnalysisReport {
    /// Activity identifier
    pub activity_id: String,
    /// Pipeline output
    pub analysis: HeatImpactAnalysis,
    /// Position among the athlete's earlier scores
    pub historical_comparison: HistoricalComparison,
    /// Generated prose, when a generator is configured and succeeded
    pub narrative: Option<HeatNarrative>,
}

/// Result of asking the service to analyze one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HeatAnalysisOutcome {
    /// Analysis ran and was persisted
    Completed(Box<HeatAnalysisReport>),
    /// Analysis was not meaningful for this activity
    Skipped {
        /// Why the activity was skipped
        reason: String,
    },
}

/// Orchestrates collaborators around the heat-stress pipeline
#[derive(Clone)]
pub struct HeatAnalysisService {
    analyzer: Arc<HeatStressAnalyzer>,
    weather: Arc<dyn WeatherHistoryProvider>,
    streams: Arc<dyn ActivityStreamStore>,
    scores: Arc<dyn HeatScoreStore>,
    narrative: Option<Arc<dyn NarrativeGenerator>>,
}

impl HeatAnalysisService {
    /// Create a service without narrative generation
    #[must_use]
    pub fn new(
        analyzer: HeatStressAnalyzer,
        weather: Arc<dyn WeatherHistoryProvider>,
        streams: Arc<dyn ActivityStreamStore>,
        scores: Arc<dyn HeatScoreStore>,
    ) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            weather,
            streams,
            scores,
            narrative: None,
        }
    }

    /// Attach a narrative generator
    #[must_use]
    pub fn with_narrative_generator(mut self, generator: Arc<dyn NarrativeGenerator>) -> Self {
        self.narrative = Some(generator);
        self
    }

    /// Analyze one activity end to end
    ///
    /// # Errors
    ///
    /// Returns an error when a collaborator fails. Activities that are too
    /// short, lack weather, or carry structurally invalid streams are
    /// reported as [`HeatAnalysisOutcome::Skipped`] instead.
    pub async fn analyze_activity(
        &self,
        request: &ActivityHeatRequest,
    ) -> AppResult<HeatAnalysisOutcome> {
        let bundle = match self.streams.fetch_streams(&request.activity_id).await {
            Ok(bundle) => bundle,
            Err(e) if e.is_structural() => return Ok(skip(request, e.to_string())),
            Err(e) => return Err(e),
        };

        let duration_minutes = request
            .duration_minutes
            .unwrap_or_else(|| bundle.duration_seconds() / SECONDS_PER_MINUTE);
        if duration_minutes < MIN_MEANINGFUL_DURATION_MINUTES {
            return Ok(skip(
                request,
                format!(
                    "Activity lasted {duration_minutes:.1} minutes; at least \
                     {MIN_MEANINGFUL_DURATION_MINUTES} are needed"
                ),
            ));
        }

        let Some((window_start, window_end)) = weather_window(&bundle, duration_minutes) else {
            return Ok(skip(
                request,
                format!("Activity duration of {duration_minutes} minutes cannot be placed on the calendar"),
            ));
        };

        let observations = self
            .weather
            .fetch_hourly(request.latitude, request.longitude, window_start, window_end)
            .await?;
        if observations.is_empty() {
            return Ok(skip(request, "No weather observations for the activity window".into()));
        }

        let analysis = match self
            .run_pipeline(bundle.clone(), observations, duration_minutes, request.base_elevation)
            .await
        {
            Ok(analysis) => analysis,
            Err(e) if e.is_structural() => return Ok(skip(request, e.to_string())),
            Err(e) => return Err(e),
        };

        let prior: Vec<u8> = self
            .scores
            .scores_for_athlete(&request.athlete_id)
            .await?
            .iter()
            .filter(|s| s.activity_id != request.activity_id)
            .map(|s| s.score.overall_score)
            .collect();
        let historical_comparison = self
            .analyzer
            .compare_to_history(analysis.score.overall_score, &prior);

        self.scores
            .save(StoredHeatScore {
                id: Uuid::new_v4(),
                activity_id: request.activity_id.clone(),
                athlete_id: request.athlete_id.clone(),
                score: analysis.score,
                normalized_score: analysis.normalized_score,
                time_in_zones: analysis.environment.time_in_zones,
                humidity_strain: analysis.environment.humidity_strain,
                analyzed_at: Utc::now(),
            })
            .await?;

        let narrative = self.narrate(request, &bundle, &analysis).await;

        info!(
            activity_id = %request.activity_id,
            overall_score = analysis.score.overall_score,
            severity = %analysis.score.severity,
            percentile = historical_comparison.percentile,
            "Heat analysis completed"
        );

        Ok(HeatAnalysisOutcome::Completed(Box::new(HeatAnalysisReport {
            activity_id: request.activity_id.clone(),
            analysis,
            historical_comparison,
            narrative,
        })))
    }

    /// Analyze several activities one after another
    ///
    /// A failure for one activity does not stop the others.
    pub async fn analyze_activities(
        &self,
        requests: &[ActivityHeatRequest],
    ) -> Vec<AppResult<HeatAnalysisOutcome>> {
        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            outcomes.push(self.analyze_activity(request).await);
        }
        outcomes
    }

    /// The pipeline is CPU-bound; keep it off the async workers
    async fn run_pipeline(
        &self,
        bundle: StreamBundle,
        observations: Vec<WeatherObservation>,
        duration_minutes: f64,
        base_elevation: f64,
    ) -> AppResult<HeatImpactAnalysis> {
        let analyzer = Arc::clone(&self.analyzer);
        task::spawn_blocking(move || {
            analyzer.analyze(&bundle, &observations, duration_minutes, base_elevation)
        })
        .await
        .map_err(|e| AppError::internal(format!("Heat analysis task failed: {e}")))?
    }

    async fn narrate(
        &self,
        request: &ActivityHeatRequest,
        bundle: &StreamBundle,
        analysis: &HeatImpactAnalysis,
    ) -> Option<HeatNarrative> {
        let generator = self.narrative.as_ref()?;
        let narrative_request = NarrativeRequest {
            activity: ActivitySummary {
                activity_id: request.activity_id.clone(),
                start_time: bundle.start_time(),
                duration_minutes: analysis.duration_minutes,
                distance_km: analysis.distance_km,
            },
            physiological_stress: analysis.physiological_stress.clone(),
            correlation: analysis.correlation.clone(),
            score: analysis.score,
        };
        match generator.generate(&narrative_request).await {
            Ok(narrative) => Some(narrative),
            Err(e) => {
                warn!(
                    activity_id = %request.activity_id,
                    error = %e,
                    "Narrative generation failed; returning analysis without narrative"
                );
                None
            }
        }
    }
}

/// Activity span padded on both sides, or `None` when it overflows the calendar
fn weather_window(
    bundle: &StreamBundle,
    duration_minutes: f64,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let padding = Duration::hours(WEATHER_PADDING_HOURS);
    let start = bundle.start_time().checked_sub_signed(padding)?;
    let end = bundle
        .time_at(duration_minutes * SECONDS_PER_MINUTE)?
        .checked_add_signed(padding)?;
    Some((start, end))
}

fn skip(request: &ActivityHeatRequest, reason: String) -> HeatAnalysisOutcome {
    warn!(activity_id = %request.activity_id, %reason, "Skipping heat analysis");
    HeatAnalysisOutcome::Skipped { reason }
}
