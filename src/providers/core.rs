// ABOUTME: Async collaborator traits and the request/response types exchanged with them
// ABOUTME: Weather history, stream storage, narrative generation, and score persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use heatwise_core::errors::AppResult;
use heatwise_core::models::{StreamBundle, WeatherObservation};
use heatwise_intelligence::heat::{
    EnvironmentalCorrelation, HeatImpactScore, HumidityStrain, PhysiologicalStress, TimeInZone,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source of hourly weather observations
///
/// Implementations may cache; they must return observations in chronological order.
#[async_trait]
pub trait WeatherHistoryProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Hourly observations covering `[start, end]` at the given location
    async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<WeatherObservation>>;
}

/// Source of per-sample activity streams
#[async_trait]
pub trait ActivityStreamStore: Send + Sync {
    /// Streams for one activity
    async fn fetch_streams(&self, activity_id: &str) -> AppResult<StreamBundle>;
}

/// Activity facts handed to the narrative generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Activity identifier
    pub activity_id: String,
    /// Start time
    pub start_time: DateTime<Utc>,
    /// Duration (minutes)
    pub duration_minutes: f64,
    /// Distance (km)
    pub distance_km: f64,
}

/// Structured input for narrative generation
#[derive(Debug, Clone, Serialize)]
pub struct NarrativeRequest {
    /// Activity facts
    pub activity: ActivitySummary,
    /// Detected stress signatures
    pub physiological_stress: PhysiologicalStress,
    /// Environment/physiology correlation
    pub correlation: EnvironmentalCorrelation,
    /// Composite score
    pub score: HeatImpactScore,
}

/// Human-readable text produced from an analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatNarrative {
    /// Overall summary paragraph
    pub summary: String,
    /// Notable moments
    pub key_events: Vec<String>,
    /// Advice
    pub recommendations: Vec<String>,
}

/// Turns structured analysis into prose
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Generate a narrative for one analyzed activity
    async fn generate(&self, request: &NarrativeRequest) -> AppResult<HeatNarrative>;
}

/// A persisted heat score with the sub-metrics needed for later comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredHeatScore {
    /// Record identifier
    pub id: Uuid,
    /// Activity the score belongs to
    pub activity_id: String,
    /// Athlete the activity belongs to
    pub athlete_id: String,
    /// Composite score
    pub score: HeatImpactScore,
    /// Distance-normalized score
    pub normalized_score: f64,
    /// Dwell time per risk tier
    pub time_in_zones: TimeInZone,
    /// High-humidity exposure
    pub humidity_strain: HumidityStrain,
    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,
}

/// Keyed store of heat scores
#[async_trait]
pub trait HeatScoreStore: Send + Sync {
    /// Insert or replace the score for `record.activity_id`
    async fn save(&self, record: StoredHeatScore) -> AppResult<()>;

    /// Score for one activity, if analyzed
    async fn get(&self, activity_id: &str) -> AppResult<Option<StoredHeatScore>>;

    /// All scores for an athlete, oldest first
    async fn scores_for_athlete(&self, athlete_id: &str) -> AppResult<Vec<StoredHeatScore>>;
}
