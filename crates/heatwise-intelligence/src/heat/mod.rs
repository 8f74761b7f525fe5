// ABOUTME: Heat-stress analysis pipeline module declarations and re-exports
// ABOUTME: Five stages from weather interpolation to composite impact scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Heat Stress Analysis
//!
//! Stages run strictly in dependency order, each consuming the complete
//! output of the previous one:
//!
//! 1. [`WeatherInterpolationEngine`] projects hourly weather onto the activity timeline
//! 2. [`PhysiologicalStressDetector`] finds HR drift, pace fade, VAM decline, cadence drop
//! 3. [`EnvironmentalRiskClassifier`] derives risk zones, dwell time, humidity, cooling
//! 4. [`CorrelationEngine`] aligns stress onsets with preceding environmental spikes
//! 5. [`ImpactScorer`] produces the composite score, severity, and recommendations
//!
//! [`HeatStressAnalyzer`] wires them together.

/// Environment/physiology correlation
pub mod correlation;
/// Risk tiers, zones, humidity strain, cooling benefit, peak heat
pub mod environmental_risk;
/// Composite scoring, normalization, and historical comparison
pub mod impact_scorer;
/// Physiological stress signatures
pub mod physiological_stress;
/// Stage orchestration
pub mod pipeline;
/// Recommendation rule table
pub mod recommendations;
/// Elevation-corrected weather interpolation
pub mod weather_interpolation;

pub use correlation::{
    CorrelationEngine, CorrelationEvent, CorrelationEventKind, EnvironmentalCorrelation,
    EnvironmentalSnapshot, PhysiologicalSnapshot, PrimaryFactor, SpikeGate,
};
pub use environmental_risk::{
    CoolingBenefit, CoolingSegment, EnvironmentalRisk, EnvironmentalRiskClassifier,
    HumidityStrain, PeakHeatPeriod, RiskLevel, RiskZone, TimeInZone, WeatherSummary,
};
pub use impact_scorer::{
    HeatImpactScore, HistoricalComparison, ImpactScorer, ScoreComponents, SeverityLevel,
};
pub use physiological_stress::{
    CadenceDropSignature, ClimbSegment, HrDriftSignature, PaceDegradationSignature,
    PhysiologicalStress, PhysiologicalStressDetector, StressKind, StressSignal,
    VamDeclineSignature,
};
pub use pipeline::{
    HeatAnalysisInput, HeatImpactAnalysis, HeatStressAnalyzer, MIN_MEANINGFUL_DURATION_MINUTES,
};
pub use weather_interpolation::{
    adjust_humidity_for_elevation, dew_point, WeatherInterpolationEngine,
};
