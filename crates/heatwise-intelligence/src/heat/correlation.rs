// ABOUTME: Correlation engine aligning physiological stress onsets with preceding environmental spikes
// ABOUTME: Emits ordered events, correlation strength, primary-factor attribution, and confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::environmental_risk::WeatherSummary;
use super::physiological_stress::{PhysiologicalStress, StressKind, StressSignal};
use crate::config::heat::CorrelationConfig;
use heatwise_core::models::{AdjustedWeatherPoint, StreamSample};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Duplicate-suppression state for spike emission
///
/// After a spike is emitted the gate stays closed for a fixed number of
/// samples, whatever those samples look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpikeGate {
    /// Ready to emit on the next trigger
    #[default]
    Armed,
    /// Suppressing triggers for `remaining` more samples
    CoolingDown {
        /// Samples left before re-arming
        remaining: usize,
    },
}

impl SpikeGate {
    /// Feed one sample; returns true when a spike is emitted
    pub fn step(&mut self, triggered: bool, cooldown: usize) -> bool {
        match *self {
            Self::CoolingDown { remaining } => {
                *self = if remaining > 1 {
                    Self::CoolingDown {
                        remaining: remaining - 1,
                    }
                } else {
                    Self::Armed
                };
                false
            }
            Self::Armed if triggered => {
                if cooldown > 0 {
                    *self = Self::CoolingDown {
                        remaining: cooldown,
                    };
                }
                true
            }
            Self::Armed => false,
        }
    }
}

/// What happened at a correlation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationEventKind {
    /// Heart rate drift began
    HrDriftStart,
    /// Pace degradation began
    PaceFadeStart,
    /// Late climbs slowed
    VamDecline,
    /// Cadence dropped
    CadenceDrop,
    /// Heat index rose well above the early baseline
    HeatSpike,
    /// Humidity crossed into the high band
    HumiditySpike,
}

impl CorrelationEventKind {
    /// Whether this is an environmental (rather than physiological) event
    #[must_use]
    pub const fn is_environmental(self) -> bool {
        matches!(self, Self::HeatSpike | Self::HumiditySpike)
    }
}

impl From<StressKind> for CorrelationEventKind {
    fn from(kind: StressKind) -> Self {
        match kind {
            StressKind::HrDrift => Self::HrDriftStart,
            StressKind::PaceDegradation => Self::PaceFadeStart,
            StressKind::VamDecline => Self::VamDecline,
            StressKind::CadenceDrop => Self::CadenceDrop,
        }
    }
}

/// Weather at an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalSnapshot {
    /// Temperature (°C)
    pub temperature_celsius: f64,
    /// Relative humidity (%)
    pub humidity_percent: f64,
    /// Heat index (°C)
    pub heat_index_celsius: f64,
    /// Elevation (m)
    pub elevation_meters: f64,
}

/// Athlete state at an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysiologicalSnapshot {
    /// Heart rate (bpm)
    pub heart_rate_bpm: Option<f64>,
    /// Velocity (m/s)
    pub velocity_mps: Option<f64>,
    /// Cadence (spm)
    pub cadence_spm: Option<f64>,
}

/// A tagged occurrence along the activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEvent {
    /// Event kind
    pub kind: CorrelationEventKind,
    /// Sample index
    pub index: usize,
    /// Position (km)
    pub distance_km: f64,
    /// Weather at the event
    pub environment: EnvironmentalSnapshot,
    /// Athlete state, for physiological events
    pub physiology: Option<PhysiologicalSnapshot>,
}

/// The dominant environmental driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryFactor {
    /// Heat alone
    Heat,
    /// Humidity alone
    Humidity,
    /// Heat and humidity together
    Combined,
    /// No clear environmental driver
    None,
}

impl fmt::Display for PrimaryFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Heat => "heat",
            Self::Humidity => "humidity",
            Self::Combined => "combined heat and humidity",
            Self::None => "no single environmental factor",
        };
        f.write_str(label)
    }
}

/// Correlation between environment and physiology for one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalCorrelation {
    /// Strength of the alignment (0-1)
    pub correlation_strength: f64,
    /// Dominant driver
    pub primary_factor: PrimaryFactor,
    /// All events ordered by distance
    pub events: Vec<CorrelationEvent>,
    /// Confidence in the assessment (0-1)
    pub confidence: f64,
    /// One-sentence summary
    pub summary: String,
}

impl EnvironmentalCorrelation {
    /// Physiological events only
    pub fn physiological_events(&self) -> impl Iterator<Item = &CorrelationEvent> {
        self.events.iter().filter(|e| !e.kind.is_environmental())
    }

    /// Environmental spike events only
    pub fn environmental_events(&self) -> impl Iterator<Item = &CorrelationEvent> {
        self.events.iter().filter(|e| e.kind.is_environmental())
    }
}

/// Aligns physiological stress with environmental spikes
pub struct CorrelationEngine<'a> {
    config: &'a CorrelationConfig,
}

impl<'a> CorrelationEngine<'a> {
    /// Create an engine bound to the given configuration
    #[must_use]
    pub const fn new(config: &'a CorrelationConfig) -> Self {
        Self { config }
    }

    /// Correlate detected stress with the adjusted weather stream
    #[must_use]
    pub fn correlate(
        &self,
        stress: &PhysiologicalStress,
        weather: &[AdjustedWeatherPoint],
        samples: &[StreamSample],
    ) -> EnvironmentalCorrelation {
        let summary_stats = WeatherSummary::from_points(weather);

        let physiological = physiological_events(stress, weather, samples);
        let mut environmental = self.detect_heat_spikes(weather);
        environmental.extend(self.detect_humidity_spikes(weather));

        let correlation_strength = if stress.overall_stress_detected {
            self.correlation_strength(&physiological, &environmental, &summary_stats)
        } else {
            0.0
        };
        let primary_factor = self.primary_factor(&summary_stats);
        let confidence = self.confidence(stress, weather.len(), environmental.len());
        let summary = self.summarize(
            correlation_strength,
            primary_factor,
            physiological.len(),
            environmental.len(),
        );

        let mut events = physiological;
        events.extend(environmental);
        events.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        debug!(
            events = events.len(),
            correlation_strength,
            confidence,
            primary_factor = %primary_factor,
            "Environmental correlation computed"
        );

        EnvironmentalCorrelation {
            correlation_strength,
            primary_factor,
            events,
            confidence,
            summary,
        }
    }

    /// Heat-index spikes above the early-stream baseline, with cool-down
    #[must_use]
    pub fn detect_heat_spikes(&self, weather: &[AdjustedWeatherPoint]) -> Vec<CorrelationEvent> {
        let baseline_end =
            ((weather.len() as f64 * self.config.baseline_fraction).floor() as usize).min(weather.len());
        if baseline_end == 0 {
            return Vec::new();
        }
        let baseline = weather[..baseline_end]
            .iter()
            .map(|p| p.heat_index_celsius)
            .sum::<f64>()
            / baseline_end as f64;
        let limit = baseline + self.config.heat_spike_delta_celsius;

        let mut gate = SpikeGate::Armed;
        weather
            .iter()
            .enumerate()
            .skip(baseline_end)
            .filter(|(_, p)| gate.step(p.heat_index_celsius > limit, self.config.spike_cooldown_samples))
            .map(|(i, p)| environmental_event(CorrelationEventKind::HeatSpike, i, p))
            .collect()
    }

    /// Upward crossings of the high-humidity threshold, with cool-down
    #[must_use]
    pub fn detect_humidity_spikes(&self, weather: &[AdjustedWeatherPoint]) -> Vec<CorrelationEvent> {
        let threshold = self.config.humidity_spike_percent;
        let mut gate = SpikeGate::Armed;
        weather
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| {
                let crossed =
                    pair[0].humidity_percent < threshold && pair[1].humidity_percent >= threshold;
                gate.step(crossed, self.config.spike_cooldown_samples)
            })
            .map(|(i, pair)| environmental_event(CorrelationEventKind::HumiditySpike, i + 1, &pair[1]))
            .collect()
    }

    /// Physiological events preceded by an environmental spike within the look-back window
    #[must_use]
    pub fn count_preceded(
        &self,
        physiological: &[CorrelationEvent],
        environmental: &[CorrelationEvent],
    ) -> usize {
        let window = self.config.preceding_window_km;
        physiological
            .iter()
            .filter(|phys| {
                environmental.iter().any(|env| {
                    env.distance_km <= phys.distance_km
                        && env.distance_km >= phys.distance_km - window
                })
            })
            .count()
    }

    /// Matched fraction plus sustained-heat bonus, normalized to [0, 1]
    #[must_use]
    pub fn correlation_strength(
        &self,
        physiological: &[CorrelationEvent],
        environmental: &[CorrelationEvent],
        weather: &WeatherSummary,
    ) -> f64 {
        let matches = self.count_preceded(physiological, environmental) as f64;
        let mut bonus = 0.0;
        if weather.mean_heat_index_celsius > self.config.warm_bonus_heat_index {
            bonus += self.config.heat_bonus_step;
        }
        if weather.mean_heat_index_celsius > self.config.hot_bonus_heat_index {
            bonus += self.config.heat_bonus_step;
        }
        // One check per physiological event plus one for the heat bonus
        let checks = physiological.len() as f64 + 1.0;
        ((matches + bonus) / checks).clamp(0.0, 1.0)
    }

    /// Attribute the stress to heat, humidity, both, or neither
    #[must_use]
    pub fn primary_factor(&self, weather: &WeatherSummary) -> PrimaryFactor {
        let cfg = self.config;
        let hot = weather.mean_heat_index_celsius > cfg.primary_heat_index;
        let humid = weather.mean_humidity_percent > cfg.primary_humidity_percent;
        if hot && humid {
            PrimaryFactor::Combined
        } else if hot || weather.mean_temperature_celsius > cfg.primary_temperature_celsius {
            PrimaryFactor::Heat
        } else if humid {
            PrimaryFactor::Humidity
        } else {
            PrimaryFactor::None
        }
    }

    fn confidence(
        &self,
        stress: &PhysiologicalStress,
        weather_points: usize,
        environmental_events: usize,
    ) -> f64 {
        let cfg = self.config;
        let mut confidence = cfg.base_confidence;
        if weather_points > cfg.dense_weather_points {
            confidence += cfg.confidence_step;
        }
        confidence += cfg.confidence_step * stress.detected_count() as f64;
        if stress.hr_drift.detected && stress.hr_drift.sustained {
            confidence += cfg.confidence_step;
        }
        if environmental_events == 0 {
            confidence -= cfg.no_spike_penalty;
        }
        confidence.clamp(0.0, 1.0)
    }

    fn summarize(
        &self,
        strength: f64,
        factor: PrimaryFactor,
        physiological: usize,
        environmental: usize,
    ) -> String {
        if strength < self.config.weak_strength_threshold {
            return format!(
                "Limited evidence of environmental impact on performance \
                 ({physiological} physiological, {environmental} environmental events)"
            );
        }
        match factor {
            PrimaryFactor::None => format!(
                "Physiological stress coincided with environmental changes: \
                 {physiological} physiological and {environmental} environmental events"
            ),
            factor => format!(
                "{} likely contributed to performance decline: \
                 {physiological} physiological and {environmental} environmental events",
                capitalize(&factor.to_string())
            ),
        }
    }
}

fn physiological_events(
    stress: &PhysiologicalStress,
    weather: &[AdjustedWeatherPoint],
    samples: &[StreamSample],
) -> Vec<CorrelationEvent> {
    stress
        .signals()
        .into_iter()
        .filter(|signal| signal.is_detected())
        .map(|signal| {
            let index = signal.onset_index();
            CorrelationEvent {
                kind: signal.kind().into(),
                index,
                distance_km: signal.onset_km(),
                environment: weather
                    .get(index)
                    .map_or_else(EnvironmentalSnapshot::default, snapshot),
                physiology: samples.get(index).map(|s| PhysiologicalSnapshot {
                    heart_rate_bpm: s.heart_rate_bpm,
                    velocity_mps: s.velocity_mps,
                    cadence_spm: s.cadence_spm,
                }),
            }
        })
        .collect()
}

fn environmental_event(
    kind: CorrelationEventKind,
    index: usize,
    point: &AdjustedWeatherPoint,
) -> CorrelationEvent {
    CorrelationEvent {
        kind,
        index,
        distance_km: point.distance_km(),
        environment: snapshot(point),
        physiology: None,
    }
}

fn snapshot(point: &AdjustedWeatherPoint) -> EnvironmentalSnapshot {
    EnvironmentalSnapshot {
        temperature_celsius: point.temperature_celsius,
        humidity_percent: point.humidity_percent,
        heat_index_celsius: point.heat_index_celsius,
        elevation_meters: point.elevation_meters,
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_suppresses_for_cooldown_samples() {
        let mut gate = SpikeGate::Armed;
        assert!(gate.step(true, 3));
        assert!(!gate.step(true, 3));
        assert!(!gate.step(true, 3));
        assert!(!gate.step(true, 3));
        assert_eq!(gate, SpikeGate::Armed);
        assert!(gate.step(true, 3));
    }

    #[test]
    fn test_gate_without_cooldown_stays_armed() {
        let mut gate = SpikeGate::Armed;
        assert!(gate.step(true, 0));
        assert!(gate.step(true, 0));
        assert!(!gate.step(false, 0));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("heat"), "Heat");
        assert_eq!(capitalize(""), "");
    }
}
