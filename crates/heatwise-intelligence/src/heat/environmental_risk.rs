// ABOUTME: Environmental risk classification over the elevation-corrected weather stream
// ABOUTME: Heat-index risk tiers, zone dwell time, humidity strain, cooling climbs, peak heat window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environmental risk analysis.
//!
//! Everything here is a pure function of the adjusted weather stream. Time
//! deltas between consecutive samples are always attributed to the later
//! sample, so the first sample contributes no duration.

use crate::config::heat::RiskClassificationConfig;
use heatwise_core::constants::units::SECONDS_PER_MINUTE;
use heatwise_core::models::AdjustedWeatherPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Heat-index risk tier, ordered from safest to most dangerous
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Below the caution threshold
    Safe,
    /// Fatigue possible with prolonged exposure
    Caution,
    /// Heat cramps and exhaustion possible
    ExtremeCaution,
    /// Heat exhaustion likely
    Danger,
    /// Heat stroke highly likely
    ExtremeDanger,
}

impl RiskLevel {
    /// All tiers in ascending order
    pub const ALL: [Self; 5] = [
        Self::Safe,
        Self::Caution,
        Self::ExtremeCaution,
        Self::Danger,
        Self::ExtremeDanger,
    ];

    /// Whether this tier is above safe
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        !matches!(self, Self::Safe)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Safe => "safe",
            Self::Caution => "caution",
            Self::ExtremeCaution => "extreme caution",
            Self::Danger => "danger",
            Self::ExtremeDanger => "extreme danger",
        };
        f.write_str(label)
    }
}

/// A contiguous run of samples sharing one elevated risk tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskZone {
    /// Tier shared by every sample in the zone
    pub level: RiskLevel,
    /// First sample index
    pub start_index: usize,
    /// Last sample index (inclusive)
    pub end_index: usize,
    /// Distance at the first sample (km)
    pub start_km: f64,
    /// Distance at the last sample (km)
    pub end_km: f64,
    /// Mean heat index across the zone (°C)
    pub average_heat_index: f64,
    /// Highest heat index in the zone (°C)
    pub peak_heat_index: f64,
    /// Elapsed time from first to last sample (s)
    pub duration_seconds: f64,
}

/// Cumulative dwell time per risk tier (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeInZone {
    /// Seconds at safe
    pub safe_seconds: f64,
    /// Seconds at caution
    pub caution_seconds: f64,
    /// Seconds at extreme caution
    pub extreme_caution_seconds: f64,
    /// Seconds at danger
    pub danger_seconds: f64,
    /// Seconds at extreme danger
    pub extreme_danger_seconds: f64,
}

impl TimeInZone {
    /// Seconds accumulated in one tier
    #[must_use]
    pub const fn seconds_in(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Safe => self.safe_seconds,
            RiskLevel::Caution => self.caution_seconds,
            RiskLevel::ExtremeCaution => self.extreme_caution_seconds,
            RiskLevel::Danger => self.danger_seconds,
            RiskLevel::ExtremeDanger => self.extreme_danger_seconds,
        }
    }

    /// Sum of all five buckets
    #[must_use]
    pub fn total_seconds(&self) -> f64 {
        RiskLevel::ALL.iter().map(|l| self.seconds_in(*l)).sum()
    }

    fn add(&mut self, level: RiskLevel, seconds: f64) {
        let bucket = match level {
            RiskLevel::Safe => &mut self.safe_seconds,
            RiskLevel::Caution => &mut self.caution_seconds,
            RiskLevel::ExtremeCaution => &mut self.extreme_caution_seconds,
            RiskLevel::Danger => &mut self.danger_seconds,
            RiskLevel::ExtremeDanger => &mut self.extreme_danger_seconds,
        };
        *bucket += seconds;
    }
}

/// Time spent in high humidity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HumidityStrain {
    /// Seconds at or above the high-humidity threshold
    pub high_humidity_seconds: f64,
    /// Share of the total duration at high humidity (0-1)
    pub high_humidity_fraction: f64,
    /// Highest humidity seen (%)
    pub peak_humidity_percent: f64,
    /// Where the highest humidity was seen (km)
    pub peak_humidity_km: f64,
}

/// A climb along which the air cooled noticeably
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolingSegment {
    /// Sample before the first qualifying gain
    pub start_index: usize,
    /// Last sample of the climb
    pub end_index: usize,
    /// Distance at climb start (km)
    pub start_km: f64,
    /// Distance at climb end (km)
    pub end_km: f64,
    /// Elevation gained (m)
    pub elevation_gain_m: f64,
    /// Temperature at climb start (°C)
    pub start_temperature_celsius: f64,
    /// Temperature at climb end (°C)
    pub end_temperature_celsius: f64,
    /// Start minus end temperature (°C)
    pub temperature_drop_celsius: f64,
    /// Time spent on the climb (s)
    pub duration_seconds: f64,
    /// Whether the drop is large enough to plausibly help performance
    pub performance_benefit_estimated: bool,
}

/// All cooling segments of an activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoolingBenefit {
    /// Qualifying segments in stream order
    pub segments: Vec<CoolingSegment>,
    /// Sum of segment durations (s)
    pub total_cooling_seconds: f64,
    /// Segments flagged as a performance benefit
    pub significant_segments: usize,
}

/// The hottest contiguous window of the activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakHeatPeriod {
    /// First sample index
    pub start_index: usize,
    /// Last sample index (inclusive)
    pub end_index: usize,
    /// Distance at window start (km)
    pub start_km: f64,
    /// Distance at window end (km)
    pub end_km: f64,
    /// Mean heat index across the window (°C)
    pub average_heat_index: f64,
    /// Window width (s)
    pub duration_seconds: f64,
}

/// Aggregate weather statistics over the adjusted stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// Mean elevation-corrected temperature (°C)
    pub mean_temperature_celsius: f64,
    /// Mean elevation-corrected humidity (%)
    pub mean_humidity_percent: f64,
    /// Mean heat index (°C)
    pub mean_heat_index_celsius: f64,
    /// Highest heat index (°C)
    pub max_heat_index_celsius: f64,
    /// Highest temperature (°C)
    pub max_temperature_celsius: f64,
    /// Number of adjusted points
    pub point_count: usize,
}

impl WeatherSummary {
    /// Summarize an adjusted weather stream (all zeros when empty)
    #[must_use]
    pub fn from_points(points: &[AdjustedWeatherPoint]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let n = points.len() as f64;
        let mean = |f: fn(&AdjustedWeatherPoint) -> f64| points.iter().map(f).sum::<f64>() / n;
        let max = |f: fn(&AdjustedWeatherPoint) -> f64| {
            points.iter().map(f).fold(f64::NEG_INFINITY, f64::max)
        };
        Self {
            mean_temperature_celsius: mean(|p| p.temperature_celsius),
            mean_humidity_percent: mean(|p| p.humidity_percent),
            mean_heat_index_celsius: mean(|p| p.heat_index_celsius),
            max_heat_index_celsius: max(|p| p.heat_index_celsius),
            max_temperature_celsius: max(|p| p.temperature_celsius),
            point_count: points.len(),
        }
    }
}

/// Everything the classifier derives from one activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalRisk {
    /// Elevated-risk zones in stream order
    pub risk_zones: Vec<RiskZone>,
    /// Dwell time per tier
    pub time_in_zones: TimeInZone,
    /// High-humidity exposure
    pub humidity_strain: HumidityStrain,
    /// Elevation-driven cooling
    pub cooling_benefit: CoolingBenefit,
    /// Hottest window, if the stream has at least two samples
    pub peak_heat_period: Option<PeakHeatPeriod>,
    /// Aggregate statistics
    pub weather_summary: WeatherSummary,
}

/// Classifies the adjusted weather stream into heat risk
pub struct EnvironmentalRiskClassifier<'a> {
    config: &'a RiskClassificationConfig,
}

impl<'a> EnvironmentalRiskClassifier<'a> {
    /// Create a classifier bound to the given configuration
    #[must_use]
    pub const fn new(config: &'a RiskClassificationConfig) -> Self {
        Self { config }
    }

    /// Run every analysis over the stream
    #[must_use]
    pub fn assess(&self, points: &[AdjustedWeatherPoint]) -> EnvironmentalRisk {
        let risk = EnvironmentalRisk {
            risk_zones: self.identify_risk_zones(points),
            time_in_zones: self.calculate_time_in_zones(points),
            humidity_strain: self.analyze_humidity_strain(points),
            cooling_benefit: self.detect_cooling_benefits(points),
            peak_heat_period: self.identify_peak_heat_period(points),
            weather_summary: WeatherSummary::from_points(points),
        };
        debug!(
            zones = risk.risk_zones.len(),
            danger_seconds = risk.time_in_zones.danger_seconds
                + risk.time_in_zones.extreme_danger_seconds,
            cooling_segments = risk.cooling_benefit.segments.len(),
            "Environmental risk assessed"
        );
        risk
    }

    /// Risk tier for a heat index (°C)
    #[must_use]
    pub fn classify(&self, heat_index: f64) -> RiskLevel {
        let cfg = self.config;
        if heat_index >= cfg.extreme_danger_heat_index {
            RiskLevel::ExtremeDanger
        } else if heat_index >= cfg.danger_heat_index {
            RiskLevel::Danger
        } else if heat_index >= cfg.extreme_caution_heat_index {
            RiskLevel::ExtremeCaution
        } else if heat_index >= cfg.caution_heat_index {
            RiskLevel::Caution
        } else {
            RiskLevel::Safe
        }
    }

    /// Merge consecutive same-tier samples into zones, dropping safe spans
    #[must_use]
    pub fn identify_risk_zones(&self, points: &[AdjustedWeatherPoint]) -> Vec<RiskZone> {
        let mut zones = Vec::new();
        let mut run_start = 0;
        for i in 1..=points.len() {
            let boundary = i == points.len()
                || self.classify(points[i].heat_index_celsius)
                    != self.classify(points[run_start].heat_index_celsius);
            if boundary {
                let level = self.classify(points[run_start].heat_index_celsius);
                if level.is_elevated() {
                    zones.push(build_zone(level, &points[run_start..i], run_start));
                }
                run_start = i;
            }
        }
        zones
    }

    /// Accumulate each inter-sample delta into the later sample's tier
    #[must_use]
    pub fn calculate_time_in_zones(&self, points: &[AdjustedWeatherPoint]) -> TimeInZone {
        let mut time = TimeInZone::default();
        for pair in points.windows(2) {
            let dt = pair[1].elapsed_seconds - pair[0].elapsed_seconds;
            if dt > 0.0 {
                time.add(self.classify(pair[1].heat_index_celsius), dt);
            }
        }
        time
    }

    /// Duration at high humidity plus the humidity peak
    #[must_use]
    pub fn analyze_humidity_strain(&self, points: &[AdjustedWeatherPoint]) -> HumidityStrain {
        let Some(first) = points.first() else {
            return HumidityStrain::default();
        };

        let threshold = self.config.high_humidity_percent;
        let high_humidity_seconds: f64 = points
            .windows(2)
            .filter(|pair| pair[1].humidity_percent >= threshold)
            .map(|pair| (pair[1].elapsed_seconds - pair[0].elapsed_seconds).max(0.0))
            .sum();

        let peak = points
            .iter()
            .fold(first, |best, p| if p.humidity_percent > best.humidity_percent { p } else { best });

        let total = total_duration(points);
        HumidityStrain {
            high_humidity_seconds,
            high_humidity_fraction: if total > 0.0 {
                (high_humidity_seconds / total).min(1.0)
            } else {
                0.0
            },
            peak_humidity_percent: peak.humidity_percent,
            peak_humidity_km: peak.distance_km(),
        }
    }

    /// Climbs where the air at the top is measurably cooler than at the bottom
    #[must_use]
    pub fn detect_cooling_benefits(&self, points: &[AdjustedWeatherPoint]) -> CoolingBenefit {
        let cfg = self.config;
        let mut benefit = CoolingBenefit::default();
        let mut open: Option<usize> = None;

        for (i, pair) in points.windows(2).enumerate() {
            let gain = pair[1].elevation_meters - pair[0].elevation_meters;
            open = match open {
                None if gain > cfg.cooling_climb_start_gain_m => Some(i),
                Some(start) if gain < cfg.cooling_climb_continue_gain_m => {
                    self.record_cooling(&mut benefit, &points[start..=i], start);
                    None
                }
                other => other,
            };
        }
        if let Some(start) = open {
            self.record_cooling(&mut benefit, &points[start..], start);
        }

        benefit.total_cooling_seconds = benefit.segments.iter().map(|s| s.duration_seconds).sum();
        benefit.significant_segments = benefit
            .segments
            .iter()
            .filter(|s| s.performance_benefit_estimated)
            .count();
        benefit
    }

    fn record_cooling(
        &self,
        benefit: &mut CoolingBenefit,
        climb: &[AdjustedWeatherPoint],
        start_index: usize,
    ) {
        let (Some(first), Some(last)) = (climb.first(), climb.last()) else {
            return;
        };
        let drop = first.temperature_celsius - last.temperature_celsius;
        if drop < self.config.cooling_min_drop_celsius {
            return;
        }
        benefit.segments.push(CoolingSegment {
            start_index,
            end_index: start_index + climb.len() - 1,
            start_km: first.distance_km(),
            end_km: last.distance_km(),
            elevation_gain_m: last.elevation_meters - first.elevation_meters,
            start_temperature_celsius: first.temperature_celsius,
            end_temperature_celsius: last.temperature_celsius,
            temperature_drop_celsius: drop,
            duration_seconds: last.elapsed_seconds - first.elapsed_seconds,
            performance_benefit_estimated: drop > self.config.cooling_significant_drop_celsius,
        });
    }

    /// Widest window of at most the configured minutes with the highest mean heat index
    ///
    /// For every right edge the window extends as far left as the time cap
    /// allows. When every gap is wider than the cap, the hottest single
    /// sample stands in as a zero-width window.
    #[must_use]
    pub fn identify_peak_heat_period(
        &self,
        points: &[AdjustedWeatherPoint],
    ) -> Option<PeakHeatPeriod> {
        if points.len() < 2 {
            return None;
        }

        let max_width = self.config.peak_window_minutes * SECONDS_PER_MINUTE;
        let mut prefix = Vec::with_capacity(points.len() + 1);
        prefix.push(0.0);
        for p in points {
            prefix.push(prefix[prefix.len() - 1] + p.heat_index_celsius);
        }

        let mut best: Option<(usize, usize, f64)> = None;
        let mut left = 0;
        for right in 1..points.len() {
            while left < right
                && points[right].elapsed_seconds - points[left].elapsed_seconds > max_width
            {
                left += 1;
            }
            if left == right {
                continue;
            }
            let average = (prefix[right + 1] - prefix[left]) / (right - left + 1) as f64;
            if best.is_none_or(|(_, _, top)| average > top) {
                best = Some((left, right, average));
            }
        }

        let best = best.or_else(|| {
            points
                .iter()
                .enumerate()
                .fold(None, |top: Option<(usize, usize, f64)>, (i, p)| {
                    match top {
                        Some((_, _, hottest)) if p.heat_index_celsius <= hottest => top,
                        _ => Some((i, i, p.heat_index_celsius)),
                    }
                })
        });

        best.map(|(start, end, average_heat_index)| PeakHeatPeriod {
            start_index: start,
            end_index: end,
            start_km: points[start].distance_km(),
            end_km: points[end].distance_km(),
            average_heat_index,
            duration_seconds: points[end].elapsed_seconds - points[start].elapsed_seconds,
        })
    }
}

/// Elapsed time from first to last sample
#[must_use]
pub fn total_duration(points: &[AdjustedWeatherPoint]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => (last.elapsed_seconds - first.elapsed_seconds).max(0.0),
        _ => 0.0,
    }
}

fn build_zone(level: RiskLevel, run: &[AdjustedWeatherPoint], start_index: usize) -> RiskZone {
    let first = &run[0];
    let last = &run[run.len() - 1];
    let sum: f64 = run.iter().map(|p| p.heat_index_celsius).sum();
    RiskZone {
        level,
        start_index,
        end_index: start_index + run.len() - 1,
        start_km: first.distance_km(),
        end_km: last.distance_km(),
        average_heat_index: sum / run.len() as f64,
        peak_heat_index: run
            .iter()
            .map(|p| p.heat_index_celsius)
            .fold(f64::NEG_INFINITY, f64::max),
        duration_seconds: last.elapsed_seconds - first.elapsed_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_levels_are_ordered() {
        assert!(RiskLevel::Safe < RiskLevel::Caution);
        assert!(RiskLevel::Danger < RiskLevel::ExtremeDanger);
        assert_eq!(RiskLevel::ALL.iter().max(), Some(&RiskLevel::ExtremeDanger));
    }

    #[test]
    fn test_time_in_zone_total_sums_buckets() {
        let mut time = TimeInZone::default();
        time.add(RiskLevel::Safe, 10.0);
        time.add(RiskLevel::Danger, 5.0);
        time.add(RiskLevel::Danger, 5.0);
        assert!((time.total_seconds() - 20.0).abs() < f64::EPSILON);
        assert!((time.seconds_in(RiskLevel::Danger) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classify_boundaries_are_inclusive() {
        let config = RiskClassificationConfig::default();
        let classifier = EnvironmentalRiskClassifier::new(&config);
        assert_eq!(classifier.classify(26.99), RiskLevel::Safe);
        assert_eq!(classifier.classify(27.0), RiskLevel::Caution);
        assert_eq!(classifier.classify(32.0), RiskLevel::ExtremeCaution);
        assert_eq!(classifier.classify(39.0), RiskLevel::Danger);
        assert_eq!(classifier.classify(51.0), RiskLevel::ExtremeDanger);
    }
}
