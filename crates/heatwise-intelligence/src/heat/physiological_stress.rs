// ABOUTME: Physiological stress detection from heart rate, velocity, elevation, and cadence streams
// ABOUTME: Baseline-vs-rolling-window detectors for HR drift, pace fade, VAM decline, cadence drop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physiological stress signatures.
//!
//! Every detector follows one shape: a baseline from an early stable part
//! of the stream, rolling windows over the remainder, and the window of
//! maximum deviation compared against a fixed threshold. Missing channels
//! and short streams yield an undetected signature, never an error.

use crate::config::heat::StressDetectionConfig;
use heatwise_core::constants::units::SECONDS_PER_MINUTE;
use heatwise_core::models::{StreamBundle, StreamSample};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The four physiological stress signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressKind {
    /// Heart rate rising at constant effort
    HrDrift,
    /// Velocity falling on comparable terrain
    PaceDegradation,
    /// Climbing rate falling on later climbs
    VamDecline,
    /// Running cadence falling
    CadenceDrop,
}

/// Common view over a detected (or undetected) stress signature
pub trait StressSignal {
    /// Which signature this is
    fn kind(&self) -> StressKind;
    /// Whether the deviation crossed its threshold
    fn is_detected(&self) -> bool;
    /// Size of the deviation in the signature's own unit (zero when undetected)
    fn magnitude(&self) -> f64;
    /// Sample index where the deviation first crossed its threshold
    fn onset_index(&self) -> usize;
    /// Distance where the deviation first crossed its threshold (km)
    fn onset_km(&self) -> f64;
}

/// Heart rate drift signature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HrDriftSignature {
    /// Whether drift exceeded the threshold
    pub detected: bool,
    /// Peak drift above baseline (bpm)
    pub drift_bpm: f64,
    /// Baseline heart rate (bpm)
    pub baseline_hr: f64,
    /// Mean heart rate of the peak window (bpm)
    pub peak_hr: f64,
    /// Whether the drift persisted past the peak window
    pub sustained: bool,
    /// First sample of the first over-threshold window
    pub onset_index: usize,
    /// Distance of the onset (km)
    pub onset_km: f64,
}

/// Pace degradation signature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaceDegradationSignature {
    /// Whether degradation exceeded the threshold
    pub detected: bool,
    /// Peak velocity reduction (%)
    pub degradation_percent: f64,
    /// Baseline moving velocity (m/s)
    pub baseline_velocity_mps: f64,
    /// Mean velocity of the slowest comparable window (m/s)
    pub degraded_velocity_mps: f64,
    /// Whether windows were grade-matched against the baseline
    pub grade_controlled: bool,
    /// First sample of the first over-threshold window
    pub onset_index: usize,
    /// Distance of the onset (km)
    pub onset_km: f64,
}

/// Climbing rate (VAM) decline signature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VamDeclineSignature {
    /// Whether the decline exceeded the threshold
    pub detected: bool,
    /// Late-vs-early VAM reduction (%)
    pub decline_percent: f64,
    /// Mean VAM over the early climbs (m/min)
    pub early_vam: f64,
    /// Mean VAM over the late climbs (m/min)
    pub late_vam: f64,
    /// Qualifying climbs analyzed
    pub climbs_analyzed: usize,
    /// First sample of the first late climb
    pub onset_index: usize,
    /// Distance of the onset (km)
    pub onset_km: f64,
}

/// Cadence drop signature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CadenceDropSignature {
    /// Whether the drop exceeded the threshold
    pub detected: bool,
    /// Peak cadence reduction (%)
    pub drop_percent: f64,
    /// Baseline running cadence (spm)
    pub baseline_cadence: f64,
    /// Mean cadence of the lowest comparable window (spm)
    pub lowest_cadence: f64,
    /// Whether windows were grade-matched against the baseline
    pub grade_controlled: bool,
    /// First sample of the first over-threshold window
    pub onset_index: usize,
    /// Distance of the onset (km)
    pub onset_km: f64,
}

macro_rules! impl_stress_signal {
    ($ty:ty, $kind:expr, $magnitude:ident) => {
        impl StressSignal for $ty {
            fn kind(&self) -> StressKind {
                $kind
            }
            fn is_detected(&self) -> bool {
                self.detected
            }
            fn magnitude(&self) -> f64 {
                if self.detected {
                    self.$magnitude
                } else {
                    0.0
                }
            }
            fn onset_index(&self) -> usize {
                self.onset_index
            }
            fn onset_km(&self) -> f64 {
                self.onset_km
            }
        }
    };
}

impl_stress_signal!(HrDriftSignature, StressKind::HrDrift, drift_bpm);
impl_stress_signal!(
    PaceDegradationSignature,
    StressKind::PaceDegradation,
    degradation_percent
);
impl_stress_signal!(VamDeclineSignature, StressKind::VamDecline, decline_percent);
impl_stress_signal!(CadenceDropSignature, StressKind::CadenceDrop, drop_percent);

/// All four signatures for one activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysiologicalStress {
    /// Heart rate drift
    pub hr_drift: HrDriftSignature,
    /// Pace degradation
    pub pace_degradation: PaceDegradationSignature,
    /// VAM decline
    pub vam_decline: VamDeclineSignature,
    /// Cadence drop
    pub cadence_drop: CadenceDropSignature,
    /// True when any signature was detected
    pub overall_stress_detected: bool,
}

impl PhysiologicalStress {
    /// The four signatures behind a common interface
    #[must_use]
    pub fn signals(&self) -> [&dyn StressSignal; 4] {
        [
            &self.hr_drift,
            &self.pace_degradation,
            &self.vam_decline,
            &self.cadence_drop,
        ]
    }

    /// Number of detected signatures
    #[must_use]
    pub fn detected_count(&self) -> usize {
        self.signals().iter().filter(|s| s.is_detected()).count()
    }
}

/// A qualifying climb segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimbSegment {
    /// First sample of the climb
    pub start_index: usize,
    /// Last sample of the climb
    pub end_index: usize,
    /// Accumulated gain (m)
    pub elevation_gain_m: f64,
    /// Climb duration (s)
    pub duration_seconds: f64,
    /// Vertical ascent rate (m/min)
    pub vam: f64,
}

/// Windowed reduction against a baseline
struct ReductionScan {
    baseline: f64,
    lowest: f64,
    reduction_percent: f64,
    onset_index: Option<usize>,
    grade_controlled: bool,
}

/// Detects physiological stress signatures in raw activity streams
pub struct PhysiologicalStressDetector<'a> {
    config: &'a StressDetectionConfig,
}

impl<'a> PhysiologicalStressDetector<'a> {
    /// Create a detector bound to the given configuration
    #[must_use]
    pub const fn new(config: &'a StressDetectionConfig) -> Self {
        Self { config }
    }

    /// Run all four detectors
    #[must_use]
    pub fn detect(&self, bundle: &StreamBundle) -> PhysiologicalStress {
        let has_grade = bundle.has_grade();
        let samples = bundle.samples();

        let hr_drift = self.detect_hr_drift(samples);
        let pace_degradation = self.detect_pace_degradation(samples, has_grade);
        let vam_decline = self.detect_vam_decline(samples);
        let cadence_drop = self.detect_cadence_drop(samples, has_grade);

        let overall_stress_detected = hr_drift.detected
            || pace_degradation.detected
            || vam_decline.detected
            || cadence_drop.detected;

        debug!(
            samples = samples.len(),
            hr_drift = hr_drift.detected,
            pace_degradation = pace_degradation.detected,
            vam_decline = vam_decline.detected,
            cadence_drop = cadence_drop.detected,
            "Physiological stress detection complete"
        );

        PhysiologicalStress {
            hr_drift,
            pace_degradation,
            vam_decline,
            cadence_drop,
            overall_stress_detected,
        }
    }

    /// Heart rate drift against the [10 %, 30 %) baseline
    #[must_use]
    pub fn detect_hr_drift(&self, samples: &[StreamSample]) -> HrDriftSignature {
        let cfg = &self.config.heart_rate;
        let n = samples.len();
        if n < self.config.min_samples || !samples.iter().any(|s| s.heart_rate_bpm.is_some()) {
            return HrDriftSignature::default();
        }

        let baseline_start = fraction_index(n, cfg.baseline_start_fraction);
        let scan_start = fraction_index(n, cfg.baseline_end_fraction);
        let Some(baseline) = mean(
            samples[baseline_start..scan_start]
                .iter()
                .filter_map(|s| s.heart_rate_bpm),
        ) else {
            return HrDriftSignature::default();
        };

        let window = self.window_size(n);
        let windows = window_means(samples, scan_start, window, |s| s.heart_rate_bpm, None);

        let mut peak: Option<(usize, f64)> = None;
        let mut onset = None;
        for &(start, value) in &windows {
            let drift = value - baseline;
            if drift > cfg.drift_threshold_bpm && onset.is_none() {
                onset = Some(start);
            }
            if peak.is_none_or(|(_, best)| drift > best) {
                peak = Some((start, drift));
            }
        }

        let (Some((peak_index, drift)), Some(onset_index)) = (peak, onset) else {
            return HrDriftSignature::default();
        };

        // Nothing follows a peak in the final window; judge the peak window itself
        let mut follow_start = (peak_index + window).min(n);
        let follow_end = (follow_start + cfg.sustained_windows * window).min(n);
        if follow_start == follow_end {
            follow_start = peak_index;
        }
        let sustained = mean(
            samples[follow_start..follow_end]
                .iter()
                .filter_map(|s| s.heart_rate_bpm),
        )
        .is_some_and(|follow| follow - baseline >= cfg.sustained_retention * drift);

        HrDriftSignature {
            detected: true,
            drift_bpm: drift,
            baseline_hr: baseline,
            peak_hr: baseline + drift,
            sustained,
            onset_index,
            onset_km: samples[onset_index].distance_km(),
        }
    }

    /// Moving-velocity degradation against the [0, 30 %) baseline
    ///
    /// With `grade_matched`, only windows whose mean grade is close to the
    /// baseline grade are compared.
    #[must_use]
    pub fn detect_pace_degradation(
        &self,
        samples: &[StreamSample],
        grade_matched: bool,
    ) -> PaceDegradationSignature {
        let cfg = &self.config.pace;
        let stationary = cfg.stationary_velocity_mps;
        let moving = |s: &StreamSample| s.velocity_mps.filter(|v| *v >= stationary);

        let Some(scan) = self.scan_reduction(
            samples,
            moving,
            cfg.baseline_end_fraction,
            grade_matched.then_some(cfg.grade_match_tolerance),
            cfg.degradation_threshold_percent,
        ) else {
            return PaceDegradationSignature::default();
        };

        match scan.onset_index {
            Some(onset_index) => PaceDegradationSignature {
                detected: true,
                degradation_percent: scan.reduction_percent,
                baseline_velocity_mps: scan.baseline,
                degraded_velocity_mps: scan.lowest,
                grade_controlled: scan.grade_controlled,
                onset_index,
                onset_km: samples[onset_index].distance_km(),
            },
            None => PaceDegradationSignature::default(),
        }
    }

    /// Running-cadence drop against the [0, 30 %) baseline
    #[must_use]
    pub fn detect_cadence_drop(
        &self,
        samples: &[StreamSample],
        grade_matched: bool,
    ) -> CadenceDropSignature {
        let cfg = &self.config.cadence;
        let floor = cfg.min_running_cadence_spm;
        let running = |s: &StreamSample| s.cadence_spm.filter(|c| *c > floor);

        let Some(scan) = self.scan_reduction(
            samples,
            running,
            cfg.baseline_end_fraction,
            grade_matched.then_some(cfg.grade_match_tolerance),
            cfg.drop_threshold_percent,
        ) else {
            return CadenceDropSignature::default();
        };

        match scan.onset_index {
            Some(onset_index) => CadenceDropSignature {
                detected: true,
                drop_percent: scan.reduction_percent,
                baseline_cadence: scan.baseline,
                lowest_cadence: scan.lowest,
                grade_controlled: scan.grade_controlled,
                onset_index,
                onset_km: samples[onset_index].distance_km(),
            },
            None => CadenceDropSignature::default(),
        }
    }

    /// Late-vs-early climbing rate decline
    #[must_use]
    pub fn detect_vam_decline(&self, samples: &[StreamSample]) -> VamDeclineSignature {
        let cfg = &self.config.vam;
        if samples.len() < self.config.min_samples {
            return VamDeclineSignature::default();
        }

        let climbs = self.identify_climbs(samples);
        if climbs.len() < cfg.min_climbs.max(2) {
            return VamDeclineSignature::default();
        }

        let (early, late) = climbs.split_at(climbs.len() / 2);
        let early_vam = mean(early.iter().map(|c| c.vam)).unwrap_or(0.0);
        let late_vam = mean(late.iter().map(|c| c.vam)).unwrap_or(0.0);
        if early_vam <= 0.0 {
            return VamDeclineSignature::default();
        }

        let decline_percent = (early_vam - late_vam) / early_vam * 100.0;
        if decline_percent <= cfg.decline_threshold_percent {
            return VamDeclineSignature::default();
        }

        let onset_index = late[0].start_index;
        VamDeclineSignature {
            detected: true,
            decline_percent,
            early_vam,
            late_vam,
            climbs_analyzed: climbs.len(),
            onset_index,
            onset_km: samples[onset_index].distance_km(),
        }
    }

    /// Qualifying climbs: sustained gain runs above the minimum gain and duration
    #[must_use]
    pub fn identify_climbs(&self, samples: &[StreamSample]) -> Vec<ClimbSegment> {
        let cfg = &self.config.vam;
        let mut climbs = Vec::new();
        let mut open: Option<(usize, f64)> = None;

        let mut close = |start: usize, end: usize, gain: f64| {
            let duration = samples[end].elapsed_seconds - samples[start].elapsed_seconds;
            if gain > cfg.min_climb_gain_m && duration > cfg.min_climb_duration_seconds {
                climbs.push(ClimbSegment {
                    start_index: start,
                    end_index: end,
                    elevation_gain_m: gain,
                    duration_seconds: duration,
                    vam: gain / (duration / SECONDS_PER_MINUTE),
                });
            }
        };

        for (i, pair) in samples.windows(2).enumerate() {
            let delta = match (pair[0].elevation_meters, pair[1].elevation_meters) {
                (Some(prev), Some(next)) => Some(next - prev),
                _ => None,
            };
            open = match (open, delta) {
                (None, Some(d)) if d > cfg.climb_start_gain_m => Some((i, d)),
                (Some((start, gain)), Some(d)) if d >= cfg.climb_continue_gain_m => {
                    Some((start, gain + d))
                }
                (Some((start, gain)), _) => {
                    close(start, i, gain);
                    None
                }
                (None, _) => None,
            };
        }
        if let Some((start, gain)) = open {
            close(start, samples.len() - 1, gain);
        }

        climbs
    }

    fn scan_reduction(
        &self,
        samples: &[StreamSample],
        value: impl Fn(&StreamSample) -> Option<f64>,
        baseline_end_fraction: f64,
        grade_tolerance: Option<f64>,
        threshold_percent: f64,
    ) -> Option<ReductionScan> {
        let n = samples.len();
        if n < self.config.min_samples {
            return None;
        }

        let scan_start = fraction_index(n, baseline_end_fraction);
        let baseline_samples = &samples[..scan_start];
        let baseline = mean(baseline_samples.iter().filter_map(&value))?;
        if baseline <= 0.0 {
            return None;
        }

        let grade_gate = grade_tolerance.and_then(|tolerance| {
            mean(
                baseline_samples
                    .iter()
                    .filter(|s| value(s).is_some())
                    .filter_map(|s| s.grade),
            )
            .map(|baseline_grade| (baseline_grade, tolerance))
        });

        let windows = window_means(samples, scan_start, self.window_size(n), &value, grade_gate);
        let mut scan = ReductionScan {
            baseline,
            lowest: baseline,
            reduction_percent: 0.0,
            onset_index: None,
            grade_controlled: grade_gate.is_some(),
        };
        for (start, window_mean) in windows {
            let reduction = (baseline - window_mean) / baseline * 100.0;
            if reduction > threshold_percent && scan.onset_index.is_none() {
                scan.onset_index = Some(start);
            }
            if reduction > scan.reduction_percent {
                scan.reduction_percent = reduction;
                scan.lowest = window_mean;
            }
        }
        Some(scan)
    }

    fn window_size(&self, n: usize) -> usize {
        ((n as f64 * self.config.window_fraction) as usize).clamp(1, self.config.max_window_samples)
    }
}

/// Mean of each comparable rolling window starting at or after `scan_start`
///
/// A window is skipped when it holds no values, or when a grade gate is
/// given and its mean grade strays from the baseline grade by more than
/// the tolerance.
fn window_means(
    samples: &[StreamSample],
    scan_start: usize,
    window: usize,
    value: impl Fn(&StreamSample) -> Option<f64>,
    grade_gate: Option<(f64, f64)>,
) -> Vec<(usize, f64)> {
    if window == 0 || samples.len() < window || scan_start > samples.len() - window {
        return Vec::new();
    }

    (scan_start..=samples.len() - window)
        .filter_map(|start| {
            let slice = &samples[start..start + window];
            if let Some((baseline_grade, tolerance)) = grade_gate {
                let grade = mean(slice.iter().filter_map(|s| s.grade))?;
                if (grade - baseline_grade).abs() > tolerance {
                    return None;
                }
            }
            mean(slice.iter().filter_map(&value)).map(|m| (start, m))
        })
        .collect()
}

fn fraction_index(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).floor() as usize).min(n)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter;

    #[test]
    fn test_mean_of_empty_is_none() {
        assert!(mean(iter::empty()).is_none());
        assert_eq!(mean([2.0, 4.0].into_iter()), Some(3.0));
    }

    #[test]
    fn test_window_size_is_capped() {
        let config = StressDetectionConfig::default();
        let detector = PhysiologicalStressDetector::new(&config);
        assert_eq!(detector.window_size(100), 10);
        assert_eq!(detector.window_size(5000), 20);
        assert_eq!(detector.window_size(3), 1);
    }

    #[test]
    fn test_window_means_respects_grade_gate() {
        let samples: Vec<StreamSample> = (0..10)
            .map(|i| StreamSample {
                elapsed_seconds: f64::from(i),
                velocity_mps: Some(3.0),
                grade: Some(if i < 5 { 0.0 } else { 0.08 }),
                ..StreamSample::default()
            })
            .collect();
        let windows = window_means(&samples, 0, 5, |s| s.velocity_mps, Some((0.0, 0.03)));
        assert_eq!(windows, vec![(0, 3.0)]);
    }
}
