// ABOUTME: Integration tests for physiological stress signature detection
// ABOUTME: HR drift, pace degradation with grade control, VAM decline, and cadence drop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{bundle, hot_humid_samples, init_test_logging, recompute_distance, steady_samples};
use heatwise::intelligence::config::heat::StressDetectionConfig;
use heatwise::intelligence::heat::{PhysiologicalStressDetector, StressSignal};
use heatwise::models::StreamSample;
use std::iter;

/// Four qualifying climbs: two at 30 m/min followed by two at 21 m/min
fn rolling_climbs() -> Vec<StreamSample> {
    let segments: [(usize, f64); 9] = [
        (20, 0.0),
        (40, 5.0),
        (40, 0.0),
        (40, 5.0),
        (40, 0.0),
        (40, 3.5),
        (40, 0.0),
        (40, 3.5),
        (39, 0.0),
    ];
    let deltas: Vec<f64> = segments
        .iter()
        .flat_map(|&(count, gain)| iter::repeat_n(gain, count))
        .collect();

    let mut samples = steady_samples(deltas.len() + 1, 0.0);
    let mut elevation = 0.0;
    for (sample, delta) in samples.iter_mut().skip(1).zip(&deltas) {
        elevation += delta;
        sample.elevation_meters = Some(elevation);
    }
    samples
}

#[test]
fn test_short_stream_detects_nothing() {
    init_test_logging();
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);

    let mut samples = hot_humid_samples();
    samples.truncate(99);
    let stress = detector.detect(&bundle(samples));

    assert!(!stress.overall_stress_detected);
    assert_eq!(stress.detected_count(), 0);
    assert!(stress.signals().iter().all(|s| s.magnitude().abs() < f64::EPSILON));
}

#[test]
fn test_missing_channels_detect_nothing() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);

    let samples: Vec<StreamSample> = steady_samples(500, 0.0)
        .into_iter()
        .map(|s| StreamSample {
            elapsed_seconds: s.elapsed_seconds,
            distance_meters: s.distance_meters,
            ..StreamSample::default()
        })
        .collect();
    let stress = detector.detect(&bundle(samples));

    assert!(!stress.overall_stress_detected);
    assert!(!stress.hr_drift.detected);
    assert!(!stress.pace_degradation.detected);
    assert!(!stress.vam_decline.detected);
    assert!(!stress.cadence_drop.detected);
}

#[test]
fn test_steady_effort_detects_nothing() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);

    let stress = detector.detect(&bundle(steady_samples(600, 100.0)));

    assert!(!stress.overall_stress_detected);
}

#[test]
fn test_sustained_hr_drift() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let samples = hot_humid_samples();

    let drift = detector.detect_hr_drift(&samples);

    assert!(drift.detected);
    assert!(drift.sustained);
    assert!((drift.baseline_hr - 140.0).abs() < 1e-9);
    assert!((drift.drift_bpm - 15.0).abs() < 1e-9);
    assert!((drift.peak_hr - 155.0).abs() < 1e-9);
    assert!((280..=300).contains(&drift.onset_index));
    assert!((drift.onset_km - samples[drift.onset_index].distance_km()).abs() < 1e-12);
}

#[test]
fn test_drift_lasting_to_the_end_is_sustained() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let mut samples = steady_samples(600, 0.0);
    for (i, sample) in samples.iter_mut().enumerate() {
        sample.heart_rate_bpm = Some(140.0 + 30.0 * i as f64 / 599.0);
    }

    let drift = detector.detect_hr_drift(&samples);

    assert!(drift.detected);
    assert!(drift.sustained);
    assert!(drift.drift_bpm > 20.0);
    assert!(drift.peak_hr < 170.0);
}

#[test]
fn test_transient_hr_spike_is_not_sustained() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let mut samples = steady_samples(600, 0.0);
    for sample in &mut samples[300..320] {
        sample.heart_rate_bpm = Some(165.0);
    }

    let drift = detector.detect_hr_drift(&samples);

    assert!(drift.detected);
    assert!(!drift.sustained);
    assert!((drift.drift_bpm - 25.0).abs() < 1e-9);
}

#[test]
fn test_small_hr_rise_is_below_threshold() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let mut samples = steady_samples(600, 0.0);
    for sample in samples.iter_mut().skip(300) {
        sample.heart_rate_bpm = Some(148.0);
    }

    assert!(!detector.detect_hr_drift(&samples).detected);
}

#[test]
fn test_pace_degradation_on_matched_grade() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let activity = bundle(hot_humid_samples());

    let stress = detector.detect(&activity);
    let pace = &stress.pace_degradation;

    assert!(pace.detected);
    assert!(pace.grade_controlled);
    assert!((pace.degradation_percent - 20.0).abs() < 1e-6);
    assert!((pace.baseline_velocity_mps - 3.0).abs() < 1e-9);
    assert!((pace.degraded_velocity_mps - 2.4).abs() < 1e-9);
    assert!((280..=300).contains(&pace.onset_index));
}

#[test]
fn test_pace_degradation_without_grade_channel() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let mut samples = hot_humid_samples();
    for sample in &mut samples {
        sample.grade = None;
    }

    let stress = detector.detect(&bundle(samples));

    assert!(stress.pace_degradation.detected);
    assert!(!stress.pace_degradation.grade_controlled);
}

#[test]
fn test_slowing_on_steeper_ground_is_not_degradation() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let mut samples = steady_samples(600, 0.0);
    for sample in samples.iter_mut().skip(300) {
        sample.velocity_mps = Some(2.4);
        sample.grade = Some(0.08);
    }
    recompute_distance(&mut samples);

    let gated = detector.detect_pace_degradation(&samples, true);
    let ungated = detector.detect_pace_degradation(&samples, false);

    assert!(!gated.detected);
    assert!(ungated.detected);
}

#[test]
fn test_stationary_samples_are_excluded_from_pace() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let mut samples = steady_samples(600, 0.0);
    // Stops at aid stations late in the run
    for sample in samples.iter_mut().skip(400).step_by(25) {
        sample.velocity_mps = Some(0.0);
    }

    assert!(!detector.detect_pace_degradation(&samples, true).detected);
}

#[test]
fn test_cadence_drop_ignores_walking() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let mut samples = steady_samples(600, 0.0);
    for (i, sample) in samples.iter_mut().enumerate() {
        sample.cadence_spm = Some(match i {
            0..50 => 60.0,
            300.. => 162.0,
            _ => 180.0,
        });
    }

    let drop = detector.detect_cadence_drop(&samples, true);

    assert!(drop.detected);
    assert!(drop.grade_controlled);
    assert!((drop.baseline_cadence - 180.0).abs() < 1e-9);
    assert!((drop.lowest_cadence - 162.0).abs() < 1e-9);
    assert!((drop.drop_percent - 10.0).abs() < 1e-6);
}

#[test]
fn test_identify_climbs() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let samples = rolling_climbs();

    let climbs = detector.identify_climbs(&samples);

    assert_eq!(climbs.len(), 4);
    assert_eq!(climbs[0].start_index, 20);
    assert_eq!(climbs[0].end_index, 60);
    assert!((climbs[0].elevation_gain_m - 200.0).abs() < 1e-9);
    assert!((climbs[0].duration_seconds - 400.0).abs() < 1e-9);
    assert!((climbs[0].vam - 30.0).abs() < 1e-9);
    assert!((climbs[3].vam - 21.0).abs() < 1e-9);
}

#[test]
fn test_small_bumps_are_not_climbs() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let mut samples = steady_samples(200, 0.0);
    for (offset, sample) in samples[50..55].iter_mut().enumerate() {
        sample.elevation_meters = Some(5.0 * (offset + 1) as f64);
    }
    for sample in &mut samples[55..] {
        sample.elevation_meters = Some(25.0);
    }

    assert!(detector.identify_climbs(&samples).is_empty());
}

#[test]
fn test_vam_decline_across_climbs() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let samples = rolling_climbs();

    let vam = detector.detect_vam_decline(&samples);

    assert!(vam.detected);
    assert_eq!(vam.climbs_analyzed, 4);
    assert!((vam.early_vam - 30.0).abs() < 1e-9);
    assert!((vam.late_vam - 21.0).abs() < 1e-9);
    assert!((vam.decline_percent - 30.0).abs() < 1e-6);
    assert_eq!(vam.onset_index, 180);
}

#[test]
fn test_single_climb_cannot_decline() {
    let config = StressDetectionConfig::default();
    let detector = PhysiologicalStressDetector::new(&config);
    let mut samples = rolling_climbs();
    for sample in &mut samples[61..] {
        sample.elevation_meters = Some(200.0);
    }

    assert_eq!(detector.identify_climbs(&samples).len(), 1);
    assert!(!detector.detect_vam_decline(&samples).detected);
}
