// ABOUTME: Integration tests for composite heat impact scoring
// ABOUTME: Sub-score bounds, severity bands, distance normalization, percentiles, recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::init_test_logging;
use heatwise::intelligence::config::heat::ImpactScoringConfig;
use heatwise::intelligence::heat::{
    CadenceDropSignature, CoolingBenefit, EnvironmentalRisk, HeatImpactScore, HrDriftSignature,
    HumidityStrain, ImpactScorer, PaceDegradationSignature, PhysiologicalStress, ScoreComponents,
    SeverityLevel, TimeInZone, VamDeclineSignature,
};

fn extreme_stress() -> PhysiologicalStress {
    PhysiologicalStress {
        hr_drift: HrDriftSignature {
            detected: true,
            drift_bpm: 60.0,
            sustained: true,
            ..HrDriftSignature::default()
        },
        pace_degradation: PaceDegradationSignature {
            detected: true,
            degradation_percent: 90.0,
            grade_controlled: true,
            ..PaceDegradationSignature::default()
        },
        vam_decline: VamDeclineSignature {
            detected: true,
            decline_percent: 95.0,
            ..VamDeclineSignature::default()
        },
        cadence_drop: CadenceDropSignature {
            detected: true,
            drop_percent: 50.0,
            ..CadenceDropSignature::default()
        },
        overall_stress_detected: true,
    }
}

fn all_danger(seconds: f64) -> TimeInZone {
    TimeInZone {
        danger_seconds: seconds,
        ..TimeInZone::default()
    }
}

#[test]
fn test_sub_scores_are_bounded() {
    init_test_logging();
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);

    let physiological = scorer.physiological_score(&extreme_stress());
    assert!((0.0..=100.0).contains(&physiological));

    assert!((scorer.heat_stress_score(&all_danger(3600.0)) - 100.0).abs() < 1e-9);
    assert!(scorer.heat_stress_score(&TimeInZone::default()).abs() < 1e-9);

    let humid = HumidityStrain {
        high_humidity_seconds: 3600.0,
        high_humidity_fraction: 1.0,
        peak_humidity_percent: 99.0,
        peak_humidity_km: 3.0,
    };
    assert!((scorer.humidity_score(&humid) - 100.0).abs() < 1e-9);

    let cooling = CoolingBenefit {
        segments: Vec::new(),
        total_cooling_seconds: 7200.0,
        significant_segments: 12,
    };
    assert!((scorer.cooling_score(&cooling, 3600.0) - 100.0).abs() < 1e-9);
    assert!((scorer.cooling_score(&cooling, 0.0) - 100.0).abs() < 1e-9);
}

#[test]
fn test_undetected_signatures_score_zero() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);
    let mut stress = extreme_stress();
    stress.hr_drift.detected = false;
    stress.pace_degradation.detected = false;
    stress.vam_decline.detected = false;
    stress.cadence_drop.detected = false;

    assert!(scorer.physiological_score(&stress).abs() < 1e-9);
}

#[test]
fn test_physiological_weighting() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);
    let stress = PhysiologicalStress {
        hr_drift: HrDriftSignature {
            detected: true,
            drift_bpm: 15.0,
            sustained: true,
            ..HrDriftSignature::default()
        },
        pace_degradation: PaceDegradationSignature {
            detected: true,
            degradation_percent: 20.0,
            grade_controlled: true,
            ..PaceDegradationSignature::default()
        },
        overall_stress_detected: true,
        ..PhysiologicalStress::default()
    };

    // HR 75 x 1.2 x 0.25 + pace 40 x 1.2 x 0.25
    assert!((scorer.physiological_score(&stress) - 34.5).abs() < 1e-9);
}

#[test]
fn test_heat_stress_blends_danger_and_caution() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);
    let time = TimeInZone {
        safe_seconds: 3000.0,
        caution_seconds: 900.0,
        extreme_caution_seconds: 300.0,
        danger_seconds: 0.0,
        extreme_danger_seconds: 0.0,
    };

    // 1200 of 4200 s in the caution bands, weighted 2x
    assert!((scorer.heat_stress_score(&time) - 57.142_857_142_857_14).abs() < 1e-6);
}

#[test]
fn test_composite_is_bounded_and_never_negative() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);

    let maxed = ScoreComponents {
        heat_stress: 100.0,
        physiological_stress: 100.0,
        humidity_strain: 100.0,
        cooling_benefit: 0.0,
    };
    assert_eq!(scorer.composite(&maxed), 100);

    let cooled = ScoreComponents {
        cooling_benefit: 100.0,
        ..ScoreComponents::default()
    };
    assert_eq!(scorer.composite(&cooled), 0);

    let mixed = ScoreComponents {
        heat_stress: 100.0,
        physiological_stress: 34.5,
        humidity_strain: 100.0,
        cooling_benefit: 0.0,
    };
    assert_eq!(scorer.composite(&mixed), 74);
}

#[test]
fn test_severity_bands() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);

    assert_eq!(scorer.severity_for(0), SeverityLevel::Low);
    assert_eq!(scorer.severity_for(24), SeverityLevel::Low);
    assert_eq!(scorer.severity_for(25), SeverityLevel::Moderate);
    assert_eq!(scorer.severity_for(49), SeverityLevel::Moderate);
    assert_eq!(scorer.severity_for(50), SeverityLevel::High);
    assert_eq!(scorer.severity_for(74), SeverityLevel::High);
    assert_eq!(scorer.severity_for(75), SeverityLevel::Extreme);
    assert_eq!(scorer.severity_for(100), SeverityLevel::Extreme);

    let mut previous = SeverityLevel::Low;
    for score in 0..=100 {
        let severity = scorer.severity_for(score);
        assert!(severity >= previous);
        previous = severity;
    }
}

#[test]
fn test_score_agrees_with_severity() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);
    let risk = EnvironmentalRisk {
        time_in_zones: all_danger(3600.0),
        ..EnvironmentalRisk::default()
    };

    let score = scorer.score(&extreme_stress(), &risk);

    assert!(score.overall_score <= 100);
    assert_eq!(score.severity, scorer.severity_for(score.overall_score));
    assert_eq!(score.severity, SeverityLevel::Extreme);
}

#[test]
fn test_distance_normalization() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);

    assert!((scorer.normalize_for_distance(50.0, 50.0) - 50.0).abs() < 1e-9);
    assert!((scorer.normalize_for_distance(50.0, 200.0) - 25.0).abs() < 1e-9);
    assert!((scorer.normalize_for_distance(40.0, 12.5) - 80.0).abs() < 1e-9);
    assert!((scorer.normalize_for_distance(50.0, 0.0) - 50.0).abs() < 1e-9);
    assert!((scorer.normalize_for_distance(50.0, -3.0) - 50.0).abs() < 1e-9);
}

#[test]
fn test_historical_percentile() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);
    let history = [10, 20, 30, 40];

    let top = scorer.compare_to_history(45, &history);
    assert!((top.percentile - 100.0).abs() < 1e-9);
    assert_eq!(top.sample_size, 4);
    assert_eq!(top.interpretation, "Among your most heat-challenging activities");

    let middle = scorer.compare_to_history(25, &history);
    assert!((middle.percentile - 50.0).abs() < 1e-9);
    assert_eq!(middle.interpretation, "Above average heat impact for you");

    let low = scorer.compare_to_history(15, &history);
    assert!((low.percentile - 25.0).abs() < 1e-9);
    assert_eq!(low.interpretation, "Below average heat impact for you");

    let bottom = scorer.compare_to_history(5, &history);
    assert!(bottom.percentile.abs() < 1e-9);
    assert_eq!(bottom.interpretation, "Minimal heat impact compared to your history");
}

#[test]
fn test_ties_are_not_counted_below() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);

    let comparison = scorer.compare_to_history(30, &[30, 30, 30]);

    assert!(comparison.percentile.abs() < 1e-9);
}

#[test]
fn test_empty_history_is_neutral() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);

    let comparison = scorer.compare_to_history(80, &[]);

    assert!((comparison.percentile - 50.0).abs() < 1e-9);
    assert_eq!(comparison.sample_size, 0);
    assert!(comparison.interpretation.contains("No prior heat scores"));
}

#[test]
fn test_recommendations_never_empty() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);

    for overall in [0_u8, 30, 60, 90] {
        let severity = scorer.severity_for(overall);
        for humidity in [0.0, 80.0] {
            let score = HeatImpactScore {
                overall_score: overall,
                severity,
                components: ScoreComponents {
                    humidity_strain: humidity,
                    ..ScoreComponents::default()
                },
            };
            let advice = scorer.recommendations(&score);
            assert!(!advice.is_empty());
            assert!(advice.iter().all(|a| !a.is_empty()));
        }
    }
}

#[test]
fn test_recommendations_follow_severity() {
    let config = ImpactScoringConfig::default();
    let scorer = ImpactScorer::new(&config);
    let risk = EnvironmentalRisk {
        time_in_zones: all_danger(3600.0),
        humidity_strain: HumidityStrain {
            high_humidity_fraction: 0.9,
            peak_humidity_percent: 92.0,
            ..HumidityStrain::default()
        },
        ..EnvironmentalRisk::default()
    };

    let score = scorer.score(&extreme_stress(), &risk);
    let advice = scorer.recommendations(&score);

    assert!(advice[0].starts_with("Heat impact was extreme"));
    assert!(advice.iter().any(|a| a.contains("hydration")));
}
