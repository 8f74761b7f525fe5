// ABOUTME: Deterministic recommendation rule table keyed on severity and sub-score thresholds
// ABOUTME: Rules fire in priority order; a fallback guarantees at least one recommendation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::impact_scorer::{HeatImpactScore, SeverityLevel};
use crate::config::heat::RecommendationThresholds;

type Predicate = fn(&HeatImpactScore, &RecommendationThresholds) -> bool;

struct Rule {
    applies: Predicate,
    advice: &'static str,
}

const FALLBACK: &str =
    "Conditions had little measurable effect on this activity; keep your usual hydration routine";

const RULES: &[Rule] = &[
    Rule {
        applies: |s, _| s.severity == SeverityLevel::Extreme,
        advice: "Heat impact was extreme: plan extended recovery and rehydrate with electrolytes \
                 before the next hard session",
    },
    Rule {
        applies: |s, _| s.severity == SeverityLevel::Extreme,
        advice: "Avoid racing or high-intensity efforts in comparable conditions until heat \
                 acclimatized",
    },
    Rule {
        applies: |s, _| s.severity == SeverityLevel::High,
        advice: "Heat impact was high: lower target intensity by 10-15% in similar conditions",
    },
    Rule {
        applies: |s, _| s.severity >= SeverityLevel::High,
        advice: "Start in the coolest part of the day when the forecast looks like this",
    },
    Rule {
        applies: |s, _| s.severity == SeverityLevel::Moderate,
        advice: "Carry extra fluids and watch for heart rate drift in similar conditions",
    },
    Rule {
        applies: |s, t| s.components.humidity_strain > t.humidity_advice,
        advice: "Pace your hydration ahead of thirst; sweat evaporates poorly in humid air",
    },
    Rule {
        applies: |s, t| s.components.cooling_benefit > t.cooling_advice,
        advice: "Leverage elevation: higher terrain offered measurable cooling on this route",
    },
    Rule {
        applies: |s, t| s.components.physiological_stress > t.physiological_advice,
        advice: "Physiological strain rose markedly; start the first third more conservatively",
    },
    Rule {
        applies: |s, t| s.components.heat_stress > t.heat_advice,
        advice: "Build heat acclimatization with 10-14 days of short sessions in warm conditions",
    },
];

/// Advice for a score in rule-table order; never empty
#[must_use]
pub fn recommend(score: &HeatImpactScore, thresholds: &RecommendationThresholds) -> Vec<String> {
    let mut advice: Vec<String> = RULES
        .iter()
        .filter(|rule| (rule.applies)(score, thresholds))
        .map(|rule| rule.advice.to_owned())
        .collect();
    if advice.is_empty() {
        advice.push(FALLBACK.to_owned());
    }
    advice
}
