// ABOUTME: Heat-stress analysis engine for completed endurance activities
// ABOUTME: Configuration plus the five-stage weather-to-score pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Heatwise Intelligence
//!
//! Quantifies how heat and humidity degraded an athlete's performance during
//! one activity. Every component is a pure, synchronous function of its
//! inputs and [`config::HeatAnalysisConfig`]; parallelism happens only across
//! activities via [`heat::HeatStressAnalyzer::analyze_batch`].

/// Validated, environment-overridable thresholds
pub mod config;

/// The heat-stress pipeline
pub mod heat;

pub use config::HeatAnalysisConfig;
pub use heat::{HeatImpactAnalysis, HeatStressAnalyzer};
