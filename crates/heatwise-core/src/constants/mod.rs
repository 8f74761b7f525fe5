// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Physical constants for atmosphere, humidity, and heat-index modeling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Physical constants that are not tunable. Tunable thresholds (drift
//! limits, risk bands, score weights) live in the intelligence crate's
//! `HeatAnalysisConfig` instead.

/// Atmospheric and thermodynamic constants
pub mod atmosphere;

/// Unit conversion constants
pub mod units;
