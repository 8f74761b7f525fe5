// ABOUTME: Configuration module for heatwise-intelligence crate
// ABOUTME: Re-exports heat analysis configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Heat analysis configuration (thresholds, windows, weights)
pub mod heat;

pub use heat::HeatAnalysisConfig;
