// ABOUTME: Service layer orchestrating collaborators around the heat-stress engine
// ABOUTME: Fetches inputs, runs the pipeline, persists scores, and requests narratives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer

/// Per-activity heat analysis orchestration
pub mod heat_analysis;

pub use heat_analysis::{
    ActivityHeatRequest, HeatAnalysisOutcome, HeatAnalysisReport, HeatAnalysisService,
};
