// ABOUTME: Main library entry point for the Heatwise heat-stress analysis engine
// ABOUTME: Re-exports the core and intelligence crates and adds collaborators, services, logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Heatwise
//!
//! Quantifies how heat and humidity degraded performance during a completed
//! endurance activity. Raw activity streams and hourly weather go in; a
//! 0-100 heat impact score, severity tier, correlation evidence, risk zones,
//! and recommendations come out.
//!
//! ## Architecture
//!
//! - **`heatwise-core`**: errors, activity/weather models, constants
//! - **`heatwise-intelligence`**: configuration and the five-stage pipeline
//! - **providers**: async seams for weather, streams, narratives, and score storage
//! - **services**: orchestration of collaborators around the pipeline
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use heatwise::intelligence::heat::HeatStressAnalyzer;
//! use heatwise::models::{StreamArrays, StreamBundle, WeatherObservation};
//! use heatwise::errors::AppResult;
//!
//! fn score(arrays: StreamArrays, weather: &[WeatherObservation]) -> AppResult<u8> {
//!     let bundle = StreamBundle::from_parallel_streams(arrays)?;
//!     let analysis = HeatStressAnalyzer::default().analyze(&bundle, weather, 95.0, 0.0)?;
//!     Ok(analysis.score.overall_score)
//! }
//! ```

/// Unified error handling (`AppError`, `ErrorCode`, `AppResult`)
pub use heatwise_core::errors;

/// Activity stream and weather models
pub use heatwise_core::models;

/// Physical constants and unit conversions
pub use heatwise_core::constants;

/// Heat analysis configuration and pipeline
pub use heatwise_intelligence as intelligence;

/// Structured logging setup
pub mod logging;

/// External collaborator traits and the in-memory score store
pub mod providers;

/// Collaborator orchestration around the pipeline
pub mod services;
