// ABOUTME: Core types and constants for Heatwise heat-stress analysis
// ABOUTME: Foundation crate with error handling, activity/weather models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Heatwise Core
//!
//! Foundation crate providing shared types and constants for the Heatwise
//! heat-stress analysis engine. It changes rarely so the intelligence crate
//! and the service crate can compile incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: Weather observations, activity streams, and adjusted weather points
//! - **constants**: Heat physiology constants (lapse rates, Magnus coefficients, Rothfusz terms)

/// Unified error handling system with standard error codes
pub mod errors;

/// Activity stream and weather data models
pub mod models;

/// Physical and physiological constants organized by domain
pub mod constants;
