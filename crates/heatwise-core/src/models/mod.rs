// ABOUTME: Data models for activity streams and weather observations
// ABOUTME: Re-exports stream and weather types used by every pipeline stage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Per-sample activity streams
pub mod stream;
/// Hourly weather observations and per-sample adjusted weather
pub mod weather;

pub use stream::{StreamArrays, StreamBundle, StreamSample};
pub use weather::{AdjustedWeatherPoint, WeatherObservation};
