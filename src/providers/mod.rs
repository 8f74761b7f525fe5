// ABOUTME: Collaborator seams for weather history, activity streams, narratives, and score storage
// ABOUTME: Async traits consumed by the heat analysis service plus an in-memory score store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # External Collaborators
//!
//! The heat-stress engine is a pure in-process library. Everything that
//! touches the network or a database sits behind one of these traits:
//!
//! - [`WeatherHistoryProvider`]: hourly observations for a location and time range
//! - [`ActivityStreamStore`]: per-sample streams for an activity
//! - [`NarrativeGenerator`]: human-readable text from the structured analysis
//! - [`HeatScoreStore`]: persisted scores keyed by activity, used for history
//!
//! Implementations own their retry and caching policy; the service never retries.

/// Collaborator trait definitions and exchanged types
pub mod core;

/// `DashMap`-backed score store for tests and single-process use
pub mod memory;

pub use self::core::{
    ActivityStreamStore, ActivitySummary, HeatNarrative, HeatScoreStore, NarrativeGenerator,
    NarrativeRequest, StoredHeatScore, WeatherHistoryProvider,
};
pub use memory::InMemoryHeatScoreStore;
