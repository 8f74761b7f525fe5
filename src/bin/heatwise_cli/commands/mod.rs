// ABOUTME: Command modules for heatwise-cli
// ABOUTME: Activity analysis and configuration display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod analyze;
pub mod config;
