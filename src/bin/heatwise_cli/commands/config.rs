// ABOUTME: Prints the effective heat analysis configuration as pretty JSON
// ABOUTME: Fails when HEATWISE_* overrides do not parse or do not validate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, Result};
use heatwise::intelligence::HeatAnalysisConfig;

pub fn run() -> Result<()> {
    let config =
        HeatAnalysisConfig::load().map_err(|e| anyhow!("Invalid heat analysis configuration: {e}"))?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
