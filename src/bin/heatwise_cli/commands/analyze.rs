// ABOUTME: Runs the heat-stress pipeline over JSON stream and weather files
// ABOUTME: Optionally compares the score against a JSON list of earlier scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, Result};
use heatwise::constants::units::SECONDS_PER_MINUTE;
use heatwise::intelligence::heat::{HeatImpactAnalysis, HeatStressAnalyzer, HistoricalComparison};
use heatwise::intelligence::HeatAnalysisConfig;
use heatwise::models::{StreamArrays, StreamBundle, WeatherObservation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub struct AnalyzeArgs {
    pub streams: PathBuf,
    pub weather: PathBuf,
    pub base_elevation: f64,
    pub duration_minutes: Option<f64>,
    pub history: Option<PathBuf>,
    pub compact: bool,
}

#[derive(Serialize)]
struct AnalyzeOutput {
    analysis: HeatImpactAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    historical_comparison: Option<HistoricalComparison>,
}

pub async fn run(args: &AnalyzeArgs) -> Result<()> {
    let arrays: StreamArrays = read_json(&args.streams).await?;
    let mut weather: Vec<WeatherObservation> = read_json(&args.weather).await?;
    weather.sort_by_key(|o| o.timestamp);

    let bundle = StreamBundle::from_parallel_streams(arrays)?;
    let duration_minutes = args
        .duration_minutes
        .unwrap_or_else(|| bundle.duration_seconds() / SECONDS_PER_MINUTE);

    let config =
        HeatAnalysisConfig::load().map_err(|e| anyhow!("Invalid heat analysis configuration: {e}"))?;
    let analyzer = HeatStressAnalyzer::new(config);
    let analysis = analyzer.analyze(&bundle, &weather, duration_minutes, args.base_elevation)?;

    let historical_comparison = match &args.history {
        Some(path) => {
            let prior: Vec<u8> = read_json(path).await?;
            Some(analyzer.compare_to_history(analysis.score.overall_score, &prior))
        }
        None => None,
    };

    info!(
        samples = bundle.len(),
        overall_score = analysis.score.overall_score,
        "Analysis finished"
    );

    let output = AnalyzeOutput {
        analysis,
        historical_comparison,
    };
    let json = if args.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{json}");
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| anyhow!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| anyhow!("Failed to parse {}: {e}", path.display()))
}
