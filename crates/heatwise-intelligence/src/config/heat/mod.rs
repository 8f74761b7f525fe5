// ABOUTME: Heat analysis configuration for the five-stage heat-stress pipeline
// ABOUTME: Orchestrates per-stage configs and provides unified validation and env loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Heat Analysis Configuration
//!
//! Every threshold used by the pipeline lives here so components stay pure
//! functions of (data, config).
//!
//! # Module Structure
//!
//! - `weather` - Lapse rates, heat-index applicability, feels-like offsets
//! - `stress` - Baseline windows and detection thresholds per signature
//! - `risk` - Heat-index risk bands, humidity strain, cooling climbs
//! - `correlation` - Spike detection, look-back window, confidence steps
//! - `scoring` - Sub-score scales, composite weights, severity bands

pub mod correlation;
pub mod error;
pub mod risk;
pub mod scoring;
pub mod stress;
pub mod weather;

pub use correlation::CorrelationConfig;
pub use error::ConfigError;
pub use risk::RiskClassificationConfig;
pub use scoring::{
    CompositeWeights, ImpactScoringConfig, PhysiologicalWeights, RecommendationThresholds,
};
pub use stress::{
    CadenceDropConfig, HrDriftConfig, PaceDegradationConfig, StressDetectionConfig,
    VamDeclineConfig,
};
pub use weather::WeatherInterpolationConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static HEAT_ANALYSIS_CONFIG: OnceLock<HeatAnalysisConfig> = OnceLock::new();

/// Main heat analysis configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeatAnalysisConfig {
    /// Weather interpolation and derived quantities
    pub weather: WeatherInterpolationConfig,
    /// Physiological stress detection
    pub stress: StressDetectionConfig,
    /// Environmental risk classification
    pub risk: RiskClassificationConfig,
    /// Environment/physiology correlation
    pub correlation: CorrelationConfig,
    /// Composite impact scoring
    pub scoring: ImpactScoringConfig,
}

impl HeatAnalysisConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        HEAT_ANALYSIS_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load heat analysis config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent threshold
    pub fn validate(&self) -> Result<(), ConfigError> {
        let risk = &self.risk;
        if !(risk.caution_heat_index < risk.extreme_caution_heat_index
            && risk.extreme_caution_heat_index < risk.danger_heat_index
            && risk.danger_heat_index < risk.extreme_danger_heat_index)
        {
            return Err(ConfigError::InvalidRange(
                "Heat index risk thresholds must be strictly ascending",
            ));
        }
        if risk.cooling_climb_continue_gain_m > risk.cooling_climb_start_gain_m {
            return Err(ConfigError::InvalidRange(
                "cooling climb continue gain must be <= start gain",
            ));
        }
        if risk.peak_window_minutes <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "peak_window_minutes must be positive",
            ));
        }

        let stress = &self.stress;
        if stress.max_window_samples == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_window_samples must be at least 1",
            ));
        }
        let fractions = [
            stress.window_fraction,
            stress.heart_rate.baseline_start_fraction,
            stress.heart_rate.baseline_end_fraction,
            stress.heart_rate.sustained_retention,
            stress.pace.baseline_end_fraction,
            stress.cadence.baseline_end_fraction,
            self.correlation.baseline_fraction,
        ];
        if fractions.iter().any(|f| !(0.0..=1.0).contains(f)) {
            return Err(ConfigError::ValueOutOfRange(
                "Window and baseline fractions must be within [0, 1]",
            ));
        }
        if stress.heart_rate.baseline_start_fraction >= stress.heart_rate.baseline_end_fraction {
            return Err(ConfigError::InvalidRange(
                "heart rate baseline start must be < baseline end",
            ));
        }
        if stress.vam.climb_continue_gain_m > stress.vam.climb_start_gain_m {
            return Err(ConfigError::InvalidRange(
                "climb continue gain must be <= start gain",
            ));
        }

        let scoring = &self.scoring;
        if !(scoring.moderate_threshold < scoring.high_threshold
            && scoring.high_threshold < scoring.extreme_threshold
            && scoring.extreme_threshold <= 100)
        {
            return Err(ConfigError::InvalidRange(
                "Severity thresholds must be strictly ascending and <= 100",
            ));
        }
        if scoring.reference_distance_km <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "reference_distance_km must be positive",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Risk bands
        Self::apply_env_var(
            "HEATWISE_RISK_CAUTION_HEAT_INDEX",
            &mut self.risk.caution_heat_index,
        )?;
        Self::apply_env_var(
            "HEATWISE_RISK_EXTREME_CAUTION_HEAT_INDEX",
            &mut self.risk.extreme_caution_heat_index,
        )?;
        Self::apply_env_var(
            "HEATWISE_RISK_DANGER_HEAT_INDEX",
            &mut self.risk.danger_heat_index,
        )?;
        Self::apply_env_var(
            "HEATWISE_RISK_EXTREME_DANGER_HEAT_INDEX",
            &mut self.risk.extreme_danger_heat_index,
        )?;
        Self::apply_env_var(
            "HEATWISE_HIGH_HUMIDITY_PERCENT",
            &mut self.risk.high_humidity_percent,
        )?;

        // Stress detection
        Self::apply_env_var("HEATWISE_MIN_SAMPLES", &mut self.stress.min_samples)?;
        Self::apply_env_var(
            "HEATWISE_HR_DRIFT_THRESHOLD_BPM",
            &mut self.stress.heart_rate.drift_threshold_bpm,
        )?;
        Self::apply_env_var(
            "HEATWISE_PACE_DEGRADATION_THRESHOLD",
            &mut self.stress.pace.degradation_threshold_percent,
        )?;
        Self::apply_env_var(
            "HEATWISE_VAM_DECLINE_THRESHOLD",
            &mut self.stress.vam.decline_threshold_percent,
        )?;
        Self::apply_env_var(
            "HEATWISE_CADENCE_DROP_THRESHOLD",
            &mut self.stress.cadence.drop_threshold_percent,
        )?;

        // Weather interpolation
        Self::apply_env_var(
            "HEATWISE_MAX_INTERPOLATION_GAP_HOURS",
            &mut self.weather.max_interpolation_gap_hours,
        )?;

        // Correlation
        Self::apply_env_var(
            "HEATWISE_CORRELATION_WINDOW_KM",
            &mut self.correlation.preceding_window_km,
        )?;
        Self::apply_env_var(
            "HEATWISE_SPIKE_COOLDOWN_SAMPLES",
            &mut self.correlation.spike_cooldown_samples,
        )?;

        // Scoring
        Self::apply_env_var(
            "HEATWISE_REFERENCE_DISTANCE_KM",
            &mut self.scoring.reference_distance_km,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config_is_valid() {
        assert!(HeatAnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_descending_risk_bands_rejected() {
        let mut config = HeatAnalysisConfig::default();
        config.risk.danger_heat_index = 30.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_override_applies() {
        env::set_var("HEATWISE_HR_DRIFT_THRESHOLD_BPM", "12.5");
        let config = HeatAnalysisConfig::load();
        env::remove_var("HEATWISE_HR_DRIFT_THRESHOLD_BPM");

        let config = config.unwrap();
        assert!((config.stress.heart_rate.drift_threshold_bpm - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    #[serial]
    fn test_unparseable_env_override_is_error() {
        env::set_var("HEATWISE_MIN_SAMPLES", "lots");
        let result = HeatAnalysisConfig::load();
        env::remove_var("HEATWISE_MIN_SAMPLES");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
