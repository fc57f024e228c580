// src/simulation/config.rs

use serde::{Deserialize, Serialize};

use crate::coin::CoinPolicy;
use crate::core::{AMPLITUDE_CUTOFF, NORM_TOLERANCE, WalkError};

/// Knobs of a [`super::Simulator`]. Every field has a default, so a JSON
/// document only needs to name the ones it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Treatment of unknown coin tags and angle-less `custom` coins.
    pub coin_policy: CoinPolicy,
    /// Amplitudes below this magnitude are dropped during the shift.
    /// `0.0` carries every amplitude.
    pub amplitude_cutoff: f64,
    /// Allowed deviation of the total probability from 1.
    pub norm_tolerance: f64,
    /// Check normalization after every step, not only at the end.
    pub validate_steps: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            coin_policy: CoinPolicy::Lenient,
            amplitude_cutoff: AMPLITUDE_CUTOFF,
            norm_tolerance: NORM_TOLERANCE,
            validate_steps: false,
        }
    }
}

impl SimulatorConfig {
    /// Parses a config from JSON and checks its values.
    pub fn from_json(json: &str) -> Result<Self, WalkError> {
        let config: SimulatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects negative or non-finite tolerances.
    pub fn validate(&self) -> Result<(), WalkError> {
        if !(self.amplitude_cutoff.is_finite() && self.amplitude_cutoff >= 0.0) {
            return Err(WalkError::invalid(format!(
                "amplitude_cutoff must be a finite non-negative number, got {}",
                self.amplitude_cutoff
            )));
        }
        if !(self.norm_tolerance.is_finite() && self.norm_tolerance > 0.0) {
            return Err(WalkError::invalid(format!(
                "norm_tolerance must be a finite positive number, got {}",
                self.norm_tolerance
            )));
        }
        Ok(())
    }

    /// Returns the config with a different coin policy.
    pub fn with_coin_policy(mut self, coin_policy: CoinPolicy) -> Self {
        self.coin_policy = coin_policy;
        self
    }

    /// Returns the config with a different amplitude cutoff.
    pub fn with_amplitude_cutoff(mut self, amplitude_cutoff: f64) -> Self {
        self.amplitude_cutoff = amplitude_cutoff;
        self
    }

    /// Returns the config with per-step validation switched on or off.
    pub fn with_step_validation(mut self, validate_steps: bool) -> Self {
        self.validate_steps = validate_steps;
        self
    }
}
