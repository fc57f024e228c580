// src/simulation/mod.rs

//! Runs quantum walks. This module contains the `Simulator` entry point and
//! the internal `WalkEngine` that owns and evolves the amplitude state.

mod config;
pub(crate) mod engine;
mod results;

pub use config::SimulatorConfig;
pub use results::Distribution;

use tracing::debug;

use crate::coin::CoinOperator;
use crate::core::WalkError;
use crate::validation::check_distribution;
use crate::walk::WalkParams;
use engine::WalkEngine;

/// Runs walks under a fixed configuration.
///
/// A `Simulator` holds no walk state: every call to [`Simulator::run`] builds
/// its own coin operator and amplitude buffers, so one simulator can serve
/// any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Simulator with `config`, rejecting invalid tolerances.
    pub fn with_config(config: SimulatorConfig) -> Result<Self, WalkError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs the walk described by `params`.
    ///
    /// # Returns
    /// * `Ok(Distribution)` with one probability per ring position.
    /// * `Err(WalkError::MissingAngles)` for an angle-less `custom` coin under
    ///   the strict coin policy.
    /// * `Err(WalkError::Incoherence)` if total probability drifts beyond the
    ///   configured tolerance.
    pub fn run(&self, params: &WalkParams) -> Result<Distribution, WalkError> {
        let coin = CoinOperator::build_with_policy(params.coin(), params.angles(), self.config.coin_policy)?;
        self.run_with_coin(params, coin)
    }

    /// Runs the walk described by `params` with an explicit coin operator,
    /// ignoring the coin named in `params`.
    pub fn run_with_coin(&self, params: &WalkParams, coin: CoinOperator) -> Result<Distribution, WalkError> {
        debug!(
            target: "qwalk::simulation",
            positions = params.n_positions(),
            steps = params.steps(),
            start = params.start_pos(),
            coin = %coin,
            "starting walk"
        );

        let mut engine = WalkEngine::init(params, coin, self.config.amplitude_cutoff)?;
        let per_step = self.config.validate_steps.then_some(self.config.norm_tolerance);
        engine.run(params.steps(), per_step)?;

        let dist = Distribution::new(engine.probabilities());
        check_distribution(&dist, Some(self.config.norm_tolerance))?;

        debug!(
            target: "qwalk::simulation",
            steps = engine.steps_taken(),
            total = dist.total(),
            "walk finished"
        );
        Ok(dist)
    }
}
