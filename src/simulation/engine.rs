// src/simulation/engine.rs
use num_complex::Complex;
use num_traits::Zero;
use tracing::trace;

use crate::coin::CoinOperator;
use crate::core::state::zeroed_amplitudes;
use crate::core::{AmplitudeState, WalkError};
use crate::validation::check_normalization;
use crate::walk::WalkParams;

/// Evolves the amplitude state of one walk.
/// (Internal visibility)
///
/// Two buffers alternate within each step: the coin reads `state` and writes
/// `scratch`, the shift reads `scratch` and writes `state` back. Neither
/// half-step ever reads a slot it has already overwritten.
pub(crate) struct WalkEngine {
    coin: CoinOperator,
    state: AmplitudeState,
    scratch: Vec<Complex<f64>>,
    /// Squared magnitude below which an amplitude is not carried by the shift.
    cutoff_sqr: f64,
    steps_taken: usize,
}

impl WalkEngine {
    /// Prepares the localized start state for `params`.
    pub(crate) fn init(
        params: &WalkParams,
        coin: CoinOperator,
        amplitude_cutoff: f64,
    ) -> Result<Self, WalkError> {
        let state = AmplitudeState::localized(params.n_positions(), params.start_pos())?;
        let scratch = zeroed_amplitudes(state.vector().len())?;
        Ok(Self {
            coin,
            state,
            scratch,
            cutoff_sqr: amplitude_cutoff * amplitude_cutoff,
            steps_taken: 0,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: AmplitudeState) -> Result<(), WalkError> {
        if state.vector().len() != self.scratch.len() {
            return Err(WalkError::invalid(format!(
                "Cannot set state: provided dimension {} does not match engine dimension {}",
                state.vector().len(),
                self.scratch.len()
            )));
        }
        self.state = state;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn get_state(&self) -> &AmplitudeState {
        &self.state
    }

    pub(crate) fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Runs `steps` coin-then-shift steps. With `norm_tolerance` set, the
    /// total probability is checked after every step.
    pub(crate) fn run(&mut self, steps: usize, norm_tolerance: Option<f64>) -> Result<(), WalkError> {
        for _ in 0..steps {
            self.step();
            if let Some(tolerance) = norm_tolerance {
                check_normalization(&self.state, Some(tolerance)).map_err(|err| match err {
                    WalkError::Incoherence { message } => WalkError::Incoherence {
                        message: format!("after step {}: {}", self.steps_taken, message),
                    },
                    other => other,
                })?;
            }
        }
        Ok(())
    }

    /// One full step: local coin on every position, then the conditional shift.
    pub(crate) fn step(&mut self) {
        self.apply_coin();
        self.apply_shift();
        self.steps_taken += 1;
        trace!(
            target: "qwalk::simulation",
            step = self.steps_taken,
            norm = self.state.norm_sqr(),
            "walk step complete"
        );
    }

    /// Mixes each position's `(coin 0, coin 1)` pair; amplitude never leaves
    /// its position here.
    fn apply_coin(&mut self) {
        let coin = &self.coin;
        for (src, dst) in self
            .state
            .vector()
            .chunks_exact(2)
            .zip(self.scratch.chunks_exact_mut(2))
        {
            let (b0, b1) = coin.apply(src[0], src[1]);
            dst[0] = b0;
            dst[1] = b1;
        }
    }

    /// Coin value 0 moves one position left, coin value 1 one position right,
    /// both wrapping around the ring. The coin value itself is kept.
    fn apply_shift(&mut self) {
        let n = self.state.n_positions();
        let cutoff_sqr = self.cutoff_sqr;
        let out = self.state.vector_mut();
        out.fill(Complex::zero());
        for pos in 0..n {
            for coin in 0..2 {
                let amp = self.scratch[AmplitudeState::slot(pos, coin)];
                if amp.norm_sqr() < cutoff_sqr {
                    continue;
                }
                let new_pos = if coin == 0 { (pos + n - 1) % n } else { (pos + 1) % n };
                out[AmplitudeState::slot(new_pos, coin)] += amp;
            }
        }
    }

    /// Probability per position of the current state.
    pub(crate) fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }
}
