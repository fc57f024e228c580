// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

use super::error::WalkError;

/// Amplitudes of a walker on a ring of `n_positions` sites, each site
/// carrying a two-level coin.
///
/// The flat layout interleaves the coin components of a site: the amplitude
/// for position `p` and coin value `c` lives at index `2p + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeState {
    amplitudes: Vec<Complex<f64>>,
}

/// Allocates `len` zero amplitudes, reporting allocation failure as a
/// parameter error instead of aborting.
pub(crate) fn zeroed_amplitudes(len: usize) -> Result<Vec<Complex<f64>>, WalkError> {
    let mut amplitudes = Vec::new();
    amplitudes.try_reserve_exact(len).map_err(|err| {
        WalkError::invalid(format!("cannot allocate {} amplitudes: {}", len, err))
    })?;
    amplitudes.resize(len, Complex::zero());
    Ok(amplitudes)
}

impl AmplitudeState {
    /// Creates the localized start state: all amplitude on `start_pos`
    /// with coin value 0.
    pub fn localized(n_positions: usize, start_pos: usize) -> Result<Self, WalkError> {
        if n_positions == 0 {
            return Err(WalkError::invalid("a ring needs at least one position"));
        }
        if start_pos >= n_positions {
            return Err(WalkError::invalid(format!(
                "start position {} is outside the ring [0, {})",
                start_pos, n_positions
            )));
        }
        let len = n_positions
            .checked_mul(2)
            .ok_or_else(|| WalkError::invalid(format!("ring of {} positions is too large", n_positions)))?;
        let mut amplitudes = zeroed_amplitudes(len)?;
        amplitudes[Self::slot(start_pos, 0)] = Complex::new(1.0, 0.0);
        Ok(Self { amplitudes })
    }

    /// Wraps an existing amplitude vector. The length must be even and non-zero.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Result<Self, WalkError> {
        if amplitudes.is_empty() || amplitudes.len() % 2 != 0 {
            return Err(WalkError::invalid(format!(
                "amplitude vector of length {} does not describe whole positions",
                amplitudes.len()
            )));
        }
        Ok(Self { amplitudes })
    }

    /// Flat index of `(position, coin)`.
    #[inline]
    pub fn slot(position: usize, coin: usize) -> usize {
        (position << 1) + coin
    }

    /// Read-only view of the flat amplitude vector.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of ring positions.
    pub fn n_positions(&self) -> usize {
        self.amplitudes.len() / 2
    }

    /// The `(coin 0, coin 1)` amplitude pair at `position`.
    pub fn pair(&self, position: usize) -> (Complex<f64>, Complex<f64>) {
        (
            self.amplitudes[Self::slot(position, 0)],
            self.amplitudes[Self::slot(position, 1)],
        )
    }

    /// Sum of `|amplitude|^2` over every slot.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Probability of finding the walker at each position, coin traced out.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes
            .chunks_exact(2)
            .map(|pair| pair[0].norm_sqr() + pair[1].norm_sqr())
            .collect()
    }
}

impl fmt::Display for AmplitudeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amplitudes[")?;
        for (p, pair) in self.amplitudes.chunks_exact(2).enumerate() {
            write!(f, "{}{}:({:.4}, {:.4})", if p > 0 { ", " } else { "" }, p, pair[0], pair[1])?;
        }
        write!(f, "]")
    }
}
