// src/walk/mod.rs

//! Validated walk parameters and a builder for them.
//!
//! `WalkParams` can only be obtained through validation, so the engine never
//! sees an empty ring or a start position off the ring.

use num_complex::Complex;
use std::fmt;

use crate::coin::CoinType;
use crate::core::WalkError;

/// Everything that defines one walk: ring size, number of steps, the coin and
/// where the walker starts.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkParams {
    n_positions: usize,
    steps: usize,
    coin: CoinType,
    angles: Vec<f64>,
    start_pos: usize,
}

impl WalkParams {
    /// Validates parameters as they arrive from a caller with signed integers.
    ///
    /// Negative values are rejected here; ring bounds are checked by
    /// [`WalkBuilder::build`]. Nothing is clamped.
    pub fn from_signed(
        n_positions: i64,
        steps: i64,
        coin: CoinType,
        angles: Option<&[f64]>,
        start_pos: i64,
    ) -> Result<Self, WalkError> {
        let to_usize = |value: i64, name: &str| {
            if value < 0 {
                return Err(WalkError::invalid(format!("{} must be non-negative, got {}", name, value)));
            }
            usize::try_from(value)
                .map_err(|_| WalkError::invalid(format!("{} {} does not fit this platform", name, value)))
        };
        WalkBuilder::new(to_usize(n_positions, "n_positions")?)
            .steps(to_usize(steps, "steps")?)
            .coin(coin)
            .angles(angles.unwrap_or(&[]).iter().copied())
            .start_pos(to_usize(start_pos, "start_pos")?)
            .build()
    }

    /// Number of ring positions.
    pub fn n_positions(&self) -> usize {
        self.n_positions
    }

    /// Number of coin-then-shift steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The coin driving the walk.
    pub fn coin(&self) -> CoinType {
        self.coin
    }

    /// Coin angles, `None` when none were given.
    pub fn angles(&self) -> Option<&[f64]> {
        if self.angles.is_empty() { None } else { Some(self.angles.as_slice()) }
    }

    /// Position holding all amplitude (coin value 0) before the first step.
    pub fn start_pos(&self) -> usize {
        self.start_pos
    }
}

impl fmt::Display for WalkParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "qwalk::Walk[{} positions, {} steps, coin {}",
            self.n_positions, self.steps, self.coin
        )?;
        if !self.angles.is_empty() {
            write!(f, " {:?}", self.angles)?;
        }
        write!(f, ", start {}]", self.start_pos)
    }
}

//-------------------------------------------------------------------------
// Walk Builder
//-------------------------------------------------------------------------

/// Constructs `WalkParams` by method chaining. Defaults: zero steps, the
/// Hadamard coin, no angles, start at position 0.
#[derive(Debug, Clone)]
pub struct WalkBuilder {
    n_positions: usize,
    steps: usize,
    coin: CoinType,
    angles: Vec<f64>,
    start_pos: usize,
}

impl WalkBuilder {
    /// Starts a walk on a ring of `n_positions` sites.
    pub fn new(n_positions: usize) -> Self {
        Self {
            n_positions,
            steps: 0,
            coin: CoinType::default(),
            angles: Vec::new(),
            start_pos: 0,
        }
    }

    /// Sets the number of steps.
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the coin.
    pub fn coin(mut self, coin: CoinType) -> Self {
        self.coin = coin;
        self
    }

    /// Replaces the coin angles.
    pub fn angles<I>(mut self, angles: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.angles = angles.into_iter().collect();
        self
    }

    /// Sets the start position.
    pub fn start_pos(mut self, start_pos: usize) -> Self {
        self.start_pos = start_pos;
        self
    }

    /// Validates and returns the parameters.
    pub fn build(self) -> Result<WalkParams, WalkError> {
        if self.n_positions == 0 {
            return Err(WalkError::invalid("n_positions must be at least 1, got 0"));
        }
        if self.start_pos >= self.n_positions {
            return Err(WalkError::invalid(format!(
                "start_pos {} is outside the ring [0, {})",
                self.start_pos, self.n_positions
            )));
        }
        // Two buffers of 2n amplitudes each must be addressable.
        let buffer_bytes = self
            .n_positions
            .checked_mul(2)
            .and_then(|slots| slots.checked_mul(size_of::<Complex<f64>>()))
            .filter(|bytes| *bytes <= isize::MAX as usize);
        if buffer_bytes.is_none() {
            return Err(WalkError::invalid(format!(
                "n_positions {} overflows the amplitude vector",
                self.n_positions
            )));
        }
        Ok(WalkParams {
            n_positions: self.n_positions,
            steps: self.steps,
            coin: self.coin,
            angles: self.angles,
            start_pos: self.start_pos,
        })
    }
}
