// src/coin/mod.rs

//! Coin operators: the 2x2 unitary mixing the two coin components of every
//! ring position before each shift.
//!
//! Three coins are known by tag:
//! - `hadamard`: `[[1, 1], [1, -1]] / √2`, the default.
//! - `biased`: a real rotation `Ry(θ)` with `θ` taken from the first angle
//!   (π/6 when none are given).
//! - `custom`: `Rz`-style phase after rotation, `Cz(φ) · Cy(θ)`, from
//!   `[θ, φ]` (`φ` defaults to 0).
//!
//! How unknown tags and a `custom` coin without angles are handled depends on
//! the [`CoinPolicy`].

use num_complex::Complex;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use tracing::warn;

use crate::core::{DEFAULT_BIASED_THETA, WalkError};

/// The coins a walk can be driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinType {
    /// The balanced Hadamard coin.
    #[default]
    Hadamard,
    /// A real rotation by a single angle.
    Biased,
    /// Rotation followed by a relative phase on coin value 1.
    Custom,
}

impl CoinType {
    /// Wire tag of this coin.
    pub fn tag(&self) -> &'static str {
        match self {
            CoinType::Hadamard => "hadamard",
            CoinType::Biased => "biased",
            CoinType::Custom => "custom",
        }
    }

    /// Resolves a tag, returning `None` for anything unknown. Matching is exact.
    pub fn lookup(tag: &str) -> Option<CoinType> {
        match tag {
            "hadamard" => Some(CoinType::Hadamard),
            "biased" => Some(CoinType::Biased),
            "custom" => Some(CoinType::Custom),
            _ => None,
        }
    }

    /// Resolves a tag, silently treating unknown tags as `hadamard`.
    pub fn from_tag(tag: &str) -> CoinType {
        Self::lookup(tag).unwrap_or_else(|| {
            warn!(target: "qwalk::coin", tag, "unrecognized coin type, falling back to hadamard");
            CoinType::Hadamard
        })
    }

    /// Resolves a tag, rejecting unknown tags.
    pub fn parse_strict(tag: &str) -> Result<CoinType, WalkError> {
        Self::lookup(tag).ok_or_else(|| WalkError::UnrecognizedCoin { tag: tag.to_string() })
    }

    /// Resolves a tag according to `policy`.
    pub fn resolve(tag: &str, policy: CoinPolicy) -> Result<CoinType, WalkError> {
        match policy {
            CoinPolicy::Lenient => Ok(Self::from_tag(tag)),
            CoinPolicy::Strict => Self::parse_strict(tag),
        }
    }
}

impl fmt::Display for CoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How malformed coin requests are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinPolicy {
    /// Unknown tags and an angle-less `custom` coin become `hadamard`.
    #[default]
    Lenient,
    /// Unknown tags and an angle-less `custom` coin are errors.
    Strict,
}

/// A fixed 2x2 complex matrix acting on a position's `(coin 0, coin 1)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinOperator {
    matrix: [[Complex<f64>; 2]; 2],
}

impl CoinOperator {
    /// Wraps an explicit matrix. No unitarity check is made here;
    /// see [`crate::validation::check_unitary`].
    pub fn from_matrix(matrix: [[Complex<f64>; 2]; 2]) -> Self {
        Self { matrix }
    }

    /// `[[1, 1], [1, -1]] / √2`
    pub fn hadamard() -> Self {
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        Self::from_matrix([[h, h], [h, -h]])
    }

    /// `[[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]`
    pub fn rotation_y(theta: f64) -> Self {
        let (sin_a, cos_a) = (theta / 2.0).sin_cos();
        Self::from_matrix([
            [Complex::new(cos_a, 0.0), Complex::new(-sin_a, 0.0)],
            [Complex::new(sin_a, 0.0), Complex::new(cos_a, 0.0)],
        ])
    }

    /// `diag(1, e^{iφ})`
    pub fn phase(phi: f64) -> Self {
        Self::from_matrix([
            [Complex::one(), Complex::zero()],
            [Complex::zero(), Complex::from_polar(1.0, phi)],
        ])
    }

    /// Builds the operator for `coin`, falling back to `hadamard` when a
    /// `custom` coin arrives without angles.
    pub fn build(coin: CoinType, angles: Option<&[f64]>) -> Self {
        let angles = angles.unwrap_or(&[]);
        match coin {
            CoinType::Hadamard => Self::hadamard(),
            CoinType::Biased => {
                Self::rotation_y(angles.first().copied().unwrap_or(DEFAULT_BIASED_THETA))
            }
            CoinType::Custom => match angles {
                [] => {
                    warn!(target: "qwalk::coin", "custom coin without angles, falling back to hadamard");
                    Self::hadamard()
                }
                [theta, rest @ ..] => {
                    let phi = rest.first().copied().unwrap_or(0.0);
                    Self::phase(phi).product(&Self::rotation_y(*theta))
                }
            },
        }
    }

    /// Like [`CoinOperator::build`], but under [`CoinPolicy::Strict`] a
    /// `custom` coin without angles is an error.
    pub fn build_with_policy(
        coin: CoinType,
        angles: Option<&[f64]>,
        policy: CoinPolicy,
    ) -> Result<Self, WalkError> {
        let has_angles = angles.is_some_and(|a| !a.is_empty());
        if policy == CoinPolicy::Strict && coin == CoinType::Custom && !has_angles {
            return Err(WalkError::MissingAngles { coin: coin.tag().to_string() });
        }
        Ok(Self::build(coin, angles))
    }

    /// Resolves `tag` and builds the operator, both under `policy`.
    pub fn from_tag(tag: &str, angles: Option<&[f64]>, policy: CoinPolicy) -> Result<Self, WalkError> {
        let coin = CoinType::resolve(tag, policy)?;
        Self::build_with_policy(coin, angles, policy)
    }

    /// The raw matrix, row-major.
    pub fn matrix(&self) -> &[[Complex<f64>; 2]; 2] {
        &self.matrix
    }

    /// Matrix product `self · rhs`: `rhs` acts first.
    pub fn product(&self, rhs: &CoinOperator) -> CoinOperator {
        let (a, b) = (&self.matrix, &rhs.matrix);
        let mut out = [[Complex::zero(); 2]; 2];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j];
            }
        }
        CoinOperator::from_matrix(out)
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> CoinOperator {
        let m = &self.matrix;
        CoinOperator::from_matrix([
            [m[0][0].conj(), m[1][0].conj()],
            [m[0][1].conj(), m[1][1].conj()],
        ])
    }

    /// Mixes one position's coin pair: `(b0, b1) = C · (a0, a1)`.
    #[inline]
    pub fn apply(&self, a0: Complex<f64>, a1: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
        let m = &self.matrix;
        (m[0][0] * a0 + m[0][1] * a1, m[1][0] * a0 + m[1][1] * a1)
    }

    /// True when `C† C` is the identity within `tolerance` per entry.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let gram = self.adjoint().product(self);
        gram.matrix.iter().enumerate().all(|(i, row)| {
            row.iter().enumerate().all(|(j, cell)| {
                let expected = if i == j { Complex::one() } else { Complex::zero() };
                (*cell - expected).norm() <= tolerance
            })
        })
    }
}

impl Default for CoinOperator {
    fn default() -> Self {
        Self::hadamard()
    }
}

impl fmt::Display for CoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.matrix;
        write!(
            f,
            "[[{:.4}, {:.4}], [{:.4}, {:.4}]]",
            m[0][0], m[0][1], m[1][0], m[1][1]
        )
    }
}
