// src/validation/mod.rs

//! Checks on amplitude states, distributions and coin operators.

use crate::coin::CoinOperator;
use crate::core::{AmplitudeState, NORM_TOLERANCE, WalkError};
use crate::simulation::Distribution;

/// Checks that the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `AmplitudeState` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(WalkError::Incoherence)` otherwise.
pub fn check_normalization(state: &AmplitudeState, tolerance: Option<f64>) -> Result<(), WalkError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(WalkError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that every probability is finite and non-negative and that they sum to 1.
pub fn check_distribution(dist: &Distribution, tolerance: Option<f64>) -> Result<(), WalkError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    if let Some((i, p)) = dist
        .probabilities()
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        return Err(WalkError::Incoherence {
            message: format!("Probability at position {} is not a valid weight: {}", i, p),
        });
    }
    let total = dist.total();
    if (total - 1.0).abs() > effective_tolerance {
        return Err(WalkError::Incoherence {
            message: format!(
                "Distribution sums to {} (Deviation > {})",
                total, effective_tolerance
            ),
        });
    }
    Ok(())
}

/// Checks `C† C ≈ I` for a coin operator.
pub fn check_unitary(coin: &CoinOperator, tolerance: Option<f64>) -> Result<(), WalkError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    if coin.is_unitary(effective_tolerance) {
        Ok(())
    } else {
        Err(WalkError::Incoherence {
            message: format!("Coin operator {} is not unitary", coin),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn localized_state_is_normalized() -> Result<(), WalkError> {
        let state = AmplitudeState::localized(5, 3)?;
        check_normalization(&state, None)
    }

    #[test]
    fn unnormalized_state_is_incoherent() -> Result<(), WalkError> {
        let state = AmplitudeState::from_amplitudes(vec![
            Complex::new(0.5, 0.0),
            Complex::new(0.5, 0.0),
        ])?;
        assert!(matches!(
            check_normalization(&state, None),
            Err(WalkError::Incoherence { .. })
        ));
        // A loose enough tolerance accepts it.
        check_normalization(&state, Some(0.6))
    }

    #[test]
    fn negative_probability_is_rejected() {
        let dist = Distribution::new(vec![1.5, -0.5]);
        match check_distribution(&dist, None) {
            Err(WalkError::Incoherence { message }) => assert!(message.contains("position 1")),
            other => panic!("expected incoherence, got {:?}", other),
        }
    }

    #[test]
    fn coin_unitarity() {
        assert!(check_unitary(&CoinOperator::hadamard(), None).is_ok());
        let leaky = CoinOperator::from_matrix([
            [Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)],
            [Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)],
        ]);
        assert!(check_unitary(&leaky, None).is_err());
    }
}
