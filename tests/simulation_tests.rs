// tests/simulation_tests.rs

use qwalk::{
    CoinPolicy, CoinType, Simulator, SimulatorConfig, WalkBuilder, WalkError, simulate,
};

use approx::assert_abs_diff_eq;
use std::f64::consts::PI;

const TEST_TOLERANCE: f64 = 1e-12;
const NORM_TOLERANCE: f64 = 1e-9;

// Helper to compare a distribution against expected values entry by entry
fn check_distribution(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "Distribution length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < TEST_TOLERANCE,
            "Mismatch at position {} - Actual: {}, Expected: {}",
            i, a, e
        );
    }
}

// Helper for a one-hot distribution
fn point_mass(n: usize, at: usize) -> Vec<f64> {
    let mut probs = vec![0.0; n];
    probs[at] = 1.0;
    probs
}

#[test]
fn test_single_position_ring_keeps_everything() -> Result<(), WalkError> {
    let probs = simulate(1, 5, "hadamard", None, 0)?;
    check_distribution(&probs, &[1.0]);
    Ok(())
}

#[test]
fn test_zero_steps_is_identity() -> Result<(), WalkError> {
    check_distribution(&simulate(4, 0, "hadamard", None, 2)?, &[0.0, 0.0, 1.0, 0.0]);
    for coin in ["hadamard", "biased", "custom", "anything"] {
        let probs = simulate(7, 0, coin, Some(&[0.3, 1.2]), 5)?;
        check_distribution(&probs, &point_mass(7, 5));
    }
    Ok(())
}

#[test]
fn test_two_position_ring_one_step() -> Result<(), WalkError> {
    check_distribution(&simulate(2, 1, "hadamard", None, 0)?, &[0.0, 1.0]);
    Ok(())
}

#[test]
fn test_hadamard_three_steps_regression() -> Result<(), WalkError> {
    // Starting in coin 0 the Hadamard walk drifts left.
    let probs = simulate(16, 3, "hadamard", None, 8)?;
    let mut expected = vec![0.0; 16];
    expected[5] = 0.125;
    expected[7] = 0.625;
    expected[9] = 0.125;
    expected[11] = 0.125;
    check_distribution(&probs, &expected);
    Ok(())
}

#[test]
fn test_hadamard_four_steps_regression() -> Result<(), WalkError> {
    // Even step counts are not reflection symmetric either for this start state.
    let probs = simulate(16, 4, "hadamard", None, 8)?;
    let mut expected = vec![0.0; 16];
    expected[4] = 0.0625;
    expected[6] = 0.625;
    expected[8] = 0.125;
    expected[10] = 0.125;
    expected[12] = 0.0625;
    check_distribution(&probs, &expected);
    Ok(())
}

#[test]
fn test_normalization_holds_across_coins_and_rings() -> Result<(), WalkError> {
    let coins: [(&str, Option<&[f64]>); 5] = [
        ("hadamard", None),
        ("biased", None),
        ("biased", Some(&[2.0][..])),
        ("custom", Some(&[0.7, 2.9][..])),
        ("custom", Some(&[PI / 3.0][..])),
    ];
    for (coin, angles) in coins {
        for n in [1_i64, 2, 3, 8, 31] {
            for steps in [0_i64, 1, 7, 50] {
                let total: f64 = simulate(n, steps, coin, angles, n / 2)?.iter().sum();
                assert_abs_diff_eq!(total, 1.0, epsilon = NORM_TOLERANCE);
            }
        }
    }
    Ok(())
}

#[test]
fn test_ring_is_translation_invariant() -> Result<(), WalkError> {
    let n = 5;
    let from_zero = simulate(n as i64, 9, "custom", Some(&[1.0, 0.5]), 0)?;
    let from_two = simulate(n as i64, 9, "custom", Some(&[1.0, 0.5]), 2)?;
    for i in 0..n {
        assert_abs_diff_eq!(from_two[(i + 2) % n], from_zero[i], epsilon = TEST_TOLERANCE);
    }
    Ok(())
}

#[test]
fn test_identity_coin_walks_left_around_the_ring() -> Result<(), WalkError> {
    // Ry(0) is the identity, so coin 0 never changes and the walker keeps moving left.
    for steps in 0..12_usize {
        let probs = simulate(5, steps as i64, "biased", Some(&[0.0]), 1)?;
        let expected_pos = (1 + 5 * 3 - steps) % 5;
        check_distribution(&probs, &point_mass(5, expected_pos));
    }
    Ok(())
}

#[test]
fn test_flip_coin_oscillates() -> Result<(), WalkError> {
    // Ry(π) swaps the coin every step: right, then left, then right...
    let after_one = simulate(6, 1, "custom", Some(&[PI]), 2)?;
    check_distribution(&after_one, &point_mass(6, 3));
    let after_two = simulate(6, 2, "custom", Some(&[PI]), 2)?;
    check_distribution(&after_two, &point_mass(6, 2));
    Ok(())
}

#[test]
fn test_unrecognized_coin_falls_back_to_hadamard() -> Result<(), WalkError> {
    let reference = simulate(9, 6, "hadamard", None, 3)?;
    assert_eq!(simulate(9, 6, "not_a_coin", None, 3)?, reference);
    assert_eq!(simulate(9, 6, "HADAMARD", Some(&[1.0]), 3)?, reference);
    // A custom coin without angles also becomes Hadamard.
    assert_eq!(simulate(9, 6, "custom", None, 3)?, reference);
    assert_eq!(simulate(9, 6, "custom", Some(&[]), 3)?, reference);
    Ok(())
}

#[test]
fn test_custom_without_phase_matches_biased() -> Result<(), WalkError> {
    let custom = simulate(10, 8, "custom", Some(&[0.8]), 4)?;
    let biased = simulate(10, 8, "biased", Some(&[0.8]), 4)?;
    check_distribution(&custom, &biased);
    Ok(())
}

#[test]
fn test_biased_default_angle() -> Result<(), WalkError> {
    let default = simulate(12, 5, "biased", None, 6)?;
    let explicit = simulate(12, 5, "biased", Some(&[PI / 6.0]), 6)?;
    check_distribution(&default, &explicit);
    Ok(())
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let invalid = |r: Result<Vec<f64>, WalkError>| matches!(r, Err(WalkError::InvalidParameter { .. }));
    assert!(invalid(simulate(0, 3, "hadamard", None, 0)));
    assert!(invalid(simulate(-1, 3, "hadamard", None, 0)));
    assert!(invalid(simulate(4, -1, "hadamard", None, 0)));
    assert!(invalid(simulate(4, 3, "hadamard", None, 4)));
    assert!(invalid(simulate(4, 3, "hadamard", None, -1)));
}

#[test]
fn test_strict_simulator() -> Result<(), WalkError> {
    let strict = Simulator::with_config(SimulatorConfig::default().with_coin_policy(CoinPolicy::Strict))?;
    let params = WalkBuilder::new(6).steps(3).coin(CoinType::Custom).angles([0.9, 0.2]).build()?;
    let dist = strict.run(&params)?;
    assert_abs_diff_eq!(dist.total(), 1.0, epsilon = NORM_TOLERANCE);

    let bare = WalkBuilder::new(6).steps(3).coin(CoinType::Custom).build()?;
    assert!(matches!(strict.run(&bare), Err(WalkError::MissingAngles { .. })));
    Ok(())
}

#[test]
fn test_simulator_is_shareable_across_threads() -> Result<(), WalkError> {
    let simulator = Simulator::new();
    let params = WalkBuilder::new(20).steps(15).start_pos(10).build()?;
    let expected = simulator.run(&params)?;
    let (sim, walk) = (&simulator, &params);
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(move || sim.run(walk))).collect();
        handles.into_iter().map(|h| h.join().expect("worker panicked")).collect()
    });
    for result in results {
        assert_eq!(result?, expected);
    }
    Ok(())
}

#[test]
fn test_most_probable_and_measure_agree_with_point_mass() -> Result<(), WalkError> {
    let params = WalkBuilder::new(8).steps(3).coin(CoinType::Biased).angles([0.0]).start_pos(4).build()?;
    let dist = Simulator::new().run(&params)?;
    assert_eq!(dist.most_probable(), Some(1));
    assert_eq!(dist.measure(2024), Some(1));
    Ok(())
}
