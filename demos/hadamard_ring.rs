//! Runs a Hadamard walk on a ring and prints how the walker spreads.
//! Debug-level tracing events from the simulator are printed to stdout.

use qwalk::{CoinType, Simulator, WalkBuilder, WalkError};
use tracing::Level;

fn main() -> Result<(), WalkError> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    println!("--- qwalk Example: Hadamard walk on a ring of 41 positions ---");

    let simulator = Simulator::new();
    for steps in [0, 5, 10, 20] {
        let params = WalkBuilder::new(41)
            .steps(steps)
            .coin(CoinType::Hadamard)
            .start_pos(20)
            .build()?;
        println!("\n{}", params);

        let dist = simulator.run(&params)?;
        for (pos, p) in dist.probabilities().iter().enumerate() {
            if *p > 1e-6 {
                let bar = "#".repeat((p * 60.0).round() as usize);
                println!("  {:>3} {:.4} {}", pos, p, bar);
            }
        }

        if let Some(peak) = dist.most_probable() {
            println!("  peak at position {}", peak);
        }
        if let Some(seen) = dist.measure(steps as u64) {
            println!("  sampled position (seed {}): {}", steps, seen);
        }
    }

    Ok(())
}
