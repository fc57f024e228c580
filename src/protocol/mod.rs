// src/protocol/mod.rs

//! Request and response shapes exchanged with a transport layer.
//!
//! A server decodes a [`WalkRequest`], the core turns it into a
//! [`WalkResponse`], and the server encodes that back. [`handle_json`] does the
//! whole round for callers that only hold the raw body.

use serde::{Deserialize, Serialize};

use crate::coin::CoinType;
use crate::core::WalkError;
use crate::simulation::Simulator;
use crate::walk::WalkParams;

/// One walk as requested over the wire.
///
/// Integers are signed so that negative sizes can be rejected with a
/// parameter error instead of a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkRequest {
    /// Number of positions on the ring.
    pub n_positions: i64,
    /// Number of coin-then-shift steps.
    pub steps: i64,
    /// Coin tag: `hadamard`, `biased` or `custom`.
    pub coin: String,
    /// Position holding all amplitude before the first step.
    pub start_pos: i64,
    /// Absent and `null` both mean "no angles".
    #[serde(default)]
    pub custom_coin_angles: Option<Vec<f64>>,
}

impl WalkRequest {
    /// Validates the request into walk parameters, resolving the coin tag
    /// under `simulator`'s coin policy.
    pub fn to_params(&self, simulator: &Simulator) -> Result<WalkParams, WalkError> {
        let coin = CoinType::resolve(&self.coin, simulator.config().coin_policy)?;
        WalkParams::from_signed(
            self.n_positions,
            self.steps,
            coin,
            self.custom_coin_angles.as_deref(),
            self.start_pos,
        )
    }

    /// Runs the requested walk.
    pub fn execute(&self, simulator: &Simulator) -> Result<WalkResponse, WalkError> {
        let params = self.to_params(simulator)?;
        let dist = simulator.run(&params)?;
        Ok(WalkResponse { probabilities: dist.into_vec() })
    }
}

/// The result handed back to the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkResponse {
    /// One probability per ring position, in position order.
    pub probabilities: Vec<f64>,
}

/// Decodes a JSON [`WalkRequest`], runs it, and encodes the [`WalkResponse`].
pub fn handle_json(simulator: &Simulator, body: &str) -> Result<String, WalkError> {
    let request: WalkRequest = serde_json::from_str(body)?;
    let response = request.execute(simulator)?;
    Ok(serde_json::to_string(&response)?)
}
