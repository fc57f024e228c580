//! Numeric constants shared by the coin builder and the engine.

/// Defaults used when a caller leaves a knob unset.
pub mod walk_constants {
    /// Rotation angle of the `biased` coin when no angle is supplied (π/6).
    pub const DEFAULT_BIASED_THETA: f64 = std::f64::consts::FRAC_PI_6;
    /// Amplitudes with magnitude below this are not carried through the shift.
    pub const AMPLITUDE_CUTOFF: f64 = 1e-12;
    /// Allowed deviation of the total probability from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
}
