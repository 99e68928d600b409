//! Capacity cost function and its root-finding solver.
//!
//! For a user demanding `C` bit/s over a link with signal level `S` dBm and
//! noise density `N0` dBm/Hz, the Shannon rate at bandwidth `w` is
//! `w * log2(1 + 10^((S - N0 - 10*log10(w)) / 10))`. Setting it equal to
//! the demand gives the cost function
//!
//! `f(w) = 10*log10(w * (2^(C/w) - 1)) - S + N0`
//!
//! which is strictly decreasing for `w > 0` and whose zero is the
//! bandwidth to allocate. Its asymptote `10*log10(C*ln2) - S + N0` decides
//! up front whether a finite root exists at all; when it does, a
//! bracket-safeguarded Newton iteration finds it.

use std::f64::consts::{LN_2, LN_10};

/// Thermal noise density in dBm/Hz.
pub const NOISE_DENSITY_DBM_HZ: f64 = -174.0;

/// Root bracket in Hz, matching the solver's search domain.
const BRACKET_LO_HZ: f64 = 1.0;
const BRACKET_HI_HZ: f64 = 1e22;

/// Iteration budget; the solver must never loop unboundedly.
const MAX_ITERATIONS: usize = 100;

/// Convergence threshold on |f(w)| in dB.
const TOLERANCE_DB: f64 = 1e-9;

/// Errors local to a single link's bandwidth computation.
///
/// Never fatal to a run: the engine logs them and treats the link as
/// unallocatable.
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum SolveError {
    #[error("no convergence after {0} iterations")]
    NonConvergence(usize),
}

/// Link signal level in dBm: transmit power + gain - pathloss.
pub fn signal_level_dbm(power_dbm: f64, gain_dbi: f64, pathloss_db: f64) -> f64 {
    power_dbm + gain_dbi - pathloss_db
}

/// The cost function `f(w)`; its zero is the bandwidth satisfying the
/// demand at the Shannon limit.
///
/// # Arguments
/// * `w` - Candidate bandwidth in Hz (> 0).
/// * `demand_bps` - Throughput demand `C` in bit/s.
/// * `noise_dbm_hz` - Noise density `N0` in dBm/Hz.
/// * `signal_dbm` - Link signal level `S` in dBm.
pub fn w_cost(w: f64, demand_bps: f64, noise_dbm_hz: f64, signal_dbm: f64) -> f64 {
    // 2^(C/w) - 1 via exp_m1 for precision when C/w is small.
    let gain = (demand_bps / w * LN_2).exp_m1();
    10.0 * (w * gain).log10() - signal_dbm + noise_dbm_hz
}

/// Analytic derivative `f'(w)`, negative everywhere in-domain.
pub fn w_cost_prime(w: f64, demand_bps: f64) -> f64 {
    let gain = (demand_bps / w * LN_2).exp_m1();
    (10.0 / LN_10) * (1.0 / w - demand_bps * LN_2 / (w * w) * (1.0 + 1.0 / gain))
}

/// Asymptote of `f` as `w -> infinity`.
///
/// Positive means the demand is unsatisfiable at any bandwidth for this
/// link quality; at or below zero a finite positive root exists.
pub fn w_limit(demand_bps: f64, noise_dbm_hz: f64, signal_dbm: f64) -> f64 {
    10.0 * (demand_bps * LN_2).log10() - signal_dbm + noise_dbm_hz
}

/// Find the root of `f(w)` with Newton steps safeguarded by bisection over
/// `[1 Hz, 1e22 Hz]`, starting near `C/2`.
///
/// Callers must check [`w_limit`] first; with a positive asymptote there
/// is no root and the iteration budget would be wasted.
pub fn solve_required_bandwidth(demand_bps: f64, signal_dbm: f64) -> Result<f64, SolveError> {
    let mut lo = BRACKET_LO_HZ;
    let mut hi = BRACKET_HI_HZ;
    let mut w = (0.5 * demand_bps).clamp(lo, hi);

    for _ in 0..MAX_ITERATIONS {
        let f = w_cost(w, demand_bps, NOISE_DENSITY_DBM_HZ, signal_dbm);
        if f.abs() < TOLERANCE_DB {
            return Ok(w);
        }
        // f is decreasing: positive means w is below the root.
        if f > 0.0 {
            lo = w;
        } else {
            hi = w;
        }

        let fp = w_cost_prime(w, demand_bps);
        let newton = w - f / fp;
        w = if newton.is_finite() && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };
    }

    Err(SolveError::NonConvergence(MAX_ITERATIONS))
}

/// Bandwidth required to satisfy `demand_bps` at signal level `signal_dbm`,
/// or a sentinel strictly above `capacity_hz` when the link cannot carry
/// the demand (unsatisfiable asymptote or solver failure), so that every
/// budget comparison against it fails.
pub fn required_bandwidth(demand_bps: f64, signal_dbm: f64, capacity_hz: f64) -> f64 {
    if demand_bps <= 0.0 {
        return 0.0;
    }

    let exceeds = capacity_hz + 1.0;
    if w_limit(demand_bps, NOISE_DENSITY_DBM_HZ, signal_dbm) > 0.0 {
        tracing::debug!(
            demand_bps,
            signal_dbm,
            "demand unsatisfiable at any bandwidth for this link"
        );
        return exceeds;
    }

    match solve_required_bandwidth(demand_bps, signal_dbm) {
        Ok(w) => w,
        Err(e) => {
            tracing::warn!(demand_bps, signal_dbm, error = %e, "bandwidth solver failed, dropping link");
            exceeds
        }
    }
}
