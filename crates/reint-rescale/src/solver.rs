use reint_core::errors::ReintError;
use serde::{Deserialize, Serialize};

use crate::params::SolverMethod;

/// Closed search interval for the solved coupling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// Lower edge.
    pub lo: f64,
    /// Upper edge.
    pub hi: f64,
}

/// Iteration limits shared by both strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverLimits {
    /// Absolute tolerance on the root.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iters: usize,
}

/// Result of a bracketed monotone solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum RootOutcome {
    /// Root located within tolerance.
    Converged {
        /// Root estimate.
        root: f64,
        /// Function evaluations spent inside the bracket.
        iterations: usize,
    },
    /// Even the lower edge overshoots the target.
    BelowRange,
    /// Even the upper edge falls short of the target.
    AboveRange,
    /// Iteration cap reached before the tolerance was met.
    NotConverged {
        /// Best estimate when the cap was hit.
        best: f64,
    },
}

impl RootOutcome {
    /// Root if the solve converged.
    pub fn root(&self) -> Option<f64> {
        match self {
            RootOutcome::Converged { root, .. } => Some(*root),
            _ => None,
        }
    }
}

/// Solves `f(x) == target` for a non-decreasing `f` on `bracket`.
///
/// Errors raised by `f` are returned unchanged so the caller can decide
/// whether they invalidate the point or the run.
pub fn solve_monotone<F>(
    mut f: F,
    target: f64,
    bracket: Bracket,
    limits: SolverLimits,
    method: SolverMethod,
) -> Result<RootOutcome, ReintError>
where
    F: FnMut(f64) -> Result<f64, ReintError>,
{
    let mut g = |x: f64| f(x).map(|value| value - target);
    let g_lo = g(bracket.lo)?;
    if g_lo > 0.0 {
        return Ok(RootOutcome::BelowRange);
    }
    if g_lo == 0.0 {
        return Ok(RootOutcome::Converged {
            root: bracket.lo,
            iterations: 0,
        });
    }
    let g_hi = g(bracket.hi)?;
    if g_hi < 0.0 {
        return Ok(RootOutcome::AboveRange);
    }
    if g_hi == 0.0 {
        return Ok(RootOutcome::Converged {
            root: bracket.hi,
            iterations: 0,
        });
    }
    match method {
        SolverMethod::Bisection => bisection(g, bracket, g_lo, limits),
        SolverMethod::Brent => brent(g, bracket, g_lo, g_hi, limits),
    }
}

fn bisection<G>(
    mut g: G,
    bracket: Bracket,
    mut g_lo: f64,
    limits: SolverLimits,
) -> Result<RootOutcome, ReintError>
where
    G: FnMut(f64) -> Result<f64, ReintError>,
{
    let (mut lo, mut hi) = (bracket.lo, bracket.hi);
    for iteration in 1..=limits.max_iters {
        let mid = 0.5 * (lo + hi);
        let g_mid = g(mid)?;
        if g_mid == 0.0 || 0.5 * (hi - lo) <= limits.tolerance {
            return Ok(RootOutcome::Converged {
                root: mid,
                iterations: iteration,
            });
        }
        // Keep the sign change inside [lo, hi].
        if (g_mid < 0.0) == (g_lo < 0.0) {
            lo = mid;
            g_lo = g_mid;
        } else {
            hi = mid;
        }
    }
    Ok(RootOutcome::NotConverged {
        best: 0.5 * (lo + hi),
    })
}

fn brent<G>(
    mut g: G,
    bracket: Bracket,
    g_lo: f64,
    g_hi: f64,
    limits: SolverLimits,
) -> Result<RootOutcome, ReintError>
where
    G: FnMut(f64) -> Result<f64, ReintError>,
{
    let (mut a, mut b) = (bracket.lo, bracket.hi);
    let (mut fa, mut fb) = (g_lo, g_hi);
    let (mut c, mut fc) = (b, fb);
    let mut d = b - a;
    let mut e = d;
    for iteration in 1..=limits.max_iters {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * limits.tolerance;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(RootOutcome::Converged {
                root: b,
                iterations: iteration,
            });
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let interpolation_bound = 3.0 * xm * q - (tol * q).abs();
            let step_bound = (e * q).abs();
            if 2.0 * p < interpolation_bound.min(step_bound) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(xm) };
        fb = g(b)?;
    }
    Ok(RootOutcome::NotConverged { best: b })
}
