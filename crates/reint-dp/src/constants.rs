//! Electroweak inputs of the kinetic mixing relation.

/// Z boson mass in GeV.
pub const Z_MASS: f64 = 91.1880;

/// Weak mixing angle, `sin^2 theta_W`.
pub const SIN2_THETA_W: f64 = 0.23129;

/// Fine structure constant at zero momentum transfer.
pub const ALPHA_EM: f64 = 1.0 / 137.035999084;

/// Mean squared electric charge of the light quarks.
pub const MEAN_Q2: f64 = 0.3;

/// Mean squared hypercharge of the light quarks.
pub const MEAN_Y2: f64 = 0.7;
