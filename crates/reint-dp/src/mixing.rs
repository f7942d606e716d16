use std::f64::consts::PI;

use crate::constants::{ALPHA_EM, MEAN_Q2, MEAN_Y2, SIN2_THETA_W, Z_MASS};

/// Kinetic mixing `epsilon` equivalent to a vector quark coupling `gq`.
///
/// With `delta = (m_med / m_Z)^2`:
///
/// `epsilon = |gq (1 - delta) cos^2 / (e (sqrt<Q^2> cos^2 + delta sqrt<Y^2>))|`
///
/// The relation vanishes at the Z pole; callers flag or drop points there.
pub fn kinetic_mixing(gq: f64, mediator_mass: f64) -> f64 {
    let delta = (mediator_mass / Z_MASS).powi(2);
    let cos2 = 1.0 - SIN2_THETA_W;
    let charge = (4.0 * PI * ALPHA_EM).sqrt();
    let denominator = charge * (MEAN_Q2.sqrt() * cos2 + delta * MEAN_Y2.sqrt());
    (gq * (1.0 - delta) * cos2 / denominator).abs()
}

/// Yield variable `y = epsilon^2 alpha_D (m_DM / m_med)^4`.
pub fn yield_parameter(epsilon: f64, alpha_d: f64, dm_mass: f64, mediator_mass: f64) -> f64 {
    epsilon * epsilon * alpha_d * (dm_mass / mediator_mass).powi(4)
}

/// Dark coupling strength implied by a dark matter coupling, `gdm^2 / 4 pi`.
pub fn default_alpha_d(gdm: f64) -> f64 {
    gdm * gdm / (4.0 * PI)
}
