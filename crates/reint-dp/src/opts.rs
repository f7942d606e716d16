use reint_core::errors::{ErrorInfo, ReintError};
use reint_core::serde_io;
use serde::{Deserialize, Serialize};

fn default_threshold_band() -> f64 {
    0.05
}

/// Treatment of points near `m_med = 2 m_DM` or the Z pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPolicy {
    /// Keep the point and mark it.
    #[default]
    Flag,
    /// Drop the point, splitting its contour.
    Exclude,
}

/// Options of the dark photon mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DarkPhotonOpts {
    /// Relative half-width of the threshold bands.
    #[serde(default = "default_threshold_band")]
    pub threshold_band: f64,
    /// What happens to points inside a band.
    #[serde(default)]
    pub policy: ThresholdPolicy,
    /// Dark coupling strength; `gdm^2 / 4 pi` of the benchmark when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_d: Option<f64>,
}

impl Default for DarkPhotonOpts {
    fn default() -> Self {
        Self {
            threshold_band: default_threshold_band(),
            policy: ThresholdPolicy::default(),
            alpha_d: None,
        }
    }
}

impl DarkPhotonOpts {
    /// Parses options from YAML; missing keys take their defaults.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, ReintError> {
        let opts: Self = serde_io::from_yaml_slice(data)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Checks the band width and any explicit dark coupling.
    pub fn validate(&self) -> Result<(), ReintError> {
        if !(self.threshold_band.is_finite() && self.threshold_band >= 0.0) {
            return Err(ReintError::MalformedInput(
                ErrorInfo::new("threshold-band", "threshold_band must be finite and >= 0")
                    .with_context("threshold_band", self.threshold_band.to_string()),
            ));
        }
        if let Some(alpha_d) = self.alpha_d {
            validate_alpha_d(alpha_d)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_alpha_d(alpha_d: f64) -> Result<(), ReintError> {
    if alpha_d.is_finite() && alpha_d > 0.0 {
        Ok(())
    } else {
        Err(ReintError::MalformedInput(
            ErrorInfo::new("alpha-d", "alpha_d must be finite and > 0")
                .with_context("alpha_d", alpha_d.to_string()),
        ))
    }
}
