use reint_core::errors::ReintError;
use reint_core::serde_io;
use reint_dp::DarkPhotonOpts;
use reint_rescale::RescaleOpts;
use serde::{Deserialize, Serialize};

/// Settings for both pipeline stages, read from `--config`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub rescale: RescaleOpts,
    #[serde(default)]
    pub dark_photon: DarkPhotonOpts,
}

impl PipelineConfig {
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, ReintError> {
        let config: Self = serde_io::from_yaml_slice(data)?;
        config.rescale.validate()?;
        config.dark_photon.validate()?;
        Ok(config)
    }
}
