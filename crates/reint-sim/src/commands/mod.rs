pub mod benchmarks;
pub mod dark_photon;
pub mod pipeline;
pub mod rescale;
