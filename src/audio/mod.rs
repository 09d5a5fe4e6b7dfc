pub mod analysis;
pub mod bands;
pub mod decode;
pub mod features;
pub mod loudness;
pub mod metrics;
pub mod spectral;
pub mod summary;
