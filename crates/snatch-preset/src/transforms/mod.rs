//! Concrete preset migrations

mod crt_vignette;
mod grain_downscale;
mod vignette_defaults;

pub use crt_vignette::{RelocateCrtVignette, LEGACY_VIGNETTE_KEYS};
pub use grain_downscale::{AddGrainDownscale, DEFAULT_DOWNSCALE, DOWNSCALE_KEY};
pub use vignette_defaults::{EnsureVignetteDefaults, VIGNETTE_DEFAULTS};
