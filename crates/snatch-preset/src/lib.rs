//! Shader preset migrations
//!
//! Narrow, idempotent edits of preset documents loaded through
//! [`snatch_io`], plus a batch driver that applies them over the game's
//! preset directories.
//!
//! # Migrations
//!
//! | Migration                  | Edit                                                      |
//! |----------------------------|-----------------------------------------------------------|
//! | [`RelocateCrtVignette`]    | `effects.crt.vignette*` → `effects.color_grade`, `2.1`    |
//! | [`EnsureVignetteDefaults`] | fill missing `effects.color_grade.vignette_*`             |
//! | [`AddGrainDownscale`]      | `effects.grain.downscale = 2.0` when missing              |
//!
//! [`standard_chain`] applies all three in that order.
//!
//! # Example
//!
//! ```
//! use snatch_preset::{standard_chain, Migration};
//! use serde_json::json;
//!
//! let legacy = json!({"version": "2.0", "effects": {"crt": {"vignette": 0.4}}});
//! let (migrated, changed) = standard_chain().migrate(legacy);
//!
//! assert!(changed);
//! assert_eq!(migrated["version"], "2.1");
//! assert_eq!(migrated["effects"]["color_grade"]["vignette_strength"], 0.4);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod backup;
pub mod batch;
pub mod migration;
pub mod report;
pub mod schema;
pub mod transforms;
pub mod version;

pub use backup::{backup_path, is_backup};
pub use batch::{
    default_preset_dirs, discover, BatchError, BatchOptions, BatchReport, BatchRunner,
    FileOutcome, FileReport, DEFAULT_PRESET_DIRS,
};
pub use migration::{standard_chain, Chain, Migration, MigrationKind};
pub use report::{Edit, MigrationReport};
pub use schema::{COLOR_GRADE, CRT, EFFECTS, GRAIN, VERSION_2_0, VERSION_2_1, VERSION_KEY};
pub use transforms::{AddGrainDownscale, EnsureVignetteDefaults, RelocateCrtVignette};
pub use version::{PresetVersion, VersionError};
