//! Snatch stable I/O
//!
//! Loads and saves JSON/YAML configuration files with change detection and
//! atomic writes.
//!
//! # Core Concepts
//!
//! - [`Document`]: untyped tagged value (object, sequence, scalar)
//! - [`StableIo<C>`]: load/save service, instantiated as [`JsonIo`] and [`YamlIo`]
//! - [`Fingerprint`]: SHA-256 of the bytes read or written for a path
//! - [`FingerprintCache`]: per-path fingerprints owned by a service
//! - [`diff_summary`]: terse change list for logging
//!
//! # Architecture
//!
//! ```text
//! file ──load──▶ Document ──(caller edits)──▶ Document ──save_if_changed──▶ file
//!   │                                                       │
//!   └──────── fingerprint ──▶ FingerprintCache ◀── compare ─┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use snatch_io::JsonIo;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut io = JsonIo::new();
//! let Some(mut doc) = io.load("game/json/settings.json")? else {
//!     return Ok(());
//! };
//! doc["volume"] = 0.8.into();
//! let written = io.save_if_changed("game/json/settings.json", &doc, false)?;
//! println!("written: {written}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod atomic;
pub mod cache;
pub mod codec;
pub mod diff;
pub mod error;
pub mod fingerprint;
pub mod service;

/// Untyped document: object, sequence, string, number, boolean, or null
pub type Document = serde_json::Value;

/// Object body of a [`Document`]
pub type Map = serde_json::Map<String, Document>;

// Re-exports for convenience
pub use cache::FingerprintCache;
pub use codec::{Codec, Format, JsonCodec, YamlCodec};
pub use diff::{diff, diff_summary, Change, ChangeKind, DocPath, FORMATTING_ONLY};
pub use error::{CodecError, LoadError, SaveError};
pub use fingerprint::{Fingerprint, FingerprintError};
pub use service::{JsonIo, StableIo, YamlIo};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
