//! # Config Crate
//!
//! Centralized configuration for the PLG pipeline. All wire-format literals
//! and tunable codec parameters are defined here to ensure consistency across
//! crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{PACKED_BLACK, PACKED_WHITE, PLG_ASSET_CLASS};
//! use config::settings::{CodecConfig, ColorSource};
//!
//! assert_ne!(PACKED_BLACK, PACKED_WHITE);
//! assert_eq!(PLG_ASSET_CLASS, "UScriptClass'PlgAsset'");
//!
//! let config = CodecConfig::default();
//! assert_eq!(config.color_source, ColorSource::VertexLayer);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Wire Compatible**: Defaults match what the consuming engine accepts
//! - **No Dependencies**: Usable from every crate in the workspace

pub mod constants;
pub mod settings;
