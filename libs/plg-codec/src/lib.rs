//! # PLG Codec
//!
//! Bidirectional codec between mesh geometry and the PLG interchange format.
//!
//! ## Architecture
//!
//! ```text
//! Section list → encode_asset → PlgDocument → JSON text
//!                                           ↘ render_text → Y-JSON text
//! JSON text → decode_str → MeshPlan list (faces, corner colors, materials)
//! ```
//!
//! The crate is pure: it performs no I/O and never calls into a scene. The
//! `plg-scene` crate drives it from a host scene.
//!
//! ## Usage
//!
//! ```rust
//! use config::settings::CodecConfig;
//! use glam::DVec3;
//! use plg_codec::{decode_str, encode_json, PlgAsset, Section};
//!
//! let mut asset = PlgAsset::new("Level01");
//! asset.push(Section::new(
//!     "Floor",
//!     vec![DVec3::ZERO, DVec3::X, DVec3::Y],
//!     vec![0, 1, 2],
//!     vec![0, 0, 0],
//! ));
//!
//! let json = encode_json(&asset, &CodecConfig::default()).unwrap();
//! let decoded = decode_str(&json).unwrap();
//! assert_eq!(decoded.plans[0].faces, vec![vec![0, 1, 2]]);
//! ```

pub mod classify;
pub mod color;
pub mod decode;
pub mod error;
pub mod section;
pub mod text;
pub mod wire;

pub use classify::{classify_face, CornerClass, MaterialSlot};
pub use color::{pack_argb, unpack_argb};
pub use decode::{decode_str, decode_value, DecodedAsset, MeshPlan};
pub use error::{CodecError, CodecResult};
pub use section::{Bounds2, PlgAsset, Section};
pub use text::{json_to_text, render_text, TextForm};
pub use wire::{encode_asset, encode_json, PlgDocument, WireSection, WireVertex};
