//! # Configuration Constants
//!
//! Centralized constants for the PLG pipeline. Every literal the wire format
//! depends on is defined here so the codec, the scene layer and the CLI agree
//! on a single value.
//!
//! ## Categories
//!
//! - **Schema**: Fixed strings of the PLG JSON envelope
//! - **Colors**: Packed ARGB tags and classification display colors
//! - **Precision**: Decimal places for the JSON and Y-JSON forms
//! - **Naming**: Default section, material and layer names
//! - **Limits**: Safety bounds for imported files

// =============================================================================
// SCHEMA CONSTANTS
// =============================================================================

/// Value of the `Type` field of a PLG asset entry.
///
/// # Example
///
/// ```rust
/// use config::constants::PLG_ASSET_TYPE;
///
/// assert_eq!(PLG_ASSET_TYPE, "PlgAsset");
/// ```
pub const PLG_ASSET_TYPE: &str = "PlgAsset";

/// Value of the `Class` field of a PLG asset entry.
///
/// The downstream engine resolves the asset class from this literal, so it
/// must be emitted byte for byte.
pub const PLG_ASSET_CLASS: &str = "UScriptClass'PlgAsset'";

/// Key of the section list inside the Y-JSON text form.
pub const PLG_DATAS_KEY: &str = "PlgDatas";

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Packed color tagging a corner as "white" (`0xFFFFFFFF`).
///
/// # Example
///
/// ```rust
/// use config::constants::PACKED_WHITE;
///
/// assert_eq!(PACKED_WHITE, 4_294_967_295);
/// ```
pub const PACKED_WHITE: u32 = 0xFFFF_FFFF;

/// Packed color tagging a corner as "black" (`0xFFFFFF00`).
///
/// This is the legacy tag value, not the ARGB packing of opaque black.
///
/// # Example
///
/// ```rust
/// use config::constants::PACKED_BLACK;
///
/// assert_eq!(PACKED_BLACK, 4_294_967_040);
/// ```
pub const PACKED_BLACK: u32 = 0xFFFF_FF00;

/// Packed color meaning "unset"; decoded as neutral gray.
pub const PACKED_UNSET: u32 = 0;

/// Display color of a corner tagged white.
pub const WHITE_CORNER_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Display color of a corner tagged black.
pub const BLACK_CORNER_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Display color of a corner that carries no classification tag.
///
/// RGBA values in range [0.0, 1.0].
pub const NEUTRAL_CORNER_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// Largest value of an 8-bit color channel.
pub const CHANNEL_MAX: f32 = 255.0;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Decimal places kept for coordinates in the JSON form.
///
/// Matches the precision the consuming engine's legacy tools expect.
///
/// # Example
///
/// ```rust
/// use config::constants::{round_to_decimals, JSON_COORD_DECIMALS};
///
/// assert_eq!(round_to_decimals(1.234_56, JSON_COORD_DECIMALS), 1.2346);
/// ```
pub const JSON_COORD_DECIMALS: u32 = 4;

/// Fixed decimal places of every float in the Y-JSON text form.
///
/// # Example
///
/// ```rust
/// use config::constants::TEXT_FLOAT_DECIMALS;
///
/// let text = format!("{:.*}", TEXT_FLOAT_DECIMALS as usize, 1.5);
/// assert_eq!(text, "1.500000");
/// ```
pub const TEXT_FLOAT_DECIMALS: u32 = 6;

/// Upper bound accepted for any configured decimal count.
///
/// An `f64` carries roughly 15 significant decimal digits.
pub const MAX_DECIMALS: u32 = 15;

// =============================================================================
// NAMING CONSTANTS
// =============================================================================

/// Prefix of the generated name of a section without one.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SECTION_PREFIX;
///
/// assert_eq!(format!("{DEFAULT_SECTION_PREFIX}{}", 3), "PLG_Section_3");
/// ```
pub const DEFAULT_SECTION_PREFIX: &str = "PLG_Section_";

/// Suffix appended to a section name to name its mesh data block.
pub const MESH_DATA_SUFFIX: &str = "_mesh";

/// Name of the material assigned to faces classified black.
pub const BLACK_MATERIAL_NAME: &str = "Black_Material";

/// Name of the material assigned to faces classified white.
pub const WHITE_MATERIAL_NAME: &str = "White_Material";

/// Base color of the black classification material.
pub const BLACK_MATERIAL_RGBA: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Base color of the white classification material.
pub const WHITE_MATERIAL_RGBA: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Material slot of the black material on every imported mesh.
pub const BLACK_MATERIAL_SLOT: usize = 0;

/// Material slot of the white material on every imported mesh.
pub const WHITE_MATERIAL_SLOT: usize = 1;

/// Name of the per-corner color layer created on import.
pub const CORNER_COLOR_LAYER: &str = "Col";

/// Extension of the PLG JSON document.
pub const JSON_EXTENSION: &str = "json";

/// Extension of the Y-JSON text sidecar.
pub const TEXT_EXTENSION: &str = "txt";

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum file size for imported files (in bytes).
///
/// Prevents loading extremely large files that could cause memory issues.
/// 100 MB default.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Number of corners of a triangle.
pub const TRIANGLE_CORNERS: usize = 3;

/// Minimum number of corners of any polygon loop.
pub const MIN_POLYGON_CORNERS: usize = 3;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Returns the generated name of the section at `index`.
///
/// # Example
///
/// ```rust
/// use config::constants::default_section_name;
///
/// assert_eq!(default_section_name(0), "PLG_Section_0");
/// ```
pub fn default_section_name(index: usize) -> String {
    format!("{DEFAULT_SECTION_PREFIX}{index}")
}

/// Rounds a value to the given number of decimal places.
///
/// Rounding is done on the exact binary value, so `10.00005` (stored just
/// below the halfway point) rounds down to `10.0`.
///
/// # Example
///
/// ```rust
/// use config::constants::round_to_decimals;
///
/// assert_eq!(round_to_decimals(0.123_456, 4), 0.1235);
/// assert_eq!(round_to_decimals(10.000_05, 4), 10.0);
/// assert_eq!(round_to_decimals(-2.0, 4), -2.0);
/// ```
#[inline]
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let precision = decimals as usize;
    format!("{value:.precision$}").parse().unwrap_or(value)
}
