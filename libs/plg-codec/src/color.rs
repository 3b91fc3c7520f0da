//! # Packed Colors
//!
//! Conversion between RGBA float colors and the packed 32-bit ARGB values
//! stored in the `Colors` list of a section.
//!
//! The bit layout `(A << 24) | (R << 16) | (G << 8) | B` is a contract with
//! the consuming engine.

use config::constants::{CHANNEL_MAX, PACKED_BLACK, PACKED_WHITE};
use config::settings::ColorSource;

/// Converts a `[0, 1]` channel to a byte, saturating out-of-range input.
#[inline]
fn channel_to_byte(channel: f32) -> u32 {
    if channel.is_nan() {
        return 0;
    }
    (channel * CHANNEL_MAX).round().clamp(0.0, CHANNEL_MAX) as u32
}

/// Packs an RGBA color into a 32-bit ARGB value.
///
/// Channels are scaled by 255, rounded and clamped, so out-of-range input
/// saturates instead of failing.
///
/// # Example
///
/// ```rust
/// use plg_codec::color::pack_argb;
///
/// assert_eq!(pack_argb([1.0, 1.0, 1.0, 1.0]), 0xFFFF_FFFF);
/// assert_eq!(pack_argb([1.0, 0.0, 0.0, 1.0]), 0xFFFF_0000);
/// assert_eq!(pack_argb([2.0, -1.0, 0.0, 1.0]), 0xFFFF_0000);
/// ```
pub fn pack_argb(rgba: [f32; 4]) -> u32 {
    let [r, g, b, a] = rgba.map(channel_to_byte);
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Splits a packed ARGB value into `[r, g, b, a]` bytes.
///
/// # Example
///
/// ```rust
/// use plg_codec::color::unpack_argb;
///
/// assert_eq!(unpack_argb(0x80FF_4000), [0xFF, 0x40, 0x00, 0x80]);
/// ```
pub fn unpack_argb(packed: u32) -> [u8; 4] {
    let [a, r, g, b] = packed.to_be_bytes();
    [r, g, b, a]
}

/// Splits a packed ARGB value into `[r, g, b, a]` floats in `[0, 1]`.
pub fn unpack_argb_f32(packed: u32) -> [f32; 4] {
    unpack_argb(packed).map(|c| f32::from(c) / CHANNEL_MAX)
}

/// Returns the legacy tag of an exactly black or exactly white color.
///
/// Only the RGB channels are compared; alpha is ignored.
pub fn heuristic_tag(rgba: [f32; 4]) -> Option<u32> {
    let rgb = [rgba[0], rgba[1], rgba[2]];
    if rgb == [0.0; 3] {
        Some(PACKED_BLACK)
    } else if rgb == [1.0; 3] {
        Some(PACKED_WHITE)
    } else {
        None
    }
}

/// Encodes one corner color according to the configured source.
///
/// `None` means the corner leaves its vertex color untouched.
///
/// # Example
///
/// ```rust
/// use config::settings::ColorSource;
/// use plg_codec::color::encode_corner;
///
/// let gray = [0.5, 0.5, 0.5, 1.0];
/// assert_eq!(encode_corner(ColorSource::None, gray), None);
/// assert_eq!(encode_corner(ColorSource::Heuristic, gray), None);
/// assert_eq!(encode_corner(ColorSource::VertexLayer, gray), Some(0xFF80_8080));
/// ```
pub fn encode_corner(source: ColorSource, rgba: [f32; 4]) -> Option<u32> {
    match source {
        ColorSource::None => None,
        ColorSource::Heuristic => heuristic_tag(rgba),
        ColorSource::VertexLayer => Some(pack_argb(rgba)),
    }
}
