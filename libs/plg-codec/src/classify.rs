//! # Corner Classification
//!
//! Reconstructs the binary black/white surface classification that is
//! encoded in packed vertex colors.

use config::constants::{
    BLACK_CORNER_COLOR, BLACK_MATERIAL_SLOT, NEUTRAL_CORNER_COLOR, PACKED_BLACK, PACKED_WHITE,
    WHITE_CORNER_COLOR, WHITE_MATERIAL_SLOT,
};

/// Classification of one face corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerClass {
    White,
    Black,
    /// Any untagged color; carries no material signal.
    Neutral,
}

impl CornerClass {
    /// Classifies a packed color. Only the two exact tags are recognized.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plg_codec::classify::CornerClass;
    ///
    /// assert_eq!(CornerClass::from_packed(4_294_967_295), CornerClass::White);
    /// assert_eq!(CornerClass::from_packed(4_294_967_040), CornerClass::Black);
    /// assert_eq!(CornerClass::from_packed(0xFF00_0000), CornerClass::Neutral);
    /// ```
    pub fn from_packed(packed: u32) -> Self {
        match packed {
            PACKED_WHITE => Self::White,
            PACKED_BLACK => Self::Black,
            _ => Self::Neutral,
        }
    }

    /// Returns the RGBA color shown for this corner.
    pub fn display_color(self) -> [f32; 4] {
        match self {
            Self::White => WHITE_CORNER_COLOR,
            Self::Black => BLACK_CORNER_COLOR,
            Self::Neutral => NEUTRAL_CORNER_COLOR,
        }
    }
}

/// Material slot a face is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    Black,
    White,
}

impl MaterialSlot {
    /// Returns the material index of this slot on an imported mesh.
    pub fn index(self) -> usize {
        match self {
            Self::Black => BLACK_MATERIAL_SLOT,
            Self::White => WHITE_MATERIAL_SLOT,
        }
    }
}

/// Picks the material of a face from its corner classes.
///
/// White wins only with strictly more white corners than black ones; ties,
/// including all-neutral faces, go to black.
///
/// # Example
///
/// ```rust
/// use plg_codec::classify::{classify_face, CornerClass, MaterialSlot};
///
/// let corners = [CornerClass::White, CornerClass::Black, CornerClass::Neutral];
/// assert_eq!(classify_face(corners), MaterialSlot::Black);
/// ```
pub fn classify_face(corners: impl IntoIterator<Item = CornerClass>) -> MaterialSlot {
    let (white, black) = corners
        .into_iter()
        .fold((0usize, 0usize), |(w, b), class| match class {
            CornerClass::White => (w + 1, b),
            CornerClass::Black => (w, b + 1),
            CornerClass::Neutral => (w, b),
        });

    if white > black {
        MaterialSlot::White
    } else {
        MaterialSlot::Black
    }
}
