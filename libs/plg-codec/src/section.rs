//! # Section Data Model
//!
//! In-memory form of a PLG asset: an ordered list of sections, each holding
//! one mesh's positions, flat triangle indices, packed vertex colors and the
//! X/Y bounding box.

use config::constants::{round_to_decimals, PACKED_UNSET, TRIANGLE_CORNERS};
use glam::DVec3;

use crate::error::{CodecError, CodecResult};

/// Axis-aligned bounding box over the X/Y projection of a vertex set.
///
/// Z is ignored: the consuming engine authors sections top-down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds2 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2 {
    /// Bounds of an empty vertex set.
    pub const ZERO: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    };

    /// Computes the bounds of the given points.
    ///
    /// Returns [`Bounds2::ZERO`] when there are no points.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use plg_codec::Bounds2;
    ///
    /// let bounds = Bounds2::from_points(&[DVec3::new(-1.0, 2.0, 9.0), DVec3::new(3.0, -4.0, 0.0)]);
    /// assert_eq!((bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y), (-1.0, -4.0, 3.0, 2.0));
    /// ```
    pub fn from_points(points: &[DVec3]) -> Self {
        let Some(first) = points.first() else {
            return Self::ZERO;
        };

        points[1..].iter().fold(
            Self {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |b, p| Self {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    /// Returns true if the X/Y projection of `point` lies inside the bounds.
    #[inline]
    pub fn contains_xy(&self, point: DVec3) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}

/// One mesh's geometry payload.
///
/// Once built through [`Section::new`], `colors` always has one entry per
/// vertex and `bounds` matches `vertices`.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Section name; empty means "generate one from the section index".
    pub name: String,
    /// Vertex positions.
    pub vertices: Vec<DVec3>,
    /// Flat triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    /// Packed ARGB color per vertex, `0` when unset.
    pub colors: Vec<u32>,
    /// X/Y bounding box of `vertices`.
    pub bounds: Bounds2,
}

impl Section {
    /// Creates a section, padding or truncating `colors` to the vertex count
    /// and computing the bounds.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<DVec3>,
        indices: Vec<u32>,
        mut colors: Vec<u32>,
    ) -> Self {
        colors.resize(vertices.len(), PACKED_UNSET);
        let bounds = Bounds2::from_points(&vertices);
        Self {
            name: name.into(),
            vertices,
            indices,
            colors,
            bounds,
        }
    }

    /// Creates a section with no geometry and zero bounds.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), Vec::new(), Vec::new())
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of whole triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / TRIANGLE_CORNERS
    }

    /// Returns true if the section has no vertices or no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Iterates over the triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(TRIANGLE_CORNERS)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Rounds every coordinate to `decimals` places and recomputes the bounds.
    pub fn round_positions(&mut self, decimals: u32) {
        for v in &mut self.vertices {
            *v = DVec3::new(
                round_to_decimals(v.x, decimals),
                round_to_decimals(v.y, decimals),
                round_to_decimals(v.z, decimals),
            );
        }
        self.bounds = Bounds2::from_points(&self.vertices);
    }

    /// Checks the section invariants.
    ///
    /// Checks:
    /// - The index count is a multiple of 3
    /// - Every index refers to an existing vertex
    /// - There is one color per vertex
    pub fn validate(&self) -> CodecResult<()> {
        if self.indices.len() % TRIANGLE_CORNERS != 0 {
            return Err(CodecError::NotTriangulated {
                count: self.indices.len(),
            });
        }

        let vertex_count = self.vertices.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(CodecError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        if self.colors.len() != vertex_count {
            return Err(CodecError::invalid_section(format!(
                "{} colors for {} vertices",
                self.colors.len(),
                vertex_count
            )));
        }

        Ok(())
    }
}

/// The root document: a named, ordered list of sections.
///
/// Section order is the scene traversal order and gives each section a
/// stable index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlgAsset {
    pub name: String,
    pub sections: Vec<Section>,
}

impl PlgAsset {
    /// Creates an asset with no sections.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    /// Appends a section and returns its index.
    pub fn push(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// Returns the number of sections.
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_section() -> Section {
        Section::new(
            "tri",
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            vec![0, 1, 2],
            vec![],
        )
    }

    #[test]
    fn test_bounds_empty_is_zero() {
        assert_eq!(Bounds2::from_points(&[]), Bounds2::ZERO);
    }

    #[test]
    fn test_bounds_contains_every_vertex() {
        let points = [
            DVec3::new(0.5, -2.0, 100.0),
            DVec3::new(-3.25, 7.0, -5.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(4.0, 0.0, 2.0),
        ];
        let bounds = Bounds2::from_points(&points);
        for p in points {
            assert!(bounds.contains_xy(p), "{p:?} outside {bounds:?}");
        }
        assert_eq!(bounds.min_x, -3.25);
        assert_eq!(bounds.max_y, 7.0);
    }

    #[test]
    fn test_bounds_ignore_z() {
        let bounds = Bounds2::from_points(&[DVec3::new(1.0, 1.0, -50.0), DVec3::new(1.0, 1.0, 50.0)]);
        assert_eq!(
            bounds,
            Bounds2 {
                min_x: 1.0,
                min_y: 1.0,
                max_x: 1.0,
                max_y: 1.0
            }
        );
    }

    #[test]
    fn test_new_pads_colors() {
        let section = triangle_section();
        assert_eq!(section.colors, vec![0, 0, 0]);
        assert!(section.validate().is_ok());
    }

    #[test]
    fn test_new_truncates_colors() {
        let section = Section::new("s", vec![DVec3::ZERO], vec![], vec![1, 2, 3]);
        assert_eq!(section.colors, vec![1]);
    }

    #[test]
    fn test_empty_section() {
        let section = Section::empty("nothing");
        assert!(section.is_empty());
        assert_eq!(section.bounds, Bounds2::ZERO);
        assert_eq!(section.triangle_count(), 0);
        assert!(section.validate().is_ok());
    }

    #[test]
    fn test_triangles_iterator() {
        let mut section = triangle_section();
        section.vertices.push(DVec3::ONE);
        section.colors.push(0);
        section.indices.extend([1, 3, 2]);
        let tris: Vec<_> = section.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [1, 3, 2]]);
    }

    #[test]
    fn test_round_positions_updates_bounds() {
        let mut section = Section::new(
            "r",
            vec![DVec3::new(0.123_456, 1.999_99, 0.000_01)],
            vec![],
            vec![],
        );
        section.round_positions(4);
        assert_eq!(section.vertices[0], DVec3::new(0.1235, 2.0, 0.0));
        assert_eq!(section.bounds.max_y, 2.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut section = triangle_section();
        section.indices[2] = 9;
        assert!(matches!(
            section.validate(),
            Err(CodecError::IndexOutOfRange { index: 9, vertex_count: 3 })
        ));
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut section = triangle_section();
        section.indices.push(0);
        assert!(matches!(
            section.validate(),
            Err(CodecError::NotTriangulated { count: 4 })
        ));
    }

    #[test]
    fn test_asset_push_returns_index() {
        let mut asset = PlgAsset::new("level");
        assert_eq!(asset.push(Section::empty("a")), 0);
        assert_eq!(asset.push(Section::empty("b")), 1);
        assert_eq!(asset.section_count(), 2);
    }
}
