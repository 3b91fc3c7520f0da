//! # PLG Decoding
//!
//! Reads PLG JSON into per-section mesh build plans.
//!
//! ## Failure Policy
//!
//! - A broken envelope (not a list, no entry, no `PlgDatas`) is fatal
//! - A broken section is skipped with an error diagnostic; the others decode
//! - A color list of the wrong length is corrected with a warning diagnostic
//!
//! Decoding never touches a scene. The scene layer turns each [`MeshPlan`]
//! into host objects.

use config::constants::{
    default_section_name, MESH_DATA_SUFFIX, MIN_POLYGON_CORNERS, PACKED_UNSET, PLG_ASSET_TYPE,
    TRIANGLE_CORNERS,
};
use glam::DVec3;
use plg_types::{Diagnostic, Stage};
use serde::Deserialize;
use serde_json::Value;

use crate::classify::{classify_face, CornerClass, MaterialSlot};
use crate::error::{CodecError, CodecResult};
use crate::section::{Bounds2, Section};
use crate::wire::WireVertex;

const PLG_DATAS_POINTER: &str = "/Properties/PlgData/PlgDatas";

/// Section as read from input: everything but `Vertices` is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawSection {
    vertices: Vec<WireVertex>,
    #[serde(default)]
    indices: Option<RawIndices>,
    #[serde(default)]
    colors: Option<Vec<Value>>,
    #[serde(default)]
    name: Option<String>,
}

/// The two accepted shapes of `Indices`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawIndices {
    /// Consecutive triples form triangles.
    Flat(Vec<u32>),
    /// Each group is one polygon loop (legacy, non-triangulated input).
    Grouped(Vec<Vec<u32>>),
}

/// Everything needed to build one mesh object from one section.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPlan {
    /// Position of the section in `PlgDatas`.
    pub section_index: usize,
    pub name: String,
    pub vertices: Vec<DVec3>,
    /// Polygon loops; triangles unless the input used grouped indices.
    pub faces: Vec<Vec<u32>>,
    /// Packed colors, exactly one per vertex.
    pub colors: Vec<u32>,
    /// Display color per face corner, in face order.
    pub corner_colors: Vec<[f32; 4]>,
    /// Material slot per face.
    pub face_materials: Vec<MaterialSlot>,
}

impl MeshPlan {
    /// Returns the name of the mesh data block.
    pub fn mesh_data_name(&self) -> String {
        format!("{}{MESH_DATA_SUFFIX}", self.name)
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if every face is a triangle.
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.len() == TRIANGLE_CORNERS)
    }

    /// Returns the X/Y bounds of the vertices.
    pub fn bounds(&self) -> Bounds2 {
        Bounds2::from_points(&self.vertices)
    }

    /// Counts the faces assigned to `slot`.
    pub fn faces_with(&self, slot: MaterialSlot) -> usize {
        self.face_materials.iter().filter(|&&m| m == slot).count()
    }

    /// Converts the plan back into a section.
    ///
    /// Fails if any face is not a triangle.
    pub fn to_section(&self) -> CodecResult<Section> {
        if !self.is_triangulated() {
            let count = self.faces.iter().map(Vec::len).sum();
            return Err(CodecError::NotTriangulated { count });
        }

        let indices = self.faces.iter().flatten().copied().collect();
        Ok(Section::new(
            self.name.clone(),
            self.vertices.clone(),
            indices,
            self.colors.clone(),
        ))
    }
}

/// Result of decoding one document.
#[derive(Debug, Clone, Default)]
pub struct DecodedAsset {
    /// `Name` of the asset entry (empty if absent).
    pub name: String,
    /// One plan per section that decoded, in document order.
    pub plans: Vec<MeshPlan>,
    /// Total number of sections in the document, skipped ones included.
    pub section_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodedAsset {
    /// Returns the indices of sections that were skipped.
    pub fn skipped_sections(&self) -> Vec<usize> {
        (0..self.section_count)
            .filter(|i| !self.plans.iter().any(|p| p.section_index == *i))
            .collect()
    }
}

/// Outcome of reconciling a color list with its vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFix {
    Unchanged,
    Padded { from: usize, to: usize },
    Truncated { from: usize, to: usize },
}

/// Pads with unset colors or truncates so there is one color per vertex.
///
/// # Example
///
/// ```rust
/// use plg_codec::decode::{reconcile_colors, ColorFix};
///
/// let (colors, fix) = reconcile_colors(vec![7], 3);
/// assert_eq!(colors, vec![7, 0, 0]);
/// assert_eq!(fix, ColorFix::Padded { from: 1, to: 3 });
/// ```
pub fn reconcile_colors(mut colors: Vec<u32>, vertex_count: usize) -> (Vec<u32>, ColorFix) {
    let from = colors.len();
    let fix = match from.cmp(&vertex_count) {
        std::cmp::Ordering::Equal => ColorFix::Unchanged,
        std::cmp::Ordering::Less => ColorFix::Padded {
            from,
            to: vertex_count,
        },
        std::cmp::Ordering::Greater => ColorFix::Truncated {
            from,
            to: vertex_count,
        },
    };
    colors.resize(vertex_count, PACKED_UNSET);
    (colors, fix)
}

/// Reads one `Colors` entry as a packed color.
///
/// Integral numbers in `u32` range are accepted whatever their JSON spelling
/// (`4294967295` and `4294967295.0` are the same color). Anything else
/// returns `None`.
///
/// # Example
///
/// ```rust
/// use plg_codec::decode::packed_color;
/// use serde_json::json;
///
/// assert_eq!(packed_color(&json!(4294967295u32)), Some(0xFFFF_FFFF));
/// assert_eq!(packed_color(&json!(4294967295.0)), Some(0xFFFF_FFFF));
/// assert_eq!(packed_color(&json!(-1)), None);
/// assert_eq!(packed_color(&json!("white")), None);
/// ```
pub fn packed_color(value: &Value) -> Option<u32> {
    if let Some(integer) = value.as_u64() {
        return u32::try_from(integer).ok();
    }
    let float = value.as_f64()?;
    let in_range = float.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&float);
    in_range.then_some(float as u32)
}

/// Builds polygon loops from either index shape, checking every index.
pub fn build_faces(indices: &RawIndices, vertex_count: usize) -> CodecResult<Vec<Vec<u32>>> {
    let check = |index: u32| {
        if (index as usize) < vertex_count {
            Ok(index)
        } else {
            Err(CodecError::IndexOutOfRange {
                index,
                vertex_count,
            })
        }
    };

    match indices {
        RawIndices::Flat(flat) => {
            if flat.len() % TRIANGLE_CORNERS != 0 {
                return Err(CodecError::NotTriangulated { count: flat.len() });
            }
            flat.chunks_exact(TRIANGLE_CORNERS)
                .map(|tri| tri.iter().map(|&i| check(i)).collect::<CodecResult<Vec<u32>>>())
                .collect()
        }
        RawIndices::Grouped(groups) => groups
            .iter()
            .enumerate()
            .map(|(face, group)| {
                if group.len() < MIN_POLYGON_CORNERS {
                    return Err(CodecError::DegeneratePolygon {
                        face,
                        corners: group.len(),
                    });
                }
                group.iter().map(|&i| check(i)).collect::<CodecResult<Vec<u32>>>()
            })
            .collect(),
    }
}

/// Decodes PLG JSON text.
///
/// # Errors
///
/// Returns an error only for document-level problems; broken sections are
/// reported in [`DecodedAsset::diagnostics`].
///
/// # Example
///
/// ```rust
/// use plg_codec::decode_str;
///
/// let json = r#"[{"Type":"PlgAsset","Name":"a","Class":"UScriptClass'PlgAsset'",
///     "Properties":{"PlgData":{"PlgDatas":[
///         {"Vertices":[{"X":0,"Y":0,"Z":0},{"X":1,"Y":0,"Z":0},{"X":0,"Y":1,"Z":0}],
///          "Indices":[0,1,2],"Colors":[4294967295,4294967295,0],"Name":"tri"}]}}}]"#;
/// let decoded = decode_str(json).unwrap();
/// assert_eq!(decoded.plans.len(), 1);
/// assert_eq!(decoded.plans[0].faces, vec![vec![0, 1, 2]]);
/// ```
pub fn decode_str(json: &str) -> CodecResult<DecodedAsset> {
    let value: Value = serde_json::from_str(json)?;
    decode_value(&value)
}

/// Decodes an already parsed PLG JSON value.
pub fn decode_value(value: &Value) -> CodecResult<DecodedAsset> {
    let entries = value
        .as_array()
        .ok_or_else(|| CodecError::malformed("top level is not a list"))?;
    let entry = entries
        .first()
        .ok_or_else(|| CodecError::malformed("document contains no asset entry"))?;
    if !entry.is_object() {
        return Err(CodecError::malformed("asset entry is not an object"));
    }

    let sections = entry
        .pointer(PLG_DATAS_POINTER)
        .ok_or_else(|| CodecError::missing("Properties.PlgData.PlgDatas"))?
        .as_array()
        .ok_or_else(|| CodecError::malformed("PlgDatas is not a list"))?;

    let mut decoded = DecodedAsset {
        name: entry
            .get("Name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        section_count: sections.len(),
        ..DecodedAsset::default()
    };

    match entry.get("Type").and_then(Value::as_str) {
        Some(PLG_ASSET_TYPE) => {}
        other => decoded.diagnostics.push(Diagnostic::warning(
            Stage::Decode,
            format!("unexpected asset Type {other:?}, reading it as {PLG_ASSET_TYPE}"),
        )),
    }

    for (index, section) in sections.iter().enumerate() {
        match decode_section(index, section, &mut decoded.diagnostics) {
            Ok(plan) => decoded.plans.push(plan),
            Err(err) => decoded.diagnostics.push(
                Diagnostic::error(Stage::Decode, format!("section skipped: {err}"))
                    .in_section(index),
            ),
        }
    }

    Ok(decoded)
}

/// Decodes one section into a mesh plan.
fn decode_section(
    index: usize,
    value: &Value,
    diagnostics: &mut Vec<Diagnostic>,
) -> CodecResult<MeshPlan> {
    let raw = RawSection::deserialize(value)
        .map_err(|err| CodecError::invalid_section(err.to_string()))?;

    let vertices: Vec<DVec3> = raw.vertices.into_iter().map(DVec3::from).collect();

    let faces = match &raw.indices {
        Some(indices) => build_faces(indices, vertices.len())?,
        None => Vec::new(),
    };

    let raw_colors = raw.colors.unwrap_or_default();
    let mut unreadable = 0usize;
    let colors: Vec<u32> = raw_colors
        .iter()
        .map(|value| {
            packed_color(value).unwrap_or_else(|| {
                unreadable += 1;
                PACKED_UNSET
            })
        })
        .collect();
    if unreadable > 0 {
        diagnostics.push(
            Diagnostic::warning(
                Stage::Decode,
                format!("{unreadable} colors are not packed 32-bit values, read as 0"),
            )
            .in_section(index),
        );
    }

    let (colors, fix) = reconcile_colors(colors, vertices.len());
    match fix {
        ColorFix::Unchanged => {}
        ColorFix::Padded { from, to } => diagnostics.push(
            Diagnostic::warning(
                Stage::Decode,
                format!("{from} colors for {to} vertices, padded with zeros"),
            )
            .in_section(index),
        ),
        ColorFix::Truncated { from, to } => diagnostics.push(
            Diagnostic::warning(
                Stage::Decode,
                format!("{from} colors for {to} vertices, extra colors dropped"),
            )
            .in_section(index),
        ),
    }

    let mut corner_colors = Vec::with_capacity(faces.iter().map(Vec::len).sum());
    let mut face_materials = Vec::with_capacity(faces.len());
    for face in &faces {
        let classes: Vec<CornerClass> = face
            .iter()
            .map(|&v| CornerClass::from_packed(colors[v as usize]))
            .collect();
        corner_colors.extend(classes.iter().map(|c| c.display_color()));
        face_materials.push(classify_face(classes));
    }

    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| default_section_name(index));

    Ok(MeshPlan {
        section_index: index,
        name,
        vertices,
        faces,
        colors,
        corner_colors,
        face_materials,
    })
}

#[cfg(test)]
mod tests;
