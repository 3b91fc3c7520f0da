//! # PLG JSON Document
//!
//! Serde model of the PLG JSON file and the encode direction from
//! [`PlgAsset`] to that model.
//!
//! ## Shape
//!
//! ```text
//! [
//!   {
//!     "Type": "PlgAsset",
//!     "Name": <asset name>,
//!     "Class": "UScriptClass'PlgAsset'",
//!     "Properties": { "PlgData": { "PlgDatas": [ <section>, ... ] } }
//!   }
//! ]
//! ```
//!
//! Field order is part of the format and follows struct declaration order.

use config::constants::{default_section_name, round_to_decimals, PLG_ASSET_CLASS, PLG_ASSET_TYPE};
use config::settings::CodecConfig;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::section::{Bounds2, PlgAsset, Section};

/// One vertex position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct WireVertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<DVec3> for WireVertex {
    fn from(v: DVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<WireVertex> for DVec3 {
    fn from(v: WireVertex) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

/// One section as it appears in the `PlgDatas` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireSection {
    pub vertices: Vec<WireVertex>,
    pub indices: Vec<u32>,
    pub colors: Vec<u32>,
    pub name: String,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl WireSection {
    /// Builds the wire form of `section`, rounding coordinates to `decimals`
    /// places and naming unnamed sections after their `index`.
    ///
    /// Bounds are recomputed from the rounded positions so both always agree.
    pub fn from_section(section: &Section, index: usize, decimals: u32) -> Self {
        let vertices: Vec<DVec3> = section
            .vertices
            .iter()
            .map(|v| {
                DVec3::new(
                    round_to_decimals(v.x, decimals),
                    round_to_decimals(v.y, decimals),
                    round_to_decimals(v.z, decimals),
                )
            })
            .collect();
        let bounds = Bounds2::from_points(&vertices);

        let name = if section.name.is_empty() {
            default_section_name(index)
        } else {
            section.name.clone()
        };

        Self {
            vertices: vertices.into_iter().map(WireVertex::from).collect(),
            indices: section.indices.clone(),
            colors: section.colors.clone(),
            name,
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            max_x: bounds.max_x,
            max_y: bounds.max_y,
        }
    }

    /// Returns the bounds stored in this entry.
    pub fn bounds(&self) -> Bounds2 {
        Bounds2 {
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.max_x,
            max_y: self.max_y,
        }
    }
}

/// `Properties.PlgData` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlgData {
    pub plg_datas: Vec<WireSection>,
}

/// `Properties` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetProperties {
    pub plg_data: PlgData,
}

/// The single entry of the outer list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "Properties")]
    pub properties: AssetProperties,
}

impl AssetEntry {
    /// Returns the encoded sections.
    pub fn sections(&self) -> &[WireSection] {
        &self.properties.plg_data.plg_datas
    }
}

/// A complete PLG JSON document.
///
/// Serializes as a one-element list; deserializing an empty list fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AssetEntry>", into = "Vec<AssetEntry>")]
pub struct PlgDocument {
    entries: Vec<AssetEntry>,
}

impl TryFrom<Vec<AssetEntry>> for PlgDocument {
    type Error = CodecError;

    fn try_from(entries: Vec<AssetEntry>) -> Result<Self, Self::Error> {
        if entries.is_empty() {
            return Err(CodecError::malformed("document contains no asset entry"));
        }
        Ok(Self { entries })
    }
}

impl From<PlgDocument> for Vec<AssetEntry> {
    fn from(document: PlgDocument) -> Self {
        document.entries
    }
}

impl PlgDocument {
    /// Wraps one asset entry.
    pub fn new(entry: AssetEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Returns the asset entry.
    pub fn entry(&self) -> &AssetEntry {
        &self.entries[0]
    }

    /// Serializes with 2-space indentation.
    pub fn to_json_string(&self) -> CodecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document that follows the encoder's schema exactly.
    ///
    /// Use [`crate::decode`] for lenient, section-tolerant reading.
    pub fn from_json_str(json: &str) -> CodecResult<Self> {
        let entries: Vec<AssetEntry> = serde_json::from_str(json)?;
        Self::try_from(entries)
    }
}

/// Encodes an asset into the PLG JSON document model.
///
/// Every section is kept, including empty ones, so section indices survive
/// the round trip.
///
/// # Example
///
/// ```rust
/// use config::settings::CodecConfig;
/// use plg_codec::{encode_asset, PlgAsset, Section};
///
/// let mut asset = PlgAsset::new("Level01");
/// asset.push(Section::empty(""));
/// let document = encode_asset(&asset, &CodecConfig::default());
/// assert_eq!(document.entry().sections()[0].name, "PLG_Section_0");
/// ```
pub fn encode_asset(asset: &PlgAsset, config: &CodecConfig) -> PlgDocument {
    let plg_datas = asset
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| WireSection::from_section(section, index, config.json_decimals))
        .collect();

    PlgDocument::new(AssetEntry {
        kind: PLG_ASSET_TYPE.to_string(),
        name: asset.name.clone(),
        class: PLG_ASSET_CLASS.to_string(),
        properties: AssetProperties {
            plg_data: PlgData { plg_datas },
        },
    })
}

/// Encodes an asset straight to PLG JSON text.
pub fn encode_json(asset: &PlgAsset, config: &CodecConfig) -> CodecResult<String> {
    encode_asset(asset, config).to_json_string()
}
