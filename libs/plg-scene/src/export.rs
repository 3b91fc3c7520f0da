//! # Export
//!
//! Scene collection → PLG JSON file (plus optional Y-JSON sidecar).
//!
//! Everything is encoded in memory before the first byte is written, so a
//! user error (nothing selected, ungrouped object, bad mesh) leaves the
//! file system untouched.

use std::path::{Path, PathBuf};

use config::constants::{JSON_EXTENSION, TEXT_EXTENSION};
use config::settings::CodecConfig;
use plg_codec::{encode_asset, json_to_text, render_text};
use plg_types::Diagnostic;

use crate::diagnostics::log_diagnostics;
use crate::error::{SceneError, SceneResult};
use crate::extract::extract_collection;
use crate::scene::SceneSource;

/// Returns `path` with `.json` appended unless it already ends in `.json`.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use plg_scene::export::json_output_path;
///
/// assert_eq!(json_output_path(Path::new("out/level")), Path::new("out/level.json"));
/// assert_eq!(json_output_path(Path::new("level.JSON")), Path::new("level.JSON"));
/// assert_eq!(json_output_path(Path::new("level.v2")), Path::new("level.v2.json"));
/// ```
pub fn json_output_path(path: &Path) -> PathBuf {
    let has_json_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(JSON_EXTENSION));
    if has_json_extension {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(JSON_EXTENSION);
    PathBuf::from(name)
}

/// Returns the Y-JSON sidecar path for a JSON output path.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use plg_scene::export::sidecar_path;
///
/// assert_eq!(sidecar_path(Path::new("out/level.json")), Path::new("out/level.txt"));
/// ```
pub fn sidecar_path(json_path: &Path) -> PathBuf {
    json_path.with_extension(TEXT_EXTENSION)
}

/// Encoded export output that has not been written yet.
#[derive(Debug, Clone)]
pub struct EncodedExport {
    /// Collection name, used as the asset name.
    pub asset_name: String,
    pub json: String,
    /// Y-JSON text, present when the sidecar was requested.
    pub text: Option<String>,
    pub section_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Extracts and encodes the active object's collection.
pub fn encode_collection<S: SceneSource>(
    scene: &mut S,
    config: &CodecConfig,
) -> SceneResult<EncodedExport> {
    let extraction = extract_collection(scene, config)?;
    let document = encode_asset(&extraction.asset, config);
    let json = document.to_json_string()?;
    let text = config
        .emit_text_sidecar
        .then(|| render_text(&document, config.text_decimals));

    Ok(EncodedExport {
        asset_name: extraction.asset.name.clone(),
        json,
        text,
        section_count: extraction.asset.section_count(),
        diagnostics: extraction.diagnostics,
    })
}

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub asset_name: String,
    pub json_path: PathBuf,
    /// Set when a Y-JSON sidecar was written.
    pub text_path: Option<PathBuf>,
    pub section_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Exports the active object's collection with the default codec settings.
///
/// # Errors
///
/// Returns [`SceneError::NoActiveObject`] or [`SceneError::NotInCollection`]
/// for selection problems, and an I/O error if a file cannot be written.
pub fn export<S: SceneSource>(
    scene: &mut S,
    output_path: impl AsRef<Path>,
    emit_text_sidecar: bool,
) -> SceneResult<ExportReport> {
    let config = CodecConfig::default().with_text_sidecar(emit_text_sidecar);
    export_with(scene, output_path.as_ref(), &config)
}

/// Exports the active object's collection with explicit codec settings.
pub fn export_with<S: SceneSource>(
    scene: &mut S,
    output_path: &Path,
    config: &CodecConfig,
) -> SceneResult<ExportReport> {
    let encoded = encode_collection(scene, config)?;

    let json_path = json_output_path(output_path);
    std::fs::write(&json_path, &encoded.json).map_err(|e| SceneError::io(&json_path, e))?;

    let text_path = match &encoded.text {
        Some(text) => {
            let path = sidecar_path(&json_path);
            std::fs::write(&path, text).map_err(|e| SceneError::io(&path, e))?;
            Some(path)
        }
        None => None,
    };

    log_diagnostics(&encoded.diagnostics);
    tracing::info!(
        "Exported {} sections from '{}' to {}",
        encoded.section_count,
        encoded.asset_name,
        json_path.display()
    );

    Ok(ExportReport {
        asset_name: encoded.asset_name,
        json_path,
        text_path,
        section_count: encoded.section_count,
        diagnostics: encoded.diagnostics,
    })
}

/// Writes the Y-JSON sidecar for an existing PLG JSON file.
///
/// Returns the path of the written text file.
pub fn write_sidecar(json_path: &Path, config: &CodecConfig) -> SceneResult<PathBuf> {
    let json = std::fs::read_to_string(json_path).map_err(|e| SceneError::io(json_path, e))?;
    let text = json_to_text(&json, config.text_decimals)?;
    let path = sidecar_path(json_path);
    std::fs::write(&path, text).map_err(|e| SceneError::io(&path, e))?;
    tracing::info!("Wrote sidecar {}", path.display());
    Ok(path)
}
