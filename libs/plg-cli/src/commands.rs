//! Command implementations.
//!
//! Each command writes its human-readable output to `out` so it can be
//! checked in tests.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use config::settings::{CodecConfig, ColorSource};
use plg_codec::{decode_str, MaterialSlot};
use plg_scene::export::write_sidecar;
use plg_scene::import::read_plg_file;
use plg_scene::scene::InMemoryScene;
use plg_scene::{export_with, import};
use plg_types::{count_severity, Diagnostic, Severity};

/// Prints a per-section summary of a PLG file without building a scene.
pub fn inspect(path: &Path, out: &mut impl Write) -> Result<()> {
    let json = read_plg_file(path)?;
    let decoded =
        decode_str(&json).with_context(|| format!("Failed to decode {}", path.display()))?;

    writeln!(
        out,
        "Asset '{}': {} sections",
        decoded.name, decoded.section_count
    )?;
    for plan in &decoded.plans {
        let bounds = plan.bounds();
        writeln!(
            out,
            "  [{}] {}: {} vertices, {} faces ({} white, {} black), bounds ({}, {})..({}, {})",
            plan.section_index,
            plan.name,
            plan.vertices.len(),
            plan.face_count(),
            plan.faces_with(MaterialSlot::White),
            plan.faces_with(MaterialSlot::Black),
            bounds.min_x,
            bounds.min_y,
            bounds.max_x,
            bounds.max_y
        )?;
    }
    write_diagnostics(out, &decoded.diagnostics)
}

/// Imports a PLG file into an in-memory scene and prints what was built.
pub fn import_file(path: &Path, out: &mut impl Write) -> Result<()> {
    let mut scene = InMemoryScene::new();
    let report =
        import(&mut scene, path).with_context(|| format!("Failed to import {}", path.display()))?;

    writeln!(
        out,
        "Collection '{}': {} of {} sections imported",
        report.collection_name,
        report.objects.len(),
        report.section_count
    )?;
    for object in &report.objects {
        let mesh_name = scene
            .mesh(object.object)
            .map(|m| m.data_name.as_str())
            .unwrap_or_default();
        writeln!(
            out,
            "  [{}] {} ({}): {} vertices, {} faces, {} white",
            object.section_index,
            object.name,
            mesh_name,
            object.vertex_count,
            object.face_count,
            object.white_faces
        )?;
    }
    for material in scene.materials() {
        writeln!(out, "  material {} {:?}", material.name, material.rgba)?;
    }
    write_diagnostics(out, &report.diagnostics)
}

/// Writes the Y-JSON sidecar next to an existing PLG JSON file.
pub fn sidecar(path: &Path, text_decimals: u32, out: &mut impl Write) -> Result<()> {
    let config = codec_config(ColorSource::default(), text_decimals)?;
    let written = write_sidecar(path, &config)
        .with_context(|| format!("Failed to write sidecar for {}", path.display()))?;
    writeln!(out, "Wrote {}", written.display())?;
    Ok(())
}

/// Options of the `reencode` command.
#[derive(Debug, Clone, Copy)]
pub struct ReencodeOptions {
    pub emit_text: bool,
    pub color_source: ColorSource,
    pub text_decimals: u32,
}

/// Imports a PLG file, then exports the imported collection again.
pub fn reencode(
    input: &Path,
    output: &Path,
    options: ReencodeOptions,
    out: &mut impl Write,
) -> Result<()> {
    let config = codec_config(options.color_source, options.text_decimals)?
        .with_text_sidecar(options.emit_text);

    let mut scene = InMemoryScene::new();
    let imported = import(&mut scene, input)
        .with_context(|| format!("Failed to import {}", input.display()))?;
    let Some(first) = imported.objects.first() else {
        bail!("Nothing to export: no section of {} was imported", input.display());
    };
    scene.set_active(Some(first.object));

    let exported = export_with(&mut scene, output, &config)
        .with_context(|| format!("Failed to export {}", output.display()))?;

    writeln!(
        out,
        "Re-encoded {} sections ({} colors) to {}",
        exported.section_count,
        config.color_source,
        exported.json_path.display()
    )?;
    if let Some(text_path) = &exported.text_path {
        writeln!(out, "Wrote {}", text_path.display())?;
    }

    let mut diagnostics = imported.diagnostics;
    diagnostics.extend(exported.diagnostics);
    write_diagnostics(out, &diagnostics)
}

fn codec_config(color_source: ColorSource, text_decimals: u32) -> Result<CodecConfig> {
    let defaults = CodecConfig::default();
    CodecConfig::new(color_source, defaults.json_decimals, text_decimals)
        .context("Invalid codec settings")
}

fn write_diagnostics(out: &mut impl Write, diagnostics: &[Diagnostic]) -> Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "{} errors, {} warnings",
        count_severity(diagnostics, Severity::Error),
        count_severity(diagnostics, Severity::Warning)
    )?;
    for diagnostic in diagnostics {
        writeln!(out, "  {diagnostic}")?;
    }
    Ok(())
}
