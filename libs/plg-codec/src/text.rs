//! # Y-JSON Text Form
//!
//! Flat struct-property text rendering of a PLG document, mirroring the
//! consuming engine's native property syntax:
//!
//! ```text
//! (PlgDatas=((Vertices=((X=0.000000,Y=0.000000,Z=0.000000),...),Indices=(0,1,2),
//!   Colors=(0,0,0),Name="Floor",MinX=0.000000,MinY=0.000000,MaxX=1.000000,MaxY=1.000000),...))
//! ```
//!
//! (wrapped here for readability; the real output has no whitespace at all)
//!
//! The text is rendered from the [`PlgDocument`] model, never from raw
//! geometry, so both files of one export always agree.

use std::fmt::{self, Write};

use config::constants::PLG_DATAS_KEY;

use crate::error::CodecResult;
use crate::wire::{PlgDocument, WireSection, WireVertex};

/// A document rendered as Y-JSON text with a fixed float precision.
///
/// # Example
///
/// ```rust
/// use config::settings::CodecConfig;
/// use plg_codec::text::TextForm;
/// use plg_codec::{encode_asset, PlgAsset};
///
/// let document = encode_asset(&PlgAsset::new("a"), &CodecConfig::default());
/// assert_eq!(TextForm::new(&document, 6).to_string(), "(PlgDatas=())");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextForm<'a> {
    document: &'a PlgDocument,
    precision: usize,
}

impl<'a> TextForm<'a> {
    /// Wraps `document` for rendering with `decimals` fixed decimals.
    pub fn new(document: &'a PlgDocument, decimals: u32) -> Self {
        Self {
            document,
            precision: decimals as usize,
        }
    }
}

impl fmt::Display for TextForm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({PLG_DATAS_KEY}=(")?;
        for (i, section) in self.document.entry().sections().iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write_section(f, section, self.precision)?;
        }
        f.write_str("))")
    }
}

/// Renders the Y-JSON text of a document with `decimals` fixed decimals.
///
/// # Example
///
/// ```rust
/// use config::settings::CodecConfig;
/// use plg_codec::{encode_asset, render_text, PlgAsset, Section};
///
/// let mut asset = PlgAsset::new("a");
/// asset.push(Section::empty("Void"));
/// let text = render_text(&encode_asset(&asset, &CodecConfig::default()), 6);
/// assert_eq!(
///     text,
///     "(PlgDatas=((Vertices=(),Indices=(),Colors=(),Name=\"Void\",MinX=0.000000,MinY=0.000000,MaxX=0.000000,MaxY=0.000000)))"
/// );
/// ```
pub fn render_text(document: &PlgDocument, decimals: u32) -> String {
    TextForm::new(document, decimals).to_string()
}

/// Parses strict PLG JSON and renders its Y-JSON text.
pub fn json_to_text(json: &str, decimals: u32) -> CodecResult<String> {
    let document = PlgDocument::from_json_str(json)?;
    Ok(render_text(&document, decimals))
}

fn write_section(out: &mut impl Write, section: &WireSection, precision: usize) -> fmt::Result {
    out.write_str("(Vertices=(")?;
    for (i, vertex) in section.vertices.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write_vertex(out, vertex, precision)?;
    }

    out.write_str("),Indices=(")?;
    write_joined(out, &section.indices)?;

    out.write_str("),Colors=(")?;
    write_joined(out, &section.colors)?;

    out.write_str("),Name=\"")?;
    write_escaped(out, &section.name)?;
    out.write_char('"')?;

    write!(
        out,
        ",MinX={:.p$},MinY={:.p$},MaxX={:.p$},MaxY={:.p$})",
        section.min_x,
        section.min_y,
        section.max_x,
        section.max_y,
        p = precision
    )
}

fn write_vertex(out: &mut impl Write, vertex: &WireVertex, precision: usize) -> fmt::Result {
    write!(
        out,
        "(X={:.p$},Y={:.p$},Z={:.p$})",
        vertex.x,
        vertex.y,
        vertex.z,
        p = precision
    )
}

fn write_joined(out: &mut impl Write, values: &[u32]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write!(out, "{value}")?;
    }
    Ok(())
}

/// Escapes the characters that would end a quoted property string.
fn write_escaped(out: &mut impl Write, name: &str) -> fmt::Result {
    for c in name.chars() {
        if c == '"' || c == '\\' {
            out.write_char('\\')?;
        }
        out.write_char(c)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{PlgAsset, Section};
    use crate::wire::encode_asset;
    use config::constants::{PACKED_BLACK, PACKED_WHITE};
    use config::settings::CodecConfig;
    use glam::DVec3;

    fn two_section_document() -> PlgDocument {
        let mut asset = PlgAsset::new("Test");
        asset.push(Section::new(
            "A",
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.5),
            ],
            vec![0, 1, 2],
            vec![PACKED_WHITE, PACKED_BLACK, 0],
        ));
        asset.push(Section::empty("Empty"));
        encode_asset(&asset, &CodecConfig::default())
    }

    #[test]
    fn test_two_section_literal_output() {
        let expected = concat!(
            "(PlgDatas=(",
            "(Vertices=((X=0.000000,Y=0.000000,Z=0.000000),",
            "(X=1.000000,Y=0.000000,Z=0.000000),",
            "(X=0.000000,Y=1.000000,Z=0.500000)),",
            "Indices=(0,1,2),",
            "Colors=(4294967295,4294967040,0),",
            "Name=\"A\",MinX=0.000000,MinY=0.000000,MaxX=1.000000,MaxY=1.000000),",
            "(Vertices=(),Indices=(),Colors=(),",
            "Name=\"Empty\",MinX=0.000000,MinY=0.000000,MaxX=0.000000,MaxY=0.000000)",
            "))"
        );
        assert_eq!(render_text(&two_section_document(), 6), expected);
    }

    #[test]
    fn test_no_whitespace_or_scientific_notation() {
        let mut asset = PlgAsset::new("big");
        asset.push(Section::new(
            "far",
            vec![DVec3::new(1.0e9, -2.5e-3, 123_456.789)],
            vec![],
            vec![],
        ));
        let text = render_text(&encode_asset(&asset, &CodecConfig::default()), 6);
        assert!(!text.contains(char::is_whitespace));
        assert!(!text.contains("e+") && !text.contains("e-") && !text.contains("e9"));
        assert!(text.contains("X=1000000000.000000"));
        assert!(text.contains("Y=-0.002500"));
    }

    #[test]
    fn test_no_sections() {
        let asset = PlgAsset::new("none");
        let text = render_text(&encode_asset(&asset, &CodecConfig::default()), 6);
        assert_eq!(text, "(PlgDatas=())");
    }

    #[test]
    fn test_name_quotes_are_escaped() {
        let mut asset = PlgAsset::new("q");
        asset.push(Section::empty("say \"hi\""));
        let text = render_text(&encode_asset(&asset, &CodecConfig::default()), 6);
        assert!(text.contains(r#"Name="say \"hi\"""#));
    }

    /// Accepts at most `budget` bytes, then fails every write.
    struct LimitedWriter {
        written: String,
        budget: usize,
    }

    impl Write for LimitedWriter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if self.written.len() + s.len() > self.budget {
                return Err(fmt::Error);
            }
            self.written.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        let document = two_section_document();
        let section = &document.entry().sections()[0];
        let mut out = LimitedWriter {
            written: String::new(),
            budget: 20,
        };
        assert_eq!(write_section(&mut out, section, 6), Err(fmt::Error));
        assert!(out.written.len() <= 20);

        let mut out = LimitedWriter {
            written: String::new(),
            budget: usize::MAX,
        };
        assert_eq!(write_section(&mut out, section, 6), Ok(()));
        assert!(out.written.ends_with("MaxY=1.000000)"));
    }

    #[test]
    fn test_text_form_display_matches_render() {
        let document = two_section_document();
        let embedded = format!("[{}]", TextForm::new(&document, 2));
        assert_eq!(embedded, format!("[{}]", render_text(&document, 2)));
        assert!(embedded.contains("(X=0.00,Y=1.00,Z=0.50)"));
    }

    #[test]
    fn test_json_to_text_matches_render() {
        let document = two_section_document();
        let json = document.to_json_string().unwrap();
        assert_eq!(json_to_text(&json, 6).unwrap(), render_text(&document, 6));
    }
}
