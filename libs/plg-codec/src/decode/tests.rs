//! Tests for the decode direction.

use super::*;
use crate::section::PlgAsset;
use crate::wire::encode_asset;
use config::constants::{PACKED_BLACK, PACKED_WHITE};
use config::settings::CodecConfig;
use plg_types::Severity;
use serde_json::json;

fn document(sections: Value) -> Value {
    json!([{
        "Type": "PlgAsset",
        "Name": "Test",
        "Class": "UScriptClass'PlgAsset'",
        "Properties": { "PlgData": { "PlgDatas": sections } }
    }])
}

fn triangle(name: &str, indices: Value) -> Value {
    json!({
        "Vertices": [
            { "X": 0.0, "Y": 0.0, "Z": 0.0 },
            { "X": 1.0, "Y": 0.0, "Z": 0.0 },
            { "X": 0.0, "Y": 1.0, "Z": 0.0 }
        ],
        "Indices": indices,
        "Colors": [0, 0, 0],
        "Name": name
    })
}

/// A broken middle section is skipped; its neighbours still decode.
#[test]
fn out_of_range_section_is_isolated() {
    let value = document(json!([
        triangle("first", json!([0, 1, 2])),
        triangle("broken", json!([0, 1, 7])),
        triangle("third", json!([2, 1, 0])),
    ]));

    let decoded = decode_value(&value).expect("document-level decode succeeds");

    let names: Vec<_> = decoded.plans.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["first", "third"]);
    assert_eq!(decoded.section_count, 3);
    assert_eq!(decoded.skipped_sections(), vec![1]);

    let errors: Vec<_> = decoded.diagnostics.iter().filter(|d| d.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].section, Some(1));
    assert!(errors[0].message.contains("out of range"));
}

#[test]
fn partial_triangle_is_a_section_error() {
    let value = document(json!([triangle("short", json!([0, 1, 2, 0]))]));
    let decoded = decode_value(&value).unwrap();
    assert!(decoded.plans.is_empty());
    assert_eq!(decoded.diagnostics.len(), 1);
    assert!(decoded.diagnostics[0].message.contains("multiple of 3"));
}

#[test]
fn mixed_index_shapes_are_a_section_error() {
    let value = document(json!([triangle("mixed", json!([0, [1, 2]]))]));
    let decoded = decode_value(&value).unwrap();
    assert!(decoded.plans.is_empty());
    assert_eq!(decoded.diagnostics[0].severity, Severity::Error);
}

#[test]
fn grouped_indices_become_polygons() {
    let value = document(json!([{
        "Vertices": [
            { "X": 0, "Y": 0, "Z": 0 },
            { "X": 1, "Y": 0, "Z": 0 },
            { "X": 1, "Y": 1, "Z": 0 },
            { "X": 0, "Y": 1, "Z": 0 }
        ],
        "Indices": [[0, 1, 2, 3]],
        "Colors": [0, 0, 0, 0]
    }]));

    let decoded = decode_value(&value).unwrap();
    let plan = &decoded.plans[0];
    assert_eq!(plan.faces, vec![vec![0, 1, 2, 3]]);
    assert!(!plan.is_triangulated());
    assert_eq!(plan.corner_colors.len(), 4);
    assert!(plan.to_section().is_err());
}

#[test]
fn polygon_with_two_corners_is_rejected() {
    let faces = build_faces(&RawIndices::Grouped(vec![vec![0, 1]]), 3);
    assert!(matches!(
        faces,
        Err(CodecError::DegeneratePolygon { face: 0, corners: 2 })
    ));
}

/// Short color lists are padded and never fail the section.
#[test]
fn short_colors_are_padded_with_warning() {
    let mut section = triangle("t", json!([0, 1, 2]));
    section["Colors"] = json!([PACKED_WHITE]);
    let decoded = decode_value(&document(json!([section]))).unwrap();

    let plan = &decoded.plans[0];
    assert_eq!(plan.colors, vec![PACKED_WHITE, 0, 0]);
    assert_eq!(plan.colors.len(), plan.vertices.len());
    assert_eq!(decoded.diagnostics.len(), 1);
    assert_eq!(decoded.diagnostics[0].severity, Severity::Warning);
    assert!(decoded.diagnostics[0].message.contains("padded"));
}

#[test]
fn missing_colors_are_padded() {
    let mut section = triangle("t", json!([0, 1, 2]));
    section.as_object_mut().unwrap().remove("Colors");
    let decoded = decode_value(&document(json!([section]))).unwrap();
    assert_eq!(decoded.plans[0].colors, vec![0, 0, 0]);
}

#[test]
fn reconcile_is_idempotent() {
    let (once, _) = reconcile_colors(vec![1, 2], 5);
    let (twice, fix) = reconcile_colors(once.clone(), 5);
    assert_eq!(once, twice);
    assert_eq!(fix, ColorFix::Unchanged);
}

#[test]
fn missing_indices_yield_loose_vertices() {
    let mut section = triangle("points", json!([]));
    section.as_object_mut().unwrap().remove("Indices");
    let decoded = decode_value(&document(json!([section]))).unwrap();
    assert!(decoded.plans[0].faces.is_empty());
    assert!(decoded.diagnostics.is_empty());
}

#[test]
fn missing_vertices_is_a_section_error() {
    let decoded = decode_value(&document(json!([{ "Indices": [0, 1, 2] }]))).unwrap();
    assert!(decoded.plans.is_empty());
    assert_eq!(decoded.diagnostics.len(), 1);
}

#[test]
fn unnamed_sections_get_index_names() {
    let mut section = triangle("", json!([0, 1, 2]));
    let decoded = decode_value(&document(json!([section.clone()]))).unwrap();
    assert_eq!(decoded.plans[0].name, "PLG_Section_0");
    assert_eq!(decoded.plans[0].mesh_data_name(), "PLG_Section_0_mesh");

    section.as_object_mut().unwrap().remove("Name");
    let decoded = decode_value(&document(json!([triangle("a", json!([])), section]))).unwrap();
    assert_eq!(decoded.plans[1].name, "PLG_Section_1");
}

/// One white, one black and one untagged corner resolve to black.
#[test]
fn tie_break_assigns_black_material() {
    let mut section = triangle("t", json!([0, 1, 2]));
    section["Colors"] = json!([PACKED_WHITE, PACKED_BLACK, 0]);
    let decoded = decode_value(&document(json!([section]))).unwrap();

    let plan = &decoded.plans[0];
    assert_eq!(plan.face_materials, vec![MaterialSlot::Black]);
    assert_eq!(
        plan.corner_colors,
        vec![[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 1.0], [0.5, 0.5, 0.5, 1.0]]
    );
}

#[test]
fn white_majority_assigns_white_material() {
    let mut section = triangle("t", json!([0, 1, 2, 2, 1, 0]));
    section["Colors"] = json!([PACKED_WHITE, PACKED_WHITE, PACKED_BLACK]);
    let decoded = decode_value(&document(json!([section]))).unwrap();
    let plan = &decoded.plans[0];
    assert_eq!(plan.faces_with(MaterialSlot::White), 2);
    assert_eq!(plan.faces_with(MaterialSlot::Black), 0);
}

#[test]
fn envelope_errors_are_fatal() {
    assert!(matches!(decode_str("{not json"), Err(CodecError::Json(_))));
    assert!(matches!(
        decode_str(r#"{"Type":"PlgAsset"}"#),
        Err(CodecError::MalformedDocument { .. })
    ));
    assert!(matches!(decode_str("[]"), Err(CodecError::MalformedDocument { .. })));
    assert!(matches!(
        decode_str(r#"[{"Type":"PlgAsset","Properties":{}}]"#),
        Err(CodecError::MissingField { .. })
    ));
    assert!(matches!(
        decode_str(r#"[{"Properties":{"PlgData":{"PlgDatas":7}}}]"#),
        Err(CodecError::MalformedDocument { .. })
    ));
}

#[test]
fn unexpected_type_is_only_a_warning() {
    let mut value = document(json!([]));
    value[0]["Type"] = json!("SomethingElse");
    let decoded = decode_value(&value).unwrap();
    assert_eq!(decoded.diagnostics.len(), 1);
    assert_eq!(decoded.diagnostics[0].severity, Severity::Warning);
    assert_eq!(decoded.name, "Test");
}

/// encode(decode(json)) reproduces the sections of a well-formed document.
#[test]
fn encode_decode_round_trip() {
    let mut asset = PlgAsset::new("Round");
    asset.push(Section::new(
        "quad",
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.5, 0.0, 0.25),
            DVec3::new(2.5, 1.125, 0.0),
            DVec3::new(0.0, 1.125, -1.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
        vec![PACKED_WHITE, PACKED_BLACK, 0, 0xFF12_3456],
    ));
    asset.push(Section::empty("nothing"));

    let config = CodecConfig::default();
    let json = encode_asset(&asset, &config).to_json_string().unwrap();

    let decoded = decode_str(&json).unwrap();
    assert!(decoded.diagnostics.is_empty());
    assert_eq!(decoded.name, "Round");

    let mut again = PlgAsset::new(decoded.name.clone());
    for plan in &decoded.plans {
        again.push(plan.to_section().unwrap());
    }
    assert_eq!(again, asset);
    assert_eq!(encode_asset(&again, &config).to_json_string().unwrap(), json);
}

/// Color values outside `u32` never cost the section its geometry.
#[test]
fn unreadable_colors_become_neutral() {
    let mut negative = triangle("negative", json!([0, 1, 2]));
    negative["Colors"] = json!([-1, 0, "white"]);
    let mut float_white = triangle("float", json!([0, 1, 2]));
    float_white["Colors"] = json!([4294967295.0, 4294967295.0, 0]);

    let decoded = decode_value(&document(json!([negative, float_white]))).unwrap();

    assert_eq!(decoded.plans.len(), 2);
    assert_eq!(decoded.plans[0].colors, vec![0, 0, 0]);
    assert_eq!(decoded.plans[0].face_materials, vec![MaterialSlot::Black]);
    assert_eq!(decoded.plans[1].colors, vec![PACKED_WHITE, PACKED_WHITE, 0]);
    assert_eq!(decoded.plans[1].face_materials, vec![MaterialSlot::White]);

    assert_eq!(decoded.diagnostics.len(), 1);
    assert_eq!(decoded.diagnostics[0].severity, Severity::Warning);
    assert_eq!(decoded.diagnostics[0].section, Some(0));
    assert!(decoded.diagnostics[0].message.contains("2 colors"));
}

#[test]
fn packed_color_accepts_only_integral_u32_values() {
    assert_eq!(packed_color(&json!(PACKED_BLACK)), Some(PACKED_BLACK));
    assert_eq!(packed_color(&json!(4294967040.0)), Some(PACKED_BLACK));
    assert_eq!(packed_color(&json!(4294967296u64)), None);
    assert_eq!(packed_color(&json!(1.5)), None);
    assert_eq!(packed_color(&json!(null)), None);
}

/// A skipped section reports its skip and nothing else.
#[test]
fn skipped_section_has_a_single_diagnostic() {
    let mut section = triangle("broken", json!([0, 1, 7]));
    section["Colors"] = json!([PACKED_WHITE]);
    let decoded = decode_value(&document(json!([section]))).unwrap();

    assert!(decoded.plans.is_empty());
    assert_eq!(decoded.diagnostics.len(), 1);
    assert_eq!(decoded.diagnostics[0].severity, Severity::Error);
}
