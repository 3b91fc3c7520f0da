//! # PLG Scene
//!
//! Scene-facing export and import for the PLG mesh format.
//!
//! ## Architecture
//!
//! ```text
//! SceneSource → extract (triangulate, round, tag colors) → plg-codec → .json (+ .txt)
//! .json → plg-codec (decode, classify) → import → SceneBuilder
//! ```
//!
//! The host scene is injected through the [`scene::SceneSource`] and
//! [`scene::SceneBuilder`] traits. [`scene::InMemoryScene`] implements both.
//!
//! ## Example
//!
//! ```rust
//! use plg_scene::import_json;
//! use plg_scene::scene::InMemoryScene;
//!
//! let json = r#"[{"Type":"PlgAsset","Name":"a","Class":"UScriptClass'PlgAsset'",
//!     "Properties":{"PlgData":{"PlgDatas":[
//!         {"Vertices":[{"X":0,"Y":0,"Z":0},{"X":1,"Y":0,"Z":0},{"X":0,"Y":1,"Z":0}],
//!          "Indices":[0,1,2],"Colors":[4294967295,4294967295,0],"Name":"tri"}]}}}]"#;
//!
//! let mut scene = InMemoryScene::new();
//! let report = import_json(&mut scene, "Level01", json).unwrap();
//! assert_eq!(report.objects.len(), 1);
//! assert_eq!(report.objects[0].white_faces, 1);
//! ```

pub mod diagnostics;
pub mod error;
pub mod export;
pub mod extract;
pub mod import;
pub mod scene;

pub use error::{SceneError, SceneResult};
pub use export::{export, export_with, ExportReport};
pub use extract::{extract_collection, extract_section};
pub use import::{import, import_json, ImportReport, MaterialPair};
