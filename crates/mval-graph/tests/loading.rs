//! Loading model documents from disk.

use std::fs;

use mval_core::{ModelElement, ModelGraph};
use mval_graph::{GraphError, Model};

const YAML: &str = "\
types:
  - name: LogicalComponent
elements:
  - type: LogicalComponent
    name: Flight Computer
";

#[test]
fn loads_yaml_and_yml_files() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["model.yaml", "model.YML"] {
        let path = dir.path().join(name);
        fs::write(&path, YAML).unwrap();
        let model = Model::from_path(&path).unwrap();
        assert_eq!(model.len(), 1);
        let element = model.elements().next().unwrap();
        assert_eq!(element.type_name(), "LogicalComponent");
    }
}

#[test]
fn loads_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    fs::write(
        &path,
        r#"{"types": [{"name": "Capability"}], "elements": [{"type": "Capability", "name": "Fly"}]}"#,
    )
    .unwrap();
    let model = Model::from_path(&path).unwrap();
    let fly = model.iter().next().unwrap();
    assert_eq!(fly.name, "Fly");
    assert!(model.by_uuid(&fly.uuid()).is_some());
}

#[test]
fn rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.toml");
    fs::write(&path, YAML).unwrap();
    assert!(matches!(
        Model::from_path(&path),
        Err(GraphError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = Model::from_path(&path).unwrap_err();
    assert!(matches!(err, GraphError::Io { .. }));
    assert!(format!("{err}").contains("absent.yaml"));
}

#[test]
fn malformed_yaml_is_a_yaml_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "types: {not: a list}\n").unwrap();
    assert!(matches!(Model::from_path(&path), Err(GraphError::Yaml(_))));
}
