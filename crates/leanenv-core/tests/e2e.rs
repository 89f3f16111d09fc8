//! End-to-end clone runs against the mock exporter.

use leanenv_core::{CloneEngine, CloneRequest};
use leanenv_export::{CondaInstall, ExportView, MockExporter};
use leanenv_schema::{parse_descriptor_file, Dependency};
use std::fs;
use std::path::Path;

fn install_with_env(root: &Path, env: &str) -> CondaInstall {
    fs::create_dir_all(root.join("envs").join(env)).unwrap();
    CondaInstall::at(root, root.join(".condarc"))
}

#[test]
fn lean_clone_of_ds310_to_ds39() {
    let dir = tempfile::tempdir().unwrap();
    let install = install_with_env(dir.path(), "ds310");
    let engine = CloneEngine::new(install, Box::new(MockExporter::new()));

    let mut request = CloneRequest::new("3.10", "3.9", "ds310");
    request.new_env_name = "ds39".to_owned();
    request.output_dir = Some(dir.path().to_path_buf());

    let outcome = engine.clone_env(&request).unwrap();

    assert_eq!(outcome.env_name, "ds39");
    assert_eq!(
        outcome.output_path,
        dir.path().join("lean_ds39_from_ds310.yml")
    );

    let saved = parse_descriptor_file(&outcome.output_path).unwrap();
    assert_eq!(saved.name, "ds39");
    assert_eq!(saved.dependencies[0].as_spec(), Some("python=3.9"));
    assert_eq!(saved.dependencies[1].as_spec(), Some("pip"));
    assert!(saved
        .prefix
        .as_deref()
        .unwrap()
        .ends_with("envs/ds39"));

    // stale kernel pin gone, packaging tools in, pip block last with
    // exact pins stripped
    let specs: Vec<_> = saved
        .dependencies
        .iter()
        .filter_map(Dependency::as_spec)
        .collect();
    assert!(!specs.contains(&"python=3.10"));
    assert!(specs.contains(&"setuptools"));
    assert!(specs.contains(&"wheel"));
    let Some(Dependency::Pip(block)) = saved.dependencies.last() else {
        panic!("pip block should be the final entry");
    };
    assert_eq!(block.pip, vec!["networkx", "requests>=2.28"]);
}

#[test]
fn condarc_false_suppresses_packaging_tools() {
    let dir = tempfile::tempdir().unwrap();
    let install = install_with_env(dir.path(), "ds310");
    fs::write(
        dir.path().join(".condarc"),
        "add_pip_as_python_dependency: false\n",
    )
    .unwrap();
    let engine = CloneEngine::new(install, Box::new(MockExporter::new()));

    let mut request = CloneRequest::new("3.10", "3.9", "ds310");
    request.output_dir = Some(dir.path().to_path_buf());

    let outcome = engine.clone_env(&request).unwrap();
    let specs: Vec<_> = outcome
        .descriptor
        .dependencies
        .iter()
        .filter_map(Dependency::as_spec)
        .collect();
    assert!(!specs.contains(&"setuptools"));
    assert!(!specs.contains(&"wheel"));
    assert!(specs.contains(&"pip"));
}

#[test]
fn rerunning_the_same_request_is_safe() {
    let dir = tempfile::tempdir().unwrap();
    let install = install_with_env(dir.path(), "ds310");
    let engine = CloneEngine::new(install, Box::new(MockExporter::new()));

    let mut request = CloneRequest::new("3.10", "3.9", "ds310");
    request.output_dir = Some(dir.path().to_path_buf());

    let first = engine.clone_env(&request).unwrap();
    let second = engine.clone_env(&request).unwrap();
    assert_eq!(first.output_path, second.output_path);
    assert_eq!(first.descriptor, second.descriptor);
}

#[test]
fn empty_history_export_is_a_valid_minimal_environment() {
    let dir = tempfile::tempdir().unwrap();
    let install = install_with_env(dir.path(), "tiny");
    let exporter = MockExporter::new()
        .with_canned(
            "tiny",
            ExportView::NoBuildStrings,
            "name: tiny\ndependencies:\n  - python=3.10.9\nprefix: /opt/conda/envs/tiny\n",
        )
        .with_canned("tiny", ExportView::FromHistory, "name: tiny\ndependencies: []\n");
    let engine = CloneEngine::new(install, Box::new(exporter));

    let mut request = CloneRequest::new("3.10", "3.9", "tiny");
    request.output_dir = Some(dir.path().to_path_buf());

    let outcome = engine.clone_env(&request).unwrap();
    let specs: Vec<_> = outcome
        .descriptor
        .dependencies
        .iter()
        .filter_map(Dependency::as_spec)
        .collect();
    assert_eq!(specs, vec!["python=3.9", "pip", "setuptools", "wheel"]);
}
