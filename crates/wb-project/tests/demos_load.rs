use std::path::Path;

use wb_elements::{ElementKind, MeasureKind};

fn demo(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn demos_load_and_validate() {
    for name in ["residential_plot.yaml", "estate_chain.yaml"] {
        let scenario = wb_project::load(&demo(name))
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        wb_project::validate_scenario(&scenario)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
    }
}

#[test]
fn residential_plot_contents() {
    let scenario = wb_project::load_yaml(&demo("residential_plot.yaml")).unwrap();
    assert_eq!(scenario.elements.len(), 5);
    assert_eq!(scenario.elements[1].kind, ElementKind::PermeableSurface);
    assert_eq!(scenario.elements[0].connect_to.as_deref(), Some("Swale"));
    assert_eq!(scenario.measures[0].kind, MeasureKind::InfiltSwale);
    assert_eq!(scenario.climate.place.as_deref(), Some("Hannover"));
    assert!((scenario.climate.correction_factor() - 1.1).abs() < 1e-12);
    assert_eq!(scenario.elements[4].area(), Some(0.0));
}

#[test]
fn json_roundtrip() {
    let scenario = wb_project::load_yaml(&demo("estate_chain.yaml")).unwrap();
    let path = std::env::temp_dir().join("wb_project_roundtrip_estate.json");
    wb_project::save_json(&path, &scenario).unwrap();
    let loaded = wb_project::load(&path).unwrap();
    assert_eq!(scenario, loaded);
}

#[test]
fn invalid_yaml_reports_validation() {
    let content = r#"
version: 1
name: broken
climate:
  precipitation_mm: 800
  etp_mm: 500
elements:
  - id: roof
    kind: roof
    params:
      area: 100
    connect_to: missing
"#;
    let err = wb_project::from_yaml_str(content).unwrap_err();
    assert!(matches!(err, wb_project::ProjectError::Validation(_)));
}

#[test]
fn unknown_kind_is_a_parse_error() {
    let content = r#"
version: 1
name: broken
climate: { precipitation_mm: 800, etp_mm: 500 }
elements:
  - { id: r, kind: thatched_roof, params: { area: 10 } }
"#;
    assert!(matches!(
        wb_project::from_yaml_str(content),
        Err(wb_project::ProjectError::Yaml(_))
    ));
}
