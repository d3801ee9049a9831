use std::path::{Path, PathBuf};

use wb_app::{AppError, run_file, validate_file};
use wb_results::Column;

fn demo(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

fn labels(response: &wb_app::RunResponse) -> Vec<&str> {
    response
        .balance
        .rows()
        .iter()
        .map(|r| r.element.as_str())
        .collect()
}

#[test]
fn residential_plot_runs() {
    let response = run_file(&demo("residential_plot.yaml")).unwrap();
    assert_eq!(response.skipped, vec!["Shed".to_string()]);
    assert_eq!(
        labels(&response),
        vec!["Terrace", "Garden", "House roof", "Driveway", "Swale"]
    );
    // Hannover with a 10 % undercatch correction
    assert!(response.study.precipitation() > 0.0);

    let total = response.balance.total();
    let vp: f64 = response.balance.rows().iter().map(|r| r.vp_m3).sum();
    assert!((total.vp_m3 - vp).abs() < 1e-9);
    assert!(!response.balance.has_withdrawal());
    assert!(!response.balance.columns().contains(&Column::E));
}

#[test]
fn estate_chain_routes_through_every_measure() {
    let response = run_file(&demo("estate_chain.yaml")).unwrap();
    assert!(response.skipped.is_empty());
    assert_eq!(
        labels(&response),
        vec![
            "Parking",
            "Park",
            "Streets",
            "Apartment roofs",
            "Office roof",
            "Cistern",
            "Pipe",
            "Pond",
        ]
    );

    let rows = response.balance.rows();
    // only the last row of the chain still carries runoff
    assert!(rows[2..7].iter().all(|r| r.va_m3 == 0.0));
    assert!(response.balance.has_withdrawal());
    assert!(response.balance.columns().contains(&Column::Ve));

    let presentation = response.balance.presentation();
    assert_eq!(presentation.rows.len(), rows.len() + 1);
}

#[test]
fn report_is_valid_json() {
    let response = run_file(&demo("estate_chain.yaml")).unwrap();
    let json = response.report().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["precipitation_mm"], 750.0);
    assert_eq!(value["rows"].as_array().unwrap().len(), 8);
}

#[test]
fn summary_counts_connections() {
    let summary = validate_file(&demo("estate_chain.yaml")).unwrap();
    assert_eq!(summary.element_count, 5);
    assert_eq!(summary.measure_count, 3);
    assert_eq!(summary.connected_elements, 3);
    assert!((summary.total_area_m2 - 13000.0).abs() < 1e-9);
}

#[test]
fn missing_file_is_a_load_error() {
    let err = run_file(&demo("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, AppError::ScenarioLoad { .. }));
}
