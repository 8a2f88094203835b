use serde_json::json;
use ub_structs::{
    config::{SearchParams, ZoningSettings},
    core::PlotRecord,
};
use ub_utils::{dejsonify, jsonify};

fn settings() -> ZoningSettings {
    ZoningSettings::new(6, 100.0, 100.0, (40.0, 60.0), (20.0, 30.0), (10.0, 20.0))
}

#[test]
fn test_calc_seed_is_deterministic() {
    let settings = settings();
    assert_eq!(settings.calc_seed("abc"), settings.calc_seed("abc"));
    assert_ne!(settings.calc_seed("abc"), settings.calc_seed("abd"));
}

#[test]
fn test_calc_seed_depends_on_settings() {
    let mut other = settings();
    other.grid_size = 8;
    assert_ne!(settings().calc_seed("abc"), other.calc_seed("abc"));
}

#[test]
fn test_search_params_defaults() {
    let params = SearchParams::default();
    assert_eq!(params.population_size, 50);
    assert_eq!(params.num_generations, 50);
    assert_eq!(params.crossover_prob, 0.5);
    assert_eq!(params.mutation_prob, 0.2);
    assert_eq!(params.gene_mutation_prob, 0.05);
    assert_eq!(params.tournament_size, 3);
    assert_eq!(settings().search_params(), params);
}

#[test]
fn test_settings_from_partial_json() {
    let settings: ZoningSettings = dejsonify(
        &json!({
            "grid_size": 10,
            "min_area": 80.0,
            "max_area": 150.0,
            "res_range": [40.0, 60.0],
            "com_range": [20.0, 30.0],
            "green_range": [10.0, 20.0],
            "search": {"num_generations": 5}
        })
        .to_string(),
    )
    .unwrap();
    assert_eq!(settings.grid_size, 10);
    assert!(settings.manual_areas().is_none());
    let params = settings.search_params();
    assert_eq!(params.num_generations, 5);
    assert_eq!(params.population_size, 50);
}

#[test]
fn test_plot_record_column_names() {
    let record = PlotRecord {
        plot_id: 7,
        x: 1,
        y: 1,
        area: 120.0,
        zone: "Green".to_string(),
        subtype: "Park".to_string(),
        reason: "Scattered for public access".to_string(),
    };
    assert_eq!(
        jsonify(&record),
        r#"{"Area":120.0,"PlotID":7,"Reason":"Scattered for public access","Subtype":"Park","X":1,"Y":1,"Zone":"Green"}"#
    );
}
