use badgekit::badges::ProfileSummary;
use badgekit::build_chart;
use badgekit::layout::{ChartBox, ChartGeometry, ScaleRule};
use badgekit::storage;
use std::fs;
use tempfile::tempdir;

#[test]
fn npm_range_response_loads() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("npm.json");
    fs::write(
        &p,
        r#"{"start":"2024-01-01","end":"2024-01-03","package":"left-pad","downloads":[
            {"day":"2024-01-01","downloads":10},
            {"day":"2024-01-02","downloads":0},
            {"day":"2024-01-03","downloads":7}
        ]}"#,
    )
    .unwrap();
    let input = storage::load_series(&p).unwrap();
    assert_eq!(input.samples.len(), 3);
    assert_eq!(input.samples[2].value, 7);
    assert_eq!(input.total, None);
}

#[test]
fn out_of_order_series_is_rejected() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("plain.json");
    fs::write(
        &p,
        r#"[{"date":"2024-01-02","value":1},{"date":"2024-01-01","value":2}]"#,
    )
    .unwrap();
    assert!(storage::load_series(&p).is_err());
}

#[test]
fn languages_flat_and_per_repository() {
    let dir = tempdir().unwrap();
    let flat = dir.path().join("flat.json");
    fs::write(&flat, r#"[{"name":"Rust","size":3},{"name":"C","size":1}]"#).unwrap();
    let shares = storage::load_languages(&flat).unwrap();
    assert_eq!(shares[0].name, "Rust");
    assert_eq!(shares[1].weight, 0.25);

    let nested = dir.path().join("repos.json");
    fs::write(
        &nested,
        r#"[[{"name":"C","size":5}],[{"name":"Rust","size":2},{"name":"C","size":1}]]"#,
    )
    .unwrap();
    let shares = storage::load_languages(&nested).unwrap();
    assert_eq!(shares[0].name, "C");
    assert_eq!(shares[0].size, 6);
}

#[test]
fn profile_with_missing_fields_uses_defaults() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("me.json");
    fs::write(&p, r#"{"login":"octo","stars":4}"#).unwrap();
    let s: ProfileSummary = storage::load_profile(&p).unwrap();
    assert_eq!(s.login, "octo");
    assert_eq!(s.stars, 4);
    assert!(s.languages.is_empty());
}

#[test]
fn saved_geometry_reads_back() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("geo.json");
    let geo = build_chart(&[], ChartBox::new(10.0, 10.0), ScaleRule::EXACT);
    storage::save_json(&geo, &p).unwrap();
    let back: ChartGeometry = serde_json::from_str(&fs::read_to_string(&p).unwrap()).unwrap();
    assert_eq!(back, geo);
}
