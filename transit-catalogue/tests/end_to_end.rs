//! Whole-pipeline check: settings, catalogue, routing, snapshot and back.

use transit_catalogue::catalogue::CatalogueBuilder;
use transit_catalogue::config::Settings;
use transit_catalogue::domain::Coordinates;
use transit_catalogue::persist::Snapshot;
use transit_catalogue::router::TransportRouter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn build_route_save_restore() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("city.db");

    let settings = Settings::from_json_str(&format!(
        r#"{{
            "routing_settings": {{ "bus_wait_time": 2, "bus_velocity": 30 }},
            "serialization_settings": {{ "file": {} }}
        }}"#,
        serde_json::to_string(&db).unwrap()
    ))
    .unwrap();

    let mut builder = CatalogueBuilder::new();
    builder.add_stop("Harbour", Coordinates::new(43.10, 131.87));
    builder.add_stop("Market", Coordinates::new(43.11, 131.88));
    builder.add_stop("University", Coordinates::new(43.02, 131.89));
    builder.set_distances([("Harbour", "Market", 1500), ("Market", "University", 9000)]);
    builder
        .add_bus("3", &["Harbour", "Market", "University"], true)
        .unwrap();
    let catalogue = builder.build().unwrap();

    let router = TransportRouter::new(&catalogue, settings.routing).unwrap();
    let before = router.route_info("Harbour", "University").unwrap();
    // 2 min wait, then 10.5 km at 30 km/h
    assert!((before.total_weight - 23.0).abs() < 1e-9);
    assert_eq!(before.edges.len(), 1);
    assert_eq!(before.edges[0].span_count, 2);

    Snapshot::capture(&catalogue, &settings.routing, &settings.render)
        .save(&settings.serialization)
        .unwrap();
    let dataset = Snapshot::load(&settings.serialization)
        .unwrap()
        .restore()
        .unwrap();

    assert_eq!(dataset.routing, settings.routing);
    assert_eq!(dataset.render, settings.render);
    assert_eq!(
        dataset.catalogue.bus_info("3"),
        catalogue.bus_info("3")
    );
    let router = dataset.router().unwrap();
    assert_eq!(router.route_info("Harbour", "University"), Some(before));
}
