use spacetrash_lib::{
    catalog::Catalog,
    source::CatalogSource,
    tracker::SpaceTrash,
    layer::HeadlessLayer,
    units::{Time, Timestamp},
};
use std::path::Path;

fn source(rel: &str) -> CatalogSource {
    CatalogSource::File(Path::new(env!("CARGO_MANIFEST_DIR")).join(rel))
}

#[tokio::test]
async fn fixture_catalog_end_to_end() {
    let text = source("../trash-protocol/test_fixtures/sample_3le.txt")
        .fetch()
        .await
        .unwrap();
    let (catalog, summary) = Catalog::from_text(&text).unwrap();
    assert_eq!(summary.accepted, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.dangling_lines, 1);

    let at: Timestamp = "2023-07-10T00:00:00Z".parse().unwrap();
    let mut tracker = SpaceTrash::new(HeadlessLayer::new());
    let report = tracker.populate(catalog, at);
    assert_eq!(report.recomputed, 3);
    assert_eq!(tracker.objects().len(), 3);
    // GEO1 and GEO2 always propagate, the 2008 ISS elements may have decayed
    assert!(report.placed >= 2);
    assert_eq!(report.placed + report.failures.len(), 3);

    tracker.set_simulation(true);
    let mut t = at;
    for _ in 0..5 {
        t += Time::from_secs(60.0);
        let report = tracker.tick(t).unwrap();
        assert_eq!(report.recomputed, 3);
    }
    let placemarks = tracker.layer().placemarks();
    for obj in tracker.objects() {
        if let Some(handle) = obj.placement {
            let label = &tracker.layer().placemark(handle).unwrap().label;
            assert_eq!(label, &obj.record.id.to_string());
        }
    }
    assert!(placemarks.len() >= 2);
}

#[tokio::test]
async fn bundled_catalog_loads() {
    let text = source("../trash-data/space-track-full-3le.txt")
        .fetch()
        .await
        .unwrap();
    let (catalog, summary) = Catalog::from_text(&text).unwrap();
    assert_eq!(catalog.len(), 5);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.dangling_lines, 0);
}
