use approx::assert_relative_eq;
use axis_lod::api::{AxisConfiguration, AxisEngine};
use axis_lod::core::{
    AxisOrientation, DomainSpec, DomainValue, IndexRange, Point, Size, SurfaceSize, ViewRect,
};
use axis_lod::render::{AnchorType, RecordingProvider};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_axis(width: f64) -> AxisEngine<RecordingProvider> {
    let config = AxisConfiguration::new(
        DomainSpec::labels(MONTHS),
        ViewRect::new(Point::new(100.0, 500.0), Size::new(width, 40.0)),
        SurfaceSize::new(1200.0, 800.0),
    )
    .with_orientation(AxisOrientation::Horizontal);
    AxisEngine::new(RecordingProvider::new(), config).expect("engine init")
}

fn attached_label_indices(engine: &AxisEngine<RecordingProvider>) -> Vec<i64> {
    engine
        .buckets()
        .iter()
        .filter(|(_, bucket)| bucket.show_labels())
        .map(|(index, _)| index)
        .collect()
}

#[test]
fn wide_view_shows_every_month_at_finest_level() {
    let engine = month_axis(600.0);

    assert_eq!(engine.levels().label_level, 0);
    assert_eq!(engine.levels().tick_level, 0);
    assert_eq!(attached_label_indices(&engine), (0..12).collect::<Vec<_>>());

    let texts: Vec<String> = (0..12)
        .map(|index| {
            engine
                .bucket(index)
                .and_then(|bucket| bucket.labels())
                .map(|part| part.main.text.clone())
                .expect("label part")
        })
        .collect();
    assert_eq!(texts, MONTHS.map(str::to_owned).to_vec());

    let provider = engine.provider();
    // 12 bucket ticks plus two edge markers; 12 labels plus two range labels.
    assert_eq!(provider.ticks().len(), 14);
    assert_eq!(provider.labels().len(), 14);
    assert_eq!(provider.non_finite_instances(), 0);
}

#[test]
fn horizontal_geometry_follows_index_centers() {
    let engine = month_axis(600.0);

    let tick = engine
        .bucket(3)
        .and_then(|bucket| bucket.tick())
        .map(|part| part.instance)
        .expect("tick");
    assert_relative_eq!(tick.start.x, 100.0 + 3.5 * 50.0);
    assert_relative_eq!(tick.start.y, 500.0);
    assert_relative_eq!(tick.end.y, 510.0);
    assert_relative_eq!(tick.alpha(), 1.0);

    let label = engine
        .bucket(3)
        .and_then(|bucket| bucket.labels())
        .map(|part| part.main.clone())
        .expect("label");
    assert_eq!(label.anchor.kind, AnchorType::TopMiddle);
    assert_relative_eq!(label.anchor.padding, 10.0);
    assert_relative_eq!(label.origin.x, tick.start.x);
}

#[test]
fn narrow_view_coarsens_to_group_boundaries() {
    let engine = month_axis(60.0);
    let levels = engine.levels();

    assert_eq!(levels.label_level, 2);
    assert_eq!(levels.tick_level, 1);
    assert_eq!(levels.interval, 4);
    assert_eq!(attached_label_indices(&engine), vec![0, 4, 8]);

    let alpha_of = |index: i64| {
        engine
            .bucket(index)
            .and_then(|bucket| bucket.labels())
            .map(|part| part.main.alpha())
            .expect("label")
    };
    // Boundaries of the coarser level never fade.
    assert_relative_eq!(alpha_of(0), 1.0);
    assert_relative_eq!(alpha_of(8), 1.0);
    assert!(alpha_of(4) < 1.0);
    assert!(alpha_of(4) > 0.0);

    let tick_indices: Vec<i64> = engine
        .buckets()
        .iter()
        .filter(|(_, bucket)| bucket.show_tick())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(tick_indices, vec![0, 2, 4, 6, 8, 10]);
}

#[test]
fn zooming_in_reveals_finer_level_without_recreating_buckets() {
    let mut engine = month_axis(60.0);
    let jan_label = engine
        .bucket(0)
        .and_then(|bucket| bucket.labels())
        .map(|part| part.main.id)
        .expect("jan label");

    engine
        .update_scale(Point::new(100.0, 500.0), 1.0)
        .expect("zoom in");

    assert_eq!(engine.levels().label_level, 1);
    assert_eq!(engine.index_range(), IndexRange::new(0, 6));
    assert_eq!(attached_label_indices(&engine), vec![0, 2, 4]);
    assert_eq!(
        engine
            .bucket(0)
            .and_then(|bucket| bucket.labels())
            .map(|part| part.main.id),
        Some(jan_label)
    );
    // Index 8 left the index window and was detached, not destroyed.
    let august = engine.bucket(8).expect("bucket kept");
    assert!(!august.show_labels());
    assert!(!august.show_tick());
}

#[test]
fn long_labels_are_truncated_with_ellipsis() {
    let config = AxisConfiguration::new(
        DomainSpec::Label {
            labels: vec!["September".to_owned(), "Oct".to_owned()],
            max_label_length: 4,
        },
        ViewRect::new(Point::new(0.0, 100.0), Size::new(400.0, 40.0)),
        SurfaceSize::new(800.0, 600.0),
    )
    .with_orientation(AxisOrientation::Horizontal);
    let engine = AxisEngine::new(RecordingProvider::new(), config).expect("engine init");

    let text = engine
        .bucket(0)
        .and_then(|bucket| bucket.labels())
        .map(|part| part.main.text.clone());
    assert_eq!(text.as_deref(), Some("Sept..."));
    assert_eq!(
        engine.pos_to_domain(10.0),
        Some(DomainValue::Label("September".to_owned()))
    );
}

#[test]
fn missing_labels_are_rejected_before_layout() {
    let config = AxisConfiguration::new(
        DomainSpec::labels(Vec::<String>::new()),
        ViewRect::new(Point::new(0.0, 100.0), Size::new(400.0, 40.0)),
        SurfaceSize::new(800.0, 600.0),
    );
    assert!(AxisEngine::new(RecordingProvider::new(), config).is_err());
}
