use std::sync::Arc;

use axis_lod::api::{
    AxisConfiguration, AxisEngine, HorizontalRangeSide, RangeFormatter, RangeLabelBehavior,
};
use axis_lod::core::{AxisOrientation, DomainSpec, DomainValue, Point, Size, SurfaceSize, ViewRect};
use axis_lod::render::{AnchorType, RecordingProvider};

fn config() -> AxisConfiguration {
    AxisConfiguration::new(
        DomainSpec::number(0.0, 100.0),
        ViewRect::new(Point::new(100.0, 500.0), Size::new(600.0, 40.0)),
        SurfaceSize::new(1200.0, 800.0),
    )
    .with_orientation(AxisOrientation::Horizontal)
}

fn engine_with(config: AxisConfiguration) -> AxisEngine<RecordingProvider> {
    AxisEngine::new(RecordingProvider::new(), config).expect("engine init")
}

#[test]
fn horizontal_range_labels_default_above_the_axis() {
    let engine = engine_with(config());
    let [head, tail] = engine.range_labels().expect("range labels").clone();

    assert_eq!(head.origin, Point::new(100.0, 490.0));
    assert_eq!(head.anchor.kind, AnchorType::BottomLeft);
    assert_eq!(tail.origin, Point::new(700.0, 490.0));
    assert_eq!(tail.anchor.kind, AnchorType::BottomRight);

    let [low, high] = *engine.edge_markers().expect("edge markers");
    assert_eq!((low.start, low.end), (Point::new(100.0, 500.0), Point::new(100.0, 460.0)));
    assert_eq!(
        (high.start, high.end),
        (Point::new(700.0, 500.0), Point::new(700.0, 460.0))
    );
}

#[test]
fn below_side_clears_both_label_lines() {
    let behavior = RangeLabelBehavior {
        horizontal_side: HorizontalRangeSide::Below,
        ..RangeLabelBehavior::default()
    };
    let engine = engine_with(config().with_range_labels(behavior));
    let [head, tail] = engine.range_labels().expect("range labels").clone();

    assert_eq!(head.origin, Point::new(100.0, 500.0 + 10.0 + 24.0));
    assert_eq!(head.anchor.kind, AnchorType::TopLeft);
    assert_eq!(tail.anchor.kind, AnchorType::TopRight);
}

#[test]
fn range_texts_track_pan_and_zoom() {
    let mut engine = engine_with(config());
    engine
        .update_scale(Point::new(100.0, 500.0), 2.0)
        .expect("zoom in");
    engine
        .update_offset(Point::new(-600.0, 0.0))
        .expect("pan");

    let [head, tail] = engine.range_labels().expect("range labels").clone();
    assert_eq!(head.text, "25.00");
    assert_eq!(tail.text, "50.00");
    assert_eq!(engine.provider().label(head.id), Some(&head));
}

#[test]
fn custom_formatter_replaces_default_text() {
    let mut engine = engine_with(config());
    let formatter: RangeFormatter = Arc::new(|head: &DomainValue, tail: &DomainValue| {
        match (head, tail) {
            (DomainValue::Number(low), DomainValue::Number(high)) => {
                (format!("from {low}"), format!("to {high}"))
            }
            _ => (String::new(), String::new()),
        }
    });
    engine.set_range_formatter(formatter);

    let [head, tail] = engine.range_labels().expect("range labels").clone();
    assert_eq!(head.text, "from 0");
    assert_eq!(tail.text, "to 100");

    engine.clear_range_formatter();
    let [head, _] = engine.range_labels().expect("range labels").clone();
    assert_eq!(head.text, "0.00");
}

#[test]
fn disabled_decorations_are_never_drawn() {
    let behavior = RangeLabelBehavior {
        enabled: false,
        ..RangeLabelBehavior::default()
    };
    let engine = engine_with(
        config()
            .with_range_labels(behavior)
            .with_edge_markers(false),
    );

    assert!(engine.range_labels().is_none());
    assert!(engine.edge_markers().is_none());
    let provider = engine.provider();
    assert_eq!(provider.ticks().len(), engine.buckets().attached_tick_count());
    assert_eq!(provider.labels().len(), engine.buckets().attached_label_count());
}

#[test]
fn point_to_domain_uses_the_orientation() {
    let engine = engine_with(config());
    assert_eq!(
        engine.point_to_domain(Point::new(100.0, 0.0)),
        Some(DomainValue::Number(0.0))
    );
    assert_eq!(
        engine.point_to_domain(Point::new(5_000.0, 0.0)),
        Some(DomainValue::Number(100.0))
    );
    assert_eq!(engine.pos_to_index(-50.0), Some(0));
}
