use axis_lod::api::{AxisConfiguration, AxisEngine};
use axis_lod::core::{
    AxisOrientation, DomainAdapter, DomainSpec, DomainValue, Point, Size, SurfaceSize, ViewRect,
};
use axis_lod::render::RecordingProvider;
use chrono::{TimeZone, Utc};

const FEB_FIRST_2000: i64 = 31 * 86_400_000;

fn two_decades() -> AxisEngine<RecordingProvider> {
    let start = Utc
        .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .expect("start");
    let end = Utc
        .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .expect("end");
    let config = AxisConfiguration::new(
        DomainSpec::date(start, end),
        ViewRect::new(Point::new(50.0, 300.0), Size::new(1000.0, 40.0)),
        SurfaceSize::new(1200.0, 600.0),
    )
    .with_orientation(AxisOrientation::Horizontal);
    AxisEngine::new(RecordingProvider::new(), config).expect("engine init")
}

fn visible_texts(engine: &AxisEngine<RecordingProvider>) -> Vec<String> {
    engine
        .buckets()
        .iter()
        .filter(|(_, bucket)| bucket.show_labels())
        .filter_map(|(_, bucket)| bucket.labels())
        .map(|part| part.main.text.clone())
        .collect()
}

#[test]
fn whole_range_shows_one_label_per_year() {
    let engine = two_decades();

    assert_eq!(engine.domain().max_level(), 16);
    assert_eq!(engine.levels().label_level, 12);

    let expected: Vec<String> = (2000..=2020).map(|year: i32| year.to_string()).collect();
    assert_eq!(visible_texts(&engine), expected);

    let has_sub_line = engine
        .buckets()
        .iter()
        .filter_map(|(_, bucket)| bucket.labels())
        .any(|part| part.sub.is_some());
    assert!(!has_sub_line);
}

#[test]
fn zooming_to_months_adds_year_sub_labels() {
    let mut engine = two_decades();
    engine
        .update_scale(Point::new(50.0, 300.0), 4.0)
        .expect("zoom in");

    assert_eq!(engine.levels().label_level, 10);

    let february = engine
        .bucket(FEB_FIRST_2000)
        .and_then(|bucket| bucket.labels())
        .expect("february label");
    assert_eq!(february.main.text, "Feb 1");
    assert_eq!(
        february.sub.as_ref().map(|sub| sub.text.as_str()),
        Some("2000")
    );
    assert!(february.attached);

    let january = engine
        .bucket(0)
        .and_then(|bucket| bucket.labels())
        .expect("january label");
    assert_eq!(january.main.text, "2000");
    assert!(january.sub.is_none());
}

#[test]
fn sub_labels_follow_the_main_label_into_place() {
    let mut engine = two_decades();
    engine
        .update_scale(Point::new(50.0, 300.0), 4.0)
        .expect("zoom in");

    let february = engine
        .bucket(FEB_FIRST_2000)
        .and_then(|bucket| bucket.labels())
        .expect("february label");
    let sub = february.sub.as_ref().expect("sub label");
    assert_eq!(sub.origin, february.main.origin);
    assert!(sub.anchor.padding > february.main.anchor.padding);
    assert!(engine.provider().label(sub.id).is_some());
}

#[test]
fn vertical_date_axis_never_stacks_sub_labels() {
    let mut engine = two_decades();
    engine.change_axis();
    engine
        .update_scale(Point::new(50.0, 300.0), 4.0)
        .expect("zoom in");

    let any_sub = engine
        .buckets()
        .iter()
        .filter_map(|(_, bucket)| bucket.labels())
        .any(|part| part.sub.is_some());
    assert!(!any_sub);
}

#[test]
fn pos_to_domain_returns_dates() {
    let engine = two_decades();
    let value = engine.pos_to_domain(50.0).expect("value at view start");
    let start = Utc
        .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .expect("start");
    assert_eq!(value, DomainValue::Date(start));

    let [head, _] = engine.range_labels().expect("range labels").clone();
    assert_eq!(head.text, "Jan 01 2000, 00:00:00");
}

fn assert_provider_mirrors_buckets(engine: &AxisEngine<RecordingProvider>) {
    let buckets = engine.buckets();
    let sub_lines = buckets
        .iter()
        .filter(|(_, bucket)| bucket.show_labels())
        .filter(|(_, bucket)| bucket.labels().is_some_and(|part| part.sub.is_some()))
        .count();
    let provider = engine.provider();
    assert_eq!(provider.ticks().len(), buckets.attached_tick_count() + 2);
    assert_eq!(
        provider.labels().len(),
        buckets.attached_label_count() + sub_lines + 2
    );

    let label_level = engine.levels().label_level;
    let view = engine.viewport().view_range;
    for (index, bucket) in buckets.iter() {
        if bucket.show_labels() {
            assert!(engine.domain().level_of(index) >= label_level);
            let position = engine.axis_position_of(index).expect("position");
            assert!(view.contains(position));
        }
    }
}

#[test]
fn panning_an_offset_date_axis_keeps_only_visible_buckets() {
    let start = Utc
        .with_ymd_and_hms(2000, 3, 15, 10, 30, 0)
        .single()
        .expect("start");
    let end = Utc
        .with_ymd_and_hms(2020, 7, 1, 0, 0, 0)
        .single()
        .expect("end");
    let config = AxisConfiguration::new(
        DomainSpec::date(start, end),
        ViewRect::new(Point::new(50.0, 300.0), Size::new(1000.0, 40.0)),
        SurfaceSize::new(1200.0, 600.0),
    )
    .with_orientation(AxisOrientation::Horizontal);
    let mut engine = AxisEngine::new(RecordingProvider::new(), config).expect("engine init");
    assert_provider_mirrors_buckets(&engine);

    for step in 0..60 {
        engine
            .update_scale(Point::new(550.0, 300.0), 0.5)
            .expect("zoom in");
        let direction = if step % 2 == 0 { -1.0 } else { 1.0 };
        engine
            .update_offset(Point::new(direction * 250.0, 0.0))
            .expect("pan");
        assert_provider_mirrors_buckets(&engine);
    }

    let settled: Vec<i64> = engine
        .buckets()
        .iter()
        .filter(|(_, bucket)| bucket.show_labels())
        .map(|(index, _)| index)
        .collect();
    engine
        .update_offset(Point::new(-400.0, 0.0))
        .expect("pan away");
    assert_provider_mirrors_buckets(&engine);
    engine
        .update_offset(Point::new(400.0, 0.0))
        .expect("pan back");
    let restored: Vec<i64> = engine
        .buckets()
        .iter()
        .filter(|(_, bucket)| bucket.show_labels())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(restored, settled);

    for _ in 0..60 {
        engine
            .update_scale(Point::new(550.0, 300.0), -0.5)
            .expect("zoom out");
        assert_provider_mirrors_buckets(&engine);
    }
}
