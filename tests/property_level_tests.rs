use axis_lod::api::{LevelState, cur_scale_for, exited_segments};
use axis_lod::core::{BranchingHierarchy, IndexRange};
use proptest::prelude::*;

proptest! {
    #[test]
    fn selected_level_brackets_label_extent(
        count in 2_i64..100_000,
        children in 2_i64..6,
        unit in 0.001f64..500.0,
        max_value in 1.0f64..200.0,
        start_level in 0_usize..20
    ) {
        let hierarchy = BranchingHierarchy::new(count, children);
        let intervals = hierarchy.interval_lengths();
        let max_level = intervals.len() - 1;

        let mut levels = LevelState {
            label_level: start_level.min(max_level),
            ..LevelState::default()
        };
        levels.update(intervals, unit, max_value);

        let level = levels.label_level;
        let stride = |level: usize| intervals[level] as f64 * unit;
        prop_assert!(level <= max_level);
        prop_assert!(level == max_level || stride(level) >= max_value);
        prop_assert!(level == 0 || stride(level - 1) <= max_value);
        prop_assert_eq!(levels.tick_level, level.saturating_sub(1));
        prop_assert_eq!(levels.interval, intervals[level]);
    }

    #[test]
    fn level_update_is_idempotent(
        count in 2_i64..10_000,
        unit in 0.01f64..100.0,
        max_value in 1.0f64..100.0
    ) {
        let hierarchy = BranchingHierarchy::new(count, 2);
        let mut levels = LevelState::default();
        levels.update(hierarchy.interval_lengths(), unit, max_value);
        let settled = levels.label_level;

        prop_assert!(!levels.update(hierarchy.interval_lengths(), unit, max_value));
        prop_assert_eq!(levels.label_level, settled);
    }

    #[test]
    fn larger_units_never_need_coarser_levels(
        count in 2_i64..10_000,
        unit in 0.01f64..100.0,
        factor in 1.0f64..16.0,
        max_value in 1.0f64..100.0
    ) {
        let hierarchy = BranchingHierarchy::new(count, 2);
        let mut near = LevelState::default();
        near.update(hierarchy.interval_lengths(), unit * factor, max_value);
        let mut far = LevelState::default();
        far.update(hierarchy.interval_lengths(), unit, max_value);

        prop_assert!(near.label_level <= far.label_level);
    }

    #[test]
    fn fade_alphas_stay_in_unit_interval(
        count in 2_i64..10_000,
        length in 10.0f64..4_000.0,
        scale in 1.0f64..20.0,
        max_value in 1.0f64..100.0
    ) {
        let hierarchy = BranchingHierarchy::new(count, 2);
        let unit0 = length / count as f64;
        let cur_scale = cur_scale_for(scale);
        let mut levels = LevelState::default();
        levels.update(hierarchy.interval_lengths(), unit0 * cur_scale, max_value);

        let alphas = levels.fade_alphas(unit0, cur_scale, max_value, 1.5);
        prop_assert!((0.0..=1.0).contains(&alphas.label));
        prop_assert!((0.0..=1.0).contains(&alphas.tick));
    }

    #[test]
    fn exited_segments_cover_old_minus_new(
        old_start in -50_i64..50,
        old_len in 0_i64..60,
        new_start in -50_i64..50,
        new_len in 0_i64..60
    ) {
        let old = IndexRange::new(old_start, old_start + old_len - 1);
        let new = IndexRange::new(new_start, new_start + new_len - 1);
        let segments = exited_segments(old, new);

        for index in old.start..=old.end {
            let covered = segments.iter().any(|segment| segment.contains(index));
            prop_assert_eq!(covered, !new.contains(index));
        }
        for segment in &segments {
            prop_assert!(!segment.is_empty());
        }
    }
}
