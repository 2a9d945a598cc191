use tracing::{debug, trace, warn};

use crate::core::{AxisOrientation, IndexRange, Point};
use crate::error::{AxisError, AxisResult};
use crate::render::{AnchorType, LabelAnchor, LabelInstance, TickInstance, VisualProvider};

use super::viewport_controller::{exited_segments, scale_bounds};
use super::{AxisEngine, axis_engine::AxisCore};

impl<P: VisualProvider> AxisEngine<P> {
    /// Pans by `delta` screen pixels. Vertical axes follow the screen y axis,
    /// so dragging down moves the content down.
    pub fn update_offset(&mut self, delta: Point) -> AxisResult<()> {
        if !delta.is_finite() {
            return Err(AxisError::InvalidInput(
                "pan delta must be finite".to_owned(),
            ));
        }
        let shift = match self.core.config.orientation {
            AxisOrientation::Horizontal => delta.x,
            AxisOrientation::Vertical => -delta.y,
        };
        let max_range = self.core.viewport.max_range;
        self.apply_max_range(
            max_range.lo + shift,
            max_range.hi + shift,
            max_range.length(),
        );
        Ok(())
    }

    /// Zooms by `zoom_delta` steps of the exponential scale around `focus`,
    /// keeping the domain value under `focus` in place.
    pub fn update_scale(&mut self, focus: Point, zoom_delta: f64) -> AxisResult<()> {
        if !focus.is_finite() || !zoom_delta.is_finite() {
            return Err(AxisError::InvalidInput(
                "zoom focus and delta must be finite".to_owned(),
            ));
        }
        let (min_scale, max_scale) = scale_bounds(self.core.adapter().index_count());
        let scale = (self.core.viewport.scale + zoom_delta).clamp(min_scale, max_scale);
        self.core.viewport.scale = scale;

        let focus = self.core.to_axis(focus);
        let (low, high, length) =
            self.core
                .viewport
                .zoom_target(focus, scale, self.core.axis_length());
        trace!(scale, low, high, "zoom target");
        self.apply_max_range(low, high, length);
        Ok(())
    }

    /// Moves the pannable window to `[low, high]`, snapped so it keeps
    /// covering the view, and relays out.
    pub fn update_max_range(&mut self, low: f64, high: f64, length: f64) -> AxisResult<()> {
        if !low.is_finite() || !high.is_finite() || !length.is_finite() || length <= 0.0 {
            return Err(AxisError::InvalidInput(
                "max range bounds must be finite with a positive length".to_owned(),
            ));
        }
        self.apply_max_range(low, high, length);
        Ok(())
    }

    pub(super) fn apply_max_range(&mut self, low: f64, high: f64, length: f64) {
        self.core.viewport.max_range = self.core.viewport.clamp_max_range(low, high, length);
        self.update_interval();
        self.update_index_range();
        self.layout_labels();
    }

    pub(super) fn update_interval(&mut self) {
        let unit = self.core.unit();
        let max_value = self.core.max_label_extent();
        let intervals = self.core.domain.adapter().interval_lengths();
        if self.core.levels.update(intervals, unit, max_value) {
            let levels = self.core.levels;
            debug!(
                from = levels.pre_label_level,
                to = levels.label_level,
                interval = levels.interval,
                "label level changed"
            );
        }
    }

    /// Recomputes the index window and detaches what left it.
    ///
    /// Only buckets inside the exited segments are touched, plus buckets of
    /// levels that the last level change made too fine to show.
    pub(super) fn update_index_range(&mut self) {
        let unit = self.core.unit();
        let Some(window) = self.core.viewport.visible_index_window(unit) else {
            warn!(unit, "skipping index range update for degenerate unit");
            return;
        };
        let old = self.core.viewport.index_range;
        for segment in exited_segments(old, window) {
            self.detach_segment(segment);
        }
        self.remove_buckets_at_lower_levels(window);
        self.core.viewport.index_range = window;
    }

    fn detach_segment(&mut self, segment: IndexRange) {
        let AxisCore { buckets, .. } = &mut self.core;
        for index in buckets.indices_within(segment) {
            if let Some(bucket) = buckets.get_mut(index) {
                bucket.detach_tick(&mut self.provider);
                bucket.detach_labels(&mut self.provider);
            }
        }
    }

    /// Detaches labels and ticks whose level fell below the current one.
    fn remove_buckets_at_lower_levels(&mut self, window: IndexRange) {
        let levels = self.core.levels;
        if levels.pre_label_level < levels.label_level {
            let stale = self.stale_indices(window, levels.pre_label_level, levels.label_level - 1);
            for index in stale {
                if let Some(bucket) = self.core.buckets.get_mut(index) {
                    bucket.detach_labels(&mut self.provider);
                }
            }
        }
        if levels.pre_tick_level < levels.tick_level {
            let stale = self.stale_indices(window, levels.pre_tick_level, levels.tick_level - 1);
            for index in stale {
                if let Some(bucket) = self.core.buckets.get_mut(index) {
                    bucket.detach_tick(&mut self.provider);
                }
            }
        }
    }

    /// Indices in `window` whose level lies in `[lower, higher]`.
    ///
    /// Walks the existing buckets instead of enumerating the domain when the
    /// window holds more candidates at `lower` than there are buckets.
    fn stale_indices(&self, window: IndexRange, lower: usize, higher: usize) -> Vec<i64> {
        let adapter = self.core.adapter();
        let stride = adapter
            .interval_lengths()
            .get(lower)
            .copied()
            .unwrap_or(1)
            .max(1);
        let candidates = window.len() / stride;
        if candidates > self.core.buckets.len() as i64 {
            return self
                .core
                .buckets
                .indices_within(window)
                .into_iter()
                .filter(|&index| (lower..=higher).contains(&adapter.level_of(index)))
                .collect();
        }
        adapter.indices_in_range(window.start, window.end, lower, higher)
    }

    pub(super) fn layout_labels(&mut self) {
        self.layout_buckets();
        self.update_range_labels();
    }

    /// Places every tick and label of the current levels inside the index
    /// window, attaching those on screen and detaching the rest.
    pub(super) fn layout_buckets(&mut self) {
        let unit = self.core.unit();
        if self.core.adapter().index_count() <= 0 || !unit.is_finite() || unit <= 0.0 {
            warn!(unit, "skipping layout for empty domain");
            return;
        }

        let alphas = self.core.levels.fade_alphas(
            self.core.base_unit(),
            self.core.viewport.cur_scale(),
            self.core.max_label_extent(),
            self.core.config.style.fade_window_ratio,
        );
        let levels = self.core.levels;
        let window = self.core.viewport.index_range;
        let adapter = self.core.adapter();
        let max_level = adapter.max_level();

        let tick_indices =
            adapter.indices_in_range(window.start, window.end, levels.tick_level, max_level);
        let label_indices =
            adapter.indices_in_range(window.start, window.end, levels.label_level, max_level);

        for &index in &tick_indices {
            let alpha = if self.core.adapter().level_of(index) > levels.tick_level {
                1.0
            } else {
                alphas.tick
            };
            self.place_tick(index, unit, alpha);
        }
        for &index in &label_indices {
            let alpha = if self.core.adapter().level_of(index) > levels.label_level {
                1.0
            } else {
                alphas.label
            };
            self.place_label(index, unit, alpha);
        }

        trace!(
            ticks = tick_indices.len(),
            labels = label_indices.len(),
            tick_alpha = alphas.tick,
            label_alpha = alphas.label,
            "layout pass"
        );
    }

    fn place_tick(&mut self, index: i64, unit: f64, alpha: f64) {
        let coordinate = self.core.viewport.axis_position(index, unit);
        if !self.core.viewport.view_range.contains(coordinate) {
            if let Some(bucket) = self.core.buckets.get_mut(index) {
                bucket.detach_tick(&mut self.provider);
            }
            return;
        }

        let position = self.core.to_screen(coordinate);
        let AxisCore {
            buckets, ids, config, ..
        } = &mut self.core;
        let bucket = buckets.get_or_create(index);
        let id = match bucket.tick() {
            Some(part) => part.instance.id,
            None => ids.allocate(),
        };
        let style = config.style;
        let end = match config.orientation {
            AxisOrientation::Horizontal => Point::new(position.x, position.y + style.tick_length),
            AxisOrientation::Vertical => Point::new(position.x - style.tick_length, position.y),
        };
        let color = style.tick_color.with_alpha(alpha);
        let instance = TickInstance {
            id,
            start: position,
            end,
            thickness: style.tick_width,
            start_color: color,
            end_color: color,
        };
        bucket.place_tick(instance, &mut self.provider);
    }

    fn place_label(&mut self, index: i64, unit: f64, alpha: f64) {
        let coordinate = self.core.viewport.axis_position(index, unit);
        if !self.core.viewport.view_range.contains(coordinate) {
            if let Some(bucket) = self.core.buckets.get_mut(index) {
                bucket.detach_labels(&mut self.provider);
            }
            return;
        }

        let position = self.core.to_screen(coordinate);
        let level = self.core.levels.label_level;
        let orientation = self.core.config.orientation;
        let text = self.core.adapter().label_for(index, level);
        let sub_text = match orientation {
            AxisOrientation::Horizontal => self.core.adapter().sub_label_for(index),
            AxisOrientation::Vertical => None,
        };

        let AxisCore {
            buckets, ids, config, ..
        } = &mut self.core;
        let style = config.style;
        let bucket = buckets.get_or_create(index);
        let (main_id, sub_id) = match bucket.labels() {
            Some(part) => (Some(part.main.id), part.sub.as_ref().map(|sub| sub.id)),
            None => (None, None),
        };
        let main_id = match main_id {
            Some(id) => id,
            None => {
                let id = ids.allocate();
                buckets.track_main_label(id, index);
                id
            }
        };

        let kind = match orientation {
            AxisOrientation::Horizontal => AnchorType::TopMiddle,
            AxisOrientation::Vertical => AnchorType::MiddleRight,
        };
        let color = style.label_color.with_alpha(alpha);
        let main = LabelInstance {
            id: main_id,
            text,
            origin: position,
            font_size: style.label_font_size,
            color,
            anchor: LabelAnchor {
                kind,
                padding: style.label_padding,
            },
        };
        let sub = sub_text.map(|text| LabelInstance {
            id: sub_id.unwrap_or_else(|| ids.allocate()),
            text,
            origin: position,
            font_size: style.label_font_size,
            color,
            anchor: LabelAnchor {
                kind,
                padding: style.label_padding + style.label_font_size,
            },
        });

        buckets
            .get_or_create(index)
            .place_labels(main, sub, &mut self.provider);
    }
}
