use std::sync::Arc;

use tracing::trace;

use crate::core::{AxisOrientation, DomainValue, Point};
use crate::render::{
    AnchorType, LabelAnchor, LabelInstance, TickInstance, VisualId, VisualProvider,
};

use super::{AxisEngine, HorizontalRangeSide, VerticalRangeSide, axis_engine::AxisCore};

/// Formats the domain values at the two view ends into head and tail text.
pub type RangeFormatter =
    Arc<dyn Fn(&DomainValue, &DomainValue) -> (String, String) + Send + Sync + 'static>;

/// Edge markers and range labels, kept alive across layout passes.
#[derive(Debug, Default)]
pub(super) struct AxisDecorations {
    edge_markers: Option<[TickInstance; 2]>,
    edge_markers_attached: bool,
    range_labels: Option<[LabelInstance; 2]>,
    range_labels_attached: bool,
}

impl AxisDecorations {
    /// Called after the provider was cleared.
    pub(super) fn mark_detached(&mut self) {
        self.edge_markers_attached = false;
        self.range_labels_attached = false;
    }

    #[must_use]
    pub(super) fn range_labels(&self) -> Option<&[LabelInstance; 2]> {
        self.range_labels
            .as_ref()
            .filter(|_| self.range_labels_attached)
    }

    #[must_use]
    pub(super) fn edge_markers(&self) -> Option<&[TickInstance; 2]> {
        self.edge_markers
            .as_ref()
            .filter(|_| self.edge_markers_attached)
    }
}

struct RangeLabelPlacement {
    head_origin: Point,
    tail_origin: Point,
    head_anchor: AnchorType,
    tail_anchor: AnchorType,
}

impl AxisCore {
    fn range_label_placement(&self) -> RangeLabelPlacement {
        let style = self.config.style;
        let behavior = self.config.range_labels;
        let origin = self.config.view.origin;
        let size = self.config.view.size;
        match self.config.orientation {
            AxisOrientation::Vertical => {
                let (dx, head_anchor, tail_anchor) = match behavior.vertical_side {
                    VerticalRangeSide::Left => {
                        (-style.label_padding, AnchorType::BottomRight, AnchorType::TopRight)
                    }
                    VerticalRangeSide::Right => {
                        (style.label_padding, AnchorType::BottomLeft, AnchorType::TopLeft)
                    }
                };
                RangeLabelPlacement {
                    head_origin: Point::new(origin.x + dx, origin.y),
                    tail_origin: Point::new(origin.x + dx, origin.y - size.height),
                    head_anchor,
                    tail_anchor,
                }
            }
            AxisOrientation::Horizontal => {
                let (dy, head_anchor, tail_anchor) = match behavior.horizontal_side {
                    HorizontalRangeSide::Above => (
                        -style.label_padding,
                        AnchorType::BottomLeft,
                        AnchorType::BottomRight,
                    ),
                    HorizontalRangeSide::Below => (
                        style.label_padding + 2.0 * style.label_font_size,
                        AnchorType::TopLeft,
                        AnchorType::TopRight,
                    ),
                };
                RangeLabelPlacement {
                    head_origin: Point::new(origin.x, origin.y + dy),
                    tail_origin: Point::new(origin.x + size.width, origin.y + dy),
                    head_anchor,
                    tail_anchor,
                }
            }
        }
    }

    fn range_texts(&self) -> Option<(String, String)> {
        let view = self.viewport.view_range;
        let head = self.value_at_position(view.lo)?;
        let tail = self.value_at_position(view.hi)?;
        Some(match &self.range_formatter {
            Some(formatter) => formatter(&head, &tail),
            None => (head.default_text(), tail.default_text()),
        })
    }

    fn index_at_position(&self, position: f64) -> Option<i64> {
        let count = self.adapter().index_count();
        let unit = self.unit();
        if count <= 0 || !unit.is_finite() || unit <= 0.0 || !position.is_finite() {
            return None;
        }
        let max_range = self.viewport.max_range;
        let position = max_range.clamp(position);
        let index = ((position - max_range.lo) / unit).floor() as i64;
        Some(index.clamp(0, count - 1))
    }

    fn value_at_position(&self, position: f64) -> Option<DomainValue> {
        let index = self.index_at_position(position)?;
        self.adapter().value_at(index)
    }
}

impl<P: VisualProvider> AxisEngine<P> {
    /// Installs a custom range label formatter and refreshes the labels.
    pub fn set_range_formatter(&mut self, formatter: RangeFormatter) {
        self.core.range_formatter = Some(formatter);
        self.update_range_labels();
    }

    pub fn clear_range_formatter(&mut self) {
        self.core.range_formatter = None;
        self.update_range_labels();
    }

    /// Domain value under the axis coordinate `position`.
    ///
    /// The position is clamped into the pannable range first, so values past
    /// either end map to the first or last index.
    #[must_use]
    pub fn pos_to_domain(&self, position: f64) -> Option<DomainValue> {
        self.core.value_at_position(position)
    }

    /// [`AxisEngine::pos_to_domain`] for a screen point.
    #[must_use]
    pub fn point_to_domain(&self, point: Point) -> Option<DomainValue> {
        self.core.value_at_position(self.core.to_axis(point))
    }

    /// Index under the axis coordinate `position`, clamped like
    /// [`AxisEngine::pos_to_domain`].
    #[must_use]
    pub fn pos_to_index(&self, position: f64) -> Option<i64> {
        self.core.index_at_position(position)
    }

    /// Axis coordinate of the center of `index`.
    #[must_use]
    pub fn axis_position_of(&self, index: i64) -> Option<f64> {
        let count = self.core.adapter().index_count();
        let unit = self.core.unit();
        if index < 0 || index >= count || unit <= 0.0 {
            return None;
        }
        Some(self.core.viewport.axis_position(index, unit))
    }

    #[must_use]
    pub fn screen_position_of(&self, index: i64) -> Option<Point> {
        self.axis_position_of(index)
            .map(|coordinate| self.core.to_screen(coordinate))
    }

    /// Head and tail range labels while they are shown.
    #[must_use]
    pub fn range_labels(&self) -> Option<&[LabelInstance; 2]> {
        self.core.decorations.range_labels()
    }

    #[must_use]
    pub fn edge_markers(&self) -> Option<&[TickInstance; 2]> {
        self.core.decorations.edge_markers()
    }

    /// Draws the two markers perpendicular to the axis at the view ends.
    pub(super) fn draw_edge_markers(&mut self) {
        if !self.core.config.edge_markers {
            return;
        }
        let AxisCore {
            config,
            decorations,
            ids,
            ..
        } = &mut self.core;
        let style = config.style;
        let origin = config.view.origin;
        let size = config.view.size;
        let length = style.edge_marker_length;
        let (head_start, head_end, tail_start, tail_end) = match config.orientation {
            AxisOrientation::Vertical => {
                let top = origin.y - size.height;
                (
                    origin,
                    Point::new(origin.x - length, origin.y),
                    Point::new(origin.x, top),
                    Point::new(origin.x - length, top),
                )
            }
            AxisOrientation::Horizontal => {
                let right = origin.x + size.width;
                (
                    origin,
                    Point::new(origin.x, origin.y - length),
                    Point::new(right, origin.y),
                    Point::new(right, origin.y - length),
                )
            }
        };

        let [head_id, tail_id] = match &decorations.edge_markers {
            Some([head, tail]) => [head.id, tail.id],
            None => [ids.allocate(), ids.allocate()],
        };
        let marker = |id: VisualId, start: Point, end: Point| TickInstance {
            id,
            start,
            end,
            thickness: style.tick_width,
            start_color: style.edge_marker_color,
            end_color: style.edge_marker_color,
        };
        let markers = [
            marker(head_id, head_start, head_end),
            marker(tail_id, tail_start, tail_end),
        ];
        for instance in &markers {
            if decorations.edge_markers_attached {
                self.provider.update_tick(instance);
            } else {
                self.provider.add_tick(instance);
            }
        }
        decorations.edge_markers = Some(markers);
        decorations.edge_markers_attached = true;
    }

    /// Refreshes the head and tail labels showing the values at the view ends.
    pub(super) fn update_range_labels(&mut self) {
        let texts = if self.core.config.range_labels.enabled {
            self.core.range_texts()
        } else {
            None
        };
        let Some((head_text, tail_text)) = texts else {
            self.detach_range_labels();
            return;
        };

        let placement = self.core.range_label_placement();
        let AxisCore {
            config,
            decorations,
            ids,
            ..
        } = &mut self.core;
        let style = config.style;
        let [head_id, tail_id] = match &decorations.range_labels {
            Some([head, tail]) => [head.id, tail.id],
            None => [ids.allocate(), ids.allocate()],
        };
        let label = |id: VisualId, text: String, origin: Point, kind: AnchorType| LabelInstance {
            id,
            text,
            origin,
            font_size: style.label_font_size,
            color: style.range_label_color,
            anchor: LabelAnchor { kind, padding: 0.0 },
        };
        let labels = [
            label(head_id, head_text, placement.head_origin, placement.head_anchor),
            label(tail_id, tail_text, placement.tail_origin, placement.tail_anchor),
        ];
        for instance in &labels {
            if decorations.range_labels_attached {
                self.provider.update_label(instance);
            } else {
                self.provider.add_label(instance);
            }
        }
        trace!(
            head = labels[0].text.as_str(),
            tail = labels[1].text.as_str(),
            "range labels"
        );
        decorations.range_labels = Some(labels);
        decorations.range_labels_attached = true;
    }

    fn detach_range_labels(&mut self) {
        let decorations = &mut self.core.decorations;
        if !decorations.range_labels_attached {
            return;
        }
        if let Some(labels) = &decorations.range_labels {
            for label in labels {
                self.provider.remove_label(label.id);
            }
        }
        decorations.range_labels_attached = false;
    }
}
