use tracing::debug;

use crate::core::{Point, Size, SurfaceSize, ViewRect};
use crate::error::{AxisError, AxisResult};
use crate::render::VisualProvider;

use super::{AxisEngine, axis_config::validate_view};

impl<P: VisualProvider> AxisEngine<P> {
    /// Moves or resizes the axis and rebuilds it from zoom 1.
    pub fn set_view(&mut self, view: ViewRect) -> AxisResult<()> {
        validate_view(view)?;
        debug!(
            x = view.origin.x,
            y = view.origin.y,
            width = view.size.width,
            height = view.size.height,
            "set axis view"
        );
        self.core.config.view = view;
        self.rebuild();
        Ok(())
    }

    /// Reacts to a new surface size.
    ///
    /// With `resize_with_surface` the view scales with the surface; otherwise
    /// it keeps its pixel geometry. Either way the axis is rebuilt, since a
    /// vertical axis measures from the surface bottom.
    pub fn resize(&mut self, surface: SurfaceSize) -> AxisResult<()> {
        if !surface.is_valid() {
            return Err(AxisError::InvalidConfig(format!(
                "surface size must be finite and > 0 (width={}, height={})",
                surface.width, surface.height
            )));
        }
        let previous = self.core.config.surface;
        let view = self.core.config.view;
        let view = if self.core.config.resize_with_surface {
            let sx = surface.width / previous.width;
            let sy = surface.height / previous.height;
            ViewRect::new(
                Point::new(view.origin.x * sx, view.origin.y * sy),
                Size::new(view.size.width * sx, view.size.height * sy),
            )
        } else {
            view
        };
        validate_view(view)?;
        debug!(
            width = surface.width,
            height = surface.height,
            scaled = self.core.config.resize_with_surface,
            "resize axis surface"
        );
        self.core.config.surface = surface;
        self.core.config.view = view;
        self.rebuild();
        Ok(())
    }

    /// Toggles between horizontal and vertical layout.
    pub fn change_axis(&mut self) {
        let orientation = self.core.config.orientation.toggled();
        debug!(?orientation, "change axis orientation");
        self.core.config.orientation = orientation;
        self.rebuild();
    }
}
