use tracing::{debug, trace, warn};

use crate::core::{ContainerRect, InterpolatedRow, Zone};
use crate::error::ChartResult;
use crate::interaction::{InteractionMode, InteractionState, PointerSample};
use crate::render::Renderer;

use super::StoryEngine;

impl<R: Renderer> StoryEngine<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction
    }

    /// Row currently displayed: the seed row until a pointer moves in.
    #[must_use]
    pub fn active_row(&self) -> InterpolatedRow {
        self.interaction.active_row()
    }

    #[must_use]
    pub fn active_zone_index(&self) -> usize {
        self.interaction.active_zone_index()
    }

    #[must_use]
    pub fn active_zone(&self) -> &Zone {
        &self.tables.zones.zones()[self.interaction.active_zone_index()]
    }

    /// Moves the cursor to a mouse position over `rect`.
    ///
    /// Invalid input (non-finite coordinates, degenerate rect) is logged and
    /// ignored; the previous row stays active. Returns the active row after
    /// the event.
    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect: ContainerRect,
    ) -> InterpolatedRow {
        self.apply_pointer(PointerSample::mouse(client_x, client_y), rect)
    }

    /// Moves the cursor to the first touch point over `rect`.
    pub fn touch_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect: ContainerRect,
    ) -> InterpolatedRow {
        self.apply_pointer(PointerSample::touch(client_x, client_y), rect)
    }

    /// Restores the seed row. Returns `true` when the zone changed.
    pub fn pointer_leave(&mut self) -> bool {
        let zone_changed = self.interaction.on_pointer_leave();
        trace!("pointer leave");
        if zone_changed {
            debug!(zone = %self.active_zone().id, "zone restored to seed");
        }
        zone_changed
    }

    /// Interpolated row at a plot-space x without touching interaction state.
    pub fn interpolate_at_plot_x(&self, plot_x: f64) -> ChartResult<InterpolatedRow> {
        Ok(self.interpolator()?.at_plot_x(plot_x))
    }

    /// Interpolated row at load time `t` without touching interaction state.
    pub fn interpolate_at_time(&self, t: f64) -> ChartResult<InterpolatedRow> {
        Ok(self.interpolator()?.at_time(t))
    }

    fn apply_pointer(&mut self, pointer: PointerSample, rect: ContainerRect) -> InterpolatedRow {
        let row = match self
            .interpolator()
            .and_then(|interpolator| interpolator.at_pointer(pointer.client_x, rect))
        {
            Ok(row) => row,
            Err(err) => {
                warn!(
                    error = %err,
                    client_x = pointer.client_x,
                    rect_width = rect.width,
                    kind = ?pointer.kind,
                    "ignoring pointer event"
                );
                return self.interaction.active_row();
            }
        };

        let zone_index = self.tables.zones.classify_index(row.t());
        let zone_changed = self.interaction.on_pointer_move(pointer, row, zone_index);
        trace!(
            t = row.t(),
            plot_x = row.plot_x,
            lower_index = row.lower_index,
            ratio = row.ratio,
            "pointer move"
        );
        if zone_changed {
            debug!(zone = %self.active_zone().id, t = row.t(), "zone changed");
        }
        row
    }
}
