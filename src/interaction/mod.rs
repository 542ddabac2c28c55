pub mod emphasis;

use serde::{Deserialize, Serialize};

use crate::core::InterpolatedRow;

pub use emphasis::{
    CardEmphasis, EmphasisBand, EmphasisBands, EmphasisState, SPEED_REVENUE_VIEW_BOX_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    /// No pointer over the chart; the seed row is displayed.
    Idle,
    /// A pointer or touch is driving the active row.
    Tracking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Last pointer event that reached the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    pub kind: PointerKind,
}

impl PointerSample {
    #[must_use]
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            kind: PointerKind::Mouse,
        }
    }

    #[must_use]
    pub fn touch(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            kind: PointerKind::Touch,
        }
    }
}

/// Displayed row and zone of the performance story.
///
/// Every event replaces the previous state wholesale; nothing accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    mode: InteractionMode,
    seed: InterpolatedRow,
    seed_zone_index: usize,
    active: InterpolatedRow,
    active_zone_index: usize,
    pointer: Option<PointerSample>,
}

impl InteractionState {
    #[must_use]
    pub fn new(seed: InterpolatedRow, seed_zone_index: usize) -> Self {
        Self {
            mode: InteractionMode::Idle,
            seed,
            seed_zone_index,
            active: seed,
            active_zone_index: seed_zone_index,
            pointer: None,
        }
    }

    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn active_row(self) -> InterpolatedRow {
        self.active
    }

    #[must_use]
    pub fn active_zone_index(self) -> usize {
        self.active_zone_index
    }

    #[must_use]
    pub fn seed_row(self) -> InterpolatedRow {
        self.seed
    }

    #[must_use]
    pub fn pointer(self) -> Option<PointerSample> {
        self.pointer
    }

    /// Replaces the active row. Returns `true` when the zone changed.
    pub fn on_pointer_move(
        &mut self,
        pointer: PointerSample,
        row: InterpolatedRow,
        zone_index: usize,
    ) -> bool {
        let zone_changed = zone_index != self.active_zone_index;
        self.mode = InteractionMode::Tracking;
        self.pointer = Some(pointer);
        self.active = row;
        self.active_zone_index = zone_index;
        zone_changed
    }

    /// Reverts to the seed row. Returns `true` when the zone changed.
    pub fn on_pointer_leave(&mut self) -> bool {
        let zone_changed = self.seed_zone_index != self.active_zone_index;
        self.mode = InteractionMode::Idle;
        self.pointer = None;
        self.active = self.seed;
        self.active_zone_index = self.seed_zone_index;
        zone_changed
    }
}
