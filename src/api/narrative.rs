use serde::{Deserialize, Serialize};

use crate::core::primitives::format_fixed;
use crate::core::{StoryRow, Zone, ZoneTone, render_template};
use crate::render::Renderer;

use super::StoryEngine;

/// Copy shown next to the chart for the active row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub zone_id: String,
    pub title: String,
    pub numeric: String,
    pub pitch: String,
    pub cta_label: String,
    pub tone: ZoneTone,
    pub load_time_badge: String,
}

impl Narrative {
    /// Renders `zone`'s templates against `row`.
    #[must_use]
    pub fn for_row(zone: &Zone, row: &StoryRow) -> Self {
        Self {
            zone_id: zone.id.clone(),
            title: zone.title.clone(),
            numeric: render_template(&zone.numeric, row),
            pitch: render_template(&zone.pitch, row),
            cta_label: zone.cta_label.clone(),
            tone: zone.tone,
            load_time_badge: format!("Load Time: {}s", format_fixed(row.t, 2)),
        }
    }
}

impl<R: Renderer> StoryEngine<R> {
    #[must_use]
    pub fn narrative(&self) -> Narrative {
        Narrative::for_row(self.active_zone(), &self.interaction.active_row().row)
    }
}
