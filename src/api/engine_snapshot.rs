use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{InterpolatedRow, Viewport, placeholder_values};
use crate::interaction::InteractionMode;
use crate::render::Renderer;

use super::{Narrative, StoryCursor, StoryEngine};

/// Serializable deterministic state snapshot used by regression tests and
/// the trace tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub time_domain: (f64, f64),
    pub mode: InteractionMode,
    pub active: InterpolatedRow,
    pub cursor: StoryCursor,
    pub narrative: Narrative,
    /// Formatted template values of the active row, keyed by token.
    pub placeholders: IndexMap<String, String>,
    pub conversion_path: String,
    pub bounce_path: String,
}

impl<R: Renderer> StoryEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let active = self.interaction.active_row();
        EngineSnapshot {
            viewport: self.viewport(),
            time_domain: self.time_scale.domain(),
            mode: self.interaction.mode(),
            active,
            cursor: self.cursor(),
            narrative: self.narrative(),
            placeholders: placeholder_values(&active.row)
                .into_iter()
                .map(|(token, value)| (token.to_owned(), value))
                .collect(),
            conversion_path: self.conversion_curve.to_svg_path_data(),
            bounce_path: self.bounce_curve.to_svg_path_data(),
        }
    }
}
