use serde::{Deserialize, Serialize};

use crate::core::{StoryDataset, StoryRow, Zone, ZoneTable, ZoneTone};
use crate::error::{ChartError, ChartResult};

/// Bound stored on a catch-all zone. Finite so the table survives JSON.
pub const CATCH_ALL_MAX_T: f64 = f64::MAX;

/// Row shown before any interaction: the 3.0s sample.
pub const PERFORMANCE_STORY_SEED_INDEX: usize = 4;

const PERFORMANCE_STORY_ROWS: [StoryRow; 9] = [
    StoryRow::new(0.5, 3.20, 5.0, 104.9, -4.9, 32.0, -20.0),
    StoryRow::new(1.0, 3.05, 7.0, 100.0, 0.0, 30.5, 0.0),
    StoryRow::new(1.5, 2.40, 8.0, 78.7, 21.3, 24.0, 10.0),
    StoryRow::new(2.0, 1.68, 9.0, 55.1, 44.9, 16.8, 20.0),
    StoryRow::new(3.0, 1.40, 11.0, 45.9, 54.1, 14.0, 40.0),
    StoryRow::new(4.0, 1.20, 20.0, 39.3, 60.7, 12.0, 130.0),
    StoryRow::new(5.0, 1.08, 38.0, 35.4, 64.6, 10.8, 310.0),
    StoryRow::new(7.0, 0.90, 48.0, 29.5, 70.5, 9.0, 410.0),
    StoryRow::new(10.0, 0.60, 60.0, 19.7, 80.3, 6.0, 530.0),
];

const SECURE_CTA: &str = "Secure This Speed";
const SPEED_FIRST_CTA: &str = "Get a Speed-First Build";
const FIX_CTA: &str = "Fix My Site Speed";

/// Versioned presentation tables: dataset, zone list and seed row.
///
/// Swapping tables changes the story without touching the algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryTables {
    pub dataset: StoryDataset,
    pub zones: ZoneTable,
    pub seed_index: usize,
}

impl StoryTables {
    pub fn new(dataset: StoryDataset, zones: ZoneTable, seed_index: usize) -> ChartResult<Self> {
        Self {
            dataset,
            zones,
            seed_index,
        }
        .validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.seed_index >= self.dataset.len() {
            return Err(ChartError::InvalidData(format!(
                "seed index {} is out of range for {} rows",
                self.seed_index,
                self.dataset.len()
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn seed_row(&self) -> StoryRow {
        self.dataset.rows()[self.seed_index]
    }

    /// The "performance story" tables shipped with the site.
    ///
    /// Sources: Portent (2022), Google/SOASTA, Deloitte "Milliseconds Make
    /// Millions", Akamai retail performance.
    pub fn performance_story() -> ChartResult<Self> {
        Self::new(
            performance_story_dataset()?,
            performance_story_zones()?,
            PERFORMANCE_STORY_SEED_INDEX,
        )
    }
}

pub fn performance_story_dataset() -> ChartResult<StoryDataset> {
    StoryDataset::new(PERFORMANCE_STORY_ROWS.to_vec())
}

pub fn performance_story_zones() -> ChartResult<ZoneTable> {
    let zones = vec![
        Zone::new("ultra_fast", 0.9)
            .with_title("Elite Speed")
            .with_templates(
                "{{bounce}}% bounce. ~{{sales}} sales/1k visits. {{relConv}}% power.",
                "Your site feels instant. Competitors feel broken. You win.",
            )
            .with_cta_label(SECURE_CTA)
            .with_tone(ZoneTone::Positive),
        Zone::new("fast_but_not_elite", 1.8)
            .with_title("Hidden Revenue Loss")
            .with_templates(
                "{{bounce}}% bounce. ~{{sales}} sales/1k visits. {{loss}}% lost sales vs 1s.",
                "0.1s improvement = ~8% more conversions. Optimize now.",
            )
            .with_cta_label(SECURE_CTA)
            .with_tone(ZoneTone::Critical),
        Zone::new("risk_zone", 3.5)
            .with_title("Visitors Give Up")
            .with_templates(
                "{{bounce}}% bounce. ~{{sales}} sales/1k visits. {{bounceVs1s}} extra lost users.",
                "Typical DIY zone. Users leave, ads waste money.",
            )
            .with_cta_label(SPEED_FIRST_CTA)
            .with_tone(ZoneTone::Warning),
        Zone::new("pain_zone", 5.5)
            .with_title("Burning Budget")
            .with_templates(
                "{{bounce}}% bounce. ~{{sales}} sales/1k visits. Conv. down {{loss}}%.",
                "Ad budget wasted on clicks that never load. Fix it.",
            )
            .with_cta_label(FIX_CTA)
            .with_tone(ZoneTone::Critical),
        Zone::new("really_slow", 8.0)
            .with_title("Broken Experience")
            .with_templates(
                "{{bounce}}% bounce. ~{{sales}} sales/1k visits. Users don't wait.",
                "Users don't wait. Rebuild pays for itself fast.",
            )
            .with_cta_label(FIX_CTA)
            .with_tone(ZoneTone::Critical),
        Zone::new("almost_unusable", CATCH_ALL_MAX_T)
            .with_title("Invisible Online")
            .with_templates(
                "{{bounce}}% bounce. ~{{sales}} sales/1k visits. Zero impact.",
                "Performance is survival. You need a rebuild.",
            )
            .with_cta_label(FIX_CTA)
            .with_tone(ZoneTone::Critical),
    ];
    ZoneTable::new(zones)
}
