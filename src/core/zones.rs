use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Visual tone of a zone: drives badge and glow colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoneTone {
    Positive,
    Warning,
    #[default]
    Critical,
}

/// Narrative band of the load-time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    /// Inclusive upper bound on `t`.
    pub max_t: f64,
    pub title: String,
    /// Metric sentence with `{{placeholder}}` tokens.
    pub numeric: String,
    /// Sales pitch sentence with `{{placeholder}}` tokens.
    pub pitch: String,
    pub cta_label: String,
    #[serde(default)]
    pub tone: ZoneTone,
}

impl Zone {
    #[must_use]
    pub fn new(id: impl Into<String>, max_t: f64) -> Self {
        Self {
            id: id.into(),
            max_t,
            title: String::new(),
            numeric: String::new(),
            pitch: String::new(),
            cta_label: String::new(),
            tone: ZoneTone::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_templates(mut self, numeric: impl Into<String>, pitch: impl Into<String>) -> Self {
        self.numeric = numeric.into();
        self.pitch = pitch.into();
        self
    }

    #[must_use]
    pub fn with_cta_label(mut self, cta_label: impl Into<String>) -> Self {
        self.cta_label = cta_label.into();
        self
    }

    #[must_use]
    pub fn with_tone(mut self, tone: ZoneTone) -> Self {
        self.tone = tone;
        self
    }
}

/// Ordered zone list; the last zone catches every `t` beyond the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Zone>", into = "Vec<Zone>")]
pub struct ZoneTable {
    zones: Vec<Zone>,
}

impl ZoneTable {
    pub fn new(zones: Vec<Zone>) -> ChartResult<Self> {
        if zones.is_empty() {
            return Err(ChartError::InvalidData(
                "zone table must contain at least one zone".to_owned(),
            ));
        }
        if zones.iter().any(|zone| zone.max_t.is_nan()) {
            return Err(ChartError::InvalidData(
                "zone bounds must not be NaN".to_owned(),
            ));
        }
        if let Some(index) = zones
            .windows(2)
            .position(|pair| pair[1].max_t <= pair[0].max_t)
        {
            return Err(ChartError::InvalidData(format!(
                "zone bounds must be strictly ascending (zones `{}` and `{}`)",
                zones[index].id,
                zones[index + 1].id
            )));
        }

        Ok(Self { zones })
    }

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Always `false`; construction rejects empty tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Index of the first zone with `max_t >= t`, else the last zone.
    ///
    /// A `t` equal to a bound belongs to the lower zone.
    #[must_use]
    pub fn classify_index(&self, t: f64) -> usize {
        self.zones
            .partition_point(|zone| zone.max_t < t)
            .min(self.zones.len() - 1)
    }

    #[must_use]
    pub fn classify(&self, t: f64) -> &Zone {
        &self.zones[self.classify_index(t)]
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }
}

impl TryFrom<Vec<Zone>> for ZoneTable {
    type Error = ChartError;

    fn try_from(zones: Vec<Zone>) -> ChartResult<Self> {
        Self::new(zones)
    }
}

impl From<ZoneTable> for Vec<Zone> {
    fn from(table: ZoneTable) -> Self {
        table.zones
    }
}
