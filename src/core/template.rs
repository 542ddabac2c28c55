use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::StoryRow;
use crate::core::primitives::format_fixed;

/// Token understood inside `{{...}}` in zone copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placeholder {
    LoadTime,
    Conversion,
    Bounce,
    RelativeConversion,
    Sales,
    Loss,
    BounceDelta,
    RetainedVisitors,
}

impl Placeholder {
    pub const ALL: [Self; 8] = [
        Self::LoadTime,
        Self::Conversion,
        Self::Bounce,
        Self::RelativeConversion,
        Self::Sales,
        Self::Loss,
        Self::BounceDelta,
        Self::RetainedVisitors,
    ];

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::LoadTime => "t",
            Self::Conversion => "conv",
            Self::Bounce => "bounce",
            Self::RelativeConversion => "relConv",
            Self::Sales => "sales",
            Self::Loss => "loss",
            Self::BounceDelta => "bounceVs1s",
            Self::RetainedVisitors => "100_minus_bounce",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }

    /// Decimal places: one for rates, zero for percentage deltas.
    #[must_use]
    pub fn precision(self) -> u32 {
        match self {
            Self::LoadTime
            | Self::Conversion
            | Self::Bounce
            | Self::Sales
            | Self::RetainedVisitors => 1,
            Self::RelativeConversion | Self::Loss | Self::BounceDelta => 0,
        }
    }

    #[must_use]
    pub fn value(self, row: &StoryRow) -> f64 {
        match self {
            Self::LoadTime => row.t,
            Self::Conversion => row.conversion_rate,
            Self::Bounce => row.bounce_rate,
            Self::RelativeConversion => row.relative_conversion,
            Self::Sales => row.estimated_sales,
            // Copy reads "X% lost" / "X extra lost users"; the sign is implied.
            Self::Loss => row.loss_percent.abs(),
            Self::BounceDelta => row.bounce_delta_vs_baseline.abs(),
            Self::RetainedVisitors => 100.0 - row.bounce_rate,
        }
    }

    #[must_use]
    pub fn format(self, row: &StoryRow) -> String {
        format_fixed(self.value(row), self.precision())
    }
}

/// Formatted value of every placeholder for `row`, keyed by token.
#[must_use]
pub fn placeholder_values(row: &StoryRow) -> IndexMap<&'static str, String> {
    Placeholder::ALL
        .into_iter()
        .map(|placeholder| (placeholder.token(), placeholder.format(row)))
        .collect()
}

/// Replaces every `{{token}}` in `template` with the formatted row value.
///
/// Unknown tokens and unterminated braces are kept verbatim.
#[must_use]
pub fn render_template(template: &str, row: &StoryRow) -> String {
    let mut rendered = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        rendered.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            rendered.push_str(&rest[open..]);
            return rendered;
        };

        let token = &after_open[..close];
        match Placeholder::from_token(token.trim()) {
            Some(placeholder) => rendered.push_str(&placeholder.format(row)),
            None => {
                trace!(token, "leaving unknown template token in place");
                rendered.push_str(&rest[open..open + 2 + close + 2]);
            }
        }
        rest = &after_open[close + 2..];
    }

    rendered.push_str(rest);
    rendered
}
