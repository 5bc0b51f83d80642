use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};

/// Horizontal scale policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinHour {
    /// Derive pixels-per-hour from the spacing of the points.
    #[default]
    Auto,
    Fixed { pixels_per_hour: f64 },
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub min_hour: MinHour,
    #[serde(default = "default_min_plot_spacing")]
    pub min_plot_spacing: f64,
    #[serde(default = "default_true")]
    pub sub_plots: bool,
    #[serde(default = "default_true")]
    pub ampm: bool,
    #[serde(default = "default_true")]
    pub use_month_abbr: bool,
    #[serde(default)]
    pub use_day_abbr: bool,
    /// Extra range on each side, as a fraction of the viewport width.
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_activation_dist")]
    pub activation_dist: f64,
    /// Relayout automatically on viewport changes.
    #[serde(default = "default_true")]
    pub respond: bool,
    #[serde(default = "default_bce")]
    pub bce: String,
    #[serde(default = "default_ce")]
    pub ce: String,
    #[serde(default = "default_compact_breakpoint_px")]
    pub compact_breakpoint_px: u32,
}

impl TimelineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            min_hour: MinHour::Auto,
            min_plot_spacing: default_min_plot_spacing(),
            sub_plots: true,
            ampm: true,
            use_month_abbr: true,
            use_day_abbr: false,
            padding: default_padding(),
            activation_dist: default_activation_dist(),
            respond: true,
            bce: default_bce(),
            ce: default_ce(),
            compact_breakpoint_px: default_compact_breakpoint_px(),
        }
    }

    /// Pins the horizontal scale instead of deriving it from the points.
    #[must_use]
    pub fn with_fixed_pixels_per_hour(mut self, pixels_per_hour: f64) -> Self {
        self.min_hour = MinHour::Fixed { pixels_per_hour };
        self
    }

    #[must_use]
    pub fn with_min_plot_spacing(mut self, min_plot_spacing: f64) -> Self {
        self.min_plot_spacing = min_plot_spacing;
        self
    }

    #[must_use]
    pub fn with_sub_plots(mut self, sub_plots: bool) -> Self {
        self.sub_plots = sub_plots;
        self
    }

    /// Selects 12-hour (`3 PM`) over 24-hour (`15:00`) hour labels.
    #[must_use]
    pub fn with_ampm(mut self, ampm: bool) -> Self {
        self.ampm = ampm;
        self
    }

    #[must_use]
    pub fn with_name_abbreviations(mut self, use_month_abbr: bool, use_day_abbr: bool) -> Self {
        self.use_month_abbr = use_month_abbr;
        self.use_day_abbr = use_day_abbr;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_activation_dist(mut self, activation_dist: f64) -> Self {
        self.activation_dist = activation_dist;
        self
    }

    #[must_use]
    pub fn with_respond(mut self, respond: bool) -> Self {
        self.respond = respond;
        self
    }

    /// Sets the era suffixes printed after BCE and CE years on coarse tiers.
    #[must_use]
    pub fn with_era_suffixes(mut self, bce: impl Into<String>, ce: impl Into<String>) -> Self {
        self.bce = bce.into();
        self.ce = ce.into();
        self
    }

    #[must_use]
    pub fn with_compact_breakpoint_px(mut self, compact_breakpoint_px: u32) -> Self {
        self.compact_breakpoint_px = compact_breakpoint_px;
        self
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimelineError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_true() -> bool {
    true
}

fn default_min_plot_spacing() -> f64 {
    200.0
}

fn default_padding() -> f64 {
    0.5
}

fn default_activation_dist() -> f64 {
    10.0
}

fn default_bce() -> String {
    "BCE".to_owned()
}

fn default_ce() -> String {
    "CE".to_owned()
}

fn default_compact_breakpoint_px() -> u32 {
    500
}
