//! Plot configuration shared across visualization functions

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust
/// use invariance::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::probe("Centre cell");
/// config.line_color = BLUE;
/// config.width = 1920;
/// config.height = 1080;
/// assert_eq!(config.xlabel, "Time (s)");
/// ```
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title; empty means no caption (default: "Plot")
    pub title: String,

    /// X-axis label (default: set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: "Temperature")
    pub ylabel: String,

    /// Line color for probe plots (default: RED)
    pub line_color: RGBColor,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Draw axes, grid lines and labels (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: "Temperature".to_string(),
            line_color: RED,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `&str`/`String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config for a 2D temperature map
    ///
    /// Axis labels are "x (m)" / "y (m)", default title "Temperature Field".
    pub fn heatmap(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "x (m)".to_string(),
            ylabel: "y (m)".to_string(),
            title: title.into_optional_title().unwrap_or_else(|| "Temperature Field".to_string()),
            ..Self::default()
        }
    }

    /// Config for a temperature-vs-time probe
    ///
    /// X label "Time (s)", default title "Probe".
    pub fn probe(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Time (s)".to_string(),
            title: title.into_optional_title().unwrap_or_else(|| "Probe".to_string()),
            ..Self::default()
        }
    }

    /// Config that draws no text at all (no caption, mesh or labels)
    pub fn bare(mut self) -> Self {
        self.title.clear();
        self.show_grid = false;
        self
    }
}

// =================================================================================================
// Tests
// =================================================================================================
