use serde::{Deserialize, Serialize};

/// Pixel size and margins of the chart surface.
///
/// The usable plot area is the surface minus the margins. Annotations are
/// drawn into the top margin, price labels into the left one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl ChartDimensions {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin_left - self.margin_right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin_top - self.margin_bottom).max(0.0)
    }

    /// Screen y of the plot's bottom edge.
    pub fn plot_bottom(&self) -> f64 {
        self.margin_top + self.plot_height()
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            margin_top: 40.0,
            margin_right: 40.0,
            margin_bottom: 40.0,
            margin_left: 70.0,
        }
    }
}

/// A single plotted point in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,

    /// Price the point represents
    pub price: f64,

    /// Axis label: "Today" for the first point, the short date otherwise
    pub label: String,

    pub is_today: bool,

    /// Holds the maximum or minimum price of the series
    pub is_extremum: bool,
}

/// A horizontal gridline with its price label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gridline {
    pub y: f64,
    pub price: f64,
    pub label: String,
}

/// Why a point is annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationKind {
    Today,
    Max,
    Min,
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotationKind::Today => write!(f, "Today"),
            AnnotationKind::Max => write!(f, "Max"),
            AnnotationKind::Min => write!(f, "Min"),
        }
    }
}

/// A label box anchored above a plotted point.
///
/// A point that is e.g. both today and the maximum gets a single box
/// listing both kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Index into [`ChartGeometry::points`]
    pub point_index: usize,

    /// Top-left corner of the box
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    pub kinds: Vec<AnnotationKind>,

    /// e.g. "Today · Max"
    pub caption: String,

    /// Formatted price, e.g. "$184.50"
    pub label: String,
}

/// Drawable geometry for the forecast chart.
///
/// Recomputed on every render and never persisted. Rendering targets (SVG,
/// canvas, a test assertion) consume it as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub points: Vec<PlotPoint>,

    /// SVG path through all points ("M x y L x y ...")
    pub line_path: String,

    /// Closed SVG path from the line down to the plot bottom
    pub area_path: String,

    pub gridlines: Vec<Gridline>,
    pub annotations: Vec<Annotation>,

    /// Lowest and highest plotted price
    pub min_price: f64,
    pub max_price: f64,
}

impl ChartGeometry {
    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
