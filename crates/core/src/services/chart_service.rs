use crate::errors::CoreError;
use crate::models::chart::{
    Annotation, AnnotationKind, ChartDimensions, ChartGeometry, Gridline, PlotPoint,
};
use crate::models::prediction::Prediction;
use crate::services::format::{format_date_short, format_price};

/// Share of the price range added above and below the series.
pub const VERTICAL_PADDING_RATIO: f64 = 0.2;

/// Nominal range for a flat series, as a share of its price.
pub const FLAT_RANGE_RATIO: f64 = 0.01;

/// Nominal range for a flat series sitting at exactly zero.
pub const FLAT_RANGE_EPSILON: f64 = 1.0;

/// Gridline positions as fractions of the plot height, top to bottom.
pub const GRIDLINE_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub const ANNOTATION_WIDTH: f64 = 84.0;
pub const ANNOTATION_HEIGHT: f64 = 34.0;

/// Gap between a point and the bottom of its annotation box.
pub const ANNOTATION_GAP: f64 = 8.0;

/// Linear price ↔ screen-y mapping over the padded price band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    /// Price at the bottom of the plot
    pub low: f64,
    /// Price at the top of the plot
    pub high: f64,
}

impl PriceScale {
    /// Padded scale for a series spanning `[min, max]`.
    ///
    /// A flat series (`min == max`) gets a nominal range centred on its
    /// price so the scale never collapses.
    pub fn for_range(min: f64, max: f64) -> Self {
        let (min, max) = if max - min == 0.0 {
            let nominal = if min != 0.0 {
                min.abs() * FLAT_RANGE_RATIO
            } else {
                FLAT_RANGE_EPSILON
            };
            (min - nominal / 2.0, max + nominal / 2.0)
        } else {
            (min, max)
        };
        let pad = (max - min) * VERTICAL_PADDING_RATIO;
        Self {
            low: min - pad,
            high: max + pad,
        }
    }

    /// Both bounds and the span between them are finite. Huge prices can
    /// overflow once padded.
    pub fn is_finite(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && (self.high - self.low).is_finite()
    }

    /// Screen y for `price`: higher prices sit closer to the top.
    pub fn y_for(&self, price: f64, dims: &ChartDimensions) -> f64 {
        dims.margin_top + (self.high - price) / (self.high - self.low) * dims.plot_height()
    }

    /// Price at `fraction` of the plot height, measured from the top.
    pub fn price_at(&self, fraction: f64) -> f64 {
        self.high - fraction * (self.high - self.low)
    }
}

/// Lays out the forecast line chart.
///
/// The engine only computes geometry: which points go where, the line and
/// area paths, gridlines and annotation boxes. Drawing is up to the caller.
/// It is a pure function of the prediction and the dimensions, so the same
/// input always yields identical geometry.
pub struct ChartService {
    dimensions: ChartDimensions,
}

impl ChartService {
    pub fn new() -> Self {
        Self::with_dimensions(ChartDimensions::default())
    }

    pub fn with_dimensions(dimensions: ChartDimensions) -> Self {
        Self { dimensions }
    }

    pub fn dimensions(&self) -> &ChartDimensions {
        &self.dimensions
    }

    /// Lay out today's prediction followed by every forecast day.
    ///
    /// An empty forecast produces empty geometry. A non-finite price fails
    /// with [`CoreError::InvalidGeometryInput`]; bad dates only degrade the
    /// point labels.
    pub fn layout_forecast(&self, prediction: &Prediction) -> Result<ChartGeometry, CoreError> {
        if prediction.next_days.is_empty() {
            return Ok(ChartGeometry::default());
        }

        let dims = &self.dimensions;

        // Index 0 is today, then the forecast days in upstream order.
        let mut series = Vec::with_capacity(prediction.next_days.len() + 1);
        series.push((prediction.predicted_close, "Today".to_string()));
        for day in &prediction.next_days {
            series.push((day.predicted_close, format_date_short(&day.date)));
        }

        if let Some(i) = series.iter().position(|(price, _)| !price.is_finite()) {
            return Err(CoreError::InvalidGeometryInput(format!(
                "price at point {i} is not finite ({})",
                series[i].0
            )));
        }

        let min_price = series.iter().map(|(p, _)| *p).fold(f64::INFINITY, f64::min);
        let max_price = series.iter().map(|(p, _)| *p).fold(f64::NEG_INFINITY, f64::max);
        let scale = PriceScale::for_range(min_price, max_price);
        if !scale.is_finite() {
            return Err(CoreError::InvalidGeometryInput(format!(
                "price range {min_price}..{max_price} overflows the vertical scale"
            )));
        }

        let n = series.len();
        let points: Vec<PlotPoint> = series
            .into_iter()
            .enumerate()
            .map(|(i, (price, label))| PlotPoint {
                x: x_for(i, n, dims),
                y: scale.y_for(price, dims),
                price,
                label,
                is_today: i == 0,
                is_extremum: price == max_price || price == min_price,
            })
            .collect();

        let line_path = line_path(&points);
        let area_path = area_path(&line_path, &points, dims.plot_bottom());

        let gridlines = GRIDLINE_FRACTIONS
            .iter()
            .map(|&fraction| {
                let price = scale.price_at(fraction);
                Gridline {
                    y: dims.margin_top + fraction * dims.plot_height(),
                    price,
                    label: format_price(Some(price)),
                }
            })
            .collect();

        let annotations = points
            .iter()
            .enumerate()
            .filter_map(|(i, point)| annotate(i, point, min_price, max_price, dims))
            .collect();

        tracing::debug!(points = n, min_price, max_price, "laid out forecast chart");

        Ok(ChartGeometry {
            points,
            line_path,
            area_path,
            gridlines,
            annotations,
            min_price,
            max_price,
        })
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out `prediction` on a surface of the given dimensions.
pub fn layout_forecast(
    prediction: &Prediction,
    dimensions: ChartDimensions,
) -> Result<ChartGeometry, CoreError> {
    ChartService::with_dimensions(dimensions).layout_forecast(prediction)
}

fn x_for(i: usize, n: usize, dims: &ChartDimensions) -> f64 {
    if n > 1 {
        dims.margin_left + (i as f64 / (n - 1) as f64) * dims.plot_width()
    } else {
        dims.margin_left + dims.plot_width() / 2.0
    }
}

fn line_path(points: &[PlotPoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i == 0 { "M" } else { "L" };
            format!("{cmd} {:.2} {:.2}", p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn area_path(line: &str, points: &[PlotPoint], bottom: f64) -> String {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => format!(
            "{line} L {:.2} {bottom:.2} L {:.2} {bottom:.2} Z",
            last.x, first.x
        ),
        _ => String::new(),
    }
}

/// One box per qualifying point, listing every reason it qualifies.
fn annotate(
    index: usize,
    point: &PlotPoint,
    min_price: f64,
    max_price: f64,
    dims: &ChartDimensions,
) -> Option<Annotation> {
    let mut kinds = Vec::new();
    if point.is_today {
        kinds.push(AnnotationKind::Today);
    }
    if point.price == max_price {
        kinds.push(AnnotationKind::Max);
    }
    if point.price == min_price {
        kinds.push(AnnotationKind::Min);
    }
    if kinds.is_empty() {
        return None;
    }

    let caption = kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" · ");

    // Keep the box inside the surface horizontally and below its top edge.
    let max_x = (dims.width - ANNOTATION_WIDTH).max(0.0);
    Some(Annotation {
        point_index: index,
        x: (point.x - ANNOTATION_WIDTH / 2.0).clamp(0.0, max_x),
        y: (point.y - ANNOTATION_GAP - ANNOTATION_HEIGHT).max(0.0),
        width: ANNOTATION_WIDTH,
        height: ANNOTATION_HEIGHT,
        kinds,
        caption,
        label: format_price(Some(point.price)),
    })
}
