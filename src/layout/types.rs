//! Public geometry types produced by the layout engine.

use serde::{Deserialize, Serialize};

/// Pixel box a chart is drawn into, offset from the badge origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl ChartBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: 0.0,
            top: 0.0,
        }
    }

    pub fn offset(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Y of the value baseline (bottom edge of the box).
    pub fn baseline(&self) -> f64 {
        self.top + self.height
    }
}

/// How the scaling denominator is derived from the observed maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRule {
    /// Multiplier applied to the maximum (1.1 leaves headroom above the highest point).
    pub headroom: f64,
    /// Smallest allowed denominator, so tiny series do not fill the whole box.
    pub floor: f64,
}

impl ScaleRule {
    /// Calendar/bar charts: scale straight to the maximum.
    pub const EXACT: ScaleRule = ScaleRule {
        headroom: 1.0,
        floor: 1.0,
    };

    /// Sparklines: 10% headroom and a minimum visual scale.
    pub fn sparkline(floor: f64) -> Self {
        Self {
            headroom: 1.1,
            floor,
        }
    }
}

impl Default for ScaleRule {
    fn default() -> Self {
        Self::EXACT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Text anchor of the maximum-value callout, in SVG terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Text ends at the point (label sits to the left).
    End,
    /// Text starts at the point (label sits to the right).
    Start,
}

impl Anchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::End => "end",
            Anchor::Start => "start",
        }
    }
}

/// Annotation marking the sample with the highest value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub anchor: Anchor,
    pub text: String,
    /// Delay after which the consumer should fade the callout in (after the draw-in animation).
    pub reveal_after_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickKind {
    /// First or last x of the chart box.
    Edge,
    /// First day of a month.
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub x: f64,
    pub length: f64,
    pub kind: TickKind,
    /// Month number (1-12) for month ticks.
    pub month: Option<u32>,
}

/// Centered month number drawn inside a wide enough band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandLabel {
    pub x: f64,
    pub y: f64,
    pub month: u32,
}

/// Alternating background stripe between two month ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: Option<BandLabel>,
}

/// Fully computed chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlottedChart {
    pub frame: ChartBox,
    /// Denominator every value was scaled by.
    pub max_value: f64,
    pub points: Vec<Point>,
    pub ticks: Vec<Tick>,
    pub bands: Vec<Band>,
    /// Absent when every sample is zero.
    pub callout: Option<Callout>,
    pub stroke_path: String,
    pub fill_path: String,
    pub ticks_path: String,
}

/// Fixed box shown when there is nothing to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub width: u32,
    pub height: u32,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

impl Placeholder {
    pub const WIDTH: u32 = 100;
    pub const HEIGHT: u32 = 30;
    pub const LABEL: &'static str = "invalid";
}

impl Default for Placeholder {
    fn default() -> Self {
        Self {
            width: Self::WIDTH,
            height: Self::HEIGHT,
            label: Self::LABEL.to_string(),
            label_x: f64::from(Self::WIDTH) / 2.0,
            label_y: f64::from(Self::HEIGHT) / 2.0,
        }
    }
}

/// Result of the chart builder: always renderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartGeometry {
    Plotted(PlottedChart),
    Invalid(Placeholder),
}

impl ChartGeometry {
    pub fn is_invalid(&self) -> bool {
        matches!(self, ChartGeometry::Invalid(_))
    }

    pub fn plotted(&self) -> Option<&PlottedChart> {
        match self {
            ChartGeometry::Plotted(chart) => Some(chart),
            ChartGeometry::Invalid(_) => None,
        }
    }
}
