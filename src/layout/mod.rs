//! Layout engine: pixel geometry for badge charts, legends and stat grids.
//!
//! - Text width estimation from an average glyph width
//! - Time-series points, month ticks, alternating bands and a max-value callout
//! - Legend grid packing with aligned percentage suffixes
//! - Equal-width stat grids for profile cards
//!
//! Nothing here allocates beyond its output or fails: degenerate input produces a placeholder
//! or a clamped layout.

pub mod card;
pub mod chart;
pub mod legend;
pub mod text;
pub mod types;
pub mod util;

pub use card::{StatCell, StatGrid, layout_stats, top_languages};
pub use chart::build_chart;
pub use legend::{Cell, Column, GridSpec, LegendGrid, LegendItem, pack_legend};
pub use text::{AVG_GLYPH_WIDTH, FONT_FAMILY, estimate_text_width, estimate_width};
pub use types::{
    Anchor, Band, BandLabel, Callout, ChartBox, ChartGeometry, Placeholder, PlottedChart, Point,
    ScaleRule, Tick, TickKind,
};
