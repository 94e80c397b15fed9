//! Time-series geometry: points, month ticks, background bands and the max-value callout.

use chrono::Datelike;
use log::debug;

use super::types::{
    Anchor, Band, BandLabel, Callout, ChartBox, ChartGeometry, Placeholder, PlottedChart, Point,
    ScaleRule, Tick, TickKind,
};
use super::util::{fmt_coord, pix_snap, round1};
use crate::models::Sample;

/// Edge ticks are longer than month ticks.
const EDGE_TICK_LEN: f64 = 5.0;
const MONTH_TICK_LEN: f64 = 3.0;

/// Month numbers are only printed into bands at least this wide and charts this tall.
const BAND_LABEL_MIN_WIDTH: f64 = 35.0;
const BAND_LABEL_MIN_HEIGHT: f64 = 50.0;
const BAND_LABEL_OFFSET_Y: f64 = 30.0;

/// The callout text baseline sits a little below the point it marks.
const CALLOUT_OFFSET_Y: f64 = 4.0;
/// Matches the 1s draw-in animation of the chart stroke.
const CALLOUT_REVEAL_MS: u64 = 1000;

/// Build the geometry for `samples` inside `frame`.
///
/// Every value is floored at 1 before scaling and the denominator is
/// `max(max_value * headroom, floor, 1)`, so neither zero series nor zero-height boxes divide
/// by zero. An empty series yields [`ChartGeometry::Invalid`].
pub fn build_chart(samples: &[Sample], frame: ChartBox, rule: ScaleRule) -> ChartGeometry {
    if samples.is_empty() {
        debug!("no samples to plot, returning placeholder");
        return ChartGeometry::Invalid(Placeholder::default());
    }

    let frame = ChartBox {
        width: frame.width.max(0.0),
        height: frame.height.max(0.0),
        ..frame
    };
    let len = samples.len() as f64;

    let clamped: Vec<f64> = samples.iter().map(|s| s.value.max(1) as f64).collect();
    let max_clamped = clamped.iter().copied().fold(1.0, f64::max);
    let max_value = (max_clamped * rule.headroom).max(rule.floor).max(1.0);

    let points: Vec<Point> = clamped
        .iter()
        .enumerate()
        .map(|(i, v)| Point {
            x: round1(i as f64 / len * frame.width + frame.left),
            y: round1(frame.height - v / max_value * frame.height + frame.top),
        })
        .collect();

    let ticks = month_ticks(samples, &frame);
    let bands = month_bands(&ticks, &frame);
    let callout = max_callout(samples, &points);

    let joined = points
        .iter()
        .map(|p| format!("{},{}", fmt_coord(p.x), fmt_coord(p.y)))
        .collect::<Vec<_>>()
        .join("L");
    let base = fmt_coord(frame.baseline());
    let stroke_path = format!("M{joined}");
    let fill_path = format!("M{},{base}L{joined}V{base}", fmt_coord(frame.left));
    let ticks_path = ticks_path(&ticks, frame.baseline());

    debug!(
        "plotted {} samples, max_value={max_value}, {} ticks, {} bands",
        points.len(),
        ticks.len(),
        bands.len()
    );

    ChartGeometry::Plotted(PlottedChart {
        frame,
        max_value,
        points,
        ticks,
        bands,
        callout,
        stroke_path,
        fill_path,
        ticks_path,
    })
}

/// Edge ticks at both ends of the box plus one tick per first-of-month among the interior
/// samples (the first and last sample never get a month tick).
pub fn month_ticks(samples: &[Sample], frame: &ChartBox) -> Vec<Tick> {
    let step = if samples.is_empty() {
        0.0
    } else {
        frame.width / samples.len() as f64
    };

    let mut ticks = vec![Tick {
        x: pix_snap(frame.left),
        length: EDGE_TICK_LEN,
        kind: TickKind::Edge,
        month: None,
    }];

    let last = samples.len().saturating_sub(1);
    for (i, s) in samples.iter().enumerate() {
        if i == 0 || i >= last || s.date.day() != 1 {
            continue;
        }
        ticks.push(Tick {
            x: pix_snap(frame.left + i as f64 * step),
            length: MONTH_TICK_LEN,
            kind: TickKind::Month,
            month: Some(s.date.month()),
        });
    }

    ticks.push(Tick {
        x: pix_snap(frame.left + frame.width - 1.0),
        length: EDGE_TICK_LEN,
        kind: TickKind::Edge,
        month: None,
    });
    ticks
}

/// Stripes from every even month tick to the next month tick (or the closing edge tick).
pub fn month_bands(ticks: &[Tick], frame: &ChartBox) -> Vec<Band> {
    let months: Vec<&Tick> = ticks.iter().filter(|t| t.kind == TickKind::Month).collect();
    let end_x = ticks
        .iter()
        .rev()
        .find(|t| t.kind == TickKind::Edge)
        .map(|t| t.x)
        .unwrap_or(frame.left + frame.width);

    months
        .iter()
        .enumerate()
        .step_by(2)
        .filter_map(|(i, tick)| {
            let x2 = months.get(i + 1).map(|t| t.x).unwrap_or(end_x);
            let width = x2 - tick.x;
            if width <= 0.0 {
                return None;
            }
            let label = match tick.month {
                Some(month)
                    if frame.height > BAND_LABEL_MIN_HEIGHT && width > BAND_LABEL_MIN_WIDTH =>
                {
                    Some(BandLabel {
                        x: tick.x + width / 2.0,
                        y: frame.top + BAND_LABEL_OFFSET_Y,
                        month,
                    })
                }
                _ => None,
            };
            Some(Band {
                x: tick.x,
                y: frame.top,
                width,
                height: frame.height,
                label,
            })
        })
        .collect()
}

/// Callout for the first sample holding the maximum raw value; `None` for an all-zero series.
fn max_callout(samples: &[Sample], points: &[Point]) -> Option<Callout> {
    let mut best: Option<(usize, u64)> = None;
    for (i, s) in samples.iter().enumerate() {
        if best.is_none_or(|(_, v)| s.value > v) {
            best = Some((i, s.value));
        }
    }
    let (index, max) = best.filter(|&(_, v)| v > 0)?;
    let point = points.get(index)?;

    let in_first_half = (index as f64) < samples.len() as f64 / 2.0;
    let (anchor, text) = if in_first_half {
        (Anchor::End, format!("{max}- "))
    } else {
        (Anchor::Start, format!(" -{max}"))
    };

    Some(Callout {
        index,
        x: point.x,
        y: point.y + CALLOUT_OFFSET_Y,
        anchor,
        text,
        reveal_after_ms: CALLOUT_REVEAL_MS,
    })
}

fn ticks_path(ticks: &[Tick], axis_y: f64) -> String {
    ticks
        .iter()
        .map(|t| {
            format!(
                "M{},{}v{}",
                fmt_coord(t.x),
                fmt_coord(axis_y + 1.0),
                fmt_coord(t.length)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}
