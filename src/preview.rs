//! Raster/vector previews of computed chart geometry, for eyeballing layouts.
//!
//! This is not the badge markup: it draws bands, axis, area, stroke, ticks and the callout
//! marker straight from a [`PlottedChart`] so layout changes can be reviewed as images.
//! Text is left out (the `ab_glyph` path would need a bundled font).

use crate::layout::{PlottedChart, TickKind};
use anyhow::{Result, anyhow};
use log::debug;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

/// Colors used by the preview.
#[derive(Debug, Clone, Copy)]
pub struct PreviewStyle {
    pub line: RGBColor,
    pub band: RGBColor,
    pub axis: RGBColor,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            line: RGBColor(0x44, 0xcc, 0x11),
            band: RGBColor(0xf6, 0xf8, 0xfa),
            axis: RGBColor(0x99, 0x99, 0x99),
        }
    }
}

impl PreviewStyle {
    /// Build from CSS-ish colors; anything that is not `#rgb`/`#rrggbb` keeps the default.
    pub fn from_css(line: &str, band: &str, axis: &str) -> Self {
        let d = Self::default();
        Self {
            line: parse_hex_color(line).unwrap_or(d.line),
            band: parse_hex_color(band).unwrap_or(d.band),
            axis: parse_hex_color(axis).unwrap_or(d.axis),
        }
    }
}

/// Parse `#rgb` or `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(raw: &str) -> Option<RGBColor> {
    let hex = raw.trim().trim_start_matches('#');
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some(RGBColor(it.next()??, it.next()??, it.next()??))
        }
        6 => Some(RGBColor(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

/// Render `chart` to `out_path` (`.svg` -> SVG, anything else -> PNG) on a canvas that leaves
/// the chart's own offsets as margin on every side.
pub fn render_chart_preview<P: AsRef<Path>>(
    chart: &PlottedChart,
    out_path: P,
    style: PreviewStyle,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let f = chart.frame;
    let width = (f.width + 2.0 * f.left).ceil().max(1.0) as u32;
    // Room below the axis for the tick marks.
    let height = (f.height + 2.0 * f.top + 8.0).ceil().max(1.0) as u32;

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_preview(root, chart, style)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_preview(root, chart, style)?;
    }
    debug!("wrote {width}x{height} preview to {}", out_path.display());
    Ok(())
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn draw_preview<DB>(
    root: DrawingArea<DB, Shift>,
    chart: &PlottedChart,
    style: PreviewStyle,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let f = chart.frame;
    let base = px(f.baseline());

    for band in &chart.bands {
        root.draw(&Rectangle::new(
            [
                (px(band.x), px(band.y)),
                (px(band.x + band.width), px(band.y + band.height)),
            ],
            style.band.filled(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.draw(&Rectangle::new(
        [(px(f.left), base), (px(f.left + f.width), base + 1)],
        style.axis.filled(),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    for tick in &chart.ticks {
        // Month ticks are drawn lighter than the edge ticks.
        let color = match tick.kind {
            TickKind::Edge => style.axis.to_rgba(),
            TickKind::Month => style.axis.mix(0.6),
        };
        let len = px(tick.length);
        root.draw(&PathElement::new(
            vec![(px(tick.x), base + 1), (px(tick.x), base + 1 + len)],
            color.stroke_width(1),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    let line: Vec<(i32, i32)> = chart.points.iter().map(|p| (px(p.x), px(p.y))).collect();
    if let (Some(first), Some(last)) = (line.first(), line.last()) {
        let mut area = Vec::with_capacity(line.len() + 2);
        area.push((first.0, base));
        area.extend(line.iter().copied());
        area.push((last.0, base));
        root.draw(&Polygon::new(area, style.line.mix(0.2).filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    root.draw(&PathElement::new(line, style.line.stroke_width(2)))
        .map_err(|e| anyhow!("{:?}", e))?;

    if let Some(callout) = &chart.callout {
        root.draw(&Circle::new(
            (px(callout.x), px(callout.y - 4.0)),
            3,
            style.line.filled(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#44cc11"), Some(RGBColor(0x44, 0xcc, 0x11)));
        assert_eq!(parse_hex_color("fff"), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_hex_color("dodgerblue"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }
}
