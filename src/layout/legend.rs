//! Legend grid packing for weighted, labelled items (e.g. languages with their share).
//!
//! Items flow row-major into `N` columns. The packer grows `N` one step at a time and keeps the
//! last layout whose summed column widths stayed below the target width:
//!
//! - a column is as wide as its widest cell, plus `spacing` unless it is the last column;
//! - once everything fits on a single row the search stops early;
//! - when nothing fits, the first layout tried is used as is.
//!
//! Leftover width is then spread over the column gaps and labels are padded with spaces so the
//! percentage suffixes line up inside each column.

use log::debug;
use serde::{Deserialize, Serialize};

use super::text::estimate_width;

/// One legend entry with its pre-measured footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub label: String,
    /// Share of the whole, in `[0, 1]`.
    pub weight: f64,
    /// Text appended after the (padded) label, e.g. `" (42.10%)"`.
    pub percent_suffix: String,
    /// Characters of `label + percent_suffix`.
    pub char_length: usize,
    /// Pixels reserved for the entry, marker included.
    pub rendered_width: i32,
}

impl LegendItem {
    /// Measure an entry: text width from the glyph heuristic plus `marker_px` for the swatch.
    pub fn new(label: impl Into<String>, weight: f64, marker_px: i32) -> Self {
        let label = label.into();
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        let percent_suffix = format!(" ({:.2}%)", weight * 100.0);
        let char_length = label.chars().count() + percent_suffix.chars().count();
        let rendered_width = estimate_width(char_length, 1.0, 0) as i32 + marker_px;
        Self {
            label,
            weight,
            percent_suffix,
            char_length,
            rendered_width,
        }
    }

    /// Entry with an explicit footprint, for callers that measured text themselves.
    pub fn with_width(label: impl Into<String>, weight: f64, rendered_width: i32) -> Self {
        let mut item = Self::new(label, weight, 0);
        item.rendered_width = rendered_width;
        item
    }

    /// Label and suffix without alignment padding.
    pub fn legend(&self) -> String {
        format!("{}{}", self.label, self.percent_suffix)
    }
}

/// Packing request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Target width the columns must stay below.
    pub width: i32,
    /// Gap added after every column but the last.
    pub spacing: i32,
    /// Column count the search starts from.
    pub start_columns: usize,
    pub origin_x: i32,
    pub origin_y: i32,
    pub row_height: i32,
    pub row_spacing: i32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            width: 0,
            spacing: 0,
            start_columns: 1,
            origin_x: 0,
            origin_y: 0,
            row_height: 0,
            row_spacing: 0,
        }
    }
}

/// Shared geometry of one column index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub width: i32,
    pub max_char_length: usize,
    /// Estimated text width of the longest entry, usable as a `textLength` hint.
    pub text_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Index into the item slice handed to [`pack_legend`].
    pub item: usize,
    pub column: usize,
    pub x: i32,
    pub y: i32,
    pub padded_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendGrid {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl LegendGrid {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }
}

/// A candidate layout: rows are consecutive chunks of `per_row` item indices.
#[derive(Debug, Clone)]
struct Packing {
    per_row: usize,
    row_count: usize,
    columns: Vec<Column>,
    total: i32,
}

fn pack(items: &[LegendItem], per_row: usize, spacing: i32) -> Packing {
    let row_count = items.len().div_ceil(per_row);
    let column_count = per_row.min(items.len());
    let last = column_count.saturating_sub(1);

    let columns: Vec<Column> = (0..column_count)
        .map(|c| {
            let in_column = move || (0..row_count).filter_map(move |r| items.get(r * per_row + c));
            let mut width = in_column().map(|it| it.rendered_width).max().unwrap_or(0);
            if c != last {
                width += spacing;
            }
            let max_char_length = in_column().map(|it| it.char_length).max().unwrap_or(0);
            Column {
                width,
                max_char_length,
                text_width: estimate_width(max_char_length, 1.0, 0),
            }
        })
        .collect();

    let total = columns.iter().map(|c| c.width).sum();
    Packing {
        per_row,
        row_count,
        columns,
        total,
    }
}

/// Choose a column count for `items` and lay them out.
///
/// Deterministic and bounded: the column count only grows and the search ends at the latest
/// when all items share one row.
pub fn pack_legend(items: &[LegendItem], spec: &GridSpec) -> LegendGrid {
    if items.is_empty() {
        return LegendGrid::default();
    }

    let mut per_row = spec.start_columns.max(1);
    let mut fitted: Option<Packing> = None;
    let chosen = loop {
        let packing = pack(items, per_row, spec.spacing);
        if packing.total >= spec.width {
            break fitted.take().unwrap_or(packing);
        }
        if packing.row_count == 1 {
            break packing;
        }
        fitted = Some(packing);
        per_row += 1;
    };

    debug!(
        "legend: {} items in {} columns x {} rows (content width {} of {})",
        items.len(),
        chosen.columns.len(),
        chosen.row_count,
        chosen.total,
        spec.width
    );

    finalize(items, chosen, spec)
}

/// Spread the slack over the gaps between columns; a lone column absorbs all of it.
fn distribute_slack(columns: &mut [Column], slack: i32) {
    match columns.len() {
        0 => {}
        1 => columns[0].width += slack,
        n => {
            let gaps = (n - 1) as i32;
            let share = slack / gaps;
            for col in columns[..n - 1].iter_mut() {
                col.width += share;
            }
            columns[n - 1].width += slack - share * gaps;
        }
    }
}

fn finalize(items: &[LegendItem], packing: Packing, spec: &GridSpec) -> LegendGrid {
    let Packing {
        per_row,
        row_count,
        mut columns,
        total,
    } = packing;

    distribute_slack(&mut columns, (spec.width - total).max(0));

    let pitch = spec.row_height + spec.row_spacing;
    let rows = (0..row_count)
        .map(|r| {
            let y = spec.origin_y + r as i32 * pitch;
            let mut x = spec.origin_x;
            let start = r * per_row;
            let end = (start + per_row).min(items.len());
            (start..end)
                .enumerate()
                .map(|(c, idx)| {
                    let column = &columns[c];
                    let cell = Cell {
                        item: idx,
                        column: c,
                        x,
                        y,
                        padded_label: padded_label(&items[idx], column.max_char_length),
                    };
                    x += column.width;
                    cell
                })
                .collect()
        })
        .collect();

    LegendGrid { columns, rows }
}

fn padded_label(item: &LegendItem, column_chars: usize) -> String {
    let pad = column_chars.saturating_sub(item.char_length);
    format!("{}{}{}", item.label, " ".repeat(pad), item.percent_suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(n: usize, w: i32) -> Vec<LegendItem> {
        (0..n)
            .map(|i| LegendItem::with_width(format!("L{i}"), 1.0 / n as f64, w))
            .collect()
    }

    #[test]
    fn suffix_and_measurements() {
        let item = LegendItem::new("Rust", 0.4213, 15);
        assert_eq!(item.percent_suffix, " (42.13%)");
        assert_eq!(item.char_length, 13);
        // ceil(13 * 6.625) = 87
        assert_eq!(item.rendered_width, 87 + 15);
    }

    #[test]
    fn slack_goes_to_gaps_with_remainder_on_last() {
        let mut cols = vec![
            Column { width: 10, max_char_length: 0, text_width: 0 },
            Column { width: 10, max_char_length: 0, text_width: 0 },
            Column { width: 10, max_char_length: 0, text_width: 0 },
        ];
        distribute_slack(&mut cols, 7);
        assert_eq!(cols.iter().map(|c| c.width).collect::<Vec<_>>(), vec![13, 13, 11]);
    }

    #[test]
    fn uneven_last_row_keeps_columns() {
        let items = fixed(5, 40);
        let spec = GridSpec {
            width: 100,
            spacing: 5,
            ..GridSpec::default()
        };
        // N=2: 45 + 40 = 85 < 100 with 3 rows; N=3: 45 + 45 + 40 = 130 -> back off to 2.
        let grid = pack_legend(&items, &spec);
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[2].len(), 1);
        assert_eq!(grid.rows[1][1].item, 3);
    }

    #[test]
    fn start_columns_beyond_item_count() {
        let items = fixed(2, 10);
        let spec = GridSpec {
            width: 100,
            spacing: 5,
            start_columns: 9,
            ..GridSpec::default()
        };
        let grid = pack_legend(&items, &spec);
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.rows.len(), 1);
    }
}
