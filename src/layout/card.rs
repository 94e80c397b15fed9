//! Equal-width grid for profile card stat pairs (`icon  label ........ value`).

use serde::{Deserialize, Serialize};

use super::text::estimate_width;
use crate::models::StatPair;

const GAP: i32 = 10;
const ROW_HEIGHT: i32 = 16;
const ICON_SIZE: i32 = 16;
const ICON_TEXT_GAP: i32 = 5;
/// Stat text is drawn at 14px rather than the 11px the glyph heuristic is tuned for.
const TEXT_SCALE: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCell {
    pub label: String,
    pub value: String,
    pub icon: Vec<String>,
    pub row: usize,
    pub column: usize,
    /// Top-left of the cell.
    pub x: i32,
    pub y: i32,
    /// Label start, relative to `x` (right of the icon).
    pub label_x: i32,
    /// Value end (right-aligned), relative to `x`.
    pub value_x: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatGrid {
    pub columns: usize,
    pub cell_width: i32,
    pub gap: i32,
    pub cells: Vec<StatCell>,
    /// Running badge height after the grid (input `top` plus all rows).
    pub bottom: i32,
}

/// Lay out `stats` in as many equal columns as fit in `width - 2 * padding`, starting below
/// `top`. Every cell is as wide as the widest `"label value"` text plus icon and gaps.
pub fn layout_stats(stats: &[StatPair], width: i32, padding: i32, top: i32) -> StatGrid {
    if stats.is_empty() {
        return StatGrid {
            bottom: top,
            ..StatGrid::default()
        };
    }

    let cell_width = stats
        .iter()
        .map(|s| {
            let len = s.label.chars().count() + 1 + s.value.chars().count();
            estimate_width(len, TEXT_SCALE, 0) as i32 + GAP + ICON_SIZE + ICON_TEXT_GAP
        })
        .max()
        .unwrap_or(0);

    let inner = width - padding * 2;
    let columns = inner.div_euclid(cell_width + GAP).max(1);
    let gap = if columns > 1 {
        (inner - columns * cell_width).div_euclid(columns - 1)
    } else {
        0
    };

    let columns = columns as usize;
    let pitch = ROW_HEIGHT + GAP;
    let cells: Vec<StatCell> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let row = i / columns;
            let column = i % columns;
            StatCell {
                label: s.label.clone(),
                value: s.value.clone(),
                icon: s.icon.clone(),
                row,
                column,
                x: padding + column as i32 * (cell_width + gap),
                y: top + GAP + row as i32 * pitch,
                label_x: ICON_SIZE + ICON_TEXT_GAP,
                value_x: cell_width,
            }
        })
        .collect();

    let rows = stats.len().div_ceil(columns) as i32;
    StatGrid {
        columns,
        cell_width,
        gap,
        cells,
        bottom: top + rows * pitch,
    }
}

/// Short "main languages" summary: names are added until two are listed or they cover more
/// than 80%, e.g. `"Rust/Go 85%"`.
pub fn top_languages(shares: &[(&str, f64)]) -> String {
    let mut names = Vec::new();
    let mut total = 0.0;
    for (i, (name, share)) in shares.iter().enumerate() {
        total += share;
        names.push(*name);
        if i >= 1 || total > 0.8 {
            break;
        }
    }
    format!("{} {}%", names.join("/"), (total * 100.0).round())
}
