use badgekit::layout::{GridSpec, LegendItem, pack_legend};

fn items(widths: &[i32]) -> Vec<LegendItem> {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| LegendItem::with_width(format!("Lang{i}"), 0.1, *w))
        .collect()
}

fn spec(width: i32) -> GridSpec {
    GridSpec {
        width,
        spacing: 10,
        row_height: 20,
        ..GridSpec::default()
    }
}

#[test]
fn fit_is_strictly_below_the_target_width() {
    let two = items(&[50, 50]);
    // Two columns take 50 + 10 + 50 = 110.
    assert_eq!(pack_legend(&two, &spec(110)).column_count(), 1);
    assert_eq!(pack_legend(&two, &spec(115)).column_count(), 2);
}

#[test]
fn nothing_fits_uses_first_layout() {
    let grid = pack_legend(&items(&[200, 300]), &spec(100));
    assert_eq!(grid.column_count(), 1);
    assert_eq!(grid.rows.len(), 2);
    assert_eq!(grid.columns[0].width, 300);
}

#[test]
fn packing_is_deterministic() {
    let list = items(&[40, 75, 33, 90, 12, 60, 58]);
    let s = spec(230);
    assert_eq!(pack_legend(&list, &s), pack_legend(&list, &s));
}

#[test]
fn slack_fills_the_target_width() {
    let list = items(&[40, 40, 40, 40]);
    let grid = pack_legend(&list, &spec(200));
    // Four columns need 4*40 + 3*10 = 190 < 200.
    assert_eq!(grid.column_count(), 4);
    let used: i32 = grid.columns.iter().map(|c| c.width).sum();
    assert_eq!(used, 200);
    let xs: Vec<i32> = grid.rows[0].iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![0, 53, 106, 159]);
}

#[test]
fn percentages_align_within_a_column() {
    let list = vec![
        LegendItem::new("Rust", 0.5, 15),
        LegendItem::new("TypeScript", 0.25, 15),
        LegendItem::new("C", 0.125, 15),
        LegendItem::new("Go", 0.125, 15),
    ];
    let grid = pack_legend(&list, &spec(300));
    assert_eq!(grid.column_count(), 2);

    for col in 0..grid.column_count() {
        let labels: Vec<&str> = grid
            .cells()
            .filter(|c| c.column == col)
            .map(|c| c.padded_label.as_str())
            .collect();
        let suffix_at: Vec<usize> = labels.iter().filter_map(|l| l.find(" (")).collect();
        let lens: Vec<usize> = labels.iter().map(|l| l.chars().count()).collect();
        assert!(lens.windows(2).all(|w| w[0] == w[1]), "{labels:?}");
        assert_eq!(suffix_at.len(), labels.len());
    }
    assert_eq!(grid.rows[1][0].padded_label, "C    (12.50%)");
}

#[test]
fn rows_advance_by_row_height() {
    let list = items(&[100, 100, 100]);
    let grid = pack_legend(
        &list,
        &GridSpec {
            origin_x: 15,
            origin_y: 62,
            ..spec(150)
        },
    );
    let ys: Vec<i32> = grid.rows.iter().map(|r| r[0].y).collect();
    assert_eq!(ys, vec![62, 82, 102]);
    assert!(grid.cells().all(|c| c.x == 15));
}
