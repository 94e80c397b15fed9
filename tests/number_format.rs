use badgekit::format::{fill_template, format_grouped};
use badgekit::{format_bytes, format_count};

#[test]
fn counts_keep_three_significant_digits() {
    assert_eq!(format_count(0.0), "0");
    assert_eq!(format_count(999.0), "999");
    assert_eq!(format_count(1500.0), "1.50K");
    assert_eq!(format_count(12_345.0), "12.3K");
    assert_eq!(format_count(2_300_000.0), "2.30M");
    assert_eq!(format_count(7_000_000_000.0), "7.00B");
}

#[test]
fn never_fewer_than_one_decimal_with_a_unit() {
    assert_eq!(format_count(999_500.0), "999.5K");
    assert_eq!(format_count(123_456.0), "123.5K");
}

#[test]
fn bracket_upper_bound_is_inclusive() {
    assert_eq!(format_count(1000.0), "1000");
    assert_eq!(format_count(1001.0), "1.00K");
    assert_eq!(format_count(1_000_000.0), "1000.0K");
}

#[test]
fn near_ties_follow_the_binary_quotient() {
    assert_eq!(format_count(1005.0), "1.00K");
    assert_eq!(format_count(1015.0), "1.01K");
    assert_eq!(format_count(2675.0), "2.67K");
    assert_eq!(format_bytes(1152.0), "1.13 KB");
}

#[test]
fn bytes_use_binary_units() {
    assert_eq!(format_bytes(0.0), "0 B");
    assert_eq!(format_bytes(1.0), "1");
    assert_eq!(format_bytes(2048.0), "2.00 KB");
    assert_eq!(format_bytes(5.5 * 1024.0 * 1024.0), "5.50 MB");
}

#[test]
fn garbage_input_is_zero() {
    assert_eq!(format_count(f64::NAN), "0");
    assert_eq!(format_count(-12.0), "0");
    assert_eq!(format_bytes(f64::INFINITY), "0 B");
}

#[test]
fn grouping_and_templates() {
    assert_eq!(format_grouped(1_234_567), "1,234,567");
    assert_eq!(
        fill_template("{name} - {total} {oops}", &[("name", "octo"), ("total", "12")]),
        "octo - 12 {oops}"
    );
}
