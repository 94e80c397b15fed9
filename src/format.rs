//! Compact number formatting and label templating.
//!
//! `format_count` and `format_bytes` share one algorithm: find the magnitude bracket, scale the
//! value into it and keep at most three significant digits, but never fewer than one decimal
//! place once a unit letter is attached. That last rule gives `1.50K` next to `999.5K`; badges
//! already in the wild depend on the exact strings, so it is kept as is.

use num_format::{Locale, ToFormattedString};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Base, unit letters, separator and trailing suffix of one unit system.
#[derive(Debug, Clone, Copy)]
struct UnitSystem {
    base: u128,
    units: [&'static str; 6],
    space: &'static str,
    suffix: &'static str,
}

const COUNTS: UnitSystem = UnitSystem {
    base: 1000,
    units: ["", "K", "M", "B", "T", "P"],
    space: "",
    suffix: "",
};

const BYTES: UnitSystem = UnitSystem {
    base: 1024,
    units: ["", "K", "M", "G", "T", "P"],
    space: " ",
    suffix: "B",
};

/// Compact a count with decimal magnitudes: `1500 -> "1.50K"`, `2_300_000 -> "2.30M"`.
///
/// The input is rounded to an integer first; non-finite input is treated as zero.
pub fn format_count(v: f64) -> String {
    compact(v, &COUNTS)
}

/// Compact a byte size with binary magnitudes: `2048 -> "2.00 KB"`, `0 -> "0 B"`.
///
/// A value of exactly 1, or one past the petabyte bracket, matches no bracket and comes back
/// as the bare integer (`"1"`, no unit or suffix), as it does for [`format_count`].
pub fn format_bytes(v: f64) -> String {
    compact(v, &BYTES)
}

fn compact(v: f64, sys: &UnitSystem) -> String {
    let v = if v.is_finite() { v.round() } else { 0.0 };
    if v <= 0.0 {
        return format!("0{}{}", sys.space, sys.suffix);
    }
    // Saturating cast; anything above u64::MAX is far past the last unit anyway.
    let v = v as u64 as u128;

    // Bracket i holds base^i < v <= base^(i+1). A value of exactly 1 or one past the last
    // bracket matches none and is printed bare, without separator or suffix.
    let Some(idx) = (0..sys.units.len())
        .find(|&i| v > sys.base.pow(i as u32) && v <= sys.base.pow(i as u32 + 1))
    else {
        return v.to_string();
    };

    if idx == 0 {
        return format!("{v}{}{}", sys.space, sys.suffix);
    }

    let n = v as f64 / sys.base.pow(idx as u32) as f64;
    let int_digits = (n.trunc() as u64).to_string().len();
    let decimals = 3u32.saturating_sub(int_digits as u32).max(1);
    format!(
        "{}{}{}{}",
        to_fixed(n, decimals),
        sys.space,
        sys.units[idx],
        sys.suffix
    )
}

/// Render a positive float with exactly `decimals` fraction digits.
///
/// Rounds the exact binary value, taking the larger candidate on a true tie: `1.125 -> "1.13"`
/// (exactly representable) but `1.005 -> "1.00"` (stored as 1.00499...). `{:.N}` would round
/// true ties to even instead.
fn to_fixed(n: f64, decimals: u32) -> String {
    let bits = n.to_bits();
    let exp = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let mantissa = u128::from((bits & ((1u64 << 52) - 1)) | (1u64 << 52));
    let scale = 10u128.pow(decimals);

    let q = if exp >= 0 {
        (mantissa << exp) * scale
    } else {
        let shift = (-exp) as u32;
        if shift >= 128 {
            0
        } else {
            (mantissa * scale + (1u128 << (shift - 1))) >> shift
        }
    };
    format!("{}.{:0width$}", q / scale, q % scale, width = decimals as usize)
}

/// Thousands-grouped integer, e.g. `12345 -> "12,345"`.
pub fn format_grouped(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn template_token() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\{([^}{]+)\}").expect("static template regex"))
}

/// Substitute `{key}` tokens in a label template.
///
/// Tokens without a matching key are left verbatim so a typo stays visible in the badge.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    template_token()
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
