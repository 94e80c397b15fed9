//! Badge options: every recognized key, its default, and how raw values are coerced.
//!
//! Options arrive as loose `key=value` pairs (query strings, CLI `--opt` flags) or as a JSON
//! object. Both paths end in the same typed structs; numeric values are coerced (never
//! rejected) so a malformed option degrades to a clamped layout instead of an error.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::layout::util::coerce_abs_int;

/// Default language palette, cycled when there are more languages than colors.
pub const DEFAULT_COLORS: [&str; 11] = [
    "dodgerblue",
    "green",
    "orangered",
    "purple",
    "orange",
    "gray",
    "cadetblue",
    "lime",
    "olive",
    "pink",
    "cyan",
];

/// Add the `#` to bare hex colors (`ffffff` -> `#ffffff`); named colors pass through.
pub fn normalize_color(raw: &str) -> String {
    let c = raw.trim();
    let bare_hex = matches!(c.len(), 3 | 4 | 6 | 8) && c.chars().all(|ch| ch.is_ascii_hexdigit());
    if bare_hex { format!("#{c}") } else { c.to_string() }
}

/// Common behaviour of all option structs: apply one raw pair, or build from many.
pub trait BadgeOptions: Default {
    /// Apply one `key=value` pair. Returns `false` for keys this badge does not know.
    fn apply(&mut self, key: &str, value: &str) -> bool;

    fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut opts = Self::default();
        for (k, v) in pairs {
            if !opts.apply(k.as_ref(), v.as_ref()) {
                warn!("ignoring unknown option {:?}", k.as_ref());
            }
        }
        opts
    }
}

/// Split `key=value`; a bare key gets an empty value.
pub fn parse_pair(raw: &str) -> (String, String) {
    match raw.split_once('=') {
        Some((k, v)) => (k.trim().to_string(), v.to_string()),
        None => (raw.trim().to_string(), String::new()),
    }
}

/// Download sparkline badge (`{total}/month`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadsOptions {
    /// Badge height in px; the sparkline is 4.5 heights wide.
    pub height: u32,
    /// Corner radius, passed through to the markup (`15%`, `3`).
    pub radius: String,
    /// Sparkline stroke/fill color.
    pub color: String,
    /// Label background.
    pub bg: String,
    /// Label template; `{total}` is the compacted monthly total.
    pub label: String,
}

impl Default for DownloadsOptions {
    fn default() -> Self {
        Self {
            height: 20,
            radius: "15%".into(),
            color: "#44cc11".into(),
            bg: "#007ec6".into(),
            label: "{total}/month".into(),
        }
    }
}

impl BadgeOptions for DownloadsOptions {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "height" => self.height = coerce_abs_int(value),
            "radius" => self.radius = value.to_string(),
            "color" => self.color = value.to_string(),
            "bg" => self.bg = value.to_string(),
            "label" => self.label = value.to_string(),
            _ => return false,
        }
        true
    }
}

/// Contribution calendar card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionsOptions {
    /// Card width in px.
    pub width: u32,
    pub color: String,
    /// Fill of every other month band.
    pub even: String,
    /// Axis and tick color.
    pub axis: String,
    pub bg: String,
    /// Title template; `{name}` and `{total}` (thousands-grouped).
    pub label: String,
}

impl Default for ContributionsOptions {
    fn default() -> Self {
        Self {
            width: 600,
            color: "#44cc11".into(),
            even: "#f6f8fa".into(),
            axis: "#999999".into(),
            bg: "#ffffff".into(),
            label: "{name} - {total} contributions past year".into(),
        }
    }
}

impl BadgeOptions for ContributionsOptions {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "width" => self.width = coerce_abs_int(value),
            "color" => self.color = value.to_string(),
            "even" => self.even = value.to_string(),
            "axis" => self.axis = value.to_string(),
            "bg" => self.bg = value.to_string(),
            "label" => self.label = value.to_string(),
            _ => return false,
        }
        true
    }
}

/// Language usage bar with legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagesOptions {
    pub width: u32,
    /// Maximum number of languages shown; bounds the legend packing cost.
    pub limit: u32,
    pub colors: Vec<String>,
    pub bg: String,
    /// Title template; `{name}` and `{total}` (language count).
    pub label: String,
}

impl Default for LanguagesOptions {
    fn default() -> Self {
        Self {
            width: 600,
            limit: 20,
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            bg: "#ffffff".into(),
            label: "{name} - {total} used languages".into(),
        }
    }
}

impl BadgeOptions for LanguagesOptions {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "width" => self.width = coerce_abs_int(value),
            "limit" => self.limit = coerce_abs_int(value),
            "colors" => {
                let colors: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect();
                if colors.is_empty() {
                    warn!("empty color list, keeping defaults");
                } else {
                    self.colors = colors;
                }
            }
            "bg" => self.bg = value.to_string(),
            "label" => self.label = value.to_string(),
            _ => return false,
        }
        true
    }
}

/// Profile summary card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    pub width: u32,
    /// Background; bare hex is accepted (`ffffff`).
    pub bg: String,
    /// Title template; `{name}` and `{bio}`.
    pub label: String,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            width: 600,
            bg: "#ffffff".into(),
            label: "{name} - {bio}".into(),
        }
    }
}

impl BadgeOptions for ProfileOptions {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "width" => self.width = coerce_abs_int(value),
            "bg" => self.bg = normalize_color(value),
            "label" => self.label = value.to_string(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_override_defaults_and_coerce() {
        let opts = ContributionsOptions::from_pairs([("width", "-480"), ("color", "red")]);
        assert_eq!(opts.width, 480);
        assert_eq!(opts.color, "red");
        assert_eq!(opts.axis, "#999999");
    }

    #[test]
    fn malformed_number_becomes_zero() {
        let opts = DownloadsOptions::from_pairs([("height", "tall")]);
        assert_eq!(opts.height, 0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let opts = ProfileOptions::from_pairs([("nope", "1"), ("bg", "fafafa")]);
        assert_eq!(opts.bg, "#fafafa");
        assert_eq!(opts.width, 600);
    }

    #[test]
    fn colors_split_on_commas() {
        let opts = LanguagesOptions::from_pairs([("colors", "red, blue,,")]);
        assert_eq!(opts.colors, vec!["red", "blue"]);
        let kept = LanguagesOptions::from_pairs([("colors", ",")]);
        assert_eq!(kept.colors.len(), DEFAULT_COLORS.len());
    }

    #[test]
    fn json_options_fill_missing_fields() {
        let opts: LanguagesOptions = serde_json::from_str(r#"{"limit": 3}"#).unwrap();
        assert_eq!(opts.limit, 3);
        assert_eq!(opts.width, 600);
    }

    #[test]
    fn pair_parsing() {
        assert_eq!(parse_pair("label={total} dl"), ("label".into(), "{total} dl".into()));
        assert_eq!(parse_pair("flag"), ("flag".into(), String::new()));
    }
}
