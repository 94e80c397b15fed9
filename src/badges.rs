//! Badge layouts: the four badge kinds assembled from the layout engine.
//!
//! Each builder takes already-fetched data plus typed options and returns everything a markup
//! assembler needs (sizes, coordinates, path data, label strings). Missing upstream data yields
//! [`Layout::Invalid`] so there is always something renderable.

use ahash::AHashMap;
use chrono::{DateTime, Datelike, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::{ContributionsOptions, DownloadsOptions, LanguagesOptions, ProfileOptions};
use crate::format::{fill_template, format_count, format_grouped};
use crate::icons;
use crate::layout::util::round_to;
use crate::layout::{
    ChartBox, ChartGeometry, GridSpec, LegendGrid, LegendItem, Placeholder, PlottedChart,
    ScaleRule, StatGrid, build_chart, estimate_text_width, estimate_width, layout_stats,
    pack_legend, top_languages,
};
use crate::models::{CategorySize, Sample, StatPair};

/// Outer padding shared by the card badges.
pub const CARD_PADDING: i32 = 15;

/// A badge layout, or the placeholder when upstream produced nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Layout<T> {
    Ready(T),
    Invalid(Placeholder),
}

impl<T> Layout<T> {
    pub fn invalid() -> Self {
        Layout::Invalid(Placeholder::default())
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Layout::Ready(t) => Some(t),
            Layout::Invalid(_) => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Layout::Invalid(_))
    }
}

// ---------------------------------------------------------------------------
// Downloads sparkline
// ---------------------------------------------------------------------------

/// The sparkline badge is laid out in a 10x view box and scaled down by the markup.
pub const DOWNLOADS_VIEW_SCALE: u32 = 10;
const DOWNLOADS_ASPECT: f64 = 4.5;
const DOWNLOADS_INVALID_BG: &str = "#aaa";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadsBadge {
    /// Outer size in px.
    pub width: u32,
    pub height: u32,
    /// View box size (outer size times the view scale).
    pub view_width: u32,
    pub view_height: u32,
    /// Sparkline area width in view units; 0 without data.
    pub chart_width: f64,
    /// Sparkline geometry, or the placeholder without data.
    pub chart: ChartGeometry,
    pub stroke_width: f64,
    pub total: u64,
    /// Tooltip text, e.g. `serde: 1200 downloads`.
    pub title: String,
    pub label: String,
    /// Estimated label width (`textLength`) in view units.
    pub label_width: u32,
    /// Width of the label panel right of the sparkline.
    pub label_box_width: u32,
    pub label_x: f64,
    pub label_y: f64,
    pub bg: String,
    /// Sparkline stroke and fill color.
    pub color: String,
    /// Corner radius, passed through to the markup.
    pub radius: String,
}

/// Downloads sparkline badge. Always renderable: without data the label reads `invalid`.
pub fn downloads_badge(name: &str, samples: &[Sample], opts: &DownloadsOptions) -> DownloadsBadge {
    let scale = DOWNLOADS_VIEW_SCALE;
    let height = opts.height;
    let view_height = height.saturating_mul(scale);
    let fscale = f64::from(scale);

    let has_data = !samples.is_empty();
    let total = samples.iter().fold(0u64, |acc, s| acc.saturating_add(s.value));

    let (chart_width, label, bg) = if has_data {
        let label = fill_template(&opts.label, &[("total", format_count(total as f64).as_str())]);
        (f64::from(view_height) * DOWNLOADS_ASPECT, label, opts.bg.clone())
    } else {
        warn!("no download data for {name}");
        (
            0.0,
            Placeholder::LABEL.to_string(),
            DOWNLOADS_INVALID_BG.to_string(),
        )
    };

    let chart = build_chart(
        samples,
        ChartBox::new(chart_width, f64::from(view_height)),
        ScaleRule::sparkline(f64::from(height)),
    );

    let text_padding = estimate_width(2, fscale, 0);
    let (label_width, label_box_width) = if label.is_empty() {
        (0, 0)
    } else {
        let tl = estimate_text_width(&label, fscale);
        (tl, tl + text_padding)
    };

    let view_width = (chart_width + f64::from(label_box_width)).ceil() as u32;
    DownloadsBadge {
        width: view_width.div_ceil(scale),
        height,
        view_width,
        view_height,
        chart_width,
        chart,
        stroke_width: 1.5 * fscale,
        total,
        title: format!("{name}: {total} downloads"),
        label,
        label_width,
        label_box_width,
        label_x: chart_width + f64::from(label_box_width) * 0.5,
        label_y: f64::from(view_height) * 0.5 + 4.0 * fscale,
        bg,
        color: opts.color.clone(),
        radius: opts.radius.clone(),
    }
}

// ---------------------------------------------------------------------------
// Contributions calendar
// ---------------------------------------------------------------------------

const CONTRIB_CHART_TOP: f64 = 40.0;
const CONTRIB_MIN_HEIGHT: f64 = 30.0;
const CONTRIB_MAX_HEIGHT: f64 = 100.0;
const CONTRIB_TICK_AREA: i32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionsCard {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub title_x: i32,
    pub title_y: i32,
    pub chart: PlottedChart,
    /// Y of the 1px axis line under the chart.
    pub axis_y: f64,
    pub first_date: String,
    pub last_date: String,
    pub first_date_x: i32,
    pub last_date_x: i32,
    pub date_label_y: f64,
    pub bg: String,
    /// Line and area color.
    pub color: String,
    /// Fill of the alternating month bands.
    pub even: String,
    /// Axis, tick and date label color.
    pub axis: String,
}

/// Contribution calendar card. `total` defaults to the sum of the samples when the upstream
/// API did not report one.
pub fn contributions_card(
    name: &str,
    total: Option<u64>,
    samples: &[Sample],
    opts: &ContributionsOptions,
) -> Layout<ContributionsCard> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        warn!("no contribution data for {name}");
        return Layout::invalid();
    };

    let width = opts.width.min(i32::MAX as u32) as i32;
    let chart_width = f64::from((width - CARD_PADDING * 2).max(1));
    let per_day = chart_width / samples.len() as f64;
    let max_count = samples.iter().map(|s| s.value).max().unwrap_or(0);
    let chart_height = (max_count as f64 * per_day * 2.0)
        .ceil()
        .clamp(CONTRIB_MIN_HEIGHT, CONTRIB_MAX_HEIGHT);

    let frame = ChartBox::new(chart_width, chart_height)
        .offset(f64::from(CARD_PADDING), CONTRIB_CHART_TOP);
    let ChartGeometry::Plotted(chart) = build_chart(samples, frame, ScaleRule::EXACT) else {
        return Layout::invalid();
    };

    let axis_y = frame.baseline();
    let total =
        total.unwrap_or_else(|| samples.iter().fold(0u64, |acc, s| acc.saturating_add(s.value)));
    let title = fill_template(
        &opts.label,
        &[("name", name), ("total", format_grouped(total).as_str())],
    );
    debug!("contributions for {name}: {} days, height {chart_height}", samples.len());

    Layout::Ready(ContributionsCard {
        width: opts.width,
        height: (axis_y + f64::from(CONTRIB_TICK_AREA + CARD_PADDING)).ceil() as u32,
        title,
        title_x: CARD_PADDING,
        title_y: 30,
        chart,
        axis_y,
        first_date: first.date.to_string(),
        last_date: last.date.to_string(),
        first_date_x: CARD_PADDING,
        last_date_x: width - CARD_PADDING,
        date_label_y: axis_y + f64::from(CONTRIB_TICK_AREA),
        bg: opts.bg.clone(),
        color: opts.color.clone(),
        even: opts.even.clone(),
        axis: opts.axis.clone(),
    })
}

// ---------------------------------------------------------------------------
// Languages bar + legend
// ---------------------------------------------------------------------------

const BAR_TOP: i32 = 40;
const BAR_HEIGHT: i32 = 12;
const LEGEND_ICON: i32 = 10;
const LEGEND_SPACING: i32 = 5;
const LEGEND_ROW_HEIGHT: i32 = 20;
const MIN_OPACITY: f64 = 0.6;

/// A category with its aggregated size and share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub size: u64,
    pub weight: f64,
}

/// Sum sizes per name across repositories, largest first, with weights relative to the total.
///
/// Ties are broken by name so the output does not depend on hash order.
pub fn aggregate_languages<'a, I>(repos: I) -> Vec<LanguageShare>
where
    I: IntoIterator<Item = &'a [CategorySize]>,
{
    let mut sizes: AHashMap<&'a str, u64> = AHashMap::new();
    for repo in repos {
        for lang in repo {
            let size = sizes.entry(lang.name.as_str()).or_default();
            *size = size.saturating_add(lang.size);
        }
    }
    let total = sizes.values().fold(0u64, |acc, s| acc.saturating_add(*s));

    let mut shares: Vec<LanguageShare> = sizes
        .into_iter()
        .map(|(name, size)| LanguageShare {
            name: name.to_string(),
            size,
            weight: if total == 0 {
                0.0
            } else {
                size as f64 / total as f64
            },
        })
        .collect();
    shares.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
    shares
}

/// One slice of the stacked usage bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub name: String,
    pub x: f64,
    pub width: f64,
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguagesCard {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Clip box of the stacked bar.
    pub bar: ChartBox,
    /// Bar slices; legend cells refer to these by index.
    pub segments: Vec<BarSegment>,
    pub legend: LegendGrid,
    pub icon_size: i32,
    /// Legend text starts this far right of its cell's x.
    pub text_offset_x: i32,
    /// Legend text baseline below its cell's y.
    pub text_offset_y: i32,
    pub bg: String,
}

/// Language usage card: stacked bar plus a packed legend.
pub fn languages_card(
    name: &str,
    shares: Option<&[LanguageShare]>,
    opts: &LanguagesOptions,
) -> Layout<LanguagesCard> {
    let Some(shares) = shares.filter(|s| !s.is_empty()) else {
        warn!("no language data for {name}");
        return Layout::invalid();
    };
    let shown = &shares[..shares.len().min(opts.limit as usize)];

    let width = opts.width.min(i32::MAX as u32) as i32;
    let bar_width = (width - CARD_PADDING * 2).max(1);
    let title = fill_template(
        &opts.label,
        &[("name", name), ("total", shown.len().to_string().as_str())],
    );

    let max_weight = shown.iter().map(|s| s.weight).fold(0.0, f64::max);
    let mut x = f64::from(CARD_PADDING);
    let segments: Vec<BarSegment> = shown
        .iter()
        .enumerate()
        .map(|(i, share)| {
            let w = share.weight * f64::from(bar_width);
            let opacity = if max_weight > 0.0 {
                MIN_OPACITY + (1.0 - MIN_OPACITY) * (share.weight / max_weight)
            } else {
                1.0
            };
            let color = if opts.colors.is_empty() {
                String::new()
            } else {
                opts.colors[i % opts.colors.len()].clone()
            };
            let seg = BarSegment {
                name: share.name.clone(),
                x: round_to(x, 1),
                width: round_to(w, 1),
                color,
                opacity: round_to(opacity, 2),
            };
            x += w;
            seg
        })
        .collect();

    let items: Vec<LegendItem> = shown
        .iter()
        .map(|s| LegendItem::new(s.name.clone(), s.weight, LEGEND_ICON + LEGEND_SPACING))
        .collect();
    let spec = GridSpec {
        width: bar_width,
        spacing: LEGEND_SPACING,
        start_columns: 1,
        origin_x: CARD_PADDING,
        origin_y: BAR_TOP + BAR_HEIGHT + 10,
        row_height: LEGEND_ROW_HEIGHT,
        row_spacing: 0,
    };
    let legend = pack_legend(&items, &spec);
    let legend_bottom = spec.origin_y + legend.rows.len() as i32 * LEGEND_ROW_HEIGHT;

    Layout::Ready(LanguagesCard {
        width: opts.width,
        height: (legend_bottom + 5) as u32,
        title,
        bar: ChartBox::new(f64::from(bar_width), f64::from(BAR_HEIGHT))
            .offset(f64::from(CARD_PADDING), f64::from(BAR_TOP)),
        segments,
        legend,
        icon_size: LEGEND_ICON,
        text_offset_x: CARD_PADDING,
        text_offset_y: 9,
        bg: opts.bg.clone(),
    })
}

// ---------------------------------------------------------------------------
// Profile card
// ---------------------------------------------------------------------------

const AVATAR_SIZE: i32 = 48;

/// Counters shown on a profile card, as reported upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSummary {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub repositories: u64,
    pub pull_requests: u64,
    pub stars: u64,
    pub issues: u64,
    pub contributions: u64,
    pub followers: u64,
    pub following: u64,
    pub sponsors: u64,
    pub sponsoring: u64,
    pub languages: Vec<LanguageShare>,
}

impl ProfileSummary {
    /// Stat pairs in display order.
    pub fn stats(&self) -> Vec<StatPair> {
        let shares: Vec<(&str, f64)> = self
            .languages
            .iter()
            .map(|l| (l.name.as_str(), l.weight))
            .collect();
        vec![
            StatPair::new("Total Repositories", format_grouped(self.repositories))
                .with_icon(icons::REPOSITORIES),
            StatPair::new("Total Pull Requests", format_grouped(self.pull_requests))
                .with_icon(icons::PULL_REQUESTS),
            StatPair::new("Total Stars", format_count(self.stars as f64)).with_icon(icons::STARS),
            StatPair::new("Total Issues", format_grouped(self.issues)).with_icon(icons::ISSUES),
            StatPair::new("Contributions Past Year", format_grouped(self.contributions))
                .with_icon(icons::CONTRIBUTIONS),
            StatPair::new("Languages", top_languages(&shares)).with_icon(icons::LANGUAGES),
            StatPair::new(
                "Followers / Following",
                format!(
                    "{} / {}",
                    format_count(self.followers as f64),
                    format_count(self.following as f64)
                ),
            )
            .with_icon(icons::FOLLOWERS),
            StatPair::new(
                "Sponsors / Sponsoring",
                format!(
                    "{} / {}",
                    format_count(self.sponsors as f64),
                    format_count(self.sponsoring as f64)
                ),
            )
            .with_icon(icons::SPONSORS),
        ]
    }
}

/// Coarse "time since" phrase: `today`, `3 days ago`, `1 month ago`, `2 years ago`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - then).num_days().max(0);
    let mut months = (now.year() - then.year()) * 12 + now.month() as i32 - then.month() as i32;
    if now.day() < then.day() {
        months -= 1;
    }
    let (n, unit) = if months >= 12 {
        (i64::from(months / 12), "year")
    } else if months >= 1 {
        (i64::from(months), "month")
    } else if days >= 1 {
        (days, "day")
    } else {
        return "today".to_string();
    };
    let plural = if n == 1 { "" } else { "s" };
    format!("{n} {unit}{plural} ago")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCard {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// `Joined GitHub 3 years ago`, when the account creation date is known.
    pub subtitle: Option<String>,
    pub avatar_x: i32,
    pub avatar_y: i32,
    pub avatar_size: i32,
    pub title_x: i32,
    pub title_y: i32,
    pub stats: StatGrid,
    pub bg: String,
}

/// Profile card: avatar, title line and the stat grid below it.
pub fn profile_card(
    summary: Option<&ProfileSummary>,
    now: DateTime<Utc>,
    opts: &ProfileOptions,
) -> Layout<ProfileCard> {
    let Some(summary) = summary else {
        warn!("no profile data");
        return Layout::invalid();
    };

    let login = summary.login.as_str();
    let title = fill_template(
        &opts.label,
        &[
            ("name", summary.name.as_deref().unwrap_or(login)),
            ("bio", summary.bio.as_deref().unwrap_or(login)),
        ],
    );
    let subtitle = summary
        .created_at
        .map(|created| format!("Joined GitHub {}", time_ago(created, now)));

    let header_bottom = CARD_PADDING + AVATAR_SIZE;
    let stats = layout_stats(
        &summary.stats(),
        opts.width.min(i32::MAX as u32) as i32,
        CARD_PADDING,
        header_bottom,
    );

    Layout::Ready(ProfileCard {
        width: opts.width,
        height: (stats.bottom + CARD_PADDING) as u32,
        title,
        subtitle,
        avatar_x: CARD_PADDING,
        avatar_y: CARD_PADDING,
        avatar_size: AVATAR_SIZE,
        title_x: CARD_PADDING * 2 + AVATAR_SIZE,
        title_y: CARD_PADDING + AVATAR_SIZE / 2,
        stats,
        bg: opts.bg.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn time_ago_picks_coarsest_unit() {
        let now = at(2024, 6, 15);
        assert_eq!(time_ago(at(2024, 6, 15), now), "today");
        assert_eq!(time_ago(at(2024, 6, 12), now), "3 days ago");
        assert_eq!(time_ago(at(2024, 5, 1), now), "1 month ago");
        assert_eq!(time_ago(at(2024, 5, 20), now), "26 days ago");
        assert_eq!(time_ago(at(2021, 6, 1), now), "3 years ago");
    }

    #[test]
    fn aggregate_saturates_instead_of_overflowing() {
        let a = vec![CategorySize { name: "Rust".into(), size: u64::MAX }];
        let b = vec![
            CategorySize { name: "Rust".into(), size: 10 },
            CategorySize { name: "Go".into(), size: 10 },
        ];
        let shares = aggregate_languages([a.as_slice(), b.as_slice()]);
        assert_eq!(shares[0].size, u64::MAX);
        assert_eq!(shares[1].size, 10);
    }

    #[test]
    fn aggregate_sums_across_repos_and_sorts() {
        let a = vec![
            CategorySize { name: "Rust".into(), size: 300 },
            CategorySize { name: "Go".into(), size: 100 },
        ];
        let b = vec![CategorySize { name: "Go".into(), size: 100 }];
        let shares = aggregate_languages([a.as_slice(), b.as_slice()]);
        assert_eq!(shares[0].name, "Rust");
        assert_eq!(shares[0].size, 300);
        assert_eq!(shares[1].size, 200);
        assert!((shares[0].weight - 0.6).abs() < 1e-12);
    }
}
