use anyhow::Result;
use badgekit::badges::{
    Layout, contributions_card, downloads_badge, languages_card, profile_card,
};
use badgekit::config::{
    BadgeOptions, ContributionsOptions, DownloadsOptions, LanguagesOptions, ProfileOptions,
    parse_pair,
};
use badgekit::format::{format_bytes, format_count};
use badgekit::layout::PlottedChart;
use badgekit::preview::{PreviewStyle, render_chart_preview};
use badgekit::storage;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "badgekit",
    version,
    about = "Compute layouts for download, contribution, language and profile badges"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download sparkline from a daily series (CSV or npm JSON).
    Downloads(SeriesArgs),
    /// Contribution card from a daily series (CSV or contribution calendar JSON).
    Contributions(SeriesArgs),
    /// Language bar and legend from per-repository language sizes (JSON).
    Languages(CommonArgs),
    /// Profile card from a profile summary (JSON).
    Profile(CommonArgs),
    /// Print a value in compact notation.
    Format(FormatArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input file. Missing or empty input yields the "invalid" placeholder layout.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Display name used in titles and labels.
    #[arg(short, long, default_value = "")]
    name: String,
    /// Badge option as key=value (repeatable), e.g. --opt width=480 --opt color=red
    #[arg(short = 'o', long = "opt")]
    opts: Vec<String>,
    /// Write the layout JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SeriesArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Also draw the chart geometry to this path (.svg or .png).
    #[arg(long)]
    preview: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FormatArgs {
    value: f64,
    /// Use byte units (B, KB, MB, ...) instead of counts.
    #[arg(long, default_value_t = false)]
    bytes: bool,
}

fn options<O: BadgeOptions>(raw: &[String]) -> O {
    O::from_pairs(raw.iter().map(|p| parse_pair(p)))
}

fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            storage::save_json(value, path)?;
            eprintln!("Saved layout to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn preview(chart: Option<&PlottedChart>, path: Option<&Path>, style: PreviewStyle) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    match chart {
        Some(chart) => {
            render_chart_preview(chart, path, style)?;
            eprintln!("Wrote preview to {}", path.display());
        }
        None => eprintln!("No chart to preview, skipping {}", path.display()),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Downloads(args) => cmd_downloads(args),
        Command::Contributions(args) => cmd_contributions(args),
        Command::Languages(args) => cmd_languages(args),
        Command::Profile(args) => cmd_profile(args),
        Command::Format(args) => {
            let s = if args.bytes {
                format_bytes(args.value)
            } else {
                format_count(args.value)
            };
            println!("{s}");
            Ok(())
        }
    }
}

fn cmd_downloads(args: SeriesArgs) -> Result<()> {
    let opts: DownloadsOptions = options(&args.common.opts);
    let input = match &args.common.input {
        Some(path) => storage::load_series(path)?,
        None => Default::default(),
    };
    let badge = downloads_badge(&args.common.name, &input.samples, &opts);
    preview(
        badge.chart.plotted(),
        args.preview.as_deref(),
        PreviewStyle::from_css(&opts.color, "#ffffff", &opts.color),
    )?;
    emit(&badge, args.common.out.as_deref())
}

fn cmd_contributions(args: SeriesArgs) -> Result<()> {
    let opts: ContributionsOptions = options(&args.common.opts);
    let input = match &args.common.input {
        Some(path) => storage::load_series(path)?,
        None => Default::default(),
    };
    let card = contributions_card(&args.common.name, input.total, &input.samples, &opts);
    if let Layout::Ready(c) = &card {
        eprintln!(
            "{} days, {} bands, max {}",
            c.chart.points.len(),
            c.chart.bands.len(),
            c.chart.max_value
        );
    }
    preview(
        card.ready().map(|c| &c.chart),
        args.preview.as_deref(),
        PreviewStyle::from_css(&opts.color, &opts.even, &opts.axis),
    )?;
    emit(&card, args.common.out.as_deref())
}

fn cmd_languages(args: CommonArgs) -> Result<()> {
    let opts: LanguagesOptions = options(&args.opts);
    let shares = match &args.input {
        Some(path) => Some(storage::load_languages(path)?),
        None => None,
    };
    let card = languages_card(&args.name, shares.as_deref(), &opts);
    if let Layout::Ready(c) = &card {
        eprintln!(
            "{} languages in {} legend columns",
            c.segments.len(),
            c.legend.column_count()
        );
    }
    emit(&card, args.out.as_deref())
}

fn cmd_profile(args: CommonArgs) -> Result<()> {
    let opts: ProfileOptions = options(&args.opts);
    let summary = match &args.input {
        Some(path) => Some(storage::load_profile(path)?),
        None => None,
    };
    let card = profile_card(summary.as_ref(), Utc::now(), &opts);
    emit(&card, args.out.as_deref())
}
