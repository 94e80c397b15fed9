//! Reading badge inputs from disk and writing computed layouts.
//!
//! Series can be given as CSV (`date,value` with a header) or JSON. Besides a plain array of
//! samples, JSON input also accepts the shapes the upstream APIs return, so a saved API
//! response can be fed back in as is.

use crate::badges::{LanguageShare, ProfileSummary, aggregate_languages};
use crate::models::{CategorySize, Sample, ensure_ascending, parse_sample};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// A loaded series plus the total reported alongside it, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesInput {
    pub samples: Vec<Sample>,
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct NpmDay {
    day: NaiveDate,
    downloads: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDay {
    date: NaiveDate,
    contribution_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarWeek {
    contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeriesDoc {
    Plain(Vec<Sample>),
    /// npm "downloads/range" response.
    Npm { downloads: Vec<NpmDay> },
    /// GitHub contribution calendar.
    #[serde(rename_all = "camelCase")]
    Calendar {
        total_contributions: Option<u64>,
        weeks: Vec<CalendarWeek>,
    },
}

impl From<SeriesDoc> for SeriesInput {
    fn from(doc: SeriesDoc) -> Self {
        match doc {
            SeriesDoc::Plain(samples) => SeriesInput {
                samples,
                total: None,
            },
            SeriesDoc::Npm { downloads } => SeriesInput {
                samples: downloads
                    .into_iter()
                    .map(|d| Sample::new(d.day, d.downloads))
                    .collect(),
                total: None,
            },
            SeriesDoc::Calendar {
                total_contributions,
                weeks,
            } => SeriesInput {
                samples: weeks
                    .into_iter()
                    .flat_map(|w| w.contribution_days)
                    .map(|d| Sample::new(d.date, d.contribution_count))
                    .collect(),
                total: total_contributions,
            },
        }
    }
}

/// Load a series from CSV with a header row.
///
/// The date column is `date` or `day`; the value column is `value`, `count` or `downloads`.
/// Without recognizable headers the first two columns are used.
pub fn load_samples_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    };
    let date_col = find(&["date", "day"]).unwrap_or(0);
    let value_col = find(&["value", "count", "downloads"]).unwrap_or(1);

    let mut samples = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let (Some(date), Some(value)) = (record.get(date_col), record.get(value_col)) else {
            bail!("{}: row {} has too few columns", path.display(), line + 2);
        };
        let sample = parse_sample(date, value)
            .with_context(|| format!("{}: row {}", path.display(), line + 2))?;
        samples.push(sample);
    }
    ensure_ascending(&samples).with_context(|| path.display().to_string())?;
    debug!("loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Load a series from JSON (plain samples, npm downloads or a contribution calendar).
pub fn load_series_json<P: AsRef<Path>>(path: P) -> Result<SeriesInput> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let doc: SeriesDoc = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing series from {}", path.display()))?;
    let input = SeriesInput::from(doc);
    ensure_ascending(&input.samples).with_context(|| path.display().to_string())?;
    Ok(input)
}

/// Load a series, picking the format from the extension (`.csv`, anything else is JSON).
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<SeriesInput> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(SeriesInput {
            samples: load_samples_csv(path)?,
            total: None,
        })
    } else {
        load_series_json(path)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LanguagesDoc {
    PerRepository(Vec<Vec<CategorySize>>),
    Flat(Vec<CategorySize>),
}

/// Load language sizes (per repository or already flat) and aggregate them into shares.
pub fn load_languages<P: AsRef<Path>>(path: P) -> Result<Vec<LanguageShare>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let doc: LanguagesDoc = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing languages from {}", path.display()))?;
    Ok(match doc {
        LanguagesDoc::PerRepository(repos) => aggregate_languages(repos.iter().map(Vec::as_slice)),
        LanguagesDoc::Flat(langs) => aggregate_languages([langs.as_slice()]),
    })
}

/// Load a profile summary from JSON.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<ProfileSummary> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing profile from {}", path.display()))
}

/// Save any layout as pretty JSON.
pub fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn csv_with_npm_headers() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("dl.csv");
        fs::write(&p, "day,downloads\n2024-01-01, 3\n2024-01-02,0\n").unwrap();
        let s = load_samples_csv(&p).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].value, 3);
    }

    #[test]
    fn csv_reports_bad_row() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("bad.csv");
        fs::write(&p, "date,value\n2024-01-01,1\n2024-01-02,-1\n").unwrap();
        let err = load_samples_csv(&p).unwrap_err();
        assert!(format!("{err:#}").contains("row 3"));
    }

    #[test]
    fn calendar_json_keeps_total() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("cal.json");
        fs::write(
            &p,
            r#"{"totalContributions": 7, "weeks": [
                {"contributionDays": [{"date": "2024-01-01", "contributionCount": 3}]},
                {"contributionDays": [{"date": "2024-01-08", "contributionCount": 4}]}
            ]}"#,
        )
        .unwrap();
        let input = load_series(&p).unwrap();
        assert_eq!(input.total, Some(7));
        assert_eq!(input.samples.len(), 2);
    }
}
