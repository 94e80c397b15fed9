//! badgekit
//!
//! Layout and formatting engine for small SVG status badges. Turns already-fetched metrics
//! into pixel geometry and compact text that a markup assembler can drop into templates.
//! Pairs with the `badgekit` CLI.
//!
//! ### Features
//! - Average-glyph text width estimation
//! - Compact counts (`1.50K`) and byte sizes (`2.00 KB`)
//! - Time-series geometry with month ticks, alternating bands and a max-value callout
//! - Legend grid packing with aligned percentage labels
//! - TTL cache for avatar images
//! - Ready-made layouts for download, contribution, language and profile badges
//!
//! ### Example
//! ```
//! use badgekit::config::{BadgeOptions, DownloadsOptions};
//! use badgekit::models::Sample;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let samples: Vec<Sample> = (0..30u64)
//!     .map(|i| Sample::new(start + chrono::Days::new(i), 45 + i % 2 * 10))
//!     .collect();
//! let opts = DownloadsOptions::from_pairs([("label", "{total} per month")]);
//! let badge = badgekit::badges::downloads_badge("left-pad", &samples, &opts);
//! assert_eq!(badge.label, "1.50K per month");
//! assert_eq!(badgekit::format::format_bytes(2048.0), "2.00 KB");
//! ```

pub mod badges;
pub mod cache;
pub mod config;
pub mod format;
pub mod icons;
pub mod layout;
pub mod models;
pub mod preview;
pub mod storage;

pub use cache::{AvatarCache, CacheConfig};
pub use format::{format_bytes, format_count};
pub use layout::{ChartGeometry, LegendGrid, build_chart, pack_legend};
pub use models::Sample;
