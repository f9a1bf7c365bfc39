//! Pure display helpers extracted from components for non-wasm testing.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use reelstyle_api_models::{AnalysisResult, Profile, StylePassport};

use crate::i18n::LocaleCode;

/// Placeholder for values that cannot be displayed.
pub const NOT_AVAILABLE: &str = "N/A";
/// Key elements shown in summary views.
pub const MAX_SUMMARY_TAGS: usize = 3;
/// Past videos listed on the generator page.
pub const MAX_RECENT_VIDEOS: usize = 5;
/// Pacing that fills the pacing bar, in words per second.
pub const PACING_SCALE: f64 = 10.0;

/// Format a count compactly: `1.2M`, `3.4K`, or the plain number.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_compact(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Compact count with `0` for absent values.
#[must_use]
pub fn format_count(value: Option<u64>) -> String {
    format_compact(value.unwrap_or(0))
}

/// Format seconds as `m:ss`; `N/A` when absent or zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(total) if total.is_finite() && total > 0.0 => {
            let whole = total.floor() as u64;
            format!("{}:{:02}", whole / 60, whole % 60)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.date_naive());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.date());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(parsed.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Format a backend timestamp as a long local date; `N/A` when unparsable.
#[must_use]
pub fn format_date(raw: Option<&str>, locale: LocaleCode) -> String {
    let Some(date) = raw.and_then(parse_date) else {
        return NOT_AVAILABLE.to_string();
    };
    let month = locale.month_name(date.month());
    match locale {
        LocaleCode::En => format!("{month} {}, {}", date.day(), date.year()),
        LocaleCode::Ru => format!("{} {month} {} г.", date.day(), date.year()),
    }
}

/// First [`MAX_SUMMARY_TAGS`] key elements.
#[must_use]
pub fn summary_key_elements(elements: &[String]) -> &[String] {
    &elements[..elements.len().min(MAX_SUMMARY_TAGS)]
}

/// Pacing bar fill in percent, clamped to `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pacing_percent(pacing: Option<f64>) -> u8 {
    match pacing {
        Some(value) if value.is_finite() => {
            (value / PACING_SCALE * 100.0).clamp(0.0, 100.0).round() as u8
        }
        _ => 0,
    }
}

/// Parse a positive video id from a route segment.
#[must_use]
pub fn parse_video_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Display title for an analysis, falling back to the uploader.
#[must_use]
pub fn analysis_title(result: &AnalysisResult) -> Option<String> {
    let stats = result.meta_stats.as_ref()?;
    stats
        .title
        .clone()
        .or_else(|| stats.uploader.clone())
        .filter(|title| !title.trim().is_empty())
}

/// Whether the passport has anything to render.
#[must_use]
pub fn has_passport(passport: Option<&StylePassport>) -> bool {
    passport.is_some_and(|passport| {
        passport.hook_analysis.is_some()
            || passport.pacing_wpm.is_some()
            || passport.visual_style.is_some()
            || passport.audio_tone.is_some()
            || !passport.key_elements.is_empty()
            || !passport.structure.is_empty()
            || passport.stats_analysis.is_some()
    })
}

/// Most recent analysis date of a profile.
///
/// The backend returns videos in insertion order, so the latest parsable
/// `created_at` wins; unparsable values only count when nothing parses.
#[must_use]
pub fn last_analysis_date(profile: &Profile) -> Option<&str> {
    let stamps = move || {
        profile
            .videos
            .iter()
            .filter_map(|video| video.created_at.as_deref())
    };
    stamps()
        .filter_map(|raw| parse_date(raw).map(|date| (date, raw)))
        .max_by_key(|(date, _)| *date)
        .map(|(_, raw)| raw)
        .or_else(|| stamps().next())
}
