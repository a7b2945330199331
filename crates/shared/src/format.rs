//! Display formatting shared by every screen that renders movie metadata.

use chrono::NaiveDate;

pub const NOT_AVAILABLE: &str = "N/A";
pub const TO_BE_ANNOUNCED: &str = "TBA";

/// One decimal, halves rounded away from zero (`7.25` reads `"7.3"`).
pub fn format_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(value) if value.is_finite() => format!("{:.1}", (value * 10.0).round() / 10.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// First four characters of an ISO date, or `"TBA"` when unknown.
pub fn format_release_year(release_date: Option<&str>) -> String {
    release_year(release_date).unwrap_or_else(|| TO_BE_ANNOUNCED.to_string())
}

/// Row label used by the list screens: `"Release: 2010"` or `"N/A"`.
pub fn format_release_label(release_date: Option<&str>) -> String {
    match release_year(release_date) {
        Some(year) => format!("Release: {year}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn release_year(release_date: Option<&str>) -> Option<String> {
    release_date
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .map(|date| date.chars().take(4).collect())
}

/// `"July 16, 2010"` for the detail screen. Dates that do not parse are shown
/// as received.
pub fn format_long_date(release_date: Option<&str>) -> String {
    let Some(raw) = release_date.map(str::trim).filter(|d| !d.is_empty()) else {
        return TO_BE_ANNOUNCED.to_string();
    };
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn format_runtime(runtime_minutes: Option<u32>) -> String {
    match runtime_minutes {
        Some(minutes) if minutes > 0 => format!("{}h {}m", minutes / 60, minutes % 60),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Millions with one decimal. Rounded in integer tenths so `1_250_000` reads
/// `"$1.3M"`.
pub fn format_budget(budget: Option<u64>) -> String {
    match budget {
        Some(amount) if amount > 0 => {
            let tenths = amount.saturating_add(50_000) / 100_000;
            format!("${}.{}M", tenths / 10, tenths % 10)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_is_hours_and_minutes() {
        assert_eq!(format_runtime(Some(142)), "2h 22m");
        assert_eq!(format_runtime(Some(45)), "0h 45m");
        assert_eq!(format_runtime(Some(120)), "2h 0m");
        assert_eq!(format_runtime(Some(0)), "N/A");
        assert_eq!(format_runtime(None), "N/A");
    }

    #[test]
    fn budget_is_millions_with_one_decimal() {
        assert_eq!(format_budget(Some(165_000_000)), "$165.0M");
        assert_eq!(format_budget(Some(2_460_000)), "$2.5M");
        assert_eq!(format_budget(Some(1_250_000)), "$1.3M");
        assert_eq!(format_budget(Some(1_249_999)), "$1.2M");
        assert_eq!(format_budget(Some(50_000)), "$0.1M");
        assert_eq!(format_budget(Some(0)), "N/A");
        assert_eq!(format_budget(None), "N/A");
    }

    #[test]
    fn release_year_uses_first_four_characters() {
        assert_eq!(format_release_year(Some("2010-07-16")), "2010");
        assert_eq!(format_release_year(None), "TBA");
        assert_eq!(format_release_year(Some("  ")), "TBA");
        assert_eq!(format_release_label(Some("1999-03-31")), "Release: 1999");
        assert_eq!(format_release_label(None), "N/A");
    }

    #[test]
    fn rating_has_one_decimal() {
        assert_eq!(format_rating(Some(8.369)), "8.4");
        assert_eq!(format_rating(Some(7.0)), "7.0");
        assert_eq!(format_rating(Some(7.25)), "7.3");
        assert_eq!(format_rating(Some(0.25)), "0.3");
        assert_eq!(format_rating(Some(6.75)), "6.8");
        assert_eq!(format_rating(None), "N/A");
    }

    #[test]
    fn long_date_is_spelled_out() {
        assert_eq!(format_long_date(Some("2010-07-16")), "July 16, 2010");
        assert_eq!(format_long_date(Some("2024-01-05")), "January 5, 2024");
        assert_eq!(format_long_date(Some("sometime")), "sometime");
        assert_eq!(format_long_date(None), "TBA");
    }
}
