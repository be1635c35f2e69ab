//! Text rendering for a resolved location and its forecast.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::{
    model::{CurrentConditions, DailyForecast, Location, UnitSystem},
    wmo,
};

pub const NO_CURRENT_DATA: &str = "Current: (no data)";
pub const NO_DAILY_DATA: &str = "Forecast: (no data)";

/// Stands in for a value the service sent as null or left out.
pub const MISSING_VALUE: &str = "n/a";

/// `"<name>, <country>  (lat <lat>, lon <lon>)"`, without the country part when unknown.
pub fn header(location: &Location) -> String {
    let place = match location.country.as_deref().map(str::trim) {
        Some(country) if !country.is_empty() => format!("{}, {}", location.name, country),
        _ => location.name.clone(),
    };
    format!(
        "{}  (lat {}, lon {})",
        place.trim().trim_matches(','),
        decimal(location.latitude),
        decimal(location.longitude),
    )
}

pub fn current_line(current: Option<&CurrentConditions>, unit: UnitSystem) -> String {
    let current = match current {
        Some(current) if !current.is_empty() => current,
        _ => return NO_CURRENT_DATA.to_string(),
    };

    let when = current.time.as_deref().map_or_else(|| MISSING_VALUE.to_string(), observation_time);
    let wind_suffix = format!(" {}", unit.wind_speed_suffix());
    format!(
        "Current ({when}): {}, {}, wind {}",
        wmo::describe(current.weathercode.unwrap_or(-1)),
        reading(current.temperature, unit.temperature_suffix()),
        reading(current.windspeed, &wind_suffix),
    )
}

/// Header line plus one line per day, at most `days` of them.
pub fn daily_block(daily: Option<&DailyForecast>, unit: UnitSystem, days: u8) -> String {
    let daily = match daily {
        Some(daily) if !daily.is_empty() => daily,
        _ => return NO_DAILY_DATA.to_string(),
    };

    let suffix = unit.temperature_suffix();
    let count = usize::from(days).min(daily.complete_days());

    let mut lines = Vec::with_capacity(count + 1);
    lines.push("Forecast:".to_string());

    for i in 0..count {
        let mut line = format!(
            "  {}  min {} / max {}",
            daily.time[i],
            reading(daily.temperature_2m_min[i], suffix),
            reading(daily.temperature_2m_max[i], suffix),
        );
        if let Some(probability) = daily.precipitation_probability(i) {
            line.push_str(&format!("  (rain prob {probability}%)"));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Reformat a service timestamp as `YYYY-MM-DD HH:MM`, or return it untouched.
fn observation_time(raw: &str) -> String {
    const OUT: &str = "%Y-%m-%d %H:%M";
    const LOCAL_FORMATS: [&str; 4] =
        ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S%.f"];

    if let Some(naive) =
        LOCAL_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return naive.format(OUT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(OUT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return format!("{} 00:00", date.format("%Y-%m-%d"));
    }

    raw.to_string()
}

/// `value` with its unit, or [`MISSING_VALUE`] without one.
fn reading(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(value) => format!("{}{suffix}", decimal(value)),
        None => MISSING_VALUE.to_string(),
    }
}

/// Always show a decimal part, so `21.0` does not collapse to `21`.
fn decimal(value: f64) -> String {
    format!("{value:?}")
}
