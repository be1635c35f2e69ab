use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Largest `forecast_days` value Open-Meteo accepts.
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Best geocoding match for a place name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "auto_timezone")]
    pub timezone: String,
}

fn auto_timezone() -> String {
    "auto".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }

    /// Value of the `temperature_unit` query parameter.
    pub fn temperature_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "celsius",
            UnitSystem::Imperial => "fahrenheit",
        }
    }

    /// Value of the `wind_speed_unit` query parameter.
    pub fn wind_speed_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kmh",
            UnitSystem::Imperial => "mph",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn wind_speed_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown unit system '{0}'. Supported unit systems: metric, imperial.")]
pub struct UnknownUnitSystem(pub String);

impl TryFrom<&str> for UnitSystem {
    type Error = UnknownUnitSystem;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(UnknownUnitSystem(value.to_string())),
        }
    }
}

/// Everything needed to build a forecast request besides the coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    days: u8,
    unit: UnitSystem,
    language: String,
    timezone: String,
}

impl RequestParameters {
    /// `days` is clamped into `1..=16`; an empty timezone becomes `"auto"`.
    pub fn new(
        days: i64,
        unit: UnitSystem,
        language: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        let days = days.clamp(1, i64::from(MAX_FORECAST_DAYS)) as u8;
        let timezone = timezone.into();
        let timezone = if timezone.trim().is_empty() { auto_timezone() } else { timezone };

        Self { days, unit, language: language.into(), timezone }
    }

    /// Same parameters, resolved to a location's timezone.
    pub fn with_timezone(self, timezone: impl Into<String>) -> Self {
        Self::new(i64::from(self.days), self.unit, self.language, timezone)
    }

    pub fn days(&self) -> u8 {
        self.days
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}

/// The `current_weather` block of a forecast response.
///
/// Every field is optional so a partial or empty block still decodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentConditions {
    /// Observation time exactly as the service sent it.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub weathercode: Option<i64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
}

impl CurrentConditions {
    pub fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.weathercode.is_none()
            && self.temperature.is_none()
            && self.windspeed.is_none()
    }
}

/// The `daily` block: parallel per-day sequences, possibly of unequal length.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub time: Vec<NaiveDate>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
}

impl DailyForecast {
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
            && self.temperature_2m_max.is_empty()
            && self.temperature_2m_min.is_empty()
            && self.precipitation_probability_max.is_empty()
    }

    /// Number of days covered by the date and both temperature sequences.
    /// A null temperature still counts as a day.
    pub fn complete_days(&self) -> usize {
        self.time
            .len()
            .min(self.temperature_2m_max.len())
            .min(self.temperature_2m_min.len())
    }

    /// Rain probability for day `index`, if the service reported one.
    pub fn precipitation_probability(&self, index: usize) -> Option<f64> {
        self.precipitation_probability_max.get(index).copied().flatten()
    }
}

/// Forecast response; either block may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub current_weather: Option<CurrentConditions>,
    #[serde(default)]
    pub daily: Option<DailyForecast>,
}
