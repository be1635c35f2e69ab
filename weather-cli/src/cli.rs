use anyhow::Context;
use clap::{ArgAction, Parser};
use std::process::ExitCode;
use tracing::info;
use weather_core::{
    Endpoints, OpenMeteoProvider, RequestParameters, UnitSystem, UnknownUnitSystem,
    WeatherProvider, format,
};

/// Exit status when the place name cannot be resolved.
pub const EXIT_NOT_FOUND: u8 = 2;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Simple weather CLI using Open-Meteo (no API key)."
)]
pub struct Cli {
    /// City or place name, e.g. "Berlin" or "Cottbus".
    pub place: String,

    /// How many forecast days (1-16).
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub days: i64,

    /// Units: metric or imperial.
    #[arg(long, default_value = "metric", value_parser = parse_unit)]
    pub unit: UnitSystem,

    /// Geocoding language.
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Log progress to stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, hide = true)]
    pub geocoding_url: Option<String>,

    #[arg(long, hide = true)]
    pub forecast_url: Option<String>,
}

fn parse_unit(value: &str) -> Result<UnitSystem, UnknownUnitSystem> {
    UnitSystem::try_from(value)
}

/// Result of one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Report(String),
    NotFound { place: String },
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Report(_) => 0,
            Outcome::NotFound { .. } => EXIT_NOT_FOUND,
        }
    }

    /// Message for stderr, if the outcome needs one.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Outcome::Report(_) => None,
            Outcome::NotFound { place } => {
                Some(format!("Could not find a place named '{place}'. Try a more specific name."))
            }
        }
    }
}

impl Cli {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::default()
            .with_geocoding_url(self.geocoding_url.clone())
            .with_forecast_url(self.forecast_url.clone())
    }

    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let provider =
            OpenMeteoProvider::new(self.endpoints()).context("Failed to set up Open-Meteo client")?;

        let outcome = self.lookup(&provider).await?;
        if let Outcome::Report(report) = &outcome {
            println!("{report}");
        }
        if let Some(message) = outcome.diagnostic() {
            eprintln!("{message}");
        }

        Ok(ExitCode::from(outcome.exit_code()))
    }

    /// Geocode, fetch and render. Provider errors are passed through untouched
    /// apart from added context.
    pub async fn lookup(&self, provider: &dyn WeatherProvider) -> anyhow::Result<Outcome> {
        let params = RequestParameters::new(self.days, self.unit, &self.lang, "auto");

        let location = provider
            .geocode(&self.place, params.language())
            .await
            .with_context(|| format!("Failed to look up '{}'", self.place))?;

        let Some(location) = location else {
            return Ok(Outcome::NotFound { place: self.place.clone() });
        };

        let params = params.with_timezone(&location.timezone);
        info!(days = params.days(), unit = %params.unit(), "requesting forecast");

        let forecast = provider
            .forecast(&location, &params)
            .await
            .with_context(|| format!("Failed to fetch forecast for '{}'", location.name))?;

        let report = [
            format::header(&location),
            format::current_line(forecast.current_weather.as_ref(), params.unit()),
            format::daily_block(forecast.daily.as_ref(), params.unit(), params.days()),
        ]
        .join("\n");

        Ok(Outcome::Report(report))
    }
}
