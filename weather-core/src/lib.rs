//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Open-Meteo geocoding and forecast clients behind the [`WeatherProvider`] trait
//! - Shared domain models (locations, request parameters, forecast payloads)
//! - The WMO weather code table
//! - Plain-text rendering of a forecast
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod wmo;

pub use config::Endpoints;
pub use error::WeatherError;
pub use model::{
    CurrentConditions, DailyForecast, Forecast, Location, RequestParameters, UnitSystem,
    UnknownUnitSystem,
};
pub use provider::{OpenMeteoProvider, WeatherProvider};
