use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::Endpoints,
    error::{WeatherError, truncate_body},
    model::{Forecast, Location, RequestParameters},
};

pub mod forecast;
pub mod geocode;

/// Source of locations and forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Best match for `place`, or `None` when the service knows no such place.
    async fn geocode(&self, place: &str, language: &str) -> Result<Option<Location>, WeatherError>;

    async fn forecast(
        &self,
        location: &Location,
        params: &RequestParameters,
    ) -> Result<Forecast, WeatherError>;
}

/// Open-Meteo geocoding and forecast APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoints: Endpoints,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(endpoints: Endpoints) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .user_agent(endpoints.user_agent.as_str())
            .build()
            .map_err(WeatherError::Client)?;

        Ok(Self { endpoints, http })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, place: &str, language: &str) -> Result<Option<Location>, WeatherError> {
        self.search(place, language).await
    }

    async fn forecast(
        &self,
        location: &Location,
        params: &RequestParameters,
    ) -> Result<Forecast, WeatherError> {
        self.fetch_forecast(location, params).await
    }
}

/// Send `request`, require a success status, and decode the JSON body.
///
/// The body is read in full before the status is checked.
async fn get_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T, WeatherError> {
    let res = request
        .send()
        .await
        .map_err(|source| WeatherError::Transport { service, source })?;

    let status = res.status();
    debug!(service, %status, "response received");

    let body = res
        .text()
        .await
        .map_err(|source| WeatherError::Transport { service, source })?;

    if !status.is_success() {
        return Err(WeatherError::Status { service, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|source| WeatherError::Decode { service, source })
}
