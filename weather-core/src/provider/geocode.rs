use reqwest::RequestBuilder;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{error::WeatherError, model::Location};

use super::{OpenMeteoProvider, get_json};

const SERVICE: &str = "Open-Meteo geocoding";

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    #[serde(default)]
    results: Option<Vec<Location>>,
}

impl OpenMeteoProvider {
    pub(crate) fn search_request(&self, place: &str, language: &str) -> RequestBuilder {
        self.http.get(&self.endpoints.geocoding_url).query(&[
            ("name", place),
            ("count", "1"),
            ("language", language),
            ("format", "json"),
        ])
    }

    /// First geocoding match for `place`; `None` when the result list is empty.
    pub async fn search(&self, place: &str, language: &str) -> Result<Option<Location>, WeatherError> {
        debug!(place, language, "geocoding");

        let parsed: GeoSearchResponse = get_json(SERVICE, self.search_request(place, language)).await?;
        let location = first_match(parsed);

        match &location {
            Some(loc) => info!(
                name = %loc.name,
                lat = loc.latitude,
                lon = loc.longitude,
                timezone = %loc.timezone,
                "resolved place"
            ),
            None => info!(place, "no geocoding results"),
        }

        Ok(location)
    }
}

fn first_match(response: GeoSearchResponse) -> Option<Location> {
    response.results.unwrap_or_default().into_iter().next()
}
