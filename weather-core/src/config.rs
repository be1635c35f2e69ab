/// Default Open-Meteo geocoding search endpoint.
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Default Open-Meteo forecast endpoint.
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Where the provider sends its requests.
///
/// There is no file or environment backing this; values come from
/// [`Endpoints::default`] and whatever the caller overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub user_agent: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
            user_agent: concat!("weather-cli/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Endpoints {
    /// Replace the geocoding URL if one is given.
    pub fn with_geocoding_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.geocoding_url = url;
        }
        self
    }

    /// Replace the forecast URL if one is given.
    pub fn with_forecast_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.forecast_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.geocoding_url, GEOCODING_URL);
        assert_eq!(endpoints.forecast_url, FORECAST_URL);
        assert!(endpoints.user_agent.starts_with("weather-cli/"));
    }

    #[test]
    fn overrides_only_apply_when_present() {
        let endpoints = Endpoints::default()
            .with_geocoding_url(Some("http://localhost:8080/search".into()))
            .with_forecast_url(None);

        assert_eq!(endpoints.geocoding_url, "http://localhost:8080/search");
        assert_eq!(endpoints.forecast_url, FORECAST_URL);
    }
}
