use reqwest::RequestBuilder;
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{Forecast, Location, RequestParameters},
};

use super::{OpenMeteoProvider, get_json};

const SERVICE: &str = "Open-Meteo forecast";

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_probability_max";

impl OpenMeteoProvider {
    pub(crate) fn forecast_request(
        &self,
        location: &Location,
        params: &RequestParameters,
    ) -> RequestBuilder {
        let unit = params.unit();
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let days = params.days().to_string();

        self.http.get(&self.endpoints.forecast_url).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current_weather", "true"),
            ("daily", DAILY_FIELDS),
            ("timezone", params.timezone()),
            ("forecast_days", days.as_str()),
            ("temperature_unit", unit.temperature_unit()),
            ("wind_speed_unit", unit.wind_speed_unit()),
        ])
    }

    /// Current conditions and daily forecast for `location`.
    pub async fn fetch_forecast(
        &self,
        location: &Location,
        params: &RequestParameters,
    ) -> Result<Forecast, WeatherError> {
        debug!(
            lat = location.latitude,
            lon = location.longitude,
            days = params.days(),
            unit = %params.unit(),
            timezone = params.timezone(),
            "fetching forecast"
        );

        let forecast: Forecast = get_json(SERVICE, self.forecast_request(location, params)).await?;

        if forecast.current_weather.is_none() {
            debug!("forecast response has no current_weather block");
        }
        if forecast.daily.is_none() {
            debug!("forecast response has no daily block");
        }

        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Endpoints, model::UnitSystem};
    use std::collections::HashMap;

    fn provider() -> OpenMeteoProvider {
        OpenMeteoProvider::new(Endpoints::default()).expect("client should build")
    }

    fn berlin() -> Location {
        Location {
            name: "Berlin".into(),
            country: Some("Germany".into()),
            latitude: 52.52437,
            longitude: 13.41053,
            timezone: "Europe/Berlin".into(),
        }
    }

    fn query(params: &RequestParameters) -> HashMap<String, String> {
        let request = provider().forecast_request(&berlin(), params).build().unwrap();
        assert_eq!(request.url().host_str(), Some("api.open-meteo.com"));
        request.url().query_pairs().into_owned().collect()
    }

    #[test]
    fn metric_request_query() {
        let params = RequestParameters::new(3, UnitSystem::Metric, "en", "Europe/Berlin");
        let q = query(&params);

        assert_eq!(q["latitude"], "52.52437");
        assert_eq!(q["longitude"], "13.41053");
        assert_eq!(q["current_weather"], "true");
        assert_eq!(q["daily"], DAILY_FIELDS);
        assert_eq!(q["timezone"], "Europe/Berlin");
        assert_eq!(q["forecast_days"], "3");
        assert_eq!(q["temperature_unit"], "celsius");
        assert_eq!(q["wind_speed_unit"], "kmh");
        assert_eq!(q.len(), 8);
    }

    #[test]
    fn imperial_request_query() {
        let params = RequestParameters::new(5, UnitSystem::Imperial, "en", "auto");
        let q = query(&params);

        assert_eq!(q["temperature_unit"], "fahrenheit");
        assert_eq!(q["wind_speed_unit"], "mph");
        assert_eq!(q["timezone"], "auto");
    }

    #[test]
    fn forecast_days_are_always_clamped() {
        for (days, expected) in [(-3, "1"), (0, "1"), (16, "16"), (40, "16")] {
            let params = RequestParameters::new(days, UnitSystem::Metric, "en", "auto");
            assert_eq!(query(&params)["forecast_days"], expected, "days {days}");
        }
    }

    #[test]
    fn decodes_full_payload() {
        let forecast: Forecast = serde_json::from_str(
            r#"{
                "latitude": 52.52,
                "longitude": 13.419998,
                "timezone": "Europe/Berlin",
                "current_weather": {
                    "time": "2024-05-01T14:15",
                    "interval": 900,
                    "temperature": 18.3,
                    "windspeed": 11.2,
                    "winddirection": 250,
                    "is_day": 1,
                    "weathercode": 2
                },
                "daily": {
                    "time": ["2024-05-01", "2024-05-02", "2024-05-03"],
                    "temperature_2m_max": [21.4, 19.0, 17.3],
                    "temperature_2m_min": [10.2, 9.0, 8.5],
                    "precipitation_probability_max": [40, 5, null]
                }
            }"#,
        )
        .unwrap();

        let current = forecast.current_weather.expect("current");
        assert_eq!(current.weathercode, Some(2));
        assert_eq!(current.time.as_deref(), Some("2024-05-01T14:15"));

        let daily = forecast.daily.expect("daily");
        assert_eq!(daily.complete_days(), 3);
        assert_eq!(daily.precipitation_probability(2), None);
    }

    #[test]
    fn decodes_nulls_at_the_end_of_a_long_range() {
        let forecast: Forecast = serde_json::from_str(
            r#"{
                "current_weather": {},
                "daily": {
                    "time": ["2024-05-15", "2024-05-16"],
                    "temperature_2m_max": [20.0, null],
                    "temperature_2m_min": [9.1, null],
                    "precipitation_probability_max": [null, null]
                }
            }"#,
        )
        .unwrap();

        assert!(forecast.current_weather.expect("current").is_empty());
        let daily = forecast.daily.expect("daily");
        assert_eq!(daily.temperature_2m_max[1], None);
        assert_eq!(daily.complete_days(), 2);
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let endpoints =
            Endpoints::default().with_forecast_url(Some("http://127.0.0.1:9/v1/forecast".into()));
        let provider = OpenMeteoProvider::new(endpoints).unwrap();
        let params = RequestParameters::new(3, UnitSystem::Metric, "en", "auto");

        let err = provider.fetch_forecast(&berlin(), &params).await.unwrap_err();
        assert!(err.is_network(), "unexpected error: {err:?}");
    }
}
