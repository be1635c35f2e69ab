use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the Open-Meteo services.
///
/// "Place not found" is deliberately absent: an empty geocoding result is an
/// expected outcome and is reported as `Ok(None)`.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to {service}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {service} JSON")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherError {
    /// True for transport failures and non-success statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, WeatherError::Transport { .. } | WeatherError::Status { .. })
    }
}

/// Shorten a response body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "ü".repeat(300);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn status_error_is_network() {
        let err = WeatherError::Status {
            service: "Open-Meteo forecast",
            status: StatusCode::BAD_GATEWAY,
            body: "upstream".into(),
        };
        assert!(err.is_network());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn decode_error_is_not_network() {
        let source = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = WeatherError::Decode { service: "Open-Meteo geocoding", source };
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "Failed to parse Open-Meteo geocoding JSON");
    }
}
