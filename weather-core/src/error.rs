use reqwest::StatusCode;

use crate::config::ServiceId;

/// Errors raised while talking to upstream services or normalizing their data.
///
/// "No results" is never an error: lookups return `Ok(None)` for that case.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {service} response: {source}")]
    Parse {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Provider(String),

    #[error("No weather data available")]
    NoData,

    #[error("{} API key not configured. Service unavailable.", .0.display_name())]
    ServiceUnavailable(ServiceId),
}

impl WeatherError {
    /// Whether a manual retry could plausibly succeed.
    pub fn is_retryable_by_user(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { .. })
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

/// Read a response body, turning non-2xx statuses into [`WeatherError::Status`].
pub(crate) async fn read_success_body(
    service: &'static str,
    res: reqwest::Response,
) -> Result<String> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        tracing::debug!(service, %status, "upstream returned an error status");
        return Err(WeatherError::Status {
            service,
            status,
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    service: &'static str,
    body: &str,
) -> Result<T> {
    serde_json::from_str(body).map_err(|source| WeatherError::Parse { service, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_cuts_long_bodies_on_char_boundary() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }

    #[test]
    fn missing_key_message_names_the_service() {
        let err = WeatherError::ServiceUnavailable(ServiceId::AirQuality);
        assert!(err.to_string().contains("Air quality"));
        assert!(!err.is_retryable_by_user());
    }

    #[test]
    fn parse_json_reports_service() {
        let err = parse_json::<serde_json::Value>("geocoder", "{not json").unwrap_err();
        assert!(err.to_string().contains("geocoder"));
    }
}
