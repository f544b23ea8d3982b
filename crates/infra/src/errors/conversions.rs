//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use wobbly_domain::WobblyError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub WobblyError);

impl From<InfraError> for WobblyError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<WobblyError> for InfraError {
    fn from(value: WobblyError) -> Self {
        InfraError(value)
    }
}

trait IntoWobblyError {
    fn into_wobbly(self) -> WobblyError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → WobblyError */
/* -------------------------------------------------------------------------- */

impl IntoWobblyError for HttpError {
    fn into_wobbly(self) -> WobblyError {
        if self.is_timeout() {
            return WobblyError::Network("store request timed out".into());
        }
        if self.is_connect() {
            return WobblyError::Network("store connection failure".into());
        }
        if self.is_decode() {
            return WobblyError::Store(format!("undecodable store response: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
            return match code {
                // A rejected admin secret is a deployment problem, not a user one.
                401 | 403 => WobblyError::Config(message),
                404 => WobblyError::NotFound(message),
                429 | 500..=599 => WobblyError::Network(message),
                400..=499 => WobblyError::InvalidInput(message),
                _ => WobblyError::Network(message),
            };
        }

        WobblyError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_wobbly())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → WobblyError */
/* -------------------------------------------------------------------------- */

impl IntoWobblyError for JsonError {
    fn into_wobbly(self) -> WobblyError {
        WobblyError::Store(format!(
            "malformed store payload at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_wobbly())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn status_error(status: StatusCode) -> HttpError {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        client.post(server.uri()).send().await.unwrap().error_for_status().unwrap_err()
    }

    #[tokio::test]
    async fn test_http_status_401_maps_to_config_error() {
        let mapped: WobblyError =
            InfraError::from(status_error(StatusCode::UNAUTHORIZED).await).into();
        match mapped {
            WobblyError::Config(msg) => assert!(msg.contains("401")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_status_503_is_retryable() {
        let mapped: WobblyError =
            InfraError::from(status_error(StatusCode::SERVICE_UNAVAILABLE).await).into();
        assert!(mapped.is_retryable(), "got {:?}", mapped);
    }

    #[test]
    fn test_json_error_maps_to_store_error() {
        let err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let mapped: WobblyError = InfraError::from(err).into();
        match mapped {
            WobblyError::Store(msg) => assert!(msg.contains("line 1")),
            other => panic!("expected store error, got {:?}", other),
        }
    }
}
