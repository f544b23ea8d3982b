use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use wobbly_domain::constants::ADMIN_SECRET_HEADER;
use wobbly_domain::{StoreConfig, WobblyError};

use crate::errors::InfraError;

/// GraphQL client with built-in retry and timeout support.
#[derive(Clone)]
pub struct GraphqlClient {
    client: ReqwestClient,
    endpoint: String,
    max_attempts: usize,
    base_backoff: Duration,
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

impl GraphqlClient {
    /// Start building a new client for `endpoint`.
    pub fn builder(endpoint: impl Into<String>) -> GraphqlClientBuilder {
        GraphqlClientBuilder::new(endpoint)
    }

    /// Client configured from the `[store]` section.
    pub fn from_config(config: &StoreConfig) -> Result<Self, WobblyError> {
        let mut builder = Self::builder(&config.endpoint)
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts);
        if let Some(secret) = &config.admin_secret {
            builder = builder.admin_secret(secret);
        }
        builder.build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `query` with `variables` and decode its `data` payload.
    ///
    /// Server errors and transport failures are retried with exponential
    /// backoff; a response carrying GraphQL `errors` is not.
    pub async fn execute<T>(&self, query: &str, variables: &Value) -> Result<T, WobblyError>
    where
        T: DeserializeOwned,
    {
        let attempts = self.max_attempts.max(1);
        let body = serde_json::to_vec(&GraphqlRequest { query, variables })
            .map_err(|err| WobblyError::from(InfraError::from(err)))?;

        for attempt in 0..attempts {
            debug!(attempt = attempt + 1, endpoint = %self.endpoint, "sending GraphQL request");

            let sent = self
                .client
                .post(&self.endpoint)
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone())
                .send()
                .await;

            match sent {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %status, "received GraphQL response");

                    if status.is_server_error() && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    let response = response
                        .error_for_status()
                        .map_err(|err| WobblyError::from(InfraError::from(err)))?;
                    let bytes = response
                        .bytes()
                        .await
                        .map_err(|err| WobblyError::from(InfraError::from(err)))?;
                    return decode(&bytes);
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, error = %err, "GraphQL request failed");

                    if attempt + 1 < attempts && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(InfraError::from(err).into());
                }
            }
        }

        Err(WobblyError::Internal(
            "graphql client exhausted retries without producing a result".into(),
        ))
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WobblyError> {
    let envelope: GraphqlResponse<T> =
        serde_json::from_slice(bytes).map_err(|err| WobblyError::from(InfraError::from(err)))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
        warn!(errors = ?messages, "store rejected GraphQL request");
        return Err(WobblyError::Store(messages.join("; ")));
    }

    envelope.data.ok_or_else(|| WobblyError::Store("GraphQL response carried no data".into()))
}

/// Builder for [`GraphqlClient`].
#[derive(Debug)]
pub struct GraphqlClientBuilder {
    endpoint: String,
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    admin_secret: Option<String>,
}

impl GraphqlClientBuilder {
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            admin_secret: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn admin_secret(mut self, secret: impl Into<String>) -> Self {
        self.admin_secret = Some(secret.into());
        self
    }

    pub fn build(self) -> Result<GraphqlClient, WobblyError> {
        let mut headers = HeaderMap::new();
        if let Some(secret) = self.admin_secret {
            let mut value = HeaderValue::from_str(&secret).map_err(|_| {
                WobblyError::Config("store admin secret is not a valid header value".into())
            })?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(ADMIN_SECRET_HEADER), value);
        }

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .no_proxy()
            .build()
            .map_err(|err| WobblyError::from(InfraError::from(err)))?;

        Ok(GraphqlClient {
            client,
            endpoint: self.endpoint,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_request() || err.is_connect()
}
