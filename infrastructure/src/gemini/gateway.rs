//! HTTP gateway for the Gemini API

use super::types::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use delegate_application::{GatewayError, GenerationGateway};
use delegate_domain::core::string::truncate;
use delegate_domain::{Credential, Model};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Longest response body kept in an error
const MAX_ERROR_BODY: usize = 200;

/// [`GenerationGateway`] over the public `generateContent` endpoint
pub struct GeminiGateway {
    client: Client,
    base_url: String,
}

impl GeminiGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &Model) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(timeout)
    } else {
        GatewayError::Transport(error.to_string())
    }
}

#[async_trait]
impl GenerationGateway for GeminiGateway {
    async fn generate(
        &self,
        model: &Model,
        credential: &Credential,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, GatewayError> {
        debug!(
            "POST {} (key {}, timeout {}s)",
            self.endpoint(model),
            credential.masked(),
            timeout.as_secs()
        );

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", credential.expose())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                return Err(GatewayError::RateLimited {
                    status: response.status().as_u16(),
                });
            }
            StatusCode::BAD_REQUEST => return Err(GatewayError::InvalidCredential),
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(GatewayError::UnexpectedStatus {
                    status: status.as_u16(),
                    body: truncate(body.trim(), MAX_ERROR_BODY),
                });
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout))?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PATH: &str = "/models/gemini-2.5-pro:generateContent";

    fn credential() -> Credential {
        Credential::new("test-key-1234")
    }

    async fn generate(server: &MockServer, timeout: Duration) -> Result<String, GatewayError> {
        GeminiGateway::new(server.uri())
            .generate(&Model::default(), &credential(), "Hello", timeout)
            .await
    }

    async fn respond(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(PATH))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_success_sends_key_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(query_param("key", "test-key-1234"))
            .and(body_json(json!({"contents": [{"parts": [{"text": "Hello"}]}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "Hi there"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = generate(&server, Duration::from_secs(5)).await.unwrap();
        assert_eq!(text, "Hi there");
    }

    #[tokio::test]
    async fn test_success_without_candidates_is_empty() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;

        assert_eq!(generate(&server, Duration::from_secs(5)).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_forbidden_is_rate_limited() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(403)).await;

        assert_eq!(
            generate(&server, Duration::from_secs(5)).await,
            Err(GatewayError::RateLimited { status: 403 })
        );
    }

    #[tokio::test]
    async fn test_too_many_requests_is_rate_limited() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(429)).await;

        assert_eq!(
            generate(&server, Duration::from_secs(5)).await,
            Err(GatewayError::RateLimited { status: 429 })
        );
    }

    #[tokio::test]
    async fn test_bad_request_is_invalid_credential() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(400)).await;

        assert_eq!(
            generate(&server, Duration::from_secs(5)).await,
            Err(GatewayError::InvalidCredential)
        );
    }

    #[tokio::test]
    async fn test_other_status_keeps_body() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(503).set_body_string("overloaded")).await;

        assert_eq!(
            generate(&server, Duration::from_secs(5)).await,
            Err(GatewayError::UnexpectedStatus {
                status: 503,
                body: "overloaded".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

        assert!(matches!(
            generate(&server, Duration::from_secs(5)).await,
            Err(GatewayError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        respond(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .await;

        let timeout = Duration::from_millis(100);
        assert_eq!(
            generate(&server, timeout).await,
            Err(GatewayError::Timeout(timeout))
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = GeminiGateway::new("http://localhost:1234/v1beta/");
        assert_eq!(
            gateway.endpoint(&Model::Gemini25Flash),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
