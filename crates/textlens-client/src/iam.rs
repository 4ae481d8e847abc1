//! IBM Cloud IAM token exchange.
//!
//! Trades an API key for a short-lived bearer token at the IAM
//! `/identity/token` endpoint.

use reqwest::StatusCode;
use serde::Deserialize;
use textlens_core::{NluError, NluResult};
use tracing::debug;

use crate::nlu::{body_excerpt, transport_error};

/// Default IAM token URL.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

const API_KEY_GRANT: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// IAM authenticator.
#[derive(Clone)]
pub struct IamAuthenticator {
    url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl IamAuthenticator {
    pub fn new(url: &str, client: reqwest::Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    /// Exchange an API key for a bearer token.
    pub async fn token(&self, api_key: &str) -> NluResult<String> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("grant_type", API_KEY_GRANT), ("apikey", api_key)])
            .send()
            .await
            .map_err(|e| transport_error("IAM token request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    NluError::Authentication(format!(
                        "IAM rejected the API key ({}): {}",
                        status,
                        body_excerpt(&body)
                    ))
                }
                _ => NluError::Transport(format!(
                    "IAM token service error ({}): {}",
                    status,
                    body_excerpt(&body)
                )),
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| NluError::MalformedResponse(format!("IAM token response: {}", e)))?;

        debug!("Obtained IAM access token");

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| NluError::Authentication("IAM response carried no access token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_token_exchange() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/identity/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), API_KEY_GRANT.into()),
                Matcher::UrlEncoded("apikey".into(), "my-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"tok-123","token_type":"Bearer","expires_in":3600}"#)
            .create_async()
            .await;

        let iam = IamAuthenticator::new(
            &format!("{}/identity/token", server.url()),
            reqwest::Client::new(),
        );
        assert_eq!(iam.token("my-key").await.unwrap(), "tok-123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_key_is_authentication_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/identity/token")
            .with_status(400)
            .with_body(r#"{"errorCode":"BXNIM0415E","errorMessage":"Provided API key could not be found."}"#)
            .create_async()
            .await;

        let iam = IamAuthenticator::new(
            &format!("{}/identity/token", server.url()),
            reqwest::Client::new(),
        );
        let err = iam.token("bad-key").await.unwrap_err();
        assert!(matches!(err, NluError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_iam_outage_is_transport_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/identity/token")
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let iam = IamAuthenticator::new(
            &format!("{}/identity/token", server.url()),
            reqwest::Client::new(),
        );
        match iam.token("my-key").await.unwrap_err() {
            NluError::Transport(msg) => assert!(msg.contains("503")),
            other => panic!("expected Transport, got {:?}", other),
        }
    }
}
