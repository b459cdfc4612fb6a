//! HTTP access to the transactions API.
//!
//! `TransactionSource` is the seam the desk controller talks through; the
//! reqwest-backed `HttpTransactionSource` is the production implementation.

use crate::config::Config;
use crate::error::ApiError;
use crate::types::{ClearedTransaction, Transaction, TransactionId};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

/// Remote source of truth for transactions.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// `GET /transactions`
    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError>;

    /// `POST /transactions/{id}/clear-funds`
    async fn clear_funds(&self, id: TransactionId) -> Result<ClearedTransaction, ApiError>;
}

/// reqwest-backed client for the transactions API
#[derive(Clone)]
pub struct HttpTransactionSource {
    http_client: HttpClient,
    config: Config,
}

impl HttpTransactionSource {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            config,
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("API returned {}: {}", status, body);
        Err(ApiError::from_status(status.as_u16(), &body))
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let url = self.config.endpoint("/transactions");
        debug!("GET {}", url);
        let response = self.http_client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<Vec<Transaction>>().await?)
    }

    async fn clear_funds(&self, id: TransactionId) -> Result<ClearedTransaction, ApiError> {
        let url = self.config.endpoint(&format!("/transactions/{}/clear-funds", id));
        debug!("POST {}", url);
        let response = self.http_client.post(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<ClearedTransaction>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;
    use mockito::Server;
    use std::net::TcpListener;

    fn localhost_binding_permitted() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn source_for(server: &Server) -> HttpTransactionSource {
        let config = Config::with_api_url(&server.url()).expect("server url");
        HttpTransactionSource::new(config).expect("client")
    }

    #[tokio::test]
    async fn list_transactions_parses_response() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/transactions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":2,"client_name":"Globex","amount":25000.5,"status":"pending","timestamp":"2024-01-02T00:00:00Z"},
                    {"id":1,"client_name":"Acme","amount":500,"status":"cleared","timestamp":"2024-01-01T00:00:00Z"}]"#,
            )
            .create_async()
            .await;

        let list = source_for(&server).list_transactions().await.expect("list");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, 2);
        assert_eq!(list[0].client_name, "Globex");
        assert_eq!(list[1].status, TransactionStatus::Cleared);
    }

    #[tokio::test]
    async fn list_transactions_non_2xx_is_failure() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/transactions")
            .with_status(503)
            .with_body("")
            .create_async()
            .await;

        let err = source_for(&server).list_transactions().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 503, .. }));
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[tokio::test]
    async fn clear_funds_posts_to_clear_endpoint() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/transactions/1/clear-funds")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"status":"cleared"}"#)
            .expect(1)
            .create_async()
            .await;

        let cleared = source_for(&server).clear_funds(1).await.expect("clear");
        assert_eq!(cleared.id, 1);
        assert_eq!(cleared.status, TransactionStatus::Cleared);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn clear_funds_surfaces_server_detail() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/transactions/9/clear-funds")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail":"Transaction not found"}"#)
            .create_async()
            .await;

        let err = source_for(&server).clear_funds(9).await.unwrap_err();
        assert_eq!(err.to_string(), "Transaction not found");
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/transactions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"not":"a list"}"#)
            .create_async()
            .await;

        let err = source_for(&server).list_transactions().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
