//! Purchase submission

use async_trait::async_trait;
use log::info;
use log::warn;
use reqwest::Method;
use serde::Deserialize;

use super::TicketApi;
use crate::ShowsClient;
use crate::error::ApiError;
use crate::model::PurchaseRequest;
use crate::model::Show;
use crate::model::ShowId;

/// Path of the purchases endpoint, relative to the shows endpoint.
pub const PURCHASES_PATH: &str = "purchases";

/// Error body returned by the purchases endpoint on rejection.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ShowsClient {
    /// Posts a purchase request.
    ///
    /// The request is sent exactly once; failures are never retried because a
    /// repeated POST could charge the customer twice.
    pub async fn submit_purchase(&self, request: &PurchaseRequest) -> Result<(), ApiError> {
        let url = self.endpoint(Some(PURCHASES_PATH));
        let response = self
            .send(self.request(Method::POST, &url).json(request))
            .await?;
        let status = response.status();

        if status.is_success() {
            info!(
                "Purchase accepted for show {} (HTTP {})",
                request.show_id,
                status.as_u16()
            );
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Purchase rejected with HTTP {}: {}", status.as_u16(), body);
        Err(rejection(status.as_u16(), body))
    }
}

/// Builds the error for a non-success purchase response.
fn rejection(status: u16, body: String) -> ApiError {
    let server_message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());

    match server_message {
        Some(message) => ApiError::rejected(status, body, message),
        None => ApiError::http(status, body),
    }
}

#[async_trait]
impl TicketApi for ShowsClient {
    async fn get_show(&self, id: &ShowId) -> Result<Show, ApiError> {
        ShowsClient::get_show(self, id).await
    }

    async fn submit_purchase(&self, request: &PurchaseRequest) -> Result<(), ApiError> {
        ShowsClient::submit_purchase(self, request).await
    }
}
