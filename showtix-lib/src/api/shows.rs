//! Show listing and lookup

use log::warn;
use reqwest::Method;

use crate::ShowsClient;
use crate::error::ApiError;
use crate::model::Show;
use crate::model::ShowId;

impl ShowsClient {
    /// Fetches every show.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let shows = client.list_shows().await?;
    /// for group in catalog::group_by_category(&shows) {
    ///     println!("{}", group.heading());
    /// }
    /// ```
    pub async fn list_shows(&self) -> Result<Vec<Show>, ApiError> {
        let url = self.endpoint(None);
        self.get_json(&url).await
    }

    /// Fetches one show by id.
    pub async fn get_show(&self, id: &ShowId) -> Result<Show, ApiError> {
        let url = self.endpoint(Some(&urlencoding::encode(id.as_str())));
        self.get_json(&url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, url)).await?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!("GET {} failed with HTTP {}", url, status.as_u16());
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ApiError::http(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
    }
}
