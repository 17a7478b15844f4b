//! Web API operations

mod purchases;
mod shows;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::PurchaseRequest;
use crate::model::Show;
use crate::model::ShowId;

pub use purchases::*;

/// The remote operations the purchase workflow depends on.
///
/// [`ShowsClient`](crate::ShowsClient) is the HTTP implementation; tests and
/// alternative frontends can supply their own.
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// Fetches one show by id.
    async fn get_show(&self, id: &ShowId) -> Result<Show, ApiError>;

    /// Submits a purchase. Any 2xx response is a success.
    async fn submit_purchase(&self, request: &PurchaseRequest) -> Result<(), ApiError>;
}
