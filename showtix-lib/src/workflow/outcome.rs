//! Submission outcomes and the banner messages they produce.

use super::navigation::Redirect;
use crate::error::ApiError;
use crate::model::PurchaseRequest;
use crate::model::Show;

/// Shown when client-side validation blocks a submission.
pub const FIX_ERRORS_MESSAGE: &str = "Please fix the errors in the form before submitting.";

/// Shown when no response was obtained from the purchases endpoint.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Shown when the server rejects a purchase without saying why.
pub const PROCESSING_ERROR_MESSAGE: &str =
    "There was a problem processing your order. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// The single request-level message area of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}

/// Why a sent purchase did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with a non-success status.
    ServerRejection,
    /// No response was obtained.
    Transport,
}

/// A purchase the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub message: String,
    pub redirect: Redirect,
}

/// A purchase that was sent but not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: FailureKind,
    pub message: String,
    pub status: Option<u16>,
}

impl Rejection {
    /// Classifies an API error into a user-facing rejection.
    pub fn from_api_error(error: &ApiError) -> Self {
        if error.is_transport() {
            return Self {
                kind: FailureKind::Transport,
                message: NETWORK_ERROR_MESSAGE.to_string(),
                status: None,
            };
        }

        Self {
            kind: FailureKind::ServerRejection,
            message: error
                .server_message()
                .unwrap_or(PROCESSING_ERROR_MESSAGE)
                .to_string(),
            status: error.status_code(),
        }
    }
}

/// What happened to a submitted purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(Confirmation),
    Failure(Rejection),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The banner this outcome puts on the form.
    pub fn banner(&self) -> Banner {
        match self {
            Self::Success(confirmation) => Banner::success(&confirmation.message),
            Self::Failure(rejection) => Banner::error(&rejection.message),
        }
    }

    /// The pending navigation, for successful purchases.
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Success(confirmation) => Some(&confirmation.redirect),
            Self::Failure(_) => None,
        }
    }
}

/// Builds the confirmation text for an accepted purchase.
///
/// The show title comes from the separately loaded show; when that lookup
/// failed the title is left out.
pub fn confirmation_message(request: &PurchaseRequest, show: Option<&Show>) -> String {
    let count = request.ticket_count.unwrap_or(1);
    let tickets = if count == 1 { "ticket" } else { "tickets" };
    let title = show
        .map(|s| s.title.trim())
        .filter(|t| !t.is_empty())
        .map(|t| format!(" for {}", t))
        .unwrap_or_default();

    format!(
        "Success! You purchased {} {}{}. A confirmation email will be sent to {}.",
        count,
        tickets,
        title,
        request.email.trim()
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_confirmation_message_with_show() {
        let mut request = PurchaseRequest::new(9);
        request.ticket_count = Some(3);
        request.email = "ada@example.com".to_string();
        let show = Show::new(9, "Night Owls");

        assert_eq!(
            confirmation_message(&request, Some(&show)),
            "Success! You purchased 3 tickets for Night Owls. A confirmation email will be sent to ada@example.com."
        );
    }

    #[test]
    fn test_confirmation_message_without_show() {
        let mut request = PurchaseRequest::new(9);
        request.email = "ada@example.com".to_string();

        assert_eq!(
            confirmation_message(&request, None),
            "Success! You purchased 1 ticket. A confirmation email will be sent to ada@example.com."
        );
    }

    #[test]
    fn test_rejection_from_server_error() {
        let rejection = Rejection::from_api_error(&ApiError::rejected(400, "{}", "Card declined"));
        assert_eq!(rejection.kind, FailureKind::ServerRejection);
        assert_eq!(rejection.message, "Card declined");
        assert_eq!(rejection.status, Some(400));

        let rejection = Rejection::from_api_error(&ApiError::http(503, ""));
        assert_eq!(rejection.message, PROCESSING_ERROR_MESSAGE);
    }

    #[test]
    fn test_rejection_from_transport_error() {
        let rejection = Rejection::from_api_error(&ApiError::Timeout(Duration::from_secs(5)));
        assert_eq!(rejection.kind, FailureKind::Transport);
        assert_eq!(rejection.message, NETWORK_ERROR_MESSAGE);
        assert_eq!(rejection.status, None);
    }
}
