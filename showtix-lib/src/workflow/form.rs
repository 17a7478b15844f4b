//! The purchase form and its submission state machine.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::NaiveDate;
use log::debug;
use log::info;
use log::warn;

use super::navigation::Redirect;
use super::navigation::Route;
use super::outcome::Banner;
use super::outcome::Confirmation;
use super::outcome::FIX_ERRORS_MESSAGE;
use super::outcome::Rejection;
use super::outcome::SubmissionOutcome;
use super::outcome::confirmation_message;
use crate::api::TicketApi;
use crate::error::ApiError;
use crate::error::FieldError;
use crate::model::Field;
use crate::model::PurchaseRequest;
use crate::model::Show;
use crate::model::ShowId;
use crate::validation::ValidationResult;
use crate::validation::validate_purchase;

/// Source of purchase attempt ids, unique across forms.
static NEXT_ATTEMPT: AtomicU64 = AtomicU64::new(1);

/// Default pause between a confirmed purchase and the redirect.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Where a form is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    /// Validation failed; nothing was sent.
    Invalid,
    /// A purchase is in flight; further submits are ignored.
    Submitting,
    Success,
    /// The purchase was sent but not accepted.
    Failed,
}

/// Result of asking the form to submit.
#[derive(Debug)]
pub enum SubmitAttempt {
    /// Validation passed; send the purchase and hand the result to
    /// [`PurchaseForm::complete`].
    Ready(PendingPurchase),
    /// Validation failed; field errors and the banner are set.
    Invalid,
    /// A purchase is already in flight.
    InFlight,
    /// The purchase already went through.
    Completed,
}

/// A validated purchase waiting to be sent.
///
/// Holds a snapshot of the request taken when validation passed, so edits
/// made while the request is in flight do not change what is sent. Only the
/// most recent pending purchase of a form can be completed or abandoned.
#[derive(Debug)]
pub struct PendingPurchase {
    attempt: u64,
    request: PurchaseRequest,
}

impl PendingPurchase {
    pub fn request(&self) -> &PurchaseRequest {
        &self.request
    }
}

/// One customer's purchase attempt for one show.
///
/// A form is opened fresh for every visit to a show's ticket page and owns
/// everything about the attempt: the request, its field errors, the banner,
/// and the optional show context used for messaging.
///
/// # Example
///
/// ```ignore
/// let mut form = PurchaseForm::open(show_id);
/// form.load_show(&client).await;
/// form.set_field(Field::Email, "ada@example.com")?;
/// // ...
/// match form.submit(&client, today).await {
///     SubmissionState::Success => { /* schedule form.redirect() */ }
///     _ => println!("{}", form.banner().unwrap().text),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PurchaseForm {
    request: PurchaseRequest,
    errors: ValidationResult,
    state: SubmissionState,
    banner: Option<Banner>,
    show: Option<Show>,
    outcome: Option<SubmissionOutcome>,
    redirect_delay: Duration,
    attempt: u64,
}

impl PurchaseForm {
    /// Opens a blank form for a show.
    pub fn open(show_id: impl Into<ShowId>) -> Self {
        Self {
            request: PurchaseRequest::new(show_id),
            errors: ValidationResult::default(),
            state: SubmissionState::Idle,
            banner: None,
            show: None,
            outcome: None,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            attempt: 0,
        }
    }

    /// Sets how long the confirmation stays up before redirecting.
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn show_id(&self) -> &ShowId {
        &self.request.show_id
    }

    pub fn request(&self) -> &PurchaseRequest {
        &self.request
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// `true` while a purchase is in flight; the submit action should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// The inline error for one field, if any.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// The outcome of the last purchase that was sent, if any.
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    /// The navigation to perform after a successful purchase.
    pub fn redirect(&self) -> Option<&Redirect> {
        self.outcome.as_ref().and_then(SubmissionOutcome::redirect)
    }

    /// The show being purchased, if it has been loaded.
    pub fn show(&self) -> Option<&Show> {
        self.show.as_ref()
    }

    pub fn set_show(&mut self, show: Option<Show>) {
        self.show = show;
    }

    /// Looks up a show for use as form context. Failures are logged and
    /// yield `None`.
    pub async fn fetch_show(api: &dyn TicketApi, show_id: &ShowId) -> Option<Show> {
        match api.get_show(show_id).await {
            Ok(show) => Some(show),
            Err(e) => {
                warn!("Could not load show {}: {}", show_id, e);
                None
            }
        }
    }

    /// Loads the show context. A failed lookup leaves it absent.
    ///
    /// Returns `true` if the show was loaded.
    pub async fn load_show(&mut self, api: &dyn TicketApi) -> bool {
        self.show = Self::fetch_show(api, &self.request.show_id).await;
        self.show.is_some()
    }

    /// Edits one field from raw input.
    ///
    /// Clears that field's error (and only that one). After an invalid or
    /// failed submit, editing returns the form to idle.
    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<(), FieldError> {
        self.request.set(field, raw)?;
        self.errors.clear(field);
        if matches!(self.state, SubmissionState::Invalid | SubmissionState::Failed) {
            self.transition(SubmissionState::Idle);
        }
        Ok(())
    }

    /// Validates the form without submitting or touching the banner.
    pub fn validate(&mut self, today: NaiveDate) -> bool {
        self.errors = validate_purchase(&self.request, today);
        self.errors.is_valid()
    }

    /// Validates the form and, if it passes, moves it to `Submitting`.
    ///
    /// At most one [`PendingPurchase`] exists per form at a time.
    pub fn begin_submit(&mut self, today: NaiveDate) -> SubmitAttempt {
        match self.state {
            SubmissionState::Submitting | SubmissionState::Validating => {
                debug!("Submit ignored, purchase for show {} in flight", self.show_id());
                return SubmitAttempt::InFlight;
            }
            SubmissionState::Success => {
                debug!("Submit ignored, purchase for show {} completed", self.show_id());
                return SubmitAttempt::Completed;
            }
            SubmissionState::Idle | SubmissionState::Invalid | SubmissionState::Failed => {}
        }

        self.transition(SubmissionState::Validating);

        if !self.validate(today) {
            self.banner = Some(Banner::error(FIX_ERRORS_MESSAGE));
            self.transition(SubmissionState::Invalid);
            return SubmitAttempt::Invalid;
        }

        self.banner = None;
        self.attempt = NEXT_ATTEMPT.fetch_add(1, Ordering::Relaxed);
        self.transition(SubmissionState::Submitting);
        SubmitAttempt::Ready(PendingPurchase {
            attempt: self.attempt,
            request: self.request.clone(),
        })
    }

    fn is_current(&self, pending: &PendingPurchase) -> bool {
        self.state == SubmissionState::Submitting && pending.attempt == self.attempt
    }

    /// Records the API's answer for a pending purchase.
    ///
    /// Returns `None` and leaves the form untouched when `pending` is not the
    /// purchase currently in flight.
    pub fn complete(
        &mut self,
        pending: PendingPurchase,
        result: Result<(), ApiError>,
    ) -> Option<&SubmissionOutcome> {
        if !self.is_current(&pending) {
            debug!(
                "Stale completion for show {} ignored in state {:?}",
                pending.request.show_id, self.state
            );
            return None;
        }

        let outcome = match result {
            Ok(()) => {
                info!("Purchase for show {} confirmed", pending.request.show_id);
                SubmissionOutcome::Success(Confirmation {
                    message: confirmation_message(&pending.request, self.show.as_ref()),
                    redirect: Redirect {
                        route: Route::ShowDetails(pending.request.show_id.clone()),
                        delay: self.redirect_delay,
                    },
                })
            }
            Err(e) => {
                warn!("Purchase for show {} failed: {}", pending.request.show_id, e);
                SubmissionOutcome::Failure(Rejection::from_api_error(&e))
            }
        };

        self.banner = Some(outcome.banner());
        self.transition(if outcome.is_success() {
            SubmissionState::Success
        } else {
            SubmissionState::Failed
        });
        Some(self.outcome.insert(outcome))
    }

    /// Gives up on a pending purchase whose answer will never arrive.
    ///
    /// The form returns to idle so it can be submitted again. Does nothing
    /// unless `pending` is the purchase currently in flight.
    pub fn abandon(&mut self, pending: PendingPurchase) -> bool {
        if !self.is_current(&pending) {
            return false;
        }
        warn!("Purchase for show {} abandoned", pending.request.show_id);
        self.transition(SubmissionState::Idle);
        true
    }

    /// Validates, sends, and records the outcome in one step.
    ///
    /// Returns the state the form ends in. When the form is already
    /// submitting or done, nothing is sent and the current state is returned.
    pub async fn submit(&mut self, api: &dyn TicketApi, today: NaiveDate) -> SubmissionState {
        let pending = match self.begin_submit(today) {
            SubmitAttempt::Ready(pending) => pending,
            _ => return self.state,
        };

        let request = pending.request.clone();
        let in_flight = InFlight {
            form: self,
            pending: Some(pending),
        };
        let result = api.submit_purchase(&request).await;
        in_flight.finish(result);
        self.state
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!(
            "Purchase form for show {}: {:?} -> {:?}",
            self.request.show_id, self.state, next
        );
        self.state = next;
    }
}

/// Abandons the purchase if the submitting future is dropped before the API
/// answers.
struct InFlight<'a> {
    form: &'a mut PurchaseForm,
    pending: Option<PendingPurchase>,
}

impl InFlight<'_> {
    fn finish(mut self, result: Result<(), ApiError>) {
        if let Some(pending) = self.pending.take() {
            self.form.complete(pending, result);
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.form.abandon(pending);
        }
    }
}
