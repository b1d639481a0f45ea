//! Booking session: one user filling one shipment form.

use chrono::NaiveDate;

use common::{SessionId, TrackingId, UserEmail};
use domain::{Address, AddressRole, BookingConfig, EditError, FormEdit, PriceQuote, ShipmentForm};
use services::{AddressBookService, BookingService, NewAddress, PricingService, SavedAddress};

use crate::error::BookingError;
use crate::payload::build_payload;

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOutcome {
    /// Tracking identifier assigned by the booking backend.
    pub tracking_id: TrackingId,

    /// Non-fatal problems from the submission, such as a saved-address
    /// write that failed after the shipment was accepted.
    pub warnings: Vec<String>,
}

impl BookingOutcome {
    /// Returns the tracking page path for this shipment.
    pub fn redirect_path(&self) -> String {
        self.tracking_id.tracking_path()
    }
}

/// Drives one booking from first edit to submitted shipment.
///
/// The session owns the form and the identity acting on it; every
/// service call goes through an explicitly passed client, so there is no
/// ambient authentication anywhere in the flow.
#[derive(Debug)]
pub struct BookingSession {
    id: SessionId,
    user: Option<UserEmail>,
    form: ShipmentForm,
    today: NaiveDate,
    submitting: bool,
}

impl BookingSession {
    /// Opens a session dated today, optionally signed in.
    pub fn new(config: BookingConfig, user: Option<UserEmail>) -> Self {
        Self::with_today(config, user, chrono::Local::now().date_naive())
    }

    /// Opens a session anchored to an explicit date.
    pub fn with_today(config: BookingConfig, user: Option<UserEmail>, today: NaiveDate) -> Self {
        Self {
            id: SessionId::new(),
            user,
            form: ShipmentForm::new(config, today),
            today,
            submitting: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user(&self) -> Option<&UserEmail> {
        self.user.as_ref()
    }

    /// Signs a user in or out mid-session. The form is untouched.
    pub fn set_user(&mut self, user: Option<UserEmail>) {
        self.user = user;
    }

    pub fn form(&self) -> &ShipmentForm {
        &self.form
    }

    /// Returns true while a submission is in flight. An abandoned
    /// submission leaves the flag set until [`Self::reset_submission`].
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Clears the in-flight flag after an abandoned submission.
    pub fn reset_submission(&mut self) {
        self.submitting = false;
    }

    /// Applies a single field edit to the form.
    pub fn edit(&mut self, edit: FormEdit) -> Result<(), EditError> {
        self.form.apply(edit)
    }

    /// Copies a saved address into the matching form section.
    pub fn apply_saved_address(&mut self, saved: &SavedAddress) {
        self.form.apply_address(saved.address_type, saved.address());
    }

    /// Fetches an authoritative price for the current form state.
    ///
    /// The preconditions are checked locally first; only a complete
    /// request reaches the pricing service. If the call fails the form is
    /// left without a quote, and a response the form refuses to hold (its
    /// ticket went stale mid-flight) is reported as
    /// [`BookingError::QuoteSuperseded`] rather than returned as a price.
    #[tracing::instrument(skip(self, pricing), fields(session_id = %self.id))]
    pub async fn calculate_price<P: PricingService>(
        &mut self,
        pricing: &P,
    ) -> Result<PriceQuote, BookingError> {
        let (ticket, request) = self.form.begin_quote()?;
        metrics::counter!("booking_quotes_requested_total").increment(1);

        match pricing.price(&request).await {
            Ok(quote) => {
                if !self.form.accept_quote(ticket, quote.clone()) {
                    tracing::debug!("price response superseded before it was held");
                    return Err(BookingError::QuoteSuperseded);
                }
                tracing::info!(total_price = quote.total_price, "price calculated");
                Ok(quote)
            }
            Err(e) => {
                metrics::counter!("booking_quote_failures_total").increment(1);
                tracing::warn!(error = %e, "price calculation failed");
                Err(e.into())
            }
        }
    }

    /// Submits the current form as a shipment.
    ///
    /// The checks run in a fixed order: in-flight guard, held quote,
    /// signed-in user, then the full schema. Requested address saves run
    /// before the booking call and never block it; their failures come
    /// back as warnings on the outcome. On success the held quote is
    /// dropped so the same price cannot back a second submission.
    #[tracing::instrument(skip(self, booking, address_book), fields(session_id = %self.id))]
    pub async fn submit<B, A>(
        &mut self,
        booking: &B,
        address_book: &A,
    ) -> Result<BookingOutcome, BookingError>
    where
        B: BookingService,
        A: AddressBookService,
    {
        if self.submitting {
            return Err(BookingError::SubmissionInFlight);
        }

        let quote = self
            .form
            .quote()
            .cloned()
            .ok_or(BookingError::QuoteRequired)?;
        let user = self.user.clone().ok_or(BookingError::NotAuthenticated)?;
        let shipment = self
            .form
            .validate(self.today)
            .map_err(BookingError::Validation)?;

        self.submitting = true;
        metrics::counter!("booking_submissions_total").increment(1);
        let started = std::time::Instant::now();

        let mut warnings = Vec::new();
        if let Some(nickname) = &shipment.save_sender_as {
            self.save_address(
                address_book,
                &user,
                AddressRole::Sender,
                nickname,
                &shipment.sender,
                &mut warnings,
            )
            .await;
        }
        if let Some(nickname) = &shipment.save_receiver_as {
            self.save_address(
                address_book,
                &user,
                AddressRole::Receiver,
                nickname,
                &shipment.receiver,
                &mut warnings,
            )
            .await;
        }

        let payload = build_payload(&shipment, &quote, &user, &self.form.config().home_country);

        let result = booking.create_shipment(&payload).await;
        self.submitting = false;
        metrics::histogram!("booking_submission_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(confirmation) => {
                self.form.clear_quote();
                metrics::counter!("booking_submissions_succeeded_total").increment(1);
                tracing::info!(
                    tracking_id = %confirmation.tracking_id,
                    "shipment booked"
                );
                Ok(BookingOutcome {
                    tracking_id: confirmation.tracking_id,
                    warnings,
                })
            }
            Err(e) => {
                metrics::counter!("booking_submissions_failed_total").increment(1);
                tracing::warn!(error = %e, "shipment submission rejected");
                Err(e.into())
            }
        }
    }

    async fn save_address<A: AddressBookService>(
        &self,
        address_book: &A,
        user: &UserEmail,
        role: AddressRole,
        nickname: &str,
        address: &Address,
        warnings: &mut Vec<String>,
    ) {
        let new_address = NewAddress::from_address(role, nickname, address);
        match address_book.create(user, new_address).await {
            Ok(saved) => {
                tracing::info!(id = saved.id, nickname, "address saved");
            }
            Err(e) => {
                tracing::warn!(error = %e, nickname, "address save failed");
                warnings.push(format!("Could not save address \"{nickname}\": {e}"));
            }
        }
    }
}
