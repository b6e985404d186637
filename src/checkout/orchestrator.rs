//! Turns the draft into an order and applies the result.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ Idle (draft cleared, key removed, form closed)
//!                       └──────err──▶ Idle (draft untouched)
//! ```

use super::{CheckoutError, CheckoutForm, CheckoutPayload, FailureKind, PayloadOptions};
use crate::backend::BackendApi;
use crate::clients::DraftClient;
use crate::messages;
use crate::notify::Notifier;
use console_framework::ActorClient;
use jiff::civil::Date;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Idle,
    Submitting,
}

/// A successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    /// The order as the backend returned it.
    pub order: serde_json::Value,
    pub payload: CheckoutPayload,
    pub total: f64,
}

/// Releases the in-flight flag however `submit` ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct CheckoutOrchestrator {
    draft: DraftClient,
    backend: Arc<dyn BackendApi>,
    notifier: Notifier,
    options: PayloadOptions,
    today: fn() -> Date,
    in_flight: Arc<AtomicBool>,
}

impl CheckoutOrchestrator {
    pub fn new(draft: DraftClient, backend: Arc<dyn BackendApi>, notifier: Notifier) -> Self {
        Self {
            draft,
            backend,
            notifier,
            options: PayloadOptions::default(),
            today: super::utc_today,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_options(mut self, options: PayloadOptions) -> Self {
        self.options = options;
        self
    }

    /// Overrides where the delivery date comes from.
    pub fn with_clock(mut self, today: fn() -> Date) -> Self {
        self.today = today;
        self
    }

    pub fn phase(&self) -> CheckoutPhase {
        if self.in_flight.load(Ordering::Acquire) {
            CheckoutPhase::Submitting
        } else {
            CheckoutPhase::Idle
        }
    }

    /// Submits the current draft with the form's extra fields.
    ///
    /// On success the draft is cleared, a success notification is shown and the
    /// form is closed. On a backend failure the draft is left as it was and an
    /// error notification is shown. An empty draft or a submit while another is
    /// in flight is refused before any request is made.
    #[instrument(skip(self, form))]
    pub async fn submit(&self, form: &mut CheckoutForm) -> Result<CheckoutReceipt, CheckoutError> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            warn!("Checkout already in progress");
            return Err(CheckoutError::AlreadySubmitting);
        };

        let draft = self.draft.snapshot().await.map_err(|e| {
            self.notifier.error(messages::ORDER_FAILED);
            CheckoutError::from(e)
        })?;
        let payload = CheckoutPayload::build(&draft, (self.today)(), form.fields(), self.options)?;
        let total = draft.total();

        match self.backend.create_order(payload.clone()).await {
            Ok(order) => {
                info!(lines = payload.order_details.len(), total, "Order created");
                if let Err(e) = self.draft.clear().await {
                    // The order exists server-side; report success and leave the draft for the operator.
                    error!(error = %e, "Order created but the draft could not be cleared");
                }
                self.notifier.success(messages::ORDER_SUCCESS);
                form.close();
                Ok(CheckoutReceipt {
                    order,
                    payload,
                    total,
                })
            }
            Err(source) => {
                let kind = FailureKind::of(&source);
                warn!(?kind, error = %source, "Order rejected");
                self.notifier.error(kind.message());
                Err(CheckoutError::Rejected { kind, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ApiError, MockBackendApi};
    use crate::draft::{Draft, DraftCommand, DraftEvent};
    use console_framework::mock::{create_mock_client, expect_snapshot, MockClient};

    fn notifier() -> Notifier {
        Notifier::new(Default::default())
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_refused() {
        let (inner, mut receiver) = create_mock_client::<Draft>(10);
        let mut backend = MockBackendApi::new();
        backend.expect_create_order().never();
        let orchestrator =
            CheckoutOrchestrator::new(DraftClient::new(inner), Arc::new(backend), notifier());

        let first = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.submit(&mut CheckoutForm::new()).await })
        };

        // The first submit is parked on its draft snapshot.
        let responder = expect_snapshot(&mut receiver)
            .await
            .expect("Expected Snapshot request");
        assert_eq!(orchestrator.phase(), CheckoutPhase::Submitting);
        assert!(matches!(
            orchestrator.submit(&mut CheckoutForm::new()).await,
            Err(CheckoutError::AlreadySubmitting)
        ));

        responder.send(Ok(Draft::default())).unwrap();
        assert!(matches!(first.await.unwrap(), Err(CheckoutError::EmptyDraft)));
        assert_eq!(orchestrator.phase(), CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn test_success_dates_order_with_clock_and_clears_draft() {
        let mut mock = MockClient::<Draft>::new();
        let draft = Draft::new(vec![crate::model::LineItem::new(
            crate::model::ProductId(3),
            "B",
            4.0,
            crate::model::Quantity::ONE,
        )])
        .unwrap();
        mock.expect_snapshot().return_ok(draft);
        mock.expect_dispatch().return_ok(DraftEvent::Cleared);

        let mut backend = MockBackendApi::new();
        backend
            .expect_create_order()
            .withf(|payload| payload.delivery_date == jiff::civil::date(2026, 10, 16))
            .times(1)
            .returning(|_| Ok(serde_json::json!({ "id": 12 })));

        let notifier = notifier();
        let orchestrator =
            CheckoutOrchestrator::new(DraftClient::new(mock.client()), Arc::new(backend), notifier.clone())
                .with_clock(|| jiff::civil::date(2026, 10, 16));
        let mut form = CheckoutForm::new();
        form.open();

        let receipt = orchestrator.submit(&mut form).await.unwrap();
        assert_eq!(receipt.total, 4.0);
        assert_eq!(receipt.order["id"], 12);
        assert!(!form.is_open());
        assert_eq!(notifier.current().unwrap().message, messages::ORDER_SUCCESS);

        mock.verify();
        assert_eq!(*mock.dispatched(), vec![DraftCommand::Clear]);
    }

    #[tokio::test]
    async fn test_generic_failure_message() {
        let mut mock = MockClient::<Draft>::new();
        let draft = Draft::new(vec![crate::model::LineItem::new(
            crate::model::ProductId(1),
            "A",
            10.0,
            crate::model::Quantity::ONE,
        )])
        .unwrap();
        mock.expect_snapshot().return_ok(draft);

        let mut backend = MockBackendApi::new();
        backend.expect_create_order().times(1).returning(|_| {
            Err(ApiError::Status {
                status: 500,
                detail: None,
            })
        });

        let notifier = notifier();
        let orchestrator =
            CheckoutOrchestrator::new(DraftClient::new(mock.client()), Arc::new(backend), notifier.clone());
        let mut form = CheckoutForm::new();
        form.open();

        let err = orchestrator.submit(&mut form).await.unwrap_err();
        assert_eq!(err.user_message(), messages::ORDER_FAILED);
        assert_eq!(notifier.current().unwrap().message, messages::ORDER_FAILED);
        assert!(form.is_open());

        // No clear was dispatched.
        mock.verify();
        assert!(mock.dispatched().is_empty());
    }
}
