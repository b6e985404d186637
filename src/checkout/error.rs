//! Error types for checkout.

use crate::backend::ApiError;
use crate::capability::AccessDenied;
use crate::draft::DraftError;
use crate::messages;
use thiserror::Error;

/// How a rejected submission is reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend answered 422.
    Validation,
    Generic,
}

impl FailureKind {
    pub fn of(error: &ApiError) -> Self {
        match error {
            ApiError::Validation { .. } => FailureKind::Validation,
            _ => FailureKind::Generic,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FailureKind::Validation => messages::ORDER_VALIDATION,
            FailureKind::Generic => messages::ORDER_FAILED,
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("the draft is empty")]
    EmptyDraft,

    #[error("a checkout is already in progress")]
    AlreadySubmitting,

    #[error("order rejected ({kind:?}): {source}")]
    Rejected {
        kind: FailureKind,
        #[source]
        source: ApiError,
    },

    #[error("draft unavailable: {0}")]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),
}

impl CheckoutError {
    /// The sentence shown to the operator.
    pub fn user_message(&self) -> &'static str {
        match self {
            CheckoutError::EmptyDraft => messages::ORDER_EMPTY,
            CheckoutError::AlreadySubmitting => messages::ORDER_IN_PROGRESS,
            CheckoutError::Rejected { kind, .. } => kind.message(),
            CheckoutError::Draft(_) => messages::ORDER_FAILED,
            CheckoutError::Forbidden(_) => messages::ACCESS_DENIED,
        }
    }
}
