//! The order payload derived from a draft at submission time. Never stored.

use super::CheckoutError;
use crate::draft::Draft;
use crate::model::{ProductId, Quantity, Scalar};
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Status every new order is created with.
pub const ORDER_STATUS_PENDING: &str = "pendiente";

const RESERVED_FIELDS: [&str; 3] = ["order_status", "delivery_date", "order_details"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    pub product_code: ProductId,
    pub quantity: Quantity,
    /// Present only when partial-fulfillment tracking is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_quantity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutPayload {
    pub order_status: String,
    /// Serialized as `YYYY-MM-DD`.
    pub delivery_date: Date,
    pub order_details: Vec<OrderDetail>,
    /// Caller-supplied fields, e.g. `client_dni`.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Scalar>,
}

/// Knobs for payload construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayloadOptions {
    pub track_pending: bool,
}

impl CheckoutPayload {
    /// Builds the payload for `draft`, dated `today`.
    ///
    /// Caller fields that collide with the generated ones are dropped.
    pub fn build(
        draft: &Draft,
        today: Date,
        extra: &BTreeMap<String, Scalar>,
        options: PayloadOptions,
    ) -> Result<Self, CheckoutError> {
        if draft.is_empty() {
            return Err(CheckoutError::EmptyDraft);
        }

        let order_details = draft
            .items()
            .iter()
            .map(|item| OrderDetail {
                product_code: item.id,
                quantity: item.quantity,
                pending_quantity: options.track_pending.then_some(0),
            })
            .collect();

        let extra = extra
            .iter()
            .filter(|(field, _)| {
                let reserved = RESERVED_FIELDS.contains(&field.as_str());
                if reserved {
                    warn!(field = %field, "Ignoring caller field that would override the payload");
                }
                !reserved
            })
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();

        Ok(Self {
            order_status: ORDER_STATUS_PENDING.to_string(),
            delivery_date: today,
            order_details,
            extra,
        })
    }
}

/// The current calendar date in UTC.
pub fn utc_today() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;
    use jiff::civil::date;
    use serde_json::json;

    fn draft() -> Draft {
        Draft::new(vec![
            LineItem::new(ProductId(1), "A", 10.0, Quantity::try_from(2u32).unwrap()),
            LineItem::new(ProductId(2), "B", 5.0, Quantity::ONE),
        ])
        .unwrap()
    }

    #[test]
    fn test_payload_shape() {
        let mut extra = BTreeMap::new();
        extra.insert("client_dni".to_string(), Scalar::from("12345678"));

        let payload =
            CheckoutPayload::build(&draft(), date(2024, 3, 9), &extra, PayloadOptions::default()).unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "order_status": "pendiente",
                "delivery_date": "2024-03-09",
                "order_details": [
                    {"product_code": 1, "quantity": 2},
                    {"product_code": 2, "quantity": 1}
                ],
                "client_dni": "12345678"
            })
        );
    }

    #[test]
    fn test_pending_quantity_when_tracking() {
        let payload = CheckoutPayload::build(
            &draft(),
            date(2024, 3, 9),
            &BTreeMap::new(),
            PayloadOptions { track_pending: true },
        )
        .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["order_details"][0]["pending_quantity"], 0);
    }

    #[test]
    fn test_caller_cannot_override_generated_fields() {
        let mut extra = BTreeMap::new();
        extra.insert("order_status".to_string(), Scalar::from("entregado"));
        let payload =
            CheckoutPayload::build(&draft(), date(2024, 3, 9), &extra, PayloadOptions::default()).unwrap();
        assert_eq!(payload.order_status, "pendiente");
        assert!(payload.extra.is_empty());
    }

    #[test]
    fn test_empty_draft_is_rejected() {
        assert!(matches!(
            CheckoutPayload::build(
                &Draft::default(),
                date(2024, 3, 9),
                &BTreeMap::new(),
                PayloadOptions::default()
            ),
            Err(CheckoutError::EmptyDraft)
        ));
    }
}
