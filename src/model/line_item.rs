//! Line items of the order draft.

use super::{ProductId, Record, Scalar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

/// Rejected quantity input: zero, negative, fractional, NaN or not a number.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("quantity must be a positive integer, got {0}")]
pub struct InvalidQuantity(pub String);

impl From<std::convert::Infallible> for InvalidQuantity {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// A quantity of at least one.
///
/// Every constructor refuses values below one, so a line item can never hold an
/// invalid quantity; a persisted `0` fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn checked_add(self, other: Quantity) -> Option<Quantity> {
        self.0.checked_add(other.get()).map(Quantity)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(value)
            .map(Quantity)
            .ok_or_else(|| InvalidQuantity(value.to_string()))
    }
}

impl TryFrom<i64> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Quantity)
            .ok_or_else(|| InvalidQuantity(value.to_string()))
    }
}

impl TryFrom<i32> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Quantity::try_from(i64::from(value))
    }
}

impl TryFrom<f64> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
            return Err(InvalidQuantity(value.to_string()));
        }
        Quantity::try_from(value as u32)
    }
}

impl FromStr for Quantity {
    type Err = InvalidQuantity;

    /// Accepts what a numeric input field would: `"3"` and `"3.0"`, not `"3.5"`,
    /// `"0"`, `"-1"`, `"NaN"` or `""`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Quantity::try_from(n);
        }
        trimmed
            .parse::<f64>()
            .map_err(|_| InvalidQuantity(s.to_string()))
            .and_then(Quantity::try_from)
    }
}

impl TryFrom<&str> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a record cannot become a line item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineItemError {
    #[error("record has no usable `{0}` field")]
    MissingField(&'static str),
}

/// One product in the draft, with the product fields it was added with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: Quantity,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Scalar>,
}

impl LineItem {
    pub fn new(id: ProductId, name: impl Into<String>, unit_price: f64, quantity: Quantity) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity,
            extra: BTreeMap::new(),
        }
    }

    /// Builds a line item from a product record, keeping its other fields.
    ///
    /// `id`, `name` and a numeric `unit_price` are required; a `quantity` field
    /// on the record (stock-like data) is dropped in favour of `quantity`.
    pub fn from_record(record: &Record, quantity: Quantity) -> Result<Self, LineItemError> {
        let id = record
            .id()
            .and_then(|v| ProductId::try_from(v).ok())
            .ok_or(LineItemError::MissingField("id"))?;
        let name = record
            .get("name")
            .and_then(Scalar::as_str)
            .ok_or(LineItemError::MissingField("name"))?
            .to_string();
        let unit_price = record
            .get("unit_price")
            .and_then(Scalar::as_f64)
            .ok_or(LineItemError::MissingField("unit_price"))?;

        let extra = record
            .fields()
            .filter(|(field, _)| !matches!(*field, "id" | "name" | "unit_price" | "quantity"))
            .map(|(field, value)| (field.to_string(), value.clone()))
            .collect();

        Ok(Self {
            id,
            name,
            unit_price,
            quantity,
            extra,
        })
    }

    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity.get())
    }
}
