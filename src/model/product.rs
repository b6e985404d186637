use super::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for products (the backend's numeric product code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl TryFrom<&Scalar> for ProductId {
    type Error = ();

    fn try_from(value: &Scalar) -> Result<Self, Self::Error> {
        match value {
            Scalar::Text(s) => s.trim().parse().map(Self).map_err(|_| ()),
            other => other.as_i64().map(Self).ok_or(()),
        }
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProductId> for Scalar {
    fn from(id: ProductId) -> Self {
        Scalar::Int(id.0)
    }
}

/// Editable product fields, as sent on create (`POST`) and update (`PUT`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub total_stock: i64,
    pub unit_price: f64,
    pub subcategory_id: Option<i64>,
    pub is_active: bool,
}

impl ProductForm {
    /// Defaults for a new product: active, placed in the first subcategory offered.
    pub fn blank(subcategories: &[super::Record]) -> Self {
        Self {
            name: String::new(),
            total_stock: 0,
            unit_price: 0.0,
            subcategory_id: subcategories.first().and_then(|s| {
                s.get("subcategory_id")
                    .or_else(|| s.id())
                    .and_then(Scalar::as_i64)
            }),
            is_active: true,
        }
    }

    /// Prefills the form from an existing product record.
    pub fn from_record(record: &super::Record) -> Self {
        Self {
            name: record
                .get("name")
                .and_then(Scalar::as_str)
                .unwrap_or_default()
                .to_string(),
            total_stock: record.get("total_stock").and_then(Scalar::as_i64).unwrap_or(0),
            unit_price: record.get("unit_price").and_then(Scalar::as_f64).unwrap_or(0.0),
            subcategory_id: record.get("subcategory_id").and_then(Scalar::as_i64),
            is_active: record.get("is_active").and_then(Scalar::as_bool).unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_blank_form_uses_first_subcategory() {
        let subcategories = vec![
            Record::new().with("subcategory_id", 4).with("name", "Semillas"),
            Record::new().with("subcategory_id", 9).with("name", "Abonos"),
        ];
        let form = ProductForm::blank(&subcategories);
        assert_eq!(form.subcategory_id, Some(4));
        assert!(form.is_active);
        assert_eq!(ProductForm::blank(&[]).subcategory_id, None);
    }

    #[test]
    fn test_product_id_from_scalar() {
        assert_eq!(ProductId::try_from(&Scalar::Int(3)), Ok(ProductId(3)));
        assert_eq!(ProductId::try_from(&Scalar::from(" 12 ")), Ok(ProductId(12)));
        assert!(ProductId::try_from(&Scalar::Bool(true)).is_err());
    }
}
