use crate::model::Scalar;
use std::collections::BTreeMap;

/// The auxiliary form shown before submitting: extra order fields such as
/// the customer's DNI. Closed after a successful checkout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    open: bool,
    fields: BTreeMap<String, Scalar>,
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn fields(&self) -> &BTreeMap<String, Scalar> {
        &self.fields
    }
}
