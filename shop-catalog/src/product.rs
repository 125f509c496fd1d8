use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, priced, stocked catalog entry.
///
/// `stock` doubles as the access-frequency weight when a batch of products
/// is laid out by [`crate::LayoutBuilder`]; after construction it is only
/// ever read as quantity on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

/// Product-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductError {
    #[error("Product name must not be empty")]
    EmptyName,

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64, stock: u32) -> Result<Self, ProductError> {
        let product = Self {
            name: name.into(),
            price,
            stock,
        };
        product.validate()?;
        Ok(product)
    }

    /// Re-checks a record that may not have come through [`Product::new`],
    /// e.g. a struct literal or a deserialized value.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        validate_price(self.price)
    }

    /// Restock semantics: the incoming price wins, stock accumulates.
    pub fn merge(&mut self, incoming: Product) {
        self.price = incoming.price;
        self.stock = self.stock.saturating_add(incoming.stock);
    }

    pub fn line_total(&self, quantity: u32) -> f64 {
        self.price * f64::from(quantity)
    }
}

/// Prices are non-negative decimals; NaN and infinities are rejected.
pub fn validate_price(price: f64) -> Result<(), ProductError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ProductError::InvalidPrice(price))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product Name: {}, Price: {}, Stock: {}",
            self.name, self.price, self.stock
        )
    }
}
