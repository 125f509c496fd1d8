pub mod billing;
pub mod service;

pub use billing::{Bill, BillLine, Purchase, Shortfall};
pub use service::CatalogService;
pub use shop_catalog::{InsertOutcome, Product, ProductError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error(
        "Quantity exceeded than stock for {name}: \
         requested {requested}, available {available}"
    )]
    StockShortfall {
        name: String,
        requested: u32,
        available: u32,
    },
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),
    #[error(transparent)]
    InvalidProduct(#[from] ProductError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
