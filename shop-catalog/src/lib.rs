pub mod product;
pub mod tree;
pub mod layout;

#[cfg(test)]
mod proptests;

pub use product::{validate_price, Product, ProductError};
pub use tree::{InsertOutcome, Iter, ProductTree};
pub use layout::{choose_root, LayoutBuilder};
