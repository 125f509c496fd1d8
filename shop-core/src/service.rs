use shop_catalog::{validate_price, InsertOutcome, Iter, LayoutBuilder, Product, ProductTree};

use crate::billing::{self, Bill, Purchase};
use crate::{CatalogError, CatalogResult};

/// Catalog operations over a single in-memory product tree
#[derive(Debug, Default)]
pub struct CatalogService {
    tree: ProductTree,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an initial batch laid out by stock weight. The whole batch
    /// is rejected if any record fails [`Product::validate`].
    pub fn with_layout(products: Vec<Product>) -> CatalogResult<Self> {
        for product in &products {
            product.validate()?;
        }

        let tree = LayoutBuilder::new(products).build();
        tracing::info!("Catalog laid out with {} products", tree.len());
        Ok(Self { tree })
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Insert or restock a product. Records that fail [`Product::validate`]
    /// are rejected and leave the catalog untouched.
    pub fn insert_product(&mut self, product: Product) -> CatalogResult<InsertOutcome> {
        product.validate()?;

        let name = product.name.clone();
        let outcome = self.tree.insert(product);
        match outcome {
            InsertOutcome::Inserted => tracing::info!("Inserted product {}", name),
            InsertOutcome::Merged => tracing::debug!("Merged restock into product {}", name),
        }
        Ok(outcome)
    }

    pub fn search_product(&self, name: &str) -> Option<&Product> {
        self.tree.get(name)
    }

    /// Remove a product. Deleting an unknown name is a no-op and returns `None`.
    pub fn delete_product(&mut self, name: &str) -> Option<Product> {
        let removed = self.tree.remove(name);
        if removed.is_some() {
            tracing::info!("Deleted product {}", name);
        } else {
            tracing::debug!("Delete ignored, product {} not present", name);
        }
        removed
    }

    pub fn update_price(&mut self, name: &str, price: f64) -> CatalogResult<()> {
        validate_price(price).map_err(|_| CatalogError::InvalidPrice(price))?;

        if !self.tree.update_price(name, price) {
            return Err(CatalogError::NotFound(name.to_string()));
        }
        tracing::info!("Updated price of {} to {}", name, price);
        Ok(())
    }

    /// Products in ascending name order
    pub fn products(&self) -> Iter<'_> {
        self.tree.iter()
    }

    pub fn generate_bill(&self, purchases: &[Purchase]) -> Bill {
        billing::generate_bill(&self.tree, purchases)
    }
}
