use serde::{Deserialize, Serialize};
use shop_catalog::ProductTree;

use crate::CatalogError;

/// One requested purchase line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub name: String,
    pub quantity: u32,
}

impl Purchase {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A billed line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// The purchase line that stopped a billing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub lines: Vec<BillLine>,
    pub total: f64,
    pub shortfall: Option<Shortfall>,
}

impl Bill {
    pub fn is_complete(&self) -> bool {
        self.shortfall.is_none()
    }
}

impl From<Shortfall> for CatalogError {
    fn from(shortfall: Shortfall) -> Self {
        CatalogError::StockShortfall {
            name: shortfall.name,
            requested: shortfall.requested,
            available: shortfall.available,
        }
    }
}

/// Price each purchase against the tree in order.
///
/// Unknown products are skipped without a line. The first purchase asking
/// for more than the stock on hand ends the run: it is recorded as the
/// shortfall and later purchases are never looked at. Stock is not
/// decremented.
pub fn generate_bill(tree: &ProductTree, purchases: &[Purchase]) -> Bill {
    let mut bill = Bill::default();

    for purchase in purchases {
        let Some(product) = tree.get(&purchase.name) else {
            tracing::debug!("Skipping unknown product {}", purchase.name);
            continue;
        };

        if purchase.quantity > product.stock {
            tracing::warn!(
                "Quantity exceeded than stock for {}: requested {}, available {}",
                product.name,
                purchase.quantity,
                product.stock
            );
            bill.shortfall = Some(Shortfall {
                name: product.name.clone(),
                requested: purchase.quantity,
                available: product.stock,
            });
            break;
        }

        let line_total = product.line_total(purchase.quantity);
        bill.total += line_total;
        bill.lines.push(BillLine {
            name: product.name.clone(),
            quantity: purchase.quantity,
            unit_price: product.price,
            line_total,
        });
    }

    bill
}
