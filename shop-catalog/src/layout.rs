use crate::product::Product;
use crate::tree::{Link, Node, ProductTree};

/// One-shot construction of a [`ProductTree`] from an initial batch,
/// weighted by each product's stock count.
///
/// This is a greedy prefix-sum heuristic, not the dynamic-programming
/// optimal BST: for every range the root is the index where the running
/// weight sum starting at the range's first element is smallest, first
/// occurrence winning ties. With non-negative weights that is nearly always
/// the first element of the range, so the result leans heavily to the right.
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    products: Vec<Product>,
}

impl LayoutBuilder {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn push(&mut self, product: Product) -> &mut Self {
        self.products.push(product);
        self
    }

    pub fn build(self) -> ProductTree {
        let products = normalize(self.products);
        let weights: Vec<u64> = products.iter().map(|p| u64::from(p.stock)).collect();
        let len = products.len();

        let mut slots: Vec<Option<Product>> = products.into_iter().map(Some).collect();
        let root = build_range(&mut slots, &weights, 0, len);
        ProductTree::from_parts(root, len)
    }
}

/// Index of the root the prefix-sum rule selects for `weights`, or `None`
/// when the range is empty.
pub fn choose_root(weights: &[u64]) -> Option<usize> {
    let mut running = 0u64;
    let mut best: Option<(u64, usize)> = None;

    for (i, weight) in weights.iter().enumerate() {
        running = running.saturating_add(*weight);
        match best {
            Some((min, _)) if running >= min => {}
            _ => best = Some((running, i)),
        }
    }
    best.map(|(_, i)| i)
}

/// Sort by name and fold duplicate names together with the insert merge
/// law, so the index positions are already in BST order.
fn normalize(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by(|a, b| a.name.cmp(&b.name));

    let mut merged: Vec<Product> = Vec::with_capacity(products.len());
    for product in products {
        match merged.last_mut() {
            Some(last) if last.name == product.name => last.merge(product),
            _ => merged.push(product),
        }
    }
    merged
}

/// Builds the half-open range `[start, end)`.
fn build_range(slots: &mut [Option<Product>], weights: &[u64], start: usize, end: usize) -> Link {
    let offset = choose_root(&weights[start..end])?;
    let root = start + offset;
    let product = slots[root].take()?;

    let mut node = Box::new(Node::leaf(product));
    node.left = build_range(slots, weights, start, root);
    node.right = build_range(slots, weights, root + 1, end);
    Some(node)
}
