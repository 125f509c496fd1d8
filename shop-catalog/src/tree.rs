//! Unbalanced binary search tree keyed on product name.
//!
//! Every node is exclusively owned by its parent (the root by the tree), so
//! detaching a link releases the whole subtree beneath it. Insert, lookup and
//! removal recurse along a single root-to-leaf path: stack usage grows with
//! tree depth, which for a fully skewed tree equals the number of products.
//! Traversal uses an explicit stack instead.

use crate::product::Product;
use std::cmp::Ordering;

pub(crate) type Link = Option<Box<Node>>;

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) product: Product,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    pub(crate) fn leaf(product: Product) -> Self {
        Self {
            product,
            left: None,
            right: None,
        }
    }
}

/// Result of [`ProductTree::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new node was created.
    Inserted,
    /// The name already existed; price replaced and stock added.
    Merged,
}

/// In-memory product index ordered by name
///
/// Stored records are only reachable mutably through narrow operations such
/// as [`ProductTree::update_price`], so a key can never be renamed in place:
///
/// ```compile_fail
/// use shop_catalog::{Product, ProductTree};
///
/// let mut tree = ProductTree::new();
/// tree.insert(Product::new("c", 1.0, 1).unwrap());
/// tree.get_mut("c").unwrap().name = "z".to_string();
/// ```
#[derive(Debug, Default)]
pub struct ProductTree {
    root: Link,
    len: usize,
}

impl ProductTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(root: Link, len: usize) -> Self {
        Self { root, len }
    }

    #[cfg(test)]
    pub(crate) fn root_for_test(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn root_link_for_test(&self) -> &Link {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth_of(link: &Link) -> usize {
            match link {
                None => 0,
                Some(node) => 1 + depth_of(&node.left).max(depth_of(&node.right)),
            }
        }
        depth_of(&self.root)
    }

    /// Insert a product, merging into the existing entry when the name is
    /// already present.
    pub fn insert(&mut self, product: Product) -> InsertOutcome {
        let mut outcome = InsertOutcome::Inserted;
        self.root = Some(insert_node(self.root.take(), product, &mut outcome));
        if outcome == InsertOutcome::Inserted {
            self.len += 1;
        }
        outcome
    }

    pub fn get(&self, name: &str) -> Option<&Product> {
        fn find<'a>(link: &'a Link, name: &str) -> Option<&'a Product> {
            let node = link.as_deref()?;
            match name.cmp(node.product.name.as_str()) {
                Ordering::Less => find(&node.left, name),
                Ordering::Greater => find(&node.right, name),
                Ordering::Equal => Some(&node.product),
            }
        }
        find(&self.root, name)
    }

    // Private: renaming through this reference would break the ordering.
    fn get_mut(&mut self, name: &str) -> Option<&mut Product> {
        fn find_mut<'a>(link: &'a mut Link, name: &str) -> Option<&'a mut Product> {
            let node = link.as_deref_mut()?;
            match name.cmp(node.product.name.as_str()) {
                Ordering::Less => find_mut(&mut node.left, name),
                Ordering::Greater => find_mut(&mut node.right, name),
                Ordering::Equal => Some(&mut node.product),
            }
        }
        find_mut(&mut self.root, name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a product by name, returning it. Absent names leave the tree
    /// untouched and return `None`.
    pub fn remove(&mut self, name: &str) -> Option<Product> {
        let mut removed = None;
        self.root = remove_node(self.root.take(), name, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Replace the price of an existing product; stock is left alone.
    /// Returns `false` when the name is absent.
    pub fn update_price(&mut self, name: &str, price: f64) -> bool {
        match self.get_mut(name) {
            Some(product) => {
                product.price = price;
                true
            }
            None => false,
        }
    }

    /// In-order (ascending name) iterator. Each call starts a fresh walk.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn clear(&mut self) {
        release(self.root.take());
        self.len = 0;
    }
}

impl Drop for ProductTree {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

/// Frees a subtree without recursing, so skewed trees cannot exhaust the
/// stack on drop.
fn release(link: Link) {
    let mut pending: Vec<Box<Node>> = link.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

fn insert_node(link: Link, product: Product, outcome: &mut InsertOutcome) -> Box<Node> {
    let mut node = match link {
        None => return Box::new(Node::leaf(product)),
        Some(node) => node,
    };

    match product.name.cmp(&node.product.name) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), product, outcome)),
        Ordering::Greater => node.right = Some(insert_node(node.right.take(), product, outcome)),
        Ordering::Equal => {
            node.product.merge(product);
            *outcome = InsertOutcome::Merged;
        }
    }
    node
}

fn remove_node(link: Link, name: &str, removed: &mut Option<Product>) -> Link {
    let mut node = link?;

    match name.cmp(node.product.name.as_str()) {
        Ordering::Less => {
            node.left = remove_node(node.left.take(), name, removed);
            Some(node)
        }
        Ordering::Greater => {
            node.right = remove_node(node.right.take(), name, removed);
            Some(node)
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => {
                *removed = Some(node.product);
                right
            }
            (left, None) => {
                *removed = Some(node.product);
                left
            }
            (Some(left), Some(right)) => {
                // Copy the in-order successor up, then delete its old slot.
                // The successor has no left child, so the recursion below
                // terminates in one of the single-child arms.
                let successor = leftmost(&right).clone();
                let successor_name = successor.name.clone();
                *removed = Some(std::mem::replace(&mut node.product, successor));

                let mut displaced = None;
                node.left = Some(left);
                node.right = remove_node(Some(right), &successor_name, &mut displaced);
                debug_assert!(displaced.is_some());
                Some(node)
            }
        },
    }
}

fn leftmost(mut node: &Node) -> &Product {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    &node.product
}

/// Lazy in-order walk over a [`ProductTree`]
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.product)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ProductTree {
    type Item = &'a Product;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
