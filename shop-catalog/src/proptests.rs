use crate::tree::{Link, ProductTree};
use crate::{InsertOutcome, LayoutBuilder, Product};

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Walks every node checking strict name bounds and the cached length.
fn validate_tree(t: &ProductTree) {
    fn walk<'a>(link: &'a Link, lower: Option<&'a str>, upper: Option<&'a str>, count: &mut usize) {
        let Some(node) = link.as_deref() else {
            return;
        };
        let name = node.product.name.as_str();
        if let Some(lower) = lower {
            assert!(name > lower, "{name:?} must sort after ancestor {lower:?}");
        }
        if let Some(upper) = upper {
            assert!(name < upper, "{name:?} must sort before ancestor {upper:?}");
        }
        *count += 1;
        walk(&node.left, lower, Some(name), count);
        walk(&node.right, Some(name), upper, count);
    }

    let mut count = 0usize;
    walk(t.root_link_for_test(), None, None, &mut count);
    assert_eq!(count, t.len(), "reachable node count must match ProductTree::len");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u32, u32),
    Remove(String),
    Get(String),
    Reprice(String, u32),
}

fn name_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet keeps collisions (merges, hits on remove) frequent.
    "[a-e]{1,3}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let name = name_strategy();
    let op = prop_oneof![
        50 => (name.clone(), 0u32..1000, 0u32..50).prop_map(|(n, p, s)| Op::Insert(n, p, s)),
        25 => name.clone().prop_map(Op::Remove),
        15 => name.clone().prop_map(Op::Get),
        10 => (name.clone(), 0u32..1000).prop_map(|(n, p)| Op::Reprice(n, p)),
    ];
    prop::collection::vec(op, 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreemap(ops in ops_strategy()) {
        let mut t = ProductTree::new();
        let mut m: BTreeMap<String, (f64, u32)> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(name, price, stock) => {
                    let price = f64::from(price);
                    let outcome = t.insert(Product::new(name.clone(), price, stock).unwrap());
                    match m.get_mut(&name) {
                        Some(entry) => {
                            prop_assert_eq!(outcome, InsertOutcome::Merged);
                            *entry = (price, entry.1 + stock);
                        }
                        None => {
                            prop_assert_eq!(outcome, InsertOutcome::Inserted);
                            m.insert(name, (price, stock));
                        }
                    }
                }
                Op::Remove(name) => {
                    let got = t.remove(&name).map(|p| (p.price, p.stock));
                    prop_assert_eq!(got, m.remove(&name));
                    prop_assert!(t.get(&name).is_none());
                }
                Op::Get(name) => {
                    let got = t.get(&name).map(|p| (p.price, p.stock));
                    prop_assert_eq!(got, m.get(&name).copied());
                }
                Op::Reprice(name, price) => {
                    let price = f64::from(price);
                    let updated = t.update_price(&name, price);
                    let expected = match m.get_mut(&name) {
                        Some(entry) => {
                            entry.0 = price;
                            true
                        }
                        None => false,
                    };
                    prop_assert_eq!(updated, expected);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<(String, f64, u32)> =
            t.iter().map(|p| (p.name.clone(), p.price, p.stock)).collect();
        let expected: Vec<(String, f64, u32)> =
            m.into_iter().map(|(n, (p, s))| (n, p, s)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_remove_leaves_others_untouched(
        names in prop::collection::btree_set(name_strategy(), 1..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut t = ProductTree::new();
        // Insert in a scrambled order so the tree has mixed shapes.
        let odd = names.iter().enumerate().filter(|(i, _)| i % 2 == 1);
        let even = names.iter().enumerate().filter(|(i, _)| i % 2 == 0);
        for (i, name) in odd.chain(even) {
            t.insert(Product::new(name.clone(), i as f64, i as u32).unwrap());
        }
        let before: Vec<Product> = t.iter().cloned().collect();
        let target = &names[pick.index(names.len())];

        prop_assert!(t.remove(target).is_some());
        prop_assert_eq!(t.len(), before.len() - 1);
        prop_assert!(t.get(target).is_none());
        for product in before.iter().filter(|p| &p.name != target) {
            prop_assert_eq!(t.get(&product.name), Some(product));
        }
        validate_tree(&t);
    }

    #[test]
    fn prop_layout_builder_is_valid(
        batch in prop::collection::vec((name_strategy(), 0u32..20), 0..60),
    ) {
        let mut m: BTreeMap<String, u32> = BTreeMap::new();
        let products: Vec<Product> = batch
            .into_iter()
            .map(|(name, stock)| {
                *m.entry(name.clone()).or_default() += stock;
                Product::new(name, 1.0, stock).unwrap()
            })
            .collect();

        let t = LayoutBuilder::new(products).build();

        validate_tree(&t);
        let got: Vec<(String, u32)> = t.iter().map(|p| (p.name.clone(), p.stock)).collect();
        let expected: Vec<(String, u32)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn exhaustive_delete_from_every_insert_order() {
    let names = ["d", "b", "f", "a", "c", "e", "g"];

    for first in 0..names.len() {
        for second in 0..names.len() {
            let mut order: Vec<&str> = names.to_vec();
            order.swap(0, first);
            order.swap(1, second);

            for target in names {
                let mut t = ProductTree::new();
                for name in &order {
                    t.insert(Product::new(*name, 1.0, 1).unwrap());
                }
                t.remove(target);

                validate_tree(&t);
                let expected: Vec<&str> = {
                    let mut sorted: Vec<&str> =
                        names.iter().copied().filter(|n| *n != target).collect();
                    sorted.sort_unstable();
                    sorted
                };
                assert_eq!(t.names(), expected);
            }
        }
    }
}
