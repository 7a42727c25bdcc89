use parented_bst::parented::{NodeId, Tree};

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a sorted-`Vec` multiset model.
/// Duplicate keys are legal in the tree, so the model keeps duplicates too
/// and a remove drops exactly one instance.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, model: &mut Vec<i8>) {
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(*k);
                let at = model.binary_search(k).unwrap_or_else(|e| e);
                model.insert(at, *k);
            }
            Op::Remove(k) => {
                let removed = tree.remove_key(k);
                match model.binary_search(k) {
                    Ok(at) => {
                        assert!(removed);
                        model.remove(at);
                    }
                    Err(_) => assert!(!removed),
                }
            }
        }
    }
}

/// Every node reachable through the public accessors.
fn reachable(tree: &Tree<i8>) -> Vec<NodeId> {
    let mut ids = Vec::new();
    let mut stack: Vec<NodeId> = tree.root().into_iter().collect();
    while let Some(id) = stack.pop() {
        ids.push(id);
        stack.extend(tree.left(id));
        stack.extend(tree.right(id));
    }
    ids
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut model = Vec::new();

        do_ops(&ops, &mut tree, &mut model);
        tree.len() == model.len() && tree.iter().eq(model.iter())
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }

        xs.iter().all(|x| tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }
        for delete in &deletes {
            tree.remove_key(delete);
        }

        // Each remove_key drops at most one instance, so the surviving
        // multiset is `xs` minus one occurrence per delete.
        let mut still_present = xs;
        for delete in &deletes {
            if let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }
        still_present.sort_unstable();

        tree.iter().eq(still_present.iter())
    }
}

quickcheck::quickcheck! {
    fn sorted_iteration(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut model = Vec::new();

        do_ops(&ops, &mut tree, &mut model);
        let keys: Vec<i8> = tree.iter().copied().collect();
        keys.windows(2).all(|w| w[0] <= w[1])
    }
}

quickcheck::quickcheck! {
    fn parent_links_consistent(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut model = Vec::new();

        do_ops(&ops, &mut tree, &mut model);
        if let Some(root) = tree.root() {
            if tree.parent(root).is_some() {
                return false;
            }
        }
        reachable(&tree).into_iter().all(|id| {
            tree.left(id).map_or(true, |l| tree.parent(l) == Some(id))
                && tree.right(id).map_or(true, |r| tree.parent(r) == Some(id))
        })
    }
}

quickcheck::quickcheck! {
    fn successor_predecessor_duality(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }

        reachable(&tree).into_iter().all(|id| {
            let succ_ok = match tree.successor(id) {
                Some(s) => tree.predecessor(s) == Some(id),
                None => true,
            };
            let pred_ok = match tree.predecessor(id) {
                Some(p) => tree.successor(p) == Some(id),
                None => true,
            };
            succ_ok && pred_ok
        })
    }
}
