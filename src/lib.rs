//! This crate exposes a Binary Search Tree (BST) whose nodes carry parent
//! back-references, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of key (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than or equal to its own key (equal keys are routed to the
//!    right in this crate).
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! ## Parent back-references
//!
//! On top of the two child links, every node here keeps a third link pointing
//! back at its parent. The parent link is pure bookkeeping - it never owns
//! anything - but it lets the tree walk *upward*, which makes in-order
//! successor/predecessor queries and iteration possible without an auxiliary
//! stack. The price is that every mutation has to keep both directions of the
//! wiring consistent; see [`parented::Tree`] for how insertion, transplanting,
//! and the three deletion cases each maintain it.
//!
//! This tree does no rebalancing, so its height (and therefore its worst-case
//! operation cost) is `O(n)` for adversarial insertion orders.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod parented;

#[cfg(test)]
pub(crate) mod test;
