//! A mutable BST whose nodes are linked in both directions: every node knows
//! its children *and* its parent. The parent link is what makes in-order
//! successor/predecessor queries and stackless sorted iteration possible.
//!
//! Nodes live in an arena owned by the tree and are addressed by [`NodeId`]
//! handles, so callers can hold on to a node across later mutations without
//! borrowing the tree. Equal keys are allowed and always routed into the
//! right subtree.
//!
//! # Examples
//!
//! ```
//! use parented_bst::parented::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.insert(2);
//! let one = tree.insert(1);
//! tree.insert(3);
//!
//! assert_eq!(tree.key(one), &1);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//!
//! // Handles stay usable for navigation...
//! let two = tree.successor(one).unwrap();
//! assert_eq!(tree.key(two), &2);
//!
//! // ...and for deletion.
//! tree.remove(two);
//! assert_eq!(tree.find(&2), None);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A stable handle to a node owned by a [`Tree`].
///
/// Handles are cheap to copy and stay valid across later insertions and
/// removals (removing a node never moves any other node). A `NodeId` is only
/// meaningful for the tree that created it; using it with any other tree is
/// a logic error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeId(u32);

#[derive(Clone)]
struct Node<K> {
    key: K,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// A Binary Search Tree with parent back-references. This can be used for
/// inserting, finding, and deleting keys, and for navigating between nodes
/// in sorted order.
///
/// The tree never rebalances itself: worst-case operation cost is
/// `O(height)`, and the height can reach `O(n)` for sorted insertion orders.
#[derive(Clone)]
pub struct Tree<K> {
    arena: Vec<Node<K>>,
    root: Option<NodeId>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// The handle of the root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// How many nodes are reachable from the root.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn node(&self, id: NodeId) -> &Node<K> {
        &self.arena[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.arena[id.0 as usize]
    }

    /// The key stored in the given node.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn key(&self, node: NodeId) -> &K {
        &self.node(node).key
    }

    /// The left child of the given node, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn left(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).left
    }

    /// The right child of the given node, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn right(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).right
    }

    /// The parent of the given node. `None` means the node is the root or
    /// detached.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    /// Allocates a detached node holding `key` and returns its handle. The
    /// node is not part of the tree until it is attached with
    /// [`insert_node`][Self::insert_node] or [`set_root`][Self::set_root].
    pub fn new_node(&mut self, key: K) -> NodeId {
        self.new_node_with(key, None, None)
    }

    /// Allocates a detached node with pre-built children and returns its
    /// handle. Supplied children immediately get their parent link set to
    /// the new node.
    ///
    /// This exists for fixture and bulk construction; the normal insertion
    /// flow is [`insert`][Self::insert]. The children must themselves be
    /// detached subtree roots, and it is the caller's responsibility that
    /// the assembled subtree respects the ordering invariant.
    ///
    /// # Panics
    ///
    /// Panics if a child handle did not come from this tree.
    pub fn new_node_with(
        &mut self,
        key: K,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.arena.len() as u32);
        self.arena.push(Node {
            key,
            parent: None,
            left,
            right,
        });
        if let Some(l) = left {
            self.node_mut(l).parent = Some(id);
        }
        if let Some(r) = right {
            self.node_mut(r).parent = Some(id);
        }
        id
    }

    /// Makes `root` the tree's root node (or empties the tree for `None`),
    /// clearing the new root's parent link. The other half of the fixture
    /// path started by [`new_node_with`][Self::new_node_with].
    ///
    /// Whatever was reachable before and isn't reachable from the new root
    /// stays allocated but detached.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn set_root(&mut self, root: Option<NodeId>) {
        if let Some(id) = root {
            self.node_mut(id).parent = None;
        }
        self.root = root;
        self.len = self.count_reachable(root);
    }

    fn count_reachable(&self, node: Option<NodeId>) -> usize {
        match node {
            None => 0,
            Some(id) => {
                1 + self.count_reachable(self.node(id).left)
                    + self.count_reachable(self.node(id).right)
            }
        }
    }

    /// Inserts `key` into the tree and returns the handle of its new node.
    ///
    /// Equal keys are kept: inserting a key that is already present adds a
    /// second node in the right subtree of the existing one.
    ///
    /// # Examples
    ///
    /// ```
    /// use parented_bst::parented::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(5);
    /// tree.insert(3);
    /// tree.insert(5);
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 5, 5]);
    /// ```
    pub fn insert(&mut self, key: K) -> NodeId
    where
        K: Ord,
    {
        let id = self.new_node(key);
        self.insert_node(id);
        id
    }

    /// Attaches the detached node `id` at its ordered position: walk down
    /// from the root, descending left for a smaller key and right otherwise,
    /// and link the node into the first empty slot, wiring both the child
    /// link and the parent back-link.
    ///
    /// Exactly one node becomes reachable; no other node's key or children
    /// change.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn insert_node(&mut self, id: NodeId)
    where
        K: Ord,
    {
        let mut parent = None;
        let mut current = self.root;
        while let Some(c) = current {
            parent = Some(c);
            current = if self.node(id).key < self.node(c).key {
                self.node(c).left
            } else {
                self.node(c).right
            };
        }

        self.node_mut(id).parent = parent;
        match parent {
            None => self.root = Some(id),
            Some(p) => {
                if self.node(id).key < self.node(p).key {
                    self.node_mut(p).left = Some(id);
                } else {
                    self.node_mut(p).right = Some(id);
                }
            }
        }
        self.len += 1;

        if cfg!(debug_assertions) {
            if let Some(p) = parent {
                let n = self.node(p);
                assert!(n.left == Some(id) || n.right == Some(id));
            }
            assert_eq!(self.node(id).parent, parent);
        }
    }

    /// Potentially finds a node with the given key, searching from the root.
    /// If no node has the corresponding key, `None` is returned.
    ///
    /// With duplicate keys in the tree this returns the first match on the
    /// canonical search path; further equal keys sit deeper in that node's
    /// right subtree and are not visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use parented_bst::parented::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.find(&1).is_some());
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<NodeId>
    where
        K: Ord,
    {
        self.find_from(self.root, key)
    }

    /// Like [`find`][Self::find], but searches the subtree rooted at `node`
    /// (`None` searches nothing).
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn find_from(&self, node: Option<NodeId>, key: &K) -> Option<NodeId>
    where
        K: Ord,
    {
        let mut current = node;
        while let Some(id) = current {
            current = match key.cmp(&self.node(id).key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => self.node(id).left,
                Ordering::Greater => self.node(id).right,
            };
        }
        None
    }

    /// Whether some node holds the given key.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// The node holding the smallest key in the subtree rooted at `node`:
    /// follow left children until there are none.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn minimum(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(l) = self.node(current).left {
            current = l;
        }
        current
    }

    /// The node holding the largest key in the subtree rooted at `node`:
    /// follow right children until there are none.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn maximum(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(r) = self.node(current).right {
            current = r;
        }
        current
    }

    /// The node holding the next key in sorted order, or `None` if `node`
    /// holds the largest key in the tree.
    ///
    /// If the node has a right subtree the successor is that subtree's
    /// minimum. Otherwise it is the first ancestor reached from the left:
    /// climb parent links while the current node is its parent's right
    /// child.
    ///
    /// # Examples
    ///
    /// ```
    /// use parented_bst::parented::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// let one = tree.insert(1);
    /// let three = tree.insert(3);
    ///
    /// let two = tree.successor(one).unwrap();
    /// assert_eq!(tree.key(two), &2);
    /// assert_eq!(tree.successor(three), None);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        if let Some(r) = self.node(node).right {
            return Some(self.minimum(r));
        }
        let mut current = node;
        let mut parent = self.node(node).parent;
        while let Some(p) = parent {
            if self.node(p).right != Some(current) {
                break;
            }
            current = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /// The node holding the previous key in sorted order, or `None` if
    /// `node` holds the smallest key in the tree. Mirror image of
    /// [`successor`][Self::successor].
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        if let Some(l) = self.node(node).left {
            return Some(self.maximum(l));
        }
        let mut current = node;
        let mut parent = self.node(node).parent;
        while let Some(p) = parent {
            if self.node(p).left != Some(current) {
                break;
            }
            current = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /// Replaces `old`'s position under its parent with `new` (`None` removes
    /// the position without replacement): the parent's child slot and, when
    /// present, `new`'s parent back-link are rewired. If `old` was the root,
    /// `new` becomes the root.
    ///
    /// This is a relinking primitive with a deliberately narrow contract: it
    /// never touches the children of either node, it leaves `old`'s own
    /// parent link stale, and it does not adjust [`len`][Self::len]. Callers
    /// splice children themselves afterwards and account for any node that
    /// became unreachable, the way [`remove`][Self::remove] does.
    ///
    /// # Panics
    ///
    /// Panics if a handle did not come from this tree.
    pub fn transplant(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.node(old).parent;
        match parent {
            None => self.root = new,
            Some(p) => {
                if self.node(p).left == Some(old) {
                    self.node_mut(p).left = new;
                } else {
                    self.node_mut(p).right = new;
                }
            }
        }
        if let Some(n) = new {
            self.node_mut(n).parent = parent;
        }
    }

    /// Detaches the node `target` from the tree.
    ///
    /// Deletion relinks whole nodes rather than copying keys around, so node
    /// identity is stable: every handle other than `target` still names the
    /// same key afterwards. The three shapes are:
    ///
    /// 1. no left child - the right subtree (possibly empty) takes the
    ///    node's position;
    /// 2. no right child - the left subtree takes the node's position;
    /// 3. both children - the in-order successor (which cannot have a left
    ///    child) is spliced out of the right subtree if it isn't its direct
    ///    root, then takes the node's position, inheriting both children.
    ///
    /// # Examples
    ///
    /// ```
    /// use parented_bst::parented::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let two = tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// tree.remove(two);
    ///
    /// assert_eq!(tree.find(&2), None);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this tree. `target` must be
    /// attached (reachable from the root).
    pub fn remove(&mut self, target: NodeId) {
        let left = self.node(target).left;
        let right = self.node(target).right;
        match (left, right) {
            (None, _) => self.transplant(target, right),
            (_, None) => self.transplant(target, left),
            (Some(l), Some(r)) => {
                let succ = self.minimum(r);
                if self.node(succ).parent != Some(target) {
                    let succ_right = self.node(succ).right;
                    self.transplant(succ, succ_right);
                    self.node_mut(succ).right = Some(r);
                    self.node_mut(r).parent = Some(succ);
                }
                self.transplant(target, Some(succ));
                self.node_mut(succ).left = Some(l);
                self.node_mut(l).parent = Some(succ);
            }
        }
        self.len -= 1;

        if cfg!(debug_assertions) {
            if let Some(root) = self.root {
                assert_eq!(self.node(root).parent, None);
            }
        }
    }

    /// Finds one node with the given key and removes it. Returns whether a
    /// node was removed. With duplicate keys only the instance on the
    /// canonical search path goes away.
    pub fn remove_key(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        match self.find(key) {
            Some(id) => {
                self.remove(id);
                true
            }
            None => false,
        }
    }

    /// Visits every reachable node in sorted (in-order) position: left
    /// subtree, node, right subtree. Read-only.
    pub fn in_order(&self, mut visit: impl FnMut(NodeId)) {
        self.in_order_from(self.root, &mut visit);
    }

    fn in_order_from(&self, node: Option<NodeId>, visit: &mut impl FnMut(NodeId)) {
        if let Some(id) = node {
            self.in_order_from(self.node(id).left, visit);
            visit(id);
            self.in_order_from(self.node(id).right, visit);
        }
    }

    /// Visits every reachable node in pre-order position: node, left
    /// subtree, right subtree. Read-only.
    pub fn pre_order(&self, mut visit: impl FnMut(NodeId)) {
        self.pre_order_from(self.root, &mut visit);
    }

    fn pre_order_from(&self, node: Option<NodeId>, visit: &mut impl FnMut(NodeId)) {
        if let Some(id) = node {
            visit(id);
            self.pre_order_from(self.node(id).left, visit);
            self.pre_order_from(self.node(id).right, visit);
        }
    }

    /// Visits every reachable node in post-order position: left subtree,
    /// right subtree, node. Read-only.
    pub fn post_order(&self, mut visit: impl FnMut(NodeId)) {
        self.post_order_from(self.root, &mut visit);
    }

    fn post_order_from(&self, node: Option<NodeId>, visit: &mut impl FnMut(NodeId)) {
        if let Some(id) = node {
            self.post_order_from(self.node(id).left, visit);
            self.post_order_from(self.node(id).right, visit);
            visit(id);
        }
    }

    /// An iterator over the keys in sorted order.
    ///
    /// Iteration starts at the tree's minimum and repeatedly takes the
    /// in-order successor, so it needs no auxiliary stack - the parent
    /// links do the climbing.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            tree: self,
            next: self.root.map(|r| self.minimum(r)),
        }
    }
}

/// An in-order iterator over a [`Tree`]'s keys. Created by [`Tree::iter`].
pub struct Iter<'a, K> {
    tree: &'a Tree<K>,
    next: Option<NodeId>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let id = self.next?;
        self.next = self.tree.successor(id);
        Some(&self.tree.node(id).key)
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Subtree<'a, K>(&'a Tree<K>, Option<NodeId>);

        impl<'a, K: fmt::Debug> fmt::Debug for Subtree<'a, K> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.1 {
                    None => f.write_str("Leaf"),
                    Some(id) => f
                        .debug_struct("Node")
                        .field("key", self.0.key(id))
                        .field("left", &Subtree(self.0, self.0.left(id)))
                        .field("right", &Subtree(self.0, self.0.right(id)))
                        .finish(),
                }
            }
        }

        f.debug_struct("Tree")
            .field("root", &Subtree(self, self.root))
            .finish()
    }
}
