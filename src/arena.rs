use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::traversal::{self, Order, Positions};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle to a node of one specific [`Tree`].
///
/// Equality is node identity. A position stops being valid when its node is
/// removed or moved to another tree; the tree reports that as
/// [`TreeError::InvalidPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    tree: u64,
    index: Index,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        write!(f, "tree {} node {}v{}", self.tree, slot, generation)
    }
}

/// Node in the arena-based hierarchy structure.
#[derive(Debug)]
pub(crate) struct TreeNode<E> {
    pub(crate) element: E,
    /// Index of parent node in the arena, None for the root
    pub(crate) parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub(crate) children: Vec<Index>,
}

impl<E> TreeNode<E> {
    fn new(element: E, parent: Option<Index>) -> Self {
        Self {
            element,
            parent,
            children: Vec::new(),
        }
    }
}

/// Ordered N-ary tree backed by a generational arena.
///
/// Every occupied arena slot is reachable from the root, so the node count
/// always equals the number of slots in use. Removed nodes free their slots,
/// which invalidates their positions.
#[derive(Debug)]
pub struct Tree<E> {
    /// Process-unique id stamped into every position handed out
    id: u64,
    arena: Arena<TreeNode<E>>,
    root: Option<Index>,
    size: usize,
}

impl<E> Default for Tree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Tree<E> {
    pub fn new() -> Self {
        Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            arena: Arena::new(),
            root: None,
            size: 0,
        }
    }

    fn position(&self, index: Index) -> Position {
        Position {
            tree: self.id,
            index,
        }
    }

    fn node(&self, p: Position) -> TreeResult<&TreeNode<E>> {
        if p.tree != self.id {
            return Err(TreeError::InvalidPosition(p));
        }
        self.arena.get(p.index).ok_or(TreeError::InvalidPosition(p))
    }

    fn node_mut(&mut self, p: Position) -> TreeResult<&mut TreeNode<E>> {
        if p.tree != self.id {
            return Err(TreeError::InvalidPosition(p));
        }
        self.arena
            .get_mut(p.index)
            .ok_or(TreeError::InvalidPosition(p))
    }

    // ------------------------------------------------------------------
    // Structural mutation
    // ------------------------------------------------------------------

    #[instrument(level = "trace", skip(self, element))]
    pub fn add_root(&mut self, element: E) -> TreeResult<Position> {
        if !self.is_empty() {
            return Err(TreeError::RootExists);
        }
        let idx = self.arena.insert(TreeNode::new(element, None));
        self.root = Some(idx);
        self.size = 1;
        debug!(tree = self.id, "added root");
        Ok(self.position(idx))
    }

    /// Appends a new child holding `element` after the existing children of `parent`.
    #[instrument(level = "trace", skip(self, element))]
    pub fn add(&mut self, element: E, parent: Position) -> TreeResult<Position> {
        self.insert_child(element, parent, None)
    }

    /// Inserts a new child holding `element` at `index` among the children of
    /// `parent`, shifting later children right. `index` may equal the current
    /// child count, which appends.
    #[instrument(level = "trace", skip(self, element))]
    pub fn add_at(&mut self, element: E, parent: Position, index: usize) -> TreeResult<Position> {
        self.insert_child(element, parent, Some(index))
    }

    fn insert_child(
        &mut self,
        element: E,
        parent: Position,
        index: Option<usize>,
    ) -> TreeResult<Position> {
        let len = self.node(parent)?.children.len();
        let index = match index {
            Some(index) if index > len => {
                return Err(TreeError::IndexOutOfRange { index, len });
            }
            Some(index) => index,
            None => len,
        };

        let idx = self.arena.insert(TreeNode::new(element, Some(parent.index)));
        if let Some(parent_node) = self.arena.get_mut(parent.index) {
            parent_node.children.insert(index, idx);
        }
        self.size += 1;
        debug!(tree = self.id, %parent, index, size = self.size, "added child");
        Ok(self.position(idx))
    }

    /// Exchanges the elements stored at `p1` and `p2`; links are untouched.
    #[instrument(level = "trace", skip(self))]
    pub fn swap_elements(&mut self, p1: Position, p2: Position) -> TreeResult<()> {
        self.node(p1)?;
        self.node(p2)?;
        if p1 == p2 {
            return Ok(());
        }
        if let (Some(a), Some(b)) = self.arena.get2_mut(p1.index, p2.index) {
            std::mem::swap(&mut a.element, &mut b.element);
        }
        Ok(())
    }

    /// Stores `element` at `p` and returns the element it replaced.
    #[instrument(level = "trace", skip(self, element))]
    pub fn replace(&mut self, p: Position, element: E) -> TreeResult<E> {
        let node = self.node_mut(p)?;
        Ok(std::mem::replace(&mut node.element, element))
    }

    /// Removes the node at `p` together with all of its descendants.
    ///
    /// Removing the root empties the tree. Every position inside the removed
    /// subtree is invalid afterwards.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, p: Position) -> TreeResult<()> {
        let indices = self.detach(p)?;
        let removed = indices.len();
        for idx in indices {
            self.arena.remove(idx);
        }
        debug!(tree = self.id, removed, size = self.size, "removed subtree");
        Ok(())
    }

    /// Moves the subtree rooted at `p` out of this tree into a new, independent
    /// tree. Elements are moved, not cloned; the source no longer reaches them
    /// and the positions inside the subtree become invalid here.
    #[instrument(level = "debug", skip(self))]
    pub fn sub_tree(&mut self, p: Position) -> TreeResult<Tree<E>> {
        let indices = self.detach(p)?;
        let mut extracted = Tree::new();
        self.transplant(indices, &mut extracted, None);
        debug!(
            tree = self.id,
            extracted = extracted.id,
            moved = extracted.size,
            size = self.size,
            "extracted subtree"
        );
        Ok(extracted)
    }

    /// Grafts the whole of `other` as the new last child subtree of `p`,
    /// leaving `other` empty.
    ///
    /// Returns the position of the grafted root in this tree, or `None` when
    /// `other` was empty. On an invalid `p` neither tree is changed.
    #[instrument(level = "debug", skip(self, other))]
    pub fn attach(&mut self, p: Position, other: &mut Tree<E>) -> TreeResult<Option<Position>> {
        self.node(p)?;
        let Some(other_root) = other.root else {
            return Ok(None);
        };
        let indices = other.detach(other.position(other_root))?;
        let grafted = other.transplant(indices, self, Some(p.index));
        debug!(tree = self.id, from = other.id, size = self.size, "attached tree");
        Ok(grafted.map(|idx| self.position(idx)))
    }

    /// Unlinks the subtree at `p` from its parent (or clears the root) and
    /// returns its indices in pre-order. The nodes stay in the arena.
    fn detach(&mut self, p: Position) -> TreeResult<Vec<Index>> {
        let parent = self.node(p)?.parent;
        let indices = traversal::preorder(&self.arena, p.index);
        match parent {
            Some(parent_idx) => {
                if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                    parent_node.children.retain(|&c| c != p.index);
                }
            }
            None => self.root = None,
        }
        self.size -= indices.len();
        Ok(indices)
    }

    /// Moves detached nodes (given in pre-order) into `dest`, re-linking them
    /// under `graft`, or as the root of `dest` when `graft` is None.
    fn transplant(
        &mut self,
        indices: Vec<Index>,
        dest: &mut Tree<E>,
        graft: Option<Index>,
    ) -> Option<Index> {
        let mut moved: HashMap<Index, Index> = HashMap::with_capacity(indices.len());
        let mut new_root = None;

        for old_idx in indices {
            let Some(node) = self.arena.remove(old_idx) else {
                continue;
            };
            let parent = match new_root {
                None => graft,
                Some(_) => node.parent.and_then(|p| moved.get(&p).copied()),
            };
            let idx = dest.arena.insert(TreeNode::new(node.element, parent));
            match parent {
                Some(parent_idx) => {
                    if let Some(parent_node) = dest.arena.get_mut(parent_idx) {
                        parent_node.children.push(idx);
                    }
                }
                None => dest.root = Some(idx),
            }
            new_root.get_or_insert(idx);
            moved.insert(old_idx, idx);
            dest.size += 1;
        }

        new_root
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn root(&self) -> TreeResult<Position> {
        self.root
            .map(|idx| self.position(idx))
            .ok_or(TreeError::EmptyTree)
    }

    pub fn parent(&self, p: Position) -> TreeResult<Position> {
        self.node(p)?
            .parent
            .map(|idx| self.position(idx))
            .ok_or(TreeError::NoParent(p))
    }

    pub fn children(&self, p: Position) -> TreeResult<Vec<Position>> {
        Ok(self
            .node(p)?
            .children
            .iter()
            .map(|&idx| self.position(idx))
            .collect())
    }

    pub fn child_count(&self, p: Position) -> TreeResult<usize> {
        Ok(self.node(p)?.children.len())
    }

    pub fn is_internal(&self, p: Position) -> TreeResult<bool> {
        Ok(!self.node(p)?.children.is_empty())
    }

    pub fn is_leaf(&self, p: Position) -> TreeResult<bool> {
        Ok(self.node(p)?.children.is_empty())
    }

    pub fn is_root(&self, p: Position) -> TreeResult<bool> {
        Ok(self.node(p)?.parent.is_none())
    }

    /// True if `p` denotes a node currently reachable from this tree's root.
    pub fn contains(&self, p: Position) -> bool {
        self.node(p).is_ok()
    }

    pub fn get(&self, p: Position) -> TreeResult<&E> {
        Ok(&self.node(p)?.element)
    }

    pub fn get_mut(&mut self, p: Position) -> TreeResult<&mut E> {
        Ok(&mut self.node_mut(p)?.element)
    }

    /// Number of edges between `p` and the root.
    pub fn depth(&self, p: Position) -> TreeResult<usize> {
        let mut depth = 0;
        let mut current = self.node(p)?.parent;
        while let Some(idx) = current {
            depth += 1;
            current = self.arena.get(idx).and_then(|node| node.parent);
        }
        Ok(depth)
    }

    /// Number of levels in the tree, 0 when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut max_height = 0;
        let mut stack = vec![(root, 1)];
        while let Some((idx, level)) = stack.pop() {
            max_height = max_height.max(level);
            if let Some(node) = self.arena.get(idx) {
                stack.extend(node.children.iter().map(|&child| (child, level + 1)));
            }
        }
        max_height
    }

    /// Leaf positions in pre-order.
    pub fn leaves(&self) -> Positions {
        let leaves = self
            .preorder_indices()
            .into_iter()
            .filter(|&idx| {
                self.arena
                    .get(idx)
                    .is_some_and(|node| node.children.is_empty())
            })
            .map(|idx| self.position(idx))
            .collect();
        Positions::new(leaves)
    }

    // ------------------------------------------------------------------
    // Traversals
    // ------------------------------------------------------------------

    /// Breadth-first snapshot; the default iteration order of a tree.
    pub fn iter(&self) -> Positions {
        self.iter_breadth_first()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_breadth_first(&self) -> Positions {
        let indices = match self.root {
            Some(root) => traversal::breadth_first(&self.arena, root),
            None => Vec::new(),
        };
        self.snapshot(indices)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_preorder(&self) -> Positions {
        self.snapshot(self.preorder_indices())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> Positions {
        let indices = match self.root {
            Some(root) => traversal::postorder(&self.arena, root),
            None => Vec::new(),
        };
        self.snapshot(indices)
    }

    pub fn traverse(&self, order: Order) -> Positions {
        match order {
            Order::BreadthFirst => self.iter_breadth_first(),
            Order::PreOrder => self.iter_preorder(),
            Order::PostOrder => self.iter_postorder(),
        }
    }

    fn preorder_indices(&self) -> Vec<Index> {
        match self.root {
            Some(root) => traversal::preorder(&self.arena, root),
            None => Vec::new(),
        }
    }

    fn snapshot(&self, indices: Vec<Index>) -> Positions {
        Positions::new(indices.into_iter().map(|idx| self.position(idx)).collect())
    }
}

impl<'a, E> IntoIterator for &'a Tree<E> {
    type Item = Position;
    type IntoIter = Positions;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
