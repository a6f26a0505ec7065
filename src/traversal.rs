//! Traversal orders over the arena.
//!
//! Traversals are computed eagerly into a [`Positions`] snapshot, so mutating
//! the tree afterwards does not affect an iterator already handed out.
//! All three use explicit stacks/queues instead of recursion.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use generational_arena::{Arena, Index};
use serde::{Deserialize, Serialize};

use crate::arena::{Position, TreeNode};

/// Traversal order for [`crate::Tree::traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Order {
    #[default]
    #[serde(rename = "breadth", alias = "breadth-first", alias = "bfs")]
    BreadthFirst,
    #[serde(rename = "pre", alias = "preorder", alias = "pre-order")]
    PreOrder,
    #[serde(rename = "post", alias = "postorder", alias = "post-order")]
    PostOrder,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::BreadthFirst => "breadth",
            Order::PreOrder => "pre",
            Order::PostOrder => "post",
        };
        f.write_str(name)
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breadth" | "breadth-first" | "bfs" => Ok(Order::BreadthFirst),
            "pre" | "preorder" | "pre-order" => Ok(Order::PreOrder),
            "post" | "postorder" | "post-order" => Ok(Order::PostOrder),
            other => Err(format!(
                "unknown traversal order '{other}' (expected breadth, pre or post)"
            )),
        }
    }
}

/// Snapshot of positions in a fixed order, exhausted after one pass.
#[derive(Debug, Clone)]
pub struct Positions {
    inner: std::vec::IntoIter<Position>,
}

impl Positions {
    pub(crate) fn new(positions: Vec<Position>) -> Self {
        Self {
            inner: positions.into_iter(),
        }
    }
}

impl Iterator for Positions {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Positions {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Positions {}

impl FusedIterator for Positions {}

pub(crate) fn breadth_first<E>(arena: &Arena<TreeNode<E>>, start: Index) -> Vec<Index> {
    let mut visited = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(idx) = queue.pop_front() {
        if let Some(node) = arena.get(idx) {
            visited.push(idx);
            queue.extend(node.children.iter().copied());
        }
    }

    visited
}

pub(crate) fn preorder<E>(arena: &Arena<TreeNode<E>>, start: Index) -> Vec<Index> {
    let mut visited = Vec::new();
    let mut stack = vec![start];

    while let Some(idx) = stack.pop() {
        if let Some(node) = arena.get(idx) {
            visited.push(idx);
            // Push children in reverse order for left-to-right traversal
            stack.extend(node.children.iter().rev().copied());
        }
    }

    visited
}

pub(crate) fn postorder<E>(arena: &Arena<TreeNode<E>>, start: Index) -> Vec<Index> {
    let mut visited = Vec::new();
    let mut stack = vec![(start, false)];

    while let Some((idx, expanded)) = stack.pop() {
        if expanded {
            visited.push(idx);
        } else if let Some(node) = arena.get(idx) {
            stack.push((idx, true));
            stack.extend(node.children.iter().rev().map(|&child| (child, false)));
        }
    }

    visited
}
