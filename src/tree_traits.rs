use std::fmt::Display;

use termtree::Tree as DisplayTree;
use tracing::instrument;

use crate::arena::{Position, Tree};

pub trait TreeConvert {
    fn to_tree_string(&self) -> DisplayTree<String>;
}

impl<E: Display> TreeConvert for Tree<E> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> DisplayTree<String> {
        let Ok(root) = self.root() else {
            return DisplayTree::new("Empty tree".to_string());
        };

        fn build<E: Display>(tree: &Tree<E>, p: Position) -> DisplayTree<String> {
            let label = tree
                .get(p)
                .map(|element| element.to_string())
                .unwrap_or_default();
            let leaves: Vec<_> = tree
                .children(p)
                .unwrap_or_default()
                .into_iter()
                .map(|child| build(tree, child))
                .collect();
            DisplayTree::new(label).with_leaves(leaves)
        }

        build(self, root)
    }
}
