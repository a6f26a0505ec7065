//! Ordered N-ary trees addressed through generational position handles.
//!
//! ```
//! use narytree::Tree;
//!
//! let mut tree = Tree::new();
//! let a = tree.add_root("A").unwrap();
//! let b = tree.add("B", a).unwrap();
//! tree.add("C", a).unwrap();
//! tree.add("D", b).unwrap();
//!
//! let preorder: Vec<_> = tree.iter_preorder().map(|p| *tree.get(p).unwrap()).collect();
//! assert_eq!(preorder, ["A", "B", "D", "C"]);
//! ```

pub mod arena;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod outline;
pub mod traversal;
pub mod tree_traits;
pub mod util;

pub use arena::{Position, Tree};
pub use errors::{TreeError, TreeResult};
pub use traversal::{Order, Positions};
