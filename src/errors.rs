use thiserror::Error;

use crate::arena::Position;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Invalid position: {0}")]
    InvalidPosition(Position),

    #[error("The tree already has a root node")]
    RootExists,

    #[error("Child index {index} out of range for a node with {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The tree is empty")]
    EmptyTree,

    #[error("The root node has no parent: {0}")]
    NoParent(Position),
}

pub type TreeResult<T> = Result<T, TreeError>;
