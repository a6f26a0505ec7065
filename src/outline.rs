//! Indented text outlines as tree input.
//!
//! One node per non-blank line; leading indentation gives the depth.
//! Tabs count as one level each, spaces must come in multiples of the
//! configured indent width. Lines starting with `#` are comments.
//!
//! ```text
//! A
//!   B
//!     D
//!   C
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::arena::{Position, Tree};
use crate::errors::TreeError;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Failed to read outline {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Line {line}: indentation is not a multiple of {width} spaces")]
    BadIndent { line: usize, width: usize },

    #[error("Line {line}: outline must have exactly one top-level node")]
    MultipleRoots { line: usize },

    #[error("Line {line}: indentation skips a level")]
    SkippedLevel { line: usize },

    #[error("Outline contains no nodes")]
    Empty,

    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub type OutlineResult<T> = Result<T, OutlineError>;

#[derive(Debug, Clone, Copy)]
pub struct Outline {
    indent_width: usize,
}

impl Default for Outline {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Outline {
    /// A zero width is treated as one space per level.
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width: indent_width.max(1),
        }
    }

    #[instrument(level = "debug")]
    pub fn read(&self, path: &Path) -> OutlineResult<Tree<String>> {
        let content = std::fs::read_to_string(path).map_err(|source| OutlineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&content)
    }

    #[instrument(level = "debug", skip(content))]
    pub fn parse(&self, content: &str) -> OutlineResult<Tree<String>> {
        let mut tree = Tree::new();
        // ancestors[d] is the most recent node at depth d
        let mut ancestors: Vec<Position> = Vec::new();

        for (line_no, raw) in content.lines().enumerate() {
            let line = line_no + 1;
            let label = raw.trim();
            if label.is_empty() || label.starts_with('#') {
                continue;
            }

            let depth = self.depth_of(raw, line)?;
            if depth > ancestors.len() {
                return Err(OutlineError::SkippedLevel { line });
            }
            if depth == 0 && !ancestors.is_empty() {
                return Err(OutlineError::MultipleRoots { line });
            }

            ancestors.truncate(depth);
            let p = match ancestors.last() {
                Some(&parent) => tree.add(label.to_string(), parent)?,
                None => tree.add_root(label.to_string())?,
            };
            ancestors.push(p);
        }

        if tree.is_empty() {
            return Err(OutlineError::Empty);
        }
        debug!(size = tree.size(), "parsed outline");
        Ok(tree)
    }

    fn depth_of(&self, raw: &str, line: usize) -> OutlineResult<usize> {
        let mut tabs = 0;
        let mut spaces = 0;
        for c in raw.chars() {
            match c {
                '\t' => tabs += 1,
                ' ' => spaces += 1,
                _ => break,
            }
        }
        if spaces % self.indent_width != 0 {
            return Err(OutlineError::BadIndent {
                line,
                width: self.indent_width,
            });
        }
        Ok(tabs + spaces / self.indent_width)
    }
}
