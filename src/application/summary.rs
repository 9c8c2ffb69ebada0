//! Outline view of a node chain as a `termtree` tree.
//!
//! ```text
//! node 0 (children: 2)
//! └── node 1 (children: 1)
//!     └── node 2 (children: 0)
//! ```

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{ChainNode, DomainError, DomainResult, NodeChain};

fn label(position: usize, node: &ChainNode) -> String {
    format!("node {} (children: {})", position, node.num_children)
}

/// Nest every successor under its predecessor, starting at `start`.
#[instrument(level = "debug", skip(chain))]
pub fn chain_outline(chain: &NodeChain, start: Index) -> DomainResult<Tree<String>> {
    let nodes: Vec<&ChainNode> = chain.iter_from(start).map(|(_, node)| node).collect();
    if nodes.is_empty() {
        return Err(DomainError::NodeNotFound(start));
    }

    // build leaf-first so each level can take ownership of the one below
    let mut tree: Option<Tree<String>> = None;
    for (position, node) in nodes.iter().enumerate().rev() {
        let mut level = Tree::new(label(position, node));
        if let Some(below) = tree.take() {
            level.push(below);
        }
        tree = Some(level);
    }
    tree.ok_or(DomainError::NodeNotFound(start))
}
