//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent violations of the node chain structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0:?}")]
    NodeNotFound(Index),

    #[error("linking {parent:?} -> {child:?} would create a cycle")]
    CycleDetected { parent: Index, child: Index },

    #[error("node already linked: {0:?}")]
    AlreadyLinked(Index),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
