//! Domain layer: vector/matrix math and the node chain
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod chain;
pub mod error;
pub mod math;

pub use chain::{ChainIterator, ChainNode, NodeChain};
pub use error::{DomainError, DomainResult};
pub use math::{copy_mat, dot_product, transpose_mat, Mat33, Vec3};
