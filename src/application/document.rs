//! TOML input document: named vectors, named matrices and a node chain
//!
//! ```toml
//! [[vectors]]
//! name = "vec1"
//! values = [4.6, -5.0, 10.0]
//!
//! [[matrices]]
//! name = "mat"
//! columns = [[1.0, -2.0, 13.0], [4.0, -5.4, 6.0], [7.23, 800.0, -9.0]]
//!
//! [[chain]]
//! columns = [[2.0, 0.0, 0.0], [67.0, 7.0, 6.0], [7.0, -1.0, 9.0]]
//! num_children = 2
//! ```

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DomainResult, Mat33, NodeChain, Vec3};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVector {
    pub name: String,
    pub values: [f64; 3],
}

impl NamedVector {
    pub fn vector(&self) -> Vec3 {
        self.values.into()
    }
}

/// Matrix given column by column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMatrix {
    pub name: String,
    pub columns: [[f64; 3]; 3],
}

impl NamedMatrix {
    pub fn matrix(&self) -> Mat33 {
        Mat33::from_column_arrays(self.columns)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainEntry {
    pub columns: [[f64; 3]; 3],
    /// Defaults to the number of entries following this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_children: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub vectors: Vec<NamedVector>,
    pub matrices: Vec<NamedMatrix>,
    pub chain: Vec<ChainEntry>,
}

impl Document {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Link the `[[chain]]` entries in document order.
    ///
    /// Returns the head index, or None for a document without a chain.
    pub fn build_chain(&self) -> DomainResult<(NodeChain, Option<Index>)> {
        let mut chain = NodeChain::new();
        let mut previous: Option<Index> = None;
        let total = self.chain.len();

        for (position, entry) in self.chain.iter().enumerate() {
            let following = u32::try_from(total - position - 1).unwrap_or(u32::MAX);
            let idx = chain.insert(
                Mat33::from_column_arrays(entry.columns),
                entry.num_children.unwrap_or(following),
            );
            if let Some(prev) = previous {
                chain.link(prev, idx)?;
            }
            previous = Some(idx);
        }
        debug!("built chain of {} nodes", chain.len());

        let head = chain.head();
        Ok((chain, head))
    }
}
