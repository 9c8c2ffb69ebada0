use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::math::Mat33;

/// Node in the arena-based chain.
#[derive(Debug, Clone)]
pub struct ChainNode {
    /// Matrix payload
    pub data: Mat33,
    /// Advisory count of descendants, never checked against the chain
    pub num_children: u32,
    /// Successor in the arena, None for the last node
    next: Option<Index>,
    /// Predecessor in the arena, None for a head node
    prev: Option<Index>,
}

impl ChainNode {
    pub fn next(&self) -> Option<Index> {
        self.next
    }

    pub fn prev(&self) -> Option<Index> {
        self.prev
    }
}

/// Arena-based singly linked chain of matrix nodes.
///
/// Every node is owned by the arena; links are plain indices, so dropping the
/// arena frees the whole chain. `link` refuses anything that would turn the
/// chain into a cycle or a branch, so forward traversal always terminates.
#[derive(Debug, Default)]
pub struct NodeChain {
    arena: Arena<ChainNode>,
    /// First node inserted, used as the chain head by `push_back`
    head: Option<Index>,
}

impl NodeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached node.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, data: Mat33, num_children: u32) -> Index {
        let idx = self.arena.insert(ChainNode {
            data,
            num_children,
            next: None,
            prev: None,
        });
        if self.head.is_none() {
            self.head = Some(idx);
        }
        idx
    }

    /// Append a node after the current tail of the head chain.
    #[instrument(level = "trace", skip(self))]
    pub fn push_back(&mut self, data: Mat33, num_children: u32) -> Index {
        let tail = self.head.and_then(|head| self.tail_of(head));
        let idx = self.insert(data, num_children);
        if let Some(tail) = tail {
            if let Some(node) = self.arena.get_mut(tail) {
                node.next = Some(idx);
            }
            if let Some(node) = self.arena.get_mut(idx) {
                node.prev = Some(tail);
            }
        }
        idx
    }

    pub fn head(&self) -> Option<Index> {
        self.head
    }

    pub fn get(&self, idx: Index) -> Option<&ChainNode> {
        self.arena.get(idx)
    }

    fn get_or_err(&self, idx: Index) -> DomainResult<&ChainNode> {
        self.arena.get(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    fn get_mut_or_err(&mut self, idx: Index) -> DomainResult<&mut ChainNode> {
        self.arena.get_mut(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn set_data(&mut self, idx: Index, data: Mat33) -> DomainResult<()> {
        self.get_mut_or_err(idx)?.data = data;
        Ok(())
    }

    pub fn set_num_children(&mut self, idx: Index, num_children: u32) -> DomainResult<()> {
        self.get_mut_or_err(idx)?.num_children = num_children;
        Ok(())
    }

    /// Make `child` the successor of `parent`.
    ///
    /// Fails if either index is stale, if `parent` already has a successor,
    /// if `child` already has a predecessor, or if `parent` is reachable from
    /// `child` (which covers self links).
    #[instrument(level = "debug", skip(self))]
    pub fn link(&mut self, parent: Index, child: Index) -> DomainResult<()> {
        if self.get_or_err(parent)?.next.is_some() {
            return Err(DomainError::AlreadyLinked(parent));
        }
        if self.get_or_err(child)?.prev.is_some() {
            return Err(DomainError::AlreadyLinked(child));
        }
        if self.iter_from(child).any(|(idx, _)| idx == parent) {
            return Err(DomainError::CycleDetected { parent, child });
        }

        self.get_mut_or_err(parent)?.next = Some(child);
        self.get_mut_or_err(child)?.prev = Some(parent);
        if self.head == Some(child) {
            self.head = self.root_of(parent);
        }
        debug!("linked {:?} -> {:?}", parent, child);
        Ok(())
    }

    /// Detach the successor of `parent`, returning it.
    #[instrument(level = "debug", skip(self))]
    pub fn unlink(&mut self, parent: Index) -> DomainResult<Option<Index>> {
        let next = self.get_mut_or_err(parent)?.next.take();
        if let Some(child) = next {
            if let Some(node) = self.arena.get_mut(child) {
                node.prev = None;
            }
        }
        Ok(next)
    }

    /// Destroy a single node. Its neighbours are detached, not re-joined.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, idx: Index) -> DomainResult<ChainNode> {
        let node = self.arena.remove(idx).ok_or(DomainError::NodeNotFound(idx))?;
        if let Some(prev) = node.prev {
            if let Some(p) = self.arena.get_mut(prev) {
                p.next = None;
            }
        }
        if let Some(next) = node.next {
            if let Some(n) = self.arena.get_mut(next) {
                n.prev = None;
            }
        }
        if self.head == Some(idx) {
            self.head = node.next.or_else(|| {
                self.arena
                    .iter()
                    .find(|(_, n)| n.prev.is_none())
                    .map(|(i, _)| i)
            });
        }
        Ok(node)
    }

    /// Destroy `head` and all its successors, deepest first.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_chain(&mut self, head: Index) -> DomainResult<usize> {
        self.get_or_err(head)?;
        let order: Vec<Index> = self.iter_from(head).map(|(idx, _)| idx).collect();
        for &idx in order.iter().rev() {
            self.remove(idx)?;
        }
        debug!("removed {} nodes", order.len());
        Ok(order.len())
    }

    /// Forward traversal starting at `start` (inclusive).
    pub fn iter_from(&self, start: Index) -> ChainIterator<'_> {
        ChainIterator {
            chain: self,
            current: Some(start),
        }
    }

    /// Number of nodes from `start` to the end of its chain.
    pub fn len_from(&self, start: Index) -> usize {
        self.iter_from(start).count()
    }

    /// Actual number of successors of `idx`, independent of `num_children`.
    pub fn descendants(&self, idx: Index) -> DomainResult<usize> {
        self.get_or_err(idx)?;
        Ok(self.len_from(idx) - 1)
    }

    fn tail_of(&self, start: Index) -> Option<Index> {
        self.iter_from(start).last().map(|(idx, _)| idx)
    }

    fn root_of(&self, idx: Index) -> Option<Index> {
        let mut current = self.arena.get(idx).map(|_| idx)?;
        while let Some(prev) = self.arena.get(current).and_then(|n| n.prev) {
            current = prev;
        }
        Some(current)
    }
}

pub struct ChainIterator<'a> {
    chain: &'a NodeChain,
    current: Option<Index>,
}

impl<'a> Iterator for ChainIterator<'a> {
    type Item = (Index, &'a ChainNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = self.chain.arena.get(idx)?;
        self.current = node.next;
        Some((idx, node))
    }
}
