//! Singly-linked list of block records, kept in caller-defined order
//! (address order for a free list, allocation order for an allocated list).
//!
//! Nodes live in a [`GenArena`] and link to their successor by handle. The
//! list tracks the first and last handles plus a cached length, so appending
//! is O(1) and positional operations are O(index).

use core::fmt;
use core::iter::FusedIterator;

use crate::config::ListConfig;
use crate::generational_arena::{self, GenArena, HalfSize, Handle};

/// Handle to a node of a [`BlockList`]. Becomes stale once the node is removed.
pub type NodeRef = Handle;

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index {index} out of range for list of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("block not found in list")]
    NotFound,
    #[error(transparent)]
    Arena(#[from] generational_arena::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

struct Node<B> {
    block: B,
    next: Option<NodeRef>,
}

pub struct BlockList<B> {
    nodes: GenArena<Node<B>, HalfSize>,
    first: Option<NodeRef>,
    last: Option<NodeRef>,
    len: usize,
}

impl<B> BlockList<B> {
    pub fn new() -> Self {
        Self::with_config(ListConfig::default())
    }

    pub fn with_config(config: ListConfig) -> Self {
        Self {
            nodes: GenArena::new(config.initial_capacity),
            first: None,
            last: None,
            len: 0,
        }
    }

    pub fn first(&self) -> Option<NodeRef> {
        self.first
    }

    pub fn last(&self) -> Option<NodeRef> {
        self.last
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn out_of_range(&self, index: usize) -> Error {
        log::debug!("block list: index {} out of range (len {})", index, self.len);
        Error::OutOfRange {
            index,
            len: self.len,
        }
    }

    fn next_of(&self, node: NodeRef) -> Result<Option<NodeRef>> {
        Ok(self.nodes.get(node)?.next)
    }

    /// Follows `steps` links from `first`. Callers bound `steps` by `len`.
    fn walk(&self, steps: usize) -> Result<Option<NodeRef>> {
        let mut current = self.first;
        for _ in 0..steps {
            match current {
                Some(node) => current = self.next_of(node)?,
                None => break,
            }
        }
        Ok(current)
    }

    /// Returns the node at `index`. `index == len` is accepted and yields
    /// `None`, the past-the-end position used as an insertion point.
    pub fn node(&self, index: usize) -> Result<Option<NodeRef>> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        self.walk(index)
    }

    /// Inserts `block` so that it becomes the element at `index`, shifting
    /// later elements back by one. Returns the handle of the new node.
    pub fn insert(&mut self, index: usize, block: B) -> Result<NodeRef> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }

        let predecessor = match index {
            0 => None,
            i if i == self.len => self.last,
            i => self.walk(i - 1)?,
        };
        let next = match predecessor {
            None => self.first,
            Some(node) => self.next_of(node)?,
        };

        let handle = self.nodes.add(Node { block, next })?;
        match predecessor {
            None => self.first = Some(handle),
            Some(node) => self.nodes.get_mut(node)?.next = Some(handle),
        }
        if next.is_none() {
            self.last = Some(handle);
        }
        self.len += 1;

        log::trace!("block list: inserted at {} (len {})", index, self.len);
        Ok(handle)
    }

    pub fn push_front(&mut self, block: B) -> Result<NodeRef> {
        self.insert(0, block)
    }

    pub fn push_back(&mut self, block: B) -> Result<NodeRef> {
        self.insert(self.len, block)
    }

    fn element(&self, index: usize) -> Result<NodeRef> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        self.walk(index)?.ok_or(Error::NotFound)
    }

    /// Returns the block at `index`. Unlike [`node`](Self::node), the
    /// past-the-end position is rejected.
    pub fn get(&self, index: usize) -> Result<&B> {
        let node = self.element(index)?;
        Ok(&self.nodes.get(node)?.block)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut B> {
        let node = self.element(index)?;
        Ok(&mut self.nodes.get_mut(node)?.block)
    }

    pub fn block(&self, node: NodeRef) -> Result<&B> {
        self.nodes
            .get(node)
            .map(|node| &node.block)
            .map_err(|_| Error::NotFound)
    }

    pub fn successor(&self, node: NodeRef) -> Result<Option<NodeRef>> {
        self.nodes
            .get(node)
            .map(|node| node.next)
            .map_err(|_| Error::NotFound)
    }

    /// Detaches `target`, whose predecessor on the chain is `predecessor`,
    /// and hands back its block. Both handles are resolved before the target
    /// leaves the arena, so a failure leaves the chain as it was.
    fn unlink(&mut self, predecessor: Option<NodeRef>, target: NodeRef) -> Result<B> {
        let next = self.next_of(target)?;
        match predecessor {
            None => self.first = next,
            Some(node) => self.nodes.get_mut(node)?.next = next,
        }
        let removed = self.nodes.remove(target)?;
        if next.is_none() {
            self.last = predecessor;
        }
        self.len -= 1;
        Ok(removed.block)
    }

    pub fn remove(&mut self, index: usize) -> Result<B> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }

        let predecessor = match index {
            0 => None,
            i => self.walk(i - 1)?,
        };
        let target = match predecessor {
            None => self.first,
            Some(node) => self.next_of(node)?,
        }
        .ok_or(Error::NotFound)?;

        let block = self.unlink(predecessor, target)?;
        log::trace!("block list: removed at {} (len {})", index, self.len);
        Ok(block)
    }

    /// Removes the node `node` refers to. Matching is by node identity, so a
    /// stale handle is `NotFound` even if an equal block is still present.
    pub fn remove_node(&mut self, node: NodeRef) -> Result<B> {
        let mut predecessor = None;
        let mut current = self.first;
        let mut index = 0;
        while let Some(handle) = current {
            if handle == node {
                let block = self.unlink(predecessor, handle)?;
                log::trace!("block list: removed node at {} (len {})", index, self.len);
                return Ok(block);
            }
            predecessor = current;
            current = self.next_of(handle)?;
            index += 1;
        }
        log::debug!("block list: node {:?} is not on the list", node);
        Err(Error::NotFound)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.first = None;
        self.last = None;
        self.len = 0;
        log::trace!("block list: cleared");
    }

    pub fn iter(&self) -> Iter<'_, B> {
        Iter {
            nodes: &self.nodes,
            current: self.first,
            remaining: self.len,
        }
    }
}

impl<B: PartialEq> BlockList<B> {
    /// Position of the first block equal to `block`, scanning from the front.
    pub fn index_of(&self, block: &B) -> Option<usize> {
        self.iter().position(|candidate| candidate == block)
    }

    pub fn contains(&self, block: &B) -> bool {
        self.index_of(block).is_some()
    }

    pub fn remove_block(&mut self, block: &B) -> Result<B> {
        match self.index_of(block) {
            Some(index) => self.remove(index),
            None => {
                log::debug!("block list: block is not on the list");
                Err(Error::NotFound)
            }
        }
    }
}

impl<B> Default for BlockList<B> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, B> {
    nodes: &'a GenArena<Node<B>, HalfSize>,
    current: Option<NodeRef>,
    remaining: usize,
}

impl<'a, B> Iterator for Iter<'a, B> {
    type Item = &'a B;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes: &'a GenArena<Node<B>, HalfSize> = self.nodes;
        let node = nodes.get(self.current.take()?).ok()?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<B> ExactSizeIterator for Iter<'_, B> {}

impl<B> FusedIterator for Iter<'_, B> {}

impl<'a, B> IntoIterator for &'a BlockList<B> {
    type Item = &'a B;
    type IntoIter = Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<B: fmt::Display> fmt::Display for BlockList<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("[]");
        }
        for block in self {
            write!(f, " [{}] ", block)?;
        }
        Ok(())
    }
}

impl<B: fmt::Debug> fmt::Debug for BlockList<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
