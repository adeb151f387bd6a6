//! Pluggable node-set storage.
//!
//! The collector keeps its per-color membership (the gray worklist among
//! them) in sets created by a [`NodeSetFactory`], so the storage strategy
//! can change without touching collector logic.

use std::collections::{HashMap, HashSet, VecDeque};
use std::marker::PhantomData;

use core_types::NodeId;

/// A set of node ids.
pub trait NodeSet<T>: Send {
    /// Adds `node`; returns false if it was already present.
    fn insert(&mut self, node: T) -> bool;

    /// Removes `node`; returns false if it was absent.
    fn remove(&mut self, node: &T) -> bool;

    /// Returns true if `node` is present.
    fn contains(&self, node: &T) -> bool;

    /// Removes and returns some member, or `None` if empty.
    fn pop(&mut self) -> Option<T>;

    /// Number of members.
    fn len(&self) -> usize;

    /// Returns true if there are no members.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every member.
    fn to_vec(&self) -> Vec<T>;

    /// Removes every member.
    fn clear(&mut self);
}

/// Creates the node sets used by the collector.
pub trait NodeSetFactory<T> {
    /// Creates a new, empty set.
    fn create_node_set(&self) -> Box<dyn NodeSet<T>>;
}

/// Hash-backed sets; `pop` returns an arbitrary member.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashNodeSetFactory;

impl<T: NodeId> NodeSetFactory<T> for HashNodeSetFactory {
    fn create_node_set(&self) -> Box<dyn NodeSet<T>> {
        Box::new(HashNodeSet::default())
    }
}

/// Members packed densely in `slots`, with `index` mapping each member to
/// its slot. Removal swaps the last slot into the hole, so every operation
/// is constant time.
struct HashNodeSet<T> {
    slots: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T> Default for HashNodeSet<T> {
    fn default() -> Self {
        HashNodeSet {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: NodeId> NodeSet<T> for HashNodeSet<T> {
    fn insert(&mut self, node: T) -> bool {
        if self.index.contains_key(&node) {
            return false;
        }
        self.index.insert(node.clone(), self.slots.len());
        self.slots.push(node);
        true
    }

    fn remove(&mut self, node: &T) -> bool {
        let Some(slot) = self.index.remove(node) else {
            return false;
        };
        self.slots.swap_remove(slot);
        if let Some(moved) = self.slots.get(slot) {
            self.index.insert(moved.clone(), slot);
        }
        true
    }

    fn contains(&self, node: &T) -> bool {
        self.index.contains_key(node)
    }

    fn pop(&mut self) -> Option<T> {
        let node = self.slots.pop()?;
        self.index.remove(&node);
        Some(node)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn to_vec(&self) -> Vec<T> {
        self.slots.clone()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }
}

/// Insertion-ordered sets; `pop` returns the oldest member.
///
/// Gives a deterministic, breadth-first tracing order.
#[derive(Debug)]
pub struct FifoNodeSetFactory<T>(PhantomData<fn() -> T>);

impl<T> FifoNodeSetFactory<T> {
    /// Creates the factory.
    pub fn new() -> Self {
        FifoNodeSetFactory(PhantomData)
    }
}

impl<T> Default for FifoNodeSetFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NodeId> NodeSetFactory<T> for FifoNodeSetFactory<T> {
    fn create_node_set(&self) -> Box<dyn NodeSet<T>> {
        Box::new(FifoNodeSet::default())
    }
}

/// Removal only touches `members`; `order` keeps stale entries that `pop`
/// skips and compaction drops.
struct FifoNodeSet<T> {
    order: VecDeque<T>,
    members: HashSet<T>,
}

impl<T> Default for FifoNodeSet<T> {
    fn default() -> Self {
        FifoNodeSet {
            order: VecDeque::new(),
            members: HashSet::new(),
        }
    }
}

impl<T: NodeId> FifoNodeSet<T> {
    fn compact(&mut self) {
        if self.order.len() > 2 * self.members.len() + 16 {
            let mut seen = HashSet::with_capacity(self.members.len());
            let members = &self.members;
            self.order
                .retain(|node| members.contains(node) && seen.insert(node.clone()));
        }
    }
}

impl<T: NodeId> NodeSet<T> for FifoNodeSet<T> {
    fn insert(&mut self, node: T) -> bool {
        if !self.members.insert(node.clone()) {
            return false;
        }
        self.order.push_back(node);
        true
    }

    fn remove(&mut self, node: &T) -> bool {
        let removed = self.members.remove(node);
        if removed {
            self.compact();
        }
        removed
    }

    fn contains(&self, node: &T) -> bool {
        self.members.contains(node)
    }

    fn pop(&mut self) -> Option<T> {
        while let Some(node) = self.order.pop_front() {
            if self.members.remove(&node) {
                return Some(node);
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn to_vec(&self) -> Vec<T> {
        let mut seen = HashSet::with_capacity(self.members.len());
        self.order
            .iter()
            .filter(|node| self.members.contains(*node) && seen.insert(*node))
            .cloned()
            .collect()
    }

    fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}
