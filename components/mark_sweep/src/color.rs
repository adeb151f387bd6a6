//! Per-node color state.
//!
//! Colors live outside the node payload, in a table keyed by node id. Each
//! color also has a member set built by the configured [`NodeSetFactory`];
//! the gray set is the tracing worklist.
//!
//! One mutex guards the table, so every per-node update (including the
//! check-then-set transitions used by the barrier and the stages) is
//! linearizable between the collector and any number of mutator threads.

use std::collections::HashMap;

use core_types::{Color, GcError, GcResult, NodeId};
use parking_lot::Mutex;

use crate::node_set::{NodeSet, NodeSetFactory};

struct ColorTable<T> {
    colors: HashMap<T, Color>,
    members: [Box<dyn NodeSet<T>>; 3],
}

impl<T: NodeId> ColorTable<T> {
    fn recolor(&mut self, node: &T, from: Color, to: Color) {
        if from == to {
            return;
        }
        self.members[from.index()].remove(node);
        self.members[to.index()].insert(node.clone());
        self.colors.insert(node.clone(), to);
    }
}

/// Maps node ids to their tri-color tag.
pub struct ColorState<T: NodeId> {
    table: Mutex<ColorTable<T>>,
}

impl<T: NodeId> ColorState<T> {
    /// Creates an empty color state whose member sets come from `factory`.
    pub fn new(factory: &dyn NodeSetFactory<T>) -> Self {
        ColorState {
            table: Mutex::new(ColorTable {
                colors: HashMap::new(),
                members: [
                    factory.create_node_set(),
                    factory.create_node_set(),
                    factory.create_node_set(),
                ],
            }),
        }
    }

    /// Returns the color of `node`.
    ///
    /// An unknown node is an error, never a default color: it means the
    /// caller is out of sync with the graph.
    pub fn color(&self, node: &T) -> GcResult<Color> {
        self.table
            .lock()
            .colors
            .get(node)
            .copied()
            .ok_or_else(|| GcError::unknown(node))
    }

    /// Returns true if `node` has a color entry.
    pub fn contains(&self, node: &T) -> bool {
        self.table.lock().colors.contains_key(node)
    }

    /// Records a newly created node with the given color, replacing any
    /// previous entry.
    pub fn insert(&self, node: T, color: Color) {
        let mut table = self.table.lock();
        if let Some(previous) = table.colors.insert(node.clone(), color) {
            table.members[previous.index()].remove(&node);
        }
        table.members[color.index()].insert(node);
    }

    /// Sets the color of an existing node.
    pub fn set_color(&self, node: &T, color: Color) -> GcResult<()> {
        let mut table = self.table.lock();
        let current = *table.colors.get(node).ok_or_else(|| GcError::unknown(node))?;
        table.recolor(node, current, color);
        Ok(())
    }

    /// Recolors `node` from `from` to `to` if it currently has color `from`.
    ///
    /// Returns true if the transition happened. Unknown nodes are left alone.
    pub fn shade(&self, node: &T, from: Color, to: Color) -> bool {
        let mut table = self.table.lock();
        match table.colors.get(node) {
            Some(&current) if current == from => {
                table.recolor(node, from, to);
                true
            }
            _ => false,
        }
    }

    /// Takes one gray node off the worklist and colors it black.
    pub fn blacken_next_gray(&self) -> Option<T> {
        let mut table = self.table.lock();
        let node = table.members[Color::Gray.index()].pop()?;
        table.members[Color::Black.index()].insert(node.clone());
        table.colors.insert(node.clone(), Color::Black);
        Some(node)
    }

    /// Drops the entry for a deleted node, returning its last color.
    pub fn remove(&self, node: &T) -> Option<Color> {
        let mut table = self.table.lock();
        let color = table.colors.remove(node)?;
        table.members[color.index()].remove(node);
        Some(color)
    }

    /// Snapshot of every node currently colored `color`.
    pub fn nodes_with_color(&self, color: Color) -> Vec<T> {
        self.table.lock().members[color.index()].to_vec()
    }

    /// Number of nodes currently colored `color`.
    pub fn count(&self, color: Color) -> usize {
        self.table.lock().members[color.index()].len()
    }

    /// Number of nodes with a color entry.
    pub fn len(&self) -> usize {
        self.table.lock().colors.len()
    }

    /// Returns true if no node has a color entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
