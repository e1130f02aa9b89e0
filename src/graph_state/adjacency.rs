use crate::types::{Degree, EdgeLabel, Mark, NodeId, NodeLabel};

/// One half of an undirected edge, stored in the adjacency list of its owner.
///
/// `nodes[slot.to].edges[slot.mirror]` is the other half and points back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSlot {
    pub to: NodeId,
    pub mirror: usize,
    pub label: EdgeLabel,
    pub cycle_mark: Mark,
    pub closing: bool,
}

impl EdgeSlot {
    pub fn new(to: NodeId, mirror: usize, label: EdgeLabel, closing: bool) -> Self {
        Self {
            to,
            mirror,
            label,
            cycle_mark: 0,
            closing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub label: NodeLabel,
    pub max_degree: Degree,
    pub edges: Vec<EdgeSlot>,
}

impl Node {
    pub fn new(label: NodeLabel, max_degree: Degree) -> Self {
        Self {
            label,
            max_degree,
            edges: vec![],
        }
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// Appends mutual halves of a new edge between `a` and `b`.
pub(crate) fn link(nodes: &mut [Node], a: NodeId, b: NodeId, label: EdgeLabel, closing: bool) {
    let (pos_a, pos_b) = (nodes[a].edges.len(), nodes[b].edges.len());
    nodes[a].edges.push(EdgeSlot::new(b, pos_b, label, closing));
    nodes[b].edges.push(EdgeSlot::new(a, pos_a, label, closing));
}

/// Pops the last halves of `a` and `b`, which must be the same edge.
pub(crate) fn unlink_last(nodes: &mut [Node], a: NodeId, b: NodeId) -> EdgeSlot {
    let slot = match nodes[a].edges.last() {
        Some(&slot) if slot.to == b && slot.mirror + 1 == nodes[b].edges.len() => slot,
        _ => panic!("Invalid edge {} -> {}: not the last edge of both nodes", a, b),
    };
    nodes[a].edges.pop();
    nodes[b].edges.pop();
    slot
}

/// Removes `nodes[owner].edges[pos]` by moving the last half into its place.
///
/// The mirror of the moved half is redirected to `pos`.
pub(crate) fn swap_remove(nodes: &mut [Node], owner: NodeId, pos: usize) {
    let last = nodes[owner].edges.len() - 1;
    if pos != last {
        let moved = nodes[owner].edges[last];
        nodes[moved.to].edges[moved.mirror].mirror = pos;
        nodes[owner].edges.swap(pos, last);
    }
    nodes[owner].edges.pop();
}

/// Inverse of [`swap_remove`]: puts `slot` back at `pos`, moving whatever
/// occupies `pos` to the end of the list.
pub(crate) fn insert_at(nodes: &mut [Node], owner: NodeId, pos: usize, slot: EdgeSlot) {
    nodes[owner].edges.push(slot);
    let last = nodes[owner].edges.len() - 1;
    if pos != last {
        let displaced = nodes[owner].edges[pos];
        nodes[displaced.to].edges[displaced.mirror].mirror = last;
        nodes[owner].edges.swap(pos, last);
    }
}

/// Checks that every half has a mirror pointing back at it.
pub(crate) fn mirrors_consistent(nodes: &[Node]) -> bool {
    nodes.iter().enumerate().all(|(id, node)| {
        node.edges.iter().enumerate().all(|(pos, slot)| {
            nodes
                .get(slot.to)
                .and_then(|other| other.edges.get(slot.mirror))
                .map_or(false, |back| {
                    back.to == id
                        && back.mirror == pos
                        && back.label == slot.label
                        && back.closing == slot.closing
                })
        })
    })
}
