use super::{
    adjacency::{self, Node},
    edit_log::{EditLog, RemovedEdge},
};
use crate::{
    labels::LabelTable,
    types::{Degree, EdgeLabel, NodeId, NodeLabel, UNBOUNDED_DEGREE},
};
use std::fmt;

/// The pattern graph currently grown by a mining run.
///
/// Nodes are appended and removed in stack order. Edges removed while probing
/// spanning trees are kept in an [`EditLog`] so that they can be put back at
/// their exact adjacency positions.
#[derive(Debug, Clone)]
pub struct GraphState<'a> {
    pub(crate) labels: &'a LabelTable,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edge_count: usize,
    /// Closing edges currently held in the edit log.
    pub(crate) close_count: usize,
    pub(crate) log: EditLog,
    /// Node at each pre-order position of the self tree.
    pub(crate) preorder_nodes: Vec<NodeId>,
    pub(crate) self_done: bool,
    pub(crate) trees_visited: usize,
}

impl<'a> GraphState<'a> {
    pub fn new(labels: &'a LabelTable) -> Self {
        Self {
            labels,
            nodes: vec![],
            edge_count: 0,
            close_count: 0,
            log: EditLog::new(),
            preorder_nodes: vec![],
            self_done: false,
            trees_visited: 0,
        }
    }

    pub fn labels(&self) -> &'a LabelTable {
        self.labels
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_label(&self, node: NodeId) -> NodeLabel {
        self.nodes[node].label
    }

    pub fn max_degree(&self, node: NodeId) -> Degree {
        self.nodes[node].max_degree
    }

    /// Number of closing edges.
    pub fn num_closing_edges(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|node| node.edges.iter())
            .filter(|slot| slot.closing)
            .count()
            / 2
    }

    /// Removed edges pending reinsertion.
    pub fn removed_edges(&self) -> &[RemovedEdge] {
        self.log.removed()
    }

    /// Base-case spanning trees reached by the last `is_normal` call.
    pub fn trees_visited(&self) -> usize {
        self.trees_visited
    }

    pub fn insert_start_node(&mut self, label: NodeLabel) {
        assert!(self.nodes.is_empty(), "Invalid start node: state not empty");
        self.nodes.push(Node::new(label, UNBOUNDED_DEGREE));
    }

    pub fn delete_start_node(&mut self) {
        assert!(
            self.nodes.len() == 1 && self.nodes[0].edges.is_empty(),
            "Invalid start node deletion"
        );
        self.nodes.pop();
    }

    /// Appends a leaf reached from `from` over `label` and returns its id.
    ///
    /// The leaf is labeled with the other endpoint label of `label`.
    pub fn insert_node(&mut self, from: NodeId, label: EdgeLabel, max_degree: Degree) -> NodeId {
        let node_label = self.labels.opposite(label, self.nodes[from].label);
        let id = self.nodes.len();
        self.nodes.push(Node::new(node_label, max_degree));
        adjacency::link(&mut self.nodes, from, id, label, false);
        self.edge_count += 1;
        debug_assert!(adjacency::mirrors_consistent(&self.nodes));
        id
    }

    /// Removes the most recently appended leaf.
    pub fn delete_node(&mut self) {
        assert!(self.nodes.len() > 1, "Invalid node deletion: no leaf left");
        let id = self.nodes.len() - 1;
        assert!(
            id > 0 && self.nodes[id].degree() == 1,
            "Invalid node deletion: node {} is not a leaf",
            id
        );
        let from = self.nodes[id].edges[0].to;
        adjacency::unlink_last(&mut self.nodes, from, id);
        self.nodes.pop();
        self.edge_count -= 1;
    }

    /// Adds a closing edge between 1-based node positions.
    pub fn insert_edge(&mut self, from: usize, to: usize, label: EdgeLabel) {
        assert!(
            from != to && from >= 1 && to >= 1 && from.max(to) <= self.nodes.len(),
            "Invalid closing edge {} -> {}",
            from,
            to
        );
        adjacency::link(&mut self.nodes, from - 1, to - 1, label, true);
        self.edge_count += 1;
        debug_assert!(adjacency::mirrors_consistent(&self.nodes));
    }

    /// Removes the most recent closing edge between 1-based node positions.
    pub fn delete_edge(&mut self, from: usize, to: usize) {
        assert!(
            from >= 1 && to >= 1 && from.max(to) <= self.nodes.len(),
            "Invalid closing edge deletion {} -> {}",
            from,
            to
        );
        let slot = adjacency::unlink_last(&mut self.nodes, from - 1, to - 1);
        assert!(slot.closing, "Invalid closing edge deletion: tree edge");
        self.edge_count -= 1;
    }

    /// Removes the edge whose half is `nodes[node].edges[pos]` and logs it.
    pub fn delete_edge_at(&mut self, node: NodeId, pos: usize) {
        let slot = self.nodes[node].edges[pos];
        let record = RemovedEdge {
            from: node,
            pos_from: pos,
            to: slot.to,
            pos_to: slot.mirror,
            label: slot.label,
            cycle_mark: slot.cycle_mark,
            closing: slot.closing,
        };
        adjacency::swap_remove(&mut self.nodes, record.to, record.pos_to);
        adjacency::swap_remove(&mut self.nodes, record.from, record.pos_from);
        self.log.push(record);
        self.edge_count -= 1;
        if record.closing {
            self.close_count += 1;
        }
        debug_assert!(adjacency::mirrors_consistent(&self.nodes));
    }

    /// Restores the most recently removed edge at its original positions.
    pub fn reinsert_edge(&mut self) {
        let record = self.log.pop();
        adjacency::insert_at(&mut self.nodes, record.to, record.pos_to, record.to_half());
        adjacency::insert_at(&mut self.nodes, record.from, record.pos_from, record.from_half());
        self.edge_count += 1;
        if record.closing {
            self.close_count -= 1;
        }
        debug_assert!(adjacency::mirrors_consistent(&self.nodes));
    }

    /// Removes every node, leaving an empty state.
    pub fn undo_state(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        for _ in 1..self.nodes.len() {
            self.delete_node();
        }
        self.delete_start_node();
    }
}

/// Renders the state in GSP form, with input labels.
impl fmt::Display for GraphState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (id, node) in self.nodes.iter().enumerate() {
            writeln!(f, "v {} {}", id, self.labels.input_node_label(node.label))?;
        }
        for (id, node) in self.nodes.iter().enumerate() {
            for slot in node.edges.iter().filter(|slot| id < slot.to) {
                writeln!(
                    f,
                    "e {} {} {}",
                    id,
                    slot.to,
                    self.labels.input_edge_label(slot.label)
                )?;
            }
        }
        Ok(())
    }
}
