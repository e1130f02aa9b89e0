//! One mining run over a single pattern graph.

use crate::{
    code::{CanonicalCode, CloseTuple, Normality},
    graph_state::GraphState,
    labels::LabelTable,
    types::{Degree, EdgeLabel, NodeId, NodeLabel},
};
use log::debug;

/// Owns the pattern graph of a mining run and the code last accepted for it.
///
/// The graph is grown as a tree first and then closed by edges in ascending
/// tuple order; edits are undone in the reverse order. Only a tree grown from
/// its center in pre-order can be accepted.
#[derive(Debug)]
pub struct Session<'a> {
    state: GraphState<'a>,
    closes: Vec<CloseTuple>,
    accepted: Option<CanonicalCode>,
}

impl<'a> Session<'a> {
    pub fn new(labels: &'a LabelTable) -> Self {
        Self {
            state: GraphState::new(labels),
            closes: vec![],
            accepted: None,
        }
    }

    pub fn state(&self) -> &GraphState<'a> {
        &self.state
    }

    /// The code of the last growth that passed [`check`](Self::check).
    pub fn accepted(&self) -> Option<&CanonicalCode> {
        self.accepted.as_ref()
    }

    pub fn start(&mut self, label: NodeLabel) {
        self.state.insert_start_node(label);
    }

    /// Appends a leaf to `from` over `label`.
    pub fn grow(&mut self, from: NodeId, label: EdgeLabel, max_degree: Degree) -> NodeId {
        assert!(self.closes.is_empty(), "Invalid growth: graph already closed");
        self.state.insert_node(from, label, max_degree)
    }

    /// Removes the last leaf, or the start node once it is alone.
    pub fn shrink(&mut self) {
        assert!(!self.state.is_empty(), "Invalid shrink: empty graph");
        assert!(self.closes.is_empty(), "Invalid shrink: closing edges present");
        if self.state.num_nodes() == 1 {
            self.state.delete_start_node();
        } else {
            self.state.delete_node();
        }
    }

    /// Adds a closing edge between 1-based node positions. Closing edges
    /// must be added in ascending tuple order.
    pub fn close(&mut self, from: usize, to: usize, label: EdgeLabel) {
        let tuple = CloseTuple::new(from, to, label);
        if let Some(last) = self.closes.last() {
            assert!(
                *last < tuple,
                "Invalid closing edge {}: not above {}",
                tuple,
                last
            );
        }
        self.state.insert_edge(tuple.from, tuple.to, label);
        self.closes.push(tuple);
    }

    /// Removes the last closing edge.
    pub fn open(&mut self) {
        if let Some(tuple) = self.closes.pop() {
            self.state.delete_edge(tuple.from, tuple.to);
        }
    }

    /// Tests whether the current growth is canonical and remembers its code
    /// if it is.
    pub fn check(&mut self) -> Normality {
        let (code, result) = self.state.check_growth();
        debug!("{}: {}", code, result);
        if result.is_canonical() {
            self.accepted = Some(code);
        }
        result
    }

    /// Drops the whole graph and the accepted code.
    pub fn abandon(&mut self) {
        self.state.undo_state();
        self.closes.clear();
        self.accepted = None;
    }
}
