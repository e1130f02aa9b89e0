//! Canonical ordering of spanning trees and comparison against a stored code.
//!
//! A spanning tree is hung from its center, both lowest labeled paths from
//! the center outward are traced, and the tree is then ordered bottom-up.
//! Its pre-order walk is compared tuple by tuple with the stored code; on a
//! tie the closing edges are compared under every pre-order that equal
//! siblings allow.

mod centers;
mod closing;
mod layers;
mod order;
mod preorder;

use self::{
    centers::{Center, Centers},
    closing::BacktrackString,
    layers::Layers,
    preorder::Preorder,
};
use super::GraphState;
use crate::{
    code::{CanonicalCode, CloseTuple, Normality},
    types::{EdgeLabel, NodeId},
};
use log::{debug, trace};
use std::cmp::Ordering;

/// Maps an ordering of a candidate against the stored code to a verdict.
macro_rules! gate {
    ($candidate:expr, $stored:expr) => {
        match $candidate.cmp(&$stored) {
            Ordering::Less => return Normality::LowerAtPrefix,
            Ordering::Greater => return Normality::NotLower,
            Ordering::Equal => {}
        }
    };
}

impl GraphState<'_> {
    /// Compares the current spanning tree, completed by the removed edges,
    /// with `code`.
    pub(crate) fn normalize_tree(&mut self, code: &CanonicalCode) -> Normality {
        let centers = Centers::find(&self.nodes);
        gate!(centers.backbone_length(), code.backbone_length);
        match centers.center {
            Center::Single(root) => gate!(self.nodes[root].label, code.center_label),
            Center::Pair(first, second) => {
                gate!(self.center_edge_label(first, second), code.bicenter_label)
            }
        }

        let mut layers = Layers::classify(&self.nodes, &centers);
        let bicentered = centers.is_bicentered();
        // Bicentered forests have no tuple for the roots themselves.
        let (first_depth, offset) = if bicentered { (1, 1) } else { (0, 0) };
        for (path, start) in [(0, 0), (1, code.start_second_path)].iter().copied() {
            for depth in first_depth..layers.max_depth {
                gate!(
                    layers.path_labels[path][depth],
                    code.tree_tuples[start + depth - offset].label
                );
            }
        }

        if code.nasty {
            if let Center::Pair(first, second) = centers.center {
                layers.edge_label[first] = self.nodes[first].label;
                layers.edge_label[second] = self.nodes[second].label;
            }
        }
        layers.order();
        let preorder = Preorder::walk(&layers, &centers);

        let mut tuples = code.tree_tuples.iter();
        let mut roots_seen = 0;
        for visit in &preorder.visits {
            if visit.is_center(bicentered) {
                roots_seen += 1;
                if visit.preorder > 0 && visit.preorder <= code.start_second_path {
                    return Normality::NotLower;
                }
                continue;
            }
            if roots_seen == 1 && visit.preorder > code.start_second_path {
                return Normality::LowerAtPrefix;
            }
            let tuple = visit.tuple(&layers, bicentered);
            let stored = match tuples.next() {
                Some(stored) => stored,
                None => panic!("Invalid code: fewer tree tuples than tree nodes"),
            };
            // Deeper tuples come first.
            gate!(stored.depth, tuple.depth);
            gate!(tuple.label, stored.label);
        }

        if self.close_count == code.close_tuples.len() {
            self.preorder_nodes = preorder.nodes();
        }
        if !self.self_done {
            let result = self.normalize_self(code);
            if result != Normality::NotLower {
                return result;
            }
        }

        assert_eq!(
            self.preorder_nodes.len(),
            self.nodes.len(),
            "Invalid code: the stored tree does not describe this graph"
        );
        let removed = self.log.removed();
        let mut string = BacktrackString::build(&layers, &preorder.numbers, removed);
        closing::search(&mut string, removed, &self.preorder_nodes, &code.close_tuples)
    }

    /// Runs [`normalize_tree`](Self::normalize_tree) on the tree the code
    /// itself describes, which fills in the pre-order of the stored tree.
    ///
    /// Every edge removed so far is put back, the closing edges are removed,
    /// and afterwards the previous removals are redone at their positions.
    pub(crate) fn normalize_self(&mut self, code: &CanonicalCode) -> Normality {
        self.self_done = true;
        let mut removed = Vec::with_capacity(self.log.depth());
        while self.log.depth() > 0 {
            let record = self.log.top();
            removed.push((record.from, record.pos_from));
            self.reinsert_edge();
        }
        for tuple in code.close_tuples.iter().rev() {
            self.strip_closing_edge(tuple);
        }
        let result = self.normalize_tree(code);
        for _ in &code.close_tuples {
            self.reinsert_edge();
        }
        while let Some((node, pos)) = removed.pop() {
            self.delete_edge_at(node, pos);
        }
        result
    }

    /// The code of the current growth: the spanning tree left by removing
    /// every closing edge, walked from its center with children in node id
    /// order, and the closing edges in ascending order.
    ///
    /// Panics if edges are removed or the graph has fewer than two nodes.
    pub fn canonical_code(&mut self) -> CanonicalCode {
        self.describe().0
    }

    /// Describes the current growth and tests it.
    ///
    /// Nodes must be numbered in a pre-order of the canonically ordered
    /// spanning tree they were grown as; any other numbering has a lower
    /// encoding and is rejected without enumerating spanning trees.
    pub fn check_growth(&mut self) -> (CanonicalCode, Normality) {
        let (code, in_order) = self.describe();
        let result = if in_order {
            self.is_normal(&code)
        } else {
            self.trees_visited = 0;
            debug!("{}: not grown in canonical order", code);
            Normality::LowerAtPrefix
        };
        (code, result)
    }

    /// The growth code, and whether the node ids are a pre-order of the
    /// canonically ordered self tree.
    fn describe(&mut self) -> (CanonicalCode, bool) {
        assert_eq!(self.log.depth(), 0, "Invalid state: removed edges pending");
        let mut close_tuples: Vec<CloseTuple> = self
            .nodes
            .iter()
            .enumerate()
            .flat_map(|(id, node)| {
                node.edges
                    .iter()
                    .filter(move |slot| slot.closing && id < slot.to)
                    .map(move |slot| CloseTuple::new(id + 1, slot.to + 1, slot.label))
            })
            .collect();
        close_tuples.sort();
        for tuple in close_tuples.iter().rev() {
            self.strip_closing_edge(tuple);
        }

        let centers = Centers::find(&self.nodes);
        let mut layers = Layers::classify(&self.nodes, &centers);
        let bicentered = centers.is_bicentered();
        let mut code = CanonicalCode {
            backbone_length: centers.backbone_length(),
            ..Default::default()
        };
        match centers.center {
            Center::Single(root) => code.center_label = self.nodes[root].label,
            Center::Pair(first, second) => {
                code.bicenter_label = self.center_edge_label(first, second);
                code.nasty = layers.lowest_tree.is_none()
                    && self.nodes[first].label != self.nodes[second].label;
                if code.nasty {
                    layers.edge_label[first] = self.nodes[first].label;
                    layers.edge_label[second] = self.nodes[second].label;
                }
            }
        }
        let grown = Preorder::grown(&layers, &centers);
        let (tree_tuples, start_second_path) = grown.tuples(&layers, bicentered);
        code.tree_tuples = tree_tuples;
        code.start_second_path = start_second_path;
        layers.order();
        let (canonical, canonical_start) =
            Preorder::walk(&layers, &centers).tuples(&layers, bicentered);
        let in_order = grown.follows_node_ids()
            && canonical == code.tree_tuples
            && canonical_start == code.start_second_path;

        for _ in &close_tuples {
            self.reinsert_edge();
        }
        code.close_tuples = close_tuples;
        trace!("growth code {}, in order: {}", code, in_order);
        (code, in_order)
    }

    /// Removes the closing edge described by `tuple` through the edit log.
    fn strip_closing_edge(&mut self, tuple: &CloseTuple) {
        let (from, to) = (tuple.from - 1, tuple.to - 1);
        match self.nodes[from]
            .edges
            .iter()
            .rposition(|slot| slot.closing && slot.to == to)
        {
            Some(pos) => self.delete_edge_at(from, pos),
            None => panic!("Invalid closing edge {}: not in the graph", tuple),
        }
    }

    fn center_edge_label(&self, first: NodeId, second: NodeId) -> EdgeLabel {
        match self.nodes[first].edges.iter().find(|slot| slot.to == second) {
            Some(slot) => slot.label,
            None => unreachable!("centers {} and {} are not adjacent", first, second),
        }
    }
}
