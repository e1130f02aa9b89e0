use super::GraphState;
use crate::{
    code::{CanonicalCode, Normality},
    types::Mark,
};
use log::{debug, trace};

impl GraphState<'_> {
    /// Tests whether `code` is the canonical code of the current graph.
    ///
    /// Every spanning tree of the graph is enumerated once and compared with
    /// the tree part of `code`; ties are settled on the closing edges. The
    /// graph is left exactly as it was.
    ///
    /// The tree part of `code` must be canonically ordered, as it is for a
    /// growth accepted by [`check_growth`](Self::check_growth); node ids are
    /// read as its pre-order positions.
    pub fn is_normal(&mut self, code: &CanonicalCode) -> Normality {
        assert_eq!(self.log.depth(), 0, "Invalid state: removed edges pending");
        assert!(
            self.nodes.len() >= 2,
            "Invalid state: {} nodes, at least 2 required",
            self.nodes.len()
        );
        self.self_done = false;
        self.trees_visited = 0;
        self.preorder_nodes.clear();
        let mut result = self.enumerate_spanning(code);
        if result == Normality::NotLower && !self.self_done {
            result = self.normalize_self(code);
        }
        debug!(
            "{} nodes, {} edges: {} after {} spanning trees",
            self.nodes.len(),
            self.edge_count,
            result,
            self.trees_visited
        );
        result
    }

    /// Removes one cycle edge at a time, in decreasing `(from, to)` order
    /// along each branch, so that every spanning tree is reached once. The
    /// cycle marks of a level are cleared before it returns.
    fn enumerate_spanning(&mut self, code: &CanonicalCode) -> Normality {
        if self.edge_count == self.nodes.len() - 1 {
            self.trees_visited += 1;
            trace!("spanning tree {} with {} removed edges", self.trees_visited, self.close_count);
            if self.close_count == code.close_tuples.len() {
                // Reached again by normalize_self.
                return Normality::NotLower;
            }
            return self.normalize_tree(code);
        }
        let depth = self.log.depth();
        assert!(
            depth < Mark::BITS as usize,
            "Invalid state: more than {} independent cycles",
            Mark::BITS
        );
        let bit: Mark = 1 << depth;
        self.determine_cycles(bit);
        let result = self.remove_cycle_edges(code, bit);
        self.clear_cycle_marks(bit);
        result
    }

    /// Removes, one after another, every edge marked with `bit` that lies
    /// below the last removed edge, and recurses on the rest.
    fn remove_cycle_edges(&mut self, code: &CanonicalCode, bit: Mark) -> Normality {
        let (last_from, last_to) = {
            let last = self.log.top();
            (last.from, last.to)
        };
        for i in 0..self.nodes.len() {
            let mut j = 0;
            while j < self.nodes[i].edges.len() {
                let slot = self.nodes[i].edges[j];
                if slot.cycle_mark & bit != 0
                    && slot.to > i
                    && (i < last_from || (i == last_from && slot.to < last_to))
                {
                    self.delete_edge_at(i, j);
                    let result = self.enumerate_spanning(code);
                    self.reinsert_edge();
                    if result != Normality::NotLower {
                        return result;
                    }
                }
                j += 1;
            }
        }
        Normality::NotLower
    }
}
