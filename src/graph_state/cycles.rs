use super::GraphState;
use crate::types::{Mark, NodeId};

impl GraphState<'_> {
    /// Marks every edge lying on a cycle with `used_bit`.
    ///
    /// Depth-first search from node 0 with an explicit stack of
    /// `(node, next edge position)` frames. An edge reaching a node that is
    /// on the stack (other than the parent) closes a cycle, and every edge of
    /// that cycle is marked on both halves. Marked edges are not traversed
    /// again.
    pub(crate) fn determine_cycles(&mut self, used_bit: Mark) {
        self.clear_cycle_marks(used_bit);
        if self.nodes.is_empty() {
            return;
        }
        let mut on_stack = vec![false; self.nodes.len()];
        let mut stack: Vec<(NodeId, usize)> = vec![(0, 0)];
        on_stack[0] = true;
        while let Some(&(node, pos)) = stack.last() {
            if pos == self.nodes[node].edges.len() {
                on_stack[node] = false;
                stack.pop();
                if let Some(frame) = stack.last_mut() {
                    frame.1 += 1;
                }
                continue;
            }
            let slot = self.nodes[node].edges[pos];
            if slot.cycle_mark & used_bit != 0 {
                advance(&mut stack);
            } else if on_stack[slot.to] {
                let parent = stack.len().checked_sub(2).map(|k| stack[k].0);
                if parent != Some(slot.to) {
                    for &(walk, walk_pos) in stack.iter().rev() {
                        self.mark(walk, walk_pos, used_bit);
                        if walk == slot.to {
                            break;
                        }
                    }
                }
                advance(&mut stack);
            } else {
                on_stack[slot.to] = true;
                stack.push((slot.to, 0));
            }
        }
    }

    fn mark(&mut self, node: NodeId, pos: usize, bit: Mark) {
        let slot = &mut self.nodes[node].edges[pos];
        slot.cycle_mark |= bit;
        let (to, mirror) = (slot.to, slot.mirror);
        self.nodes[to].edges[mirror].cycle_mark |= bit;
    }

    /// Clears `bit` from every edge present.
    pub(crate) fn clear_cycle_marks(&mut self, bit: Mark) {
        for node in self.nodes.iter_mut() {
            for slot in node.edges.iter_mut() {
                slot.cycle_mark &= !bit;
            }
        }
    }

    /// Returns whether the edge half at `nodes[node].edges[pos]` carries `bit`.
    #[cfg(test)]
    pub(crate) fn is_marked(&self, node: NodeId, pos: usize, bit: Mark) -> bool {
        self.nodes[node].edges[pos].cycle_mark & bit != 0
    }
}

fn advance(stack: &mut [(NodeId, usize)]) {
    if let Some(frame) = stack.last_mut() {
        frame.1 += 1;
    }
}

#[cfg(test)]
mod tests {
    use crate::{graph_state::GraphState, labels::LabelTable};

    fn create_labels() -> LabelTable {
        LabelTable::new(vec![6], vec![(1, 6, 6)])
    }

    /// Triangle 0-1-2 with a pendant 3 on node 2 and a pendant 4 on node 0.
    fn create_tadpole(labels: &LabelTable) -> GraphState {
        let mut state = GraphState::new(labels);
        state.insert_start_node(0);
        state.insert_node(0, 0, 4);
        state.insert_node(1, 0, 4);
        state.insert_node(2, 0, 4);
        state.insert_node(0, 0, 4);
        state.insert_edge(3, 1, 0);
        state
    }

    fn marked_edges(state: &GraphState, bit: u32) -> Vec<(usize, usize)> {
        let mut edges = vec![];
        for (id, node) in state.nodes().iter().enumerate() {
            for (pos, slot) in node.edges.iter().enumerate() {
                if id < slot.to && state.is_marked(id, pos, bit) {
                    edges.push((id, slot.to));
                }
            }
        }
        edges.sort();
        edges
    }

    #[test]
    fn test_determine_cycles() {
        let labels = create_labels();
        let mut state = create_tadpole(&labels);
        state.determine_cycles(1);
        assert_eq!(marked_edges(&state, 1), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_determine_cycles_clears_bit() {
        let labels = create_labels();
        let mut state = create_tadpole(&labels);
        state.determine_cycles(2);
        state.delete_edge_at(0, 0);
        state.determine_cycles(2);
        assert!(marked_edges(&state, 2).is_empty());
        // The reinserted edge keeps the marks it had when removed.
        state.reinsert_edge();
        assert_eq!(marked_edges(&state, 2), vec![(0, 1)]);
    }

    #[test]
    fn test_clear_cycle_marks() {
        let labels = create_labels();
        let mut state = create_tadpole(&labels);
        state.determine_cycles(1);
        state.determine_cycles(4);
        state.clear_cycle_marks(1);
        assert!(marked_edges(&state, 1).is_empty());
        assert_eq!(marked_edges(&state, 4), vec![(0, 1), (0, 2), (1, 2)]);
        state.clear_cycle_marks(4);
        assert!(state
            .nodes()
            .iter()
            .all(|node| node.edges.iter().all(|slot| slot.cycle_mark == 0)));
    }

    #[test]
    fn test_determine_cycles_two_rings() {
        let labels = create_labels();
        let mut state = GraphState::new(&labels);
        // Two squares sharing the edge 1-2, with a bridge 3-6 hanging off.
        state.insert_start_node(0);
        state.insert_node(0, 0, 4);
        state.insert_node(1, 0, 4);
        state.insert_node(2, 0, 4);
        state.insert_node(2, 0, 4);
        state.insert_node(4, 0, 4);
        state.insert_node(3, 0, 4);
        state.insert_edge(4, 1, 0);
        state.insert_edge(6, 2, 0);
        state.determine_cycles(1);
        assert_eq!(
            marked_edges(&state, 1),
            vec![(0, 1), (0, 3), (1, 2), (1, 5), (2, 3), (2, 4), (4, 5)]
        );
    }
}
