use super::layers::Layers;
use crate::{
    code::{CloseTuple, Normality},
    graph_state::edit_log::RemovedEdge,
    tools::Runs,
    types::NodeId,
};
use log::trace;
use std::cmp::Ordering;

/// The pre-order offsets of every node whose place among equal siblings is
/// free, grouped into runs of equal siblings.
///
/// Permuting the offsets inside a run yields another valid pre-order of the
/// same ordered tree; a node's pre-order number is the sum of the offsets
/// along its chain of parent entries.
#[derive(Debug)]
pub(crate) struct BacktrackString {
    offsets: Vec<usize>,
    parents: Vec<Option<usize>>,
    /// Marks the entry ending each run.
    separator: Vec<bool>,
    /// The entry of each node, if it has one.
    entries: Vec<Option<usize>>,
}

impl BacktrackString {
    /// Collects every run of equal siblings that contains an ancestor of an
    /// endpoint of a removed edge.
    pub fn build(layers: &Layers, numbers: &[usize], removed: &[RemovedEdge]) -> Self {
        let n = layers.parent.len();
        let mut close = vec![false; n];
        for record in removed {
            for &end in &[record.from, record.to] {
                let mut walk = Some(end);
                while let Some(node) = walk {
                    close[node] = true;
                    walk = layers.parent[node];
                }
            }
        }
        let mut string = Self {
            offsets: vec![],
            parents: vec![],
            separator: vec![],
            entries: vec![None; n],
        };
        let mut groups: Vec<&[NodeId]> = vec![&layers.layers[0][..]];
        while let Some(group) = groups.pop() {
            for run in Runs::new(group, |&node| layers.code[node]) {
                if !run.iter().any(|&node| close[node]) {
                    continue;
                }
                for &node in run {
                    let (offset, parent) = match layers.parent[node] {
                        Some(parent) => (numbers[node] - numbers[parent], string.entries[parent]),
                        None => (numbers[node], None),
                    };
                    string.entries[node] = Some(string.offsets.len());
                    string.push(offset, parent, false);
                    if close[node] && !layers.children[node].is_empty() {
                        groups.push(&layers.children[node]);
                    }
                }
                string.push(0, None, true);
            }
        }
        string
    }

    fn push(&mut self, offset: usize, parent: Option<usize>, separator: bool) {
        self.offsets.push(offset);
        self.parents.push(parent);
        self.separator.push(separator);
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// The pre-order number of `node` under the current permutation.
    pub fn position(&self, node: NodeId) -> usize {
        let mut position = 0;
        let mut entry = self.entries[node];
        while let Some(index) = entry {
            position += self.offsets[index];
            entry = self.parents[index];
        }
        position
    }

    /// Calls `visit` on every permutation of the offsets within each run,
    /// stopping at the first `Some`.
    ///
    /// Runs are permuted by swapping with an explicit stack: `choice[pos]` is
    /// the entry swapped into `pos`, and `filled` counts the decided entries.
    pub fn permute<F>(&mut self, mut visit: F) -> Option<Normality>
    where
        F: FnMut(&Self) -> Option<Normality>,
    {
        let size = self.len();
        let mut choice = vec![0; size + 1];
        let mut filled = 1;
        loop {
            let pos = filled - 1;
            if filled < size && !self.separator[choice[pos]] {
                self.offsets.swap(pos, choice[pos]);
                if self.separator[filled] && filled + 1 < size {
                    choice[filled + 1] = filled + 1;
                    filled += 2;
                } else {
                    choice[filled] = filled;
                    filled += 1;
                }
                continue;
            }
            if filled == size {
                if let Some(result) = visit(self) {
                    return Some(result);
                }
            }
            filled -= 1;
            if filled == 0 {
                return None;
            }
            let mut pos = filled - 1;
            if self.separator[pos] {
                filled -= 1;
                pos -= 1;
            }
            self.offsets.swap(choice[pos], pos);
            choice[pos] += 1;
        }
    }
}

/// Compares the closing edges of every equivalent pre-order against `stored`.
pub(crate) fn search(
    string: &mut BacktrackString,
    removed: &[RemovedEdge],
    preorder_nodes: &[NodeId],
    stored: &[CloseTuple],
) -> Normality {
    trace!("permuting {} backtrack entries", string.len());
    string
        .permute(|string| {
            let tuples = removed
                .iter()
                .map(|record| {
                    CloseTuple::new(
                        preorder_nodes[string.position(record.from)] + 1,
                        preorder_nodes[string.position(record.to)] + 1,
                        record.label,
                    )
                })
                .collect();
            compare_sorted(tuples, stored)
        })
        .unwrap_or(Normality::NotLower)
}

/// Bubble sorts `tuples`, comparing every settled entry with `stored` as soon
/// as it is in place. Returns `None` unless `tuples` turns out lower.
pub(crate) fn compare_sorted(mut tuples: Vec<CloseTuple>, stored: &[CloseTuple]) -> Option<Normality> {
    let len = tuples.len();
    if len == 0 {
        return None;
    }
    for i in 1..len {
        for j in (i..len).rev() {
            if tuples[j - 1] > tuples[j] {
                tuples.swap(j - 1, j);
            }
        }
        match tuples[i - 1].cmp(&stored[i - 1]) {
            Ordering::Less => return Some(Normality::LowerAtPrefix),
            Ordering::Greater => return None,
            Ordering::Equal => {}
        }
    }
    if tuples[len - 1] < stored[len - 1] {
        Some(Normality::LowerAtLastTuple)
    } else {
        None
    }
}
