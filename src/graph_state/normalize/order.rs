use super::layers::Layers;
use crate::types::NodeId;
use std::cmp::Ordering;

impl Layers {
    /// Sorts every layer bottom-up and ranks equal subtrees with equal codes.
    ///
    /// After this, each layer and each children list is in canonical order.
    pub fn order(&mut self) {
        for depth in (0..self.max_depth).rev() {
            let mut layer = std::mem::take(&mut self.layers[depth]);
            layer.sort_by(|&a, &b| self.compare(depth, a, b));
            let mut code = 0;
            for i in 0..layer.len() {
                if i > 0 && self.compare(depth, layer[i - 1], layer[i]) != Ordering::Equal {
                    code += 1;
                }
                self.code[layer[i]] = code;
            }
            if depth > 0 {
                for &node in &layer {
                    if let Some(parent) = self.parent[node] {
                        self.children[parent].clear();
                    }
                }
                for &node in &layer {
                    if let Some(parent) = self.parent[node] {
                        self.children[parent].push(node);
                    }
                }
            }
            self.layers[depth] = layer;
        }
    }

    /// Nodes of the lowest tree first, then nodes continuing their path,
    /// then by edge label, then by the codes of their children, and finally
    /// nodes with more children first.
    fn compare(&self, depth: usize, a: NodeId, b: NodeId) -> Ordering {
        let off_a = !self.is_lowest_tree(a);
        let off_b = !self.is_lowest_tree(b);
        off_a.cmp(&off_b).then_with(|| {
            let path_label = self.path_labels[off_a as usize][depth];
            let (label_a, label_b) = (self.edge_label[a], self.edge_label[b]);
            (label_b == path_label)
                .cmp(&(label_a == path_label))
                .then(label_a.cmp(&label_b))
                .then_with(|| {
                    let (children_a, children_b) = (&self.children[a], &self.children[b]);
                    children_a
                        .iter()
                        .zip(children_b)
                        .map(|(&x, &y)| self.code[x].cmp(&self.code[y]))
                        .find(|ordering| *ordering != Ordering::Equal)
                        .unwrap_or(Ordering::Equal)
                        .then(children_b.len().cmp(&children_a.len()))
                })
        })
    }
}
